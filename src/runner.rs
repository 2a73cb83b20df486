//! The push loop.
//!
//! Drives the demo: round 0 pushes the baseline topology, every later round
//! sleeps the configured interval, applies one weighted-random mutation
//! (falling back to a metric change when the chosen mutation has nothing to
//! do), renders the topology, and POSTs it to the visualizer. Send failures
//! are logged and the loop keeps going; Ctrl-C and the optional round limit
//! end it cleanly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::Result;
use log::{info, warn};
use rand::Rng;

use crate::render::generate_ospf_output;
use crate::sender::{OspfSender, SendError};
use crate::topology::{TopologyEvent, TopologyState};

/// Granularity of the interval sleep, so Ctrl-C is picked up promptly
const SLEEP_SLICE: Duration = Duration::from_millis(200);

/// Relative weights for the per-round mutation choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationWeights {
    pub add: u32,
    pub remove: u32,
    pub change_metric: u32,
    pub restore: u32,
}

impl Default for MutationWeights {
    fn default() -> Self {
        Self {
            add: 30,
            remove: 20,
            change_metric: 35,
            restore: 15,
        }
    }
}

/// The four mutations a round can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    AddRouter,
    RemoveRouter,
    ChangeMetric,
    RestoreRouter,
}

/// Loop configuration, filled in from the CLI
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Time between pushes
    pub interval: Duration,
    /// Number of mutation rounds; 0 means run until interrupted
    pub rounds: u64,
    pub weights: MutationWeights,
}

/// Pick one mutation by cumulative-weight table lookup against a uniform
/// draw. A zero total weight degenerates to a metric change.
pub fn pick_mutation(weights: &MutationWeights, rng: &mut impl Rng) -> MutationKind {
    let table = [
        (MutationKind::AddRouter, weights.add),
        (MutationKind::RemoveRouter, weights.remove),
        (MutationKind::ChangeMetric, weights.change_metric),
        (MutationKind::RestoreRouter, weights.restore),
    ];
    let total: u32 = table.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return MutationKind::ChangeMetric;
    }

    let draw = rng.gen_range(1..=total);
    let mut cumulative = 0;
    for (kind, weight) in table {
        cumulative += weight;
        if draw <= cumulative {
            return kind;
        }
    }
    MutationKind::ChangeMetric
}

/// Apply the chosen mutation; when it reports nothing to do, fall back to a
/// metric change so the round still has a chance of producing an event
pub fn apply_with_fallback(
    state: &mut TopologyState,
    kind: MutationKind,
    rng: &mut impl Rng,
) -> Option<TopologyEvent> {
    let event = match kind {
        MutationKind::AddRouter => state.add_random_router(rng),
        MutationKind::RemoveRouter => state.remove_random_router(rng),
        MutationKind::ChangeMetric => state.change_random_metric(rng),
        MutationKind::RestoreRouter => state.restore_random_router(rng),
    };
    event.or_else(|| state.change_random_metric(rng))
}

/// Sleep for the push interval in short slices, returning false as soon as
/// shutdown is requested
fn sleep_interval(interval: Duration, shutdown: &AtomicBool) -> bool {
    let deadline = Instant::now() + interval;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            return false;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return true;
        }
        thread::sleep(remaining.min(SLEEP_SLICE));
    }
}

/// Render the current topology and push it, logging the outcome. Failures
/// are recoverable: the next round proceeds regardless.
fn render_and_send(state: &mut TopologyState, sender: &OspfSender, rng: &mut impl Rng) {
    let ospf_text = generate_ospf_output(state, rng);
    match sender.send(&ospf_text) {
        Ok((status, response)) => {
            info!("  -> POST {} | size={} bytes", status.as_u16(), response.size_label());
        }
        Err(err @ SendError::Status { .. }) => warn!("  -> {}", err),
        Err(err) => warn!("  -> Error: {}", err),
    }
}

/// Run the push loop until the round limit is reached or shutdown is set
pub fn run(options: &RunnerOptions, sender: &OspfSender, shutdown: &AtomicBool) -> Result<()> {
    let mut state = TopologyState::new();
    let mut rng = rand::thread_rng();
    let mut round: u64 = 0;

    // First push: the unmodified baseline
    info!(
        "[Round 0] Sending baseline topology ({} routers, {} links)",
        state.router_count(),
        state.link_count()
    );
    render_and_send(&mut state, sender, &mut rng);

    loop {
        if !sleep_interval(options.interval, shutdown) {
            info!("Stopped by user");
            break;
        }
        round += 1;

        if options.rounds > 0 && round > options.rounds {
            info!("All rounds complete");
            break;
        }

        let kind = pick_mutation(&options.weights, &mut rng);
        match apply_with_fallback(&mut state, kind, &mut rng) {
            Some(event) => info!("[Round {}] {}", round, event),
            None => info!("[Round {}] No changes possible, sending same topology", round),
        }
        info!(
            "  Topology: {} routers, {} links",
            state.router_count(),
            state.link_count()
        );

        render_and_send(&mut state, sender, &mut rng);
    }

    Ok(())
}
