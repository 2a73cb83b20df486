//! Mutable topology state and mutation operations.
//!
//! `TopologyState` owns the live network model. Each round the runner asks it
//! to apply one randomized mutation:
//!
//! - **Add**: bring a catalog extra online, linked to its declared peer
//! - **Remove**: take a non-core router down, tearing out everything it owns
//! - **Change metric**: re-cost one existing link
//! - **Restore**: bring a baseline router back with its original attachments
//!
//! Mutations that find nothing to do return `None`; the caller substitutes a
//! fallback mutation. Successful mutations return a [`TopologyEvent`] used
//! for logging.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::topology::baseline;
use crate::topology::types::{Link, LinkType, Router, StubNetwork, TransitNetwork};

/// Structured record of a topology mutation, rendered into the round log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyEvent {
    RouterJoined { id: String, area: String },
    RouterDown { id: String },
    MetricChanged { a: String, b: String, old: u32, new: u32 },
    RouterRestored { id: String },
}

impl fmt::Display for TopologyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RouterJoined { id, area } => write!(f, "Router {} joined (Area {})", id, area),
            Self::RouterDown { id } => write!(f, "Router {} went DOWN", id),
            Self::MetricChanged { a, b, old, new } => {
                write!(f, "Metric {}<->{}: {} -> {}", a, b, old, new)
            }
            Self::RouterRestored { id } => write!(f, "Router {} restored (back online)", id),
        }
    }
}

/// Fabricate an LSA checksum; independent of content on every call
pub(crate) fn rand_checksum(rng: &mut impl Rng) -> String {
    format!("0x{:04X}", rng.gen_range(0x1000..=0xFFFF))
}

/// The live topology model.
///
/// Router iteration order is the sorted order of the dotted-quad ID strings,
/// which is also the order the renderer lists routers in.
#[derive(Debug, Clone)]
pub struct TopologyState {
    pub routers: BTreeMap<String, Router>,
    pub links: Vec<Link>,
    pub transit_net: TransitNetwork,
    pub stubs: BTreeMap<String, Vec<StubNetwork>>,
    /// Catalog extras currently online, so an add never picks a duplicate
    added_extras: BTreeSet<String>,
    seq_counter: u32,
}

impl TopologyState {
    /// Create the baseline five-router demo topology
    pub fn new() -> Self {
        Self {
            routers: baseline::base_routers(),
            links: baseline::base_links(),
            transit_net: baseline::base_transit_net(),
            stubs: baseline::base_stubs(),
            added_extras: BTreeSet::new(),
            seq_counter: 10,
        }
    }

    pub fn router_count(&self) -> usize {
        self.routers.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Next LS sequence number. The counter only ever moves forward, so
    /// sequence numbers never repeat within a run.
    pub(crate) fn next_seq(&mut self) -> String {
        self.seq_counter += 1;
        format!("8000{:04X}", self.seq_counter)
    }

    /// Bring one catalog extra online.
    ///
    /// Picks uniformly among extras not currently in the router set. The new
    /// router gets a fresh sequence number and checksum, a point-to-point
    /// link to its declared peer, and its catalog stub networks.
    pub fn add_random_router(&mut self, rng: &mut impl Rng) -> Option<TopologyEvent> {
        let extras = baseline::extra_routers();
        let available: Vec<&String> = extras
            .keys()
            .filter(|rid| !self.routers.contains_key(*rid))
            .collect();
        let rid = (*available.choose(rng)?).clone();
        let info = &extras[&rid];

        let seq = self.next_seq();
        self.routers.insert(
            rid.clone(),
            Router {
                role: info.role,
                areas: vec![info.area.clone()],
                seq,
                checksum: rand_checksum(rng),
            },
        );
        self.links.push(Link {
            a: info.connect_to.clone(),
            b: rid.clone(),
            iface_a: info.iface_peer.clone(),
            iface_b: info.iface_self.clone(),
            subnet: info.subnet.clone(),
            mask: info.mask.clone(),
            metric: info.metric,
            area: info.area.clone(),
            link_type: LinkType::PointToPoint,
        });
        self.stubs.insert(rid.clone(), info.stubs.clone());
        self.added_extras.insert(rid.clone());

        Some(TopologyEvent::RouterJoined {
            area: info.area.clone(),
            id: rid,
        })
    }

    /// Take one router down.
    ///
    /// Prefers a previously-added extra; falls back to any non-core router.
    /// The three core routers are never removed. Removal tears out the
    /// router, every link touching it, its stub list, its added-extras entry,
    /// and its transit segment membership.
    pub fn remove_random_router(&mut self, rng: &mut impl Rng) -> Option<TopologyEvent> {
        let mut removable: Vec<String> = self
            .added_extras
            .iter()
            .filter(|rid| self.routers.contains_key(*rid))
            .cloned()
            .collect();
        if removable.is_empty() {
            removable = self
                .routers
                .keys()
                .filter(|rid| !baseline::CORE_ROUTERS.contains(&rid.as_str()))
                .cloned()
                .collect();
        }
        let rid = removable.choose(rng)?.clone();

        self.routers.remove(&rid);
        self.links.retain(|link| !link.touches(&rid));
        self.stubs.remove(&rid);
        self.added_extras.remove(&rid);
        if self.transit_net.attached.remove(&rid) {
            self.transit_net.member_ifaces.remove(&rid);
        }

        Some(TopologyEvent::RouterDown { id: rid })
    }

    /// Re-cost one uniformly chosen link.
    ///
    /// The new metric is drawn from the fixed candidate set excluding the
    /// current value, so the change is always observable.
    pub fn change_random_metric(&mut self, rng: &mut impl Rng) -> Option<TopologyEvent> {
        if self.links.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.links.len());
        let old = self.links[idx].metric;
        let candidates: Vec<u32> = baseline::METRIC_CANDIDATES
            .iter()
            .copied()
            .filter(|m| *m != old)
            .collect();
        let new = *candidates.choose(rng)?;
        self.links[idx].metric = new;

        Some(TopologyEvent::MetricChanged {
            a: self.links[idx].a.clone(),
            b: self.links[idx].b.clone(),
            old,
            new,
        })
    }

    /// Bring one baseline router back online.
    ///
    /// Recreates the router from its original definition with a fresh
    /// sequence number, re-adds each original link whose other endpoint is
    /// present (skipping pairs already linked, in either endpoint order),
    /// restores its original stub list, and re-attaches it to the transit
    /// segment if it originally had an interface there.
    pub fn restore_random_router(&mut self, rng: &mut impl Rng) -> Option<TopologyEvent> {
        let base_routers = baseline::base_routers();
        let missing: Vec<&String> = base_routers
            .keys()
            .filter(|rid| !self.routers.contains_key(*rid))
            .collect();
        let rid = (*missing.choose(rng)?).clone();

        let mut router = base_routers[&rid].clone();
        router.seq = self.next_seq();
        self.routers.insert(rid.clone(), router);

        for base_link in baseline::base_links() {
            if !base_link.touches(&rid) {
                continue;
            }
            let other = if base_link.a == rid { &base_link.b } else { &base_link.a };
            if !self.routers.contains_key(other) {
                continue;
            }
            let already = self
                .links
                .iter()
                .any(|link| link.same_pair(&base_link.a, &base_link.b));
            if !already {
                self.links.push(base_link);
            }
        }

        if let Some(stub_list) = baseline::base_stubs().remove(&rid) {
            self.stubs.insert(rid.clone(), stub_list);
        }

        let base_transit = baseline::base_transit_net();
        if let Some(iface) = base_transit.member_ifaces.get(&rid) {
            if !self.transit_net.attached.contains(&rid) {
                self.transit_net.attached.insert(rid.clone());
                self.transit_net
                    .member_ifaces
                    .insert(rid.clone(), iface.clone());
            }
        }

        Some(TopologyEvent::RouterRestored { id: rid })
    }
}

impl Default for TopologyState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::baseline::CORE_ROUTERS;

    #[test]
    fn test_add_increases_count_and_links_peer() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();
        let before = state.router_count();

        let event = state.add_random_router(&mut rng).expect("extras available");
        let rid = match event {
            TopologyEvent::RouterJoined { id, .. } => id,
            other => panic!("unexpected event {:?}", other),
        };

        assert_eq!(state.router_count(), before + 1);
        let peer = baseline::extra_routers()[&rid].connect_to.clone();
        assert!(
            state.links.iter().any(|l| l.same_pair(&rid, &peer)),
            "no link between {} and its peer {}",
            rid,
            peer
        );
        assert!(state.stubs.contains_key(&rid));
    }

    #[test]
    fn test_add_never_repeats_extra() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();
        let mut seen = BTreeSet::new();

        // Three extras in the catalog: three adds succeed, the fourth no-ops
        for _ in 0..3 {
            match state.add_random_router(&mut rng) {
                Some(TopologyEvent::RouterJoined { id, .. }) => {
                    assert!(seen.insert(id.clone()), "extra {} picked twice", id);
                }
                other => panic!("unexpected result {:?}", other),
            }
        }
        assert!(state.add_random_router(&mut rng).is_none());

        // Removing an extra frees it for re-adding
        let removed = match state.remove_random_router(&mut rng) {
            Some(TopologyEvent::RouterDown { id }) => id,
            other => panic!("unexpected result {:?}", other),
        };
        match state.add_random_router(&mut rng) {
            Some(TopologyEvent::RouterJoined { id, .. }) => assert_eq!(id, removed),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_remove_leaves_no_dangling_links() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();

        let rid = match state.remove_random_router(&mut rng) {
            Some(TopologyEvent::RouterDown { id }) => id,
            other => panic!("unexpected result {:?}", other),
        };

        for link in &state.links {
            assert!(!link.touches(&rid), "dangling link {:?}", link);
        }
        assert!(!state.stubs.contains_key(&rid));
        assert!(!state.transit_net.attached.contains(&rid));
        assert!(!state.transit_net.member_ifaces.contains_key(&rid));
    }

    #[test]
    fn test_remove_never_removes_core_routers() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();

        // Exhaust removals; only the two non-core baseline routers can go
        while state.remove_random_router(&mut rng).is_some() {}

        assert_eq!(state.router_count(), CORE_ROUTERS.len());
        for core in CORE_ROUTERS {
            assert!(state.routers.contains_key(core), "core {} missing", core);
        }
    }

    #[test]
    fn test_remove_prefers_added_extras() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();

        let added = match state.add_random_router(&mut rng) {
            Some(TopologyEvent::RouterJoined { id, .. }) => id,
            other => panic!("unexpected result {:?}", other),
        };
        match state.remove_random_router(&mut rng) {
            Some(TopologyEvent::RouterDown { id }) => assert_eq!(id, added),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_change_metric_always_differs() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();

        for _ in 0..50 {
            match state.change_random_metric(&mut rng) {
                Some(TopologyEvent::MetricChanged { old, new, .. }) => {
                    assert_ne!(old, new);
                    assert!(baseline::METRIC_CANDIDATES.contains(&new));
                }
                other => panic!("unexpected result {:?}", other),
            }
        }
    }

    #[test]
    fn test_change_metric_noop_without_links() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();
        state.links.clear();
        assert!(state.change_random_metric(&mut rng).is_none());
    }

    #[test]
    fn test_restore_noop_when_nothing_missing() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();
        assert!(state.restore_random_router(&mut rng).is_none());
    }

    #[test]
    fn test_remove_then_restore_matches_baseline() {
        let mut rng = rand::thread_rng();
        let baseline_state = TopologyState::new();
        let mut state = TopologyState::new();

        let rid = match state.remove_random_router(&mut rng) {
            Some(TopologyEvent::RouterDown { id }) => id,
            other => panic!("unexpected result {:?}", other),
        };
        match state.restore_random_router(&mut rng) {
            Some(TopologyEvent::RouterRestored { id }) => assert_eq!(id, rid),
            other => panic!("unexpected result {:?}", other),
        }

        assert_eq!(state.router_count(), baseline_state.router_count());
        assert_eq!(state.link_count(), baseline_state.link_count());

        // Role and area list come back identical; seq/checksum may differ
        let restored = &state.routers[&rid];
        let original = &baseline_state.routers[&rid];
        assert_eq!(restored.role, original.role);
        assert_eq!(restored.areas, original.areas);
        assert_eq!(state.stubs.get(&rid), baseline_state.stubs.get(&rid));
    }

    #[test]
    fn test_restore_never_duplicates_links() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();

        state.remove_random_router(&mut rng).expect("removable");
        state.restore_random_router(&mut rng).expect("one missing");

        for (i, link) in state.links.iter().enumerate() {
            let dupes = state.links[i + 1..]
                .iter()
                .filter(|other| other.same_pair(&link.a, &link.b))
                .count();
            assert_eq!(dupes, 0, "duplicate link between {} and {}", link.a, link.b);
        }
    }

    #[test]
    fn test_restore_reattaches_transit_membership() {
        let mut rng = rand::thread_rng();
        let mut state = TopologyState::new();

        // Force a core transit member out, bypassing the never-remove rule,
        // to exercise the re-attach path
        let rid = "3.3.3.3".to_string();
        state.routers.remove(&rid);
        state.links.retain(|l| !l.touches(&rid));
        state.stubs.remove(&rid);
        state.transit_net.attached.remove(&rid);
        state.transit_net.member_ifaces.remove(&rid);

        match state.restore_random_router(&mut rng) {
            Some(TopologyEvent::RouterRestored { id }) => assert_eq!(id, rid),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(state.transit_net.attached.contains(&rid));
        assert_eq!(
            state.transit_net.member_ifaces.get(&rid).map(String::as_str),
            Some("10.0.123.3")
        );
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let mut state = TopologyState::new();
        let a = state.next_seq();
        let b = state.next_seq();
        let c = state.next_seq();
        assert_eq!(a, "8000000B");
        assert!(a < b && b < c);
    }
}
