//! # OspfSim - Demo-data generator for OSPF topology visualizers
//!
//! This library maintains an in-memory fake OSPF network topology, applies
//! randomized mutations to it, renders the result as link-state-database
//! dump text, and pushes that text to a visualizer's HTTP endpoint.
//!
//! ## Overview
//!
//! OspfSim exists to drive topology-visualization demos without real routers:
//! it fabricates the `show ip ospf database` style output a visualizer would
//! normally scrape from a live network, and keeps the picture moving by
//! randomly adding routers, taking routers down, changing link metrics, and
//! bringing routers back online.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `topology`: The mutable network model (routers, links, transit network,
//!   stub networks) plus the baseline catalogs and the mutation operations
//! - `render`: LSDB-dump text generation from the current topology state
//! - `sender`: Blocking HTTP delivery of rendered text to the visualizer API
//! - `runner`: The push loop - weighted mutation selection, interval timing,
//!   round limits, and clean shutdown
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ospfsim::topology::TopologyState;
//! use ospfsim::render::generate_ospf_output;
//!
//! let mut state = TopologyState::new();
//! let mut rng = rand::thread_rng();
//!
//! // Mutate the topology, then render it
//! let _event = state.change_random_metric(&mut rng);
//! let text = generate_ospf_output(&mut state, &mut rng);
//! assert!(text.starts_with("OSPF Router with ID"));
//! ```
//!
//! ## Error Handling
//!
//! Send failures are recoverable by design: the runner logs the error and
//! moves on to the next round. Mutations that have nothing to do return
//! `None` rather than an error, and the runner substitutes a metric change.
//! Fatal setup errors surface through `color_eyre` at the binary boundary.

pub mod render;
pub mod runner;
pub mod sender;
pub mod topology;
