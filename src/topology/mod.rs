//! Network topology module.
//!
//! This module contains the mutable OSPF topology model: the data types,
//! the baseline catalogs the demo starts from, and the randomized mutation
//! operations the runner applies each round.

pub mod baseline;
pub mod state;
pub mod types;

// Re-export key types for easier access
pub use state::{TopologyEvent, TopologyState};
pub use types::{ExtraRouter, Link, LinkType, Router, RouterRole, StubNetwork, TransitNetwork};
