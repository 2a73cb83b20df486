//! Baseline topology catalogs.
//!
//! This file defines the fixed demo network every run starts from: five
//! routers across three areas, four point-to-point links, one transit
//! segment in area 0, two stub networks, and the pool of extra routers a
//! mutation round may bring online. The addressing matches the sample data
//! the visualizer ships with.

use std::collections::{BTreeMap, BTreeSet};

use crate::topology::types::{
    ExtraRouter, Link, LinkType, Router, RouterRole, StubNetwork, TransitNetwork,
};

/// Routers that are never removed by a mutation
pub const CORE_ROUTERS: [&str; 3] = ["1.1.1.1", "2.2.2.2", "3.3.3.3"];

/// Candidate values for randomized metric changes
pub const METRIC_CANDIDATES: [u32; 7] = [5, 10, 15, 20, 30, 50, 100];

/// The five routers present at startup
pub fn base_routers() -> BTreeMap<String, Router> {
    let mut routers = BTreeMap::new();
    routers.insert(
        "1.1.1.1".to_string(),
        Router {
            role: RouterRole::Abr,
            areas: vec!["0".to_string(), "1".to_string()],
            seq: "80000005".to_string(),
            checksum: "0x3A9C".to_string(),
        },
    );
    routers.insert(
        "2.2.2.2".to_string(),
        Router {
            role: RouterRole::AbrAsbr,
            areas: vec!["0".to_string()],
            seq: "80000007".to_string(),
            checksum: "0x4B2E".to_string(),
        },
    );
    routers.insert(
        "3.3.3.3".to_string(),
        Router {
            role: RouterRole::Abr,
            areas: vec!["0".to_string(), "2".to_string()],
            seq: "80000003".to_string(),
            checksum: "0x5D1F".to_string(),
        },
    );
    routers.insert(
        "4.4.4.4".to_string(),
        Router {
            role: RouterRole::Internal,
            areas: vec!["1".to_string()],
            seq: "80000006".to_string(),
            checksum: "0x6E3A".to_string(),
        },
    );
    routers.insert(
        "5.5.5.5".to_string(),
        Router {
            role: RouterRole::Internal,
            areas: vec!["2".to_string()],
            seq: "80000008".to_string(),
            checksum: "0x8D1C".to_string(),
        },
    );
    routers
}

fn p2p_link(
    a: &str,
    b: &str,
    iface_a: &str,
    iface_b: &str,
    subnet: &str,
    mask: &str,
    metric: u32,
    area: &str,
) -> Link {
    Link {
        a: a.to_string(),
        b: b.to_string(),
        iface_a: iface_a.to_string(),
        iface_b: iface_b.to_string(),
        subnet: subnet.to_string(),
        mask: mask.to_string(),
        metric,
        area: area.to_string(),
        link_type: LinkType::PointToPoint,
    }
}

/// The four links present at startup
pub fn base_links() -> Vec<Link> {
    vec![
        p2p_link("1.1.1.1", "2.2.2.2", "10.0.12.1", "10.0.12.2", "10.0.12.0", "255.255.255.252", 10, "0"),
        p2p_link("2.2.2.2", "3.3.3.3", "10.0.23.1", "10.0.23.2", "10.0.23.0", "255.255.255.252", 20, "0"),
        p2p_link("1.1.1.1", "4.4.4.4", "10.1.14.1", "10.1.14.2", "10.1.14.0", "255.255.255.252", 15, "1"),
        p2p_link("3.3.3.3", "5.5.5.5", "10.2.35.1", "10.2.35.2", "10.2.35.0", "255.255.255.252", 25, "2"),
    ]
}

/// The area-0 transit segment with its three initial members
pub fn base_transit_net() -> TransitNetwork {
    let mut attached = BTreeSet::new();
    let mut member_ifaces = BTreeMap::new();
    for (rid, iface) in [
        ("1.1.1.1", "10.0.123.1"),
        ("2.2.2.2", "10.0.123.2"),
        ("3.3.3.3", "10.0.123.3"),
    ] {
        attached.insert(rid.to_string());
        member_ifaces.insert(rid.to_string(), iface.to_string());
    }

    TransitNetwork {
        dr: "10.0.123.2".to_string(),
        advertising: "2.2.2.2".to_string(),
        mask: "/24".to_string(),
        area: "0".to_string(),
        attached,
        member_ifaces,
        metric: 5,
    }
}

/// Stub networks hanging off the two internal routers at startup
pub fn base_stubs() -> BTreeMap<String, Vec<StubNetwork>> {
    let mut stubs = BTreeMap::new();
    stubs.insert(
        "4.4.4.4".to_string(),
        vec![StubNetwork::new("10.1.40.0", "255.255.255.0", 1)],
    );
    stubs.insert(
        "5.5.5.5".to_string(),
        vec![StubNetwork::new("10.2.50.0", "255.255.255.0", 1)],
    );
    stubs
}

/// Pool of routers an add mutation can bring online
pub fn extra_routers() -> BTreeMap<String, ExtraRouter> {
    let mut extras = BTreeMap::new();
    extras.insert(
        "6.6.6.6".to_string(),
        ExtraRouter {
            role: RouterRole::Internal,
            area: "1".to_string(),
            connect_to: "4.4.4.4".to_string(),
            iface_self: "10.1.46.2".to_string(),
            iface_peer: "10.1.46.1".to_string(),
            subnet: "10.1.46.0".to_string(),
            mask: "255.255.255.252".to_string(),
            metric: 10,
            stubs: vec![StubNetwork::new("10.1.60.0", "255.255.255.0", 1)],
        },
    );
    extras.insert(
        "7.7.7.7".to_string(),
        ExtraRouter {
            role: RouterRole::Internal,
            area: "2".to_string(),
            connect_to: "5.5.5.5".to_string(),
            iface_self: "10.2.57.2".to_string(),
            iface_peer: "10.2.57.1".to_string(),
            subnet: "10.2.57.0".to_string(),
            mask: "255.255.255.252".to_string(),
            metric: 15,
            stubs: vec![StubNetwork::new("10.2.70.0", "255.255.255.0", 1)],
        },
    );
    extras.insert(
        "8.8.8.8".to_string(),
        ExtraRouter {
            role: RouterRole::Internal,
            area: "0".to_string(),
            connect_to: "2.2.2.2".to_string(),
            iface_self: "10.0.28.2".to_string(),
            iface_peer: "10.0.28.1".to_string(),
            subnet: "10.0.28.0".to_string(),
            mask: "255.255.255.252".to_string(),
            metric: 30,
            stubs: vec![StubNetwork::new("10.0.80.0", "255.255.255.0", 1)],
        },
    );
    extras
}
