//! LSDB-dump text rendering.
//!
//! Turns the current topology state into the `show ip ospf database router`
//! style text the visualizer ingests. The output fabricates the fields a
//! real dump would carry: ages and checksums are freshly randomized and the
//! network/summary LSAs take fresh sequence numbers on every call, so
//! re-rendering the same logical state yields different bytes. That is
//! intentional demo variety, not state the visualizer depends on.

use rand::Rng;

use crate::topology::state::rand_checksum;
use crate::topology::TopologyState;

/// Fabricate an LS age in the plausible mid-life range
fn rand_age(rng: &mut impl Rng) -> u32 {
    rng.gen_range(50..=800)
}

/// A router's view of one point-to-point link: neighbor ID, local interface,
/// link subnet, mask, metric
struct P2pEntry<'a> {
    neighbor: &'a str,
    iface: &'a str,
    subnet: &'a str,
    mask: &'a str,
    metric: u32,
}

/// Render the full LSDB dump for the current topology.
///
/// Takes `&mut TopologyState` because network and summary LSAs consume fresh
/// sequence numbers from the state's counter.
pub fn generate_ospf_output(state: &mut TopologyState, rng: &mut impl Rng) -> String {
    let mut lines: Vec<String> = vec![
        "OSPF Router with ID (1.1.1.1) (Process ID 1)".to_string(),
        String::new(),
    ];

    let areas: std::collections::BTreeSet<String> = state
        .routers
        .values()
        .flat_map(|r| r.areas.iter().cloned())
        .collect();

    for area in &areas {
        lines.push(format!("                Router Link States (Area {})", area));
        lines.push(String::new());

        let router_ids: Vec<String> = state.routers.keys().cloned().collect();
        for rid in &router_ids {
            let rinfo = state.routers[rid].clone();
            if !rinfo.areas.contains(area) {
                continue;
            }

            // This router's links owned by the current area
            let p2p_entries: Vec<P2pEntry> = state
                .links
                .iter()
                .filter(|link| link.area == *area)
                .filter_map(|link| {
                    link.endpoint_view(rid).map(|(neighbor, iface)| P2pEntry {
                        neighbor,
                        iface,
                        subnet: &link.subnet,
                        mask: &link.mask,
                        metric: link.metric,
                    })
                })
                .collect();

            // Transit segment membership, if this area owns the segment
            let transit_entry = if *area == state.transit_net.area
                && state.transit_net.attached.contains(rid)
            {
                let iface = state
                    .transit_net
                    .member_ifaces
                    .get(rid)
                    .map(String::as_str)
                    .unwrap_or("0.0.0.0");
                Some((state.transit_net.dr.clone(), iface.to_string(), state.transit_net.metric))
            } else {
                None
            };

            let stub_entries = state.stubs.get(rid).cloned().unwrap_or_default();

            // Each p2p link renders as two entries: the point-to-point link
            // plus a stub entry for the link subnet
            let num_entries = p2p_entries.len() * 2
                + transit_entry.iter().count()
                + stub_entries.len();

            lines.push(format!("  LS age: {}", rand_age(rng)));
            lines.push("  Options: (No TOS-capability, DC)".to_string());
            lines.push("  LS Type: Router Links".to_string());
            lines.push(format!("  Link State ID: {}", rid));
            lines.push(format!("  Advertising Router: {}", rid));
            lines.push(format!("  LS Seq Number: {}", rinfo.seq));
            lines.push(format!("  Checksum: {}", rinfo.checksum));
            lines.push(format!("  Length: {}", 24 + num_entries * 12));

            if rinfo.role.is_abr() {
                lines.push("  Area Border Router".to_string());
            }
            if rinfo.role.is_asbr() {
                lines.push("  AS Boundary Router".to_string());
            }

            lines.push(format!("   Number of Links: {}", num_entries));
            lines.push(String::new());

            for entry in &p2p_entries {
                lines.push("    Link connected to: another Router (point-to-point)".to_string());
                lines.push(format!("     (Link ID) Neighboring Router ID: {}", entry.neighbor));
                lines.push(format!("     (Link Data) Router Interface address: {}", entry.iface));
                lines.push("     Number of Metrics: 0".to_string());
                lines.push(format!("      TOS 0 Metrics: {}", entry.metric));
                lines.push(String::new());
                lines.push("    Link connected to: a Stub Network".to_string());
                lines.push(format!("     (Link ID) Network/subnet number: {}", entry.subnet));
                lines.push(format!("     (Link Data) Network Mask: {}", entry.mask));
                lines.push("     Number of Metrics: 0".to_string());
                lines.push(format!("      TOS 0 Metrics: {}", entry.metric));
                lines.push(String::new());
            }

            if let Some((dr, iface, metric)) = &transit_entry {
                lines.push("    Link connected to: a Transit Network".to_string());
                lines.push(format!("     (Link ID) Designated Router address: {}", dr));
                lines.push(format!("     (Link Data) Router Interface address: {}", iface));
                lines.push("     Number of Metrics: 0".to_string());
                lines.push(format!("      TOS 0 Metrics: {}", metric));
                lines.push(String::new());
            }

            for stub in &stub_entries {
                lines.push("    Link connected to: a Stub Network".to_string());
                lines.push(format!("     (Link ID) Network/subnet number: {}", stub.subnet));
                lines.push(format!("     (Link Data) Network Mask: {}", stub.mask));
                lines.push("     Number of Metrics: 0".to_string());
                lines.push(format!("      TOS 0 Metrics: {}", stub.metric));
                lines.push(String::new());
            }
        }
    }

    // Network LSA for the transit segment, only meaningful with 2+ members
    if state.transit_net.attached.len() >= 2 {
        lines.push(format!(
            "                Net Link States (Area {})",
            state.transit_net.area
        ));
        lines.push(String::new());
        lines.push(format!("  LS age: {}", rand_age(rng)));
        lines.push("  Options: (No TOS-capability, DC)".to_string());
        lines.push("  LS Type: Network Links".to_string());
        lines.push(format!("  Link State ID: {}", state.transit_net.dr));
        lines.push(format!("  Advertising Router: {}", state.transit_net.advertising));
        lines.push(format!("  LS Seq Number: {}", state.next_seq()));
        lines.push(format!("  Checksum: {}", rand_checksum(rng)));
        lines.push(format!("  Length: {}", 20 + state.transit_net.attached.len() * 4));
        lines.push(format!("  Network Mask: {}", state.transit_net.mask));
        for attached in &state.transit_net.attached {
            lines.push(format!("        Attached Router: {}", attached));
        }
        lines.push(String::new());
    }

    // Inter-area summaries advertised by the two ABRs
    lines.push("                Summary Net Link States (Area 0)".to_string());
    lines.push(String::new());

    let in_area = |state: &TopologyState, area: &str| {
        state
            .routers
            .values()
            .any(|r| r.areas.iter().any(|a| a == area))
    };

    if in_area(state, "1") {
        lines.push(format!("  LS age: {}", rand_age(rng)));
        lines.push("  Options: (No TOS-capability, DC)".to_string());
        lines.push("  LS Type: Summary Links(Network)".to_string());
        lines.push("  Link State ID: 10.1.0.0".to_string());
        lines.push("  Advertising Router: 1.1.1.1".to_string());
        lines.push(format!("  LS Seq Number: {}", state.next_seq()));
        lines.push(format!("  Checksum: {}", rand_checksum(rng)));
        lines.push("  Length: 28".to_string());
        lines.push("  Network Mask: /16".to_string());
        lines.push("        TOS: 0  Metric: 15".to_string());
        lines.push(String::new());
    }

    if in_area(state, "2") {
        lines.push(format!("  LS age: {}", rand_age(rng)));
        lines.push("  Options: (No TOS-capability, DC)".to_string());
        lines.push("  LS Type: Summary Links(Network)".to_string());
        lines.push("  Link State ID: 10.2.0.0".to_string());
        lines.push("  Advertising Router: 3.3.3.3".to_string());
        lines.push(format!("  LS Seq Number: {}", state.next_seq()));
        lines.push(format!("  Checksum: {}", rand_checksum(rng)));
        lines.push("  Length: 28".to_string());
        lines.push("  Network Mask: /16".to_string());
        lines.push("        TOS: 0  Metric: 25".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}
