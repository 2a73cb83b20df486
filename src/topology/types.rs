//! Topology type definitions.
//!
//! This file contains the data types that make up the fake OSPF network
//! model: routers and their roles, point-to-point links, the shared transit
//! segment, leaf stub networks, and the catalog entries for routers that can
//! be added at runtime.

use std::fmt;

/// Role a router advertises in its LSA header.
///
/// Roles are metadata carried for rendering only - nothing in this crate
/// computes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterRole {
    /// Plain intra-area router
    Internal,
    /// Area Border Router
    Abr,
    /// AS Boundary Router
    Asbr,
    /// Both ABR and ASBR
    AbrAsbr,
}

impl RouterRole {
    /// Returns true if the router advertises the Area Border Router line
    pub fn is_abr(&self) -> bool {
        matches!(self, Self::Abr | Self::AbrAsbr)
    }

    /// Returns true if the router advertises the AS Boundary Router line
    pub fn is_asbr(&self) -> bool {
        matches!(self, Self::Asbr | Self::AbrAsbr)
    }
}

impl fmt::Display for RouterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::Abr => write!(f, "ABR"),
            Self::Asbr => write!(f, "ASBR"),
            Self::AbrAsbr => write!(f, "ABR+ASBR"),
        }
    }
}

/// A router in the topology, keyed externally by its dotted-quad router ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    pub role: RouterRole,
    /// Area IDs this router belongs to ("0", "1", "2", ...)
    pub areas: Vec<String>,
    /// LS sequence number as rendered, e.g. "80000005"
    pub seq: String,
    /// LSA checksum as rendered, e.g. "0x3A9C"
    pub checksum: String,
}

/// OSPF link type carried on a link record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    /// Only point-to-point links are generated
    PointToPoint,
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointToPoint => write!(f, "point-to-point"),
        }
    }
}

/// An unordered pair of routers joined by a point-to-point link.
///
/// The interface addresses are per-endpoint: `iface_a` belongs to router
/// `a`, `iface_b` to router `b`. The subnet/mask describe the link network
/// itself and feed the stub entry each p2p link contributes when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub a: String,
    pub b: String,
    pub iface_a: String,
    pub iface_b: String,
    pub subnet: String,
    pub mask: String,
    pub metric: u32,
    /// Area that owns this link
    pub area: String,
    pub link_type: LinkType,
}

impl Link {
    /// Returns true if either endpoint is the given router
    pub fn touches(&self, router_id: &str) -> bool {
        self.a == router_id || self.b == router_id
    }

    /// Returns true if this link joins the same router pair, in either order
    pub fn same_pair(&self, a: &str, b: &str) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }

    /// Given one endpoint, returns the neighbor ID and the local interface
    /// address, or `None` if the router is not on this link
    pub fn endpoint_view(&self, router_id: &str) -> Option<(&str, &str)> {
        if self.a == router_id {
            Some((&self.b, &self.iface_a))
        } else if self.b == router_id {
            Some((&self.a, &self.iface_b))
        } else {
            None
        }
    }
}

/// A leaf subnet attached to exactly one router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubNetwork {
    pub subnet: String,
    pub mask: String,
    pub metric: u32,
}

impl StubNetwork {
    pub fn new(subnet: &str, mask: &str, metric: u32) -> Self {
        Self {
            subnet: subnet.to_string(),
            mask: mask.to_string(),
            metric,
        }
    }
}

/// The shared transit segment (one per demo, in area 0).
///
/// Routers join and leave the attached set as they are added, removed, and
/// restored; the designated router and advertising router are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitNetwork {
    /// Designated router interface address
    pub dr: String,
    /// Router ID that advertises the network LSA
    pub advertising: String,
    /// Network mask as rendered, e.g. "/24"
    pub mask: String,
    /// Area that owns the segment
    pub area: String,
    /// Router IDs currently attached, kept sorted for rendering
    pub attached: std::collections::BTreeSet<String>,
    /// Interface address each member uses on the segment
    pub member_ifaces: std::collections::BTreeMap<String, String>,
    pub metric: u32,
}

/// Catalog entry for a router that can be added at runtime.
///
/// Fully specifies how the router attaches if chosen: which existing router
/// it peers with, both interface addresses, the link subnet, and the stub
/// networks it brings along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraRouter {
    pub role: RouterRole,
    pub area: String,
    /// Existing router this one links to when added
    pub connect_to: String,
    pub iface_self: String,
    pub iface_peer: String,
    pub subnet: String,
    pub mask: String,
    pub metric: u32,
    pub stubs: Vec<StubNetwork>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_flags() {
        assert!(RouterRole::Abr.is_abr());
        assert!(!RouterRole::Abr.is_asbr());
        assert!(RouterRole::AbrAsbr.is_abr());
        assert!(RouterRole::AbrAsbr.is_asbr());
        assert!(!RouterRole::Internal.is_abr());
        assert!(!RouterRole::Internal.is_asbr());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(RouterRole::Internal.to_string(), "internal");
        assert_eq!(RouterRole::AbrAsbr.to_string(), "ABR+ASBR");
    }

    #[test]
    fn test_link_endpoint_view() {
        let link = Link {
            a: "1.1.1.1".to_string(),
            b: "2.2.2.2".to_string(),
            iface_a: "10.0.12.1".to_string(),
            iface_b: "10.0.12.2".to_string(),
            subnet: "10.0.12.0".to_string(),
            mask: "255.255.255.252".to_string(),
            metric: 10,
            area: "0".to_string(),
            link_type: LinkType::PointToPoint,
        };

        assert_eq!(link.endpoint_view("1.1.1.1"), Some(("2.2.2.2", "10.0.12.1")));
        assert_eq!(link.endpoint_view("2.2.2.2"), Some(("1.1.1.1", "10.0.12.2")));
        assert_eq!(link.endpoint_view("9.9.9.9"), None);

        assert!(link.same_pair("2.2.2.2", "1.1.1.1"));
        assert!(!link.same_pair("1.1.1.1", "3.3.3.3"));
        assert!(link.touches("2.2.2.2"));
        assert!(!link.touches("3.3.3.3"));
    }
}
