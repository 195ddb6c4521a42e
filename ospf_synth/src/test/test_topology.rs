// OSPF-Synth: Synthesizing OSPF Link Weights for Path Requirements
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Test the topology model, the vertex registry and the path enumeration.

use crate::topology::*;
use lazy_static::lazy_static;
use maplit::btreemap;
use std::time::{Duration, Instant};

lazy_static! {
    static ref A: NodeId = 0.into();
    static ref B: NodeId = 1.into();
    static ref C: NodeId = 2.into();
    static ref D: NodeId = 3.into();
    static ref N: NodeId = 4.into();
    static ref P: NodeId = 5.into();
}

/// # Test network
///
/// ```text
///      C
///     / \
///    A   B ---- N
///     \ / \
///      D   P
/// ```
fn get_test_net() -> NetworkGraph {
    let mut net = NetworkGraph::new();

    assert_eq!(*A, net.add_router("A"));
    assert_eq!(*B, net.add_router("B"));
    assert_eq!(*C, net.add_router("C"));
    assert_eq!(*D, net.add_router("D"));
    assert_eq!(*N, net.add_network("N"));
    assert_eq!(*P, net.add_peer("P"));

    net.add_link(*A, *C);
    net.add_link(*C, *B);
    net.add_link(*A, *D);
    net.add_link(*D, *B);
    net.add_link(*B, *N);
    net.add_link(*B, *P);

    net
}

fn path(p: &[&str]) -> Path {
    p.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_add_node_twice() {
    let mut net = get_test_net();
    assert_eq!(net.add_router("A"), *A);
    assert_eq!(net.node_count(), 6);
    assert_eq!(net.node_id("B"), Ok(*B));
    assert_eq!(net.node_id("X"), Err(TopologyError::NodeNotFound("X".to_string())));
}

#[test]
fn test_load_filters_routers() {
    let net = get_test_net();
    let topo = TopologyGraph::load(&net).unwrap();

    assert_eq!(topo.graph().node_count(), 4);
    assert_eq!(topo.graph().edge_count(), 8);
    for (s, t, _) in topo.graph().edges() {
        assert!(topo.is_router(s));
        assert!(topo.is_router(t));
    }

    assert!(!topo.is_router("N"));
    assert!(!topo.is_router("P"));
    assert_eq!(topo.destinations().len(), 1);
    assert_eq!(topo.destinations()[0].name, "N");
    assert_eq!(
        topo.attachments(),
        &[Attachment {
            router: "B".to_string(),
            network: "N".to_string(),
            cost: None,
            attributes: Attributes::new()
        }]
    );
    assert!(topo.attachment("N", "B").is_none());
}

#[test]
fn test_load_missing_type() {
    let mut net = get_test_net();
    let x = net.add_node(NodeData::new("X", None));
    net.add_link(*A, x);
    assert_eq!(
        TopologyGraph::load(&net).unwrap_err(),
        TopologyError::MissingVertexType("X".to_string())
    );
}

#[test]
fn test_load_keeps_costs_and_attributes() {
    let mut net = get_test_net();
    net.set_link_cost(*A, *C, 7).unwrap();
    net.set_link_cost(*B, *N, 3).unwrap();
    let mut data = NodeData::new("E", Some(VertexType::Router));
    data.attributes = btreemap! {"location".to_string() => "Zurich".to_string()};
    net.add_node(data.clone());

    let topo = TopologyGraph::load(&net).unwrap();
    assert_eq!(topo.fixed_cost("A", "C"), Some(7));
    assert_eq!(topo.fixed_cost("C", "A"), None);
    assert_eq!(topo.attachment("B", "N").unwrap().cost, Some(3));
    assert_eq!(topo.node("E"), Some(&data));
}

#[test]
fn test_load_keeps_link_attributes() {
    let mut net = get_test_net();
    net.set_link_attributes(*A, *C, btreemap! {"medium".to_string() => "fiber".to_string()});
    net.set_link_attributes(*B, *N, btreemap! {"vlan".to_string() => "10".to_string()});

    let topo = TopologyGraph::load(&net).unwrap();
    assert_eq!(topo.link_attributes("A", "C").unwrap()["medium"], "fiber");
    assert_eq!(topo.link_attributes("C", "A"), None);
    assert_eq!(topo.link_attributes("B", "N").unwrap()["vlan"], "10");
    assert_eq!(topo.link_attributes("A", "D"), None);

    // attributes are part of the graph equality
    assert_ne!(net, get_test_net());
}

#[test]
fn test_set_cost() {
    let net = get_test_net();
    let mut topo = TopologyGraph::load(&net).unwrap();

    topo.set_cost("A", "C", 0).unwrap();
    assert_eq!(topo.fixed_cost("A", "C"), Some(0));
    topo.set_cost("B", "N", 4).unwrap();
    assert_eq!(topo.attachment("B", "N").unwrap().cost, Some(4));

    assert_eq!(
        topo.set_cost("A", "B", 1),
        Err(TopologyError::LinkNotFound("A".to_string(), "B".to_string()))
    );
    assert_eq!(topo.set_cost("A", "X", 1), Err(TopologyError::NodeNotFound("X".to_string())));
}

#[test]
fn test_registry() {
    let net = get_test_net();
    let topo = TopologyGraph::load(&net).unwrap();
    let mut registry = VertexRegistry::from_topology(&topo);

    assert_eq!(registry.len(), 5);
    assert_eq!(registry.routers().count(), 4);
    assert_eq!(registry.networks().map(|v| registry.get_name(v)).collect::<Vec<_>>(), vec!["N"]);

    let a = registry.get_vertex("A").unwrap();
    assert_eq!(registry.get_name(a), "A");
    assert_eq!(registry.get_or_create("A", VertexType::Network), a);
    assert_eq!(registry.vertex_type(a), VertexType::Router);
    assert!(registry.get_vertex("P").is_err());

    let x = registry.get_or_create("X", VertexType::Router);
    assert_eq!(x.index(), 5);
    assert_eq!(registry.len(), 6);
}

#[test]
fn test_routing_graph_shortest_path() {
    let mut g = RoutingGraph::new();
    let a = g.add_node(NodeData::new("A", Some(VertexType::Router)));
    let b = g.add_node(NodeData::new("B", Some(VertexType::Router)));
    let c = g.add_node(NodeData::new("C", Some(VertexType::Router)));
    g.add_edge(a, b, 1);
    g.add_edge(b, c, 1);
    g.add_edge(a, c, 3);

    assert_eq!(g.shortest_path("A", "C"), Some((2, path(&["A", "B", "C"]))));
    assert_eq!(g.shortest_path("C", "A"), None);
    assert_eq!(g.path_cost(&path(&["A", "C"])), Some(3));
    assert_eq!(g.path_cost(&path(&["C", "A"])), None);
    assert!(g.has_path("A", "C"));
    assert!(!g.has_path("C", "A"));
}

#[test]
fn test_graph_equality_ignores_order() {
    let mut g1 = RoutingGraph::new();
    let a = g1.add_node(NodeData::new("A", Some(VertexType::Router)));
    let b = g1.add_node(NodeData::new("B", Some(VertexType::Router)));
    g1.add_edge(a, b, 1);

    let mut g2 = RoutingGraph::new();
    let b = g2.add_node(NodeData::new("B", Some(VertexType::Router)));
    let a = g2.add_node(NodeData::new("A", Some(VertexType::Router)));
    g2.add_edge(a, b, 1);
    assert_eq!(g1, g2);

    g2.add_edge(b, a, 1);
    assert_ne!(g1, g2);
}

#[test]
fn test_enumerate_exhaustive() {
    let net = get_test_net();
    let topo = TopologyGraph::load(&net).unwrap();
    let mut alternatives = PathEnumerator::new(topo.graph(), PathEnumeration::Exhaustive)
        .alternatives(&path(&["A", "C", "B"]))
        .unwrap();
    alternatives.sort();
    assert_eq!(alternatives, vec![path(&["A", "D", "B"])]);

    // a required path that is not a path of the graph excludes nothing
    let alternatives = PathEnumerator::new(topo.graph(), PathEnumeration::Exhaustive)
        .alternatives(&path(&["A", "B"]))
        .unwrap();
    assert_eq!(alternatives.len(), 2);
}

#[test]
fn test_enumerate_unknown_node() {
    let net = get_test_net();
    let topo = TopologyGraph::load(&net).unwrap();
    assert_eq!(
        PathEnumerator::new(topo.graph(), PathEnumeration::Exhaustive)
            .alternatives(&path(&["A", "N"])),
        Err(TopologyError::NodeNotFound("N".to_string()))
    );
}

#[test]
fn test_enumerate_deadline() {
    let net = get_test_net();
    let topo = TopologyGraph::load(&net).unwrap();
    let deadline = Instant::now().checked_sub(Duration::from_secs(1));
    assert!(deadline.is_some());
    assert_eq!(
        PathEnumerator::new(topo.graph(), PathEnumeration::Exhaustive)
            .with_deadline(deadline)
            .alternatives(&path(&["A", "C", "B"])),
        Err(TopologyError::EnumerationTimeout)
    );

    // a generous time limit does not interfere
    assert!(PathEnumerator::new(topo.graph(), PathEnumeration::Exhaustive)
        .with_time_limit(Some(Duration::from_secs(60)))
        .alternatives(&path(&["A", "C", "B"]))
        .is_ok());
}

#[test]
fn test_enumerate_deadline_in_dead_end() {
    // S reaches T directly, and also enters a clique that never leads to T
    let mut net = NetworkGraph::new();
    let s = net.add_router("S");
    let t = net.add_router("T");
    net.add_link(s, t);
    let clique: Vec<NodeId> = (0..11).map(|i| net.add_router(format!("K{}", i))).collect();
    net.add_link(s, clique[0]);
    for (i, a) in clique.iter().enumerate() {
        for b in clique.iter().skip(i + 1) {
            net.add_link(*a, *b);
        }
    }

    let limit = Duration::from_millis(50);
    let start = Instant::now();
    let result = PathEnumerator::new(&net, PathEnumeration::Exhaustive)
        .with_time_limit(Some(limit))
        .alternatives(&path(&["S", "T"]));
    let elapsed = start.elapsed();

    assert_eq!(result, Err(TopologyError::EnumerationTimeout));
    assert!(elapsed < Duration::from_secs(1), "enumeration stopped after {:?}", elapsed);
}
