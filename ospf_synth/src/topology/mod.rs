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

#![deny(missing_docs, missing_debug_implementations)]

//! # Topology Model
//!
//! This module contains the graph structures the synthesizer reasons over:
//!
//! - [`NetworkGraph`]: The raw input network. Every node carries a [`NodeData`] with an optional
//!   [`VertexType`], and every link carries an optional fixed OSPF cost.
//! - [`TopologyGraph`]: The filtered view of the raw network containing only the routers and the
//!   router-to-router links. Links from routers towards destination networks are kept aside as
//!   [`Attachment`]s.
//! - [`RoutingGraph`]: Graph with resolved costs, used for all outputs of the synthesis.
//!
//! ## Example usage
//!
//! ```rust
//! use ospf_synth::topology::{NetworkGraph, TopologyGraph};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut net = NetworkGraph::new();
//!
//!     let a = net.add_router("A");
//!     let b = net.add_router("B");
//!     let n = net.add_network("N");
//!
//!     net.add_link(a, b);
//!     net.add_link(b, n);
//!
//!     let topo = TopologyGraph::load(&net)?;
//!     assert_eq!(topo.graph().node_count(), 2);
//!     assert_eq!(topo.attachments().len(), 1);
//!
//!     Ok(())
//! }
//! ```

mod paths;
mod registry;

pub use paths::{PathEnumeration, PathEnumerator};
pub use registry::{VertexId, VertexRegistry};

use log::*;
use petgraph::algo::{astar, has_path_connecting};
use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::IntoEdgeReferences;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

type IndexType = u32;
/// Index of a node inside a [`NamedGraph`]
pub type NodeId = NodeIndex<IndexType>;
/// OSPF link cost
pub type Cost = u32;
/// Path through the network, represented by the names of the nodes along the path.
pub type Path = Vec<String>;

/// Type of a network element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexType {
    /// Router running OSPF, which forwards traffic
    Router,
    /// Destination network (address block), which only sinks traffic
    Network,
    /// External peer, ignored by the synthesis
    Peer,
}

/// Additional attributes of a node or a link, copied verbatim to all output graphs
pub type Attributes = BTreeMap<String, String>;

/// Data stored for each node of a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Unique name of the node
    pub name: String,
    /// Type of the node. `None` marks malformed input.
    pub vertex_type: Option<VertexType>,
    /// Additional attributes, which are copied verbatim to all output graphs
    pub attributes: Attributes,
}

impl NodeData {
    /// Create new node data without any additional attributes.
    pub fn new<S: Into<String>>(name: S, vertex_type: Option<VertexType>) -> Self {
        Self { name: name.into(), vertex_type, attributes: Attributes::new() }
    }

    /// Returns true if the node is a router
    pub fn is_router(&self) -> bool {
        self.vertex_type == Some(VertexType::Router)
    }

    /// Returns true if the node is a destination network
    pub fn is_network(&self) -> bool {
        self.vertex_type == Some(VertexType::Network)
    }
}

/// Data stored for each link of the input network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkData {
    /// Fixed OSPF cost of the link. If `None`, the synthesizer is free to choose the cost.
    pub cost: Option<Cost>,
}

/// Topology Errors
#[derive(Error, Debug, PartialEq)]
pub enum TopologyError {
    /// A node has no type annotation
    #[error("Node {0} has no vertex type!")]
    MissingVertexType(String),
    /// Node name is not present in the topology
    #[error("Node was not found in the topology: {0}")]
    NodeNotFound(String),
    /// Two nodes are not adjacent
    #[error("Link does not exist: {0} -> {1}")]
    LinkNotFound(String, String),
    /// Enumerating the simple paths took longer than allowed
    #[error("Path enumeration exceeded its time limit")]
    EnumerationTimeout,
}

/// # Named Graph
///
/// Directed graph whose nodes are identified by their unique name. Adding a node with a name that
/// is already present returns the existing node. The graph is generic over the edge weight, which
/// is [`LinkData`] for the input network ([`NetworkGraph`]) and the resolved [`Cost`] for all
/// outputs ([`RoutingGraph`]). Links may carry additional [`Attributes`], independent of the
/// weight.
#[derive(Debug, Clone)]
pub struct NamedGraph<E> {
    graph: StableGraph<NodeData, E, Directed, IndexType>,
    lookup: HashMap<String, NodeId>,
    link_attributes: HashMap<(NodeId, NodeId), Attributes>,
    destination: Option<String>,
}

/// Raw input network
pub type NetworkGraph = NamedGraph<LinkData>;
/// Graph with resolved link costs
pub type RoutingGraph = NamedGraph<Cost>;

impl<E> Default for NamedGraph<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> NamedGraph<E> {
    /// Generate an empty graph
    pub fn new() -> Self {
        Self {
            graph: StableGraph::default(),
            lookup: HashMap::new(),
            link_attributes: HashMap::new(),
            destination: None,
        }
    }

    /// Generate an empty routing tree towards the destination `dst`.
    pub fn for_destination<S: Into<String>>(dst: S) -> Self {
        Self { destination: Some(dst.into()), ..Self::new() }
    }

    /// Name of the destination, if the graph is a routing tree.
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Add a node to the graph. If a node with the same name already exists, its index is
    /// returned and the graph remains unchanged.
    pub fn add_node(&mut self, data: NodeData) -> NodeId {
        if let Some(id) = self.lookup.get(&data.name) {
            return *id;
        }
        let name = data.name.clone();
        let id = self.graph.add_node(data);
        self.lookup.insert(name, id);
        id
    }

    /// Add a directed edge, or replace the weight of an existing one.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: E) {
        self.graph.update_edge(source, target, weight);
    }

    /// Get the index of a node by its name.
    pub fn node_id(&self, name: &str) -> Result<NodeId, TopologyError> {
        self.lookup.get(name).copied().ok_or_else(|| TopologyError::NodeNotFound(name.to_string()))
    }

    /// Returns true if the graph contains a node with the given name.
    pub fn contains_node(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Get the data of a node by its name.
    pub fn node(&self, name: &str) -> Option<&NodeData> {
        self.lookup.get(name).and_then(|id| self.graph.node_weight(*id))
    }

    /// Get the name of a node by its index.
    pub fn node_name(&self, id: NodeId) -> Result<&str, TopologyError> {
        self.graph
            .node_weight(id)
            .map(|n| n.name.as_str())
            .ok_or_else(|| TopologyError::NodeNotFound(format!("{:?}", id)))
    }

    /// Iterate over all nodes, in the order in which they were added.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_indices().filter_map(move |id| self.graph.node_weight(id))
    }

    /// Iterate over all edges as `(source, target, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &E)> {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()].name.as_str(),
                self.graph[e.target()].name.as_str(),
                e.weight(),
            )
        })
    }

    /// Set the attributes of the edge from `source` to `target`. Empty attributes are removed.
    pub fn set_link_attributes(&mut self, source: NodeId, target: NodeId, attributes: Attributes) {
        if attributes.is_empty() {
            self.link_attributes.remove(&(source, target));
        } else {
            self.link_attributes.insert((source, target), attributes);
        }
    }

    /// Get the attributes of the edge from `source` to `target`, if it has any.
    pub fn link_attributes(&self, source: &str, target: &str) -> Option<&Attributes> {
        let s = self.lookup.get(source)?;
        let t = self.lookup.get(target)?;
        self.link_attributes.get(&(*s, *t))
    }

    /// Get the weight of the edge from `source` to `target`.
    pub fn edge(&self, source: &str, target: &str) -> Option<&E> {
        let s = self.lookup.get(source)?;
        let t = self.lookup.get(target)?;
        self.graph.find_edge(*s, *t).and_then(|e| self.graph.edge_weight(e))
    }

    /// Returns true if there exists a directed edge from `source` to `target`.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edge(source, target).is_some()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if there exists a directed path from `source` to `target`. Unknown nodes have
    /// no path.
    pub fn has_path(&self, source: &str, target: &str) -> bool {
        match (self.lookup.get(source), self.lookup.get(target)) {
            (Some(s), Some(t)) => has_path_connecting(&self.graph, *s, *t, None),
            _ => false,
        }
    }

    pub(crate) fn inner(&self) -> &StableGraph<NodeData, E, Directed, IndexType> {
        &self.graph
    }
}

impl<E: PartialEq> PartialEq for NamedGraph<E> {
    /// Two graphs are equal if they have the same nodes (with the same data) and the same edges,
    /// regardless of the order in which they were added.
    fn eq(&self, other: &Self) -> bool {
        if self.destination != other.destination
            || self.node_count() != other.node_count()
            || self.edge_count() != other.edge_count()
        {
            return false;
        }
        self.nodes().all(|n| other.node(&n.name) == Some(n))
            && self.edges().all(|(s, t, w)| {
                other.edge(s, t) == Some(w)
                    && other.link_attributes(s, t) == self.link_attributes(s, t)
            })
    }
}

impl NetworkGraph {
    /// Add a new router to the network. This function returns the ID of the node, which can be
    /// used to reference it while adding links.
    pub fn add_router<S: Into<String>>(&mut self, name: S) -> NodeId {
        self.add_node(NodeData::new(name, Some(VertexType::Router)))
    }

    /// Add a new destination network.
    pub fn add_network<S: Into<String>>(&mut self, name: S) -> NodeId {
        self.add_node(NodeData::new(name, Some(VertexType::Network)))
    }

    /// Add a new external peer. Peers are ignored by the synthesis.
    pub fn add_peer<S: Into<String>>(&mut self, name: S) -> NodeId {
        self.add_node(NodeData::new(name, Some(VertexType::Peer)))
    }

    /// Add a link in both directions. The link has no fixed cost.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        self.add_edge(a, b, LinkData::default());
        self.add_edge(b, a, LinkData::default());
    }

    /// Add a link in a single direction.
    pub fn add_directed_link(&mut self, source: NodeId, target: NodeId, data: LinkData) {
        self.add_edge(source, target, data);
    }

    /// Fix the cost of an existing link in the direction `source -> target`.
    pub fn set_link_cost(
        &mut self,
        source: NodeId,
        target: NodeId,
        cost: Cost,
    ) -> Result<(), TopologyError> {
        match self.graph.find_edge(source, target) {
            Some(e) => {
                self.graph[e].cost = Some(cost);
                Ok(())
            }
            None => Err(TopologyError::LinkNotFound(
                self.node_name(source)?.to_string(),
                self.node_name(target)?.to_string(),
            )),
        }
    }
}

impl RoutingGraph {
    /// Get the resolved cost of the link from `source` to `target`.
    pub fn cost(&self, source: &str, target: &str) -> Option<Cost> {
        self.edge(source, target).copied()
    }

    /// Sum of the costs along the path, or `None` if some link of the path does not exist.
    pub fn path_cost(&self, path: &[String]) -> Option<u64> {
        path.windows(2).map(|w| self.cost(&w[0], &w[1]).map(u64::from)).sum()
    }

    /// Compute the minimum-cost path from `source` to `target`. Returns `None` if there is no
    /// path.
    pub fn shortest_path(&self, source: &str, target: &str) -> Option<(u64, Path)> {
        let s = *self.lookup.get(source)?;
        let t = *self.lookup.get(target)?;
        let (cost, path) =
            astar(&self.graph, s, |n| n == t, |e| u64::from(*e.weight()), |_| 0)?;
        Some((cost, path.into_iter().map(|n| self.graph[n].name.clone()).collect()))
    }
}

/// Link from a router towards a destination network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Name of the router
    pub router: String,
    /// Name of the destination network
    pub network: String,
    /// Fixed cost of the attachment
    pub cost: Option<Cost>,
    /// Additional attributes of the link
    pub attributes: Attributes,
}

/// # Topology Graph
///
/// Filtered copy of the input network, containing only routers and the links between them. This
/// is the only graph the synthesizer reasons over. Destination networks and the links from
/// routers towards them are stored separately, such that they can be added again to the outputs.
#[derive(Debug, Clone)]
pub struct TopologyGraph {
    graph: NetworkGraph,
    attachments: Vec<Attachment>,
    destinations: Vec<NodeData>,
}

impl TopologyGraph {
    /// Load the topology from the raw input network. Only routers are kept, and only links
    /// between two routers. Links from routers to destination networks become attachments, while
    /// links leaving a destination network or touching a peer are dropped.
    ///
    /// This function fails if any node in the raw network has no type.
    pub fn load(raw: &NetworkGraph) -> Result<Self, TopologyError> {
        let mut graph = NetworkGraph::new();
        let mut destinations = Vec::new();

        for node in raw.nodes() {
            match node.vertex_type {
                None => return Err(TopologyError::MissingVertexType(node.name.clone())),
                Some(VertexType::Router) => {
                    graph.add_node(node.clone());
                }
                Some(VertexType::Network) => destinations.push(node.clone()),
                Some(VertexType::Peer) => trace!("Ignoring peer {}", node.name),
            }
        }

        let mut attachments = Vec::new();
        for (source, target, link) in raw.edges() {
            let (s, t) = match (raw.node(source), raw.node(target)) {
                (Some(s), Some(t)) => (s, t),
                _ => continue,
            };
            if s.is_router() && t.is_router() {
                let s_id = graph.node_id(source)?;
                let t_id = graph.node_id(target)?;
                graph.add_directed_link(s_id, t_id, *link);
                if let Some(attributes) = raw.link_attributes(source, target) {
                    graph.set_link_attributes(s_id, t_id, attributes.clone());
                }
            } else if s.is_router() && t.is_network() {
                attachments.push(Attachment {
                    router: source.to_string(),
                    network: target.to_string(),
                    cost: link.cost,
                    attributes: raw.link_attributes(source, target).cloned().unwrap_or_default(),
                });
            }
        }

        debug!(
            "Loaded topology with {} routers, {} links and {} destination networks",
            graph.node_count(),
            graph.edge_count(),
            destinations.len()
        );

        Ok(Self { graph, attachments, destinations })
    }

    /// Fix the cost of an existing link (or attachment) from `source` to `target`.
    pub fn set_cost(&mut self, source: &str, target: &str, cost: Cost) -> Result<(), TopologyError> {
        if let Some(a) =
            self.attachments.iter_mut().find(|a| a.router == source && a.network == target)
        {
            a.cost = Some(cost);
            return Ok(());
        }
        let s = self.graph.node_id(source)?;
        let t = self.graph.node_id(target)?;
        self.graph.set_link_cost(s, t, cost)
    }

    /// The filtered graph, containing only routers.
    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    /// All routers of the topology
    pub fn routers(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.nodes()
    }

    /// All destination networks of the input network
    pub fn destinations(&self) -> &[NodeData] {
        &self.destinations
    }

    /// All links from routers towards destination networks
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Get the attachment of `router` towards `network`.
    pub fn attachment(&self, router: &str, network: &str) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.router == router && a.network == network)
    }

    /// Returns true if the topology has a link from router `source` to router `target`.
    pub fn has_link(&self, source: &str, target: &str) -> bool {
        self.graph.has_edge(source, target)
    }

    /// Returns true if `name` is a router of the topology.
    pub fn is_router(&self, name: &str) -> bool {
        self.graph.contains_node(name)
    }

    /// Fixed cost of the link from `source` to `target`, if the link exists and has a fixed cost.
    pub fn fixed_cost(&self, source: &str, target: &str) -> Option<Cost> {
        self.graph.edge(source, target).and_then(|l| l.cost)
    }

    /// Attributes of the link (or attachment) from `source` to `target`, if it has any.
    pub fn link_attributes(&self, source: &str, target: &str) -> Option<&Attributes> {
        match self.attachment(source, target) {
            Some(a) if !a.attributes.is_empty() => Some(&a.attributes),
            Some(_) => None,
            None => self.graph.link_attributes(source, target),
        }
    }

    /// Get the original data of a router or destination network.
    pub fn node(&self, name: &str) -> Option<&NodeData> {
        self.graph.node(name).or_else(|| self.destinations.iter().find(|d| d.name == name))
    }
}
