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

//! JSON format of problems and results.

use ospf_synth::topology::{
    Attributes, LinkData, NetworkGraph, NodeData, RoutingGraph, VertexType,
};
use ospf_synth::{EdgeCost, PathRequirement, Synthesis};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use thiserror::Error;

/// Problem, as read from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    #[serde(default)]
    pub fixed_costs: Vec<Cost>,
    pub requirements: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<NodeKind>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Router,
    Network,
    Peer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub src: String,
    pub dst: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default = "default_bidirectional")]
    pub bidirectional: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

fn default_bidirectional() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub src: String,
    pub dst: String,
    pub cost: u32,
}

/// Result, as written to a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub edge_costs: Vec<Cost>,
    pub routing_trees: BTreeMap<String, Vec<Cost>>,
    pub push_time_ms: u64,
    pub refinements: usize,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Link refers to an unknown node: {0}")]
    UnknownNode(String),
    #[error("Node is defined twice: {0}")]
    DuplicateNode(String),
}

impl From<NodeKind> for VertexType {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Router => VertexType::Router,
            NodeKind::Network => VertexType::Network,
            NodeKind::Peer => VertexType::Peer,
        }
    }
}

impl From<VertexType> for NodeKind {
    fn from(t: VertexType) -> Self {
        match t {
            VertexType::Router => NodeKind::Router,
            VertexType::Network => NodeKind::Network,
            VertexType::Peer => NodeKind::Peer,
        }
    }
}

impl From<&EdgeCost> for Cost {
    fn from(c: &EdgeCost) -> Self {
        Self { src: c.src.clone(), dst: c.dst.clone(), cost: c.cost }
    }
}

impl From<&Cost> for EdgeCost {
    fn from(c: &Cost) -> Self {
        EdgeCost::new(c.src.clone(), c.dst.clone(), c.cost)
    }
}

impl Problem {
    /// Read the problem from a JSON file
    pub fn read(filename: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(serde_json::from_str(&fs::read_to_string(filename)?)?)
    }

    /// Write the problem to a JSON file
    pub fn write(&self, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(filename, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Build the problem from a network, its fixed costs and the requirements.
    pub fn from_parts(
        net: &NetworkGraph,
        fixed_costs: &[EdgeCost],
        requirements: &[PathRequirement],
    ) -> Self {
        Self {
            nodes: net
                .nodes()
                .map(|n| Node {
                    name: n.name.clone(),
                    kind: n.vertex_type.map(NodeKind::from),
                    attributes: n.attributes.clone(),
                })
                .collect(),
            links: net
                .edges()
                .map(|(s, t, l)| Link {
                    src: s.to_string(),
                    dst: t.to_string(),
                    cost: l.cost,
                    bidirectional: false,
                    attributes: net.link_attributes(s, t).cloned().unwrap_or_default(),
                })
                .collect(),
            fixed_costs: fixed_costs.iter().map(Cost::from).collect(),
            requirements: requirements.iter().map(|r| r.path().to_vec()).collect(),
        }
    }

    /// Build the network graph of the problem
    pub fn network(&self) -> Result<NetworkGraph, InputError> {
        let mut net = NetworkGraph::new();
        for node in self.nodes.iter() {
            if net.contains_node(&node.name) {
                return Err(InputError::DuplicateNode(node.name.clone()));
            }
            let mut data = NodeData::new(node.name.clone(), node.kind.map(VertexType::from));
            data.attributes = node.attributes.clone();
            net.add_node(data);
        }
        for link in self.links.iter() {
            let s = net.node_id(&link.src).map_err(|_| InputError::UnknownNode(link.src.clone()))?;
            let t = net.node_id(&link.dst).map_err(|_| InputError::UnknownNode(link.dst.clone()))?;
            net.add_directed_link(s, t, LinkData { cost: link.cost });
            net.set_link_attributes(s, t, link.attributes.clone());
            if link.bidirectional {
                net.add_directed_link(t, s, LinkData { cost: link.cost });
                net.set_link_attributes(t, s, link.attributes.clone());
            }
        }
        Ok(net)
    }

    /// All fixed costs of the problem
    pub fn fixed_costs(&self) -> Vec<EdgeCost> {
        self.fixed_costs.iter().map(EdgeCost::from).collect()
    }

    /// All path requirements of the problem
    pub fn requirements(&self) -> Result<Vec<PathRequirement>, ospf_synth::Error> {
        self.requirements.iter().map(|r| PathRequirement::new(r.iter().cloned())).collect()
    }
}

impl SynthesisResult {
    /// Write the result to a JSON file
    pub fn write(&self, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(filename, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

fn tree_costs(tree: &RoutingGraph) -> Vec<Cost> {
    let mut costs: Vec<Cost> = tree
        .edges()
        .map(|(s, t, c)| Cost { src: s.to_string(), dst: t.to_string(), cost: *c })
        .collect();
    costs.sort_by(|a, b| (&a.src, &a.dst).cmp(&(&b.src, &b.dst)));
    costs
}

impl From<&Synthesis> for SynthesisResult {
    fn from(s: &Synthesis) -> Self {
        Self {
            edge_costs: s.edge_costs.iter().map(Cost::from).collect(),
            routing_trees: s
                .routing_trees
                .iter()
                .map(|(dst, tree)| (dst.clone(), tree_costs(tree)))
                .collect(),
            push_time_ms: s.push_time.as_millis() as u64,
            refinements: s.refinements,
        }
    }
}
