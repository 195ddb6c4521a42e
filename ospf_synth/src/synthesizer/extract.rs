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

//! Solution extractor, reading the model of the solver back into costs and graphs.

use super::OspfSynthesizer;
use crate::config::EdgeCost;
use crate::solver::Model;
use crate::topology::{Cost, NodeData, RoutingGraph, TopologyError, VertexId};
use crate::Error;

use itertools::{iproduct, Itertools};
use log::*;
use std::collections::BTreeMap;
use std::convert::TryFrom;

impl OspfSynthesizer {
    /// Read the synthesized cost of every link. Only pairs of vertices for which the link exists
    /// are returned. Fails with [`Error::NoModel`] if the requirements are not solved.
    pub fn read_edge_costs(&self) -> Result<Vec<EdgeCost>, Error> {
        let model = self.model()?;
        let mut result = Vec::new();
        for (u, v) in self.existing_links(model) {
            result.push(EdgeCost::new(
                self.registry.get_name(u),
                self.registry.get_name(v),
                self.resolved_cost(model, u, v)?,
            ));
        }
        Ok(result)
    }

    /// Read the synthesized topology. The graph contains every router and destination network
    /// (with the data from the input network), and every existing link annotated with its
    /// synthesized cost and the attributes from the input network.
    pub fn read_topology_graph(&self) -> Result<RoutingGraph, Error> {
        let model = self.model()?;
        let mut g = RoutingGraph::new();
        for v in self.registry.vertices() {
            g.add_node(self.node_data(v));
        }
        for (u, v) in self.existing_links(model) {
            let cost = self.resolved_cost(model, u, v)?;
            let src = self.registry.get_name(u);
            let dst = self.registry.get_name(v);
            let s = g.node_id(src)?;
            let t = g.node_id(dst)?;
            g.add_edge(s, t, cost);
            if let Some(attributes) = self.topology.link_attributes(src, dst) {
                g.set_link_attributes(s, t, attributes.clone());
            }
        }
        Ok(g)
    }

    /// Read one routing tree per destination network. The tree of a destination contains the
    /// shortest path towards it from every vertex that can reach it in the synthesized topology.
    /// Vertices without a path to the destination are omitted.
    pub fn read_routing_trees(&self) -> Result<BTreeMap<String, RoutingGraph>, Error> {
        let phy = self.read_topology_graph()?;
        let mut trees = BTreeMap::new();

        for dst in self.registry.networks() {
            let dst_name = self.registry.get_name(dst);
            let mut tree = RoutingGraph::for_destination(dst_name);

            for src in self.registry.vertices().filter(|v| *v != dst) {
                let src_name = self.registry.get_name(src);
                let path = match phy.shortest_path(src_name, dst_name) {
                    Some((_, path)) => path,
                    None => {
                        trace!("{} cannot reach {}", src_name, dst_name);
                        continue;
                    }
                };
                for (a, b) in path.iter().tuple_windows() {
                    let cost = phy
                        .cost(a, b)
                        .ok_or_else(|| TopologyError::LinkNotFound(a.clone(), b.clone()))?;
                    let a_id = tree.add_node(self.node_data(self.registry.get_vertex(a)?));
                    let b_id = tree.add_node(self.node_data(self.registry.get_vertex(b)?));
                    tree.add_edge(a_id, b_id, cost);
                    if let Some(attributes) = phy.link_attributes(a, b) {
                        tree.set_link_attributes(a_id, b_id, attributes.clone());
                    }
                }
            }

            debug!("Routing tree towards {} has {} nodes", dst_name, tree.node_count());
            trees.insert(dst_name.to_string(), tree);
        }

        Ok(trees)
    }

    /// All pairs of vertices for which the link exists in the model.
    fn existing_links<'a>(
        &'a self,
        model: &'a Model,
    ) -> impl Iterator<Item = (VertexId, VertexId)> + 'a {
        iproduct!(self.registry.vertices(), self.registry.vertices()).filter(move |(u, v)| {
            self.functions
                .exists
                .get(*u, *v)
                .and_then(|e| model.eval_bool(e))
                .unwrap_or(false)
        })
    }

    /// Cost of the link from `u` to `v` in the model. Fails with [`Error::CostOutOfRange`] if the
    /// value cannot be represented as a [`Cost`].
    pub(super) fn resolved_cost(&self, model: &Model, u: VertexId, v: VertexId) -> Result<Cost, Error> {
        let value = self
            .functions
            .cost
            .get(u, v)
            .and_then(|c| model.eval_int(c))
            .ok_or(Error::NoModel)?;
        Cost::try_from(value).map_err(|_| Error::CostOutOfRange(value))
    }

    /// Original data of a vertex, as stored in the topology.
    fn node_data(&self, v: VertexId) -> NodeData {
        let name = self.registry.get_name(v);
        self.topology
            .node(name)
            .cloned()
            .unwrap_or_else(|| NodeData::new(name, Some(self.registry.vertex_type(v))))
    }
}
