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

//! Random topologies with requirements that are satisfiable by construction.

use crate::config::EdgeCost;
use crate::synthesizer::PathRequirement;
use crate::topology::{Cost, NetworkGraph, NodeData, RoutingGraph, VertexType};

use log::*;
use rand::prelude::*;

/// Maximum number of (undirected) links of a random network. Every link gets a distinct power of
/// two as its weight, which must fit into a [`Cost`], and the sum of all weights as well.
const MAX_LINKS: usize = 24;

/// # Random Network
///
/// Random connected network of routers `R0`, `R1`, ..., generated from a seed. The routers are
/// first connected by a random spanning tree, after which random links are added (up to
/// 24 in total). Network `N0` is attached to `R0`.
///
/// Every undirected link gets a distinct power of two as its weight. Since no two distinct sets
/// of links have the same total weight, every shortest path is unique. The requirements are the
/// shortest paths between random pairs of routers, and the first link has its weight as a fixed
/// cost. Hence, the problem is always satisfiable, and [`RandomNet::weights`] is one solution.
#[derive(Debug, Clone)]
pub struct RandomNet {
    net: NetworkGraph,
    weights: Vec<EdgeCost>,
    requirements: Vec<PathRequirement>,
}

impl RandomNet {
    /// Generate a random network with `num_routers` routers (at least 2) and `num_requirements`
    /// path requirements.
    pub fn generate(num_routers: usize, num_requirements: usize, seed: u64) -> Self {
        let num_routers = num_routers.max(2).min(MAX_LINKS + 1);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut net = NetworkGraph::new();
        let routers: Vec<_> = (0..num_routers).map(|i| net.add_router(format!("R{}", i))).collect();
        let network = net.add_network("N0");
        net.add_link(routers[0], network);

        // random spanning tree
        let mut links: Vec<(usize, usize)> = Vec::new();
        for i in 1..num_routers {
            links.push((rng.gen_range(0, i), i));
        }

        // additional links
        let num_extra = (num_routers / 2).min(MAX_LINKS - links.len());
        let mut attempts = 0;
        while links.len() < num_routers - 1 + num_extra && attempts < 100 {
            attempts += 1;
            let a = rng.gen_range(0, num_routers);
            let b = rng.gen_range(0, num_routers);
            if a == b || links.iter().any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a)) {
                continue;
            }
            links.push((a, b));
        }

        let mut weights = Vec::with_capacity(2 * links.len());
        let mut weighted = RoutingGraph::new();
        let ids: Vec<_> = (0..num_routers)
            .map(|r| weighted.add_node(NodeData::new(format!("R{}", r), Some(VertexType::Router))))
            .collect();
        for (i, &(a, b)) in links.iter().enumerate() {
            net.add_link(routers[a], routers[b]);
            let w: Cost = 1 << i;
            weighted.add_edge(ids[a], ids[b], w);
            weighted.add_edge(ids[b], ids[a], w);
            weights.push(EdgeCost::new(format!("R{}", a), format!("R{}", b), w));
            weights.push(EdgeCost::new(format!("R{}", b), format!("R{}", a), w));
        }

        let mut requirements = Vec::with_capacity(num_requirements);
        while requirements.len() < num_requirements {
            let src = format!("R{}", rng.gen_range(0, num_routers));
            let dst = format!("R{}", rng.gen_range(0, num_routers));
            if src == dst {
                continue;
            }
            // the network is connected, hence there always exists a path of at least one link
            if let Some((_, path)) = weighted.shortest_path(&src, &dst) {
                if let Ok(req) = PathRequirement::new(path) {
                    requirements.push(req);
                }
            }
        }

        debug!(
            "Generated random network with {} routers, {} links and {} requirements",
            num_routers,
            links.len(),
            requirements.len()
        );

        Self { net, weights, requirements }
    }

    /// The generated network
    pub fn net(&self) -> &NetworkGraph {
        &self.net
    }

    /// The fixed cost of the first link (in both directions).
    pub fn fixed_costs(&self) -> Vec<EdgeCost> {
        self.weights.iter().take(2).cloned().collect()
    }

    /// The shortest paths between random pairs of routers.
    pub fn requirements(&self) -> Vec<PathRequirement> {
        self.requirements.clone()
    }

    /// The weights used to generate the requirements. They satisfy all requirements.
    pub fn weights(&self) -> &[EdgeCost] {
        &self.weights
    }
}
