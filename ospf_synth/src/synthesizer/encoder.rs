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

//! Symbolic topology encoder, asserting the baseline constraints.

use crate::config::{SynthesisConfig, MAX_COST};
use crate::solver::{BoolVar, Constraint, IntVar, LinExpr, PairFunction, SolverSession};
use crate::topology::{Cost, TopologyGraph, VertexRegistry};

use itertools::iproduct;
use log::*;

/// Name of the edge-existence function
pub(super) const EDGE_EXISTS: &str = "EdgePhyOSPF";
/// Name of the edge-cost function
pub(super) const EDGE_COST: &str = "OSPFEdgeCost";

/// The two symbolic functions over pairs of vertices
#[derive(Debug, Clone)]
pub(super) struct EdgeFunctions {
    /// True if and only if there exists a link between the two vertices
    pub(super) exists: PairFunction<BoolVar>,
    /// OSPF cost of the link between the two vertices
    pub(super) cost: PairFunction<IntVar>,
}

/// Encode the topology into the baseline of the session. For every ordered pair of routers, the
/// existence of the link is fixed to the topology. Every existing link gets either its fixed cost,
/// or a free cost within the configured range (at most [`MAX_COST`]). Links from routers to
/// destination networks are fixed to their annotated cost (or zero). No link ever leaves a
/// destination network.
pub(super) fn encode(
    session: &mut SolverSession,
    registry: &VertexRegistry,
    topology: &TopologyGraph,
    config: &SynthesisConfig,
) -> EdgeFunctions {
    let mut exists = PairFunction::new(EDGE_EXISTS);
    let mut cost = PairFunction::new(EDGE_COST);

    let mut num_links = 0;
    let mut num_fixed = 0;

    for (u, v) in iproduct!(registry.vertices(), registry.vertices()) {
        let src = registry.get_name(u);
        let dst = registry.get_name(v);
        let e = exists.apply(session, registry, u, v);

        let link = if registry.is_network(u) {
            None
        } else if registry.is_network(v) {
            topology.attachment(src, dst).map(|a| Some(a.cost.unwrap_or(0)))
        } else if topology.has_link(src, dst) {
            Some(topology.fixed_cost(src, dst))
        } else {
            None
        };

        match link {
            Some(fixed) => {
                num_links += 1;
                session.assert_baseline(Constraint::holds(e));
                let c = LinExpr::from(cost.apply(session, registry, u, v));
                match fixed {
                    Some(fixed) => {
                        num_fixed += 1;
                        session.assert_baseline(c.equals(cost_expr(fixed)));
                    }
                    None => {
                        session.assert_baseline(c.clone().ge(cost_expr(config.min_cost)));
                        let max_cost = config.max_cost.unwrap_or(MAX_COST);
                        session.assert_baseline(c.le(cost_expr(max_cost)));
                    }
                }
            }
            None => session.assert_baseline(Constraint::fails(e)),
        }
    }

    debug!("Encoded {} links, {} of which have a fixed cost", num_links, num_fixed);

    EdgeFunctions { exists, cost }
}

fn cost_expr(cost: Cost) -> LinExpr {
    LinExpr::constant(i64::from(cost))
}
