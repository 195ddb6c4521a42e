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

use super::{req, ExampleTopology};
use crate::config::EdgeCost;
use crate::synthesizer::PathRequirement;
use crate::topology::NetworkGraph;

/// # Diamond Network
///
/// Routers `A` and `B` are connected over `C` and over `D`. The link `A -> C` has the fixed cost
/// 5. Network `NA` is attached to `A`, and `NB` to `B`.
///
/// ```text
///        C
///       / \
/// NA - A   B - NB
///       \ /
///        D
/// ```
///
/// Traffic from `A` to `B` must go over `C`, and traffic from `B` to `A` over `D`.
#[derive(Debug)]
pub struct DiamondNet;

impl ExampleTopology for DiamondNet {
    fn net() -> NetworkGraph {
        let mut net = NetworkGraph::new();

        let a = net.add_router("A");
        let b = net.add_router("B");
        let c = net.add_router("C");
        let d = net.add_router("D");
        let na = net.add_network("NA");
        let nb = net.add_network("NB");

        net.add_link(a, c);
        net.add_link(c, b);
        net.add_link(a, d);
        net.add_link(d, b);
        net.add_link(a, na);
        net.add_link(b, nb);

        net
    }

    fn fixed_costs() -> Vec<EdgeCost> {
        vec![EdgeCost::new("A", "C", 5)]
    }

    fn requirements() -> Vec<PathRequirement> {
        vec![req(&["A", "C", "B"]), req(&["B", "D", "A"])]
    }
}
