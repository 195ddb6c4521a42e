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

//! Chain of three routers with a shortcut

use super::{req, ExampleTopology};
use crate::config::EdgeCost;
use crate::synthesizer::PathRequirement;
use crate::topology::NetworkGraph;

/// # Chain Network
///
/// Three routers `A`, `B` and `C`, connected as a chain `A - B - C`, with a shortcut `A - C`.
/// Network `N` is attached to `C`. The traffic from `A` must take the detour over `B`:
///
/// ```text
///   A ---- C ---- N
///    \    /
///     \  /
///      B
/// ```
///
/// Hence, the synthesized costs must satisfy `cost(A, B) + cost(B, C) < cost(A, C)`.
#[derive(Debug)]
pub struct ChainNet;

impl ExampleTopology for ChainNet {
    fn net() -> NetworkGraph {
        let mut net = NetworkGraph::new();

        let a = net.add_router("A");
        let b = net.add_router("B");
        let c = net.add_router("C");
        let n = net.add_network("N");

        net.add_link(a, b);
        net.add_link(b, c);
        net.add_link(a, c);
        net.add_link(c, n);

        net
    }

    fn fixed_costs() -> Vec<EdgeCost> {
        Vec::new()
    }

    fn requirements() -> Vec<PathRequirement> {
        vec![req(&["A", "B", "C"])]
    }
}
