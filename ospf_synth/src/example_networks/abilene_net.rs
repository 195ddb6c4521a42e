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

//! [Abilene Network](http://topology-zoo.org/dataset.html)

use super::{req, ExampleTopology};
use crate::config::EdgeCost;
use crate::synthesizer::PathRequirement;
use crate::topology::NetworkGraph;

/// # Abilene Network
///
/// This network is taken from [topology-zoo](http://topology-zoo.org/dataset.html), and consists of
/// 11 internal routers and 14 links. Customer networks are attached at Sunnyvale, Atlanta and New
/// York. The link between Denver and Kansas City has the fixed cost 10.
///
/// Two requirements steer traffic across the country:
/// 1. Seattle to Atlanta over Denver, Kansas City and Indianapolis.
/// 2. Sunnyvale to New York along the southern route over Los Angeles, Huston, Atlanta and
///    Washington DC (instead of the northern route over Chicago).
#[derive(Debug)]
pub struct AbileneNet;

impl ExampleTopology for AbileneNet {
    fn net() -> NetworkGraph {
        let mut net = NetworkGraph::new();

        // add routers
        let sv = net.add_router("Sunnyvale"); // 0
        let se = net.add_router("Seattle"); // 1
        let dv = net.add_router("Denver"); // 2
        let la = net.add_router("Los Angeles"); // 3
        let hs = net.add_router("Huston"); // 4
        let ks = net.add_router("Kansas City"); // 5
        let ip = net.add_router("Indianapolis"); // 6
        let at = net.add_router("Atlanta"); // 7
        let dc = net.add_router("Washington DC"); // 8
        let ny = net.add_router("New York"); // 9
        let ch = net.add_router("Chicago"); // 10

        // add links
        net.add_link(sv, se);
        net.add_link(sv, dv);
        net.add_link(sv, la);
        net.add_link(se, dv);
        net.add_link(dv, ks);
        net.add_link(la, hs);
        net.add_link(ks, hs);
        net.add_link(ks, ip);
        net.add_link(hs, at);
        net.add_link(ip, at);
        net.add_link(ip, ch);
        net.add_link(at, dc);
        net.add_link(ch, ny);
        net.add_link(dc, ny);

        // add customer networks
        let n_sv = net.add_network("Net Sunnyvale");
        let n_at = net.add_network("Net Atlanta");
        let n_ny = net.add_network("Net New York");
        net.add_link(sv, n_sv);
        net.add_link(at, n_at);
        net.add_link(ny, n_ny);

        net
    }

    fn fixed_costs() -> Vec<EdgeCost> {
        vec![EdgeCost::new("Denver", "Kansas City", 10), EdgeCost::new("Kansas City", "Denver", 10)]
    }

    fn requirements() -> Vec<PathRequirement> {
        vec![
            req(&["Seattle", "Denver", "Kansas City", "Indianapolis", "Atlanta"]),
            req(&["Sunnyvale", "Los Angeles", "Huston", "Atlanta", "Washington DC", "New York"]),
        ]
    }
}
