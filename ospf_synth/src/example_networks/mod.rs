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

//! Networks for testing

use crate::config::EdgeCost;
use crate::synthesizer::PathRequirement;
use crate::topology::NetworkGraph;

mod chain_net;
pub use chain_net::ChainNet;

mod diamond_net;
pub use diamond_net::DiamondNet;

mod abilene_net;
pub use abilene_net::AbileneNet;

mod random_net;
pub use random_net::RandomNet;

/// Trait for easier access to example networks.
pub trait ExampleTopology {
    /// Get the network
    fn net() -> NetworkGraph;
    /// Get the fixed link costs
    fn fixed_costs() -> Vec<EdgeCost>;
    /// Get the path requirements
    fn requirements() -> Vec<PathRequirement>;
}

/// Create a requirement for a path that is known to be valid. **Panics** if the path has less
/// than two nodes.
fn req(path: &[&str]) -> PathRequirement {
    PathRequirement::new(path.iter().copied()).unwrap()
}
