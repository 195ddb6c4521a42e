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

use ospf_synth::example_networks::*;
use ospf_synth::topology::NetworkGraph;
use ospf_synth::{EdgeCost, PathRequirement};
use std::fmt;

use clap::ArgEnum;

#[derive(ArgEnum, Debug, Clone, Copy)]
pub enum Topology {
    Chain,
    Diamond,
    Abilene,
    Random,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Topology::Chain => write!(f, "ChainNet"),
            Topology::Diamond => write!(f, "DiamondNet"),
            Topology::Abilene => write!(f, "AbileneNet"),
            Topology::Random => write!(f, "RandomNet"),
        }
    }
}

pub fn example_networks_scenario(
    topology: Topology,
    seed: u64,
    num_routers: usize,
    num_requirements: usize,
) -> (NetworkGraph, Vec<EdgeCost>, Vec<PathRequirement>) {
    match topology {
        Topology::Chain => (ChainNet::net(), ChainNet::fixed_costs(), ChainNet::requirements()),
        Topology::Diamond => {
            (DiamondNet::net(), DiamondNet::fixed_costs(), DiamondNet::requirements())
        }
        Topology::Abilene => {
            (AbileneNet::net(), AbileneNet::fixed_costs(), AbileneNet::requirements())
        }
        Topology::Random => {
            let random = RandomNet::generate(num_routers, num_requirements, seed);
            (random.net().clone(), random.fixed_costs(), random.requirements())
        }
    }
}
