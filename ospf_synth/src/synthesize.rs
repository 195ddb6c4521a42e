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

//! # OSPF-Synth
//! Wrapper function to synthesize OSPF link costs

use crate::config::{EdgeCost, SynthesisConfig};
use crate::printer;
use crate::synthesizer::{OspfSynthesizer, PathRequirement};
use crate::topology::{NetworkGraph, RoutingGraph};
use crate::Error;

use log::*;
use std::collections::BTreeMap;
use std::time::Duration;

/// Result of the synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    /// Synthesized cost of every link
    pub edge_costs: Vec<EdgeCost>,
    /// Topology with synthesized costs
    pub topology: RoutingGraph,
    /// Shortest-path tree towards each destination network
    pub routing_trees: BTreeMap<String, RoutingGraph>,
    /// Total time spent pushing the requirements, over all rounds
    pub push_time: Duration,
    /// Number of refinement rounds
    pub refinements: usize,
}

/// # Synthesize OSPF link costs
///
/// This is the main function to interact with the system. It builds an [`OspfSynthesizer`],
/// pushes all requirements and solves them. If the configured path enumeration is not
/// exhaustive, the solution is verified against all simple paths, and violating paths are fed
/// back as counterexamples until the solution is valid (or `max_refinements` is reached).
///
/// ## Usage
///
/// ```
/// use ospf_synth::synthesize;
/// use ospf_synth::Error;
/// use ospf_synth::SynthesisConfig;
/// # use ospf_synth::example_networks::*;
///
/// fn main() -> Result<(), Error> {
///     // prepare the network
///     // let net = ...
///     // let fixed_costs = ...
///     // let requirements = ...
/// # let net = DiamondNet::net();
/// # let fixed_costs = DiamondNet::fixed_costs();
/// # let requirements = DiamondNet::requirements();
///
///     // synthesize the link costs
///     let result = synthesize(&net, &fixed_costs, requirements, SynthesisConfig::default())?;
///
///     // Do something with the result
///     println!("{:#?}", result.edge_costs);
///
///     Ok(())
/// }
/// ```
pub fn synthesize(
    network: &NetworkGraph,
    fixed_costs: &[EdgeCost],
    requirements: Vec<PathRequirement>,
    config: SynthesisConfig,
) -> Result<Synthesis, Error> {
    let max_refinements = config.max_refinements;
    let exhaustive = config.path_enumeration.is_exhaustive();

    let mut synth = OspfSynthesizer::new(network, fixed_costs, config)?;
    for req in requirements {
        synth.add_requirement(req)?;
    }

    info!("Solving the problem...");
    let mut push_time = synth.push_requirements()?;
    synth.solve()?;

    let mut refinements = 0;
    if !exhaustive {
        loop {
            let violations = synth.verify()?;
            if violations.is_empty() {
                break;
            }
            for v in violations.iter() {
                debug!("{}", printer::violation(&synth, v));
            }
            if refinements >= max_refinements {
                error!("Could not solve the problem: {} violations remain", violations.len());
                return Err(Error::RefinementExhausted(refinements));
            }
            push_time += match synth.refine(&violations) {
                Ok(t) => t,
                Err(Error::RefinementExhausted(_)) => {
                    error!("Could not solve the problem: no new counterexamples");
                    return Err(Error::RefinementExhausted(refinements));
                }
                Err(e) => return Err(e),
            };
            refinements += 1;
        }
    }

    info!("Found a valid solution after {} refinement rounds!", refinements);

    Ok(Synthesis {
        edge_costs: synth.read_edge_costs()?,
        topology: synth.read_topology_graph()?,
        routing_trees: synth.read_routing_trees()?,
        push_time,
        refinements,
    })
}
