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

#![deny(missing_docs)]

//! # OSPF-Synth: Synthesizing OSPF Link Weights for Path Requirements
//! This is a library for computing OSPF link costs, such that a set of operator-specified paths
//! become the unique shortest paths between their endpoints.
//!
//! ## Problem Statement
//! Given
//! - a network topology of routers and destination networks,
//! - a (possibly empty) set of links whose cost is already fixed, and
//! - a set of path requirements, each one an ordered sequence of routers,
//!
//! find a non-negative integer cost for every other link, such that for each requirement, the
//! total cost of the required path is strictly less than the total cost of every other simple
//! path between the same endpoints.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`Topology`](topology)**: The input network ([`NetworkGraph`](topology::NetworkGraph)),
//!   the filtered router topology ([`TopologyGraph`](topology::TopologyGraph)), the graphs with
//!   resolved costs ([`RoutingGraph`](topology::RoutingGraph)), the
//!   [`VertexRegistry`](topology::VertexRegistry) and the enumeration of alternative simple paths
//!   ([`PathEnumeration`]).
//!
//! - **[`Solver`](solver)**: Solver session with typed declarations, linear constraints, a
//!   baseline plus a stack of scopes, and satisfiability checks. The constraints are solved as an
//!   integer linear program.
//!
//! - **[`Synthesizer`](synthesizer)**: The [`OspfSynthesizer`], which encodes the topology,
//!   pushes the requirements, solves, extracts the solution, and verifies it.
//!
//! - **[`Config`](config)**: The [`SynthesisConfig`] and the [`EdgeCost`] triples.
//!
//! - **[`ExampleNetworks`](example_networks)**: Collection of prepared topologies with
//!   requirements, including a seeded random topology generator.
//!
//! - **[`Printer`](printer)**: Helper functions to format the results.
//!
//! ## Usage
//!
//! Prepare the [network](topology::NetworkGraph), the fixed costs and the requirements, and call
//! [`synthesize`]. For more control over the individual steps, use the [`OspfSynthesizer`]
//! directly.
//!
//! ```
//! use ospf_synth::topology::NetworkGraph;
//! use ospf_synth::{synthesize, EdgeCost, Error, PathRequirement, SynthesisConfig};
//!
//! fn main() -> Result<(), Error> {
//!     let mut net = NetworkGraph::new();
//!     let a = net.add_router("A");
//!     let b = net.add_router("B");
//!     let c = net.add_router("C");
//!     let d = net.add_router("D");
//!     net.add_link(a, c);
//!     net.add_link(c, b);
//!     net.add_link(a, d);
//!     net.add_link(d, b);
//!
//!     let fixed_costs = vec![EdgeCost::new("A", "C", 5)];
//!     let requirements = vec![PathRequirement::new(vec!["A", "D", "B"])?];
//!
//!     let result = synthesize(&net, &fixed_costs, requirements, SynthesisConfig::default())?;
//!
//!     assert_eq!(result.topology.cost("A", "C"), Some(5));
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod example_networks;
pub mod printer;
pub mod solver;
mod synthesize;
pub mod synthesizer;
pub mod topology;

// test modules
mod test;

pub use config::{EdgeCost, SynthesisConfig};
pub use error::Error;
pub use synthesize::{synthesize, Synthesis};
pub use synthesizer::{OspfSynthesizer, PathRequirement, Violation};
pub use topology::PathEnumeration;
