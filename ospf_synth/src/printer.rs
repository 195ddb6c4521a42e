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

//! # Helper (printer) functions for the synthesis results
//! Module containing helper functions to get formatted strings of synthesized costs, paths and
//! routing trees.

use crate::config::EdgeCost;
use crate::synthesizer::{OspfSynthesizer, Violation};
use crate::topology::RoutingGraph;

/// Returns the formatted string of a single link cost.
pub fn edge_cost(c: &EdgeCost) -> String {
    format!("{} -> {}: {}", c.src, c.dst, c.cost)
}

/// Returns the formatted string of a path, with the names separated by arrows.
pub fn path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(" -> ")
}

/// Get a vector of strings, one per link of the routing tree. The first line names the
/// destination of the tree, if it has one.
pub fn routing_tree(tree: &RoutingGraph) -> Vec<String> {
    let mut result = Vec::with_capacity(tree.edge_count() + 1);
    if let Some(dst) = tree.destination() {
        result.push(format!("Routing tree towards {}:", dst));
    }
    let mut edges: Vec<String> =
        tree.edges().map(|(s, t, c)| format!("  {} -> {}: {}", s, t, c)).collect();
    edges.sort();
    result.extend(edges);
    result
}

/// Returns the formatted string of a violation, including the violated requirement.
pub fn violation(synth: &OspfSynthesizer, v: &Violation) -> String {
    let required = synth
        .requirements()
        .get(v.requirement)
        .map(|r| path(r.path()))
        .unwrap_or_else(|| format!("#{}", v.requirement));
    format!(
        "{} (cost {}) is not cheaper than {} (cost {})",
        required,
        v.required_cost,
        path(&v.path),
        v.cost
    )
}
