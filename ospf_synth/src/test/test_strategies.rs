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

//! Test the approximate path enumeration strategies, and the refinement of their solutions.

use crate::topology::*;
use crate::{synthesize, Error, OspfSynthesizer, PathEnumeration, PathRequirement, SynthesisConfig};
use lazy_static::lazy_static;

lazy_static! {
    static ref REQUIRED: Path = path(&["A", "B", "C", "D"]);
}

/// # Test network
///
/// ```text
/// A ---- B ---- C ---- D
///  \ \                / /
///   \ '------------- ' /
///    '------ E ------'
/// ```
///
/// There are three simple paths from `A` to `D`: the direct link (1 hop), the path over `E`
/// (2 hops), and the path over `B` and `C` (3 hops).
fn get_test_net() -> NetworkGraph {
    let mut net = NetworkGraph::new();
    let a = net.add_router("A");
    let b = net.add_router("B");
    let c = net.add_router("C");
    let d = net.add_router("D");
    let e = net.add_router("E");
    net.add_link(a, b);
    net.add_link(b, c);
    net.add_link(c, d);
    net.add_link(a, d);
    net.add_link(a, e);
    net.add_link(e, d);
    net
}

fn path(p: &[&str]) -> Path {
    p.iter().map(|s| s.to_string()).collect()
}

fn alternatives(strategy: PathEnumeration) -> Vec<Path> {
    let net = get_test_net();
    let topo = TopologyGraph::load(&net).unwrap();
    let mut paths = PathEnumerator::new(topo.graph(), strategy).alternatives(&REQUIRED).unwrap();
    paths.sort();
    paths
}

fn requirements() -> Vec<PathRequirement> {
    vec![PathRequirement::new(REQUIRED.iter().cloned()).unwrap()]
}

#[test]
fn test_exhaustive() {
    assert_eq!(
        alternatives(PathEnumeration::Exhaustive),
        vec![path(&["A", "D"]), path(&["A", "E", "D"])]
    );
}

#[test]
fn test_bounded_length() {
    assert_eq!(alternatives(PathEnumeration::BoundedLength { max_hops: 0 }), Vec::<Path>::new());
    assert_eq!(alternatives(PathEnumeration::BoundedLength { max_hops: 1 }), vec![path(&["A", "D"])]);
    assert_eq!(
        alternatives(PathEnumeration::BoundedLength { max_hops: 2 }),
        vec![path(&["A", "D"]), path(&["A", "E", "D"])]
    );
    for p in alternatives(PathEnumeration::BoundedLength { max_hops: 2 }) {
        assert!(p.len() <= 3);
    }
}

#[test]
fn test_fewest_hops() {
    assert_eq!(alternatives(PathEnumeration::FewestHops { k: 0 }), Vec::<Path>::new());
    assert_eq!(alternatives(PathEnumeration::FewestHops { k: 1 }), vec![path(&["A", "D"])]);
    assert_eq!(
        alternatives(PathEnumeration::FewestHops { k: 2 }),
        vec![path(&["A", "D"]), path(&["A", "E", "D"])]
    );
    assert_eq!(alternatives(PathEnumeration::FewestHops { k: 10 }).len(), 2);
}

#[test]
fn test_approximation_violates() {
    let config = SynthesisConfig::default()
        .with_path_enumeration(PathEnumeration::BoundedLength { max_hops: 1 });
    let mut synth = OspfSynthesizer::new(&get_test_net(), &[], config).unwrap();
    synth.add_requirement(requirements().remove(0)).unwrap();
    synth.push_requirements().unwrap();
    synth.solve().unwrap();

    // the path over E was never considered
    let violations = synth.verify().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].requirement, 0);
    assert_eq!(violations[0].path, path(&["A", "E", "D"]));
    assert!(violations[0].cost <= violations[0].required_cost);

    // refine once, and the solution is valid
    synth.refine(&violations).unwrap();
    assert!(synth.is_solved());
    assert!(synth.verify().unwrap().is_empty());
    assert_eq!(synth.requirements()[0].counterexamples(), &[path(&["A", "E", "D"])]);

    // the same violations do not add anything new
    assert_eq!(synth.refine(&violations), Err(Error::RefinementExhausted(0)));
}

#[test]
fn test_exhaustive_never_violates() {
    let mut synth =
        OspfSynthesizer::new(&get_test_net(), &[], SynthesisConfig::default()).unwrap();
    synth.add_requirement(requirements().remove(0)).unwrap();
    synth.push_requirements().unwrap();
    synth.solve().unwrap();
    assert!(synth.verify().unwrap().is_empty());
}

#[test]
fn test_synthesize_with_refinement() {
    for strategy in vec![
        PathEnumeration::BoundedLength { max_hops: 1 },
        PathEnumeration::BoundedLength { max_hops: 2 },
        PathEnumeration::FewestHops { k: 1 },
    ] {
        let config = SynthesisConfig::default().with_path_enumeration(strategy);
        let result = synthesize(&get_test_net(), &[], requirements(), config).unwrap();

        let cost = result.topology.path_cost(&REQUIRED).unwrap();
        assert!(cost < result.topology.path_cost(&path(&["A", "D"])).unwrap());
        assert!(cost < result.topology.path_cost(&path(&["A", "E", "D"])).unwrap());
    }
}

#[test]
fn test_synthesize_counts_refinements() {
    let config = SynthesisConfig::default()
        .with_path_enumeration(PathEnumeration::FewestHops { k: 1 });
    let result = synthesize(&get_test_net(), &[], requirements(), config).unwrap();
    assert_eq!(result.refinements, 1);

    let result =
        synthesize(&get_test_net(), &[], requirements(), SynthesisConfig::default()).unwrap();
    assert_eq!(result.refinements, 0);
}

#[test]
fn test_refinement_exhausted() {
    let config = SynthesisConfig::default()
        .with_path_enumeration(PathEnumeration::BoundedLength { max_hops: 1 })
        .with_max_refinements(0);
    assert_eq!(
        synthesize(&get_test_net(), &[], requirements(), config),
        Err(Error::RefinementExhausted(0))
    );
}
