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

use ospf_synth::topology::NetworkGraph;
use ospf_synth::{
    printer, synthesize, EdgeCost, PathEnumeration, PathRequirement, Synthesis, SynthesisConfig,
};

use clap::{ArgEnum, Args, Parser, Subcommand};
use log::*;
use std::error::Error;
use std::time::Duration;

mod example_topologies;
use example_topologies::*;
mod input;
use input::{Problem, SynthesisResult};

fn main() -> Result<(), Box<dyn Error>> {
    // run clap
    let args = CommandLineArguments::parse();

    // initialize the env logger
    pretty_env_logger::init();

    // match on the action
    match args.cmd {
        MainCommand::Synthesize { input, output, options } => {
            info!("Reading the problem from {}", input);
            let problem = Problem::read(&input)?;
            let net = problem.network()?;
            let result = run(&net, &problem.fixed_costs(), problem.requirements()?, &options)?;
            if let Some(output) = output {
                SynthesisResult::from(&result).write(&output)?;
                info!("Result written to {}", output);
            }
        }
        MainCommand::Example {
            topology,
            seed,
            num_routers,
            num_requirements,
            export,
            output,
            options,
        } => {
            info!("Using the example network {}", topology);
            let (net, fixed_costs, requirements) =
                example_networks_scenario(topology, seed, num_routers, num_requirements);
            if let Some(export) = export {
                Problem::from_parts(&net, &fixed_costs, &requirements).write(&export)?;
                info!("Problem written to {}", export);
            }
            let result = run(&net, &fixed_costs, requirements, &options)?;
            if let Some(output) = output {
                SynthesisResult::from(&result).write(&output)?;
                info!("Result written to {}", output);
            }
        }
    }
    Ok(())
}

fn run(
    net: &NetworkGraph,
    fixed_costs: &[EdgeCost],
    requirements: Vec<PathRequirement>,
    options: &SynthesisOptions,
) -> Result<Synthesis, Box<dyn Error>> {
    info!(
        "Problem has {} nodes, {} fixed costs and {} requirements",
        net.node_count(),
        fixed_costs.len(),
        requirements.len()
    );

    let result = synthesize(net, fixed_costs, requirements, options.config())?;

    info!(
        "Link costs:\n    {}",
        result.edge_costs.iter().map(printer::edge_cost).collect::<Vec<_>>().join("\n    ")
    );
    for tree in result.routing_trees.values() {
        info!("{}", printer::routing_tree(tree).join("\n"));
    }
    info!(
        "Pushed the requirements in {:?} ({} refinement rounds)",
        result.push_time, result.refinements
    );

    Ok(result)
}

/// This is the binary to synthesize OSPF link costs. It reads a problem (either from a JSON file,
/// or from the example networks), synthesizes the link costs such that every required path
/// becomes the unique shortest path, and writes the result.
#[derive(Parser, Debug)]
#[clap(name = "OSPF-Synth", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Synthesize the link costs of a problem stored in a JSON file
    #[clap(name = "synthesize")]
    Synthesize {
        /// JSON file containing the problem
        #[clap(short = 'i', long)]
        input: String,
        /// Store the result in a JSON file
        #[clap(short = 'o', long)]
        output: Option<String>,
        #[clap(flatten)]
        options: SynthesisOptions,
    },
    /// Synthesize the link costs of an example network
    #[clap(name = "example")]
    Example {
        /// Topology to use (from the example networks)
        #[clap(arg_enum, short = 'n', long = "name")]
        topology: Topology,
        /// Random seed, to get reproducable networks
        #[clap(short = 's', long, default_value = "42")]
        seed: u64,
        /// Number of routers of the random network
        #[clap(long, default_value = "8")]
        num_routers: usize,
        /// Number of requirements of the random network
        #[clap(long, default_value = "4")]
        num_requirements: usize,
        /// Store the problem in a JSON file, such that it can be used with `synthesize`
        #[clap(long)]
        export: Option<String>,
        /// Store the result in a JSON file
        #[clap(short = 'o', long)]
        output: Option<String>,
        #[clap(flatten)]
        options: SynthesisOptions,
    },
}

#[derive(ArgEnum, Debug, Clone, Copy)]
enum Strategy {
    Exhaustive,
    Bounded,
    Fewest,
}

#[derive(Args, Debug)]
struct SynthesisOptions {
    /// Strategy for enumerating alternative paths
    #[clap(arg_enum, long, default_value = "exhaustive")]
    strategy: Strategy,
    /// Maximum number of links of an alternative path (for the bounded strategy)
    #[clap(long, default_value = "4")]
    max_hops: usize,
    /// Number of alternative paths per requirement (for the fewest strategy)
    #[clap(short = 'k', long, default_value = "8")]
    k: usize,
    /// Maximum number of refinement rounds (for the bounded and fewest strategies)
    #[clap(long, default_value = "10")]
    max_refinements: usize,
    /// Time limit of the solver in seconds
    #[clap(long)]
    solve_timeout: Option<u64>,
    /// Time limit of the path enumeration in seconds
    #[clap(long)]
    enumeration_timeout: Option<u64>,
    /// Smallest cost of a link
    #[clap(long, default_value = "0")]
    min_cost: u32,
    /// Largest cost of a link
    #[clap(long)]
    max_cost: Option<u32>,
}

impl SynthesisOptions {
    fn config(&self) -> SynthesisConfig {
        let strategy = match self.strategy {
            Strategy::Exhaustive => PathEnumeration::Exhaustive,
            Strategy::Bounded => PathEnumeration::BoundedLength { max_hops: self.max_hops },
            Strategy::Fewest => PathEnumeration::FewestHops { k: self.k },
        };
        let mut config = SynthesisConfig::default()
            .with_path_enumeration(strategy)
            .with_cost_range(self.min_cost, self.max_cost)
            .with_max_refinements(self.max_refinements);
        if let Some(t) = self.solve_timeout {
            config = config.with_solve_time_limit(Duration::from_secs(t));
        }
        if let Some(t) = self.enumeration_timeout {
            config = config.with_enumeration_time_limit(Duration::from_secs(t));
        }
        config
    }
}
