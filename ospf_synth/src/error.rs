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

//! Module containing all error types

use crate::solver::SolverError;
use crate::topology::TopologyError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Error propagated from the topology model
    #[error("Topology Error: {0}")]
    TopologyError(TopologyError),
    /// Error propagated from the solver session
    #[error("Solver Error: {0}")]
    SolverError(SolverError),
    /// A path requirement must contain at least the source and the destination
    #[error("Path requirement needs at least two nodes, but has {0}")]
    RequirementTooShort(usize),
    /// The source or destination of a path requirement is not a router of the topology
    #[error("Endpoint of the path requirement is not a router of the topology: {0}")]
    UnknownEndpoint(String),
    /// The requirements are already pushed, and must be popped first
    #[error("Requirements are already pushed to the solver!")]
    RequirementsAlreadyPushed,
    /// No requirements are pushed to the solver
    #[error("No requirements are pushed to the solver!")]
    NoRequirementsPushed,
    /// The constraints are unsatisfiable
    #[error("No cost assignment satisfies the requirements!")]
    NoCostAssignment,
    /// Used up all of the time budget
    #[error("The time budget was used up without finding any solution")]
    Timeout,
    /// The solution was requested before the requirements were solved
    #[error("No model available! Solve the requirements first")]
    NoModel,
    /// The solver assigned a value that is not a valid link cost
    #[error("Synthesized cost is outside the range of link costs: {0}")]
    CostOutOfRange(i64),
    /// Violations remain after the maximum number of refinement rounds
    #[error("Requirements are still violated after {0} refinement rounds")]
    RefinementExhausted(usize),
}

impl From<TopologyError> for Error {
    fn from(cause: TopologyError) -> Self {
        match cause {
            TopologyError::EnumerationTimeout => Self::Timeout,
            cause => Self::TopologyError(cause),
        }
    }
}

impl From<SolverError> for Error {
    fn from(cause: SolverError) -> Self {
        match cause {
            SolverError::Unsatisfiable => Self::NoCostAssignment,
            SolverError::Timeout => Self::Timeout,
            SolverError::NoModel => Self::NoModel,
            cause => Self::SolverError(cause),
        }
    }
}
