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

//! Module containing the vertex registry, mapping names of network elements to their symbolic
//! identifiers and back.

use super::{TopologyError, TopologyGraph, VertexType};

use std::collections::HashMap;

/// Identifier of a network element, used to refer to it in all symbolic expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u32);

impl VertexId {
    /// Position of the vertex inside the registry
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// # Vertex Registry
///
/// Maps names of routers and destination networks to [`VertexId`]s. Vertices are created once
/// per unique name, and are never removed. The registry is owned by a single synthesizer, and
/// lives as long as the synthesis session.
#[derive(Debug, Clone, Default)]
pub struct VertexRegistry {
    names: Vec<String>,
    types: Vec<VertexType>,
    lookup: HashMap<String, VertexId>,
}

impl VertexRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry for a topology. First, all routers are registered, and then all
    /// destination networks.
    pub fn from_topology(topology: &TopologyGraph) -> Self {
        let mut registry = Self::new();
        for router in topology.routers() {
            registry.get_or_create(&router.name, VertexType::Router);
        }
        for network in topology.destinations() {
            registry.get_or_create(&network.name, VertexType::Network);
        }
        registry
    }

    /// Get the vertex of the given name, or create it if it does not yet exist. If the vertex
    /// already exists, its type is not changed.
    pub fn get_or_create(&mut self, name: &str, vertex_type: VertexType) -> VertexId {
        if let Some(v) = self.lookup.get(name) {
            return *v;
        }
        let v = VertexId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.types.push(vertex_type);
        self.lookup.insert(name.to_string(), v);
        v
    }

    /// Lookup the vertex of the given name.
    pub fn get_vertex(&self, name: &str) -> Result<VertexId, TopologyError> {
        self.lookup.get(name).copied().ok_or_else(|| TopologyError::NodeNotFound(name.to_string()))
    }

    /// Get the name of a vertex. **Panics** if the vertex was created by a different registry.
    pub fn get_name(&self, vertex: VertexId) -> &str {
        &self.names[vertex.index()]
    }

    /// Get the type of a vertex
    pub fn vertex_type(&self, vertex: VertexId) -> VertexType {
        self.types[vertex.index()]
    }

    /// Returns true if the vertex is a destination network
    pub fn is_network(&self, vertex: VertexId) -> bool {
        self.vertex_type(vertex) == VertexType::Network
    }

    /// Iterate over all vertices in the order of creation
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + Clone {
        (0..self.names.len() as u32).map(VertexId)
    }

    /// Iterate over all router vertices
    pub fn routers(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices().filter(move |v| self.vertex_type(*v) == VertexType::Router)
    }

    /// Iterate over all destination network vertices
    pub fn networks(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices().filter(move |v| self.is_network(*v))
    }

    /// Number of registered vertices
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no vertex is registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
