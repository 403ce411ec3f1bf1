// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::keyed_index::default_hash;
use crate::{Coordinate, Edge, KeyedIndex};

/// Hashes a [Coordinate] over its latitude and longitude text.
pub fn hash_coordinate(c: &Coordinate) -> u64 {
    default_hash(c)
}

/// Represents a street map as a set of [Coordinates](Coordinate)
/// and directed [Edges](Edge) between them.
///
/// Only coordinates with at least one outgoing edge are part of the graph.
/// Outgoing edges are kept in insertion order.
#[derive(Debug, Clone)]
pub struct Graph(KeyedIndex<Coordinate, Vec<Edge>>);

impl Default for Graph {
    fn default() -> Self {
        Self(KeyedIndex::new(hash_coordinate))
    }
}

impl Graph {
    /// Returns the number of coordinates with outgoing edges.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.0.iter().map(|(_, edges)| edges.len()).sum()
    }

    /// Returns an iterator over all [Coordinates](Coordinate) in the graph.
    pub fn coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.0.iter().map(|(c, _)| c)
    }

    /// Checks whether any edges start at the provided coordinate.
    pub fn contains(&self, c: &Coordinate) -> bool {
        self.0.contains_key(c)
    }

    /// Gets all outgoing [Edges](Edge) from a given coordinate,
    /// or [None] if the coordinate is not part of the graph.
    pub fn outgoing_edges(&self, from: &Coordinate) -> Option<&[Edge]> {
        self.0.find(from).map(Vec::as_slice)
    }

    /// Gets the first [Edge] from one coordinate to another.
    pub fn get_edge(&self, from: &Coordinate, to: &Coordinate) -> Option<&Edge> {
        self.outgoing_edges(from)?.iter().find(|e| e.to == *to)
    }

    /// Appends a directed [Edge] to the graph.
    pub fn add_edge(&mut self, edge: Edge) {
        self.0
            .find_or_insert_with(edge.from.clone(), Vec::new)
            .push(edge);
    }

    /// Adds a two-way street segment, as a pair of opposing [Edges](Edge).
    pub fn add_segment(&mut self, street: impl Into<Arc<str>>, a: Coordinate, b: Coordinate) {
        let forward = Edge::new(a, b, street);
        let backward = forward.reversed();
        self.add_edge(forward);
        self.add_edge(backward);
    }
}
