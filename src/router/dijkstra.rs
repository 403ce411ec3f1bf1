// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::{hash_coordinate, Coordinate, Edge, Graph, KeyedIndex, RouteError};

/// Result of a successful route search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    /// Edges to traverse, in order. The first edge starts at the start coordinate,
    /// the last one ends at the end coordinate, and every edge starts where
    /// the previous one ends.
    pub edges: Vec<Edge>,

    /// Sum of lengths of all [edges](Route::edges), in miles.
    pub distance: f64,
}

#[derive(Debug, Clone)]
struct FrontierItem {
    at: Coordinate,
    distance: f64,
}

impl PartialEq for FrontierItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierItem {}

impl PartialOrd for FrontierItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as shorter distances are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap. Ties are broken by the coordinate text,
        // so that the search order only depends on the graph.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.at.cmp(&self.at))
    }
}

fn reconstruct_route(
    came_from: &KeyedIndex<Coordinate, Edge>,
    end: &Coordinate,
    distance: f64,
) -> Route {
    let mut edges = Vec::new();
    let mut last = end;

    // The start coordinate never has a predecessor, as no edge can improve on distance 0
    while let Some(edge) = came_from.find(last) {
        edges.push(edge.clone());
        last = &edge.from;
    }

    edges.reverse();
    Route { edges, distance }
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the shortest route between two coordinates in the provided graph.
///
/// A route from a coordinate to itself is always empty, even if the coordinate
/// is not part of the graph. Otherwise, both `start` and `end` must have outgoing
/// edges in the graph, or [RouteError::InvalidCoordinate] is returned.
/// [RouteError::NoRoute] is returned if `end` can't be reached from `start`, which
/// is only known after visiting every coordinate reachable from `start`.
///
/// Coordinates at equal distances from `start` are visited in order of their text,
/// so the returned route is always the same for the same graph.
pub fn find_route(g: &Graph, start: &Coordinate, end: &Coordinate) -> Result<Route, RouteError> {
    if start == end {
        return Ok(Route::default());
    }

    if !g.contains(start) {
        return Err(RouteError::InvalidCoordinate(start.clone()));
    }
    if !g.contains(end) {
        return Err(RouteError::InvalidCoordinate(end.clone()));
    }

    let mut queue: BinaryHeap<FrontierItem> = BinaryHeap::default();
    let mut known_distances: KeyedIndex<Coordinate, f64> = KeyedIndex::new(hash_coordinate);
    let mut came_from: KeyedIndex<Coordinate, Edge> = KeyedIndex::new(hash_coordinate);
    let mut settled: KeyedIndex<Coordinate, ()> = KeyedIndex::new(hash_coordinate);

    known_distances.associate(start.clone(), 0.0);
    queue.push(FrontierItem {
        at: start.clone(),
        distance: 0.0,
    });

    while let Some(item) = queue.pop() {
        // Instead of decreasing keys, multiple items might be kept in the queue
        // for the same coordinate. Only the first (shortest) one is expanded.
        if settled.associate(item.at.clone(), ()).is_some() {
            continue;
        }
        trace!("settled {} at {:.4} mi", item.at, item.distance);

        if item.at == *end {
            debug_assert_eq!(known_distances.find(end), Some(&item.distance));
            debug!(
                "found route from {} to {}: {:.4} mi, {} coordinates settled",
                start,
                end,
                item.distance,
                settled.len(),
            );
            return Ok(reconstruct_route(&came_from, end, item.distance));
        }

        // Edges may point to coordinates without any outgoing edges
        let edges = g
            .outgoing_edges(&item.at)
            .ok_or_else(|| RouteError::InvalidCoordinate(item.at.clone()))?;

        for edge in edges {
            // Check if this is the shortest way to the neighbor
            let candidate = item.distance + edge.length();
            let improves = known_distances
                .find(&edge.to)
                .map_or(true, |&known| candidate < known);
            if !improves {
                continue;
            }

            known_distances.associate(edge.to.clone(), candidate);
            came_from.associate(edge.to.clone(), edge.clone());
            queue.push(FrontierItem {
                at: edge.to.clone(),
                distance: candidate,
            });
        }
    }

    debug!(
        "no route from {} to {}: {} coordinates settled",
        start,
        end,
        settled.len(),
    );
    Err(RouteError::NoRoute)
}

/// Finds routes over a borrowed, immutable [Graph].
///
/// Every search owns its own working state, so a single Router (or many
/// Routers over the same graph) may be used for any number of searches.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    graph: &'a Graph,
}

impl<'a> Router<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// Finds the shortest route between two coordinates, see [find_route].
    pub fn route(&self, start: &Coordinate, end: &Coordinate) -> Result<Route, RouteError> {
        find_route(self.graph, start, end)
    }
}
