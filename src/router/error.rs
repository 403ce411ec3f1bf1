// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Coordinate;

/// Error conditions which may occur during [find_route](crate::find_route)
/// or [DeliveryPlanner::plan](crate::DeliveryPlanner::plan).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The coordinate has no outgoing edges in the graph.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(Coordinate),

    /// The end coordinate can't be reached from the start coordinate.
    #[error("no route")]
    NoRoute,
}
