// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest routes and turn-by-turn delivery instructions over street maps.
//!
//! A street map is loaded into a directed [Graph] keyed by [Coordinates](Coordinate).
//! [find_route] runs Dijkstra's algorithm between two coordinates, [synthesize_commands]
//! turns the resulting edges into "proceed" and "turn" [Commands](Command), and the
//! [DeliveryPlanner] strings both together over a list of delivery stops.
//!
//! # Example
//!
//! ```no_run
//! let mut g = streetroute::Graph::default();
//! streetroute::map::add_segments_from_file(
//!     &mut g,
//!     streetroute::map::FileFormat::Unknown,
//!     "path/to/mapdata.txt",
//! ).expect("failed to load mapdata.txt");
//!
//! let deliveries = streetroute::map::read_deliveries_from_file(
//!     streetroute::map::FileFormat::Unknown,
//!     "path/to/deliveries.txt",
//! ).expect("failed to load deliveries.txt");
//!
//! let planner = streetroute::DeliveryPlanner::new(&g);
//! let plan = planner
//!     .plan(&deliveries.depot, &deliveries.requests)
//!     .expect("failed to plan deliveries");
//!
//! for command in &plan.commands {
//!     println!("{}", command);
//! }
//! println!("{:.2} miles travelled", plan.distance);
//! ```

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

mod commands;
mod geometry;
mod graph;
mod keyed_index;
pub mod map;
mod planner;
mod router;

pub use commands::{
    classify_turn, compass_direction, synthesize_commands, Command, Direction, TurnDirection,
};
pub use geometry::{angle_between_lines, angle_of_line, earth_distance_miles};
pub use graph::{hash_coordinate, Graph};
pub use keyed_index::{HashFn, KeyedIndex, DEFAULT_MAX_LOAD_FACTOR};
pub use planner::{DeliveryPlan, DeliveryPlanner, DeliveryRequest};
pub use router::{find_route, Route, RouteError, Router};

/// Error returned when a latitude or longitude text is not a finite decimal number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    #[error("invalid latitude: {0:?}")]
    InvalidLatitude(String),

    #[error("invalid longitude: {0:?}")]
    InvalidLongitude(String),

    #[error("expected \"<latitude> <longitude>\", got {0:?}")]
    Malformed(String),
}

/// Represents a point on a street map.
///
/// A Coordinate is identified by the exact text of its latitude and longitude,
/// as read from the input data. Equality, ordering and hashing only ever look
/// at that text, so `"34.0500000"` and `"34.05"` are different coordinates.
/// This guarantees that two coordinates parsed from identical text always compare
/// equal, regardless of floating-point rounding.
///
/// Parsed values are kept alongside the text for geometry calculations.
/// Cloning is cheap, as the text is shared.
#[derive(Debug, Clone)]
pub struct Coordinate {
    lat_text: Arc<str>,
    lon_text: Arc<str>,
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Creates a Coordinate from latitude and longitude text.
    /// Surrounding whitespace is ignored.
    pub fn new(lat: &str, lon: &str) -> Result<Self, CoordinateError> {
        let lat_text = lat.trim();
        let lon_text = lon.trim();

        let lat = parse_finite(lat_text)
            .ok_or_else(|| CoordinateError::InvalidLatitude(lat_text.to_string()))?;
        let lon = parse_finite(lon_text)
            .ok_or_else(|| CoordinateError::InvalidLongitude(lon_text.to_string()))?;

        Ok(Self {
            lat_text: Arc::from(lat_text),
            lon_text: Arc::from(lon_text),
            lat,
            lon,
        })
    }

    /// Latitude, in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude, in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude exactly as it was provided.
    pub fn lat_text(&self) -> &str {
        &self.lat_text
    }

    /// Longitude exactly as it was provided.
    pub fn lon_text(&self) -> &str {
        &self.lon_text
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|x| x.is_finite())
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat_text == other.lat_text && self.lon_text == other.lon_text
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat_text.hash(state);
        self.lon_text.hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lat_text
            .cmp(&other.lat_text)
            .then_with(|| self.lon_text.cmp(&other.lon_text))
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Parses a whitespace-separated `"<latitude> <longitude>"` pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => Self::new(lat, lon),
            _ => Err(CoordinateError::Malformed(s.to_string())),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat_text, self.lon_text)
    }
}

/// Represents a one-way connection between two [Coordinates](Coordinate)
/// along a named street.
///
/// A two-way street segment is represented by two opposing Edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: Coordinate,
    pub to: Coordinate,
    pub street: Arc<str>,
}

impl Edge {
    pub fn new(from: Coordinate, to: Coordinate, street: impl Into<Arc<str>>) -> Self {
        Self {
            from,
            to,
            street: street.into(),
        }
    }

    /// Returns the same segment, traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            street: self.street.clone(),
        }
    }

    /// Great-circle length of the edge, in miles.
    pub fn length(&self) -> f64 {
        earth_distance_miles(&self.from, &self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_equality_uses_text() {
        let a = Coordinate::new("34.05", "-118.25").unwrap();
        let b = Coordinate::new(" 34.05 ", "-118.25\t").unwrap();
        let c = Coordinate::new("34.0500", "-118.25").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.lat(), c.lat());
        assert_eq!(hash_coordinate(&a), hash_coordinate(&b));
    }

    #[test]
    fn coordinate_rejects_garbage() {
        assert_eq!(
            Coordinate::new("north", "1.0"),
            Err(CoordinateError::InvalidLatitude("north".to_string()))
        );
        assert_eq!(
            Coordinate::new("1.0", "inf"),
            Err(CoordinateError::InvalidLongitude("inf".to_string()))
        );
        assert_eq!(
            "1.0 2.0 3.0".parse::<Coordinate>(),
            Err(CoordinateError::Malformed("1.0 2.0 3.0".to_string()))
        );
    }

    #[test]
    fn coordinate_from_str() {
        let c: Coordinate = "34.0625329 -118.4470263".parse().unwrap();
        assert_eq!(c.lat_text(), "34.0625329");
        assert_eq!(c.lon_text(), "-118.4470263");
        assert_eq!(c.to_string(), "34.0625329, -118.4470263");
    }

    #[test]
    fn edge_reversed() {
        let a = Coordinate::new("0.0", "0.0").unwrap();
        let b = Coordinate::new("0.0", "0.01").unwrap();
        let e = Edge::new(a.clone(), b.clone(), "Main St");
        let r = e.reversed();

        assert_eq!(r.from, b);
        assert_eq!(r.to, a);
        assert_eq!(&*r.street, "Main St");
        assert_eq!(e.length(), r.length());
    }
}
