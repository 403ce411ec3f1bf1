// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::{angle_between_lines, angle_of_line, Edge};

/// One of 8 compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    Northeast,
    North,
    Northwest,
    West,
    Southwest,
    South,
    Southeast,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::East => "east",
            Self::Northeast => "northeast",
            Self::North => "north",
            Self::Northwest => "northwest",
            Self::West => "west",
            Self::Southwest => "southwest",
            Self::South => "south",
            Self::Southeast => "southeast",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single navigation instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Follow a street in the given direction for `distance` miles.
    Proceed {
        direction: Direction,
        street: Arc<str>,
        distance: f64,
    },

    /// Turn onto a different street.
    Turn {
        direction: TurnDirection,
        street: Arc<str>,
    },

    /// Hand over an item at the current location.
    Deliver { item: String },
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proceed {
                direction,
                street,
                distance,
            } => write!(f, "Proceed {direction} on {street} for {distance:.2} miles"),
            Self::Turn { direction, street } => write!(f, "Turn {direction} on {street}"),
            Self::Deliver { item } => write!(f, "Deliver {item}"),
        }
    }
}

/// Quantizes a bearing (in degrees, 0° being east and 90° north) into one of
/// 16 slices of 22.5°, and maps pairs of slices onto compass [Directions](Direction).
///
/// East covers the two slices around 0°, that is `[337.5, 360)` and `[0, 22.5)`.
pub fn compass_direction(bearing: f64) -> Direction {
    let slice = (bearing.rem_euclid(360.0) / 22.5).floor() as u32;
    match slice {
        1 | 2 => Direction::Northeast,
        3 | 4 => Direction::North,
        5 | 6 => Direction::Northwest,
        7 | 8 => Direction::West,
        9 | 10 => Direction::Southwest,
        11 | 12 => Direction::South,
        13 | 14 => Direction::Southeast,
        // 0, 15, and 16 from rounding rem_euclid up to 360
        _ => Direction::East,
    }
}

/// Classifies the angle between two consecutive edges (see [angle_between_lines])
/// as a turn. Angles below 1° are considered to be going straight ahead.
pub fn classify_turn(angle: f64) -> Option<TurnDirection> {
    if angle < 1.0 {
        None
    } else if angle < 180.0 {
        Some(TurnDirection::Left)
    } else {
        Some(TurnDirection::Right)
    }
}

/// Converts a route into navigation [Commands](Command), appending them to `commands`.
///
/// Consecutive edges along the same street are merged into a single
/// [Proceed](Command::Proceed) command, heading in the direction of the first edge.
/// Whenever the street changes, a [Turn](Command::Turn) command is inserted,
/// unless the new street continues (nearly) straight ahead.
///
/// Returns the total length of all edges, in miles.
pub fn synthesize_commands(edges: &[Edge], commands: &mut Vec<Command>) -> f64 {
    let mut total = 0.0;
    let mut previous_run_end: Option<&Edge> = None;

    for run in edges.chunk_by(|a, b| a.street == b.street) {
        let first = &run[0];
        let last = &run[run.len() - 1];

        if let Some(previous) = previous_run_end {
            if let Some(direction) = classify_turn(angle_between_lines(previous, first)) {
                commands.push(Command::Turn {
                    direction,
                    street: first.street.clone(),
                });
            }
        }

        let distance: f64 = run.iter().map(Edge::length).sum();
        commands.push(Command::Proceed {
            direction: compass_direction(angle_of_line(first)),
            street: first.street.clone(),
            distance,
        });

        total += distance;
        previous_run_end = Some(last);
    }

    total
}
