// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Coordinate, Edge};

/// Mean radius of Earth, in kilometers.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_RADIUS_KM: f64 = 6371.0088;

const KM_PER_MILE: f64 = 1.609344;

/// Mean diameter of Earth, in miles.
const EARTH_DIAMETER_MILES: f64 = 2.0 * EARTH_RADIUS_KM / KM_PER_MILE;

/// Calculates the great-circle distance between two [Coordinates](Coordinate)
/// using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in miles.
pub fn earth_distance_miles(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lon1 = a.lon().to_radians();
    let lat2 = b.lat().to_radians();
    let lon2 = b.lon().to_radians();

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1) * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;

    // Rounding may push h slightly above 1 for antipodal points
    EARTH_DIAMETER_MILES * h.sqrt().min(1.0).asin()
}

/// Returns the bearing of an [Edge] in degrees, within `[0, 360)`.
///
/// The angle is measured counter-clockwise from east on a plane with longitude
/// on the x axis and latitude on the y axis: 0° is east, 90° north, 180° west
/// and 270° south.
pub fn angle_of_line(e: &Edge) -> f64 {
    let angle = (e.to.lat() - e.from.lat())
        .atan2(e.to.lon() - e.from.lon())
        .to_degrees();
    normalize_degrees(angle)
}

/// Returns the counter-clockwise angle, in degrees within `[0, 360)`, needed to turn
/// from the bearing of `a` to the bearing of `b`.
///
/// Values just above 0 are slight left turns, values just below 360 are slight right turns.
pub fn angle_between_lines(a: &Edge, b: &Edge) -> f64 {
    normalize_degrees(angle_of_line(b) - angle_of_line(a))
}

fn normalize_degrees(angle: f64) -> f64 {
    let angle = angle.rem_euclid(360.0);
    // rem_euclid may round tiny negative values up to exactly 360
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}
