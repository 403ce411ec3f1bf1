// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use crate::CoordinateError;

/// Error which can occur when reading a street map or a deliveries file.
///
/// Line numbers start at 1 and refer to the decompressed content.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    InvalidCoordinate {
        line: usize,
        #[source]
        source: CoordinateError,
    },

    #[error("line {line}: missing segment count for street {street:?}")]
    MissingSegmentCount { line: usize, street: String },

    #[error("line {line}: invalid segment count {text:?}")]
    InvalidSegmentCount { line: usize, text: String },

    #[error("line {line}: expected 4 numbers describing a segment, got {found}")]
    ShortSegment { line: usize, found: usize },

    #[error("street {street:?} declares {expected} segments, but the file ends after {found}")]
    TruncatedStreet {
        street: String,
        expected: usize,
        found: usize,
    },

    #[error("missing depot position")]
    MissingDepot,

    #[error("line {line}: expected \"<latitude> <longitude>:<item>\"")]
    MalformedDelivery { line: usize },

    #[error("line {line}: empty item")]
    EmptyItem { line: usize },
}
