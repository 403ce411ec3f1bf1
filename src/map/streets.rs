// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io::BufRead;
use std::sync::Arc;

use super::Error;
use crate::{Coordinate, Graph};

/// Numbered, non-blank lines of the input.
pub(super) struct Lines<R: BufRead> {
    inner: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    pub(super) fn new(reader: R) -> Self {
        Self {
            inner: reader.lines(),
            line: 0,
        }
    }

    /// Returns the next line with any content, along with its 1-based number.
    pub(super) fn next_non_blank(&mut self) -> Result<Option<(usize, String)>, Error> {
        for line in self.inner.by_ref() {
            let line = line?;
            self.line += 1;
            if !line.trim().is_empty() {
                return Ok(Some((self.line, line)));
            }
        }
        Ok(None)
    }
}

/// Reads street blocks until the end of input, adding two opposing edges
/// to the graph for every segment.
pub(super) fn add_segments<R: BufRead>(g: &mut Graph, reader: R) -> Result<(), Error> {
    let mut lines = Lines::new(reader);
    let mut streets = 0usize;
    let mut segments = 0usize;

    while let Some((_, name)) = lines.next_non_blank()? {
        let name = name.trim();
        let street: Arc<str> = Arc::from(name);

        let count = match lines.next_non_blank()? {
            Some((line, text)) => {
                let text = text.trim();
                text.parse::<usize>()
                    .map_err(|_| Error::InvalidSegmentCount {
                        line,
                        text: text.to_string(),
                    })?
            }
            None => {
                return Err(Error::MissingSegmentCount {
                    line: lines.line + 1,
                    street: name.to_string(),
                })
            }
        };

        for found in 0..count {
            let Some((line, text)) = lines.next_non_blank()? else {
                return Err(Error::TruncatedStreet {
                    street: name.to_string(),
                    expected: count,
                    found,
                });
            };

            let (a, b) = parse_segment(line, &text)?;
            g.add_segment(street.clone(), a, b);
        }

        streets += 1;
        segments += count;
    }

    log::debug!(
        "loaded {} streets with {} segments, graph has {} coordinates",
        streets,
        segments,
        g.len(),
    );
    Ok(())
}

fn parse_segment(line: usize, text: &str) -> Result<(Coordinate, Coordinate), Error> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(Error::ShortSegment {
            line,
            found: tokens.len(),
        });
    } else if tokens.len() > 4 {
        log::warn!("line {}: ignoring {} extra tokens", line, tokens.len() - 4);
    }

    let a = Coordinate::new(tokens[0], tokens[1])
        .map_err(|source| Error::InvalidCoordinate { line, source })?;
    let b = Coordinate::new(tokens[2], tokens[3])
        .map_err(|source| Error::InvalidCoordinate { line, source })?;
    Ok((a, b))
}
