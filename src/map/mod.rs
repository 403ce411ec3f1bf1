// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading street maps and delivery lists from text files.
//!
//! A street map is a sequence of street blocks. Each block starts with the name
//! of the street, followed by the number of segments and then one segment per line,
//! given as four decimal numbers: start latitude, start longitude, end latitude
//! and end longitude.
//!
//! ```text
//! 10th Helena Drive
//! 1
//! 34.0547000 -118.4794734 34.0544590 -118.4801137
//! Broadway
//! 2
//! 34.0439000 -118.5011000 34.0440000 -118.5012000
//! 34.0440000 -118.5012000 34.0441000 -118.5013000
//! ```
//!
//! A deliveries file starts with the depot position, followed by one delivery per line:
//!
//! ```text
//! 34.0625329 -118.4470263
//! 34.0712323 -118.4505969:Chicken tenders (Sproul Landing)
//! 34.0687443 -118.4449195:B-Plate salmon (Eng IV)
//! ```
//!
//! Both kinds of files may be compressed with gzip or bzip2.

use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::Path;

use crate::Graph;

mod deliveries;
mod error;
mod streets;

pub use deliveries::Deliveries;
pub use error::Error;

/// Compression of the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    Unknown,

    /// Force uncompressed text
    Plain,

    /// Force [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    Gzip,

    /// Force [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    Bzip2,
}

impl FileFormat {
    /// Guesses the format based on the file extension, returning
    /// [FileFormat::Unknown] if the extension is not recognized.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("gz") => Self::Gzip,
            Some("bz2") => Self::Bzip2,
            _ => Self::Unknown,
        }
    }

    /// Guesses the format based on the first few bytes of the content.
    fn sniff(head: &[u8]) -> Self {
        if head.starts_with(&[0x1f, 0x8b]) {
            Self::Gzip
        } else if head.starts_with(b"BZh") {
            Self::Bzip2
        } else {
            Self::Plain
        }
    }
}

/// Wraps a reader in a buffered decompressor, as per the provided [FileFormat].
fn decompress<'r, R: io::Read + 'r>(
    format: FileFormat,
    mut reader: R,
) -> io::Result<Box<dyn BufRead + 'r>> {
    // A single read may return fewer bytes than the magic numbers span
    let mut head = Vec::with_capacity(3);
    let format = match format {
        FileFormat::Unknown => {
            reader.by_ref().take(3).read_to_end(&mut head)?;
            FileFormat::sniff(&head)
        }
        f => f,
    };
    log::debug!("reading input as {:?}", format);

    let b = io::BufReader::new(io::Cursor::new(head).chain(reader));

    Ok(match format {
        FileFormat::Unknown | FileFormat::Plain => Box::new(b),
        FileFormat::Gzip => Box::new(io::BufReader::new(flate2::read::MultiGzDecoder::new(b))),
        FileFormat::Bzip2 => Box::new(io::BufReader::new(bzip2::read::MultiBzDecoder::new(b))),
    })
}

/// Parse street segments from a reader into a [Graph].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn add_segments_from_io<R: io::Read>(
    g: &mut Graph,
    format: FileFormat,
    reader: R,
) -> Result<(), Error> {
    let r = decompress(format, reader)?;
    streets::add_segments(g, r)
}

/// Parse street segments from a file at the provided path into a [Graph].
pub fn add_segments_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    format: FileFormat,
    path: P,
) -> Result<(), Error> {
    let f = File::open(path)?;
    add_segments_from_io(g, format, f)
}

/// Parse street segments from a static buffer into a [Graph].
pub fn add_segments_from_buffer(
    g: &mut Graph,
    format: FileFormat,
    data: &[u8],
) -> Result<(), Error> {
    add_segments_from_io(g, format, data)
}

/// Parse the depot and delivery requests from a reader.
pub fn read_deliveries_from_io<R: io::Read>(
    format: FileFormat,
    reader: R,
) -> Result<Deliveries, Error> {
    let r = decompress(format, reader)?;
    deliveries::read(r)
}

/// Parse the depot and delivery requests from a file at the provided path.
pub fn read_deliveries_from_file<P: AsRef<Path>>(
    format: FileFormat,
    path: P,
) -> Result<Deliveries, Error> {
    let f = File::open(path)?;
    read_deliveries_from_io(format, f)
}

/// Parse the depot and delivery requests from a static buffer.
pub fn read_deliveries_from_buffer(format: FileFormat, data: &[u8]) -> Result<Deliveries, Error> {
    read_deliveries_from_io(format, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{find_route, Coordinate};

    const SIMPLE: &[u8] = include_bytes!("test_fixtures/simple.txt");
    const SIMPLE_GZ: &[u8] = include_bytes!("test_fixtures/simple.txt.gz");
    const SIMPLE_BZ2: &[u8] = include_bytes!("test_fixtures/simple.txt.bz2");
    const DELIVERIES: &[u8] = include_bytes!("test_fixtures/deliveries.txt");

    fn c(lat: &str, lon: &str) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn check_simple_graph(g: &Graph) {
        assert_eq!(g.len(), 7);
        assert_eq!(g.edge_count(), 10);

        let e = g
            .get_edge(&c("34.0547000", "-118.4794734"), &c("34.0544590", "-118.4801137"))
            .unwrap();
        assert_eq!(&*e.street, "10th Helena Drive");

        let e = g
            .get_edge(&c("34.0441000", "-118.5013000"), &c("34.0440000", "-118.5012000"))
            .unwrap();
        assert_eq!(&*e.street, "Broadway");

        let connector = g.outgoing_edges(&c("34.0441000", "-118.5013000")).unwrap();
        assert_eq!(connector.len(), 3);
    }

    fn load(format: FileFormat, data: &[u8]) -> Graph {
        let mut g = Graph::default();
        add_segments_from_buffer(&mut g, format, data).unwrap();
        g
    }

    #[test]
    fn plain() {
        check_simple_graph(&load(FileFormat::Plain, SIMPLE));
        check_simple_graph(&load(FileFormat::Unknown, SIMPLE));
    }

    #[test]
    fn gzip() {
        check_simple_graph(&load(FileFormat::Gzip, SIMPLE_GZ));
        check_simple_graph(&load(FileFormat::Unknown, SIMPLE_GZ));
    }

    #[test]
    fn bzip2() {
        check_simple_graph(&load(FileFormat::Bzip2, SIMPLE_BZ2));
        check_simple_graph(&load(FileFormat::Unknown, SIMPLE_BZ2));
    }

    /// Reader returning at most one byte per call, like a slow pipe.
    struct Trickle<'a>(&'a [u8]);

    impl io::Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match (self.0.split_first(), buf.first_mut()) {
                (Some((&byte, rest)), Some(slot)) => {
                    *slot = byte;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn detection_with_short_reads() {
        for data in [SIMPLE, SIMPLE_GZ, SIMPLE_BZ2] {
            let mut g = Graph::default();
            add_segments_from_io(&mut g, FileFormat::Unknown, Trickle(data)).unwrap();
            check_simple_graph(&g);
        }

        let d = read_deliveries_from_io(FileFormat::Unknown, Trickle(DELIVERIES)).unwrap();
        assert_eq!(d.requests.len(), 2);
    }

    #[test]
    fn detection_of_tiny_inputs() {
        let mut g = Graph::default();
        add_segments_from_io(&mut g, FileFormat::Unknown, Trickle(b"")).unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn forced_format_mismatch() {
        let mut g = Graph::default();
        let err = add_segments_from_buffer(&mut g, FileFormat::Gzip, SIMPLE).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "unexpected error: {err}");
    }

    #[test]
    fn format_from_path() {
        assert_eq!(FileFormat::from_path("map.txt.gz"), FileFormat::Gzip);
        assert_eq!(FileFormat::from_path("map.txt.bz2"), FileFormat::Bzip2);
        assert_eq!(FileFormat::from_path("map.txt"), FileFormat::Unknown);
        assert_eq!(FileFormat::from_path("map"), FileFormat::Unknown);
    }

    #[test]
    fn route_through_loaded_map() {
        let g = load(FileFormat::Unknown, SIMPLE);
        let deliveries = read_deliveries_from_buffer(FileFormat::Unknown, DELIVERIES).unwrap();

        assert_eq!(deliveries.depot, c("34.0439000", "-118.5011000"));
        assert_eq!(deliveries.requests.len(), 2);

        let route = find_route(&g, &deliveries.depot, &deliveries.requests[0].location).unwrap();
        let streets: Vec<&str> = route.edges.iter().map(|e| &*e.street).collect();
        assert_eq!(streets, vec!["Broadway", "Broadway", "Connector"]);
    }
}
