// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io::BufRead;

use super::streets::Lines;
use super::Error;
use crate::{Coordinate, DeliveryRequest};

/// Contents of a deliveries file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deliveries {
    /// Where the trip starts and ends.
    pub depot: Coordinate,

    /// Requests, in the order they appear in the file.
    pub requests: Vec<DeliveryRequest>,
}

pub(super) fn read<R: BufRead>(reader: R) -> Result<Deliveries, Error> {
    let mut lines = Lines::new(reader);

    let depot = match lines.next_non_blank()? {
        Some((line, text)) => text
            .parse::<Coordinate>()
            .map_err(|source| Error::InvalidCoordinate { line, source })?,
        None => return Err(Error::MissingDepot),
    };

    let mut requests = Vec::new();
    while let Some((line, text)) = lines.next_non_blank()? {
        requests.push(parse_request(line, &text)?);
    }

    log::debug!("loaded {} delivery requests", requests.len());
    Ok(Deliveries { depot, requests })
}

fn parse_request(line: usize, text: &str) -> Result<DeliveryRequest, Error> {
    let (position, item) = text
        .split_once(':')
        .ok_or(Error::MalformedDelivery { line })?;

    let location = position
        .parse::<Coordinate>()
        .map_err(|source| Error::InvalidCoordinate { line, source })?;

    let item = item.trim();
    if item.is_empty() {
        return Err(Error::EmptyItem { line });
    }

    Ok(DeliveryRequest::new(location, item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoordinateError;

    fn c(lat: &str, lon: &str) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn parse() {
        let d = read(
            "34.0625329 -118.4470263\n\
             34.0712323 -118.4505969:Chicken tenders (Sproul Landing)\n\
             \n\
             34.0687443 -118.4449195: B-Plate salmon: extra crispy \n"
                .as_bytes(),
        )
        .unwrap();

        assert_eq!(d.depot, c("34.0625329", "-118.4470263"));
        assert_eq!(
            d.requests,
            vec![
                DeliveryRequest::new(
                    c("34.0712323", "-118.4505969"),
                    "Chicken tenders (Sproul Landing)"
                ),
                DeliveryRequest::new(
                    c("34.0687443", "-118.4449195"),
                    "B-Plate salmon: extra crispy"
                ),
            ]
        );
    }

    #[test]
    fn depot_only() {
        let d = read("1.5 2.5\n".as_bytes()).unwrap();
        assert_eq!(d.depot, c("1.5", "2.5"));
        assert!(d.requests.is_empty());
    }

    #[test]
    fn missing_depot() {
        assert!(matches!(read("\n \n".as_bytes()), Err(Error::MissingDepot)));
    }

    #[test]
    fn invalid_depot() {
        match read("1.5\n".as_bytes()) {
            Err(Error::InvalidCoordinate { line, source }) => {
                assert_eq!(line, 1);
                assert_eq!(source, CoordinateError::Malformed("1.5".to_string()));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_requests() {
        assert!(matches!(
            read("1 2\n3 4 pizza\n".as_bytes()),
            Err(Error::MalformedDelivery { line: 2 })
        ));
        assert!(matches!(
            read("1 2\n3 4:  \n".as_bytes()),
            Err(Error::EmptyItem { line: 2 })
        ));
        assert!(matches!(
            read("1 2\n3 four:pizza\n".as_bytes()),
            Err(Error::InvalidCoordinate { line: 2, .. })
        ));
    }
}
