// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod dijkstra;
mod error;

pub use dijkstra::{find_route, Route, Router};
pub use error::RouteError;
