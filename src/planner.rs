// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use log::{debug, info};

use crate::{synthesize_commands, Command, Coordinate, Graph, RouteError, Router};

/// An item to be delivered at a specific location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub location: Coordinate,
    pub item: String,
}

impl DeliveryRequest {
    pub fn new(location: Coordinate, item: impl Into<String>) -> Self {
        Self {
            location,
            item: item.into(),
        }
    }
}

/// Navigation [Commands](Command) for a delivery trip, together with
/// the total distance travelled (in miles).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryPlan {
    pub commands: Vec<Command>,
    pub distance: f64,
}

/// Generates navigation commands for delivering items, starting
/// and ending at a depot.
///
/// Deliveries are made in the order they were requested; no attempt is made
/// to find a shorter ordering.
#[derive(Debug, Clone)]
pub struct DeliveryPlanner<'a> {
    router: Router<'a>,
}

impl<'a> DeliveryPlanner<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            router: Router::new(graph),
        }
    }

    /// Generates a [DeliveryPlan] visiting all requested locations in order,
    /// and then returning to the `depot`.
    ///
    /// Fails with the first [RouteError] encountered on any leg of the trip,
    /// in which case no partial plan is returned. See [DeliveryPlanner::plan_into]
    /// for a variant which retains commands for legs preceding the failure.
    pub fn plan(
        &self,
        depot: &Coordinate,
        requests: &[DeliveryRequest],
    ) -> Result<DeliveryPlan, RouteError> {
        let mut plan = DeliveryPlan::default();
        self.plan_into(depot, requests, &mut plan)?;
        Ok(plan)
    }

    /// Same as [DeliveryPlanner::plan], but appends commands and distance to
    /// an existing [DeliveryPlan].
    ///
    /// On failure, `plan` retains everything appended for the legs preceding
    /// the failed one (including their [Deliver](Command::Deliver) commands).
    /// Callers which require atomicity must discard it.
    pub fn plan_into(
        &self,
        depot: &Coordinate,
        requests: &[DeliveryRequest],
        plan: &mut DeliveryPlan,
    ) -> Result<(), RouteError> {
        let mut current = depot;

        for request in requests {
            self.navigate(current, &request.location, plan)?;

            plan.commands.push(Command::Deliver {
                item: request.item.clone(),
            });
            current = &request.location;
        }

        self.navigate(current, depot, plan)
    }

    /// Appends commands for travelling from `start` to `end`.
    fn navigate(
        &self,
        start: &Coordinate,
        end: &Coordinate,
        plan: &mut DeliveryPlan,
    ) -> Result<(), RouteError> {
        if start == end {
            debug!("already at {}, no need to move", end);
            return Ok(());
        }

        let route = self.router.route(start, end)?;
        let distance = synthesize_commands(&route.edges, &mut plan.commands);
        plan.distance += distance;
        info!("leg from {} to {}: {:.2} mi", start, end, distance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find_route;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-9),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    fn c(lat: &str, lon: &str) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn depot() -> Coordinate {
        c("0", "0")
    }

    fn a() -> Coordinate {
        c("0.001", "0.001")
    }

    fn b() -> Coordinate {
        c("1", "1")
    }

    fn test_graph() -> Graph {
        // depot ─Main─ x ─Elm─ a        b ─Far─ y
        let mut g = Graph::default();
        g.add_segment("Main St", depot(), c("0", "0.001"));
        g.add_segment("Elm St", c("0", "0.001"), a());
        g.add_segment("Far Rd", b(), c("1", "1.001"));
        g
    }

    fn deliveries(commands: &[Command]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Deliver { item } => Some(item.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn no_requests() {
        let g = test_graph();
        let plan = DeliveryPlanner::new(&g).plan(&depot(), &[]).unwrap();
        assert_eq!(plan, DeliveryPlan::default());
    }

    #[test]
    fn single_delivery() {
        let g = test_graph();
        let plan = DeliveryPlanner::new(&g)
            .plan(&depot(), &[DeliveryRequest::new(a(), "book")])
            .unwrap();

        let rendered: Vec<String> = plan.commands.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "Proceed east on Main St for 0.07 miles",
                "Turn left on Elm St",
                "Proceed north on Elm St for 0.07 miles",
                "Deliver book",
                "Proceed south on Elm St for 0.07 miles",
                "Turn right on Main St",
                "Proceed west on Main St for 0.07 miles",
            ]
        );
    }

    #[test]
    fn repeated_location() {
        let g = test_graph();
        let requests = [DeliveryRequest::new(a(), "book"), DeliveryRequest::new(a(), "pen")];
        let plan = DeliveryPlanner::new(&g).plan(&depot(), &requests).unwrap();

        let one_way = find_route(&g, &depot(), &a()).unwrap().distance;
        assert_almost_eq!(plan.distance, 2.0 * one_way);
        assert_eq!(deliveries(&plan.commands), vec!["book", "pen"]);

        // Both deliveries are right next to each other
        let book = plan
            .commands
            .iter()
            .position(|c| matches!(c, Command::Deliver { item } if item == "book"))
            .unwrap();
        assert_eq!(
            plan.commands[book + 1],
            Command::Deliver {
                item: "pen".to_string()
            }
        );
        assert_eq!(book, 3);
        assert_eq!(plan.commands.len(), 8);
    }

    #[test]
    fn delivery_at_depot() {
        let g = test_graph();
        let plan = DeliveryPlanner::new(&g)
            .plan(&depot(), &[DeliveryRequest::new(depot(), "coffee")])
            .unwrap();

        assert_eq!(
            plan.commands,
            vec![Command::Deliver {
                item: "coffee".to_string()
            }]
        );
        assert_eq!(plan.distance, 0.0);
    }

    #[test]
    fn last_delivery_at_depot() {
        let g = test_graph();
        let requests = [DeliveryRequest::new(a(), "book"), DeliveryRequest::new(depot(), "pen")];
        let plan = DeliveryPlanner::new(&g).plan(&depot(), &requests).unwrap();

        let one_way = find_route(&g, &depot(), &a()).unwrap().distance;
        assert_almost_eq!(plan.distance, 2.0 * one_way);
        assert_eq!(deliveries(&plan.commands), vec!["book", "pen"]);
        assert_eq!(
            plan.commands.last(),
            Some(&Command::Deliver {
                item: "pen".to_string()
            })
        );
    }

    #[test]
    fn unreachable_location_keeps_partial_plan() {
        let g = test_graph();
        let requests = [DeliveryRequest::new(a(), "x"), DeliveryRequest::new(b(), "y")];
        let planner = DeliveryPlanner::new(&g);

        let mut plan = DeliveryPlan::default();
        assert_eq!(
            planner.plan_into(&depot(), &requests, &mut plan),
            Err(RouteError::NoRoute)
        );
        assert_eq!(plan.commands.len(), 4);
        assert_eq!(deliveries(&plan.commands), vec!["x"]);
        assert_almost_eq!(plan.distance, find_route(&g, &depot(), &a()).unwrap().distance);

        assert_eq!(planner.plan(&depot(), &requests), Err(RouteError::NoRoute));
    }

    #[test]
    fn invalid_location() {
        let g = test_graph();
        let nowhere = c("5", "5");
        let requests = [DeliveryRequest::new(nowhere.clone(), "x")];

        assert_eq!(
            DeliveryPlanner::new(&g).plan(&depot(), &requests),
            Err(RouteError::InvalidCoordinate(nowhere))
        );
    }

    #[test]
    fn invalid_depot() {
        let g = test_graph();
        let nowhere = c("5", "5");

        // Nothing to route if there are no deliveries
        assert!(DeliveryPlanner::new(&g).plan(&nowhere, &[]).is_ok());

        assert_eq!(
            DeliveryPlanner::new(&g).plan(&nowhere, &[DeliveryRequest::new(a(), "x")]),
            Err(RouteError::InvalidCoordinate(nowhere))
        );
    }
}
