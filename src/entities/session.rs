use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;
use crate::error::{invalid_state_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteSession {
    pub id: Uuid,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Status {
    Empty,
    StartSet {
        start: Coordinates,
    },
    Fetching {
        start: Coordinates,
        destination: Coordinates,
    },
    Resolved {
        start: Coordinates,
        destination: Coordinates,
        route_points: Vec<Coordinates>,
    },
    Failed {
        start: Coordinates,
        destination: Coordinates,
        reason: FailureReason,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FailureReason {
    NoRouteFound,
    ProviderUnavailable,
}

/// The plain data a map view needs to draw the session: two markers and the
/// connecting route line. The service never renders anything itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderData {
    pub id: Uuid,
    pub status: String,
    pub start: Option<Coordinates>,
    pub destination: Option<Coordinates>,
    pub route_points: Vec<Coordinates>,
    pub failure: Option<FailureReason>,
    pub created_at: DateTime<Utc>,
}

impl RouteSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: Status::Empty,
            created_at: Utc::now(),
        }
    }

    pub fn status_string(&self) -> String {
        match &self.status {
            Status::Empty => "EMPTY".to_string(),
            Status::StartSet { start: _ } => "START_SET".to_string(),
            Status::Fetching {
                start: _,
                destination: _,
            } => "FETCHING".to_string(),
            Status::Resolved {
                start: _,
                destination: _,
                route_points: _,
            } => "RESOLVED".to_string(),
            Status::Failed {
                start: _,
                destination: _,
                reason: _,
            } => "FAILED".to_string(),
        }
    }

    pub fn set_start(&mut self, start: Coordinates) -> Result<(), Error> {
        match &self.status {
            Status::Empty => {
                self.status = Status::StartSet { start };

                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    /// Records the destination and moves into the fetching state, handing the
    /// captured pair back so the caller feeds exactly these coordinates into
    /// the directions request rather than re-reading the session later.
    pub fn begin_fetch(
        &mut self,
        destination: Coordinates,
    ) -> Result<(Coordinates, Coordinates), Error> {
        match &self.status {
            Status::StartSet { start } => {
                let start = *start;

                self.status = Status::Fetching { start, destination };

                Ok((start, destination))
            }
            _ => Err(invalid_state_error()),
        }
    }

    /// Completes the fetch for the given pair. The pair must still match the
    /// one being fetched; a stale outcome arriving after a reset (and
    /// possibly a fresh pair of taps) is rejected.
    pub fn resolve(
        &mut self,
        start: Coordinates,
        destination: Coordinates,
        route_points: Vec<Coordinates>,
    ) -> Result<(), Error> {
        match &self.status {
            Status::Fetching {
                start: fetching_start,
                destination: fetching_destination,
            } if *fetching_start == start && *fetching_destination == destination => {
                self.status = Status::Resolved {
                    start,
                    destination,
                    route_points,
                };

                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    pub fn fail(
        &mut self,
        start: Coordinates,
        destination: Coordinates,
        reason: FailureReason,
    ) -> Result<(), Error> {
        match &self.status {
            Status::Fetching {
                start: fetching_start,
                destination: fetching_destination,
            } if *fetching_start == start && *fetching_destination == destination => {
                self.status = Status::Failed {
                    start,
                    destination,
                    reason,
                };

                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    pub fn reset(&mut self) {
        self.status = Status::Empty;
    }

    pub fn render(&self) -> RenderData {
        let (start, destination, route_points, failure) = match &self.status {
            Status::Empty => (None, None, Vec::new(), None),
            Status::StartSet { start } => (Some(*start), None, Vec::new(), None),
            Status::Fetching { start, destination } => {
                (Some(*start), Some(*destination), Vec::new(), None)
            }
            Status::Resolved {
                start,
                destination,
                route_points,
            } => (Some(*start), Some(*destination), route_points.clone(), None),
            Status::Failed {
                start,
                destination,
                reason,
            } => (Some(*start), Some(*destination), Vec::new(), Some(*reason)),
        };

        RenderData {
            id: self.id,
            status: self.status_string(),
            start,
            destination,
            route_points,
            failure,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    #[test]
    fn walks_through_a_successful_route() {
        let start = point(34.0522, -118.2437);
        let destination = point(37.7749, -122.4194);
        let route_points = vec![start, point(35.3733, -119.0187), destination];

        let mut session = RouteSession::new();
        assert_eq!(session.status_string(), "EMPTY");

        session.set_start(start).unwrap();
        assert_eq!(session.status_string(), "START_SET");

        let pair = session.begin_fetch(destination).unwrap();
        assert_eq!(pair, (start, destination));
        assert_eq!(session.status_string(), "FETCHING");

        session
            .resolve(start, destination, route_points.clone())
            .unwrap();
        assert_eq!(session.status_string(), "RESOLVED");

        let data = session.render();
        assert_eq!(data.start, Some(start));
        assert_eq!(data.destination, Some(destination));
        assert_eq!(data.route_points, route_points);
        assert_eq!(data.failure, None);
    }

    #[test]
    fn rejects_a_second_start() {
        let mut session = RouteSession::new();
        session.set_start(point(1.0, 2.0)).unwrap();

        let err = session.set_start(point(3.0, 4.0)).unwrap_err();

        assert_eq!(err.code, 100);
    }

    #[test]
    fn rejects_a_destination_without_a_start() {
        let mut session = RouteSession::new();

        let err = session.begin_fetch(point(1.0, 2.0)).unwrap_err();

        assert_eq!(err.code, 100);
    }

    #[test]
    fn rejects_an_outcome_when_not_fetching() {
        let mut session = RouteSession::new();

        let err = session
            .resolve(point(1.0, 2.0), point(3.0, 4.0), Vec::new())
            .unwrap_err();

        assert_eq!(err.code, 100);
    }

    #[test]
    fn rejects_a_stale_outcome_for_a_different_pair() {
        let mut session = RouteSession::new();
        session.set_start(point(1.0, 2.0)).unwrap();
        session.begin_fetch(point(3.0, 4.0)).unwrap();

        // reset mid-fetch, then a fresh pair starts fetching
        session.reset();
        session.set_start(point(5.0, 6.0)).unwrap();
        session.begin_fetch(point(7.0, 8.0)).unwrap();

        let err = session
            .resolve(point(1.0, 2.0), point(3.0, 4.0), Vec::new())
            .unwrap_err();

        assert_eq!(err.code, 100);
        assert_eq!(session.status_string(), "FETCHING");
    }

    #[test]
    fn records_a_failure_reason() {
        let start = point(1.0, 2.0);
        let destination = point(3.0, 4.0);

        let mut session = RouteSession::new();
        session.set_start(start).unwrap();
        session.begin_fetch(destination).unwrap();
        session
            .fail(start, destination, FailureReason::NoRouteFound)
            .unwrap();

        let data = session.render();
        assert_eq!(data.status, "FAILED");
        assert_eq!(data.failure, Some(FailureReason::NoRouteFound));
        assert_eq!(data.route_points, Vec::new());
    }

    #[test]
    fn resets_from_any_state() {
        let start = point(1.0, 2.0);
        let destination = point(3.0, 4.0);

        let mut fetching = RouteSession::new();
        fetching.set_start(start).unwrap();
        fetching.begin_fetch(destination).unwrap();

        let mut resolved = RouteSession::new();
        resolved.set_start(start).unwrap();
        resolved.begin_fetch(destination).unwrap();
        resolved
            .resolve(start, destination, vec![start, destination])
            .unwrap();

        for session in [&mut fetching, &mut resolved] {
            session.reset();

            assert_eq!(session.status_string(), "EMPTY");

            let data = session.render();
            assert_eq!(data.start, None);
            assert_eq!(data.destination, None);
            assert_eq!(data.route_points, Vec::new());
        }
    }
}
