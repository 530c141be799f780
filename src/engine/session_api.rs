use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::SessionAPI,
    entities::{Coordinates, FailureReason, RouteSession, Status},
    error::{invalid_input_error, no_route_found_error, Error},
    polyline,
};

#[async_trait]
impl SessionAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_session(&self) -> Result<RouteSession, Error> {
        let session = RouteSession::new();

        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id, session.clone());

        Ok(session)
    }

    #[tracing::instrument(skip(self))]
    async fn find_session(&self, id: Uuid) -> Result<RouteSession, Error> {
        let sessions = self.sessions.lock().await;
        let session = sessions.get(&id).ok_or_else(|| invalid_input_error())?;

        Ok(session.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn tap(&self, id: Uuid, coordinates: Coordinates) -> Result<RouteSession, Error> {
        let (start, destination) = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.get_mut(&id).ok_or_else(|| invalid_input_error())?;

            match &session.status {
                Status::Empty => {
                    session.set_start(coordinates)?;

                    return Ok(session.clone());
                }
                Status::StartSet { .. } => session.begin_fetch(coordinates)?,
                // a third tap is dropped until the session is reset
                _ => return Ok(session.clone()),
            }
        };

        // the session lock is not held across the provider call
        let outcome = self.fetch_route_points(start, destination).await;

        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| invalid_input_error())?;

        let applied = match outcome {
            Ok(route_points) => session.resolve(start, destination, route_points),
            Err(err) => {
                let reason = match err.code {
                    102 | 103 => FailureReason::NoRouteFound,
                    _ => FailureReason::ProviderUnavailable,
                };

                session.fail(start, destination, reason)
            }
        };

        if applied.is_err() {
            // the session was reset mid-fetch
            tracing::warn!(session_id = %id, "discarding stale route outcome");
        }

        Ok(session.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn reset_session(&self, id: Uuid) -> Result<RouteSession, Error> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| invalid_input_error())?;

        session.reset();

        Ok(session.clone())
    }
}

impl Engine {
    async fn fetch_route_points(
        &self,
        start: Coordinates,
        destination: Coordinates,
    ) -> Result<Vec<Coordinates>, Error> {
        let data = self.directions.fetch_directions(start, destination).await?;

        if data.status != "OK" {
            return Err(no_route_found_error());
        }

        let route = data.routes.first().ok_or_else(|| no_route_found_error())?;

        polyline::decode(&route.overview_polyline.points)
    }
}
