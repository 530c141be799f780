use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Coordinates, RouteSession};
use crate::error::Error;
use crate::external::google_maps::DirectionsResponse;

#[async_trait]
pub trait SessionAPI {
    async fn create_session(&self) -> Result<RouteSession, Error>;

    async fn find_session(&self, id: Uuid) -> Result<RouteSession, Error>;

    async fn tap(&self, id: Uuid, coordinates: Coordinates) -> Result<RouteSession, Error>;

    async fn reset_session(&self, id: Uuid) -> Result<RouteSession, Error>;
}

#[async_trait]
pub trait DirectionsAPI {
    async fn fetch_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<DirectionsResponse, Error>;
}

pub trait API: SessionAPI {}
