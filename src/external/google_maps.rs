use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::{
    api::DirectionsAPI,
    entities::Coordinates,
    error::{invalid_input_error, upstream_error, Error},
};

const TRAVEL_MODE: &str = "driving";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    pub routes: Vec<Route>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub overview_polyline: OverviewPolyline,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

#[derive(Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    key: String,
}

impl GoogleMaps {
    /// Reads `GOOGLE_MAPS_API_BASE` and `GOOGLE_MAPS_API_KEY`. Requests run
    /// without a timeout unless `GOOGLE_MAPS_TIMEOUT_SECONDS` is set.
    pub fn from_env() -> Result<Self, Error> {
        let api_base = env::var("GOOGLE_MAPS_API_BASE")?;
        let key = env::var("GOOGLE_MAPS_API_KEY")?;

        let mut builder = reqwest::Client::builder();

        if let Ok(seconds) = env::var("GOOGLE_MAPS_TIMEOUT_SECONDS") {
            let seconds: u64 = seconds.parse().map_err(|_| invalid_input_error())?;
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            api_base,
            key,
        })
    }
}

#[async_trait]
impl DirectionsAPI for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn fetch_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<DirectionsResponse, Error> {
        let origin: String = origin.into();
        let destination: String = destination.into();

        let url = format!("https://{}/maps/api/directions/json", self.api_base);

        let res = self
            .client
            .get(url)
            .query(&[("key", self.key.clone())])
            .query(&[("origin", origin)])
            .query(&[("destination", destination)])
            .query(&[("mode", TRAVEL_MODE.to_string())])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: DirectionsResponse = res.json().await?;

        if !(data.status == "OK" || data.status == "ZERO_RESULTS" || data.status == "NOT_FOUND") {
            return Err(upstream_error());
        }

        Ok(data)
    }
}
