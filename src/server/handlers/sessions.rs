use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::SessionAPI;
use crate::entities::{Coordinates, RenderData};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct TapParams {
    latitude: f64,
    longitude: f64,
}

pub async fn create(Extension(api): Extension<DynAPI>) -> Result<Json<RenderData>, Error> {
    let session = api.create_session().await?;

    Ok(session.render().into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<RenderData>, Error> {
    let session = api.find_session(id).await?;

    Ok(session.render().into())
}

pub async fn tap(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<TapParams>,
) -> Result<Json<RenderData>, Error> {
    let coordinates = Coordinates {
        latitude: params.latitude,
        longitude: params.longitude,
    };

    let session = api.tap(id, coordinates).await?;

    Ok(session.render().into())
}

pub async fn reset(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<RenderData>, Error> {
    let session = api.reset_session(id).await?;

    Ok(session.render().into())
}
