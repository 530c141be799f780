mod session_api;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::{DirectionsAPI, API};
use crate::entities::RouteSession;

pub struct Engine {
    // sessions are interaction state only, nothing survives a restart
    sessions: Mutex<HashMap<Uuid, RouteSession>>,
    directions: Arc<dyn DirectionsAPI + Send + Sync>,
}

impl Engine {
    pub fn new(directions: Arc<dyn DirectionsAPI + Send + Sync>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            directions,
        }
    }
}

impl API for Engine {}
