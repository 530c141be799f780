mod location;
mod session;

pub use location::Coordinates;
pub use session::{FailureReason, RenderData, RouteSession, Status};
