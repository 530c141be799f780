use std::sync::Arc;

use wayline::engine::Engine;
use wayline::external::google_maps::GoogleMaps;
use wayline::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let directions = GoogleMaps::from_env().unwrap();
    let engine = Engine::new(Arc::new(directions));

    serve(engine).await;
}
