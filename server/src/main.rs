mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::geoserver::GeoServerClient;
use services::store::PgLayerStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = config::Settings::load().expect("failed to load settings");
    let database_url = settings.database_url();

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    let geoserver = GeoServerClient::new(&settings.geo_server).expect("GeoServer client init failed");
    tracing::info!(
        base_url = %settings.geo_server.base_url,
        workspace = %settings.geo_server.workspace,
        inde = settings.inde.enabled,
        "GeoServer client initialized"
    );

    let addr = settings.bind_addr();
    let title = settings.api.title.clone();
    let version = settings.api.version.clone();
    let api_prefix = settings.api.prefix.clone();
    let state = state::AppState::new(settings, Arc::new(PgLayerStore::new(pool, database_url)), Arc::new(geoserver));

    let app = routes::leptos_app(state).expect("failed to build router");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, %title, %version, prefix = %api_prefix, "fauno listening");
    axum::serve(listener, app).await.expect("server failed");
}
