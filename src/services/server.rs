use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::achievements::Catalogue;
use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::engine::Engine;
use crate::store::SnapshotStore;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let snapshot_path = std::env::var("SNAPSHOT_PATH")
            .unwrap_or_else(|_| self.config.store.snapshot_path.clone());

        let state = Arc::new(AppState {
            engine: Engine::new(Catalogue::standard(), &self.config.cache),
            store: SnapshotStore::new(&snapshot_path),
            config: self.config.clone(),
        });

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {} (snapshot: {})", addr, snapshot_path);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
