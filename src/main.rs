use std::sync::Arc;

use anigate::{
    Ctx,
    catalog::{AniLibriaProvider, AuthScheme, CatalogService, KodikProvider},
    config::AppConfig,
    routes,
};
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(filter)
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let catalog = Arc::new(build_catalog(&config));

    let app = routes::router(Ctx::new(catalog.clone()), &config.server.cors_origins);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    catalog.shutdown();
    Ok(())
}

fn build_catalog(config: &AppConfig) -> CatalogService {
    let primary = AniLibriaProvider::new(&config.primary.api_base)
        .with_timeout(config.primary.timeout());
    let catalog = CatalogService::new(Arc::new(primary), config.catalog_config());

    let secondary = &config.secondary;
    if !secondary.enabled {
        info!("Kodik fallback disabled");
        return catalog;
    }

    let auth = KodikProvider::auth_from(
        secondary.bearer_token.as_deref(),
        secondary.csrf_token.as_deref(),
        secondary.api_key.as_deref(),
    );
    if auth == AuthScheme::None {
        warn!("No Kodik credentials configured, requests will be unauthenticated");
    }

    let kodik = KodikProvider::new(&secondary.api_base, auth).with_timeout(secondary.timeout());
    catalog.with_fallback(Arc::new(kodik))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
