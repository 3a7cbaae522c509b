use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use capmatch::config::{LoggingSettings, Settings};
use capmatch::routes::{self, matches::AppState};
use capmatch::services::{MatchCache, MatchRepository, PostgresStore, ProfileStore};
use capmatch::MatchOrchestrator;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting Capmatch matching service...");

    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let store: Arc<dyn ProfileStore> = match PostgresStore::from_settings(
        &settings.database.url,
        Some(db_max_conn),
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!("PostgreSQL store initialized (max: {} connections)", db_max_conn);

    let cache = Arc::new(MatchCache::new(settings.cache.max_entries, settings.cache.ttl_secs));

    info!(
        "Match cache initialized ({} entries, TTL: {}s)",
        settings.cache.max_entries, settings.cache.ttl_secs
    );

    let repository = MatchRepository::new(store.clone(), cache);
    let orchestrator = Arc::new(MatchOrchestrator::new(store.clone(), repository.clone()));

    // Build application state
    let app_state = AppState {
        store,
        repository,
        orchestrator,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
