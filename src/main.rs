use std::{future::IntoFuture, process, sync::Arc, time::Duration};

use realm_admin::{
    application::{
        error::AppError,
        items::{AdminItemService, ITEM_CATALOG, ItemCatalogCache},
        repos::{CollectionSource, HealthRepo, ItemsWriteRepo},
    },
    cache::CacheConfig,
    config,
    domain::entities::{ItemRecord, ItemTypeRecord},
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState},
        telemetry,
    },
};
use tokio::sync::watch;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let api_state = build_api_state(repositories, &settings);

    let cache_config = api_state.items.cache().config();
    if cache_config.enabled && cache_config.warm_on_startup {
        api_state.items.warm().await;
    }

    serve_http(&settings, api_state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;
    info!(target: "realm_admin::migrate", "migrations applied");
    Ok(())
}

async fn connect(settings: &config::Settings) -> Result<sqlx::PgPool, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(InfraError::from)?;
    Ok(pool)
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let pool = connect(settings).await?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_api_state(repositories: Arc<PostgresRepositories>, settings: &config::Settings) -> ApiState {
    let catalog_source: Arc<dyn CollectionSource<ItemRecord, ItemTypeRecord>> =
        repositories.clone();
    let items_write_repo: Arc<dyn ItemsWriteRepo> = repositories.clone();
    let health_repo: Arc<dyn HealthRepo> = repositories;

    let cache = Arc::new(ItemCatalogCache::new(
        ITEM_CATALOG,
        catalog_source,
        CacheConfig::from(&settings.cache),
    ));

    ApiState {
        items: Arc::new(AdminItemService::new(cache, items_write_repo)),
        health: health_repo,
        default_page_size: settings.api.default_page_size,
    }
}

async fn serve_http(settings: &config::Settings, api_state: ApiState) -> Result<(), AppError> {
    let router = http::build_router(api_state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;
    info!(
        target: "realm_admin::http",
        addr = %settings.server.addr,
        "listening"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        _ = drain_deadline(shutdown_rx, settings.server.graceful_shutdown) => {
            warn!(
                target: "realm_admin::http",
                timeout_secs = settings.server.graceful_shutdown.as_secs(),
                "graceful shutdown timed out; dropping open connections"
            );
        }
    }

    info!(target: "realm_admin::http", "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(target: "realm_admin::http", "shutdown signal received"),
        Err(err) => {
            error!(target: "realm_admin::http", error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    }
}

/// Resolves once shutdown has started and `grace` has elapsed since.
async fn drain_deadline(mut shutdown: watch::Receiver<bool>, grace: Duration) {
    while !*shutdown.borrow() {
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
    tokio::time::sleep(grace).await;
}
