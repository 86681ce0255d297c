//! Realty Concierge server binary.
//!
//! Wires configuration, storage adapters, the model gateway and the HTTP API
//! together, then serves until interrupted.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use realty_concierge::adapters::ai::{ModelGateway, OpenAIConfig, OpenAIProvider};
use realty_concierge::adapters::http::{api_router, ChatbotHandlers, SearchHandlers};
use realty_concierge::adapters::memory::{InMemoryConversationStore, InMemoryPropertyRepository};
use realty_concierge::adapters::postgres::{PostgresConversationStore, PostgresPropertyRepository};
use realty_concierge::application::{
    AiSearchHandler, ComposerSettings, EndConversationHandler, GetConversationHandler,
    HandleMessageHandler, ResponseComposer, SweepInactiveHandler,
};
use realty_concierge::config::{AiConfig, AppConfig, DatabaseConfig, ServerConfig};
use realty_concierge::ports::{ConversationStore, PropertyRepository};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = match &config.database {
        Some(database) => Some(connect(database).await?),
        None => None,
    };

    let (store, properties): (Arc<dyn ConversationStore>, Arc<dyn PropertyRepository>) =
        match &pool {
            Some(pool) => (
                Arc::new(PostgresConversationStore::new(pool.clone())),
                Arc::new(PostgresPropertyRepository::new(pool.clone())),
            ),
            None => {
                tracing::warn!("No database configured, using in-memory stores");
                (
                    Arc::new(InMemoryConversationStore::new()),
                    Arc::new(InMemoryPropertyRepository::new()),
                )
            }
        };

    let gateway = build_gateway(&config.ai)?;

    let composer = ResponseComposer::new(properties.clone(), gateway.clone()).with_settings(
        ComposerSettings {
            result_limit: config.dialog.search_result_limit,
            context_turns: config.dialog.context_turns,
        },
    );

    let chatbot = ChatbotHandlers::new(
        Arc::new(HandleMessageHandler::new(store.clone(), composer)),
        Arc::new(GetConversationHandler::new(store.clone())),
        Arc::new(EndConversationHandler::new(store.clone())),
    );
    let search = SearchHandlers::new(Arc::new(AiSearchHandler::new(gateway, properties)));

    let app = api_router(chatbot, search)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let sweeper = SweepInactiveHandler::new(store, config.dialog.retention_days);
    let sweep_interval = config.dialog.sweep_interval();
    let sweep_task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            if let Err(e) = sweeper.handle().await {
                tracing::error!(error = %e, "Inactive conversation sweep failed");
            }
        }
    });

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Realty Concierge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweep_task.abort();
    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("Shutdown complete");

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn connect(database: &DatabaseConfig) -> Result<PgPool, BoxError> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(pool)
}

fn build_gateway(ai: &AiConfig) -> Result<Option<ModelGateway>, BoxError> {
    let Some(api_key) = ai.api_key.as_deref().filter(|_| ai.is_enabled()) else {
        tracing::warn!("No AI API key configured, replies are template-only");
        return Ok(None);
    };

    let provider = OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_base_url(ai.base_url.clone())
            .with_app_name(ai.app_name.clone()),
    )?;

    let mut gateway = ModelGateway::new(Arc::new(provider), ai.model_list())
        .with_temperature(ai.temperature)
        .with_attempt_timeout(ai.attempt_timeout());
    if let Some(max_tokens) = ai.max_tokens {
        gateway = gateway.with_max_tokens(max_tokens);
    }

    tracing::info!(models = ?gateway.models(), "Model gateway enabled");
    Ok(Some(gateway))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<http::HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
