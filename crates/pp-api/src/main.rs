//! PayPilot backend: natural-language payment parsing, chat agent and
//! cross-chain quote relay over HTTP.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use pp_api::config::ApiConfig;
use pp_api::routes;
use pp_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pp-api starting");

    let config = ApiConfig::load()?;

    if !config.openai.has_api_key() {
        tracing::warn!("OPENAI_API_KEY not set, parse and agent calls will return fallbacks");
    }

    let state = AppState::from_config(&config)?;
    tracing::info!(
        model = %config.openai.model,
        prompt = state.parser.prompt_version(),
        recipient_policy = ?state.agent.policy(),
        "completion client configured"
    );

    let app = routes::build_router_with_origins(state, &config.cors_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
