use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use weighted_roller::{
    config::{run_env, Config},
    create_app,
};

#[tokio::main]
async fn main() {
    let env = run_env();
    let config: Config = Config::load().expect("Failed to load config.");

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::info!(run_env = %env, "Starting weighted roller server...");

    let app = create_app(config.clone());
    tracing::info!("Listening on {}", &config.server.addr);

    let listener = match tokio::net::TcpListener::bind(&config.server.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", &config.server.addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
    }
}
