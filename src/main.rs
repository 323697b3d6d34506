use role_gate::{
    AppState,
    config::{AppConfig, Env, PasswordEncoding},
    create_router,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: configuration, logging, user directory and policy wiring, then the
/// HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on invalid or unsafe settings)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "role_gate=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    if config.password_encoding == PasswordEncoding::NoOp {
        tracing::warn!(
            "Passwords are stored and compared in PLAINTEXT. Use PASSWORD_ENCODER=argon2 outside local testing."
        );
    }

    // 3. State assembly: seeded directory, encoder and the default rule table.
    let app_state = AppState::from_config(config.clone())
        .expect("FATAL: Failed to encode the seeded user directory.");

    for rule in app_state.policy.rules() {
        tracing::debug!(
            pattern = rule.pattern.as_str(),
            roles = ?rule.required_roles,
            policy = ?rule.match_policy,
            "access rule loaded"
        );
    }

    // 4. Router and server startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", config.bind_addr);
    if config.api_docs {
        tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");
    }

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
