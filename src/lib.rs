use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod policy;

// Routing segregated by access tier (Public, Authenticated, Admin).
pub mod routes;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use auth::CredentialVerifier;
pub use config::AppConfig;
pub use directory::{DirectoryState, InMemoryUserDirectory, UserDirectory};
pub use error::AuthError;
pub use models::{Caller, Principal};
pub use password::{EncoderState, PasswordEncoder};
pub use policy::{AccessPolicy, Decision, DenyReason};

/// ApiDoc
///
/// OpenAPI description of the three endpoints, served at `/api-docs/openapi.json`
/// when `AppConfig::api_docs` is set.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::home, handlers::user_home, handlers::admin_home),
    components(schemas(models::ErrorBody)),
    tags((name = "role-gate", description = "Role-guarded welcome pages"))
)]
pub struct ApiDoc;

/// Shared handle to the immutable rule table.
pub type PolicyState = Arc<AccessPolicy>;

/// AppState
///
/// Everything a request needs, built once at startup and shared read-only.
/// There is no global user table: the directory arrives through the verifier.
#[derive(Clone)]
pub struct AppState {
    pub policy: PolicyState,
    pub verifier: CredentialVerifier,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        policy: AccessPolicy,
        directory: DirectoryState,
        encoder: EncoderState,
    ) -> Self {
        let verifier = CredentialVerifier::new(directory, encoder, config.realm.clone());
        Self {
            policy: Arc::new(policy),
            verifier,
            config,
        }
    }

    /// from_config
    ///
    /// Standard wiring: the default rule table and the two seeded users, with
    /// passwords stored through the encoder `config` selects.
    pub fn from_config(config: AppConfig) -> Result<Self, AuthError> {
        let encoder = password::encoder_for(config.password_encoding);
        let directory = InMemoryUserDirectory::seeded(encoder.as_ref())?;
        Ok(Self::new(
            config,
            AccessPolicy::default(),
            Arc::new(directory),
            encoder,
        ))
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for PolicyState {
    fn from_ref(app_state: &AppState) -> PolicyState {
        app_state.policy.clone()
    }
}

impl FromRef<AppState> for CredentialVerifier {
    fn from_ref(app_state: &AppState) -> CredentialVerifier {
        app_state.verifier.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// access_middleware
///
/// Enforces the access policy on every routed request. The `Caller` extractor has
/// already rejected bad credentials with 401; here the ordered rules decide between
/// running the handler, 401 (anonymous on a guarded path) and 403 (wrong role).
async fn access_middleware(
    State(policy): State<PolicyState>,
    State(config): State<AppConfig>,
    caller: Caller,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = request.uri().path().to_owned();

    match policy.evaluate(&path, &caller) {
        Decision::Allow => Ok(next.run(request).await),
        Decision::Deny(DenyReason::Unauthenticated) => {
            tracing::info!(%path, "anonymous request to guarded path");
            Err(AuthError::Unauthenticated {
                realm: config.realm,
            })
        }
        Decision::Deny(DenyReason::Forbidden) => {
            let username = caller.principal().map(|p| p.username.as_str()).unwrap_or("-");
            tracing::warn!(%path, %username, "access denied");
            Err(AuthError::Forbidden)
        }
    }
}

/// create_router
///
/// Assembles the routes, the access middleware and the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    // `route_layer` only wraps matched routes, so unknown paths reach the
    // fallback (404) without being evaluated against the policy.
    let guarded = Router::new()
        .merge(public::public_routes())
        .merge(authenticated::authenticated_routes())
        .merge(admin::admin_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            access_middleware,
        ));

    let mut base_router = Router::new().merge(guarded);

    if state.config.api_docs {
        base_router = base_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let base_router = base_router.fallback(handlers::not_found).with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span with method, uri and the `x-request-id` value, so
/// every log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
