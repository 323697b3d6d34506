use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. Immutable once loaded and
/// pulled into handlers and extractors through `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and which encoders are allowed.
    pub env: Env,
    // Address the HTTP listener binds to.
    pub bind_addr: String,
    // Protection space name sent in the Basic challenge.
    pub realm: String,
    // How seeded passwords are stored and compared.
    pub password_encoding: PasswordEncoding,
    // Serve Swagger UI and the OpenAPI document.
    pub api_docs: bool,
}

/// Env
///
/// Defines the runtime context. Production hardens the configuration: plaintext
/// passwords are refused and logs are emitted as JSON.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// PasswordEncoding
///
/// Selects the `PasswordEncoder` implementation at startup.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PasswordEncoding {
    /// Plaintext storage and comparison. Local testing only.
    NoOp,
    Argon2,
}

impl PasswordEncoding {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "noop" | "plain" | "plaintext" => Some(Self::NoOp),
            "argon2" => Some(Self::Argon2),
            _ => None,
        }
    }
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_REALM: &str = "role-gate";

impl Default for AppConfig {
    /// Safe, non-panicking configuration used for test setup.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            realm: DEFAULT_REALM.to_string(),
            password_encoding: PasswordEncoding::NoOp,
            api_docs: false,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables at startup.
    ///
    /// # Panics
    /// Panics on an unknown `PASSWORD_ENCODER` value, and when the plaintext encoder is
    /// selected in production. The service must not start with plaintext credentials there.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let password_encoding = match env::var("PASSWORD_ENCODER") {
            Ok(value) => PasswordEncoding::parse(&value).unwrap_or_else(|| {
                panic!("FATAL: PASSWORD_ENCODER must be 'noop' or 'argon2', got '{value}'")
            }),
            Err(_) => match env {
                Env::Local => PasswordEncoding::NoOp,
                Env::Production => PasswordEncoding::Argon2,
            },
        };

        if env == Env::Production && password_encoding == PasswordEncoding::NoOp {
            panic!("FATAL: plaintext password encoding is not allowed in production.");
        }

        let api_docs = env::var("API_DOCS")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            env,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            realm: env::var("AUTH_REALM").unwrap_or_else(|_| DEFAULT_REALM.to_string()),
            password_encoding,
            api_docs,
        }
    }
}
