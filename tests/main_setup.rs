use role_gate::{
    AppConfig,
    config::{Env, PasswordEncoding},
};
use serial_test::serial;
use std::{env, panic};

const CONFIG_VARS: [&str; 5] = [
    "APP_ENV",
    "BIND_ADDR",
    "AUTH_REALM",
    "PASSWORD_ENCODER",
    "API_DOCS",
];

// --- Setup/Teardown Utilities ---

/// Runs `test` with the given variables set (and every other config variable
/// cleared), then restores the original environment.
fn run_with_env<T, R>(vars: &[(&str, &str)], test: T) -> std::thread::Result<R>
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = panic::catch_unwind(test);

    unsafe {
        for (key, original_value) in originals {
            match original_value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }

    result
}

// --- Tests ---

#[test]
#[serial]
fn test_local_defaults() {
    let config = run_with_env(&[], AppConfig::load).unwrap();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.realm, "role-gate");
    assert_eq!(config.password_encoding, PasswordEncoding::NoOp);
    assert!(!config.api_docs);
}

#[test]
#[serial]
fn test_overrides_are_read_from_env() {
    let config = run_with_env(
        &[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("AUTH_REALM", "demo"),
            ("PASSWORD_ENCODER", "argon2"),
            ("API_DOCS", "true"),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.realm, "demo");
    assert_eq!(config.password_encoding, PasswordEncoding::Argon2);
    assert!(config.api_docs);
}

#[test]
#[serial]
fn test_production_defaults_to_argon2() {
    let config = run_with_env(&[("APP_ENV", "production")], AppConfig::load).unwrap();

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.password_encoding, PasswordEncoding::Argon2);
}

#[test]
#[serial]
fn test_production_rejects_plaintext_passwords() {
    let result = run_with_env(
        &[("APP_ENV", "production"), ("PASSWORD_ENCODER", "noop")],
        AppConfig::load,
    );
    assert!(
        result.is_err(),
        "Production config loading should panic on the plaintext encoder"
    );
}

#[test]
#[serial]
fn test_unknown_encoder_fails_fast() {
    let result = run_with_env(&[("PASSWORD_ENCODER", "md5")], AppConfig::load);
    assert!(result.is_err());
}

#[test]
fn test_default_config_is_local_plaintext() {
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert_eq!(config.password_encoding, PasswordEncoding::NoOp);
}
