use std::env;

use pretty_assertions::assert_eq;
use serial_test::serial;
use timeclock::config::Config;

const KEYS: [&str; 8] = [
    "DATABASE_URL",
    "JWT_SECRET",
    "SESSION_TTL_DAYS",
    "BCRYPT_COST",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "CLIENT_BASE_URL",
];

/// Runs `f` with the given variables set and every other config key removed,
/// then restores the previous environment.
fn with_env(vars: &[(&str, &str)], f: impl FnOnce()) {
    let saved: Vec<(&str, Option<String>)> =
        KEYS.iter().map(|k| (*k, env::var(k).ok())).collect();

    unsafe {
        for key in KEYS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    f();

    unsafe {
        for (key, value) in saved {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn defaults_apply_when_nothing_is_set() {
    with_env(&[], || {
        let config = Config::from_env_only().unwrap();

        assert_eq!(config.database_url, None);
        assert_eq!(config.session_ttl_days, 7);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.client_base_url, "http://localhost:3000");
        assert!(!config.is_production());
    });
}

#[test]
#[serial]
fn values_are_read_from_the_environment() {
    with_env(
        &[
            ("DATABASE_URL", "postgres://localhost/timeclock"),
            ("JWT_SECRET", "s3cret"),
            ("SESSION_TTL_DAYS", "14"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("ENVIRONMENT", "production"),
        ],
        || {
            let config = Config::from_env_only().unwrap();

            assert_eq!(
                config.database_url.as_deref(),
                Some("postgres://localhost/timeclock")
            );
            assert_eq!(config.jwt_secret, "s3cret");
            assert_eq!(config.session_ttl_days, 14);
            assert_eq!(config.server_address(), "0.0.0.0:9000");
            assert!(config.is_production());
        },
    );
}

#[test]
#[serial]
fn malformed_numbers_and_empty_database_url_fall_back() {
    with_env(
        &[("PORT", "not-a-port"), ("SESSION_TTL_DAYS", "soon"), ("DATABASE_URL", "")],
        || {
            let config = Config::from_env_only().unwrap();

            assert_eq!(config.port, 8080);
            assert_eq!(config.session_ttl_days, 7);
            assert_eq!(config.database_url, None);
        },
    );
}
