//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `STROKECARE_*` environment variables, and an
//! optional configuration file, with the defaults below when none is set.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATABASE_URL: &str = "users.db";
const DEFAULT_MODEL_PATH: &str = "stroke_model.msgpack";
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(Ipv4Addr::LOCALHOST),
    5000,
);
const DEFAULT_POOL_SIZE: u32 = 4;

/// Settings for the `strokecare` server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STROKECARE")]
pub struct AppSettings {
    /// SQLite database file.
    pub database_url: Option<String>,
    /// Serialized classifier artifact.
    pub model_path: Option<PathBuf>,
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
    /// Re-read the model artifact when its modification time advances.
    pub model_hot_reload: Option<bool>,
}

impl AppSettings {
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured pool size; zero is treated as one.
    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE).max(1)
    }

    /// Hot reload is on unless explicitly disabled.
    pub fn model_hot_reload(&self) -> bool {
        self.model_hot_reload.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "STROKECARE_DATABASE_URL",
        "STROKECARE_MODEL_PATH",
        "STROKECARE_BIND_ADDR",
        "STROKECARE_POOL_SIZE",
        "STROKECARE_MODEL_HOT_RELOAD",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("strokecare")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), "users.db");
        assert_eq!(settings.model_path(), PathBuf::from("stroke_model.msgpack"));
        assert_eq!(settings.bind_addr(), "127.0.0.1:5000".parse().expect("addr"));
        assert_eq!(settings.pool_size(), 4);
        assert!(settings.model_hot_reload());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("STROKECARE_DATABASE_URL", Some("/tmp/strokecare.db".to_owned())),
            ("STROKECARE_MODEL_PATH", Some("/models/v2.msgpack".to_owned())),
            ("STROKECARE_BIND_ADDR", Some("0.0.0.0:8080".to_owned())),
            ("STROKECARE_POOL_SIZE", Some("0".to_owned())),
            ("STROKECARE_MODEL_HOT_RELOAD", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), "/tmp/strokecare.db");
        assert_eq!(settings.model_path(), PathBuf::from("/models/v2.msgpack"));
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(settings.pool_size(), 1);
        assert!(!settings.model_hot_reload());
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("true"), true)]
    #[case(Some("false"), false)]
    fn hot_reload_is_enabled_unless_disabled(
        #[case] value: Option<&str>,
        #[case] expected: bool,
    ) {
        let _guard = lock_env([(
            "STROKECARE_MODEL_HOT_RELOAD",
            value.map(str::to_owned),
        )]);

        assert_eq!(load_from_empty_args().model_hot_reload(), expected);
    }
}
