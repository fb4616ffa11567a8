use serde::Deserialize;
use std::{fs, net::SocketAddr, path::PathBuf};

use crate::error::ConfigError;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    pub max_sessions: usize,
    pub log_predictions: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            model_path: PathBuf::from("dt_pipeline.json"),
            max_sessions: 1024,
            log_predictions: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        Ok(serde_json::from_str(&data)?)
    }

    /// `AQI_CONFIG` file first (if set), then individual env overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var("AQI_CONFIG") {
            Ok(path) => Self::load(&path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|k| std::env::var(k).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = var("BIND_ADDR") {
            self.bind_addr = v.parse().map_err(|_| ConfigError::Env { var: "BIND_ADDR", value: v })?;
        } else if let Some(v) = var("PORT") {
            let port: u16 = v.parse().map_err(|_| ConfigError::Env { var: "PORT", value: v })?;
            self.bind_addr.set_port(port);
        }
        if let Some(v) = var("MODEL_PATH") {
            self.model_path = PathBuf::from(v);
        }
        if let Some(v) = var("MAX_SESSIONS") {
            self.max_sessions = v.parse().map_err(|_| ConfigError::Env { var: "MAX_SESSIONS", value: v })?;
        }
        if let Some(v) = var("LOG_PRED") {
            self.log_predictions = v == "1";
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> = pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = AppConfig::default().with_overrides(env(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind_addr.port(), 8080);
    }

    #[test]
    fn env_overrides() {
        let cfg = AppConfig::default()
            .with_overrides(env(&[
                ("PORT", "9000"),
                ("MODEL_PATH", "/models/dt_pipeline.json"),
                ("MAX_SESSIONS", "3"),
                ("LOG_PRED", "1"),
            ]))
            .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.model_path, PathBuf::from("/models/dt_pipeline.json"));
        assert_eq!(cfg.max_sessions, 3);
        assert!(cfg.log_predictions);
    }

    #[test]
    fn bind_addr_wins_over_port() {
        let cfg = AppConfig::default()
            .with_overrides(env(&[("BIND_ADDR", "127.0.0.1:7000"), ("PORT", "9000")]))
            .unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:7000");
    }

    #[test]
    fn bad_env_value_is_an_error() {
        let err = AppConfig::default().with_overrides(env(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn loads_partial_json_file() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let path = tmp.path().join("aqi.json");
        std::fs::write(&path, r#"{"model_path": "models/custom.json", "max_sessions": 10}"#).expect("write");
        let cfg = AppConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.model_path, PathBuf::from("models/custom.json"));
        assert_eq!(cfg.max_sessions, 10);
        assert_eq!(cfg.bind_addr, AppConfig::default().bind_addr);
    }
}
