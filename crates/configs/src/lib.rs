use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

/// Which intern repository backs the API.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Loaded once at startup, signups live until the process exits.
    #[default]
    Memory,
    /// JSON document re-read on every request, signups written back.
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            other => Err(anyhow!("unknown storage backend `{other}` (expected memory|file)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::default(), data_file: default_data_file() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_dir")]
    pub dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self { dir: default_frontend_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared password for seeded accounts that have no stored hash.
    /// `None` means those accounts log in by email alone.
    #[serde(default = "default_demo_password")]
    pub demo_password: Option<String>,
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { demo_password: default_demo_password(), min_password_len: default_min_password_len() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_data_file() -> String { "data/database.json".into() }
fn default_frontend_dir() -> String { "frontend".into() }
fn default_demo_password() -> Option<String> { Some("password123".into()) }
fn default_min_password_len() -> usize { 8 }
fn default_log_format() -> String { "compact".into() }

/// `CONFIG_PATH` if set, else `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`) when present, layer environment
    /// overrides on top and validate the result.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = if std::path::Path::new(&config_path()).exists() {
            load_default()?
        } else {
            AppConfig::default()
        };
        cfg.apply_env_overrides(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply overrides from a variable lookup; `std::env::var` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be a port number, got `{port}`"))?;
        }
        if let Some(threads) = lookup("TOKIO_WORKER_THREADS") {
            let parsed = threads
                .trim()
                .parse()
                .map_err(|_| anyhow!("TOKIO_WORKER_THREADS must be a thread count, got `{threads}`"))?;
            self.server.worker_threads = Some(parsed);
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(file) = lookup("DATA_FILE") {
            self.storage.data_file = file;
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            self.frontend.dir = dir;
        }
        if let Some(pw) = lookup("DEMO_PASSWORD") {
            self.auth.demo_password = if pw.is_empty() { None } else { Some(pw) };
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        if self.storage.data_file.trim().is_empty() {
            return Err(anyhow!("storage.data_file must not be empty"));
        }
        if self.frontend.dir.trim().is_empty() {
            self.frontend.dir = default_frontend_dir();
        }
        if self.auth.demo_password.as_deref().is_some_and(|p| p.is_empty()) {
            self.auth.demo_password = None;
        }
        if self.auth.min_password_len == 0 {
            return Err(anyhow!("auth.min_password_len must be >= 1"));
        }
        let format = self.logging.format.trim().to_ascii_lowercase();
        self.logging.format = match format.as_str() {
            "json" => format,
            _ => default_log_format(),
        };
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [storage]
            backend = "file"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert_eq!(cfg.storage.data_file, "data/database.json");
        assert_eq!(cfg.auth.demo_password.as_deref(), Some("password123"));
        assert_eq!(cfg.frontend.dir, "frontend");
    }

    #[test]
    fn env_overrides_take_precedence() {
        let vars: HashMap<&str, &str> = [
            ("SERVER_PORT", "9001"),
            ("STORAGE_BACKEND", "FILE"),
            ("DEMO_PASSWORD", ""),
            ("LOG_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert!(cfg.auth.demo_password.is_none());
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env_overrides(|k| (k == "STORAGE_BACKEND").then(|| "redis".into())).is_err());

        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env_overrides(|k| (k == "SERVER_PORT").then(|| "http".into())).is_err());

        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env_overrides(|k| (k == "TOKIO_WORKER_THREADS").then(|| "many".into())).is_err());
        assert_eq!(cfg.server.worker_threads, Some(4));

        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.storage.data_file = "  ".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn zero_worker_threads_normalized() {
        let mut cfg = AppConfig::default();
        cfg.server.worker_threads = Some(0);
        cfg.server.host = "".into();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.host, "127.0.0.1");
    }
}
