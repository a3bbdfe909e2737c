use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use crate::shared::result::Result;

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub sqlite_path: PathBuf,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from("branchx.db"),
            max_connections: 10,
        }
    }
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// RUST_LOG 未设置时使用的过滤级别
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| crate::shared::error::BranchxError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从命令行参数和文件加载配置
    pub fn from_args_and_file(
        config_path: &Path,
        db_path: Option<PathBuf>,
        bind_address: Option<SocketAddr>,
    ) -> Result<Self> {
        // 配置文件不存在时使用默认配置，存在但无法解析则报错
        let mut config = if config_path.exists() {
            Self::from_file(config_path)?
        } else {
            tracing::debug!("Config file {} not found, using defaults", config_path.display());
            Config::default()
        };

        // 命令行参数覆盖配置文件
        if let Some(bind_address) = bind_address {
            config.server.bind_address = bind_address;
        }
        if let Some(db_path) = db_path {
            config.database.sqlite_path = db_path;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err("database.max_connections must be at least 1".to_string().into());
        }
        if self.server.cors_origins.is_empty() {
            return Err("server.cors_origins must not be empty".to_string().into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::BranchxError;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config = Config::from_toml(
            r#"
            [database]
            sqlite_path = "/tmp/branches.db"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.sqlite_path, PathBuf::from("/tmp/branches.db"));
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.bind_address.port(), 8080);
    }

    #[test]
    fn zero_connections_is_rejected() {
        let err = Config::from_toml("[database]\nmax_connections = 0\n").unwrap_err();
        assert!(matches!(err, BranchxError::Config(_)));
    }

    #[test]
    fn cli_overrides_file_values() {
        let missing = Path::new("definitely-not-here.toml");
        let addr: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        let config = Config::from_args_and_file(
            missing,
            Some(PathBuf::from("other.db")),
            Some(addr),
        )
        .unwrap();

        assert_eq!(config.server.bind_address, addr);
        assert_eq!(config.database.sqlite_path, PathBuf::from("other.db"));
    }
}
