use thiserror::Error;

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// アプリケーション設定
///
/// 環境変数から読み込む：
/// - `DATABASE_URL`: PostgreSQL接続URL（未設定ならインメモリストア）
/// - `PORT`: 待ち受けポート（デフォルト 3000）
/// - `DATABASE_MAX_CONNECTIONS`: コネクションプールの上限（デフォルト 5）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let port = parse_or(&lookup, "PORT", Self::DEFAULT_PORT)?;
        let max_connections = parse_or(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            Self::DEFAULT_MAX_CONNECTIONS,
        )?;

        Ok(Self {
            database_url,
            port,
            max_connections,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}
