//! keysmith-config - 配置加载库
//!
//! 加载顺序（后者覆盖前者）：
//! 1. `{config_dir}/default.toml`
//! 2. `{config_dir}/{APP_ENV}.toml`
//! 3. `KEYSMITH_` 前缀的环境变量，嵌套字段用 `__` 分隔
//!    （例如 `KEYSMITH_PASSWORD_RESET__TOKEN_VALIDITY_MINUTES=30`）

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 遥测配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

/// 密码重置配置
///
/// 哈希参数直接对应 argon2 的 m_cost / t_cost / p_cost。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfig {
    #[serde(default = "default_token_validity_minutes")]
    pub token_validity_minutes: i64,
    #[serde(default = "default_hash_memory_kib")]
    pub hash_memory_kib: u32,
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

/// 令牌有效期上限（分钟）：1 年
pub const MAX_TOKEN_VALIDITY_MINUTES: i64 = 365 * 24 * 60;

fn default_token_validity_minutes() -> i64 {
    // 1 天
    24 * 60
}

fn default_hash_memory_kib() -> u32 {
    19 * 1024
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            token_validity_minutes: default_token_validity_minutes(),
            hash_memory_kib: default_hash_memory_kib(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

impl PasswordResetConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOKEN_VALIDITY_MINUTES).contains(&self.token_validity_minutes) {
            return Err(ConfigError::Invalid(format!(
                "password_reset.token_validity_minutes must be in 1..={}, got {}",
                MAX_TOKEN_VALIDITY_MINUTES, self.token_validity_minutes
            )));
        }
        if self.hash_iterations == 0 || self.hash_parallelism == 0 {
            return Err(ConfigError::Invalid(
                "password_reset.hash_iterations and hash_parallelism must be at least 1"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub password_reset: PasswordResetConfig,
}

fn default_app_name() -> String {
    "account-recovery".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_env: default_app_env(),
            telemetry: TelemetryConfig::default(),
            password_reset: PasswordResetConfig::default(),
        }
    }
}

impl RecoveryConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("KEYSMITH_").split("__"))
            .extract()?;

        config.password_reset.validate()?;

        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
