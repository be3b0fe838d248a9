//! 令牌工厂

use chrono::{DateTime, Duration, Utc};
use keysmith_config::{MAX_TOKEN_VALIDITY_MINUTES, PasswordResetConfig};
use keysmith_errors::AppResult;

use super::{ResetToken, TokenHashingParams};

/// 默认有效期（分钟）：1 天
pub const DEFAULT_TOKEN_VALIDITY_MINUTES: i64 = 24 * 60;

/// 令牌工厂
#[cfg_attr(test, mockall::automock)]
pub trait TokenFactory: Send + Sync {
    /// 签发新令牌（含明文）
    fn new_token(&self) -> AppResult<ResetToken>;

    /// 从存储的哈希和过期时间构建校验用令牌
    fn validator_for(&self, token_hash: &str, expires_at: DateTime<Utc>) -> ResetToken;
}

/// 默认令牌工厂：固定有效期 + argon2 哈希
#[derive(Debug, Clone)]
pub struct DefaultTokenFactory {
    validity: Duration,
    hashing: TokenHashingParams,
}

impl DefaultTokenFactory {
    pub fn new() -> Self {
        Self {
            validity: Duration::minutes(DEFAULT_TOKEN_VALIDITY_MINUTES),
            hashing: TokenHashingParams::default(),
        }
    }

    /// 未经校验的配置也可直接使用，有效期被收敛到 `1..=MAX_TOKEN_VALIDITY_MINUTES`
    pub fn from_config(config: &PasswordResetConfig) -> Self {
        let minutes = config
            .token_validity_minutes
            .clamp(1, MAX_TOKEN_VALIDITY_MINUTES);

        Self {
            validity: Duration::minutes(minutes),
            hashing: TokenHashingParams::from(config),
        }
    }

    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn with_hashing(mut self, hashing: TokenHashingParams) -> Self {
        self.hashing = hashing;
        self
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }
}

impl Default for DefaultTokenFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenFactory for DefaultTokenFactory {
    fn new_token(&self) -> AppResult<ResetToken> {
        ResetToken::create(self.validity, &self.hashing)
    }

    fn validator_for(&self, token_hash: &str, expires_at: DateTime<Utc>) -> ResetToken {
        ResetToken::reconstruct(token_hash, expires_at)
    }
}
