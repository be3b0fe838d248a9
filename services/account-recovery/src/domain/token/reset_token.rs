//! 密码重置令牌

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use keysmith_config::PasswordResetConfig;
use keysmith_errors::{AppError, AppResult};
use rand::Rng;
use secrecy::Secret;

use crate::domain::repositories::TokenRow;

/// 随机秘密长度（字节），32 字节 = 256 位熵
pub const TOKEN_SECRET_BYTES: usize = 32;

/// 令牌哈希的 argon2 成本参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenHashingParams {
    /// 内存开销（KiB）
    pub memory_kib: u32,
    /// 迭代次数
    pub iterations: u32,
    /// 并行度
    pub parallelism: u32,
}

impl TokenHashingParams {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    pub(crate) fn hasher(&self) -> AppResult<Argon2<'static>> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| AppError::crypto(format!("Invalid argon2 params: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for TokenHashingParams {
    fn default() -> Self {
        Self::new(
            Params::DEFAULT_M_COST,
            Params::DEFAULT_T_COST,
            Params::DEFAULT_P_COST,
        )
    }
}

impl From<&PasswordResetConfig> for TokenHashingParams {
    fn from(config: &PasswordResetConfig) -> Self {
        Self::new(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
        )
    }
}

/// 密码重置令牌
///
/// 新建的令牌同时持有哈希和明文；从存储重建的令牌只有哈希和过期时间，
/// 仅用于校验。明文只在签发时通过 `cleartext()` 取出一次用于通知。
#[derive(Debug, Clone)]
pub struct ResetToken {
    /// 令牌哈希（argon2 PHC 字符串）
    token_hash: String,

    /// 明文令牌，仅新建时存在
    cleartext: Option<Secret<String>>,

    /// 过期时间
    expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// 生成新的随机令牌
    pub fn create(validity: Duration, params: &TokenHashingParams) -> AppResult<Self> {
        let secret_bytes: [u8; TOKEN_SECRET_BYTES] = rand::thread_rng().r#gen();

        Self::with_secret(hex::encode(secret_bytes), validity, params)
    }

    /// 用调用方给定的明文创建令牌
    pub fn with_secret(
        secret: impl Into<String>,
        validity: Duration,
        params: &TokenHashingParams,
    ) -> AppResult<Self> {
        let expires_at = Utc::now()
            .checked_add_signed(validity)
            .ok_or_else(|| AppError::config(format!("Token validity out of range: {}", validity)))?;

        let secret = secret.into();
        let salt = SaltString::generate(&mut OsRng);

        let token_hash = params
            .hasher()?
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AppError::crypto(format!("Failed to hash reset token: {}", e)))?
            .to_string();

        Ok(Self {
            token_hash,
            cleartext: Some(Secret::new(secret)),
            expires_at,
        })
    }

    /// 从已存储的哈希和过期时间重建（仅用于校验）
    pub fn reconstruct(token_hash: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_hash: token_hash.into(),
            cleartext: None,
            expires_at,
        }
    }

    pub fn token_hash(&self) -> &str {
        &self.token_hash
    }

    /// 明文令牌；重建的令牌返回 `None`
    pub fn cleartext(&self) -> Option<&Secret<String>> {
        self.cleartext.as_ref()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// 校验候选明文
    pub fn validate(&self, candidate: &str) -> bool {
        self.validate_at(candidate, Utc::now())
    }

    /// 以给定时刻为"现在"校验候选明文，`now == expires_at` 时已失效
    pub fn validate_at(&self, candidate: &str, now: DateTime<Utc>) -> bool {
        // 哈希总是先算，过期和不匹配的耗时一致
        let matches = self.verify_secret(candidate);

        matches && now < self.expires_at
    }

    fn verify_secret(&self, candidate: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.token_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// 检查令牌是否过期
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// 获取剩余有效时间（秒）
    pub fn remaining_seconds(&self) -> i64 {
        let now = Utc::now();
        if now >= self.expires_at {
            0
        } else {
            (self.expires_at - now).num_seconds()
        }
    }

    /// 转换为持久化记录
    pub fn to_row(&self, username: &str) -> TokenRow {
        TokenRow {
            username: username.to_string(),
            token_hash: self.token_hash.clone(),
            expires_at: self.expires_at,
        }
    }

    #[cfg(test)]
    pub(crate) fn cleartext_str(&self) -> Option<&str> {
        use secrecy::ExposeSecret;

        self.cleartext.as_ref().map(|s| s.expose_secret().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_params() -> TokenHashingParams {
        TokenHashingParams::new(1024, 1, 1)
    }

    fn stored_foobar(expires_at: DateTime<Utc>) -> ResetToken {
        let issued = ResetToken::with_secret("foobar", Duration::days(7), &cheap_params()).unwrap();
        ResetToken::reconstruct(issued.token_hash(), expires_at)
    }

    #[test]
    fn test_create_generates_hashed_secret() {
        let token = ResetToken::create(Duration::days(1), &cheap_params()).unwrap();

        let cleartext = token.cleartext_str().unwrap();
        assert_eq!(cleartext.len(), TOKEN_SECRET_BYTES * 2);
        assert!(token.token_hash().starts_with("$argon2id$"));
        assert_ne!(cleartext, token.token_hash());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_create_is_random() {
        let a = ResetToken::create(Duration::days(1), &cheap_params()).unwrap();
        let b = ResetToken::create(Duration::days(1), &cheap_params()).unwrap();

        assert_ne!(a.cleartext_str(), b.cleartext_str());
        assert_ne!(a.token_hash(), b.token_hash());
    }

    #[test]
    fn test_created_token_validates_own_cleartext() {
        let token = ResetToken::create(Duration::days(1), &cheap_params()).unwrap();
        let cleartext = token.cleartext_str().unwrap().to_string();

        assert!(token.validate(&cleartext));
        assert!(!token.validate("not-the-token"));
    }

    #[test]
    fn test_reconstructed_token_has_no_cleartext() {
        let expires_at = Utc::now() + Duration::days(7);
        let token = stored_foobar(expires_at);

        assert!(token.cleartext().is_none());
        assert_eq!(token.expires_at(), expires_at);
    }

    #[test]
    fn test_validates_stored_token() {
        let token = stored_foobar(Utc::now() + Duration::days(7));

        assert!(token.validate("foobar"));
        assert!(!token.validate("barbaz"));
    }

    #[test]
    fn test_expired_token_never_validates() {
        let token = stored_foobar(Utc::now() - Duration::days(7));

        assert!(token.is_expired());
        assert_eq!(token.remaining_seconds(), 0);
        assert!(!token.validate("foobar"));
    }

    #[test]
    fn test_invalid_exactly_at_expiration() {
        let expires_at = Utc::now() + Duration::hours(1);
        let token = stored_foobar(expires_at);

        assert!(!token.validate_at("foobar", expires_at));
        assert!(token.validate_at("foobar", expires_at - Duration::seconds(1)));
    }

    #[test]
    fn test_malformed_hash_does_not_validate() {
        let token = ResetToken::reconstruct("def456", Utc::now() + Duration::days(1));

        assert!(!token.validate("def456"));
    }

    #[test]
    fn test_invalid_params_are_crypto_errors() {
        let result = ResetToken::create(Duration::days(1), &TokenHashingParams::new(1024, 0, 1));

        assert!(matches!(result, Err(AppError::Crypto(_))));
    }

    #[test]
    fn test_out_of_range_validity_is_config_error() {
        let result = ResetToken::create(Duration::MAX, &cheap_params());

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_to_row() {
        let token = ResetToken::create(Duration::minutes(15), &cheap_params()).unwrap();
        let row = token.to_row("john.doe@example.com");

        assert_eq!(row.username, "john.doe@example.com");
        assert_eq!(row.token_hash, token.token_hash());
        assert_eq!(row.expires_at, token.expires_at());
        assert!(token.remaining_seconds() <= 15 * 60);
    }
}
