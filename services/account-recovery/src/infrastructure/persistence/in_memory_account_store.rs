//! 内存账户存储
//!
//! 同时实现 `UserRepository`、`TokenRepository` 和 `Authenticator`，
//! 用于测试和嵌入式部署。密码以 argon2 哈希保存。

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use keysmith_errors::{AppError, AppResult};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::repositories::{Authenticator, TokenRepository, TokenRow, UserRepository};
use crate::domain::token::TokenHashingParams;

/// 内存账户存储
pub struct InMemoryAccountStore {
    /// 用户名 -> 密码哈希
    accounts: RwLock<HashMap<String, String>>,
    tokens: RwLock<Vec<TokenRow>>,
    hashing: TokenHashingParams,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::with_hashing(TokenHashingParams::default())
    }

    pub fn with_hashing(hashing: TokenHashingParams) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            tokens: RwLock::new(Vec::new()),
            hashing,
        }
    }

    /// 创建账户（已存在则覆盖密码）
    pub async fn add_account(&self, username: &str, password: &Secret<String>) -> AppResult<()> {
        let hash = self.hash_password(password)?;
        self.accounts.write().await.insert(username.to_string(), hash);
        Ok(())
    }

    /// 当前保存的令牌数量
    pub async fn token_count(&self, username: &str) -> usize {
        self.tokens
            .read()
            .await
            .iter()
            .filter(|row| row.username == username)
            .count()
    }

    fn hash_password(&self, password: &Secret<String>) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .hashing
            .hasher()?
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map_err(|e| AppError::crypto(format!("Failed to hash password: {}", e)))?
            .to_string())
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryAccountStore {
    async fn account_exists(&self, username: &str) -> AppResult<bool> {
        Ok(self.accounts.read().await.contains_key(username))
    }

    async fn store_password(&self, username: &str, password: &Secret<String>) -> AppResult<()> {
        let hash = self.hash_password(password)?;

        let mut accounts = self.accounts.write().await;
        let entry = accounts
            .get_mut(username)
            .ok_or_else(|| AppError::database(format!("Account {} does not exist", username)))?;
        *entry = hash;

        debug!(username = %username, "Password hash replaced");
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for InMemoryAccountStore {
    async fn get_all_tokens(&self, username: &str) -> AppResult<Vec<TokenRow>> {
        Ok(self
            .tokens
            .read()
            .await
            .iter()
            .filter(|row| row.username == username)
            .cloned()
            .collect())
    }

    async fn delete_all_tokens(&self, username: &str) -> AppResult<()> {
        self.tokens.write().await.retain(|row| row.username != username);
        Ok(())
    }

    async fn store_token(&self, row: &TokenRow) -> AppResult<()> {
        self.tokens.write().await.push(row.clone());
        Ok(())
    }
}

#[async_trait]
impl Authenticator for InMemoryAccountStore {
    async fn authenticate(&self, username: &str, password: &Secret<String>) -> AppResult<bool> {
        let accounts = self.accounts.read().await;
        let Some(stored) = accounts.get(username) else {
            return Ok(false);
        };

        let parsed_hash = PasswordHash::new(stored)
            .map_err(|e| AppError::crypto(format!("Stored password hash is invalid: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
            .is_ok())
    }
}
