//! 密码重置管理器
//!
//! 两个入口：
//! - `request_token`: 清空旧令牌、签发新令牌、通过 `tokenIssued` 事件交出明文
//! - `confirm_reset`: 校验令牌、写入新密码、清空该用户全部令牌
//!
//! 所有前置条件不满足的情况（账户不存在、令牌错误或过期）统一返回 `Ok(false)`，
//! 调用方无法区分失败原因。

use std::sync::Arc;

use async_trait::async_trait;
use keysmith_cqrs_core::{Command, CommandHandler};
use keysmith_errors::{AppError, AppResult};
use keysmith_ports::EventDispatcher;
use secrecy::{ExposeSecret, Secret};
use tracing::{debug, info, warn};

use crate::application::commands::{ConfirmResetCommand, RequestResetTokenCommand};
use crate::domain::events::PasswordEvent;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::domain::token::TokenFactory;
use crate::infrastructure::observability::metrics;

/// 密码重置管理器
pub struct ResetPasswordManager {
    user_repo: Arc<dyn UserRepository>,
    token_repo: Arc<dyn TokenRepository>,
    token_factory: Arc<dyn TokenFactory>,
    event_dispatcher: Arc<dyn EventDispatcher>,
}

impl ResetPasswordManager {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn TokenRepository>,
        token_factory: Arc<dyn TokenFactory>,
        event_dispatcher: Arc<dyn EventDispatcher>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            token_factory,
            event_dispatcher,
        }
    }

    /// 申请重置令牌
    ///
    /// 成功时该用户此前的令牌全部作废，只有新令牌有效。
    pub async fn request_token(&self, username: &str) -> AppResult<bool> {
        debug!(username = %username, "Requesting password reset token");

        // 1. 账户必须存在
        if !self.user_repo.account_exists(username).await? {
            debug!(username = %username, "Unknown account, no token issued");
            metrics::record_token_request_rejected();
            return Ok(false);
        }

        // 2. 先生成令牌，哈希失败时不触碰已有数据
        let token = self.token_factory.new_token()?;
        let cleartext = token
            .cleartext()
            .cloned()
            .ok_or_else(|| AppError::internal("Token factory returned a token without cleartext"))?;

        // 3. 作废旧令牌，保存新令牌
        self.token_repo.delete_all_tokens(username).await?;
        self.token_repo.store_token(&token.to_row(username)).await?;

        // 4. 交出明文
        let event = PasswordEvent::TokenIssued {
            username: username.to_string(),
            token: cleartext,
        };
        event.dispatch(self.event_dispatcher.as_ref()).await;

        metrics::record_token_issued();
        info!(
            username = %username,
            expires_at = %token.expires_at(),
            "Password reset token issued"
        );

        Ok(true)
    }

    /// 使用令牌重置密码
    pub async fn confirm_reset(
        &self,
        username: &str,
        token: &Secret<String>,
        new_password: &Secret<String>,
    ) -> AppResult<bool> {
        debug!(username = %username, "Confirming password reset");

        // 1. 账户必须存在
        if !self.user_repo.account_exists(username).await? {
            debug!(username = %username, "Unknown account, reset rejected");
            metrics::record_reset_attempt(false);
            return Ok(false);
        }

        // 2. 任意一条未过期的令牌匹配即可
        if !self.validate_token(username, token).await? {
            warn!(username = %username, "Invalid or expired reset token");
            metrics::record_reset_attempt(false);
            return Ok(false);
        }

        // 3. 写入新密码并通知
        self.user_repo.store_password(username, new_password).await?;

        let event = PasswordEvent::PasswordReset {
            username: username.to_string(),
        };
        event.dispatch(self.event_dispatcher.as_ref()).await;

        // 4. 作废该用户的全部令牌，不只是本次匹配的那条
        self.token_repo.delete_all_tokens(username).await?;

        metrics::record_reset_attempt(true);
        info!(username = %username, "Password reset completed");

        Ok(true)
    }

    async fn validate_token(&self, username: &str, token: &Secret<String>) -> AppResult<bool> {
        let rows = self.token_repo.get_all_tokens(username).await?;
        let candidate = token.expose_secret();

        Ok(rows.iter().any(|row| {
            self.token_factory
                .validator_for(&row.token_hash, row.expires_at)
                .validate(candidate)
        }))
    }
}

#[async_trait]
impl CommandHandler<RequestResetTokenCommand> for ResetPasswordManager {
    async fn handle(&self, command: RequestResetTokenCommand) -> AppResult<bool> {
        debug!(command = RequestResetTokenCommand::NAME, "Handling command");
        self.request_token(&command.username).await
    }
}

#[async_trait]
impl CommandHandler<ConfirmResetCommand> for ResetPasswordManager {
    async fn handle(&self, command: ConfirmResetCommand) -> AppResult<bool> {
        debug!(command = ConfirmResetCommand::NAME, "Handling command");
        self.confirm_reset(&command.username, &command.token, &command.new_password)
            .await
    }
}
