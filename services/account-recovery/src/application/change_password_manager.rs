//! 修改密码管理器
//!
//! 已登录会话的直接改密路径：凭旧密码认证，不涉及令牌。

use std::sync::Arc;

use async_trait::async_trait;
use keysmith_cqrs_core::{Command, CommandHandler};
use keysmith_errors::AppResult;
use keysmith_ports::EventDispatcher;
use secrecy::Secret;
use tracing::{debug, info, warn};

use crate::application::commands::ChangePasswordCommand;
use crate::domain::events::PasswordEvent;
use crate::domain::repositories::{Authenticator, UserRepository};
use crate::infrastructure::observability::metrics;

/// 修改密码管理器
pub struct ChangePasswordManager {
    user_repo: Arc<dyn UserRepository>,
    authenticator: Arc<dyn Authenticator>,
    event_dispatcher: Arc<dyn EventDispatcher>,
}

impl ChangePasswordManager {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        authenticator: Arc<dyn Authenticator>,
        event_dispatcher: Arc<dyn EventDispatcher>,
    ) -> Self {
        Self {
            user_repo,
            authenticator,
            event_dispatcher,
        }
    }

    /// 修改密码
    pub async fn change_password(
        &self,
        username: &str,
        old_password: &Secret<String>,
        new_password: &Secret<String>,
    ) -> AppResult<bool> {
        debug!(username = %username, "Changing password");

        if !self.user_repo.account_exists(username).await? {
            debug!(username = %username, "Unknown account, password unchanged");
            metrics::record_password_change(false);
            return Ok(false);
        }

        if !self.authenticator.authenticate(username, old_password).await? {
            warn!(username = %username, "Old password rejected");
            metrics::record_password_change(false);
            return Ok(false);
        }

        self.user_repo.store_password(username, new_password).await?;

        let event = PasswordEvent::PasswordChanged {
            username: username.to_string(),
        };
        event.dispatch(self.event_dispatcher.as_ref()).await;

        metrics::record_password_change(true);
        info!(username = %username, "Password changed");

        Ok(true)
    }
}

#[async_trait]
impl CommandHandler<ChangePasswordCommand> for ChangePasswordManager {
    async fn handle(&self, command: ChangePasswordCommand) -> AppResult<bool> {
        debug!(command = ChangePasswordCommand::NAME, "Handling command");
        self.change_password(
            &command.username,
            &command.old_password,
            &command.new_password,
        )
        .await
    }
}
