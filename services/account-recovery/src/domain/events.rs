//! 密码生命周期事件

use keysmith_ports::{EventContext, EventDispatcher};
use secrecy::{ExposeSecret, Secret};
use tracing::warn;

pub const TOKEN_ISSUED: &str = "tokenIssued";
pub const PASSWORD_RESET: &str = "passwordReset";
pub const PASSWORD_CHANGED: &str = "passwordChanged";

/// 密码生命周期事件
///
/// `TokenIssued` 是唯一携带明文令牌的地方，投递（例如发邮件）由事件消费方负责。
#[derive(Debug, Clone)]
pub enum PasswordEvent {
    TokenIssued {
        username: String,
        token: Secret<String>,
    },
    PasswordReset {
        username: String,
    },
    PasswordChanged {
        username: String,
    },
}

impl PasswordEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TokenIssued { .. } => TOKEN_ISSUED,
            Self::PasswordReset { .. } => PASSWORD_RESET,
            Self::PasswordChanged { .. } => PASSWORD_CHANGED,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Self::TokenIssued { username, .. }
            | Self::PasswordReset { username }
            | Self::PasswordChanged { username } => username,
        }
    }

    /// 分发用的上下文
    pub fn context(&self) -> EventContext {
        let mut context = EventContext::new();
        context.insert("username".to_string(), self.username().to_string());

        if let Self::TokenIssued { token, .. } = self {
            context.insert("token".to_string(), token.expose_secret().clone());
        }

        context
    }

    /// 投递事件；失败只记日志，不中断调用方流程
    pub async fn dispatch(&self, dispatcher: &dyn EventDispatcher) {
        if let Err(e) = dispatcher.fire_event(self.name(), &self.context()).await {
            warn!(
                error = %e,
                event = self.name(),
                username = %self.username(),
                "Event dispatch failed"
            );
        }
    }
}
