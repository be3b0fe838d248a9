//! 服务装配
//!
//! 由配置构建令牌工厂和两个管理器，协作者由调用方注入。

use std::sync::Arc;

use keysmith_config::RecoveryConfig;
use keysmith_ports::{EventDispatcher, NullEventDispatcher};
use tracing::{info, warn};

use crate::application::{ChangePasswordManager, ResetPasswordManager};
use crate::domain::repositories::{Authenticator, TokenRepository, UserRepository};
use crate::domain::token::{DefaultTokenFactory, TokenFactory};

/// 外部协作者
pub struct Collaborators {
    pub user_repo: Arc<dyn UserRepository>,
    pub token_repo: Arc<dyn TokenRepository>,
    pub authenticator: Arc<dyn Authenticator>,
    /// 为空时使用 `NullEventDispatcher`
    pub event_dispatcher: Option<Arc<dyn EventDispatcher>>,
}

/// 装配好的服务
pub struct RecoveryServices {
    pub reset_password: Arc<ResetPasswordManager>,
    pub change_password: Arc<ChangePasswordManager>,
}

impl RecoveryServices {
    pub fn build(config: &RecoveryConfig, collaborators: Collaborators) -> Self {
        let token_factory: Arc<dyn TokenFactory> =
            Arc::new(DefaultTokenFactory::from_config(&config.password_reset));

        let event_dispatcher = collaborators
            .event_dispatcher
            .unwrap_or_else(|| Arc::new(NullEventDispatcher::new()));

        let reset_password = Arc::new(ResetPasswordManager::new(
            collaborators.user_repo.clone(),
            collaborators.token_repo,
            token_factory,
            event_dispatcher.clone(),
        ));

        let change_password = Arc::new(ChangePasswordManager::new(
            collaborators.user_repo,
            collaborators.authenticator,
            event_dispatcher,
        ));

        info!(
            app_name = %config.app_name,
            token_validity_minutes = config.password_reset.token_validity_minutes,
            "Account recovery services ready"
        );

        Self {
            reset_password,
            change_password,
        }
    }
}

/// 按配置初始化日志
///
/// 全局 subscriber 已存在时只记录警告。
pub fn init_telemetry(config: &RecoveryConfig) {
    let telemetry = &config.telemetry;
    if let Err(e) = keysmith_telemetry::init(&telemetry.log_level, telemetry.json_logs) {
        warn!(error = %e, "Tracing subscriber already installed");
    }
}
