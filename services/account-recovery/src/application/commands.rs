//! 密码相关命令

use keysmith_cqrs_core::Command;
use secrecy::Secret;

/// 申请密码重置令牌
#[derive(Debug, Clone)]
pub struct RequestResetTokenCommand {
    pub username: String,
}

impl Command for RequestResetTokenCommand {
    const NAME: &'static str = "RequestResetToken";

    type Result = bool;
}

/// 使用令牌重置密码
#[derive(Debug, Clone)]
pub struct ConfirmResetCommand {
    pub username: String,
    pub token: Secret<String>,
    pub new_password: Secret<String>,
}

impl Command for ConfirmResetCommand {
    const NAME: &'static str = "ConfirmReset";

    type Result = bool;
}

/// 凭旧密码修改密码
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub username: String,
    pub old_password: Secret<String>,
    pub new_password: Secret<String>,
}

impl Command for ChangePasswordCommand {
    const NAME: &'static str = "ChangePassword";

    type Result = bool;
}
