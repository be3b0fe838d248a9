//! 认证接口

use async_trait::async_trait;
use keysmith_errors::AppResult;
use secrecy::Secret;

/// 校验用户名 + 密码
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &Secret<String>) -> AppResult<bool>;
}
