//! 用户仓储接口

use async_trait::async_trait;
use keysmith_errors::AppResult;
use secrecy::Secret;

/// 用户仓储接口
///
/// 账户对核心是不透明的：只检查存在性、替换密码。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 检查账户是否存在
    async fn account_exists(&self, username: &str) -> AppResult<bool>;

    /// 保存新密码（明文交给实现方自行哈希）
    async fn store_password(&self, username: &str, password: &Secret<String>) -> AppResult<()>;
}
