//! 密码重置令牌仓储接口

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use keysmith_errors::AppResult;
use serde::{Deserialize, Serialize};

/// 令牌持久化记录
///
/// 同一用户可以有多条记录，直到被消费或被新请求替换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRow {
    /// 用户名
    pub username: String,

    /// 令牌哈希（不存储原始令牌）
    pub token_hash: String,

    /// 过期时间
    pub expires_at: DateTime<Utc>,
}

/// 密码重置令牌仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// 获取用户的全部令牌（顺序不作保证）
    async fn get_all_tokens(&self, username: &str) -> AppResult<Vec<TokenRow>>;

    /// 删除用户的全部令牌
    async fn delete_all_tokens(&self, username: &str) -> AppResult<()>;

    /// 保存令牌
    async fn store_token(&self, row: &TokenRow) -> AppResult<()>;
}
