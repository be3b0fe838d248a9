//! Command trait 定义

use async_trait::async_trait;
use keysmith_errors::AppResult;

/// Command trait
///
/// `NAME` 用于日志和指标标签，不参与分发。
pub trait Command: Send + Sync {
    const NAME: &'static str;

    type Result: Send;
}

/// Command Handler trait
#[async_trait]
pub trait CommandHandler<C: Command + 'static>: Send + Sync {
    async fn handle(&self, command: C) -> AppResult<C::Result>;
}
