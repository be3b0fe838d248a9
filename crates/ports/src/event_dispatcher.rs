//! Event Dispatcher trait 定义

use std::collections::HashMap;

use async_trait::async_trait;
use keysmith_errors::AppResult;

/// 事件上下文（字段名 -> 字段值）
pub type EventContext = HashMap<String, String>;

/// 事件分发者 trait
///
/// 发出即忘：调用方不关心事件由谁消费、如何投递。
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// 分发具名事件
    async fn fire_event(&self, name: &str, context: &EventContext) -> AppResult<()>;
}

/// 空事件分发者，用于不需要通知的部署
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventDispatcher;

impl NullEventDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventDispatcher for NullEventDispatcher {
    async fn fire_event(&self, _name: &str, _context: &EventContext) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_null_dispatcher_accepts_any_event() {
        let dispatcher: Arc<dyn EventDispatcher> = Arc::new(NullEventDispatcher::new());

        let mut context = EventContext::new();
        context.insert("username".to_string(), "john.doe@example.com".to_string());

        assert!(dispatcher.fire_event("passwordReset", &context).await.is_ok());
        assert!(dispatcher.fire_event("", &EventContext::new()).await.is_ok());
    }
}
