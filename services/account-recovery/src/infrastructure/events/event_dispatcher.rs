//! 事件分发器
//!
//! 空实现见 `keysmith_ports::NullEventDispatcher`。

use std::sync::Arc;

use async_trait::async_trait;
use keysmith_errors::AppResult;
use keysmith_ports::{EventContext, EventDispatcher};
use tokio::sync::RwLock;

/// 不写入日志的上下文字段
const REDACTED_FIELDS: &[&str] = &["token"];

/// 已分发的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub name: String,
    pub context: EventContext,
}

/// 内存事件分发器，记录全部事件
pub struct InMemoryEventDispatcher {
    events: Arc<RwLock<Vec<DispatchedEvent>>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// 获取所有分发的事件
    pub async fn get_events(&self) -> Vec<DispatchedEvent> {
        self.events.read().await.clone()
    }

    /// 按名称获取事件
    pub async fn events_named(&self, name: &str) -> Vec<DispatchedEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.name == name)
            .cloned()
            .collect()
    }

    /// 清空事件
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

impl Default for InMemoryEventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventDispatcher for InMemoryEventDispatcher {
    async fn fire_event(&self, name: &str, context: &EventContext) -> AppResult<()> {
        self.events.write().await.push(DispatchedEvent {
            name: name.to_string(),
            context: context.clone(),
        });
        Ok(())
    }
}

/// 日志事件分发器
///
/// 明文令牌不落日志，只记录字段名。
pub struct LoggingEventDispatcher;

#[async_trait]
impl EventDispatcher for LoggingEventDispatcher {
    async fn fire_event(&self, name: &str, context: &EventContext) -> AppResult<()> {
        let mut fields: Vec<&str> = context.keys().map(String::as_str).collect();
        fields.sort_unstable();

        let visible: Vec<String> = fields
            .iter()
            .map(|field| {
                if REDACTED_FIELDS.contains(field) {
                    format!("{}=[REDACTED]", field)
                } else {
                    format!("{}={}", field, context[*field])
                }
            })
            .collect();

        tracing::info!(event = name, context = %visible.join(" "), "Domain event: {}", name);
        Ok(())
    }
}
