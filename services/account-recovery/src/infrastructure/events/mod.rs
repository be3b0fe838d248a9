//! 事件分发器实现

mod event_dispatcher;

pub use event_dispatcher::*;
