//! ports - 抽象 trait 层
//!
//! 定义跨服务共享的基础设施接口

mod event_dispatcher;

pub use event_dispatcher::*;
