//! 仓储接口
//!
//! 持久化、认证由外部协作者实现，这里只定义契约。

mod authenticator;
mod token_repository;
mod user_repository;

pub use authenticator::*;
pub use token_repository::*;
pub use user_repository::*;
