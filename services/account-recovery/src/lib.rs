//! Account Recovery Library
//!
//! 密码重置与修改密码工作流：
//! - `domain`: 令牌、事件、仓储契约
//! - `application`: `ResetPasswordManager` / `ChangePasswordManager` 及命令
//! - `infrastructure`: 内存存储、事件分发器、指标
//! - `bootstrap`: 按配置装配

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;

pub use application::{ChangePasswordManager, ResetPasswordManager};
pub use bootstrap::{Collaborators, RecoveryServices};
