//! keysmith-cqrs-core - CQRS 核心库
//!
//! Command trait 与 Command Handler

mod command;

pub use command::*;
