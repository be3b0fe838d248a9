//! 基础设施层

pub mod events;
pub mod observability;
pub mod persistence;
