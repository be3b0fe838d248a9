//! 领域层

pub mod events;
pub mod repositories;
pub mod token;
