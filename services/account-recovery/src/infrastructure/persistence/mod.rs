//! 持久化实现

mod in_memory_account_store;

pub use in_memory_account_store::*;
