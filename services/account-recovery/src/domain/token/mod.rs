//! 密码重置令牌

mod reset_token;
mod token_factory;

pub use reset_token::*;
pub use token_factory::*;
