//! 应用层

pub mod change_password_manager;
pub mod commands;
pub mod reset_password_manager;

pub use change_password_manager::ChangePasswordManager;
pub use reset_password_manager::ResetPasswordManager;

#[cfg(test)]
mod test_support;
