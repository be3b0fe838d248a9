//! Account Recovery Metrics
//!
//! 业务指标记录

use metrics::counter;

/// 记录令牌签发
pub fn record_token_issued() {
    counter!("password_reset_tokens_issued_total").increment(1);
}

/// 记录令牌申请被拒（账户不存在）
pub fn record_token_request_rejected() {
    counter!("password_reset_token_requests_rejected_total").increment(1);
}

/// 记录重置尝试
pub fn record_reset_attempt(success: bool) {
    let labels = [("success", success.to_string())];
    counter!("password_reset_attempts_total", &labels).increment(1);
}

/// 记录修改密码尝试
pub fn record_password_change(success: bool) {
    let labels = [("success", success.to_string())];
    counter!("password_changes_total", &labels).increment(1);
}
