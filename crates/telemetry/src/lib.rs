//! telemetry - 可观测性库

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// 初始化 tracing
///
/// 已有全局 subscriber 时返回错误（测试中多次初始化属于这种情况）。
pub fn init_tracing(log_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
}

/// 按配置选择日志格式
pub fn init(log_level: &str, json: bool) -> Result<(), TryInitError> {
    if json {
        init_tracing_json(log_level)
    } else {
        init_tracing(log_level)
    }
}

/// 初始化 Prometheus metrics
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let _ = init("debug", false);

        // 同一进程内只能有一个全局 subscriber
        assert!(init("debug", true).is_err());
    }

    #[test]
    fn test_metrics_recorder_installs_once() {
        let handle = init_metrics().unwrap();
        metrics::counter!("telemetry_test_total").increment(1);

        assert!(handle.render().contains("telemetry_test_total"));
        assert!(init_metrics().is_err());
    }
}
