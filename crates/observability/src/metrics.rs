//! Dispatch 指标收集模块
//!
//! 每次分发、每个通道的输出与降级都会计数。未安装 recorder 时为空操作。

use contracts::{Channel, Severity};
use metrics::{counter, histogram};

/// 记录一次分发调用
pub fn record_dispatch(severity: Severity, line_count: usize) {
    counter!(
        "fanlog_dispatch_total",
        "severity" => severity.as_str()
    )
    .increment(1);

    histogram!("fanlog_dispatch_lines").record(line_count as f64);
}

/// 记录通道输出
pub fn record_emission(channel: Channel, count: usize) {
    counter!(
        "fanlog_channel_emissions_total",
        "channel" => channel.as_str()
    )
    .increment(count as u64);
}

/// 记录通道失败后降级为控制台警告
pub fn record_downgrade(channel: Channel) {
    counter!(
        "fanlog_channel_downgrades_total",
        "channel" => channel.as_str()
    )
    .increment(1);
}

/// 记录事件源自动创建
pub fn record_source_created(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("fanlog_event_source_created_total", "status" => status).increment(1);
}
