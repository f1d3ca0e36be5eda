//! # Dispatcher
//!
//! 日志分发模块。
//!
//! 负责：
//! - 将输入规范化为行
//! - 按通道阈值过滤
//! - Fan-out 到 console / event log / file / serial
//! - sink 失败降级为 console 警告，不中断分发

pub mod dispatcher;
pub mod error;
pub mod format;
pub mod gate;
pub mod logger;
pub mod normalizer;
pub mod sinks;

pub use contracts::{LogOptions, Messages, Severity};
pub use dispatcher::{create_dispatcher, Dispatcher, DispatcherBuilder, Sinks};
pub use error::DispatcherError;
pub use gate::should_emit;
pub use logger::Logger;
pub use normalizer::normalize;
pub use sinks::{
    AppendFileSink, PortSerialSink, ProcessTerminator, SyslogEventSink, TerminalConsole,
    TracingConsole,
};
