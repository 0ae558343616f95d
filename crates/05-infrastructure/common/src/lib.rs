//! # Infrastructure Common
//!
//! 依赖注入引擎各 crate 共享的错误类型与日志初始化。
//!
//! ## 核心内容
//!
//! - [`DependencyError`] - 依赖解析错误
//! - [`ConfigError`] - 配置加载错误
//! - [`init_logging`] - 基于 `tracing-subscriber` 的日志初始化

pub mod errors;
pub mod logging;

pub use errors::*;
pub use logging::*;
