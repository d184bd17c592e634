//! Engine Adapters - 引擎适配器
//!
//! - HttpServeEngine: 生产实现，HTTP 调用外部 serve engine
//! - FixedServeEngine: 测试实现，返回固定音频
//! - device: 启动时的计算设备探测

pub mod device;
mod fixed_serve_engine;
mod http_serve_engine;

pub use device::{select_device, Device, DevicePreference};
pub use fixed_serve_engine::FixedServeEngine;
pub use http_serve_engine::{HttpServeEngine, HttpServeEngineConfig};
