//! Infrastructure Layer - 基础设施层
//!
//! - Engine: serve engine 适配器与设备探测
//! - Audio: WAV 写出

pub mod audio;
pub mod engine;
