//! Device Selection - 计算设备探测
//!
//! 启动时一次性探测加速器可用性，结果注入引擎构造调用，
//! 之后不再按请求重复探测。无加速器时静默回退到 CPU，
//! 除常规日志外不产生任何警告。

/// 计算设备
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cuda,
    Cpu,
}

impl Device {
    /// 传给引擎加载请求的设备名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cuda => "cuda",
            Self::Cpu => "cpu",
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 设备偏好（来自配置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePreference {
    /// 自动选择最优可用设备
    #[default]
    Auto,
    /// 强制 CPU
    Cpu,
    /// 优先 CUDA
    Cuda,
}

impl DevicePreference {
    /// 从配置字符串解析，无法识别时取 Auto
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cpu" => Self::Cpu,
            "cuda" | "gpu" | "nvidia" => Self::Cuda,
            _ => Self::Auto,
        }
    }
}

/// 按偏好选择设备
///
/// Auto/Cuda 偏好下探测 CUDA 可用性，不可用则回退 CPU。
pub fn select_device(preference: DevicePreference) -> Device {
    match preference {
        DevicePreference::Cpu => {
            tracing::info!("Using CPU device (forced)");
            Device::Cpu
        }
        DevicePreference::Cuda | DevicePreference::Auto => {
            if cuda_available() {
                tracing::info!("Selected CUDA device");
                Device::Cuda
            } else {
                tracing::info!("CUDA not available, using CPU device");
                Device::Cpu
            }
        }
    }
}

/// CUDA 可用性探测
#[cfg(feature = "cuda")]
fn cuda_available() -> bool {
    std::path::Path::new("/proc/driver/nvidia").exists()
        || std::env::var_os("CUDA_VISIBLE_DEVICES").is_some_and(|v| !v.is_empty())
}

#[cfg(not(feature = "cuda"))]
fn cuda_available() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_parse() {
        assert_eq!(DevicePreference::parse("cpu"), DevicePreference::Cpu);
        assert_eq!(DevicePreference::parse("CPU"), DevicePreference::Cpu);
        assert_eq!(DevicePreference::parse("cuda"), DevicePreference::Cuda);
        assert_eq!(DevicePreference::parse("gpu"), DevicePreference::Cuda);
        assert_eq!(DevicePreference::parse("auto"), DevicePreference::Auto);
        assert_eq!(DevicePreference::parse("unknown"), DevicePreference::Auto);
    }

    #[test]
    fn test_forced_cpu() {
        assert_eq!(select_device(DevicePreference::Cpu), Device::Cpu);
    }

    #[test]
    fn test_auto_never_fails() {
        // 结果取决于硬件，但必然落在两者之一
        let device = select_device(DevicePreference::Auto);
        assert!(matches!(device, Device::Cpu | Device::Cuda));
    }

    #[test]
    fn test_device_name() {
        assert_eq!(Device::Cpu.as_str(), "cpu");
        assert_eq!(Device::Cuda.as_str(), "cuda");
    }
}
