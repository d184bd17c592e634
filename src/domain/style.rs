//! Style Table - 语音风格映射表
//!
//! 固定的风格名 → 语气描述子句映射，进程启动时定义，全程不可变。
//! 风格名沿用宿主端界面的韩文选项；子句为拼接进系统指令的英文描述。
//!
//! 回退规则: 未知或缺失的风格名静默替换为默认条目，不报错。

/// 默认风格名（따뜻하게 / warmly）
pub const DEFAULT_STYLE: &str = "따뜻하게";

/// 风格名 → 描述子句
const STYLE_ENTRIES: &[(&str, &str)] = &[
    (
        "따뜻하게",
        "Speak in a warm, gentle, and caring tone, like welcoming a guest into your home.",
    ),
    (
        "활기차게",
        "Speak in an energetic, enthusiastic, and lively tone, full of positive energy.",
    ),
    (
        "차분하게",
        "Speak in a calm, composed, and soothing tone, at a relaxed and steady pace.",
    ),
    (
        "전문적으로",
        "Speak in a professional, clear, and trustworthy tone, like an experienced concierge.",
    ),
    (
        "친근하게",
        "Speak in a friendly, casual, and approachable tone, like chatting with a close friend.",
    ),
];

/// 解析后的风格
///
/// `name` 是实际生效的风格名（未知 key 回退后为默认风格名），
/// 输出记录中回显的就是这个值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub name: &'static str,
    pub clause: &'static str,
}

/// 风格表
///
/// 无状态查询入口，所有条目编译期固定。
pub struct StyleTable;

impl StyleTable {
    /// 解析风格名，未知或缺失时回退到默认风格
    pub fn resolve(name: Option<&str>) -> ResolvedStyle {
        let requested = name.unwrap_or(DEFAULT_STYLE);
        Self::lookup(requested).unwrap_or_else(|| {
            tracing::debug!(requested, fallback = DEFAULT_STYLE, "Unknown voice style, using default");
            Self::lookup(DEFAULT_STYLE).expect("default style must exist in table")
        })
    }

    /// 精确查找，不回退
    pub fn lookup(name: &str) -> Option<ResolvedStyle> {
        STYLE_ENTRIES
            .iter()
            .find(|(key, _)| *key == name)
            .map(|&(key, clause)| ResolvedStyle { name: key, clause })
    }

    /// 所有已知风格名
    pub fn known_styles() -> impl Iterator<Item = &'static str> {
        STYLE_ENTRIES.iter().map(|(key, _)| *key)
    }
}
