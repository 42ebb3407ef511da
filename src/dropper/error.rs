//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 取色链路（几何映射 → 加载 → 解码 → 采样）的所有失败统一由 `PickError` 承载。
//! 通过 `thiserror` 提供可读错误信息，调用侧可按分支匹配。
//!
//! ## 实现思路
//!
//! - `code()` 输出稳定错误码，`stage()` 标注失败阶段。
//! - `PickErrorPayload` 是展示层使用的结构化错误，可直接序列化。
//! - 所有错误都不可重试：同样的输入会得到同样的失败。

use serde::Serialize;

/// 取色流程统一错误类型。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PickError {
    /// 渲染几何或点击坐标不合法（调用方前置条件被破坏）。
    #[error("几何参数错误：{0}")]
    InvalidGeometry(String),

    /// 图片无法被解码为像素缓冲（空数据、损坏数据、零尺寸）。
    #[error("解码错误：{0}")]
    Decode(String),

    /// 像素坐标落在栅格之外，说明映射与几何不一致。
    #[error("像素坐标越界：({x}, {y}) 不在 {width}x{height} 范围内")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    #[error("文件错误：{0}")]
    FileSystem(String),

    /// 输入体积（文件 / Base64 / 字节）超过 `max_file_size`，在加载阶段拒绝。
    #[error("输入过大：{0}")]
    SourceTooLarge(String),

    /// 解码尺寸或内存超过上限。
    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),

    /// 当前没有已加载的图片。
    #[error("尚未加载图片")]
    NoImage,
}

impl PickError {
    /// 稳定错误码，供展示层做分支或埋点。
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidGeometry(_) => "E_INVALID_GEOMETRY",
            Self::Decode(_) => "E_DECODE",
            Self::OutOfBounds { .. } => "E_OUT_OF_BOUNDS",
            Self::FileSystem(_) => "E_FILE_SYSTEM",
            Self::SourceTooLarge(_) => "E_SOURCE_TOO_LARGE",
            Self::ResourceLimit(_) => "E_RESOURCE_LIMIT",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            Self::NoImage => "E_NO_IMAGE",
        }
    }

    /// 失败发生的阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidGeometry(_) => "geometry",
            Self::FileSystem(_) | Self::SourceTooLarge(_) => "load",
            Self::Decode(_) | Self::ResourceLimit(_) => "decode",
            Self::OutOfBounds { .. } => "sample",
            Self::InvalidConfig(_) => "config",
            Self::NoImage => "session",
        }
    }
}

/// 展示层使用的结构化错误。
#[derive(Debug, Clone, Serialize)]
pub struct PickErrorPayload {
    pub code: &'static str,
    pub stage: &'static str,
    pub message: String,
}

impl From<PickError> for PickErrorPayload {
    fn from(error: PickError) -> Self {
        Self {
            code: error.code(),
            stage: error.stage(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_code_stage_and_message() {
        let payload = PickErrorPayload::from(PickError::OutOfBounds {
            x: 10,
            y: 3,
            width: 10,
            height: 4,
        });

        assert_eq!(payload.code, "E_OUT_OF_BOUNDS");
        assert_eq!(payload.stage, "sample");
        assert!(payload.message.contains("(10, 3)"));
        assert!(payload.message.contains("10x4"));
    }

    #[test]
    fn payload_serializes_as_flat_object() {
        let payload = PickErrorPayload::from(PickError::Decode("图片内容为空".to_string()));
        let json = serde_json::to_value(&payload).expect("serialize payload failed");

        assert_eq!(json["code"], "E_DECODE");
        assert_eq!(json["stage"], "decode");
        assert_eq!(json["message"], "解码错误：图片内容为空");
    }

    #[test]
    fn size_limits_report_the_stage_that_raised_them() {
        assert_eq!(PickError::SourceTooLarge(String::new()).stage(), "load");
        assert_eq!(PickError::ResourceLimit(String::new()).stage(), "decode");
    }

    #[test]
    fn every_variant_has_distinct_code() {
        let errors = [
            PickError::InvalidGeometry(String::new()),
            PickError::Decode(String::new()),
            PickError::OutOfBounds { x: 0, y: 0, width: 0, height: 0 },
            PickError::FileSystem(String::new()),
            PickError::SourceTooLarge(String::new()),
            PickError::ResourceLimit(String::new()),
            PickError::InvalidConfig(String::new()),
            PickError::NoImage,
        ];

        let mut codes: Vec<_> = errors.iter().map(PickError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
