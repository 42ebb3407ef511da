//! # 配置模块
//!
//! ## 设计思路
//!
//! 取色链路中所有“可调策略”集中在 `PickerConfig`：明暗判定阈值、输入体积上限、
//! 解码像素/内存上限、栅格缓存容量，以及是否在加载时立即解码。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用配置，阈值取 [`DEFAULT_LIGHT_THRESHOLD`]。
//! - 支持从 JSON 读取（缺省字段回落到默认值），读取后统一走 `validate`。

use serde::{Deserialize, Serialize};

use super::color::DEFAULT_LIGHT_THRESHOLD;
use super::PickError;

/// 取色配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// 感知亮度达到该值（含）即视为浅色，标签使用深色文字。
    pub light_threshold: f64,
    /// 读取原始字节时允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 同时保留的已解码栅格数量。
    pub raster_cache_capacity: usize,
    /// 加载图片时立即解码，而不是等到第一次点击。
    pub eager_rasterize: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            light_threshold: DEFAULT_LIGHT_THRESHOLD,
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            raster_cache_capacity: 1,
            eager_rasterize: false,
        }
    }
}

impl PickerConfig {
    /// 校验配置取值范围。
    pub fn validate(&self) -> Result<(), PickError> {
        if !self.light_threshold.is_finite() || !(0.0..=255.0).contains(&self.light_threshold) {
            return Err(PickError::InvalidConfig(format!(
                "light_threshold 必须在 0~255 之间：{}",
                self.light_threshold
            )));
        }
        if self.max_file_size == 0 {
            return Err(PickError::InvalidConfig("max_file_size 必须大于 0".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(PickError::InvalidConfig("max_decoded_pixels 必须大于 0".to_string()));
        }
        if self.max_decoded_bytes == 0 {
            return Err(PickError::InvalidConfig("max_decoded_bytes 必须大于 0".to_string()));
        }
        if self.raster_cache_capacity == 0 {
            return Err(PickError::InvalidConfig("raster_cache_capacity 不能小于 1".to_string()));
        }
        Ok(())
    }

    /// 从 JSON 文本解析并校验配置。
    ///
    /// # 示例
    /// ```rust
    /// use color_dropper::dropper::PickerConfig;
    ///
    /// let config = PickerConfig::from_json_str(r#"{ "light_threshold": 128.0 }"#)?;
    /// assert_eq!(config.light_threshold, 128.0);
    /// assert_eq!(config.raster_cache_capacity, 1);
    /// # Ok::<(), color_dropper::dropper::PickError>(())
    /// ```
    pub fn from_json_str(content: &str) -> Result<Self, PickError> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| PickError::InvalidConfig(format!("解析配置失败：{}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
