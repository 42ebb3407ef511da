//! # 取色模块（dropper）
//!
//! ## 设计思路
//!
//! 该模块将“来源加载 → 解码栅格 → 坐标映射 → 像素采样 → 颜色换算”
//! 按职责拆分为多个子模块：
//!
//! - `service`：会话状态（未加载 / 已加载）与最近一次颜色
//! - `handler`：编排单次取色流程
//! - `loader`：文件 / Base64 / 字节加载与签名校验
//! - `pipeline`：解码、像素与内存限制
//! - `cache`：按 `ImageId` 缓存已解码栅格
//! - `raster`：像素缓冲与单点采样
//! - `geometry`：点击坐标 → 原始像素坐标
//! - `color`：十六进制与感知亮度
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! 展示层点击事件 (ClickPoint + DisplayGeometry)
//!    ↓
//! service.rs（会话状态，无图片时返回 NoImage）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ cache.rs → pipeline.rs（首次点击时解码一次）
//!    ├─ geometry.rs（按 X/Y 独立缩放并收敛到边界内）
//!    ├─ raster.rs（读取 RGB，忽略 alpha）
//!    └─ color.rs（#RRGGBB + 明暗判定）
//!    ↓
//! ColorResult 或 PickError
//! ```

mod cache;
mod color;
mod config;
mod error;
mod geometry;
mod handler;
mod loader;
mod pipeline;
mod raster;
mod service;
mod source;

pub use cache::RasterCache;
pub use color::{
    is_light, perceived_luminance, to_hex, ColorResult, Rgb, DARK_LABEL_HEX,
    DEFAULT_LIGHT_THRESHOLD, LIGHT_LABEL_HEX,
};
pub use config::PickerConfig;
pub use error::{PickError, PickErrorPayload};
pub use geometry::{map_click_to_pixel, ClickPoint, DisplayGeometry, PixelCoordinate};
pub use handler::{pick_from_raster, ColorPicker};
pub use pipeline::rasterize;
pub use raster::{sample_pixel, RasterImage};
pub use service::{DropperSession, ViewState};
pub use source::{ImageId, ImageSource, LoadedImage};
