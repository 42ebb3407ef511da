//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ColorPicker` 只负责流程编排与配置管理，不依赖任何界面状态。
//! 取色链路固定为：
//! 1. 校验渲染几何
//! 2. 取得栅格（缓存命中则直接复用，否则解码一次）
//! 3. 点击坐标 → 原始像素坐标
//! 4. 读取像素
//! 5. 生成十六进制颜色与明暗标签
//!
//! ## 实现思路
//!
//! - 所有操作同步完成，`&mut self` 保证同一时刻只有一个调用方在读写缓存。
//! - 记录 `raster/sample/total` 阶段耗时，便于性能诊断。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::cache::RasterCache;
use super::loader::load_source;
use super::source::{ImageId, ImageSource, LoadedImage};
use super::{
    map_click_to_pixel, sample_pixel, ClickPoint, ColorResult, DisplayGeometry, PickError,
    PickerConfig, RasterImage,
};

/// 在已经构建好的栅格上完成一次取色。
///
/// 纯函数：不触发解码，也不读写缓存。
///
/// # 示例
/// ```rust
/// use color_dropper::dropper::{pick_from_raster, ClickPoint, DisplayGeometry, RasterImage};
/// use image::{Rgba, RgbaImage};
///
/// let mut pixels = RgbaImage::new(10, 10);
/// pixels.put_pixel(5, 5, Rgba([255, 0, 0, 255]));
/// let raster = RasterImage::from_rgba(pixels)?;
///
/// let geometry = DisplayGeometry::new(0.0, 0.0, 20.0, 20.0);
/// let result = pick_from_raster(ClickPoint::new(11.0, 11.0), geometry, &raster, 150.0)?;
/// assert_eq!(result.hex, "#FF0000");
/// # Ok::<(), color_dropper::dropper::PickError>(())
/// ```
pub fn pick_from_raster(
    click: ClickPoint,
    geometry: DisplayGeometry,
    raster: &RasterImage,
    light_threshold: f64,
) -> Result<ColorResult, PickError> {
    let pixel = map_click_to_pixel(click, geometry, raster.width(), raster.height())?;
    let rgb = sample_pixel(raster, pixel)?;
    Ok(ColorResult::from_rgb(rgb, pixel, light_threshold))
}

// 进程内取色器实例编号，写入每个 ImageId
static NEXT_PICKER_TAG: AtomicU64 = AtomicU64::new(1);

/// 取色器。
///
/// 持有配置、栅格缓存与加载序号。
pub struct ColorPicker {
    config: PickerConfig,
    cache: RasterCache,
    tag: u64,
    next_sequence: u64,
}

impl ColorPicker {
    /// 使用给定配置创建取色器；配置非法时返回 `InvalidConfig`。
    ///
    /// # 示例
    /// ```rust
    /// use color_dropper::dropper::{ColorPicker, PickerConfig};
    ///
    /// let picker = ColorPicker::new(PickerConfig::default())?;
    /// assert_eq!(picker.config().light_threshold, 150.0);
    /// # Ok::<(), color_dropper::dropper::PickError>(())
    /// ```
    pub fn new(config: PickerConfig) -> Result<Self, PickError> {
        config.validate()?;
        let cache = RasterCache::new(config.raster_cache_capacity)?;
        Ok(Self {
            config,
            cache,
            tag: NEXT_PICKER_TAG.fetch_add(1, Ordering::Relaxed),
            next_sequence: 1,
        })
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// 调整明暗判定阈值。
    pub fn set_light_threshold(&mut self, threshold: f64) -> Result<(), PickError> {
        let candidate = PickerConfig {
            light_threshold: threshold,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;

        log::info!("⚙️ 已切换明暗阈值：{}", threshold);
        Ok(())
    }

    /// 读取图片并分配新的 `ImageId`，不解码。
    ///
    /// 输入超过 `max_file_size` 时返回 `SourceTooLarge`。
    pub fn load(&mut self, source: ImageSource) -> Result<LoadedImage, PickError> {
        let id = ImageId::new(self.tag, self.next_sequence);
        let image = load_source(id, source, &self.config)?;
        self.next_sequence += 1;
        Ok(image)
    }

    /// 取得图片的栅格，必要时解码一次。
    pub fn raster_for(&mut self, image: &LoadedImage) -> Result<Arc<RasterImage>, PickError> {
        self.cache.get_or_rasterize(image, &self.config)
    }

    /// 释放图片的栅格缓冲。
    pub fn release(&mut self, id: ImageId) -> bool {
        self.cache.release(id)
    }

    pub fn is_rasterized(&self, id: ImageId) -> bool {
        self.cache.contains(id)
    }

    /// 读取点击位置下的像素颜色。
    ///
    /// # 错误
    /// - `InvalidGeometry`：渲染宽高非正或坐标非有限值
    /// - `Decode` / `ResourceLimit`：图片无法解码或超出限制
    /// - `OutOfBounds`：映射结果与栅格不一致
    pub fn pick_color_at(
        &mut self,
        click: ClickPoint,
        geometry: DisplayGeometry,
        image: &LoadedImage,
    ) -> Result<ColorResult, PickError> {
        let total_start = Instant::now();

        geometry.validate()?;

        let raster_start = Instant::now();
        let raster = self.raster_for(image)?;
        let raster_elapsed = raster_start.elapsed();

        let sample_start = Instant::now();
        let result = pick_from_raster(click, geometry, &raster, self.config.light_threshold)?;
        let sample_elapsed = sample_start.elapsed();

        log::debug!(
            "⏱️ 取色耗时 - raster={}ms sample={}us total={}ms",
            raster_elapsed.as_millis(),
            sample_elapsed.as_micros(),
            total_start.elapsed().as_millis()
        );
        log::info!(
            "🎨 取色完成 - {} 像素: ({}, {}) 颜色: {} 浅色: {}",
            image.id(),
            result.pixel.x,
            result.pixel.y,
            result.hex,
            result.is_light
        );

        Ok(result)
    }
}
