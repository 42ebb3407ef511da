//! # 栅格缓存模块
//!
//! ## 设计思路
//!
//! 解码只在每张图片的第一次需要时发生一次，之后的点击复用同一块像素缓冲。
//! 缓存以 `ImageId` 为键，由持有它的 `ColorPicker` 独占，不存在全局共享状态。
//!
//! ## 实现思路
//!
//! - 使用 `lru::LruCache`，容量来自 `PickerConfig::raster_cache_capacity`。
//! - 默认容量为 1：新图片解码后旧缓冲被整体替换释放。
//! - 解码失败不写入缓存，同一图片的下一次请求会重新尝试并再次返回失败。
//! - 键包含分配它的取色器实例，序号相同的外来图片不会命中本缓存。

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use super::pipeline::rasterize;
use super::source::{ImageId, LoadedImage};
use super::{PickError, PickerConfig, RasterImage};

pub struct RasterCache {
    entries: LruCache<ImageId, Arc<RasterImage>>,
}

impl RasterCache {
    pub fn new(capacity: usize) -> Result<Self, PickError> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| PickError::InvalidConfig("raster_cache_capacity 不能小于 1".to_string()))?;
        Ok(Self {
            entries: LruCache::new(capacity),
        })
    }

    /// 返回已缓存的栅格；未命中时解码并写入缓存。
    pub fn get_or_rasterize(
        &mut self,
        image: &LoadedImage,
        config: &PickerConfig,
    ) -> Result<Arc<RasterImage>, PickError> {
        if let Some(raster) = self.entries.get(&image.id()) {
            log::debug!("🎯 栅格缓存命中 - {}", image.id());
            return Ok(Arc::clone(raster));
        }

        log::debug!("🧩 栅格缓存未命中，开始解码 - {}", image.id());
        let raster = Arc::new(rasterize(image, config)?);

        if let Some((evicted, _)) = self.entries.push(image.id(), Arc::clone(&raster)) {
            if evicted != image.id() {
                log::debug!("♻️ 栅格缓存淘汰 - {}", evicted);
            }
        }

        Ok(raster)
    }

    pub fn contains(&self, id: ImageId) -> bool {
        self.entries.contains(&id)
    }

    /// 释放指定图片的栅格。
    pub fn release(&mut self, id: ImageId) -> bool {
        let released = self.entries.pop(&id).is_some();
        if released {
            log::debug!("🗑️ 已释放栅格 - {}", id);
        }
        released
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 调整容量；缩容时最久未使用的栅格会被释放。
    pub fn resize(&mut self, capacity: usize) -> Result<(), PickError> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| PickError::InvalidConfig("raster_cache_capacity 不能小于 1".to_string()))?;
        self.entries.resize(capacity);
        Ok(())
    }
}
