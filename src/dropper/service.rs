//! # 会话层
//!
//! ## 设计思路
//!
//! 界面在“未加载图片”和“已加载图片”两个视图之间切换。`DropperSession` 把这一切换
//! 表示为显式状态 `ViewState`，并持有 `ColorPicker` 与最近一次成功取色的结果：
//!
//! ```text
//!          load(source)            reset()
//!  Empty ───────────────▶ Loaded ─────────▶ Empty
//!                          │  ▲
//!                          └──┘ load(source)：整体替换，旧栅格释放
//! ```
//!
//! ## 实现思路
//!
//! - 加载失败时保持原状态，旧图片与旧颜色都不受影响。
//! - 取色失败时 `last_color` 保持不变，展示层可继续显示上一次的颜色。
//! - `eager_rasterize` 开启时在加载阶段完成解码，解码失败即视为加载失败。

use super::{
    ClickPoint, ColorPicker, ColorResult, DisplayGeometry, ImageId, ImageSource, LoadedImage,
    PickError, PickerConfig,
};

/// 视图状态。
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    /// 尚未加载图片，显示上传区域。
    #[default]
    Empty,
    /// 已加载图片，可点击取色。
    Loaded(LoadedImage),
}

/// 取色会话。
pub struct DropperSession {
    picker: ColorPicker,
    state: ViewState,
    last_color: Option<ColorResult>,
}

impl DropperSession {
    /// 使用默认配置创建会话。
    ///
    /// # 示例
    /// ```rust
    /// use color_dropper::dropper::DropperSession;
    ///
    /// let session = DropperSession::new()?;
    /// assert!(!session.is_loaded());
    /// # Ok::<(), color_dropper::dropper::PickError>(())
    /// ```
    pub fn new() -> Result<Self, PickError> {
        Self::with_config(PickerConfig::default())
    }

    pub fn with_config(config: PickerConfig) -> Result<Self, PickError> {
        Ok(Self {
            picker: ColorPicker::new(config)?,
            state: ViewState::Empty,
            last_color: None,
        })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ViewState::Loaded(_))
    }

    pub fn current_image(&self) -> Option<&LoadedImage> {
        match &self.state {
            ViewState::Loaded(image) => Some(image),
            ViewState::Empty => None,
        }
    }

    /// 最近一次成功取色的结果。
    pub fn last_color(&self) -> Option<&ColorResult> {
        self.last_color.as_ref()
    }

    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    /// 加载新图片并替换当前图片。
    pub fn load(&mut self, source: ImageSource) -> Result<ImageId, PickError> {
        let image = self.picker.load(source)?;

        if self.picker.config().eager_rasterize {
            if let Err(err) = self.picker.raster_for(&image) {
                self.picker.release(image.id());
                log::warn!("⚠️ 图片预解码失败，保持原状态：{}", err);
                return Err(err);
            }
        }

        let id = image.id();
        let previous = std::mem::replace(&mut self.state, ViewState::Loaded(image));
        if let ViewState::Loaded(old) = previous {
            self.picker.release(old.id());
        }
        self.last_color = None;

        log::info!("🖼️ 会话切换到已加载状态 - {}", id);
        Ok(id)
    }

    /// 回到未加载状态，释放栅格与颜色。
    pub fn reset(&mut self) {
        if let ViewState::Loaded(old) = std::mem::take(&mut self.state) {
            self.picker.release(old.id());
            log::info!("🔄 会话已重置 - 释放 {}", old.id());
        }
        self.last_color = None;
    }

    /// 在当前图片上取色；成功后更新 `last_color`。
    pub fn pick(
        &mut self,
        click: ClickPoint,
        geometry: DisplayGeometry,
    ) -> Result<ColorResult, PickError> {
        let ViewState::Loaded(image) = &self.state else {
            return Err(PickError::NoImage);
        };

        match self.picker.pick_color_at(click, geometry, image) {
            Ok(result) => {
                self.last_color = Some(result.clone());
                Ok(result)
            }
            Err(err) => {
                log::warn!("⚠️ 取色失败（{}），保留上一次颜色：{}", err.code(), err);
                Err(err)
            }
        }
    }

    pub fn set_light_threshold(&mut self, threshold: f64) -> Result<(), PickError> {
        self.picker.set_light_threshold(threshold)
    }
}
