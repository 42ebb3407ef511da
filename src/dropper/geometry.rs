//! 坐标映射模块
//!
//! 将屏幕上的点击位置换算为图片原始分辨率下的像素坐标。
//!
//! # 设计思路
//!
//! - 纯函数：输入为点击点、渲染矩形与原始尺寸，输出唯一像素坐标。
//! - X/Y 两轴各自计算缩放比例，渲染尺寸不要求与原图保持宽高比。
//! - 先算理想坐标（向下取整），再做边界收敛，保证结果始终落在 `[0, 尺寸-1]`。
//!
//! # 边界策略
//!
//! 点击恰好落在右/下边缘时，`floor(dx * scale)` 等于原始尺寸，收敛为 `尺寸 - 1`；
//! 渲染矩形外侧的点击同样收敛到最近的边缘像素。

use serde::{Deserialize, Serialize};

use super::PickError;

/// 屏幕坐标系下的点击位置。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickPoint {
    pub x: f64,
    pub y: f64,
}

impl ClickPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 图片当前在屏幕上的渲染矩形。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayGeometry {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// 校验渲染矩形：偏移必须为有限值，宽高必须为正的有限值。
    pub fn validate(&self) -> Result<(), PickError> {
        if !self.left.is_finite() || !self.top.is_finite() {
            return Err(PickError::InvalidGeometry(format!(
                "渲染偏移不是有限数值：({}, {})",
                self.left, self.top
            )));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(PickError::InvalidGeometry(format!("渲染宽度必须大于 0：{}", self.width)));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(PickError::InvalidGeometry(format!("渲染高度必须大于 0：{}", self.height)));
        }
        Ok(())
    }
}

/// 原始分辨率下的像素坐标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoordinate {
    pub x: u32,
    pub y: u32,
}

impl PixelCoordinate {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// 将点击位置映射为原始分辨率下的像素坐标。
///
/// # 参数
/// * `click`         - 屏幕坐标系下的点击位置
/// * `geometry`      - 图片的渲染矩形
/// * `native_width`  - 图片原始宽度（像素）
/// * `native_height` - 图片原始高度（像素）
///
/// # 返回
/// 满足 `x < native_width`、`y < native_height` 的像素坐标；
/// 渲染宽高非正、坐标非有限值或原始尺寸为 0 时返回 `InvalidGeometry`。
///
/// # 示例
/// ```rust
/// use color_dropper::dropper::{map_click_to_pixel, ClickPoint, DisplayGeometry, PixelCoordinate};
///
/// let geometry = DisplayGeometry::new(10.0, 10.0, 100.0, 50.0);
/// let pixel = map_click_to_pixel(ClickPoint::new(60.0, 35.0), geometry, 200, 100)?;
/// assert_eq!(pixel, PixelCoordinate::new(100, 50));
/// # Ok::<(), color_dropper::dropper::PickError>(())
/// ```
pub fn map_click_to_pixel(
    click: ClickPoint,
    geometry: DisplayGeometry,
    native_width: u32,
    native_height: u32,
) -> Result<PixelCoordinate, PickError> {
    geometry.validate()?;

    if !click.x.is_finite() || !click.y.is_finite() {
        return Err(PickError::InvalidGeometry(format!(
            "点击坐标不是有限数值：({}, {})",
            click.x, click.y
        )));
    }
    if native_width == 0 || native_height == 0 {
        return Err(PickError::InvalidGeometry(format!(
            "原始尺寸不能为 0：{}x{}",
            native_width, native_height
        )));
    }

    let x = map_axis(click.x - geometry.left, geometry.width, native_width)?;
    let y = map_axis(click.y - geometry.top, geometry.height, native_height)?;

    Ok(PixelCoordinate { x, y })
}

/// 单轴映射：`floor(offset * native / rendered)` 后收敛到 `[0, native - 1]`。
fn map_axis(offset: f64, rendered: f64, native: u32) -> Result<u32, PickError> {
    // 次正规数宽高会让缩放比溢出为无穷大
    let scale = f64::from(native) / rendered;
    if !scale.is_finite() {
        return Err(PickError::InvalidGeometry(format!(
            "渲染尺寸过小，缩放比溢出：{} / {}",
            native, rendered
        )));
    }

    let index = (offset * scale).floor();
    let max_index = f64::from(native - 1);

    Ok(index.clamp(0.0, max_index) as u32)
}
