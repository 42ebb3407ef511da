//! # 栅格与采样模块
//!
//! `RasterImage` 是解码后可按坐标寻址的 RGBA 像素缓冲，尺寸恰为原始分辨率。
//! 采样只读取 RGB 三个通道，alpha 通道被忽略（透明像素同样报告其颜色）。

use image::RgbaImage;

use super::{PickError, PixelCoordinate, Rgb};

/// 已解码的图片像素缓冲。
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    /// 由内存中的 RGBA 缓冲构建栅格；零尺寸视为无法解码。
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, PickError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(PickError::Decode(format!("图片尺寸为 0：{}x{}", width, height)));
        }
        Ok(Self { pixels })
    }

    /// 原始宽度（像素）。
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// 原始高度（像素）。
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn contains(&self, coord: PixelCoordinate) -> bool {
        coord.x < self.width() && coord.y < self.height()
    }

    /// 读取单个像素的 RGB 值。
    pub fn sample(&self, coord: PixelCoordinate) -> Result<Rgb, PickError> {
        sample_pixel(self, coord)
    }
}

/// 读取栅格中指定坐标的颜色。
///
/// 越界坐标返回 `OutOfBounds`，此处不再二次收敛。
pub fn sample_pixel(raster: &RasterImage, coord: PixelCoordinate) -> Result<Rgb, PickError> {
    if !raster.contains(coord) {
        return Err(PickError::OutOfBounds {
            x: coord.x,
            y: coord.y,
            width: raster.width(),
            height: raster.height(),
        });
    }

    let [r, g, b, _alpha] = raster.pixels.get_pixel(coord.x, coord.y).0;
    Ok(Rgb::new(r, g, b))
}
