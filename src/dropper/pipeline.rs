//! # 解码流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → RGBA 栅格”的过程集中管理，并在完整解码前做尺寸检查，
//! 恶意或超大输入在读取 header 阶段就被拒绝。
//!
//! ## 实现思路
//!
//! 1. 空输入直接拒绝
//! 2. 猜测格式并读取 header 尺寸
//! 3. 零尺寸、像素上限、内存上限快速拒绝
//! 4. 完整解码，并按 EXIF 方向旋转/翻转，栅格与浏览器显示的朝向一致
//! 5. 转换 RGBA，并校验尺寸与字节长度一致性

use std::io::Cursor;
use std::time::Instant;

use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView, ImageDecoder};

use super::source::LoadedImage;
use super::{PickError, PickerConfig, RasterImage};

/// 将已加载的图片解码为像素栅格。
///
/// 任何无法解码的情况（空数据、损坏数据、零尺寸）都返回 `Decode`，不会产出空白栅格。
pub fn rasterize(image: &LoadedImage, config: &PickerConfig) -> Result<RasterImage, PickError> {
    let bytes = image.bytes();
    if bytes.is_empty() {
        return Err(PickError::Decode("图片内容为空".to_string()));
    }

    let start = Instant::now();

    let (header_width, header_height) = inspect_dimensions_from_memory(bytes)?;
    validate_dimensions(header_width, header_height)?;
    validate_pixel_limits(config, header_width, header_height)?;
    validate_decoded_memory_limits(config, header_width, header_height)?;

    let decoded = decode_with_orientation(bytes)?;

    let (width, height) = decoded.dimensions();
    validate_dimensions(width, height)?;
    validate_pixel_limits(config, width, height)?;
    validate_decoded_memory_limits(config, width, height)?;

    let rgba = decoded.to_rgba8();

    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| PickError::ResourceLimit("图片尺寸导致内存溢出风险".to_string()))?;

    if rgba.as_raw().len() != expected_len {
        return Err(PickError::Decode("解码后像素数据长度异常".to_string()));
    }

    log::info!(
        "✅ 图片解码成功 - {} 来源: {} 尺寸: {}x{} 耗时: {}ms",
        image.id(),
        image.source_hint(),
        width,
        height,
        start.elapsed().as_millis()
    );

    RasterImage::from_rgba(rgba)
}

/// 仅通过内存中的图片头信息读取宽高。
fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), PickError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PickError::Decode(format!("无法识别图片格式：{}", e)))?;

    if reader.format().is_none() {
        return Err(PickError::Decode("无法识别图片格式".to_string()));
    }

    reader
        .into_dimensions()
        .map_err(|e| PickError::Decode(format!("无法读取图片尺寸：{}", e)))
}

/// 完整解码并应用 EXIF 方向。
///
/// 方向信息缺失或损坏时按原始朝向处理，不视为解码失败。
fn decode_with_orientation(bytes: &[u8]) -> Result<DynamicImage, PickError> {
    let mut decoder = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PickError::Decode(format!("无法识别图片格式：{}", e)))?
        .into_decoder()
        .map_err(|e| PickError::Decode(format!("无法创建解码器：{}", e)))?;

    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    let mut decoded = DynamicImage::from_decoder(decoder)
        .map_err(|e| PickError::Decode(format!("图片解码失败：{}", e)))?;

    if !matches!(orientation, Orientation::NoTransforms) {
        log::debug!("🔃 应用 EXIF 方向：{:?}", orientation);
        decoded.apply_orientation(orientation);
    }

    Ok(decoded)
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), PickError> {
    if width == 0 || height == 0 {
        return Err(PickError::Decode(format!("图片尺寸为 0：{}x{}", width, height)));
    }
    Ok(())
}

/// 校验像素数量是否超过配置上限。
fn validate_pixel_limits(config: &PickerConfig, width: u32, height: u32) -> Result<(), PickError> {
    let pixels = u64::from(width) * u64::from(height);

    if pixels > config.max_decoded_pixels {
        return Err(PickError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    Ok(())
}

fn validate_decoded_memory_limits(
    config: &PickerConfig,
    width: u32,
    height: u32,
) -> Result<(), PickError> {
    let estimated = (u64::from(width) * u64::from(height))
        .checked_mul(4)
        .ok_or_else(|| PickError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

    if estimated > config.max_decoded_bytes {
        return Err(PickError::ResourceLimit(format!(
            "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
            estimated as f64 / 1024.0 / 1024.0,
            config.max_decoded_bytes as f64 / 1024.0 / 1024.0
        )));
    }

    Ok(())
}
