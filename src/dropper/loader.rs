//! # 加载模块
//!
//! ## 设计思路
//!
//! 负责把外部来源（文件 / Base64 / 内存字节）转成 `LoadedImage`，
//! 并在解码前完成体积限制与文件签名（magic bytes）校验。
//!
//! ## 实现思路
//!
//! - 文件：先读元数据判断体积，再整体读取。
//! - Base64：先按长度估算解码后体积上限，超限直接拒绝，避免无谓的大块分配。
//! - 所有来源最后统一走 `validate_image_signature`：空内容与非图片内容按解码错误处理。

use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use super::source::{ImageId, ImageSource, LoadedImage};
use super::{PickError, PickerConfig};

/// 按来源读取原始字节，并分配给定的 `ImageId`。
pub(crate) fn load_source(
    id: ImageId,
    source: ImageSource,
    config: &PickerConfig,
) -> Result<LoadedImage, PickError> {
    let (bytes, source_hint) = match source {
        ImageSource::FilePath(path) => (load_from_file(&path, config)?, "file"),
        ImageSource::Base64(data) => (parse_base64_with_limit(&data, config.max_file_size)?, "base64"),
        ImageSource::Bytes(bytes) => {
            check_size(bytes.len() as u64, config.max_file_size)?;
            (bytes, "bytes")
        }
    };

    validate_image_signature(&bytes)?;

    log::info!(
        "📥 图片已加载 - {} 来源: {} 大小: {:.1}KB",
        id,
        source_hint,
        bytes.len() as f64 / 1024.0
    );

    Ok(LoadedImage::new(id, bytes, source_hint))
}

fn load_from_file(path: &Path, config: &PickerConfig) -> Result<Vec<u8>, PickError> {
    log::info!("📁 开始读取本地图片 - 路径: {}", path.display());

    if !path.exists() {
        return Err(PickError::FileSystem(format!("文件不存在：{}", path.display())));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| PickError::FileSystem(format!("无法读取文件信息：{}", e)))?;
    check_size(metadata.len(), config.max_file_size)?;

    std::fs::read(path).map_err(|e| PickError::FileSystem(format!("无法读取图片文件：{}", e)))
}

fn check_size(len: u64, max_file_size: u64) -> Result<(), PickError> {
    if len > max_file_size {
        return Err(PickError::SourceTooLarge(format!(
            "图片体积过大：{:.2} MB（限制：{:.2} MB）",
            len as f64 / 1024.0 / 1024.0,
            max_file_size as f64 / 1024.0 / 1024.0
        )));
    }
    Ok(())
}

fn estimate_base64_decoded_upper_bound_len(base64_data: &str) -> Result<u64, PickError> {
    let len = base64_data.trim().len() as u64;
    let groups = len
        .checked_add(3)
        .ok_or_else(|| PickError::SourceTooLarge("Base64 输入长度溢出".to_string()))?
        / 4;

    groups
        .checked_mul(3)
        .ok_or_else(|| PickError::SourceTooLarge("Base64 解码体积估算溢出".to_string()))
}

/// 解析 Base64 输入（支持 Data URL / 纯 Base64），解码前先做体积上限估算。
fn parse_base64_with_limit(data: &str, max_file_size: u64) -> Result<Vec<u8>, PickError> {
    let normalized = data.trim();

    let payload = if normalized.starts_with("data:") {
        let base64_start = normalized
            .find(";base64,")
            .ok_or_else(|| PickError::Decode("Data URL 缺少 base64 标记".to_string()))?;
        &normalized[base64_start + ";base64,".len()..]
    } else {
        normalized
    };

    let estimated_len = estimate_base64_decoded_upper_bound_len(payload)?;
    if estimated_len > max_file_size {
        return Err(PickError::SourceTooLarge(format!(
            "Base64 预计解码体积过大：{:.2} MB（限制：{:.2} MB）",
            estimated_len as f64 / 1024.0 / 1024.0,
            max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| PickError::Decode(format!("Base64 解码失败：{}", e)))
}

/// 通过文件签名（magic bytes）校验输入是否为图片。
fn validate_image_signature(bytes: &[u8]) -> Result<(), PickError> {
    if bytes.is_empty() {
        return Err(PickError::Decode("图片内容为空".to_string()));
    }

    let kind = infer::get(bytes)
        .ok_or_else(|| PickError::Decode("无法识别图片类型".to_string()))?;

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(PickError::Decode(format!(
            "文件签名不是图片类型：{}",
            kind.mime_type()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    fn create_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 255) as u8, (y % 255) as u8, 0, 255])
        });

        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode test image");
        cursor.into_inner()
    }

    #[test]
    fn loads_png_from_bytes() {
        let png = create_png_bytes(4, 4);
        let loaded = load_source(ImageId::new(0, 7), ImageSource::Bytes(png.clone()), &PickerConfig::default())
            .expect("load should succeed");

        assert_eq!(loaded.id(), ImageId::new(0, 7));
        assert_eq!(loaded.bytes(), png.as_slice());
        assert_eq!(loaded.source_hint(), "bytes");
    }

    #[test]
    fn loads_data_url_and_plain_base64() {
        let png = create_png_bytes(3, 2);
        let encoded = general_purpose::STANDARD.encode(&png);
        let config = PickerConfig::default();

        let from_data_url = load_source(
            ImageId::new(0, 1),
            ImageSource::Base64(format!("data:image/png;base64,{}", encoded)),
            &config,
        )
        .expect("data url should load");
        assert_eq!(from_data_url.bytes(), png.as_slice());

        let from_plain = load_source(ImageId::new(0, 2), ImageSource::Base64(encoded), &config)
            .expect("plain base64 should load");
        assert_eq!(from_plain.bytes(), png.as_slice());
    }

    #[test]
    fn rejects_empty_and_non_image_payloads_as_decode_errors() {
        let config = PickerConfig::default();

        let empty = load_source(ImageId::new(0, 1), ImageSource::Bytes(Vec::new()), &config);
        assert!(matches!(empty, Err(PickError::Decode(_))));

        let text = load_source(ImageId::new(0, 2), ImageSource::Bytes(b"hello, not an image".to_vec()), &config);
        assert!(matches!(text, Err(PickError::Decode(_))));

        let base64_text = load_source(ImageId::new(0, 3), ImageSource::Base64("SGVsbG8=".to_string()), &config);
        assert!(matches!(base64_text, Err(PickError::Decode(_))));

        let broken_base64 = load_source(ImageId::new(0, 4), ImageSource::Base64("@@@".to_string()), &config);
        assert!(matches!(broken_base64, Err(PickError::Decode(_))));
    }

    #[test]
    fn rejects_oversized_inputs_before_decoding() {
        let config = PickerConfig {
            max_file_size: 32,
            ..PickerConfig::default()
        };

        let huge = "A".repeat(1024 * 1024);
        let result = parse_base64_with_limit(&huge, config.max_file_size);
        assert!(matches!(result, Err(PickError::SourceTooLarge(_))));

        let bytes = load_source(ImageId::new(0, 1), ImageSource::Bytes(create_png_bytes(16, 16)), &config);
        assert!(matches!(bytes, Err(PickError::SourceTooLarge(_))));
        assert_eq!(bytes.map(|_| ()).unwrap_err().stage(), "load");
    }

    #[test]
    fn missing_file_is_a_file_system_error() {
        let result = load_source(
            ImageId::new(0, 1),
            ImageSource::FilePath("/definitely/not/here/picture.png".into()),
            &PickerConfig::default(),
        );

        assert!(matches!(result, Err(PickError::FileSystem(_))));
    }

    #[test]
    fn loads_png_from_file() {
        let path = std::env::temp_dir().join(format!("color-dropper-loader-{}.png", std::process::id()));
        let png = create_png_bytes(5, 5);
        std::fs::write(&path, &png).expect("write temp image failed");

        let result = load_source(ImageId::new(0, 9), ImageSource::FilePath(path.clone()), &PickerConfig::default());
        let _ = std::fs::remove_file(&path);

        let loaded = result.expect("file should load");
        assert_eq!(loaded.source_hint(), "file");
        assert_eq!(loaded.bytes().len(), png.len());
    }
}
