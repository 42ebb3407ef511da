//! # 颜色换算模块
//!
//! 将采样得到的 RGB 转换为 `#RRGGBB` 字符串，并根据感知亮度给出标签文字颜色。
//!
//! 感知亮度使用常见的 luma 近似：`(299R + 587G + 114B) / 1000`，
//! 绿色权重最高，红色次之，蓝色最低。

use serde::{Deserialize, Serialize};

use super::PixelCoordinate;

/// 明暗判定的默认阈值：感知亮度 `>=` 该值视为浅色。
pub const DEFAULT_LIGHT_THRESHOLD: f64 = 150.0;

/// 浅色背景上的标签文字颜色。
pub const DARK_LABEL_HEX: &str = "#000000";
/// 深色背景上的标签文字颜色。
pub const LIGHT_LABEL_HEX: &str = "#FFFFFF";

/// sRGB 三通道颜色，每个通道 0~255。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// 输出 `#RRGGBB`，每个通道固定两位大写十六进制。
///
/// # 示例
/// ```rust
/// use color_dropper::dropper::{to_hex, Rgb};
///
/// assert_eq!(to_hex(Rgb::new(0, 0, 0)), "#000000");
/// assert_eq!(to_hex(Rgb::new(255, 10, 171)), "#FF0AAB");
/// ```
pub fn to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// 感知亮度，取值范围 `[0, 255]`。
pub fn perceived_luminance(rgb: Rgb) -> f64 {
    let weighted = u32::from(rgb.r) * 299 + u32::from(rgb.g) * 587 + u32::from(rgb.b) * 114;
    f64::from(weighted) / 1000.0
}

/// 感知亮度达到阈值（含边界）即为浅色。
pub fn is_light(rgb: Rgb, threshold: f64) -> bool {
    perceived_luminance(rgb) >= threshold
}

/// 一次取色的结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorResult {
    /// `#RRGGBB`，大写。
    pub hex: String,
    /// 是否为浅色；浅色时标签应使用深色文字。
    pub is_light: bool,
    pub rgb: Rgb,
    /// 采样点在原始分辨率下的坐标。
    pub pixel: PixelCoordinate,
    /// 推荐的标签文字颜色。
    pub label_hex: &'static str,
}

impl ColorResult {
    pub fn from_rgb(rgb: Rgb, pixel: PixelCoordinate, threshold: f64) -> Self {
        let is_light = is_light(rgb, threshold);
        Self {
            hex: to_hex(rgb),
            is_light,
            rgb,
            pixel,
            label_hex: if is_light { DARK_LABEL_HEX } else { LIGHT_LABEL_HEX },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_pads_every_channel() {
        assert_eq!(to_hex(Rgb::new(0, 0, 0)), "#000000");
        assert_eq!(to_hex(Rgb::new(1, 2, 3)), "#010203");
        assert_eq!(to_hex(Rgb::new(255, 255, 255)), "#FFFFFF");
        assert_eq!(to_hex(Rgb::new(0xAB, 0xCD, 0xEF)), "#ABCDEF");
    }

    #[test]
    fn luminance_weights_green_then_red_then_blue() {
        let red = perceived_luminance(Rgb::new(255, 0, 0));
        let green = perceived_luminance(Rgb::new(0, 255, 0));
        let blue = perceived_luminance(Rgb::new(0, 0, 255));

        assert!(green > red);
        assert!(red > blue);
        assert_eq!(green, 149.685);
    }

    #[test]
    fn pure_green_is_just_below_threshold() {
        assert!(!is_light(Rgb::new(0, 255, 0), DEFAULT_LIGHT_THRESHOLD));
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let gray = Rgb::new(150, 150, 150);
        assert_eq!(perceived_luminance(gray), 150.0);
        assert!(is_light(gray, DEFAULT_LIGHT_THRESHOLD));

        assert!(!is_light(Rgb::new(149, 149, 149), DEFAULT_LIGHT_THRESHOLD));
    }

    #[test]
    fn result_picks_label_color_from_lightness() {
        let origin = PixelCoordinate { x: 0, y: 0 };

        let white = ColorResult::from_rgb(Rgb::new(255, 255, 255), origin, DEFAULT_LIGHT_THRESHOLD);
        assert!(white.is_light);
        assert_eq!(white.label_hex, DARK_LABEL_HEX);

        let navy = ColorResult::from_rgb(Rgb::new(0, 0, 128), origin, DEFAULT_LIGHT_THRESHOLD);
        assert!(!navy.is_light);
        assert_eq!(navy.hex, "#000080");
        assert_eq!(navy.label_hex, LIGHT_LABEL_HEX);
    }

    #[test]
    fn custom_threshold_changes_decision() {
        let green = Rgb::new(0, 255, 0);
        assert!(is_light(green, 128.0));
        assert!(!is_light(green, DEFAULT_LIGHT_THRESHOLD));
    }

    proptest! {
        #[test]
        fn hex_is_seven_uppercase_chars_and_round_trips(r: u8, g: u8, b: u8) {
            let hex = to_hex(Rgb::new(r, g, b));

            prop_assert_eq!(hex.len(), 7);
            prop_assert!(hex.starts_with('#'));
            prop_assert!(hex[1..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));

            let value = u32::from_str_radix(&hex[1..], 16).expect("hex digits");
            prop_assert_eq!(value, (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b));
        }

        #[test]
        fn raising_a_channel_never_turns_light_into_dark(
            r: u8,
            g: u8,
            b: u8,
            channel in 0usize..3,
            delta in 0u8..=255,
        ) {
            let base = Rgb::new(r, g, b);
            let mut raised = base;
            match channel {
                0 => raised.r = r.saturating_add(delta),
                1 => raised.g = g.saturating_add(delta),
                _ => raised.b = b.saturating_add(delta),
            }

            prop_assert!(perceived_luminance(raised) >= perceived_luminance(base));
            if is_light(base, DEFAULT_LIGHT_THRESHOLD) {
                prop_assert!(is_light(raised, DEFAULT_LIGHT_THRESHOLD));
            }
        }
    }
}
