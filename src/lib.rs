//! # 取色器 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │             展示层（文件选择 / 拖放 / <img> 渲染）         │
//! │                                                          │
//! │   点击事件 ── ClickPoint + DisplayGeometry               │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<ColorResult, PickError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↓            核心 (Rust)                           │
//! │                                                          │
//! │  dropper                                                 │
//! │   ├─ service    会话状态 Empty ⇄ Loaded                  │
//! │   ├─ handler    单次取色编排                              │
//! │   ├─ loader     文件 / Base64 / 字节 + 签名校验          │
//! │   ├─ pipeline   解码 + 像素/内存限制                     │
//! │   ├─ cache      栅格缓存（按 ImageId，LRU）              │
//! │   ├─ geometry   点击坐标 → 原始像素坐标                  │
//! │   ├─ raster     像素缓冲与单点采样                       │
//! │   └─ color      #RRGGBB + 感知亮度                       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`dropper`] | 加载图片、按点击位置读取像素颜色，输出十六进制值与标签明暗 |
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use color_dropper::dropper::{ClickPoint, DisplayGeometry, DropperSession, ImageSource};
//!
//! let mut session = DropperSession::new()?;
//! session.load(ImageSource::FilePath("photo.png".into()))?;
//!
//! let geometry = DisplayGeometry::new(10.0, 10.0, 320.0, 240.0);
//! let color = session.pick(ClickPoint::new(120.0, 80.0), geometry)?;
//! println!("{} (label {})", color.hex, color.label_hex);
//! # Ok::<(), color_dropper::dropper::PickError>(())
//! ```

pub mod dropper;
