//! # 数据源与中间模型
//!
//! - `ImageSource` 表示外部来源语义（文件选择、拖放、内存字节）
//! - `ImageId` 是一次加载的身份标识，栅格缓存以它为键；只能由 `ColorPicker::load` 分配
//! - `LoadedImage` 表示已加载、已通过签名校验但尚未解码的图片

use std::fmt;
use std::path::PathBuf;

/// 图片输入来源。
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// 本地文件路径（文件选择框 / 拖放文件）。
    FilePath(PathBuf),
    /// Base64（支持 Data URL 与纯 Base64 字符串）。
    Base64(String),
    /// 已在内存中的原始字节。
    Bytes(Vec<u8>),
}

/// 图片身份：分配它的取色器实例 + 该实例内的加载序号。
///
/// 两个字段都不对外开放，不同取色器加载的图片不会共用同一个身份。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId {
    picker: u64,
    sequence: u64,
}

impl ImageId {
    pub(crate) fn new(picker: u64, sequence: u64) -> Self {
        Self { picker, sequence }
    }

    /// 取色器内的加载序号，从 1 开始。
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image#{}.{}", self.picker, self.sequence)
    }
}

/// 加载阶段输出：原始字节、身份与来源标识。
#[derive(Debug, Clone)]
pub struct LoadedImage {
    id: ImageId,
    bytes: Vec<u8>,
    source_hint: &'static str,
}

impl LoadedImage {
    pub(crate) fn new(id: ImageId, bytes: Vec<u8>, source_hint: &'static str) -> Self {
        Self { id, bytes, source_hint }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 来源提示（用于日志与诊断）。
    pub fn source_hint(&self) -> &'static str {
        self.source_hint
    }
}
