//! # 编解码配置
//!
//! 容器签名不是编译期常量，而是在构造 `Embedder` / `Extractor` 时传入的配置值。

use crate::constants::DEFAULT_MAGIC;
use crate::error::{Result, StegoError};

/// 嵌入端和提取端共享的配置。双方必须使用相同的签名才能互通。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    magic: Vec<u8>,
}

impl CodecConfig {
    /// 使用自定义签名创建配置。
    ///
    /// # Errors
    ///
    /// 签名为空时返回 `StegoError::InvalidArgument`，空签名无法区分合法容器。
    pub fn new(magic: impl Into<Vec<u8>>) -> Result<Self> {
        let magic = magic.into();
        if magic.is_empty() {
            return Err(StegoError::InvalidArgument(
                "The magic string must not be empty.".to_string(),
            ));
        }
        Ok(Self { magic })
    }

    pub fn magic(&self) -> &[u8] {
        &self.magic
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            magic: DEFAULT_MAGIC.as_bytes().to_vec(),
        }
    }
}
