//! # bmp_hide 库
//!
//! 本库包含 BMP LSB 隐写工具的核心逻辑：逐位打包、容量规划、嵌入和提取流水线。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod cli;
pub mod config;
pub mod constants;
pub mod embed;
pub mod error;
pub mod extension;
pub mod extract;
pub mod handler;

pub use config::CodecConfig;
pub use embed::{EmbedSummary, Embedder};
pub use error::{Result, Step, StegoError};
pub use extract::{Extractor, HiddenFile};
