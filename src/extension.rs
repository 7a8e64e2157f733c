//! # 扩展名校验
//!
//! 嵌入端和提取端共用同一套规则，保证能写入的扩展名一定能被恢复。

use crate::constants::MAX_EXTENSION_LEN;

/// 校验扩展名字节：长度不超过 [`MAX_EXTENSION_LEN`]、是合法的 UTF-8、不含路径分隔符或 NUL。
///
/// 返回错误描述而不是 `StegoError`，由调用者决定错误种类：
/// 嵌入端报告为参数错误，提取端报告为容器损坏。
pub fn check_extension(raw: &[u8]) -> Result<&str, String> {
    if raw.len() > MAX_EXTENSION_LEN {
        return Err(format!(
            "The file extension is {} bytes long; at most {MAX_EXTENSION_LEN} bytes are supported.",
            raw.len()
        ));
    }

    let extension = std::str::from_utf8(raw)
        .map_err(|_| "The file extension is not valid UTF-8.".to_string())?;

    if extension.contains(['/', '\\', '\0']) {
        return Err(format!(
            "The file extension {extension:?} contains a path separator or NUL byte."
        ));
    }
    Ok(extension)
}
