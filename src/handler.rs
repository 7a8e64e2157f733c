//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责校验参数、打开文件、调用核心隐写流水线以及向用户报告结果。

use crate::cli::{DecodeArgs, EncodeArgs};
use crate::config::CodecConfig;
use crate::constants::{BMP_SUFFIX, DEFAULT_DECODE_BASE, DEFAULT_STEGO_NAME};
use crate::embed::Embedder;
use crate::error::{IoResultExt, Step, StegoError};
use crate::extract::Extractor;
use anyhow::{Context, Result};
use colored::Colorize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责校验文件名、打开三个文件句柄、调用嵌入流水线，最后报告结果。
/// 失败时删除已创建的输出文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `EncodeArgs` 结构体。
/// * `config` - 容器签名等编解码配置。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 载体或输出文件不是 `.bmp`，或有效载荷没有扩展名。
/// * 输出文件已存在且未指定 `--force`，或与载体是同一个文件。
/// * 无法打开、读取或写入任一文件。
/// * 图像没有足够的空间来隐藏文件。
pub fn handle_encode(args: EncodeArgs, config: &CodecConfig) -> Result<()> {
    ensure_bmp_suffix(&args.carrier, "Source image")?;
    let extension = payload_extension(&args.payload)?;
    let dest = args
        .output
        .clone()
        .unwrap_or_else(|| sibling(&args.carrier, DEFAULT_STEGO_NAME));
    ensure_bmp_suffix(&dest, "Output image")?;
    ensure_distinct(&args.carrier, &dest)?;
    ensure_writable(&dest, args.force)?;

    log::info!("File extension detected: {extension}");

    let carrier = File::open(&args.carrier)
        .during(Step::OpenFiles)
        .with_context(|| {
            format!(
                "Unable to open image file: {}",
                args.carrier.to_string_lossy().red().bold()
            )
        })?;
    let payload = File::open(&args.payload)
        .during(Step::OpenFiles)
        .with_context(|| {
            format!(
                "Unable to open secret file: {}",
                args.payload.to_string_lossy().red().bold()
            )
        })?;
    let output = File::create(&dest)
        .during(Step::OpenFiles)
        .with_context(|| {
            format!(
                "Unable to create target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;
    let mut guard = OutputGuard::new(&dest);

    let summary = Embedder::new(config.clone())
        .embed(carrier, payload, &extension, output)
        .with_context(|| {
            format!(
                "Failed to hide '{}' in '{}'.",
                args.payload.to_string_lossy().red().bold(),
                args.carrier.to_string_lossy().red().bold()
            )
        })?;
    guard.keep();

    log::info!(
        "Embedded {} payload bytes; {} of {} carrier bytes used, {} tail bytes copied",
        summary.payload_len,
        summary.required,
        summary.available,
        summary.tail_len
    );

    println!(
        "The file has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 校验签名并解码扩展名后，以 "基础名称 + 扩展名" 创建输出文件，再流式写出隐藏的内容。
///
/// # Arguments
///
/// * `args` - 包含输入路径和可选基础名称的 `DecodeArgs` 结构体。
/// * `config` - 容器签名等编解码配置。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输入文件不是 `.bmp`，或无法读取。
/// * 图像中没有隐藏文件，或容器字段已损坏。
/// * 输出文件已存在且未指定 `--force`，或无法写入。
pub fn handle_decode(args: DecodeArgs, config: &CodecConfig) -> Result<()> {
    ensure_bmp_suffix(&args.stego, "Stego image")?;
    let base = match args.base_name {
        Some(ref base) => strip_extension(base),
        None => sibling(&args.stego, DEFAULT_DECODE_BASE),
    };

    let carrier = File::open(&args.stego)
        .during(Step::OpenCarrier)
        .with_context(|| {
            format!(
                "Unable to open image file: {}",
                args.stego.to_string_lossy().red().bold()
            )
        })?;

    let hidden = Extractor::new(config.clone())
        .begin(carrier)
        .with_context(|| {
            format!(
                "Failed to recover the hidden file from '{}'. \nThe image may not contain a hidden file or is corrupted.",
                args.stego.to_string_lossy().red().bold()
            )
        })?;

    let dest = with_appended_extension(&base, hidden.extension());
    ensure_writable(&dest, args.force)?;
    log::info!("Final output filename: {}", dest.display());

    let output = File::create(&dest)
        .during(Step::OpenOutputFile)
        .with_context(|| {
            format!(
                "Unable to create target file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;
    let mut guard = OutputGuard::new(&dest);

    let written = hidden.write_to(output).with_context(|| {
        format!(
            "Failed to recover the hidden data from '{}'. \nThe data appears to be corrupted or invalid.",
            args.stego.to_string_lossy().red().bold()
        )
    })?;
    guard.keep();

    println!(
        "The file has been successfully recovered ({} bytes) and saved: {}",
        written.to_string().green(),
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 失败时删除本次运行创建的输出文件，避免留下截断的结果。
struct OutputGuard<'a> {
    path: &'a Path,
    keep: bool,
}

impl<'a> OutputGuard<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, keep: false }
    }

    fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for OutputGuard<'_> {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match fs::remove_file(self.path) {
            Ok(()) => log::warn!("Removed partial output file: {}", self.path.display()),
            Err(err) => log::warn!(
                "Unable to remove partial output file {}: {err}",
                self.path.display()
            ),
        }
    }
}

fn ensure_bmp_suffix(path: &Path, role: &str) -> Result<(), StegoError> {
    let name = path.to_string_lossy().to_ascii_lowercase();
    if name.ends_with(BMP_SUFFIX) {
        return Ok(());
    }
    Err(StegoError::InvalidArgument(format!(
        "{role} must be a \"{BMP_SUFFIX}\" file: {}",
        path.display()
    )))
}

/// 返回有效载荷的扩展名，包含开头的 `.`。
fn payload_extension(path: &Path) -> Result<String, StegoError> {
    let Some(ext) = path.extension().filter(|ext| !ext.is_empty()) else {
        return Err(StegoError::InvalidArgument(format!(
            "Secret file must include an extension (e.g. file.txt): {}",
            path.display()
        )));
    };
    let ext = ext.to_str().ok_or_else(|| {
        StegoError::InvalidArgument(format!(
            "Secret file extension is not valid UTF-8: {}",
            path.display()
        ))
    })?;
    Ok(format!(".{ext}"))
}

/// 打开输出文件会截断载体，因此两者不能是同一个文件。
fn ensure_distinct(carrier: &Path, dest: &Path) -> Result<(), StegoError> {
    let same = match (fs::canonicalize(carrier), fs::canonicalize(dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        return Err(StegoError::InvalidArgument(format!(
            "Output image must differ from the source image: {}",
            dest.display()
        )));
    }
    Ok(())
}

fn ensure_writable(dest: &Path, force: bool) -> Result<(), StegoError> {
    if dest.exists() && !force {
        return Err(StegoError::InvalidArgument(format!(
            "Output file already exists: {}. Use --force to overwrite it.",
            dest.display()
        )));
    }
    Ok(())
}

fn sibling(path: &Path, name: &str) -> PathBuf {
    path.parent()
        .map(|dir| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// 去掉文件名中第一个 `.` 及其后的部分，开头的 `.` 除外。
fn strip_extension(base: &Path) -> PathBuf {
    let Some(name) = base.file_name().and_then(|name| name.to_str()) else {
        return base.to_path_buf();
    };
    match name.char_indices().skip(1).find(|&(_, c)| c == '.') {
        Some((dot, _)) => base.with_file_name(&name[..dot]),
        None => base.to_path_buf(),
    }
}

fn with_appended_extension(base: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(extension);
    PathBuf::from(name)
}
