//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::DEFAULT_MAGIC;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在未压缩的 BMP 图像中隐藏或恢复任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在未压缩的 24 位 BMP 图像中隐藏或恢复任意文件。\n每个像素字节的最低位存储 1 bit 数据，文件的扩展名随内容一起隐藏。"
)]
pub struct Cli {
    /// 容器签名，编码和解码时必须一致。
    #[arg(long, global = true, default_value = DEFAULT_MAGIC)]
    pub magic: String,

    /// 输出更详细的日志 (-v 为 info, -vv 为 debug)。
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (隐藏) 和 decode (恢复)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 把任意文件隐藏到 BMP 图像中。
    Encode(EncodeArgs),

    /// 从经过隐写的 BMP 图像中恢复隐藏的文件。
    Decode(DecodeArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// 用于隐写的载体图像 (.bmp)。
    pub carrier: PathBuf,

    /// 要隐藏的文件，必须带有扩展名。
    pub payload: PathBuf,

    /// 结果图像的输出路径 (.bmp)。
    /// 默认为载体图像所在目录下的 stego.bmp (而不是当前工作目录)。
    pub output: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// 已隐藏文件的图像 (.bmp)。
    pub stego: PathBuf,

    /// 输出文件的基础名称，恢复出的扩展名会附加在其后。
    /// 默认为隐写图像所在目录下的 dec_data (而不是当前工作目录)。
    pub base_name: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
