use clap::Parser;

use bmp_hide::{
    CodecConfig,
    cli::{Cli, Commands},
    handler::{handle_decode, handle_encode},
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令（`encode` 或 `decode`）
/// 将执行分派到相应的处理函数。任何失败都以非零状态码退出。
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // RUST_LOG 优先于 -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = CodecConfig::new(cli.magic.into_bytes())?;

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Encode(args) => handle_encode(args, &config),
        Commands::Decode(args) => handle_decode(args, &config),
    }
}
