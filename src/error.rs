use std::fmt;
use std::io;
use thiserror::Error;

/// 隐写编解码的结果类型。
pub type Result<T> = std::result::Result<T, StegoError>;

/// 编码与解码流水线中的各个步骤，按执行顺序排列。
///
/// 每个 I/O 错误都会记录它失败时所处的步骤，便于向用户报告。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    OpenFiles,
    VerifyCapacity,
    CopyHeader,
    EmbedMagic,
    EmbedExtnLength,
    EmbedExtn,
    EmbedPayloadLength,
    EmbedPayload,
    CopyTail,
    OpenCarrier,
    SeekPastHeader,
    DecodeMagic,
    DecodeExtnLength,
    DecodeExtn,
    OpenOutputFile,
    DecodeSecretSize,
    DecodeSecretData,
    Done,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::OpenFiles => "opening the input and output files",
            Step::VerifyCapacity => "verifying the carrier capacity",
            Step::CopyHeader => "copying the bitmap header",
            Step::EmbedMagic => "embedding the magic string",
            Step::EmbedExtnLength => "embedding the extension length",
            Step::EmbedExtn => "embedding the file extension",
            Step::EmbedPayloadLength => "embedding the payload length",
            Step::EmbedPayload => "embedding the payload data",
            Step::CopyTail => "copying the remaining image data",
            Step::OpenCarrier => "opening the carrier image",
            Step::SeekPastHeader => "seeking past the bitmap header",
            Step::DecodeMagic => "decoding the magic string",
            Step::DecodeExtnLength => "decoding the extension length",
            Step::DecodeExtn => "decoding the file extension",
            Step::OpenOutputFile => "creating the output file",
            Step::DecodeSecretSize => "decoding the payload length",
            Step::DecodeSecretData => "decoding the payload data",
            Step::Done => "finishing",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum StegoError {
    /// 任意句柄上的打开、读取或写入失败。
    #[error("I/O failure while {step}")]
    Io {
        step: Step,
        #[source]
        source: io::Error,
    },

    /// 文件名后缀错误、有效载荷缺少扩展名等参数问题。
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 载体图像容纳不下有效载荷和元数据。
    #[error("Not enough space in the image to hide the file. Required: {required}, Available: {available}")]
    InsufficientCapacity { required: u64, available: u64 },

    /// 签名不匹配，或解码出的字段不可信。
    #[error("Invalid container: {0}")]
    InvalidContainer(String),
}

pub(crate) trait IoResultExt<T> {
    /// 把 `io::Error` 标记上发生错误的步骤。
    fn during(self, step: Step) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn during(self, step: Step) -> Result<T> {
        self.map_err(|source| StegoError::Io { step, source })
    }
}
