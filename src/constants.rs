/// BMP 文件的标准头部大小 (字节)。
/// 隐写操作原样复制这个头部，从像素数据开始嵌入。
pub const BMP_HEADER_SIZE: usize = 54;

/// 头部中图像宽度 (`u32`, 小端序) 的偏移量。
pub const WIDTH_OFFSET: u64 = 18;

/// 头部中图像高度 (`u32`, 小端序) 的偏移量。
pub const HEIGHT_OFFSET: u64 = 22;

/// 每个像素占用的字节数 (24 位 BMP)。
pub const BYTES_PER_PIXEL: u64 = 3;

/// 隐写单个字节所需的像素字节数。
/// 每个像素字节只存储 1 bit，因此一个 `u8` 需要 8 个像素字节。
pub const CARRIER_BYTES_PER_BYTE: usize = 8;

/// 隐写一个 `u32` 长度字段所需的像素字节数 (32 bits, 每字节 1 bit)。
pub const CARRIER_BYTES_PER_U32: usize = 32;

/// 默认的容器签名。
pub const DEFAULT_MAGIC: &str = "#*";

/// 扩展名的最大长度 (字节，包含开头的 `.`)。
pub const MAX_EXTENSION_LEN: usize = 255;

/// `encode` 未指定输出文件时使用的文件名。
pub const DEFAULT_STEGO_NAME: &str = "stego.bmp";

/// `decode` 未指定输出文件时使用的基础文件名。
pub const DEFAULT_DECODE_BASE: &str = "dec_data";

/// 载体与输出文件要求的后缀。
pub const BMP_SUFFIX: &str = ".bmp";
