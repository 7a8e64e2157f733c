//! # 容量规划
//!
//! 在写入任何数据之前，根据图像尺寸计算可用空间，并根据有效载荷和元数据计算所需空间。

use crate::constants::{
    BYTES_PER_PIXEL, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_U32, HEIGHT_OFFSET, WIDTH_OFFSET,
};
use crate::error::{IoResultExt, Result, Step, StegoError};
use std::io::{Read, Seek, SeekFrom};

/// 从 BMP 头部读出的图像尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// 载体可用于隐写的像素字节数：`width * height * 3`。
///
/// 不考虑 BMP 每行 4 字节对齐的填充。
pub fn carrier_capacity_bytes(width: u32, height: u32) -> u64 {
    (u64::from(width) * u64::from(height)).saturating_mul(BYTES_PER_PIXEL)
}

/// 隐写所需的像素字节数：
/// `8 * magic_len + 8 * extn_len + 32 + 32 + 8 * payload_size`。
///
/// 使用饱和运算，超大的输入不会回绕成一个较小的值。
pub fn required_capacity_bytes(magic_len: u64, extn_len: u64, payload_size: u64) -> u64 {
    let per_byte = CARRIER_BYTES_PER_BYTE as u64;
    let length_fields = 2 * CARRIER_BYTES_PER_U32 as u64;

    magic_len
        .saturating_add(extn_len)
        .saturating_add(payload_size)
        .saturating_mul(per_byte)
        .saturating_add(length_fields)
}

/// 严格大于才算足够，相等视为空间不足。
pub fn has_capacity(carrier_bytes: u64, required_bytes: u64) -> bool {
    carrier_bytes > required_bytes
}

/// 读取头部偏移 18 和 22 处的宽度和高度 (`u32`, 小端序)。
///
/// 读取后游标停留在高度字段之后，调用者需要自行重新定位。
pub fn read_dimensions<R: Read + Seek>(carrier: &mut R) -> Result<Dimensions> {
    carrier
        .seek(SeekFrom::Start(WIDTH_OFFSET))
        .during(Step::VerifyCapacity)?;
    let width = read_u32_le(carrier)?;

    carrier
        .seek(SeekFrom::Start(HEIGHT_OFFSET))
        .during(Step::VerifyCapacity)?;
    let height = read_u32_le(carrier)?;

    Ok(Dimensions { width, height })
}

fn read_u32_le<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).during(Step::VerifyCapacity)?;
    Ok(u32::from_le_bytes(buf))
}

/// 一次容量检查的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPlan {
    pub dimensions: Dimensions,
    pub available: u64,
    pub required: u64,
}

impl CapacityPlan {
    /// 计算可用空间和所需空间，并判断是否可行。
    ///
    /// # Errors
    ///
    /// * 无法读取载体头部时返回 `StegoError::Io`。
    /// * 空间不足 (包括恰好相等) 时返回 `StegoError::InsufficientCapacity`。
    pub fn verify<R: Read + Seek>(
        carrier: &mut R,
        magic_len: u64,
        extn_len: u64,
        payload_size: u64,
    ) -> Result<Self> {
        let dimensions = read_dimensions(carrier)?;
        let available = carrier_capacity_bytes(dimensions.width, dimensions.height);
        let required = required_capacity_bytes(magic_len, extn_len, payload_size);

        log::info!(
            "Image {}x{}: capacity {} bytes, required {} bytes",
            dimensions.width,
            dimensions.height,
            available,
            required
        );

        if !has_capacity(available, required) {
            return Err(StegoError::InsufficientCapacity {
                required,
                available,
            });
        }

        Ok(Self {
            dimensions,
            available,
            required,
        })
    }
}
