use crate::constants::{CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_U32};

/// 把 `value` 的 8 个 bit 按高位在前写入 8 个载体字节的最低位。
/// 载体字节的其余 7 位保持不变。
pub fn pack_byte(value: u8, carrier: &mut [u8; CARRIER_BYTES_PER_BYTE]) {
    for (i, byte) in carrier.iter_mut().enumerate() {
        let bit = (value >> (7 - i)) & 1;
        *byte = (*byte & 0xFE) | bit;
    }
}

pub fn unpack_byte(carrier: &[u8; CARRIER_BYTES_PER_BYTE]) -> u8 {
    carrier
        .iter()
        .fold(0u8, |acc, &byte| (acc << 1) | (byte & 1))
}

/// 与 [`pack_byte`] 相同的方案，扩展到 32 位。
pub fn pack_u32(value: u32, carrier: &mut [u8; CARRIER_BYTES_PER_U32]) {
    for (i, byte) in carrier.iter_mut().enumerate() {
        let bit = ((value >> (31 - i)) & 1) as u8;
        *byte = (*byte & 0xFE) | bit;
    }
}

pub fn unpack_u32(carrier: &[u8; CARRIER_BYTES_PER_U32]) -> u32 {
    carrier
        .iter()
        .fold(0u32, |acc, &byte| (acc << 1) | u32::from(byte & 1))
}
