//! # 提取端流水线
//!
//! 与嵌入端对称：跳过头部后依次解码签名、扩展名长度、扩展名、有效载荷长度和有效载荷。
//!
//! 解码过程分为两个阶段。[`Extractor::begin`] 完成到扩展名为止的所有步骤并返回 [`HiddenFile`]，
//! 调用者据此确定输出文件名并打开输出文件，再调用 [`HiddenFile::write_to`] 完成剩余步骤。
//!
//! 从载体中解码出的长度一律视为不可信输入，使用前先与剩余载体字节数比较。

use crate::bits::{unpack_byte, unpack_u32};
use crate::config::CodecConfig;
use crate::constants::{
    BMP_HEADER_SIZE, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_U32, MAX_EXTENSION_LEN,
};
use crate::error::{IoResultExt, Result, Step, StegoError};
use crate::extension::check_extension;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};

#[derive(Debug, Clone)]
pub struct Extractor {
    config: CodecConfig,
}

impl Extractor {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// 校验签名并解码扩展名。
    ///
    /// # Errors
    ///
    /// * 签名不匹配、扩展名长度越界或扩展名不是合法文件名片段时返回 `StegoError::InvalidContainer`。
    /// * 读取失败时返回 `StegoError::Io`。
    pub fn begin<C: Read + Seek>(&self, mut carrier: C) -> Result<HiddenFile<C>> {
        log::debug!("Step: {}", Step::SeekPastHeader);
        let total = carrier.seek(SeekFrom::End(0)).during(Step::SeekPastHeader)?;
        let header = BMP_HEADER_SIZE as u64;
        if total < header {
            return Err(StegoError::InvalidContainer(format!(
                "The image is only {total} bytes, shorter than the {BMP_HEADER_SIZE}-byte bitmap header."
            )));
        }
        carrier
            .seek(SeekFrom::Start(header))
            .during(Step::SeekPastHeader)?;

        let mut reader = CarrierReader {
            inner: BufReader::new(carrier),
            remaining: total - header,
        };

        self.decode_magic(&mut reader)?;
        let extension = decode_extension(&mut reader)?;

        Ok(HiddenFile { reader, extension })
    }

    /// 把隐藏的文件完整解码到内存中，返回 `(扩展名, 内容)`。
    pub fn extract_to_vec<C: Read + Seek>(&self, carrier: C) -> Result<(String, Vec<u8>)> {
        let hidden = self.begin(carrier)?;
        let extension = hidden.extension().to_string();
        let mut data = Vec::new();
        hidden.write_to(&mut data)?;
        Ok((extension, data))
    }

    fn decode_magic<R: Read>(&self, reader: &mut CarrierReader<R>) -> Result<()> {
        log::debug!("Step: {}", Step::DecodeMagic);
        let expected = self.config.magic();
        let found = reader.take_bytes(expected.len() as u64, Step::DecodeMagic)?;

        if found != expected {
            return Err(StegoError::InvalidContainer(format!(
                "Magic string mismatch: expected {:?}, found {:?}. \nThe image does not contain a hidden file or is corrupted.",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(&found)
            )));
        }
        log::info!("Magic string verified");
        Ok(())
    }
}

fn decode_extension<R: Read>(reader: &mut CarrierReader<R>) -> Result<String> {
    log::debug!("Step: {}", Step::DecodeExtnLength);
    let extn_len = u64::from(reader.take_u32(Step::DecodeExtnLength)?);
    log::info!("Extension size = {extn_len} bytes");

    if extn_len > MAX_EXTENSION_LEN as u64 {
        return Err(StegoError::InvalidContainer(format!(
            "Decoded extension length {extn_len} exceeds the maximum of {MAX_EXTENSION_LEN} bytes."
        )));
    }

    log::debug!("Step: {}", Step::DecodeExtn);
    let raw = reader.take_bytes(extn_len, Step::DecodeExtn)?;
    let extension = check_extension(&raw)
        .map_err(StegoError::InvalidContainer)?
        .to_string();

    log::info!("Decoded extension: {extension}");
    Ok(extension)
}

/// 签名和扩展名已通过校验、尚未解码有效载荷的容器。
#[derive(Debug)]
pub struct HiddenFile<C> {
    reader: CarrierReader<C>,
    extension: String,
}

impl<C: Read> HiddenFile<C> {
    /// 解码出的扩展名，包含开头的 `.`。
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// 解码有效载荷长度，并把有效载荷流式写入 `output`。返回写入的字节数。
    ///
    /// # Errors
    ///
    /// * 声明的长度超出剩余载体字节时返回 `StegoError::InvalidContainer`，此时尚未写出任何字节。
    /// * 读写失败时返回 `StegoError::Io`。
    pub fn write_to<W: Write>(mut self, output: W) -> Result<u64> {
        log::debug!("Step: {}", Step::DecodeSecretSize);
        let payload_len = u64::from(self.reader.take_u32(Step::DecodeSecretSize)?);
        log::info!("Secret data size = {payload_len} bytes");

        let needed = payload_len * CARRIER_BYTES_PER_BYTE as u64;
        if needed > self.reader.remaining {
            return Err(StegoError::InvalidContainer(format!(
                "Decoded payload length {payload_len} needs {needed} carrier bytes, but only {} remain.",
                self.reader.remaining
            )));
        }

        log::debug!("Step: {}", Step::DecodeSecretData);
        let mut output = BufWriter::new(output);
        for _ in 0..payload_len {
            let value = self.reader.take_byte(Step::DecodeSecretData)?;
            output.write_all(&[value]).during(Step::DecodeSecretData)?;
        }
        output.flush().during(Step::DecodeSecretData)?;

        log::debug!("Step: {}", Step::Done);
        Ok(payload_len)
    }
}

/// 只向前读取的载体游标，记录剩余可读的载体字节数。
#[derive(Debug)]
struct CarrierReader<R> {
    inner: BufReader<R>,
    remaining: u64,
}

impl<R: Read> CarrierReader<R> {
    fn reserve(&mut self, carrier_bytes: u64, step: Step) -> Result<()> {
        if carrier_bytes > self.remaining {
            return Err(StegoError::InvalidContainer(format!(
                "The image ended while {step}: {carrier_bytes} carrier bytes needed, {} remain.",
                self.remaining
            )));
        }
        self.remaining -= carrier_bytes;
        Ok(())
    }

    fn take_byte(&mut self, step: Step) -> Result<u8> {
        self.reserve(CARRIER_BYTES_PER_BYTE as u64, step)?;
        let mut window = [0u8; CARRIER_BYTES_PER_BYTE];
        self.inner.read_exact(&mut window).during(step)?;
        Ok(unpack_byte(&window))
    }

    fn take_u32(&mut self, step: Step) -> Result<u32> {
        self.reserve(CARRIER_BYTES_PER_U32 as u64, step)?;
        let mut window = [0u8; CARRIER_BYTES_PER_U32];
        self.inner.read_exact(&mut window).during(step)?;
        Ok(unpack_u32(&window))
    }

    /// `len` 必须已经过上限校验，缓冲区按实际长度分配。
    fn take_bytes(&mut self, len: u64, step: Step) -> Result<Vec<u8>> {
        let needed = len * CARRIER_BYTES_PER_BYTE as u64;
        if needed > self.remaining {
            return Err(StegoError::InvalidContainer(format!(
                "The image ended while {step}: {needed} carrier bytes needed, {} remain.",
                self.remaining
            )));
        }

        (0..len).map(|_| self.take_byte(step)).collect()
    }
}
