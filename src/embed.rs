//! # 嵌入端流水线
//!
//! 按固定顺序把容器写入载体的像素字节流：
//! 头部原样复制 → 签名 → 扩展名长度 → 扩展名 → 有效载荷长度 → 有效载荷 → 剩余数据原样复制。
//! 每一步只在上一步成功后执行，失败立即终止，不回滚已写出的字节。

use crate::bits::{pack_byte, pack_u32};
use crate::capacity::{CapacityPlan, Dimensions};
use crate::config::CodecConfig;
use crate::constants::{BMP_HEADER_SIZE, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_U32};
use crate::error::{IoResultExt, Result, Step, StegoError};
use crate::extension::check_extension;
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};

/// 一次成功嵌入的统计信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSummary {
    pub dimensions: Dimensions,
    pub available: u64,
    pub required: u64,
    pub payload_len: u64,
    /// 原样复制到输出末尾的载体字节数。
    pub tail_len: u64,
}

#[derive(Debug, Clone)]
pub struct Embedder {
    config: CodecConfig,
}

impl Embedder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// 把 `payload` 连同它的扩展名隐藏进 `carrier`，结果写入 `output`。
    ///
    /// `extension` 包含开头的 `.`，例如 `".txt"`。
    ///
    /// # Errors
    ///
    /// * 扩展名过长、含有路径分隔符或 NUL，或有效载荷超出长度字段的表示范围时
    ///   返回 `StegoError::InvalidArgument`。
    /// * 载体空间不足时返回 `StegoError::InsufficientCapacity`，此时尚未写出任何字节。
    /// * 任一读写失败时返回带有失败步骤的 `StegoError::Io`。
    pub fn embed<C, P, W>(
        &self,
        carrier: C,
        mut payload: P,
        extension: &str,
        output: W,
    ) -> Result<EmbedSummary>
    where
        C: Read + Seek,
        P: Read + Seek,
        W: Write,
    {
        let extension = check_extension(extension.as_bytes())
            .map_err(StegoError::InvalidArgument)?
            .as_bytes();

        let payload_len = payload.seek(SeekFrom::End(0)).during(Step::VerifyCapacity)?;
        payload.rewind().during(Step::VerifyCapacity)?;
        let payload_len_field = u32::try_from(payload_len).map_err(|_| {
            StegoError::InvalidArgument(format!(
                "The payload is {payload_len} bytes, larger than the 32-bit length field allows."
            ))
        })?;

        let mut carrier = BufReader::new(carrier);
        let mut output = BufWriter::new(output);

        log::debug!("Step: {}", Step::VerifyCapacity);
        let plan = CapacityPlan::verify(
            &mut carrier,
            self.config.magic().len() as u64,
            extension.len() as u64,
            payload_len,
        )?;

        self.copy_header(&mut carrier, &mut output)?;
        self.embed_magic(&mut carrier, &mut output)?;
        embed_u32(
            &mut carrier,
            &mut output,
            extension.len() as u32,
            Step::EmbedExtnLength,
        )?;
        embed_bytes(&mut carrier, &mut output, extension, Step::EmbedExtn)?;
        embed_u32(
            &mut carrier,
            &mut output,
            payload_len_field,
            Step::EmbedPayloadLength,
        )?;
        embed_payload(&mut carrier, &mut output, payload, payload_len)?;
        let tail_len = copy_tail(&mut carrier, &mut output)?;

        output.flush().during(Step::Done)?;
        log::debug!("Step: {}", Step::Done);

        Ok(EmbedSummary {
            dimensions: plan.dimensions,
            available: plan.available,
            required: plan.required,
            payload_len,
            tail_len,
        })
    }

    fn copy_header<R, W>(&self, carrier: &mut R, output: &mut W) -> Result<()>
    where
        R: Read + Seek,
        W: Write,
    {
        log::debug!("Step: {}", Step::CopyHeader);
        carrier.rewind().during(Step::CopyHeader)?;

        let mut header = [0u8; BMP_HEADER_SIZE];
        carrier.read_exact(&mut header).during(Step::CopyHeader)?;
        output.write_all(&header).during(Step::CopyHeader)
    }

    fn embed_magic<R: Read, W: Write>(&self, carrier: &mut R, output: &mut W) -> Result<()> {
        embed_bytes(carrier, output, self.config.magic(), Step::EmbedMagic)
    }
}

/// 每个字节读取 8 个载体字节，写入 bit 后输出。
fn embed_bytes<R: Read, W: Write>(
    carrier: &mut R,
    output: &mut W,
    data: &[u8],
    step: Step,
) -> Result<()> {
    log::debug!("Step: {step} ({} bytes)", data.len());

    let mut window = [0u8; CARRIER_BYTES_PER_BYTE];
    for &value in data {
        carrier.read_exact(&mut window).during(step)?;
        pack_byte(value, &mut window);
        output.write_all(&window).during(step)?;
    }
    Ok(())
}

fn embed_u32<R: Read, W: Write>(
    carrier: &mut R,
    output: &mut W,
    value: u32,
    step: Step,
) -> Result<()> {
    log::debug!("Step: {step} (value {value})");

    let mut window = [0u8; CARRIER_BYTES_PER_U32];
    carrier.read_exact(&mut window).during(step)?;
    pack_u32(value, &mut window);
    output.write_all(&window).during(step)
}

/// 逐字节流式读取有效载荷，不把整个文件读入内存。
fn embed_payload<R, W, P>(carrier: &mut R, output: &mut W, payload: P, payload_len: u64) -> Result<()>
where
    R: Read,
    W: Write,
    P: Read,
{
    log::debug!("Step: {} ({payload_len} bytes)", Step::EmbedPayload);

    let mut window = [0u8; CARRIER_BYTES_PER_BYTE];
    let mut written = 0u64;
    for value in BufReader::new(payload).take(payload_len).bytes() {
        let value = value.during(Step::EmbedPayload)?;
        carrier.read_exact(&mut window).during(Step::EmbedPayload)?;
        pack_byte(value, &mut window);
        output.write_all(&window).during(Step::EmbedPayload)?;
        written += 1;
    }

    if written != payload_len {
        return Err(StegoError::Io {
            step: Step::EmbedPayload,
            source: io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("The payload ended after {written} of {payload_len} bytes."),
            ),
        });
    }
    Ok(())
}

fn copy_tail<R: Read, W: Write>(carrier: &mut R, output: &mut W) -> Result<u64> {
    log::debug!("Step: {}", Step::CopyTail);
    io::copy(carrier, output).during(Step::CopyTail)
}
