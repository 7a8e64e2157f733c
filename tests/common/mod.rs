#![allow(dead_code)]

use image::{ImageBuffer, Rgb};
use rand::RngCore;
use std::path::Path;

/// 按标准 BITMAPFILEHEADER + BITMAPINFOHEADER 布局构造一个 24 位 BMP。
/// 像素数据按原样附加在 54 字节头部之后。
pub fn build_bmp(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let file_size = 54 + pixels.len() as u32;
    let mut bmp = Vec::with_capacity(file_size as usize);

    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&file_size.to_le_bytes());
    bmp.extend_from_slice(&[0u8; 4]);
    bmp.extend_from_slice(&54u32.to_le_bytes());
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&width.to_le_bytes());
    bmp.extend_from_slice(&height.to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes());
    bmp.extend_from_slice(&24u16.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes());
    bmp.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
    bmp.extend_from_slice(&2835u32.to_le_bytes());
    bmp.extend_from_slice(&2835u32.to_le_bytes());
    bmp.extend_from_slice(&[0u8; 8]);
    assert_eq!(bmp.len(), 54);

    bmp.extend_from_slice(pixels);
    bmp
}

/// 全零像素的 BMP。
pub fn blank_bmp(width: u32, height: u32) -> Vec<u8> {
    build_bmp(width, height, &vec![0u8; (width * height * 3) as usize])
}

/// 随机像素的 BMP。
pub fn random_bmp(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut pixels);
    build_bmp(width, height, &pixels)
}

/// 一个辅助函数，用 `image` 库创建一个带有随机像素的 24 位 BMP 测试图像。
/// 宽度应为 4 的倍数，保证每行没有填充字节。
pub fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut raw_pixels = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    let img_buf: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, raw_pixels).expect("Pixel buffer size mismatch.");

    img_buf.save(path).expect("Failed to create test image.");
}
