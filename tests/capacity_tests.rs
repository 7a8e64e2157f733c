mod common;

use bmp_hide::StegoError;
use bmp_hide::capacity::{
    CapacityPlan, Dimensions, carrier_capacity_bytes, has_capacity, read_dimensions,
    required_capacity_bytes,
};
use std::io::Cursor;

#[test]
fn test_carrier_capacity_formula() {
    assert_eq!(carrier_capacity_bytes(16, 16), 768);
    assert_eq!(carrier_capacity_bytes(0, 100), 0);
    assert_eq!(carrier_capacity_bytes(u32::MAX, 1), u64::from(u32::MAX) * 3);
    // 伪造的超大尺寸饱和而不是回绕
    assert_eq!(carrier_capacity_bytes(u32::MAX, u32::MAX), u64::MAX);
}

#[test]
fn test_required_capacity_formula() {
    // 8 字节签名、".txt"、"Hi"
    assert_eq!(required_capacity_bytes(8, 4, 2), 64 + 32 + 32 + 32 + 16);
    // 仅有两个长度字段
    assert_eq!(required_capacity_bytes(0, 0, 0), 64);
    assert_eq!(required_capacity_bytes(u64::MAX, 1, 1), u64::MAX);
}

/// 相等视为空间不足
#[test]
fn test_has_capacity_is_strict() {
    assert!(has_capacity(177, 176));
    assert!(!has_capacity(176, 176));
    assert!(!has_capacity(0, 64));
}

#[test]
fn test_read_dimensions_from_header() -> anyhow::Result<()> {
    let bmp = common::blank_bmp(20, 7);
    let dims = read_dimensions(&mut Cursor::new(bmp))?;
    assert_eq!(
        dims,
        Dimensions {
            width: 20,
            height: 7
        }
    );
    Ok(())
}

#[test]
fn test_read_dimensions_truncated_header() {
    let result = read_dimensions(&mut Cursor::new(vec![0u8; 20]));
    assert!(matches!(result, Err(StegoError::Io { .. })));
}

#[test]
fn test_capacity_plan_rejects_equality() -> anyhow::Result<()> {
    // "#*" + ".txt" + 1 字节: 8 * 7 + 64 = 120 = 4 * 10 * 3
    let mut exact = Cursor::new(common::blank_bmp(4, 10));
    match CapacityPlan::verify(&mut exact, 2, 4, 1) {
        Err(StegoError::InsufficientCapacity {
            required,
            available,
        }) => {
            assert_eq!(required, 120);
            assert_eq!(available, 120);
        }
        other => panic!("expected InsufficientCapacity, got {other:?}"),
    }

    let mut roomy = Cursor::new(common::blank_bmp(4, 11));
    let plan = CapacityPlan::verify(&mut roomy, 2, 4, 1)?;
    assert_eq!(plan.available, 132);
    assert_eq!(plan.required, 120);
    Ok(())
}
