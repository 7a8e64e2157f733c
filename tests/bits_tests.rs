use bmp_hide::bits::{pack_byte, pack_u32, unpack_byte, unpack_u32};
use rand::{Rng, RngCore};

/// 验证所有字节值在不同载体内容下都能无损往返
#[test]
fn test_byte_round_trip_for_every_value() {
    let mut rng = rand::rng();

    for value in 0..=u8::MAX {
        for fill in [0x00u8, 0xFF, 0xAA] {
            let mut window = [fill; 8];
            pack_byte(value, &mut window);
            assert_eq!(unpack_byte(&window), value, "fill {fill:#04x}");
        }

        let mut window = [0u8; 8];
        rng.fill_bytes(&mut window);
        pack_byte(value, &mut window);
        assert_eq!(unpack_byte(&window), value);
    }
}

/// 验证打包只修改最低位，其余 7 位保持不变
#[test]
fn test_pack_byte_preserves_high_bits() {
    let mut rng = rand::rng();

    for _ in 0..256 {
        let mut window = [0u8; 8];
        rng.fill_bytes(&mut window);
        let original = window;

        pack_byte(rng.random(), &mut window);

        for (before, after) in original.iter().zip(window.iter()) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
    }
}

/// 验证高位在前的顺序
#[test]
fn test_bit_order_is_msb_first() {
    let mut window = [0u8; 8];
    pack_byte(0x80, &mut window);
    assert_eq!(window, [1, 0, 0, 0, 0, 0, 0, 0]);

    pack_byte(0x01, &mut window);
    assert_eq!(window, [0, 0, 0, 0, 0, 0, 0, 1]);

    // 'H' = 0b0100_1000
    pack_byte(b'H', &mut window);
    assert_eq!(window, [0, 1, 0, 0, 1, 0, 0, 0]);

    let mut wide = [0xFEu8; 32];
    pack_u32(1, &mut wide);
    assert_eq!(wide[31], 0xFF);
    assert!(wide[..31].iter().all(|&b| b == 0xFE));

    pack_u32(1 << 31, &mut wide);
    assert_eq!(wide[0], 0xFF);
    assert!(wide[1..].iter().all(|&b| b == 0xFE));
}

/// 验证 32 位整数的边界值和随机值都能无损往返
#[test]
fn test_u32_round_trip() {
    let mut rng = rand::rng();
    let mut values = vec![0u32, 1, 4, 0xFF, 0x100, 0xDEAD_BEEF, u32::MAX - 1, u32::MAX];
    values.extend((0..1000).map(|_| rng.random::<u32>()));

    for value in values {
        let mut window = [0u8; 32];
        rng.fill_bytes(&mut window);
        let original = window;

        pack_u32(value, &mut window);
        assert_eq!(unpack_u32(&window), value);
        for (before, after) in original.iter().zip(window.iter()) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
    }
}

/// 验证解包只看最低位
#[test]
fn test_unpack_ignores_high_bits() {
    assert_eq!(unpack_byte(&[0xFE; 8]), 0x00);
    assert_eq!(unpack_byte(&[0x01; 8]), 0xFF);
    assert_eq!(unpack_byte(&[0x11, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x11]), 0x81);
    assert_eq!(unpack_u32(&[0xFF; 32]), u32::MAX);
}
