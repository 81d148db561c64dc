use fixed::types::extra::U30;
use fixed::FixedI32;

use crate::endian::{BigEndian, Fixed16_16, Fixed2_30, Fixed8_8};

#[test]
fn test_integer_swap() {
    let value = BigEndian::<u32>::new(0x0102_0304u32);
    assert_eq!(value.as_bytes(), &[0x01, 0x02, 0x03, 0x04]);
    assert_eq!(value.get(), 0x0102_0304);
    assert_eq!(u32::from(value), 0x0102_0304);

    let value = BigEndian::<u16>::new(0xabcdu16);
    assert_eq!(value.as_bytes(), &[0xab, 0xcd]);

    let value = BigEndian::<i64>::new(-2i64);
    assert_eq!(value.as_bytes(), &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);
    assert_eq!(value.get(), -2);
}

#[test]
fn test_convertible_input() {
    // Anything that converts into the underlying type is accepted.
    let value = BigEndian::<u64>::new(7u32);
    assert_eq!(value.as_bytes(), &[0, 0, 0, 0, 0, 0, 0, 7]);

    let value: BigEndian<u32> = 5u32.into();
    assert_eq!(value, BigEndian::new(5u32));
}

#[test]
fn test_fixed_point_swaps_scaled_integer() {
    let value = BigEndian::<Fixed16_16>::new(Fixed16_16::from_num(1.5));
    assert_eq!(value.as_bytes(), &[0x00, 0x01, 0x80, 0x00]);
    assert_eq!(value.get(), Fixed16_16::from_num(1.5));

    let value = BigEndian::<Fixed2_30>::new(Fixed2_30::from_num(1));
    assert_eq!(value.as_bytes(), &[0x40, 0x00, 0x00, 0x00]);

    let value = BigEndian::<FixedI32<U30>>::new(FixedI32::<U30>::from_num(-1));
    assert_eq!(value.as_bytes(), &[0xc0, 0x00, 0x00, 0x00]);

    let value = BigEndian::<Fixed8_8>::new(Fixed8_8::from_num(1));
    assert_eq!(value.as_bytes(), &[0x01, 0x00]);

    let width = BigEndian::<Fixed16_16>::new(Fixed16_16::from_num(1920));
    assert_eq!(width.as_bytes(), &[0x07, 0x80, 0x00, 0x00]);
}

#[test]
fn test_write_and_read() {
    let mut out = [0u8; 6];
    let value = BigEndian::<u32>::new(0xdead_beefu32);

    assert_eq!(value.write_to(&mut out[1..]).unwrap(), 4);
    assert_eq!(out, [0, 0xde, 0xad, 0xbe, 0xef, 0]);

    let read = BigEndian::<u32>::read_from(&out[1..]).unwrap();
    assert_eq!(read.get(), 0xdead_beef);

    assert!(value.write_to(&mut out[4..]).is_err());
    assert!(BigEndian::<u64>::read_from(&out).is_err());
}

#[test]
fn test_default_is_zero() {
    assert_eq!(BigEndian::<u64>::default().get(), 0);
    assert_eq!(BigEndian::<Fixed16_16>::default().get(), Fixed16_16::ZERO);
}
