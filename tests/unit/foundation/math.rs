use super::*;

#[test]
fn mul_div255_identity_and_zero() {
    for v in [0u16, 1, 127, 128, 254, 255] {
        assert_eq!(mul_div255_u16(v, 255), v);
        assert_eq!(mul_div255_u16(v, 0), 0);
    }
}

#[test]
fn mul_div255_rounds_half_up() {
    assert_eq!(mul_div255_u8(128, 128), 64);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn lerp_sum_rounds_once() {
    // 128 + 128 * 127 / 255 = 191.75..., rounded once.
    assert_eq!(lerp_sum_div255(128, 255, 128, 127), 192);
    assert_eq!(lerp_sum_div255(255, 255, 255, 255), 255);
}

#[test]
fn scale_trunc_truncates_toward_zero() {
    assert_eq!(scale_trunc(10, 1.0), 10);
    assert_eq!(scale_trunc(10, 1.55), 15);
    assert_eq!(scale_trunc(-3, 1.5), -4);
    assert_eq!(scale_trunc(3, 0.5), 1);
}
