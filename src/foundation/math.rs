/// `round(x * y / 255)` for 8-bit channel values widened to `u16`.
pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y).min(255) as u8
}

/// `round((a * fa + b * fb) / 255)` clamped into a channel.
///
/// Both products are summed before dividing so an equation like `src*sa + dst*(1-sa)` rounds
/// once, not twice.
pub(crate) fn lerp_sum_div255(a: u8, fa: u8, b: u8, fb: u8) -> u8 {
    let sum = u32::from(a) * u32::from(fa) + u32::from(b) * u32::from(fb);
    ((sum + 127) / 255).min(255) as u8
}

/// Truncating `v * scale`, the rounding a float-to-int cast applies to screen extents.
pub(crate) fn scale_trunc(v: i32, scale: f64) -> i32 {
    (f64::from(v) * scale) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
