use super::*;
use crate::blend::BlendMode;

const LIMIT: usize = 1 << 20;

fn store(w: u32, h: u32, px: [u8; 4]) -> PixelStore {
    let mut s = PixelStore::alloc(w, h, LIMIT).unwrap();
    s.fill(Color::from_array(px));
    s
}

fn gradient(w: u32, h: u32) -> PixelStore {
    let mut data = Vec::new();
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[x as u8 * 10, y as u8 * 10, 7, 255]);
        }
    }
    PixelStore::from_vec(w, h, data, LIMIT).unwrap()
}

#[test]
fn unscaled_copy_moves_exact_pixels() {
    let src = gradient(4, 4);
    let mut dst = store(4, 4, [0, 0, 0, 0]);
    blit(
        &src,
        IRect::new(1, 1, 2, 2),
        &mut dst,
        IRect::new(0, 0, 2, 2),
        BlendMode::None.equation(),
        ScaleMode::Nearest,
    )
    .unwrap();
    assert_eq!(dst.pixel(0, 0), src.pixel(1, 1));
    assert_eq!(dst.pixel(1, 1), src.pixel(2, 2));
    assert_eq!(dst.pixel(2, 2), Some(Color::TRANSPARENT));
}

#[test]
fn destination_is_clipped_not_rejected() {
    let src = store(4, 4, [9, 9, 9, 255]);
    let mut dst = store(4, 4, [0, 0, 0, 0]);
    blit(
        &src,
        IRect::new(0, 0, 4, 4),
        &mut dst,
        IRect::new(-2, 3, 4, 4),
        BlendMode::None.equation(),
        ScaleMode::Nearest,
    )
    .unwrap();
    assert_eq!(dst.pixel(0, 3), Some(Color::rgba(9, 9, 9, 255)));
    assert_eq!(dst.pixel(2, 3), Some(Color::TRANSPARENT));
    assert_eq!(dst.pixel(0, 2), Some(Color::TRANSPARENT));

    blit(
        &src,
        IRect::new(0, 0, 4, 4),
        &mut dst,
        IRect::new(100, 100, 4, 4),
        BlendMode::None.equation(),
        ScaleMode::Nearest,
    )
    .unwrap();
}

#[test]
fn out_of_bounds_source_is_a_render_state_failure() {
    let src = store(4, 4, [0, 0, 0, 255]);
    let mut dst = store(4, 4, [0, 0, 0, 0]);
    let err = blit(
        &src,
        IRect::new(2, 0, 4, 4),
        &mut dst,
        IRect::new(0, 0, 4, 4),
        BlendMode::None.equation(),
        ScaleMode::Nearest,
    )
    .unwrap_err();
    assert!(matches!(err, StrataError::RenderState(_)));
}

#[test]
fn nearest_upscale_duplicates_pixels() {
    let src = gradient(2, 1);
    let mut dst = store(4, 2, [0, 0, 0, 0]);
    blit(
        &src,
        IRect::new(0, 0, 2, 1),
        &mut dst,
        IRect::new(0, 0, 4, 2),
        BlendMode::None.equation(),
        ScaleMode::Nearest,
    )
    .unwrap();
    assert_eq!(dst.pixel(0, 0), src.pixel(0, 0));
    assert_eq!(dst.pixel(1, 1), src.pixel(0, 0));
    assert_eq!(dst.pixel(2, 0), src.pixel(1, 0));
    assert_eq!(dst.pixel(3, 1), src.pixel(1, 0));
}

#[test]
fn linear_upscale_interpolates_between_texels() {
    let mut data = vec![0u8, 0, 0, 255];
    data.extend_from_slice(&[200, 0, 0, 255]);
    let src = PixelStore::from_vec(2, 1, data, LIMIT).unwrap();
    let mut dst = store(4, 1, [0, 0, 0, 0]);
    blit(
        &src,
        IRect::new(0, 0, 2, 1),
        &mut dst,
        IRect::new(0, 0, 4, 1),
        BlendMode::None.equation(),
        ScaleMode::Linear,
    )
    .unwrap();
    let reds: Vec<u8> = (0..4).map(|x| dst.pixel(x, 0).unwrap().r).collect();
    assert_eq!(reds[0], 0);
    assert_eq!(reds[3], 200);
    assert!(reds[1] > 0 && reds[1] < reds[2] && reds[2] < 200);
}

#[test]
fn fill_blends_through_equation() {
    let mut dst = store(3, 3, [0, 0, 0, 0]);
    blit_fill(
        &mut dst,
        IRect::new(1, 1, 10, 10),
        Color::rgba(255, 0, 0, 128),
        BlendMode::Alpha.equation(),
    );
    assert_eq!(dst.pixel(0, 0), Some(Color::TRANSPARENT));
    assert_eq!(dst.pixel(2, 2).unwrap().a, 128);
    blit_fill(
        &mut dst,
        IRect::new(0, 0, 3, 3),
        Color::rgba(1, 2, 3, 4),
        BlendMode::None.equation(),
    );
    assert!((0..3).all(|i| dst.pixel(i, i) == Some(Color::rgba(1, 2, 3, 4))));
}
