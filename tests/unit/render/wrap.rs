use super::*;

fn rect(x: i32, y: i32, w: i32, h: i32) -> IRect {
    IRect::new(x, y, w, h)
}

fn sampler(w: u32, h: u32) -> WrappingSampler {
    WrappingSampler::new(w, h).unwrap()
}

/// Clip large enough to keep every pass in these tests.
const WIDE: IRect = IRect {
    x: 0,
    y: 0,
    w: 1000,
    h: 1000,
};

#[test]
fn in_bounds_region_is_a_single_identical_pass() {
    let s = sampler(100, 50);
    let passes = s.passes(rect(10, 5, 80, 40), 3, 4, 1.0, WIDE);
    assert_eq!(passes.len(), 1);
    assert_eq!(passes[0].src, rect(10, 5, 80, 40));
    assert_eq!(passes[0].dst, rect(3, 4, 80, 40));
}

#[test]
fn full_surface_is_a_single_pass() {
    let s = sampler(100, 50);
    let passes = s.passes(rect(0, 0, 100, 50), 0, 0, 1.0, WIDE);
    assert_eq!(passes.as_slice(), &[CopyPass {
        src: rect(0, 0, 100, 50),
        dst: rect(0, 0, 100, 50),
    }]);
}

#[test]
fn horizontal_wrap_splits_into_two_passes() {
    let s = sampler(100, 100);
    let passes = s.passes(rect(90, 0, 20, 10), 0, 0, 1.0, WIDE);
    assert_eq!(passes.len(), 2);
    assert_eq!(passes[0].src, rect(90, 0, 10, 10));
    assert_eq!(passes[0].dst, rect(0, 0, 10, 10));
    assert_eq!(passes[1].src, rect(0, 0, 10, 10));
    assert_eq!(passes[1].dst, rect(10, 0, 10, 10));
}

#[test]
fn negative_coordinates_normalize_from_far_edge() {
    let s = sampler(100, 60);
    assert_eq!(s.normalize(-10, -1), (90, 59));
    assert_eq!(s.normalize(-100, -120), (0, 0));
    assert_eq!(s.normalize(250, 61), (50, 1));

    let passes = s.passes(rect(-10, 0, 5, 5), 0, 0, 1.0, WIDE);
    assert_eq!(passes.len(), 1);
    assert_eq!(passes[0].src, rect(90, 0, 5, 5));
}

#[test]
fn both_axes_wrap_in_four_ordered_passes() {
    let s = sampler(10, 10);
    let passes = s.passes(rect(8, 7, 5, 6), 100, 200, 1.0, WIDE);
    let got: Vec<_> = passes.iter().map(|p| (p.src, p.dst)).collect();
    assert_eq!(
        got,
        vec![
            (rect(8, 7, 2, 3), rect(100, 200, 2, 3)),
            (rect(0, 7, 3, 3), rect(102, 200, 3, 3)),
            (rect(8, 0, 2, 3), rect(100, 203, 2, 3)),
            (rect(0, 0, 3, 3), rect(102, 203, 3, 3)),
        ]
    );
}

#[test]
fn wider_than_two_widths_tiles_repeatedly() {
    let s = sampler(10, 10);
    let passes = s.passes(rect(5, 0, 27, 1), 0, 0, 1.0, WIDE);
    let widths: Vec<_> = passes.iter().map(|p| p.src.w).collect();
    assert_eq!(widths, vec![5, 10, 10, 2]);
    let xs: Vec<_> = passes.iter().map(|p| p.dst.x).collect();
    assert_eq!(xs, vec![0, 5, 15, 25]);
    assert_eq!(passes.iter().map(|p| p.src.w).sum::<i32>(), 27);
}

#[test]
fn scaled_passes_stay_adjacent() {
    let s = sampler(10, 10);
    let passes = s.passes(rect(7, 7, 5, 5), 0, 0, 1.5, WIDE);
    assert_eq!(passes.len(), 4);
    // cumulative: 3 * 1.5 = 4.5 -> 4, 5 * 1.5 = 7.5 -> 7
    assert_eq!(passes[0].dst, rect(0, 0, 4, 4));
    assert_eq!(passes[1].dst, rect(4, 0, 3, 4));
    assert_eq!(passes[2].dst, rect(0, 4, 4, 3));
    assert_eq!(passes[3].dst, rect(4, 4, 3, 3));
    assert_eq!(passes[0].dst.right(), i64::from(passes[1].dst.x));
}

#[test]
fn empty_or_negative_extent_produces_nothing() {
    let s = sampler(10, 10);
    assert!(s.passes(rect(0, 0, 0, 5), 0, 0, 1.0, WIDE).is_empty());
    assert!(s.passes(rect(0, 0, 5, -2), 0, 0, 1.0, WIDE).is_empty());
}

#[test]
fn passes_that_scale_to_nothing_are_dropped() {
    let s = sampler(10, 10);
    let passes = s.passes(rect(9, 0, 2, 1), 0, 0, 0.5, WIDE);
    // Runs of width 1 each: [0, 0.5) -> 0 and [0.5, 1) -> 0, both empty once truncated.
    assert!(passes.is_empty());
}

#[test]
fn zero_extent_is_invalid() {
    assert!(WrappingSampler::new(0, 4).unwrap_err().is_invalid_argument());
    assert!(WrappingSampler::new(4, 0).unwrap_err().is_invalid_argument());
}

#[test]
fn huge_region_is_bounded_by_clip() {
    let s = sampler(1, 1);
    let passes = s.passes(rect(0, 0, 30_000, 30_000), 0, 0, 1.0, rect(0, 0, 2, 2));
    assert!(passes.len() <= 9, "{} passes", passes.len());
    let covered: i32 = passes
        .iter()
        .filter(|p| p.dst.x < 2 && p.dst.y < 2)
        .count() as i32;
    assert_eq!(covered, 4);
}

#[test]
fn clip_window_skips_whole_periods_but_keeps_run_geometry() {
    let s = sampler(10, 1);
    // Runs at offsets 0 (len 5), 5, 15, 25 (len 10 each), 35 (len 2).
    let passes = s.passes(rect(5, 0, 37, 1), 0, 0, 1.0, rect(17, 0, 10, 1));
    let got: Vec<_> = passes.iter().map(|p| (p.src, p.dst)).collect();
    assert_eq!(
        got,
        vec![
            (rect(0, 0, 10, 1), rect(15, 0, 10, 1)),
            (rect(0, 0, 10, 1), rect(25, 0, 10, 1)),
        ]
    );
}

#[test]
fn destination_outside_clip_yields_nothing() {
    let s = sampler(10, 10);
    assert!(s.passes(rect(0, 0, 10, 10), 50, 50, 1.0, rect(0, 0, 20, 20)).is_empty());
    assert!(s.passes(rect(0, 0, 10, 10), 0, 0, 1.0, rect(0, 0, 0, 0)).is_empty());
}
