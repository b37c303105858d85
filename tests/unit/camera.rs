use super::*;

#[test]
fn default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.world_to_screen(Point::new(12.0, -4.0)), (12, -4));
    assert_eq!(cam.screen_to_world(12, -4), Point::new(12.0, -4.0));
}

#[test]
fn world_to_screen_applies_offset_then_zoom() {
    let cam = Camera::new(10.0, 20.0, 2.0);
    assert_eq!(cam.world_to_screen(Point::new(15.0, 25.5)), (10, 11));
}

#[test]
fn pan_moves_origin() {
    let mut cam = Camera::default();
    cam.pan(Vec2::new(3.0, -2.0));
    assert_eq!(cam.origin, Point::new(3.0, -2.0));
    assert_eq!(cam.world_to_screen(Point::new(3.0, -2.0)), (0, 0));
}

#[test]
fn zoom_at_point_keeps_anchor_fixed() {
    let mut cam = Camera::new(5.0, 5.0, 1.0);
    let anchor = cam.screen_to_world(100, 50);
    cam.zoom_at_point(2.0, 100, 50);
    assert_eq!(cam.zoom, 2.0);
    let again = cam.screen_to_world(100, 50);
    assert!((again - anchor).hypot() < 1e-9);
}

#[test]
fn invalid_zoom_is_detected() {
    assert!(Camera::default().has_valid_zoom());
    assert!(!Camera::new(0.0, 0.0, 0.0).has_valid_zoom());
    assert!(!Camera::new(0.0, 0.0, -1.0).has_valid_zoom());
    assert!(!Camera::new(0.0, 0.0, f64::NAN).has_valid_zoom());
}
