use crop_window::{Corner, Cropper, DragHandle, Edge, EdgeSet, MIN_CROP_LENGTH, Rect};
use image::{DynamicImage, Rgba, RgbaImage};

const EPS: f32 = 1e-3;

fn cropper(width: u32, height: u32, display: Rect) -> Cropper {
    let mut cropper = Cropper::new();
    cropper.set_source_image(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([200, 100, 50, 255]),
    )));
    cropper.set_display_rect(display);
    cropper
}

fn drag(cropper: &mut Cropper, from: (f32, f32), to: (f32, f32)) -> Option<DragHandle> {
    let handle = cropper.on_pointer_down(from.0, from.1);
    cropper.on_pointer_move(to.0, to.1);
    cropper.on_pointer_up();
    handle
}

/// Small deterministic generator so drag sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / ((1u64 << 24) as f32)
    }

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next()
    }
}

fn grab_point(edges: &EdgeSet, rng: &mut Lcg) -> (f32, f32) {
    let points = [
        (edges.left, edges.top),
        (edges.right, edges.top),
        (edges.left, edges.bottom),
        (edges.right, edges.bottom),
        (edges.left, edges.center_y()),
        (edges.right, edges.center_y()),
        (edges.center_x(), edges.top),
        (edges.center_x(), edges.bottom),
        (edges.center_x(), edges.center_y()),
    ];
    let i = (rng.next() * points.len() as f32) as usize % points.len();
    points[i]
}

fn assert_publishable(cropper: &Cropper) {
    let edges = cropper.edges();
    assert!(edges.left < edges.right, "degenerate width: {edges:?}");
    assert!(edges.top < edges.bottom, "degenerate height: {edges:?}");
    assert!(
        cropper.display_rect().contains_rect(&edges.to_rect(), EPS),
        "{edges:?} escapes {:?}",
        cropper.display_rect()
    );
}

fn run_random_drags(cropper: &mut Cropper, seed: u64, check: impl Fn(&Cropper)) {
    let mut rng = Lcg(seed);
    for _ in 0..200 {
        let (x, y) = grab_point(&cropper.edges(), &mut rng);
        cropper.on_pointer_down(x, y);
        for _ in 0..5 {
            cropper.on_pointer_move(rng.range(-150.0, 650.0), rng.range(-150.0, 400.0));
            check(cropper);
        }
        cropper.on_pointer_up();
        check(cropper);
    }
}

#[test]
fn test_free_drags_keep_window_valid() {
    let mut c = cropper(1000, 500, Rect::new(0.0, 0.0, 500.0, 250.0));
    run_random_drags(&mut c, 7, assert_publishable);
}

#[test]
fn test_locked_drags_keep_window_valid_and_square() {
    let mut c = cropper(1000, 500, Rect::new(20.0, 30.0, 520.0, 280.0));
    c.set_aspect_ratio(1, 1).unwrap();
    c.set_aspect_lock_enabled(true).unwrap();
    run_random_drags(&mut c, 11, |c| {
        assert_publishable(c);
        let edges = c.edges();
        assert!((edges.width() - edges.height()).abs() <= 1.0, "{edges:?}");
    });
}

#[test]
fn test_locked_wide_ratio_drags() {
    let mut c = cropper(800, 800, Rect::new(0.0, 0.0, 400.0, 400.0));
    c.set_aspect_ratio(16, 9).unwrap();
    c.set_aspect_lock_enabled(true).unwrap();
    run_random_drags(&mut c, 23, |c| {
        assert_publishable(c);
        let edges = c.edges();
        assert!((edges.width() / edges.height() - 16.0 / 9.0).abs() < 0.01);
    });
}

#[test]
fn test_square_corner_drag() {
    let mut c = cropper(1000, 500, Rect::new(0.0, 0.0, 500.0, 250.0));
    c.set_aspect_ratio(1, 1).unwrap();
    c.set_aspect_lock_enabled(true).unwrap();
    let start = c.edges();
    let handle = drag(&mut c, (start.right, start.bottom), (start.right - 70.0, start.bottom - 10.0));
    assert_eq!(handle, Some(DragHandle::ResizeCorner(Corner::BottomRight)));
    let edges = c.edges();
    assert!((edges.width() - edges.height()).abs() <= 1.0);
    assert_eq!(edges.left, start.left);
    assert_eq!(edges.top, start.top);
    assert!(edges.width() < start.width());
}

#[test]
fn test_minimum_size_enforced() {
    let mut c = cropper(1000, 500, Rect::new(0.0, 0.0, 500.0, 250.0));
    // Default window is (50, 25, 450, 225); shrink it to 100x100 first.
    drag(&mut c, (450.0, 225.0), (150.0, 125.0));
    assert_eq!(c.edges(), EdgeSet::new(50.0, 25.0, 150.0, 125.0));

    drag(&mut c, (150.0, 125.0), (60.0, 35.0));
    let edges = c.edges();
    assert_eq!(edges.width(), MIN_CROP_LENGTH);
    assert_eq!(edges.height(), MIN_CROP_LENGTH);
}

#[test]
fn test_minimum_size_enforced_when_locked() {
    let mut c = cropper(1000, 1000, Rect::new(0.0, 0.0, 400.0, 400.0));
    c.set_aspect_ratio(1, 1).unwrap();
    c.set_aspect_lock_enabled(true).unwrap();
    assert_eq!(c.edges(), EdgeSet::new(40.0, 40.0, 360.0, 360.0));
    drag(&mut c, (360.0, 360.0), (100.0, 100.0));
    assert_eq!(c.edges(), EdgeSet::new(40.0, 40.0, 100.0, 100.0));

    drag(&mut c, (100.0, 100.0), (10.0, 10.0));
    let edges = c.edges();
    assert!((edges.width() - MIN_CROP_LENGTH).abs() < EPS);
    assert!((edges.height() - MIN_CROP_LENGTH).abs() < EPS);
    assert_eq!(edges.left, 40.0);
    assert_eq!(edges.top, 40.0);
}

#[test]
fn test_move_window_clamps_rigidly() {
    let mut c = cropper(1000, 500, Rect::new(0.0, 0.0, 500.0, 250.0));
    let before = c.edges();
    let handle = drag(&mut c, (250.0, 125.0), (900.0, 900.0));
    assert_eq!(handle, Some(DragHandle::MoveWindow));
    let after = c.edges();
    assert_eq!(after.width(), before.width());
    assert_eq!(after.height(), before.height());
    assert_eq!(after.right, 500.0);
    assert_eq!(after.bottom, 250.0);
}

#[test]
fn test_single_edge_drag_free() {
    let mut c = cropper(1000, 500, Rect::new(0.0, 0.0, 500.0, 250.0));
    let handle = drag(&mut c, (50.0, 125.0), (120.0, 180.0));
    assert_eq!(handle, Some(DragHandle::ResizeEdge(Edge::Left)));
    assert_eq!(c.edges(), EdgeSet::new(120.0, 25.0, 450.0, 225.0));
}

#[test]
fn test_edge_snaps_to_display_boundary() {
    let mut c = cropper(1000, 500, Rect::new(0.0, 0.0, 500.0, 250.0));
    drag(&mut c, (450.0, 125.0), (498.0, 125.0));
    assert_eq!(c.edges().right, 500.0);
}

#[test]
fn test_locked_edge_drag_preserves_ratio() {
    let mut c = cropper(1000, 1000, Rect::new(0.0, 0.0, 400.0, 400.0));
    c.set_aspect_ratio(2, 1).unwrap();
    c.set_aspect_lock_enabled(true).unwrap();
    let start = c.edges();
    assert_eq!(start, EdgeSet::new(40.0, 120.0, 360.0, 280.0));

    let handle = drag(&mut c, (start.center_x(), start.top), (start.center_x(), 150.0));
    assert_eq!(handle, Some(DragHandle::ResizeEdge(Edge::Top)));
    let edges = c.edges();
    assert_eq!(edges.bottom, 280.0);
    assert_eq!(edges.top, 150.0);
    assert!((edges.width() - 260.0).abs() < EPS);
    assert!((edges.center_x() - 200.0).abs() < EPS);
}

#[test]
fn test_locked_edge_dragged_past_opposite_side_settles_at_minimum() {
    let mut locked = cropper(1000, 1000, Rect::new(0.0, 0.0, 400.0, 400.0));
    locked.set_aspect_ratio(1, 1).unwrap();
    locked.set_aspect_lock_enabled(true).unwrap();
    assert_eq!(locked.edges(), EdgeSet::new(40.0, 40.0, 360.0, 360.0));

    let handle = drag(&mut locked, (360.0, 200.0), (-100.0, 200.0));
    assert_eq!(handle, Some(DragHandle::ResizeEdge(Edge::Right)));
    let edges = locked.edges();
    assert_eq!(edges.left, 40.0);
    assert_eq!(edges.right, 80.0);
    assert!((edges.width() - MIN_CROP_LENGTH).abs() < EPS);
    assert!((edges.height() - MIN_CROP_LENGTH).abs() < EPS);

    // Same drag without the lock stops at the same side position.
    let mut free = cropper(1000, 1000, Rect::new(0.0, 0.0, 400.0, 400.0));
    drag(&mut free, (360.0, 200.0), (-100.0, 200.0));
    assert_eq!(free.edges().right, edges.right);
}

#[test]
fn test_locked_corner_stops_at_boundary() {
    let mut c = cropper(1000, 1000, Rect::new(0.0, 0.0, 400.0, 400.0));
    c.set_aspect_ratio(1, 1).unwrap();
    c.set_aspect_lock_enabled(true).unwrap();
    drag(&mut c, (40.0, 40.0), (360.0, 360.0));
    assert_eq!(c.edges(), EdgeSet::new(320.0, 320.0, 360.0, 360.0));

    drag(&mut c, (360.0, 360.0), (450.0, 450.0));
    let full = c.edges();
    assert_eq!(full, EdgeSet::new(320.0, 320.0, 400.0, 400.0));

    // No room left beyond the display corner.
    c.on_pointer_down(400.0, 400.0);
    assert!(!c.on_pointer_move(480.0, 470.0));
    c.on_pointer_up();
    assert_eq!(c.edges(), full);
}

#[test]
fn test_set_display_rect_idempotent() {
    let mut c = cropper(1000, 500, Rect::new(0.0, 0.0, 500.0, 250.0));
    drag(&mut c, (250.0, 125.0), (230.0, 140.0));
    let rect = Rect::new(10.0, 10.0, 410.0, 210.0);
    c.set_display_rect(rect);
    let first = c.edges();
    c.set_display_rect(rect);
    assert_eq!(c.edges(), first);
    assert!(rect.contains_rect(&first.to_rect(), EPS));
}

#[test]
fn test_display_rect_change_carries_window() {
    let mut c = cropper(1000, 500, Rect::new(0.0, 0.0, 500.0, 250.0));
    let before = c.actual_crop_rect().unwrap();
    c.set_display_rect(Rect::new(100.0, 50.0, 350.0, 175.0));
    let after = c.actual_crop_rect().unwrap();
    assert!((before.left - after.left).abs() < 0.5);
    assert!((before.right - after.right).abs() < 0.5);
    assert!((before.top - after.top).abs() < 0.5);
    assert!((before.bottom - after.bottom).abs() < 0.5);
}

#[test]
fn test_pointer_ignored_without_image() {
    let mut c = Cropper::new();
    c.set_display_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(c.on_pointer_down(50.0, 50.0), None);
    assert!(!c.is_dragging());
}
