use cinnabar_engine::assets::texture::assign_slots;
use cinnabar_engine::surface::frame::{resolve_frame_rect, FrameStyle};
use cinnabar_engine::utils::{Position, ScreenSpace};

const EPS: f32 = 1e-4;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn pixel_frame_flips_y_from_the_top() {
    let screen = ScreenSpace::new(800.0, 600.0);
    let rect = resolve_frame_rect(screen, 100.0, 50.0, 200.0, 100.0, FrameStyle::empty());
    assert!(close(rect.x, 100.0));
    // 50 from the top of a 600-high screen, minus the height
    assert!(close(rect.y, 450.0));
    assert!(close(rect.width, 200.0));
    assert!(close(rect.height, 100.0));
}

#[test]
fn percent_flags_convert_each_axis() {
    let screen = ScreenSpace::new(800.0, 600.0);
    let style = FrameStyle::X_IS_PERCENT
        | FrameStyle::Y_IS_PERCENT
        | FrameStyle::WIDTH_IS_PERCENT
        | FrameStyle::HEIGHT_IS_PERCENT;
    let rect = resolve_frame_rect(screen, 50.0, 0.0, 25.0, 50.0, style);
    assert!(close(rect.x, 400.0));
    assert!(close(rect.width, 200.0));
    assert!(close(rect.height, 300.0));
    // y = 0 percent is the top edge, so the rect hangs just below it
    assert!(close(rect.y, 300.0));
}

#[test]
fn anchor_to_center_recenters_the_origin() {
    let screen = ScreenSpace::new(400.0, 400.0);
    let rect = resolve_frame_rect(
        screen,
        200.0,
        200.0,
        100.0,
        50.0,
        FrameStyle::ANCHOR_TO_CENTER,
    );
    assert!(close(rect.x, 150.0));
    // center (200 from top) -> top edge 175 from top -> bottom-left at 175
    assert!(close(rect.y, 175.0));
}

#[test]
fn percent_anchor_composes() {
    let screen = ScreenSpace::new(1000.0, 500.0);
    let style = FrameStyle::X_IS_PERCENT
        | FrameStyle::Y_IS_PERCENT
        | FrameStyle::ANCHOR_TO_CENTER;
    let rect = resolve_frame_rect(screen, 50.0, 50.0, 200.0, 100.0, style);
    // centered on the middle of the screen
    assert!(close(rect.x, 400.0));
    assert!(close(rect.y, 200.0));
}

#[test]
fn screen_percent_round_trips() {
    let screen = ScreenSpace::new(640.0, 480.0);
    let p = Position::new(32.0, 240.0);
    let round = screen.percent_to_pixels(screen.pixels_to_percent(p));
    assert!(close(round.x, p.x));
    assert!(close(round.y, p.y));
}

#[test]
fn ndc_conversion_maps_corners() {
    let screen = ScreenSpace::new(200.0, 100.0);
    let bl = screen.point_to_ndc(Position::new(0.0, 0.0));
    assert!(close(bl.x, -1.0));
    assert!(close(bl.y, -1.0));
    let tr = screen.point_to_ndc(Position::new(200.0, 100.0));
    assert!(close(tr.x, 1.0));
    assert!(close(tr.y, 1.0));
    // deltas have no origin shift
    let d = screen.delta_to_ndc(Position::new(100.0, 50.0));
    assert!(close(d.x, 1.0));
    assert!(close(d.y, 1.0));
}

#[test]
fn slots_assign_sequentially_and_wrap() {
    assert_eq!(assign_slots(3, 16), vec![0, 1, 2]);
    // a tiny slot budget wraps assignments around
    assert_eq!(assign_slots(3, 2), vec![0, 1, 0]);
    // a zero report never divides by zero
    assert_eq!(assign_slots(2, 0), vec![0, 0]);
}
