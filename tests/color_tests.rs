use cinnabar_engine::surface::color::{
    spread_rect_colors, spread_triangle_colors, Rgba, BLUE, GREEN, RED, WHITE, YELLOW,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn normalization_maps_255_to_one() {
    let c = Rgba::new(255, 0, 128, 255).normalized();
    assert!((c[0] - 1.0).abs() < 1e-6);
    assert!((c[1] - 0.0).abs() < 1e-6);
    assert!((c[2] - 128.0 / 255.0).abs() < 1e-6);
    assert!((c[3] - 1.0).abs() < 1e-6);
}

#[test]
fn one_color_paints_every_corner() {
    let spread = spread_rect_colors(&[RED]);
    for corner in &spread {
        assert_eq!(*corner, RED.normalized());
    }
}

#[test]
fn two_colors_alternate_in_pairs() {
    // corners are bottom-left, top-left, top-right, bottom-right:
    // bottom-left and top-right share color 0
    let spread = spread_rect_colors(&[RED, GREEN]);
    assert_eq!(spread[0], RED.normalized()); // bottom-left
    assert_eq!(spread[1], GREEN.normalized()); // top-left
    assert_eq!(spread[2], RED.normalized()); // top-right
    assert_eq!(spread[3], GREEN.normalized()); // bottom-right
}

#[test]
fn three_colors_fan_with_repeated_middle() {
    // the fourth corner repeats color 1, so each fan triangle carries all
    // three colors
    let spread = spread_rect_colors(&[RED, GREEN, BLUE]);
    assert_eq!(spread[0], RED.normalized());
    assert_eq!(spread[1], GREEN.normalized());
    assert_eq!(spread[2], BLUE.normalized());
    assert_eq!(spread[3], GREEN.normalized());
}

#[test]
fn four_colors_map_one_per_corner() {
    let spread = spread_rect_colors(&[RED, GREEN, BLUE, YELLOW]);
    assert_eq!(spread[0], RED.normalized());
    assert_eq!(spread[1], GREEN.normalized());
    assert_eq!(spread[2], BLUE.normalized());
    assert_eq!(spread[3], YELLOW.normalized());
}

#[test]
fn unsupported_rect_count_falls_back_to_white() {
    init_logger();
    // zero or five colors never error; the rect silently turns opaque white
    let spread = spread_rect_colors(&[]);
    for corner in &spread {
        assert_eq!(*corner, WHITE.normalized());
    }
    let spread = spread_rect_colors(&[RED, GREEN, BLUE, YELLOW, WHITE]);
    for corner in &spread {
        assert_eq!(*corner, WHITE.normalized());
    }
}

#[test]
fn triangle_two_colors_alternate() {
    let spread = spread_triangle_colors(&[RED, GREEN]);
    assert_eq!(spread[0], RED.normalized());
    assert_eq!(spread[1], GREEN.normalized());
    assert_eq!(spread[2], RED.normalized());
}

#[test]
fn triangle_three_colors_exact() {
    let spread = spread_triangle_colors(&[RED, GREEN, BLUE]);
    assert_eq!(spread[0], RED.normalized());
    assert_eq!(spread[1], GREEN.normalized());
    assert_eq!(spread[2], BLUE.normalized());
}

#[test]
fn unsupported_triangle_count_falls_back_to_white() {
    init_logger();
    let spread = spread_triangle_colors(&[RED, GREEN, BLUE, YELLOW]);
    for vertex in &spread {
        assert_eq!(*vertex, WHITE.normalized());
    }
}
