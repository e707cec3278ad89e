use cinnabar_engine::surface::shape::{RectGeometry, TriangleGeometry};
use cinnabar_engine::surface::transform::Transform2D;
use cinnabar_engine::utils::{Position, Size};

const EPS: f32 = 1e-4;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn identity_transform_round_trips_rect() {
    let geometry = RectGeometry::new(Position::new(40.0, 60.0), Size::new(120.0, 80.0));
    let rect = geometry.rendered_rect(&Transform2D::new());
    assert!(close(rect.x, 40.0));
    assert!(close(rect.y, 60.0));
    assert!(close(rect.width, 120.0));
    assert!(close(rect.height, 80.0));
}

#[test]
fn zero_rotation_keeps_centroid() {
    let geometry = RectGeometry::new(Position::new(10.0, 20.0), Size::new(30.0, 40.0));
    let mut transform = Transform2D::new();
    transform.set_pivot_to_center(geometry.center());
    transform.set_rotation(0.0);
    let center = geometry.rendered_center(&transform);
    assert!(close(center.x, 25.0));
    assert!(close(center.y, 40.0));
}

#[test]
fn change_scale_by_accumulates_additively() {
    // two deltas must land on the same state as their one-shot sum
    let mut split = Transform2D::new();
    split.change_scale_by(0.25, 0.5);
    split.change_scale_by(0.75, -0.25);

    let mut single = Transform2D::new();
    single.change_scale_by(1.0, 0.25);

    assert!(close(split.scale().x, single.scale().x));
    assert!(close(split.scale().y, single.scale().y));
}

#[test]
fn change_translation_by_accumulates_additively() {
    let mut transform = Transform2D::new();
    transform.change_translation_by(3.0, -2.0);
    transform.change_translation_by(-1.0, 5.0);
    assert!(close(transform.translation().x, 2.0));
    assert!(close(transform.translation().y, 3.0));
}

#[test]
fn set_rotation_replaces_the_pair() {
    let mut transform = Transform2D::new();
    transform.set_rotation(90.0);
    let [cos, sin] = transform.rotation_pair();
    assert!(close(cos, 0.0));
    assert!(close(sin, 1.0));

    transform.set_rotation(45.0);
    let [cos, sin] = transform.rotation_pair();
    assert!(close(cos, std::f32::consts::FRAC_1_SQRT_2));
    assert!(close(sin, std::f32::consts::FRAC_1_SQRT_2));
}

#[test]
fn change_rotation_by_sums_components_not_angles() {
    // the pair accumulates componentwise; two 45 degree deltas are NOT one
    // 90 degree rotation under this scheme
    let mut transform = Transform2D::new();
    transform.set_rotation(45.0);
    transform.change_rotation_by(45.0);
    let [cos, sin] = transform.rotation_pair();
    assert!(close(cos, 2.0 * std::f32::consts::FRAC_1_SQRT_2));
    assert!(close(sin, 2.0 * std::f32::consts::FRAC_1_SQRT_2));
    // the recovered angle still reads 45 degrees
    assert!(close(transform.angle_radians(), std::f32::consts::FRAC_PI_4));
}

#[test]
fn rotate_point_turns_about_pivot() {
    let mut transform = Transform2D::new();
    transform.set_rotation(90.0);
    let turned = transform.rotate_point(Position::new(2.0, 1.0), Position::new(1.0, 1.0));
    assert!(close(turned.x, 1.0));
    assert!(close(turned.y, 2.0));
}

#[test]
fn about_point_rotation_corrects_position_queries() {
    let geometry = RectGeometry::new(Position::new(1.0, 0.0), Size::new(2.0, 2.0));
    let mut transform = Transform2D::new();
    // rotate 90 degrees about the origin instead of the centroid
    transform.set_pivot_to_point(Position::new(0.0, 0.0));
    transform.set_rotation(90.0);
    let rect = geometry.rendered_rect(&transform);
    // corner (1, 0) swings up to (0, 1)
    assert!(close(rect.x, 0.0));
    assert!(close(rect.y, 1.0));
    // size is unaffected by rotation
    assert!(close(rect.width, 2.0));
    assert!(close(rect.height, 2.0));
}

#[test]
fn about_center_queries_skip_the_correction() {
    let geometry = RectGeometry::new(Position::new(5.0, 5.0), Size::new(10.0, 10.0));
    let mut transform = Transform2D::new();
    transform.set_pivot_to_center(geometry.center());
    transform.set_rotation(90.0);
    // rotating about its own centroid leaves the reported rect in place
    let rect = geometry.rendered_rect(&transform);
    assert!(close(rect.x, 5.0));
    assert!(close(rect.y, 5.0));
}

#[test]
fn translation_applies_after_rotation() {
    let geometry = RectGeometry::new(Position::new(0.0, 0.0), Size::new(4.0, 4.0));
    let mut transform = Transform2D::new();
    transform.set_pivot_to_center(geometry.center());
    transform.set_translation(7.0, -3.0);
    let rect = geometry.rendered_rect(&transform);
    assert!(close(rect.x, 7.0));
    assert!(close(rect.y, -3.0));
}

#[test]
fn scale_scales_both_position_and_size() {
    let geometry = RectGeometry::new(Position::new(10.0, 10.0), Size::new(10.0, 20.0));
    let mut transform = Transform2D::new();
    transform.set_scale(2.0, 3.0);
    let rect = geometry.rendered_rect(&transform);
    assert!(close(rect.x, 20.0));
    assert!(close(rect.y, 30.0));
    assert!(close(rect.width, 20.0));
    assert!(close(rect.height, 60.0));
}

#[test]
fn rect_update_center_tracks_scale() {
    let mut geometry = RectGeometry::new(Position::new(0.0, 0.0), Size::new(10.0, 10.0));
    let mut transform = Transform2D::new();
    transform.set_scale(2.0, 2.0);
    geometry.update_center(transform.scale());
    let center = geometry.center();
    assert!(close(center.x, 10.0));
    assert!(close(center.y, 10.0));
}

#[test]
fn triangle_centroid_is_vertex_mean() {
    let geometry = TriangleGeometry::new([
        Position::new(0.0, 0.0),
        Position::new(6.0, 0.0),
        Position::new(0.0, 3.0),
    ]);
    let center = geometry.center();
    assert!(close(center.x, 2.0));
    assert!(close(center.y, 1.0));
}
