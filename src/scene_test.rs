#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn rect_approx_eq(a: Rect, b: Rect) -> bool {
    approx_eq(a.left, b.left) && approx_eq(a.top, b.top) && approx_eq(a.width, b.width) && approx_eq(a.height, b.height)
}

fn handle_body(slot: HandleSlot) -> HandleBody {
    HandleBody { slot, icon: None, color: "#fff".into(), on_drag: None, on_click: None }
}

// =============================================================
// ObjectKind
// =============================================================

#[test]
fn movable_kinds() {
    assert!(ObjectKind::Image.is_movable());
    assert!(ObjectKind::Text.is_movable());
    assert!(!ObjectKind::Control.is_movable());
}

#[test]
fn kind_follows_body() {
    assert_eq!(Drawable::image("a.png", 10.0, 10.0).kind(), ObjectKind::Image);
    assert_eq!(Drawable::text("hi", 10.0, 10.0).kind(), ObjectKind::Text);
    assert_eq!(Drawable::handle(handle_body(HandleSlot::TopLeft), 20.0).kind(), ObjectKind::Control);
    assert_eq!(Drawable::highlight().kind(), ObjectKind::Control);
}

#[test]
fn kind_serializes_uppercase() {
    assert_eq!(serde_json::to_value(ObjectKind::Image).unwrap(), json!("IMAGE"));
    assert_eq!(serde_json::to_value(ObjectKind::Control).unwrap(), json!("CONTROL"));
}

// =============================================================
// Drawable constructors
// =============================================================

#[test]
fn text_uses_default_style() {
    let d = Drawable::text("hello", 100.0, 40.0);
    match d.body {
        Body::Text { text, font_size, fill } => {
            assert_eq!(text, "hello");
            assert_eq!(font_size, 40.0);
            assert_eq!(fill, "red");
        }
        other => panic!("expected text body, got {other:?}"),
    }
}

#[test]
fn overlay_drawables_start_hidden() {
    assert!(!Drawable::handle(handle_body(HandleSlot::TopLeft), 20.0).visible);
    assert!(!Drawable::highlight().visible);
}

#[test]
fn placed_drawables_start_visible_unlocked() {
    let d = Drawable::image("a.png", 10.0, 10.0);
    assert!(d.visible);
    assert!(!d.locked);
    assert_eq!(d.angle, 0.0);
    assert_eq!((d.scale_x, d.scale_y), (1.0, 1.0));
}

#[test]
fn as_handle_only_for_handles() {
    assert!(Drawable::handle(handle_body(HandleSlot::BottomLeft), 20.0).as_handle().is_some());
    assert!(Drawable::highlight().as_handle().is_none());
    assert!(Drawable::image("a.png", 1.0, 1.0).as_handle().is_none());
}

#[test]
fn body_serializes_with_type_tag() {
    let v = serde_json::to_value(Drawable::image("logo.png", 1.0, 1.0).body).unwrap();
    assert_eq!(v, json!({ "type": "image", "source": "logo.png" }));
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn bounding_rect_top_left_origin() {
    let d = Drawable::image("a", 50.0, 30.0).at(10.0, 20.0);
    assert_eq!(d.bounding_rect(), Rect::new(10.0, 20.0, 50.0, 30.0));
}

#[test]
fn bounding_rect_center_origin() {
    let d = Drawable::image("a", 50.0, 50.0).at(100.0, 100.0).with_origin(Origin::Center);
    assert_eq!(d.bounding_rect(), Rect::new(75.0, 75.0, 50.0, 50.0));
    assert_eq!(d.center(), Point::new(100.0, 100.0));
}

#[test]
fn bounding_rect_includes_scale() {
    let mut d = Drawable::image("a", 50.0, 30.0).at(0.0, 0.0);
    d.scale_x = 2.0;
    d.scale_y = 0.5;
    assert_eq!(d.bounding_rect(), Rect::new(0.0, 0.0, 100.0, 15.0));
}

#[test]
fn bounding_rect_grows_under_rotation() {
    let mut d = Drawable::image("a", 10.0, 10.0).at(0.0, 0.0).with_origin(Origin::Center);
    d.angle = 45.0;
    let side = 10.0 * std::f64::consts::SQRT_2;
    assert!(rect_approx_eq(d.bounding_rect(), Rect::new(-side / 2.0, -side / 2.0, side, side)));
}

#[test]
fn quarter_turn_swaps_extent() {
    let mut d = Drawable::image("a", 40.0, 10.0).at(0.0, 0.0).with_origin(Origin::Center);
    d.angle = 90.0;
    assert!(rect_approx_eq(d.bounding_rect(), Rect::new(-5.0, -20.0, 10.0, 40.0)));
}

#[test]
fn top_left_origin_rotates_about_anchor() {
    let mut d = Drawable::image("a", 10.0, 10.0).at(0.0, 0.0);
    d.angle = 90.0;
    assert!(rect_approx_eq(d.bounding_rect(), Rect::new(-10.0, 0.0, 10.0, 10.0)));
    let c = d.center();
    assert!(approx_eq(c.x, -5.0) && approx_eq(c.y, 5.0));
}

#[test]
fn duplicate_gets_fresh_id_same_transform() {
    let mut d = Drawable::text("x", 10.0, 10.0).at(3.0, 4.0);
    d.angle = 30.0;
    let copy = d.duplicate();
    assert_ne!(copy.id, d.id);
    assert_eq!(copy.body, d.body);
    assert_eq!((copy.left, copy.top, copy.angle), (3.0, 4.0, 30.0));
}

// =============================================================
// PartialDrawable
// =============================================================

#[test]
fn apply_partial_only_touches_present_fields() {
    let mut d = Drawable::image("a", 10.0, 10.0).at(1.0, 2.0);
    d.apply(&PartialDrawable { angle: Some(15.0), locked: Some(true), ..Default::default() });
    assert_eq!(d.angle, 15.0);
    assert!(d.locked);
    assert_eq!((d.left, d.top), (1.0, 2.0));
}

#[test]
fn partial_skips_absent_fields_when_serialized() {
    let v = serde_json::to_value(PartialDrawable::position(5.0, 6.0)).unwrap();
    assert_eq!(v, json!({ "left": 5.0, "top": 6.0 }));
}

// =============================================================
// MemoryScene
// =============================================================

#[test]
fn memory_scene_keeps_insertion_order() {
    let mut scene = MemoryScene::new();
    let a = Drawable::image("a", 1.0, 1.0);
    let b = Drawable::image("b", 1.0, 1.0);
    let (ida, idb) = (a.id, b.id);
    scene.add(a);
    scene.add(b);
    let ids: Vec<_> = scene.objects().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![ida, idb]);
}

#[test]
fn memory_scene_add_same_id_replaces_in_place() {
    let mut scene = MemoryScene::new();
    let a = Drawable::image("a", 1.0, 1.0);
    let mut a2 = a.clone();
    a2.left = 50.0;
    scene.add(a);
    scene.add(Drawable::image("b", 1.0, 1.0));
    scene.add(a2.clone());
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.objects()[0], a2);
}

#[test]
fn memory_scene_remove_returns_drawable() {
    let mut scene = MemoryScene::new();
    let a = Drawable::image("a", 1.0, 1.0);
    let id = a.id;
    scene.add(a);
    assert_eq!(scene.remove(&id).map(|d| d.id), Some(id));
    assert!(scene.is_empty());
    assert!(scene.remove(&id).is_none());
}

#[test]
fn memory_scene_set_missing_returns_false() {
    let mut scene = MemoryScene::new();
    assert!(!scene.set(&Uuid::new_v4(), &PartialDrawable::visibility(false)));
}

#[test]
fn memory_scene_set_applies_partial() {
    let mut scene = MemoryScene::new();
    let a = Drawable::image("a", 1.0, 1.0);
    let id = a.id;
    scene.add(a);
    assert!(scene.set(&id, &PartialDrawable::position(7.0, 8.0)));
    let got = scene.get(&id).unwrap();
    assert_eq!((got.left, got.top), (7.0, 8.0));
}

#[test]
fn memory_scene_counts_renders() {
    let mut scene = MemoryScene::new();
    scene.render_all();
    scene.render_all();
    assert_eq!(scene.render_count(), 2);
}

#[test]
fn memory_scene_allowed_region() {
    let region = Rect::new(0.0, 0.0, 100.0, 50.0);
    let mut scene = MemoryScene::new().with_allowed_region(region);
    assert_eq!(scene.allowed_region(), Some(region));
    scene.set_allowed_region(None);
    assert_eq!(scene.allowed_region(), None);
}

#[test]
fn memory_scene_load_snapshot_replaces() {
    let mut scene = MemoryScene::new();
    scene.add(Drawable::image("old", 1.0, 1.0));
    scene.load_snapshot(vec![Drawable::text("a", 1.0, 1.0), Drawable::text("b", 1.0, 1.0)]);
    assert_eq!(scene.len(), 2);
    assert!(scene.objects().iter().all(|d| d.kind() == ObjectKind::Text));
}

#[test]
fn mut_ref_is_a_backend() {
    fn add_one<S: SceneBackend>(mut scene: S) {
        scene.add(Drawable::image("a", 1.0, 1.0));
    }
    let mut scene = MemoryScene::new();
    add_one(&mut scene);
    assert_eq!(scene.len(), 1);
}
