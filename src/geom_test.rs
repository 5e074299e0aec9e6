#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_arithmetic() {
    let a = Point::new(3.0, 4.0);
    let b = Point::new(1.0, -2.0);
    assert_eq!(a + b, Point::new(4.0, 2.0));
    assert_eq!(a - b, Point::new(2.0, 6.0));
    assert_eq!(a * 2.0, Point::new(6.0, 8.0));
}

#[test]
fn point_length_and_normalize() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.length(), 5.0);
    assert!(point_approx_eq(p.normalized(), Point::new(0.6, 0.8)));
}

#[test]
fn point_normalize_zero_is_zero() {
    assert_eq!(Point::default().normalized(), Point::default());
}

#[test]
fn point_cross_z_sign() {
    let x = Point::new(1.0, 0.0);
    let y = Point::new(0.0, 1.0);
    assert_eq!(x.cross_z(y), 1.0);
    assert_eq!(y.cross_z(x), -1.0);
    assert_eq!(x.cross_z(x), 0.0);
}

#[test]
fn point_rotate_quarter_turn() {
    let p = Point::new(10.0, 0.0).rotate_around(Point::default(), 90.0);
    assert!(point_approx_eq(p, Point::new(0.0, 10.0)));
}

#[test]
fn point_rotate_around_pivot() {
    let p = Point::new(2.0, 1.0).rotate_around(Point::new(1.0, 1.0), 180.0);
    assert!(point_approx_eq(p, Point::new(0.0, 1.0)));
}

// --- Rect ---

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.center(), Point::new(25.0, 40.0));
}

#[test]
fn rect_contains_interior_and_border() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(5.0, 5.0)));
    assert!(r.contains(Point::new(0.0, 10.0)));
    assert!(!r.contains(Point::new(10.1, 5.0)));
    assert!(!r.contains(Point::new(5.0, -0.1)));
}

#[test]
fn rect_enclosing_points() {
    let r = Rect::enclosing(&[Point::new(3.0, -1.0), Point::new(-2.0, 4.0), Point::new(1.0, 1.0)]);
    assert_eq!(r, Rect::new(-2.0, -1.0, 5.0, 5.0));
}

#[test]
fn rect_enclosing_empty_is_zero() {
    assert_eq!(Rect::enclosing(&[]), Rect::default());
}
