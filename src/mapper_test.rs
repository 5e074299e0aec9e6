#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- surface_uv_to_design_point ---

#[test]
fn uv_origin_maps_to_origin() {
    assert_eq!(surface_uv_to_design_point(Uv::new(0.0, 0.0), 600.0), Point::new(0.0, 0.0));
}

#[test]
fn uv_unit_maps_to_extent() {
    assert_eq!(surface_uv_to_design_point(Uv::new(1.0, 1.0), 600.0), Point::new(600.0, 600.0));
}

#[test]
fn uv_scales_each_axis_independently() {
    let p = surface_uv_to_design_point(Uv::new(0.25, 0.5), 400.0);
    assert_eq!(p, Point::new(100.0, 200.0));
}

#[test]
fn uv_out_of_range_is_not_clamped() {
    let p = surface_uv_to_design_point(Uv::new(1.5, -0.5), 100.0);
    assert_eq!(p, Point::new(150.0, -50.0));
}

// --- design_point_to_surface_uv ---

#[test]
fn design_point_maps_back_to_uv() {
    let uv = design_point_to_surface_uv(Point::new(150.0, 450.0), 600.0);
    assert!(approx_eq(uv.u, 0.25));
    assert!(approx_eq(uv.v, 0.75));
}

#[test]
fn design_point_with_zero_extent_is_origin() {
    assert_eq!(design_point_to_surface_uv(Point::new(5.0, 5.0), 0.0), Uv::default());
}

// --- SurfaceMapper ---

#[test]
fn mapper_default_uses_surface_extent() {
    assert_eq!(SurfaceMapper::default().extent, crate::consts::SURFACE_EXTENT);
}

#[test]
fn mapper_to_design_then_back() {
    let mapper = SurfaceMapper::new(512.0);
    let uv = Uv::new(0.3, 0.9);
    let back = mapper.to_uv(mapper.to_design(uv));
    assert!(approx_eq(back.u, uv.u));
    assert!(approx_eq(back.v, uv.v));
}

#[test]
fn mapper_design_dist_to_uv() {
    let mapper = SurfaceMapper::new(200.0);
    assert!(approx_eq(mapper.design_dist_to_uv(50.0), 0.25));
    assert_eq!(SurfaceMapper::new(0.0).design_dist_to_uv(50.0), 0.0);
}
