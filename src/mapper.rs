//! Coordinate mapping between 3D-surface UVs and the 2D design surface.
//!
//! The model's UV layout is assumed to map 1:1 and axis-aligned onto the
//! design surface: no rotation, flipping, or per-island distortion. Values are
//! not clamped; a UV outside `[0, 1]` maps to a point outside the surface.

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

use crate::consts::SURFACE_EXTENT;
use crate::geom::{Point, Uv};

/// Scale a unit UV into design-surface units.
#[must_use]
pub fn surface_uv_to_design_point(uv: Uv, surface_extent: f64) -> Point {
    Point { x: uv.u * surface_extent, y: uv.v * surface_extent }
}

/// Inverse of [`surface_uv_to_design_point`]. A non-positive extent maps everything to the origin.
#[must_use]
pub fn design_point_to_surface_uv(point: Point, surface_extent: f64) -> Uv {
    if surface_extent <= 0.0 {
        return Uv::default();
    }
    Uv { u: point.x / surface_extent, v: point.y / surface_extent }
}

/// The mapping bound to one surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapper {
    pub extent: f64,
}

impl Default for SurfaceMapper {
    fn default() -> Self {
        Self { extent: SURFACE_EXTENT }
    }
}

impl SurfaceMapper {
    #[must_use]
    pub fn new(extent: f64) -> Self {
        Self { extent }
    }

    #[must_use]
    pub fn to_design(&self, uv: Uv) -> Point {
        surface_uv_to_design_point(uv, self.extent)
    }

    #[must_use]
    pub fn to_uv(&self, point: Point) -> Uv {
        design_point_to_surface_uv(point, self.extent)
    }

    /// Convert a design-space distance back into UV units.
    #[must_use]
    pub fn design_dist_to_uv(&self, dist: f64) -> f64 {
        if self.extent <= 0.0 {
            return 0.0;
        }
        dist / self.extent
    }
}
