//! Surface scene index: hit-testing and lookups over the 2D scene.
//!
//! Every query walks `SceneBackend::objects` in insertion order and returns
//! the first match. Overlapping objects therefore resolve to the one added
//! earliest, not the one drawn on top.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{Point, Rect};
use crate::overlay::HandleSlot;
use crate::scene::{Drawable, ObjectId, SceneBackend};

/// Which part of the overlay or scene was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(HandleSlot),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub object_id: ObjectId,
    pub part: HitPart,
}

/// Hit box used for handles: scaled and unrotated, shifted by the origin offset.
#[must_use]
pub fn handle_hit_box(handle: &Drawable) -> Rect {
    handle.unrotated_rect()
}

/// First visible control handle whose box contains `point`.
#[must_use]
pub fn find_handle_at<S: SceneBackend + ?Sized>(scene: &S, point: Point) -> Option<&Drawable> {
    scene
        .objects()
        .iter()
        .find(|d| d.visible && d.as_handle().is_some() && handle_hit_box(d).contains(point))
}

/// First image or text whose rendered bounds contain `point`.
#[must_use]
pub fn find_object_at<S: SceneBackend + ?Sized>(scene: &S, point: Point) -> Option<&Drawable> {
    scene
        .objects()
        .iter()
        .find(|d| d.kind().is_movable() && d.bounding_rect().contains(point))
}

/// Identity lookup.
#[must_use]
pub fn find_by_id<'a, S: SceneBackend + ?Sized>(scene: &'a S, id: &ObjectId) -> Option<&'a Drawable> {
    scene.get(id)
}

/// Test what is under `point`, checking handles before object bodies.
#[must_use]
pub fn hit_test<S: SceneBackend + ?Sized>(scene: &S, point: Point) -> Option<Hit> {
    if let Some(handle) = find_handle_at(scene, point) {
        let slot = handle.as_handle().map(|h| h.slot)?;
        return Some(Hit { object_id: handle.id, part: HitPart::Handle(slot) });
    }
    find_object_at(scene, point).map(|d| Hit { object_id: d.id, part: HitPart::Body })
}
