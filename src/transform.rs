//! Transform operations on placed drawables, behind a shared lock gate.
//!
//! Every operation resolves the target by id first. A missing id yields
//! `StaleReference` and a locked object yields `Locked`; in both cases the
//! scene is left untouched. Operations never repaint; that is the caller's job.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::TransformError;
use crate::geom::Point;
use crate::scene::{Drawable, ObjectId, PartialDrawable, SceneBackend};

/// Behaviour run on every pointer move of a drag that started on a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragOp {
    Rotate,
    Resize,
}

impl DragOp {
    /// Apply one drag step to `object_id`.
    ///
    /// `handle_center` is the handle's rendered center before this step.
    ///
    /// # Errors
    ///
    /// Propagates the lock gate and, for resize, `DegenerateBounds`.
    pub fn apply<S: SceneBackend + ?Sized>(
        self,
        scene: &mut S,
        object_id: &ObjectId,
        handle_center: Point,
        offset: Point,
        cfg: &EngineConfig,
    ) -> Result<(), TransformError> {
        match self {
            Self::Rotate => rotate(scene, object_id, handle_center, offset, cfg.rotate_sensitivity).map(|_| ()),
            Self::Resize => resize(scene, object_id, offset, cfg.resize_damping).map(|_| ()),
        }
    }
}

/// Behaviour run when a handle is clicked without dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickOp {
    Duplicate,
    /// Tiled duplicate.
    Repeat,
    Delete,
}

/// What a click operation did to the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Created(Vec<ObjectId>),
    Deleted(ObjectId),
}

impl ClickOutcome {
    /// Whether the overlay and selection must be cleared afterwards.
    #[must_use]
    pub fn deactivates(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

impl ClickOp {
    /// Apply the click to `object_id`.
    ///
    /// # Errors
    ///
    /// Propagates the lock gate.
    pub fn apply<S: SceneBackend + ?Sized, R: Rng>(
        self,
        scene: &mut S,
        object_id: &ObjectId,
        cfg: &EngineConfig,
        rng: &mut R,
    ) -> Result<ClickOutcome, TransformError> {
        match self {
            Self::Duplicate => duplicate(scene, object_id).map(|id| ClickOutcome::Created(vec![id])),
            Self::Repeat => repeat(scene, object_id, cfg.repeat_count, rng).map(ClickOutcome::Created),
            Self::Delete => delete(scene, object_id).map(|d| ClickOutcome::Deleted(d.id)),
        }
    }
}

/// Resolve `id` and refuse locked objects.
fn unlocked<'a, S: SceneBackend + ?Sized>(scene: &'a S, id: &ObjectId) -> Result<&'a Drawable, TransformError> {
    let obj = scene.get(id).ok_or(TransformError::StaleReference(*id))?;
    if obj.locked {
        return Err(TransformError::Locked(*id));
    }
    Ok(obj)
}

/// Fold any angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if a >= 360.0 { 0.0 } else { a }
}

/// Signed angle in radians from `from` to `to`; positive when the z of `from x to` is positive.
#[must_use]
pub fn signed_angle(from: Point, to: Point) -> f64 {
    let cross = from.cross_z(to);
    let unsigned = cross.abs().atan2(from.dot(to));
    if cross > 0.0 { unsigned } else { -unsigned }
}

/// Pivot shared by rotate and resize: rendered center plus half the rendered extent.
#[must_use]
pub fn transform_pivot(obj: &Drawable) -> Point {
    let bounds = obj.bounding_rect();
    obj.center() + Point::new(bounds.width / 2.0, bounds.height / 2.0)
}

/// Uniform sample in `[min, max)`; a degenerate range returns `min`.
pub(crate) fn uniform<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.random::<f64>() * (max - min)
}

/// Translate by `offset`.
///
/// # Errors
///
/// `StaleReference` or `Locked`.
pub fn move_by<S: SceneBackend + ?Sized>(scene: &mut S, id: &ObjectId, offset: Point) -> Result<Point, TransformError> {
    let obj = unlocked(scene, id)?;
    let pos = obj.anchor() + offset;
    scene.set(id, &PartialDrawable::position(pos.x, pos.y));
    Ok(pos)
}

/// Rotate by the angle the handle sweeps around the pivot. Returns the new angle.
///
/// The handle is assumed to move by `offset * sensitivity`.
///
/// # Errors
///
/// `StaleReference` or `Locked`.
pub fn rotate<S: SceneBackend + ?Sized>(
    scene: &mut S,
    id: &ObjectId,
    handle_center: Point,
    offset: Point,
    sensitivity: f64,
) -> Result<f64, TransformError> {
    let obj = unlocked(scene, id)?;
    let pivot = transform_pivot(obj);
    let moved = handle_center + offset * sensitivity;

    let from = (handle_center - pivot).normalized();
    let to = (moved - pivot).normalized();
    let angle = normalize_angle(obj.angle + signed_angle(from, to).to_degrees());

    scene.set(id, &PartialDrawable { angle: Some(angle), ..Default::default() });
    Ok(angle)
}

/// Uniformly scale by a delta derived from the dominant axis of `offset`.
/// Returns the new `(scale_x, scale_y)`.
///
/// # Errors
///
/// `StaleReference`, `Locked`, or `DegenerateBounds` when the rendered extent
/// on the dominant axis is zero.
pub fn resize<S: SceneBackend + ?Sized>(
    scene: &mut S,
    id: &ObjectId,
    offset: Point,
    damping: f64,
) -> Result<(f64, f64), TransformError> {
    let obj = unlocked(scene, id)?;
    let bounds = obj.bounding_rect();
    let (drag, extent) = if offset.x.abs() > offset.y.abs() {
        (offset.x, bounds.width)
    } else {
        (offset.y, bounds.height)
    };
    if extent == 0.0 {
        return Err(TransformError::DegenerateBounds(*id));
    }

    let delta = drag / extent / damping;
    let scale = (obj.scale_x + delta, obj.scale_y + delta);
    scene.set(id, &PartialDrawable { scale_x: Some(scale.0), scale_y: Some(scale.1), ..Default::default() });
    Ok(scale)
}

/// Clone under a fresh id at the same transform.
///
/// # Errors
///
/// `StaleReference` or `Locked`.
pub fn duplicate<S: SceneBackend + ?Sized>(scene: &mut S, id: &ObjectId) -> Result<ObjectId, TransformError> {
    let copy = unlocked(scene, id)?.duplicate();
    let new_id = copy.id;
    scene.add(copy);
    info!(source = %id, %new_id, "duplicated object");
    Ok(new_id)
}

/// Insert `count` clones, scattered uniformly inside the scene's allowed
/// region when it has one, otherwise stacked on the source.
///
/// # Errors
///
/// `StaleReference` or `Locked`.
pub fn repeat<S: SceneBackend + ?Sized, R: Rng>(
    scene: &mut S,
    id: &ObjectId,
    count: usize,
    rng: &mut R,
) -> Result<Vec<ObjectId>, TransformError> {
    let source = unlocked(scene, id)?.clone();
    let region = scene.allowed_region();

    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let mut copy = source.duplicate();
        if let Some(r) = region {
            copy.left = uniform(rng, r.left, r.right());
            copy.top = uniform(rng, r.top, r.bottom());
        }
        ids.push(copy.id);
        scene.add(copy);
    }
    info!(source = %id, count, constrained = region.is_some(), "repeated object");
    Ok(ids)
}

/// Remove from the scene.
///
/// # Errors
///
/// `StaleReference` or `Locked`.
pub fn delete<S: SceneBackend + ?Sized>(scene: &mut S, id: &ObjectId) -> Result<Drawable, TransformError> {
    unlocked(scene, id)?;
    let removed = scene.remove(id).ok_or(TransformError::StaleReference(*id))?;
    info!(%id, "deleted object");
    Ok(removed)
}
