//! Input model: resolved surface hits, selection, and the gesture phase.
//!
//! The host raycasts against the model and hands the engine a [`SurfaceHit`]
//! (or nothing, when the ray missed). `SelectionState` is what survives
//! between events; `InputState` names the gesture currently in progress.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::{Point, Uv};
use crate::overlay::HandleSlot;
use crate::scene::ObjectId;

/// A ray hit on the model, already reduced to a named mesh part and its UV.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceHit {
    /// Name of the mesh part the ray hit.
    pub region: String,
    pub uv: Uv,
}

impl SurfaceHit {
    #[must_use]
    pub fn new(region: impl Into<String>, uv: Uv) -> Self {
        Self { region: region.into(), uv }
    }
}

/// The handle a gesture started on, with click-vs-drag bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveHandle {
    pub id: ObjectId,
    pub slot: HandleSlot,
    down: bool,
    moved: bool,
}

impl ActiveHandle {
    /// A handle that was just pressed and has not moved.
    #[must_use]
    pub fn pressed(id: ObjectId, slot: HandleSlot) -> Self {
        Self { id, slot, down: true, moved: false }
    }

    #[must_use]
    pub fn is_down(&self) -> bool {
        self.down
    }

    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Record a move. Ignored unless the handle is down.
    pub fn mark_moved(&mut self) {
        if self.down {
            self.moved = true;
        }
    }

    /// Down with no intervening move.
    #[must_use]
    pub fn is_click(&self) -> bool {
        self.down && !self.moved
    }

    pub fn release(&mut self) {
        self.down = false;
        self.moved = false;
    }
}

/// State carried between pointer events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// The single active object, if any.
    pub active_id: Option<ObjectId>,
    /// Design-space pointer position at the previous event of the gesture.
    pub last_point: Option<Point>,
    /// Mesh part the active object was grabbed on; moves are only accepted from it.
    pub region: Option<String>,
    pub handle: Option<ActiveHandle>,
}

impl SelectionState {
    /// Whether move events can be applied: object, previous point, and region are all known.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.active_id.is_some() && self.last_point.is_some() && self.region.is_some()
    }

    /// Drop the active object and everything tied to it.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Gesture phase between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A drag or click that started on an overlay handle.
    HandleDown { slot: HandleSlot },
    /// A drag that started on an object body.
    ObjectDown { id: ObjectId },
}
