//! Control overlay: the corner handles, an optional top-center handle, and
//! the bounding highlight.
//!
//! The overlay owns handle visibility. Its drawables are built once, lazily,
//! the first time an object is activated, and are then added to or removed
//! from the render scene as the active object comes and goes. The scene is
//! always passed in and queried; the overlay never assumes a handle is
//! attached.
//!
//! Handles are positioned only when [`Overlay::activate`] runs. The pointer
//! state machine calls it after every mutation so they stay glued to the
//! object while it moves, rotates, or resizes.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use serde::{Deserialize, Serialize};

use crate::consts::{HANDLE_FALLBACK_COLOR, HANDLE_SIZE, ICON_DELETE, ICON_DUPLICATE, ICON_RESIZE, ICON_ROTATE};
use crate::geom::{Point, Rect};
use crate::scene::{Drawable, HandleBody, ObjectId, PartialDrawable, SceneBackend};
use crate::transform::{ClickOp, DragOp};

/// Where a handle sits relative to the active object's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleSlot {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    /// Centered above the top edge. Unbound in the default set.
    TopCenter,
}

impl HandleSlot {
    /// Build and attach order.
    pub const ALL: [Self; 5] = [Self::TopLeft, Self::TopRight, Self::BottomRight, Self::BottomLeft, Self::TopCenter];

    fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
            Self::TopCenter => 4,
        }
    }

    /// Top-left corner for a `handle_w` x `handle_h` handle placed just outside `bounds`.
    #[must_use]
    pub fn position(self, bounds: Rect, handle_w: f64, handle_h: f64) -> Point {
        match self {
            Self::TopLeft => Point::new(bounds.left - handle_w, bounds.top - handle_h),
            Self::TopRight => Point::new(bounds.right(), bounds.top - handle_h),
            Self::BottomRight => Point::new(bounds.right(), bounds.bottom()),
            Self::BottomLeft => Point::new(bounds.left - handle_w, bounds.bottom()),
            Self::TopCenter => Point::new(bounds.left + bounds.width / 2.0 - handle_w / 2.0, bounds.top - handle_h),
        }
    }
}

/// Appearance and behaviour bound to one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleSpec {
    pub icon: Option<String>,
    pub color: String,
    pub on_drag: Option<DragOp>,
    pub on_click: Option<ClickOp>,
}

impl HandleSpec {
    /// A handle that acts on click.
    #[must_use]
    pub fn click(icon: &str, op: ClickOp) -> Self {
        Self { icon: Some(icon.to_string()), color: HANDLE_FALLBACK_COLOR.to_string(), on_drag: None, on_click: Some(op) }
    }

    /// A handle that acts while dragged.
    #[must_use]
    pub fn drag(icon: &str, op: DragOp) -> Self {
        Self { icon: Some(icon.to_string()), color: HANDLE_FALLBACK_COLOR.to_string(), on_drag: Some(op), on_click: None }
    }
}

/// At most one [`HandleSpec`] per slot. Unbound slots get no handle at all.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleSet {
    specs: [Option<HandleSpec>; 5],
}

impl Default for HandleSet {
    /// Duplicate top-left, rotate top-right, resize bottom-right, delete
    /// bottom-left. Top-center stays unbound.
    fn default() -> Self {
        Self {
            specs: [
                Some(HandleSpec::click(ICON_DUPLICATE, ClickOp::Duplicate)),
                Some(HandleSpec::drag(ICON_ROTATE, DragOp::Rotate)),
                Some(HandleSpec::drag(ICON_RESIZE, DragOp::Resize)),
                Some(HandleSpec::click(ICON_DELETE, ClickOp::Delete)),
                None,
            ],
        }
    }
}

impl HandleSet {
    #[must_use]
    pub fn spec(&self, slot: HandleSlot) -> Option<&HandleSpec> {
        self.specs[slot.index()].as_ref()
    }

    /// Bind `spec` to `slot`, replacing whatever was there.
    #[must_use]
    pub fn bind(mut self, slot: HandleSlot, spec: HandleSpec) -> Self {
        self.specs[slot.index()] = Some(spec);
        self
    }

    /// Leave `slot` without a handle.
    #[must_use]
    pub fn unbind(mut self, slot: HandleSlot) -> Self {
        self.specs[slot.index()] = None;
        self
    }

    /// Bound slots in build order.
    pub fn bound(&self) -> impl Iterator<Item = (HandleSlot, &HandleSpec)> {
        HandleSlot::ALL.into_iter().filter_map(|slot| self.spec(slot).map(|spec| (slot, spec)))
    }
}

#[derive(Debug, Clone)]
struct Built {
    /// One per bound slot, in [`HandleSlot::ALL`] order.
    handles: Vec<Drawable>,
    highlight: Drawable,
}

impl Built {
    /// Highlight first so handles draw above it.
    fn all(&self) -> impl Iterator<Item = &Drawable> {
        std::iter::once(&self.highlight).chain(self.handles.iter())
    }

    fn all_mut(&mut self) -> impl Iterator<Item = &mut Drawable> {
        std::iter::once(&mut self.highlight).chain(self.handles.iter_mut())
    }
}

/// Owner of the overlay drawables.
#[derive(Debug, Clone)]
pub struct Overlay {
    set: HandleSet,
    handle_size: f64,
    built: Option<Built>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(HandleSet::default(), HANDLE_SIZE)
    }
}

impl Overlay {
    #[must_use]
    pub fn new(set: HandleSet, handle_size: f64) -> Self {
        Self { set, handle_size, built: None }
    }

    /// Whether the overlay drawables have been constructed yet.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    #[must_use]
    pub fn handle_set(&self) -> &HandleSet {
        &self.set
    }

    /// The handle built for `slot`; `None` before the first build or when the slot is unbound.
    #[must_use]
    pub fn handle(&self, slot: HandleSlot) -> Option<&Drawable> {
        self.built
            .as_ref()
            .and_then(|b| b.handles.iter().find(|d| d.as_handle().is_some_and(|h| h.slot == slot)))
    }

    #[must_use]
    pub fn highlight(&self) -> Option<&Drawable> {
        self.built.as_ref().map(|b| &b.highlight)
    }

    /// Whether `id` belongs to one of the overlay drawables.
    #[must_use]
    pub fn owns(&self, id: &ObjectId) -> bool {
        self.built.as_ref().is_some_and(|b| b.all().any(|d| d.id == *id))
    }

    /// Build the overlay drawables if they don't exist yet. Idempotent.
    fn ensure_built(&mut self) -> &mut Built {
        let set = &self.set;
        let size = self.handle_size;
        self.built.get_or_insert_with(|| Built {
            handles: set
                .bound()
                .map(|(slot, spec)| {
                    let body = HandleBody {
                        slot,
                        icon: spec.icon.clone(),
                        color: spec.color.clone(),
                        on_drag: spec.on_drag,
                        on_click: spec.on_click,
                    };
                    Drawable::handle(body, size)
                })
                .collect(),
            highlight: Drawable::highlight(),
        })
    }

    /// Position and show the overlay around `target`, or hide and detach it for `None`.
    ///
    /// A target id that is no longer in the scene is treated as `None`.
    pub fn activate<S: SceneBackend + ?Sized>(&mut self, scene: &mut S, target: Option<ObjectId>) {
        let bounds = target.and_then(|id| scene.get(&id)).map(Drawable::bounding_rect);
        let Some(bounds) = bounds else {
            self.hide_all(scene);
            return;
        };

        let built = self.ensure_built();
        for handle in &mut built.handles {
            let Some(slot) = handle.as_handle().map(|h| h.slot) else {
                continue;
            };
            let frame = handle.bounding_rect();
            let pos = slot.position(bounds, frame.width, frame.height);
            let partial = PartialDrawable { visible: Some(true), ..PartialDrawable::position(pos.x, pos.y) };
            handle.apply(&partial);
            scene.set(&handle.id, &partial);
        }

        let partial = PartialDrawable {
            left: Some(bounds.left),
            top: Some(bounds.top),
            width: Some(bounds.width),
            height: Some(bounds.height),
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            angle: Some(0.0),
            visible: Some(true),
            locked: None,
        };
        built.highlight.apply(&partial);
        scene.set(&built.highlight.id, &partial);
    }

    /// Add every overlay drawable that isn't already in the scene.
    pub fn attach<S: SceneBackend + ?Sized>(&mut self, scene: &mut S) {
        let built = self.ensure_built();
        for d in built.all() {
            if !scene.contains(&d.id) {
                scene.add(d.clone());
            }
        }
    }

    /// Hide and detach all overlay drawables.
    pub fn refresh<S: SceneBackend + ?Sized>(&mut self, scene: &mut S) {
        self.hide_all(scene);
    }

    fn hide_all<S: SceneBackend + ?Sized>(&mut self, scene: &mut S) {
        let Some(built) = self.built.as_mut() else {
            return;
        };
        for d in built.all_mut() {
            d.visible = false;
            scene.remove(&d.id);
        }
    }
}
