use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::consts::DEFAULT_TEXT;
use crate::error::TransformError;
use crate::geom::Point;
use crate::hit::{find_handle_at, find_object_at};
use crate::input::{ActiveHandle, InputState, SelectionState, SurfaceHit};
use crate::mapper::SurfaceMapper;
use crate::overlay::{HandleSet, Overlay};
use crate::scene::{Drawable, ObjectId, Origin, SceneBackend};
use crate::transform::{self, ClickOutcome, uniform};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Side effects returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Enable or disable the host's orbit/camera controls.
    CameraControl { enabled: bool },
    SelectionChanged(Option<ObjectId>),
    ObjectCreated(ObjectId),
    ObjectUpdated(ObjectId),
    ObjectDeleted(ObjectId),
    /// The scene was repainted; the model texture sampling it must be re-uploaded.
    TextureStale,
}

/// Builds drawables from host assets. `None` means construction failed.
pub trait AssetFactory {
    fn image(&mut self, source: &str) -> Option<Drawable>;
    fn text(&mut self, text: &str) -> Option<Drawable>;
}

/// Pointer interaction engine over a host-owned 2D scene.
///
/// Every entry point is a discrete event handler: it mutates the scene,
/// updates selection, and returns the actions the host must apply. Nothing
/// here fails; a miss, a stale id, or a locked object simply produces fewer
/// actions.
pub struct Engine<S: SceneBackend> {
    pub scene: S,
    pub config: EngineConfig,
    pub overlay: Overlay,
    pub selection: SelectionState,
    pub input: InputState,
    rng: StdRng,
}

impl<S: SceneBackend> Engine<S> {
    /// Engine with default config and handle set.
    #[must_use]
    pub fn new(scene: S) -> Self {
        Self::with_config(scene, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(scene: S, config: EngineConfig) -> Self {
        let overlay = Overlay::new(HandleSet::default(), config.handle_size);
        Self {
            scene,
            config,
            overlay,
            selection: SelectionState::default(),
            input: InputState::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Replace the handle set. Takes effect only before the overlay is first built.
    #[must_use]
    pub fn with_handles(mut self, set: HandleSet) -> Self {
        self.overlay = Overlay::new(set, self.config.handle_size);
        self
    }

    /// Make placement randomness reproducible.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    // --- Queries ---

    /// The currently active object, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.selection.active_id
    }

    /// Mesh part the host should raycast against for the next move event.
    #[must_use]
    pub fn tracked_region(&self) -> Option<&str> {
        self.selection.region.as_deref()
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<&ActiveHandle> {
        self.selection.handle.as_ref()
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&Drawable> {
        self.scene.get(id)
    }

    #[must_use]
    pub fn mapper(&self) -> SurfaceMapper {
        SurfaceMapper::new(self.config.surface_extent)
    }

    // --- Pointer events ---

    /// Start a gesture: grab a handle, select an object, or deselect.
    pub fn on_pointer_down(&mut self, hit: Option<SurfaceHit>) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(hit) = hit else {
            debug!("pointer down missed the model");
            return actions;
        };
        let point = self.mapper().to_design(hit.uv);

        let handle = find_handle_at(&self.scene, point).and_then(|d| d.as_handle().map(|h| (d.id, h.slot)));
        if let Some((handle_id, slot)) = handle {
            actions.push(Action::CameraControl { enabled: false });
            self.selection.handle = Some(ActiveHandle::pressed(handle_id, slot));
            self.selection.last_point = Some(point);
            self.input = InputState::HandleDown { slot };
            debug!(?slot, x = point.x, y = point.y, "handle down");
            return actions;
        }

        let Some(id) = find_object_at(&self.scene, point).map(|d| d.id) else {
            if self.deactivate(&mut actions) {
                self.repaint(&mut actions);
            }
            return actions;
        };

        actions.push(Action::CameraControl { enabled: false });
        let previous = self.selection.active_id;
        self.selection = SelectionState {
            active_id: Some(id),
            last_point: Some(point),
            region: Some(hit.region),
            handle: None,
        };
        self.overlay.activate(&mut self.scene, None);
        self.overlay.activate(&mut self.scene, Some(id));
        self.overlay.attach(&mut self.scene);
        self.input = InputState::ObjectDown { id };
        debug!(%id, region = ?self.selection.region, "object down");

        if previous != Some(id) {
            actions.push(Action::SelectionChanged(Some(id)));
        }
        self.repaint(&mut actions);
        actions
    }

    /// Continue a gesture. Ignored unless a selection is being tracked and the
    /// hit lies on the tracked region.
    pub fn on_pointer_move(&mut self, hit: Option<SurfaceHit>) -> Vec<Action> {
        let mut actions = Vec::new();
        let (Some(id), Some(last)) = (self.selection.active_id, self.selection.last_point) else {
            return actions;
        };
        let Some(hit) = hit else {
            return actions;
        };
        if self.selection.region.as_deref() != Some(hit.region.as_str()) {
            return actions;
        }
        let point = self.mapper().to_design(hit.uv);
        let offset = point - last;

        if let Some(handle) = self.selection.handle.as_mut() {
            handle.mark_moved();
            let handle = *handle;
            self.drag_handle(&handle, &id, offset, &mut actions);
            self.selection.last_point = Some(point);
            self.overlay.activate(&mut self.scene, Some(id));
            self.repaint(&mut actions);
            return actions;
        }

        match transform::move_by(&mut self.scene, &id, offset) {
            Ok(_) => {
                self.selection.last_point = Some(point);
                self.overlay.activate(&mut self.scene, Some(id));
                actions.push(Action::ObjectUpdated(id));
                self.repaint(&mut actions);
            }
            Err(e) => debug!(error = %e, "move skipped"),
        }
        actions
    }

    /// End the gesture. Camera controls are always re-enabled.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let mut actions = vec![Action::CameraControl { enabled: true }];
        self.selection.last_point = None;

        if let Some(mut handle) = self.selection.handle.take() {
            if handle.is_click() {
                self.click_handle(&handle, &mut actions);
            }
            handle.release();
        }

        self.input = InputState::Idle;
        actions
    }

    // --- Host operations ---

    /// Insert text from the factory at a random spot on the surface. An empty
    /// string inserts the default text.
    pub fn insert_text<F: AssetFactory + ?Sized>(&mut self, factory: &mut F, text: &str) -> Vec<Action> {
        let text = if text.is_empty() { DEFAULT_TEXT } else { text };
        match factory.text(text) {
            Some(d) => self.place(d),
            None => {
                debug!(error = %TransformError::AssetFailure, "text not inserted");
                Vec::new()
            }
        }
    }

    /// Insert an image from the factory at a random spot on the surface.
    pub fn insert_image<F: AssetFactory + ?Sized>(&mut self, factory: &mut F, source: &str) -> Vec<Action> {
        match factory.image(source) {
            Some(d) => self.place(d),
            None => {
                debug!(error = %TransformError::AssetFailure, source, "image not inserted");
                Vec::new()
            }
        }
    }

    /// Remove an object on the host's behalf, deselecting it if it was active.
    pub fn remove_object(&mut self, id: &ObjectId) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.scene.remove(id).is_none() {
            return actions;
        }
        actions.push(Action::ObjectDeleted(*id));
        if self.selection.active_id.as_ref() == Some(id) {
            self.deactivate(&mut actions);
        }
        self.repaint(&mut actions);
        actions
    }

    /// Hide the overlay and drop all gesture state.
    pub fn teardown(&mut self) -> Vec<Action> {
        let mut actions = vec![Action::CameraControl { enabled: true }];
        let had_selection = self.selection.active_id.is_some();
        self.overlay.refresh(&mut self.scene);
        self.selection.clear();
        self.input = InputState::Idle;
        if had_selection {
            actions.push(Action::SelectionChanged(None));
        }
        self.repaint(&mut actions);
        actions
    }

    // --- Internals ---

    fn repaint(&mut self, actions: &mut Vec<Action>) {
        self.scene.render_all();
        actions.push(Action::TextureStale);
    }

    /// Clear selection and hide the overlay. Returns whether anything was selected.
    fn deactivate(&mut self, actions: &mut Vec<Action>) -> bool {
        let had_selection = self.selection.active_id.is_some();
        self.selection.clear();
        self.overlay.activate(&mut self.scene, None);
        self.input = InputState::Idle;
        if had_selection {
            actions.push(Action::SelectionChanged(None));
        }
        had_selection
    }

    /// The handle drawable as currently rendered, falling back to the overlay's copy.
    fn handle_drawable(&self, handle: &ActiveHandle) -> Option<&Drawable> {
        self.scene.get(&handle.id).or_else(|| self.overlay.handle(handle.slot))
    }

    fn drag_handle(&mut self, handle: &ActiveHandle, id: &ObjectId, offset: Point, actions: &mut Vec<Action>) {
        let drag = self
            .handle_drawable(handle)
            .and_then(|d| d.as_handle().and_then(|h| h.on_drag).map(|op| (op, d.center())));
        let Some((op, handle_center)) = drag else {
            return;
        };
        match op.apply(&mut self.scene, id, handle_center, offset, &self.config) {
            Ok(()) => actions.push(Action::ObjectUpdated(*id)),
            Err(e) => debug!(error = %e, ?op, "drag step skipped"),
        }
    }

    fn click_handle(&mut self, handle: &ActiveHandle, actions: &mut Vec<Action>) {
        let Some(id) = self.selection.active_id else {
            return;
        };
        let Some(op) = self.handle_drawable(handle).and_then(|d| d.as_handle()).and_then(|h| h.on_click) else {
            return;
        };
        match op.apply(&mut self.scene, &id, &self.config, &mut self.rng) {
            Ok(outcome) => self.apply_click_outcome(outcome, actions),
            Err(e) => debug!(error = %e, ?op, "click skipped"),
        }
    }

    fn apply_click_outcome(&mut self, outcome: ClickOutcome, actions: &mut Vec<Action>) {
        let deactivates = outcome.deactivates();
        match outcome {
            ClickOutcome::Created(ids) => actions.extend(ids.into_iter().map(Action::ObjectCreated)),
            ClickOutcome::Deleted(id) => actions.push(Action::ObjectDeleted(id)),
        }
        if deactivates {
            self.deactivate(actions);
        }
        self.repaint(actions);
    }

    fn place(&mut self, mut drawable: Drawable) -> Vec<Action> {
        let extent = self.config.surface_extent;
        drawable.left = uniform(&mut self.rng, 0.0, extent);
        drawable.top = uniform(&mut self.rng, 0.0, extent);
        drawable.origin = Origin::Center;

        let id = drawable.id;
        info!(%id, kind = ?drawable.kind(), x = drawable.left, y = drawable.top, "inserted object");
        self.scene.add(drawable);

        let mut actions = vec![Action::ObjectCreated(id)];
        self.repaint(&mut actions);
        actions
    }
}
