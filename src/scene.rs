//! Scene model: typed drawables, sparse updates, and the backend contract.
//!
//! The 2D scene that is composited onto the model texture is owned by the
//! host. The engine reaches it only through [`SceneBackend`], treats it as the
//! authoritative store, and never keeps a shadow copy of placed objects.
//! [`MemoryScene`] is the in-process implementation used by tests and by hosts
//! that have no native 2D backend of their own.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_FONT_SIZE, DEFAULT_TEXT_FILL};
use crate::geom::{Point, Rect};
use crate::overlay::HandleSlot;
use crate::transform::{ClickOp, DragOp};

/// Unique identifier for a drawable.
pub type ObjectId = Uuid;

/// Coarse classification used by hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectKind {
    Image,
    Text,
    /// Overlay drawables: handles and the bounding highlight.
    Control,
}

impl ObjectKind {
    /// Whether objects of this kind can be selected and dragged.
    #[must_use]
    pub fn is_movable(self) -> bool {
        matches!(self, Self::Image | Self::Text)
    }
}

/// Which point of the drawable `left`/`top` refer to. Rotation pivots on it too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    TopLeft,
    Center,
}

/// Payload of a control handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleBody {
    pub slot: HandleSlot,
    /// Icon drawn inside the handle; `None` draws a filled square in `color`.
    pub icon: Option<String>,
    pub color: String,
    /// Invoked for every pointer move while a drag that started on this handle is active.
    pub on_drag: Option<DragOp>,
    /// Invoked on a down/up pair with no move in between.
    pub on_click: Option<ClickOp>,
}

/// Variant-specific content of a drawable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Body {
    Image { source: String },
    Text { text: String, font_size: f64, fill: String },
    Handle(HandleBody),
    /// Outline drawn around the active object.
    Highlight,
}

/// Anything placed in the 2D scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub id: ObjectId,
    pub body: Body,
    /// X of the origin anchor.
    pub left: f64,
    /// Y of the origin anchor.
    pub top: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation in degrees around the origin anchor, kept in `[0, 360)`.
    pub angle: f64,
    pub origin: Origin,
    pub visible: bool,
    pub locked: bool,
}

impl Drawable {
    fn with_body(body: Body, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            body,
            left: 0.0,
            top: 0.0,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            origin: Origin::TopLeft,
            visible: true,
            locked: false,
        }
    }

    /// An image of the given intrinsic size.
    #[must_use]
    pub fn image(source: impl Into<String>, width: f64, height: f64) -> Self {
        Self::with_body(Body::Image { source: source.into() }, width, height)
    }

    /// A text block whose measured extent is `width` x `height`.
    #[must_use]
    pub fn text(text: impl Into<String>, width: f64, height: f64) -> Self {
        let body = Body::Text { text: text.into(), font_size: DEFAULT_FONT_SIZE, fill: DEFAULT_TEXT_FILL.to_string() };
        Self::with_body(body, width, height)
    }

    /// A square control handle.
    #[must_use]
    pub fn handle(body: HandleBody, size: f64) -> Self {
        let mut d = Self::with_body(Body::Handle(body), size, size);
        d.visible = false;
        d
    }

    /// The bounding-highlight rectangle.
    #[must_use]
    pub fn highlight() -> Self {
        let mut d = Self::with_body(Body::Highlight, 0.0, 0.0);
        d.visible = false;
        d
    }

    #[must_use]
    pub fn at(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self.body {
            Body::Image { .. } => ObjectKind::Image,
            Body::Text { .. } => ObjectKind::Text,
            Body::Handle(_) | Body::Highlight => ObjectKind::Control,
        }
    }

    #[must_use]
    pub fn as_handle(&self) -> Option<&HandleBody> {
        match &self.body {
            Body::Handle(h) => Some(h),
            _ => None,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[must_use]
    pub fn scaled_width(&self) -> f64 {
        self.width * self.scale_x
    }

    #[must_use]
    pub fn scaled_height(&self) -> f64 {
        self.height * self.scale_y
    }

    /// Offset from the anchor to the unrotated top-left corner.
    fn origin_offset(&self) -> Point {
        match self.origin {
            Origin::TopLeft => Point::default(),
            Origin::Center => Point::new(-self.scaled_width() / 2.0, -self.scaled_height() / 2.0),
        }
    }

    /// Scaled box before rotation.
    #[must_use]
    pub fn unrotated_rect(&self) -> Rect {
        let tl = self.anchor() + self.origin_offset();
        Rect::new(tl.x, tl.y, self.scaled_width(), self.scaled_height())
    }

    /// Rendered center, after scale and rotation.
    #[must_use]
    pub fn center(&self) -> Point {
        self.unrotated_rect().center().rotate_around(self.anchor(), self.angle)
    }

    /// Axis-aligned bounds of the rendered (scaled, rotated) drawable.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        let r = self.unrotated_rect();
        let anchor = self.anchor();
        let corners = [
            Point::new(r.left, r.top),
            Point::new(r.right(), r.top),
            Point::new(r.right(), r.bottom()),
            Point::new(r.left, r.bottom()),
        ]
        .map(|p| p.rotate_around(anchor, self.angle));
        Rect::enclosing(&corners)
    }

    /// Copy of this drawable under a freshly generated identity.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self { id: Uuid::new_v4(), ..self.clone() }
    }

    /// Apply the present fields of a sparse update.
    pub fn apply(&mut self, partial: &PartialDrawable) {
        if let Some(v) = partial.left {
            self.left = v;
        }
        if let Some(v) = partial.top {
            self.top = v;
        }
        if let Some(v) = partial.width {
            self.width = v;
        }
        if let Some(v) = partial.height {
            self.height = v;
        }
        if let Some(v) = partial.scale_x {
            self.scale_x = v;
        }
        if let Some(v) = partial.scale_y {
            self.scale_y = v;
        }
        if let Some(v) = partial.angle {
            self.angle = v;
        }
        if let Some(v) = partial.visible {
            self.visible = v;
        }
        if let Some(v) = partial.locked {
            self.locked = v;
        }
    }
}

/// Sparse update for a drawable. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialDrawable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl PartialDrawable {
    #[must_use]
    pub fn position(left: f64, top: f64) -> Self {
        Self { left: Some(left), top: Some(top), ..Default::default() }
    }

    #[must_use]
    pub fn visibility(visible: bool) -> Self {
        Self { visible: Some(visible), ..Default::default() }
    }
}

/// The host's 2D scene, as seen by the engine.
///
/// `objects` must return drawables in insertion order; hit testing relies on it.
pub trait SceneBackend {
    /// Insert a drawable at the top of the stack.
    fn add(&mut self, drawable: Drawable);

    /// Remove a drawable by id, returning it if it was present.
    fn remove(&mut self, id: &ObjectId) -> Option<Drawable>;

    /// All drawables in insertion order.
    fn objects(&self) -> &[Drawable];

    /// Apply a sparse update. Returns false if the drawable doesn't exist.
    fn set(&mut self, id: &ObjectId, partial: &PartialDrawable) -> bool;

    /// Repaint synchronously.
    fn render_all(&mut self);

    /// Region tiled duplicates are scattered into, if the host configured one.
    fn allowed_region(&self) -> Option<Rect> {
        None
    }

    fn get(&self, id: &ObjectId) -> Option<&Drawable> {
        self.objects().iter().find(|d| d.id == *id)
    }

    fn contains(&self, id: &ObjectId) -> bool {
        self.get(id).is_some()
    }
}

impl<T: SceneBackend + ?Sized> SceneBackend for &mut T {
    fn add(&mut self, drawable: Drawable) {
        (**self).add(drawable);
    }

    fn remove(&mut self, id: &ObjectId) -> Option<Drawable> {
        (**self).remove(id)
    }

    fn objects(&self) -> &[Drawable] {
        (**self).objects()
    }

    fn set(&mut self, id: &ObjectId, partial: &PartialDrawable) -> bool {
        (**self).set(id, partial)
    }

    fn render_all(&mut self) {
        (**self).render_all();
    }

    fn allowed_region(&self) -> Option<Rect> {
        (**self).allowed_region()
    }
}

/// In-memory scene that keeps drawables in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    objects: Vec<Drawable>,
    allowed_region: Option<Rect>,
    render_count: u64,
}

impl MemoryScene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain tiled duplicates to `region`.
    #[must_use]
    pub fn with_allowed_region(mut self, region: Rect) -> Self {
        self.allowed_region = Some(region);
        self
    }

    pub fn set_allowed_region(&mut self, region: Option<Rect>) {
        self.allowed_region = region;
    }

    /// Replace all drawables with a full snapshot.
    pub fn load_snapshot(&mut self, objects: Vec<Drawable>) {
        self.objects = objects;
    }

    /// Number of drawables currently in the scene, overlay included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the scene contains no drawables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// How many times `render_all` has run.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }
}

impl SceneBackend for MemoryScene {
    /// Appends, or replaces in place when a drawable with the same id exists.
    fn add(&mut self, drawable: Drawable) {
        if let Some(existing) = self.objects.iter_mut().find(|d| d.id == drawable.id) {
            *existing = drawable;
        } else {
            self.objects.push(drawable);
        }
    }

    fn remove(&mut self, id: &ObjectId) -> Option<Drawable> {
        let idx = self.objects.iter().position(|d| d.id == *id)?;
        Some(self.objects.remove(idx))
    }

    fn objects(&self) -> &[Drawable] {
        &self.objects
    }

    fn set(&mut self, id: &ObjectId, partial: &PartialDrawable) -> bool {
        let Some(obj) = self.objects.iter_mut().find(|d| d.id == *id) else {
            return false;
        };
        obj.apply(partial);
        true
    }

    fn render_all(&mut self) {
        self.render_count += 1;
    }

    fn allowed_region(&self) -> Option<Rect> {
        self.allowed_region
    }
}
