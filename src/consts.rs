//! Shared numeric constants and defaults for the engine.

// ── Surface ─────────────────────────────────────────────────────

/// Side length of the square design surface, in design units.
pub const SURFACE_EXTENT: f64 = 600.0;

// ── Handles ─────────────────────────────────────────────────────

/// Rendered width and height of each corner handle.
pub const HANDLE_SIZE: f64 = 20.0;

/// Fill used by a handle that has no icon.
pub const HANDLE_FALLBACK_COLOR: &str = "#fff";

pub const ICON_DUPLICATE: &str = "/icons/duplicate.png";
pub const ICON_ROTATE: &str = "/icons/refresh.png";
pub const ICON_DELETE: &str = "/icons/delete.png";
pub const ICON_RESIZE: &str = "/icons/arrow.png";
pub const ICON_REPEAT: &str = "/icons/repeat.png";

// ── Transforms ──────────────────────────────────────────────────

/// Multiplier applied to the pointer delta when dragging the rotate handle.
pub const ROTATE_DRAG_SENSITIVITY: f64 = 1.8;

/// Divisor applied to the normalized drag offset when resizing.
pub const RESIZE_DAMPING: f64 = 18.0;

/// Number of clones produced by a tiled duplicate.
pub const REPEAT_COUNT: usize = 5;

// ── Text ────────────────────────────────────────────────────────

/// Text inserted when the host passes an empty string.
pub const DEFAULT_TEXT: &str = "Your text here";

pub const DEFAULT_FONT_SIZE: f64 = 40.0;

pub const DEFAULT_TEXT_FILL: &str = "red";
