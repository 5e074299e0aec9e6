//! Pointer and control engine for painting 2D designs onto a 3D model.
//!
//! The host renders a model whose texture is a 2D design surface. It raycasts
//! pointer events against the model and feeds the resulting surface hits into
//! [`engine::Engine`], which maps them onto the design surface, hit-tests the
//! placed images and text, drives the control overlay, and applies move,
//! rotate, resize, duplicate, repeat, and delete. The host is responsible only
//! for raycasting, owning the 2D scene behind [`scene::SceneBackend`], and
//! applying the returned [`engine::Action`]s (camera toggles and texture
//! uploads).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Pointer state machine, asset insertion, and [`engine::Action`] output |
//! | [`scene`] | Typed drawables, sparse updates, the backend trait, and [`scene::MemoryScene`] |
//! | [`hit`] | Handle and object hit-testing over the scene |
//! | [`overlay`] | Control handles and bounding highlight |
//! | [`transform`] | Move, rotate, resize, duplicate, repeat, delete |
//! | [`input`] | Surface hits, selection state, gesture phase |
//! | [`mapper`] | UV to design-surface coordinate conversions |
//! | [`geom`] | `Point`, `Rect`, `Uv` |
//! | [`config`] | Engine settings with env overrides |
//! | [`error`] | Transform and config error types |
//! | [`consts`] | Shared numeric constants and defaults |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod input;
pub mod mapper;
pub mod overlay;
pub mod scene;
pub mod transform;
