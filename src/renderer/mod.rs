//! Rendering module
//!
//! The scene builder turns game state into 2D draw commands; on the web a
//! Canvas 2D backend plays them back.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCommand, build};
