//! Terminal rendering of the isometric playfield

pub mod block;
pub mod renderer;
pub mod scene;

pub use block::{BlockStyle, BlockTexture};
pub use renderer::Renderer;
pub use scene::{BlockKind, Scene, Sprite, Viewport};
