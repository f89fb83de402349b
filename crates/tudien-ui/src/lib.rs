pub mod messages;
pub mod render;
mod style;

pub use render::Renderer;
