//! WebGPU rendering module
//!
//! Draws the scene as flat-shaded boxes from the chase camera.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
