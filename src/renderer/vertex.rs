//! Vertex types for 3D rendering

use bytemuck::{Pod, Zeroable};

/// World-space vertex with baked flat-shaded color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, z],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Camera uniform (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Colors for scene elements
pub mod colors {
    pub const SKY: [f64; 4] = [0.529, 0.808, 0.922, 1.0];
    pub const GRASS: [f32; 4] = [0.133, 0.545, 0.133, 1.0];
    pub const ROAD: [f32; 4] = [0.25, 0.25, 0.28, 1.0];
    pub const LANE_EDGE: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const TRAFFIC: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
}
