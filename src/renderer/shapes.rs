//! Mesh generation for scene primitives
//!
//! Lighting is baked into vertex colors: one directional light plus
//! ambient, evaluated per face.

use glam::{Mat4, Vec3};

use super::vertex::{Vertex, colors};
use crate::consts::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, GROUND_SIZE};
use crate::sim::{CameraPose, GameState};

/// Directional light position (points toward origin)
const LIGHT_POS: Vec3 = Vec3::new(10.0, 20.0, 10.0);
const LIGHT_INTENSITY: f32 = 1.0;
const AMBIENT: f32 = 0.6;
/// Lift decals off the ground to avoid z-fighting
const DECAL_LIFT: f32 = 0.01;
const LANE_EDGE_WIDTH: f32 = 0.2;

/// Shade a base color for a face normal
fn shade(color: [f32; 4], normal: Vec3) -> [f32; 4] {
    let lambert = normal.dot(LIGHT_POS.normalize()).max(0.0) * LIGHT_INTENSITY;
    let k = (AMBIENT + lambert).min(1.0);
    [color[0] * k, color[1] * k, color[2] * k, color[3]]
}

fn quad(vertices: &mut Vec<Vertex>, corners: [Vec3; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners.map(|p| Vertex::new(p.x, p.y, p.z, color));
    vertices.extend_from_slice(&[a, b, c, a, c, d]);
}

/// Flat horizontal rectangle at height `y`
pub fn ground_rect(
    center_x: f32,
    center_z: f32,
    half_x: f32,
    half_z: f32,
    y: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    let color = shade(color, Vec3::Y);
    quad(
        &mut vertices,
        [
            Vec3::new(center_x - half_x, y, center_z - half_z),
            Vec3::new(center_x - half_x, y, center_z + half_z),
            Vec3::new(center_x + half_x, y, center_z + half_z),
            Vec3::new(center_x + half_x, y, center_z - half_z),
        ],
        color,
    );
    vertices
}

/// Box rotated by `yaw` about Y, 36 vertices
pub fn cuboid(center: Vec3, half: Vec3, yaw: f32, color: [f32; 4]) -> Vec<Vertex> {
    let rot = glam::Quat::from_rotation_y(yaw);
    let corner = |sx: f32, sy: f32, sz: f32| center + rot * (half * Vec3::new(sx, sy, sz));
    #[rustfmt::skip]
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (Vec3::X, [corner(1., -1., -1.), corner(1., 1., -1.), corner(1., 1., 1.), corner(1., -1., 1.)]),
        (-Vec3::X, [corner(-1., -1., 1.), corner(-1., 1., 1.), corner(-1., 1., -1.), corner(-1., -1., -1.)]),
        (Vec3::Y, [corner(-1., 1., -1.), corner(-1., 1., 1.), corner(1., 1., 1.), corner(1., 1., -1.)]),
        (-Vec3::Y, [corner(-1., -1., 1.), corner(-1., -1., -1.), corner(1., -1., -1.), corner(1., -1., 1.)]),
        (Vec3::Z, [corner(1., -1., 1.), corner(1., 1., 1.), corner(-1., 1., 1.), corner(-1., -1., 1.)]),
        (-Vec3::Z, [corner(-1., -1., -1.), corner(-1., 1., -1.), corner(1., 1., -1.), corner(1., -1., -1.)]),
    ];

    let mut vertices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        quad(&mut vertices, corners, shade(color, rot * normal));
    }
    vertices
}

/// Whole scene for one frame: ground, road, lane edges, vehicle, traffic
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let half_ground = GROUND_SIZE / 2.0;
    let lane = state.tuning.round.lane_half_width;
    let mut vertices = Vec::with_capacity(24 + 36 * (1 + state.obstacles.len()));

    vertices.extend(ground_rect(0.0, 0.0, half_ground, half_ground, 0.0, colors::GRASS));
    vertices.extend(ground_rect(0.0, 0.0, lane, half_ground, DECAL_LIFT, colors::ROAD));
    for side in [-1.0, 1.0] {
        vertices.extend(ground_rect(
            side * lane,
            0.0,
            LANE_EDGE_WIDTH / 2.0,
            half_ground,
            DECAL_LIFT * 2.0,
            colors::LANE_EDGE,
        ));
    }

    let vehicle = &state.vehicle;
    vertices.extend(cuboid(
        vehicle.center(),
        vehicle.half_extents,
        vehicle.heading,
        colors::PLAYER,
    ));
    for obstacle in &state.obstacles {
        vertices.extend(cuboid(
            obstacle.center(),
            obstacle.half_extents,
            0.0,
            colors::TRAFFIC,
        ));
    }

    vertices
}

/// Right-handed perspective view-projection for a camera pose
pub fn view_proj(pose: &CameraPose, aspect: f32) -> Mat4 {
    let view = Mat4::look_at_rh(pose.eye, pose.target, Vec3::Y);
    let proj = Mat4::perspective_rh(
        CAMERA_FOV_DEG.to_radians(),
        aspect,
        CAMERA_NEAR,
        CAMERA_FAR,
    );
    proj * view
}
