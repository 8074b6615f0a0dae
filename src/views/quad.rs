// src/views/quad.rs
//
// The drawable square entity. Position/angle/scale are the authoritative
// attributes; the world transform is fully rebuilt from them before every
// draw, never incrementally mutated.

use nannou::prelude::*;

#[derive(Debug, Clone)]
pub struct Quad {
    position: Point2,
    angle: f32, // degrees
    scale: f32,
    points: [Point3; 4],
    indices: [usize; 6],
    transform: Mat4,
}

impl Quad {
    /// A `w` x `h` square mesh centered on its own origin: two triangles
    /// sharing the diagonal, corners at the half-extents.
    pub fn new(w: f32, h: f32) -> Self {
        let points = [
            pt3(-w / 2.0, h / 2.0, 0.0),
            pt3(w / 2.0, h / 2.0, 0.0),
            pt3(-w / 2.0, -h / 2.0, 0.0),
            pt3(w / 2.0, -h / 2.0, 0.0),
        ];
        let indices = [0, 1, 2, 1, 2, 3];

        Self {
            position: pt2(0.0, 0.0),
            angle: 0.0,
            scale: 1.0,
            points,
            indices,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = pt2(x, y);
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn get_position(&self) -> Point2 {
        self.position
    }

    pub fn get_angle(&self) -> f32 {
        self.angle
    }

    pub fn get_scale(&self) -> f32 {
        self.scale
    }

    pub fn get_transform(&self) -> Mat4 {
        self.transform
    }

    /// Rebuild the world transform with the square's own center as pivot.
    pub fn update_transform(&mut self) {
        self.transform = Mat4::from_translation(vec3(self.position.x, self.position.y, 0.0))
            * Mat4::from_rotation_z(self.angle.to_radians())
            * Mat4::from_scale(Vec3::splat(self.scale));
    }

    /// Rebuild the world transform with the window origin as pivot,
    /// producing orbit-style motion.
    pub fn update_offset_rotation(&mut self) {
        self.transform = Mat4::from_rotation_z(self.angle.to_radians())
            * Mat4::from_translation(vec3(self.position.x, self.position.y, 0.0))
            * Mat4::from_scale(Vec3::splat(self.scale));
    }

    /// Submit the mesh for this frame. The cached transform goes onto the
    /// draw context before the mesh command, so it lands ahead of the draw.
    pub fn draw(&self, draw: &Draw, color: Rgba) {
        let vertices = self.points.iter().map(|&point| (point, color));
        draw.transform(self.transform)
            .mesh()
            .indexed_colored(vertices, self.indices.iter().copied());
    }
}

/// The four draw colors, in entity order: red, yellow-green, blue, orange.
pub fn logo_palette() -> [Rgba; 4] {
    [
        rgba(0.95, 0.11, 0.11, 1.0),
        rgba(0.5, 0.74, 0.0, 1.0),
        rgba(0.0, 0.65, 0.94, 1.0),
        rgba(1.0, 0.73, 0.0, 1.0),
    ]
}
