/// Primitive shapes provided by the mesh library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Box,
    Sphere,
    Plane,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Box, Shape::Sphere, Shape::Plane];
}

/// Geometry for the primitive shapes.
///
/// Each shape is uploaded once with [`load_mesh`](Self::load_mesh) and can then
/// be drawn any number of times. A draw uses whatever uniforms and textures
/// are current when it is issued.
pub trait MeshLibrary {
    fn load_mesh(&mut self, shape: Shape);
    fn draw_mesh(&mut self, shape: Shape);
}
