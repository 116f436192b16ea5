use cubeview_common::Transform;
use glam::{Mat4, Quat, Vec3};

use crate::device::PrimitiveHandle;

/// Where the stock scene puts its cubes.
pub const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

pub const SPIN_DEGREES_PER_SECOND: f32 = 50.0;

/// One drawable: a primitive placed in the world, spinning about a fixed axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub position: Vec3,
    /// Unit rotation axis.
    pub spin_axis: Vec3,
    pub primitive: PrimitiveHandle,
}

impl SceneObject {
    pub fn new(position: Vec3, spin_axis: Vec3, primitive: PrimitiveHandle) -> Self {
        Self {
            position,
            spin_axis: spin_axis.normalize(),
            primitive,
        }
    }

    /// Pose at `time_seconds` of clock time.
    pub fn transform(&self, time_seconds: f32) -> Transform {
        let angle = (time_seconds * SPIN_DEGREES_PER_SECOND).to_radians();
        Transform {
            rotation: Quat::from_axis_angle(self.spin_axis, angle),
            ..Transform::at(self.position)
        }
    }

    pub fn model_matrix(&self, time_seconds: f32) -> Mat4 {
        self.transform(time_seconds).matrix()
    }
}

/// Flat list of drawables, drawn in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock scene: ten cubes, each tumbling about a slightly different
    /// axis.
    pub fn spinning_cubes(cube: PrimitiveHandle) -> Self {
        let objects = CUBE_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let axis = Vec3::new(0.5, 1.0 - i as f32 / 10.0, 0.0);
                SceneObject::new(position, axis, cube)
            })
            .collect();
        Self { objects }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
