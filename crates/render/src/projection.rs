use glam::Mat4;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Right-handed perspective projection with a 0..1 depth range.
pub fn perspective(fov_degrees: f32, aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_rh(fov_degrees.to_radians(), aspect_ratio, NEAR_PLANE, FAR_PLANE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    fn clip_depth(proj: Mat4, eye_z: f32) -> f32 {
        let clip = proj * Vec4::new(0.0, 0.0, eye_z, 1.0);
        clip.z / clip.w
    }

    #[test]
    fn near_and_far_planes_map_to_depth_range() {
        let proj = perspective(45.0, 4.0 / 3.0);
        assert!(clip_depth(proj, -NEAR_PLANE).abs() < 1e-5);
        assert!((clip_depth(proj, -FAR_PLANE) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn narrower_fov_magnifies() {
        let point = Vec3::new(1.0, 1.0, -10.0);
        let wide = perspective(45.0, 1.0).project_point3(point);
        let narrow = perspective(10.0, 1.0).project_point3(point);
        assert!(narrow.y.abs() > wide.y.abs());
    }

    #[test]
    fn aspect_ratio_squeezes_x() {
        let point = Vec3::new(1.0, 1.0, -10.0);
        let ndc = perspective(45.0, 2.0).project_point3(point);
        assert!((ndc.x * 2.0 - ndc.y).abs() < 1e-5);
    }
}
