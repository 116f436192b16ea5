use glam::Vec3;

/// Unit look direction for the given yaw and pitch, both in degrees.
///
/// Yaw is measured in the XZ plane from +X towards +Z, so a yaw of -90
/// looks down -Z. Pitch lifts the direction towards +Y.
pub fn forward_from_angles(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw_degrees.to_radians().sin_cos();
    let (sin_pitch, cos_pitch) = pitch_degrees.to_radians().sin_cos();
    Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
}
