use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

const fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        uv,
    }
}

/// Unit cube centred on the origin, four vertices per face so every face
/// gets its own normal and a full 0..1 texture square. Counter-clockwise
/// winding seen from outside.
pub fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z
        v([-p, -p,  p], [0.0, 0.0, 1.0], [0.0, 0.0]),
        v([ p, -p,  p], [0.0, 0.0, 1.0], [1.0, 0.0]),
        v([ p,  p,  p], [0.0, 0.0, 1.0], [1.0, 1.0]),
        v([-p,  p,  p], [0.0, 0.0, 1.0], [0.0, 1.0]),
        // -Z
        v([ p, -p, -p], [0.0, 0.0, -1.0], [0.0, 0.0]),
        v([-p, -p, -p], [0.0, 0.0, -1.0], [1.0, 0.0]),
        v([-p,  p, -p], [0.0, 0.0, -1.0], [1.0, 1.0]),
        v([ p,  p, -p], [0.0, 0.0, -1.0], [0.0, 1.0]),
        // +X
        v([ p, -p,  p], [1.0, 0.0, 0.0], [0.0, 0.0]),
        v([ p, -p, -p], [1.0, 0.0, 0.0], [1.0, 0.0]),
        v([ p,  p, -p], [1.0, 0.0, 0.0], [1.0, 1.0]),
        v([ p,  p,  p], [1.0, 0.0, 0.0], [0.0, 1.0]),
        // -X
        v([-p, -p, -p], [-1.0, 0.0, 0.0], [0.0, 0.0]),
        v([-p, -p,  p], [-1.0, 0.0, 0.0], [1.0, 0.0]),
        v([-p,  p,  p], [-1.0, 0.0, 0.0], [1.0, 1.0]),
        v([-p,  p, -p], [-1.0, 0.0, 0.0], [0.0, 1.0]),
        // +Y
        v([-p,  p,  p], [0.0, 1.0, 0.0], [0.0, 0.0]),
        v([ p,  p,  p], [0.0, 1.0, 0.0], [1.0, 0.0]),
        v([ p,  p, -p], [0.0, 1.0, 0.0], [1.0, 1.0]),
        v([-p,  p, -p], [0.0, 1.0, 0.0], [0.0, 1.0]),
        // -Y
        v([-p, -p, -p], [0.0, -1.0, 0.0], [0.0, 0.0]),
        v([ p, -p, -p], [0.0, -1.0, 0.0], [1.0, 0.0]),
        v([ p, -p,  p], [0.0, -1.0, 0.0], [1.0, 1.0]),
        v([-p, -p,  p], [0.0, -1.0, 0.0], [0.0, 1.0]),
    ];
    let indices = (0..6u16)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect();
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_has_six_quads() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn triangles_wind_outwards() {
        let (vertices, indices) = cube_mesh();
        for tri in indices.chunks(3) {
            let [a, b, c] =
                [tri[0], tri[1], tri[2]].map(|i| Vec3::from(vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a).normalize();
            let stored = Vec3::from(vertices[tri[0] as usize].normal);
            assert!((face_normal - stored).length() < 1e-5);
        }
    }

    #[test]
    fn uvs_cover_unit_square() {
        let (vertices, _) = cube_mesh();
        for vertex in &vertices {
            assert!(vertex.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
