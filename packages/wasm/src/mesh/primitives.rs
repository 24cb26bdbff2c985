//! Procedural closed meshes.
//!
//! All primitives are closed 2-manifolds centered on the origin with
//! counter-clockwise (outward-facing) winding. They serve as demo models for
//! the viewer and as fixtures for the simulation tests.

use std::collections::HashMap;

use glam::Vec3;

use super::TriMesh;

impl TriMesh {
    /// Regular tetrahedron with vertices at distance `radius` from the origin.
    pub fn tetrahedron(radius: f32) -> Self {
        let positions = [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ]
        .map(|p| p.normalize() * radius)
        .to_vec();
        let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];

        Self::from_trusted(positions, faces)
    }

    /// Regular octahedron with vertices on the axes at distance `radius`.
    pub fn octahedron(radius: f32) -> Self {
        let positions = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z]
            .map(|p| p * radius)
            .to_vec();
        let faces = vec![
            [4, 0, 2],
            [4, 2, 1],
            [4, 1, 3],
            [4, 3, 0],
            [5, 2, 0],
            [5, 1, 2],
            [5, 3, 1],
            [5, 0, 3],
        ];

        Self::from_trusted(positions, faces)
    }

    /// Geodesic sphere: an icosahedron whose faces are split into four
    /// `subdivisions` times, with new vertices projected onto the sphere.
    ///
    /// Face count is `20 * 4^subdivisions`.
    pub fn icosphere(radius: f32, subdivisions: u32) -> Self {
        let t = (1.0 + 5.0f32.sqrt()) / 2.0;
        let mut positions: Vec<Vec3> = [
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ]
        .map(|p| p.normalize() * radius)
        .to_vec();

        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        for _ in 0..subdivisions {
            // Shared edges must reuse the same midpoint vertex
            let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
            let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| -> u32 {
                let key = (a.min(b), a.max(b));
                *midpoints.entry(key).or_insert_with(|| {
                    let p = (positions[a as usize] + positions[b as usize]).normalize() * radius;
                    positions.push(p);
                    (positions.len() - 1) as u32
                })
            };

            let mut next = Vec::with_capacity(faces.len() * 4);
            for &[a, b, c] in &faces {
                let ab = midpoint(a, b, &mut positions);
                let bc = midpoint(b, c, &mut positions);
                let ca = midpoint(c, a, &mut positions);
                next.push([a, ab, ca]);
                next.push([b, bc, ab]);
                next.push([c, ca, bc]);
                next.push([ab, bc, ca]);
            }
            faces = next;
        }

        Self::from_trusted(positions, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_outward(mesh: &TriMesh) {
        for (face, normal) in mesh.faces().iter().zip(mesh.face_normals()) {
            let centroid = face
                .iter()
                .map(|&v| mesh.positions()[v as usize])
                .sum::<Vec3>()
                / 3.0;
            assert!(normal.dot(centroid) > 0.0, "face {:?} points inward", face);
        }
    }

    #[test]
    fn test_tetrahedron() {
        let mesh = TriMesh::tetrahedron(2.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 4);
        for p in mesh.positions() {
            assert_relative_eq!(p.length(), 2.0, epsilon = 1e-6);
        }
        assert_outward(&mesh);
    }

    #[test]
    fn test_octahedron() {
        let mesh = TriMesh::octahedron(1.0);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 8);
        assert_outward(&mesh);
    }

    #[test]
    fn test_icosphere_counts() {
        let mesh = TriMesh::icosphere(1.0, 0);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 20);

        // V = 10 * 4^n + 2 for a subdivided icosahedron
        let mesh = TriMesh::icosphere(1.0, 2);
        assert_eq!(mesh.vertex_count(), 162);
        assert_eq!(mesh.face_count(), 320);
        assert_outward(&mesh);
    }

    #[test]
    fn test_icosphere_on_sphere() {
        let mesh = TriMesh::icosphere(0.5, 1);
        for p in mesh.positions() {
            assert_relative_eq!(p.length(), 0.5, epsilon = 1e-6);
        }
    }
}
