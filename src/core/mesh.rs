use serde::{Deserialize, Serialize};

/// Triangle indices for a prism whose vertices follow `BoxMesh::new` ordering:
/// bottom ring `0..4` counter-clockwise, then the top ring `4..8` above it.
const BOX_FACES: [[u32; 3]; 12] = [
    [0, 1, 2],
    [0, 2, 3],
    [4, 5, 6],
    [4, 6, 7],
    [0, 1, 5],
    [0, 5, 4],
    [3, 2, 6],
    [3, 6, 7],
    [0, 3, 7],
    [0, 7, 4],
    [1, 2, 6],
    [1, 6, 5],
];

/// Axis-aligned rectangular prism as 8 vertices and 12 triangular faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxMesh {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<u32>,
    pub j: Vec<u32>,
    pub k: Vec<u32>,
}

impl BoxMesh {
    pub const VERTEX_COUNT: usize = 8;
    pub const FACE_COUNT: usize = 12;

    #[must_use]
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64, z0: f64, z1: f64) -> Self {
        Self {
            x: vec![x0, x1, x1, x0, x0, x1, x1, x0],
            y: vec![y0, y0, y1, y1, y0, y0, y1, y1],
            z: vec![z0, z0, z0, z0, z1, z1, z1, z1],
            i: BOX_FACES.iter().map(|face| face[0]).collect(),
            j: BOX_FACES.iter().map(|face| face[1]).collect(),
            k: BOX_FACES.iter().map(|face| face[2]).collect(),
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.i.len()
    }
}

/// Builds the prism spanning `[x0, x1] x [y0, y1] x [z0, z1]`.
#[must_use]
pub fn box_mesh(x0: f64, x1: f64, y0: f64, y1: f64, z0: f64, z1: f64) -> BoxMesh {
    BoxMesh::new(x0, x1, y0, y1, z0, z1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_eight_vertices_and_twelve_faces() {
        let mesh = box_mesh(0.0, 1.0, 0.0, 2.0, 0.0, 3.0);
        assert_eq!(mesh.vertex_count(), BoxMesh::VERTEX_COUNT);
        assert_eq!(mesh.face_count(), BoxMesh::FACE_COUNT);
        assert_eq!(mesh.j.len(), BoxMesh::FACE_COUNT);
        assert_eq!(mesh.k.len(), BoxMesh::FACE_COUNT);
    }

    #[test]
    fn every_vertex_is_used_by_some_face() {
        let mesh = box_mesh(-1.0, 1.0, -1.0, 1.0, 0.0, 0.5);
        for vertex in 0..BoxMesh::VERTEX_COUNT as u32 {
            let used = mesh
                .i
                .iter()
                .chain(&mesh.j)
                .chain(&mesh.k)
                .any(|&index| index == vertex);
            assert!(used, "vertex {vertex} is not referenced");
        }
    }

    #[test]
    fn top_ring_sits_at_z1() {
        let mesh = box_mesh(0.0, 1.0, 0.0, 1.0, 0.25, 4.0);
        assert!(mesh.z[..4].iter().all(|&z| z == 0.25));
        assert!(mesh.z[4..].iter().all(|&z| z == 4.0));
    }
}
