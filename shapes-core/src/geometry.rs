/// Fixed vertex/color/index tables for the scene's primitives
use std::f32::consts::PI;

use crate::error::GeometryError;

pub type Position = [f32; 3];
pub type Color = [f32; 4];

pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
pub const BLUE: Color = [0.0, 0.0, 1.0, 1.0];
pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
pub const MAGENTA: Color = [1.0, 0.0, 1.0, 1.0];
pub const CYAN: Color = [0.0, 1.0, 1.0, 1.0];
pub const ORANGE: Color = [1.0, 0.5, 0.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const GOLD: Color = [1.0, 0.84, 0.0, 1.0];
pub const LIGHT_YELLOW: Color = [1.0, 1.0, 0.6, 1.0];

pub const STAR_POINTS: u16 = 5;
pub const STAR_OUTER_RADIUS: f32 = 0.5;
pub const STAR_INNER_RADIUS: f32 = 0.2;

/// Positions, per-vertex colors and triangle indices for one drawable object
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Position>,
    colors: Vec<Color>,
    indices: Vec<u16>,
}

impl Mesh {
    pub fn new(positions: Vec<Position>, colors: Vec<Color>, indices: Vec<u16>) -> Self {
        Self {
            positions,
            colors,
            indices,
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate the index triples making up each triangle
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Check that the buffers can be uploaded and drawn as indexed triangles
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.colors.len() != self.positions.len() {
            return Err(GeometryError::ColorCountMismatch {
                positions: self.positions.len(),
                colors: self.colors.len(),
            });
        }

        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::PartialTriangle(self.indices.len()));
        }

        let vertex_count = self.positions.len();
        if let Some((slot, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| usize::from(index) >= vertex_count)
        {
            return Err(GeometryError::IndexOutOfRange {
                slot,
                index,
                vertex_count,
            });
        }

        Ok(())
    }

    /// Unit cube with unshared face vertices so every face has a flat color
    pub fn cube() -> Self {
        // front, back, top, bottom, right, left
        const FACES: [(Color, [Position; 4]); 6] = [
            (
                RED,
                [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
            ),
            (
                GREEN,
                [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
            ),
            (
                BLUE,
                [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
            ),
            (
                YELLOW,
                [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
            ),
            (
                MAGENTA,
                [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
            ),
            (
                CYAN,
                [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
            ),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut colors = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (face, (color, corners)) in (0u16..).zip(FACES) {
            positions.extend_from_slice(&corners);
            colors.extend([color; 4]);
            let base = face * 4;
            indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(positions, colors, indices)
    }

    /// Square-based pyramid with one apex copy per side triangle
    ///
    /// The triangle table holds the two base triangles and three sides; the
    /// last apex copy is not referenced, leaving one side open.
    pub fn pyramid() -> Self {
        let apex = [0.0, 1.0, 0.0];
        let positions = vec![
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0],
            [-1.0, -1.0, 1.0],
            apex,
            apex,
            apex,
            apex,
        ];

        let mut colors = vec![YELLOW; 4];
        colors.extend([ORANGE; 4]);

        let indices = vec![
            0, 1, 2, 0, 2, 3, // base
            0, 1, 4, 1, 2, 5, 2, 3, 6, // sides
        ];

        Self::new(positions, colors, indices)
    }

    /// Octahedron: top apex, four equatorial vertices, bottom apex
    pub fn octahedron() -> Self {
        let positions = vec![
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [-1.0, 0.0, 0.0],
            [0.0, 0.0, -1.0],
            [0.0, -1.0, 0.0],
        ];

        let mut colors = vec![CYAN; 5];
        colors.push(MAGENTA);

        let indices = vec![
            0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1, // upper fan
            5, 2, 1, 5, 3, 2, 5, 4, 3, 5, 1, 4, // lower fan, reversed winding
        ];

        Self::new(positions, colors, indices)
    }

    /// Flat star in the z = 0 plane, fan-triangulated from its center
    ///
    /// Rim vertices alternate between `outer` and `inner` radius starting at
    /// -90°. The last triangle wraps back to the first rim vertex.
    pub fn star(points: u16, outer: f32, inner: f32) -> Self {
        let rim = points * 2;
        let mut positions = Vec::with_capacity(usize::from(rim) + 1);
        let mut colors = Vec::with_capacity(usize::from(rim) + 1);

        positions.push([0.0, 0.0, 0.0]);
        colors.push(WHITE);

        for k in 0..rim {
            let angle = f32::from(k) * PI / f32::from(points) - PI / 2.0;
            let (radius, color) = if k % 2 == 0 {
                (outer, GOLD)
            } else {
                (inner, LIGHT_YELLOW)
            };
            positions.push([radius * angle.cos(), radius * angle.sin(), 0.0]);
            colors.push(color);
        }

        let mut indices = Vec::with_capacity(usize::from(rim) * 3);
        for i in 1..=rim {
            let next = if i == rim { 1 } else { i + 1 };
            indices.extend([0, i, next]);
        }

        Self::new(positions, colors, indices)
    }
}

/// The four primitives drawn by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Pyramid,
    Octahedron,
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Cube,
        ShapeKind::Pyramid,
        ShapeKind::Octahedron,
        ShapeKind::Star,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Octahedron => "octahedron",
            ShapeKind::Star => "star",
        }
    }

    pub fn build(self) -> Mesh {
        match self {
            ShapeKind::Cube => Mesh::cube(),
            ShapeKind::Pyramid => Mesh::pyramid(),
            ShapeKind::Octahedron => Mesh::octahedron(),
            ShapeKind::Star => Mesh::star(STAR_POINTS, STAR_OUTER_RADIUS, STAR_INNER_RADIUS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = Mesh::cube();
        assert_eq!(cube.positions().len(), 24);
        assert_eq!(cube.colors().len(), 24);
        assert_eq!(cube.indices().len(), 36);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn test_cube_faces_are_flat_colored() {
        let cube = Mesh::cube();
        let expected = [RED, GREEN, BLUE, YELLOW, MAGENTA, CYAN];
        for (face, color) in cube.colors().chunks_exact(4).zip(expected) {
            assert!(face.iter().all(|c| *c == color));
        }
        // both triangles of a face stay within that face's four vertices
        for (i, pair) in cube.indices().chunks_exact(6).enumerate() {
            let base = i as u16 * 4;
            assert!(pair.iter().all(|&idx| (base..base + 4).contains(&idx)));
        }
    }

    #[test]
    fn test_pyramid_table() {
        let pyramid = Mesh::pyramid();
        assert_eq!(pyramid.vertex_count(), 8);
        assert_eq!(pyramid.triangle_count(), 5);
        assert!(pyramid.validate().is_ok());
        assert!(pyramid.colors()[..4].iter().all(|c| *c == YELLOW));
        assert!(pyramid.colors()[4..].iter().all(|c| *c == ORANGE));
        // the last apex copy is never referenced
        assert!(!pyramid.indices().contains(&7));
        assert!(pyramid.positions()[4..].iter().all(|p| *p == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_octahedron_fans() {
        let octa = Mesh::octahedron();
        assert_eq!(octa.vertex_count(), 6);
        assert_eq!(octa.triangle_count(), 8);
        assert!(octa.validate().is_ok());

        let triangles: Vec<_> = octa.triangles().collect();
        assert!(triangles[..4].iter().all(|t| t[0] == 0));
        assert!(triangles[4..].iter().all(|t| t[0] == 5));
        // lower fan reuses each upper edge with the winding flipped
        for (upper, lower) in triangles[..4].iter().zip(&triangles[4..]) {
            assert_eq!([upper[2], upper[1]], [lower[1], lower[2]]);
        }

        assert!(octa.colors()[..5].iter().all(|c| *c == CYAN));
        assert_eq!(octa.colors()[5], MAGENTA);
    }

    #[test]
    fn test_star_fan() {
        let star = ShapeKind::Star.build();
        assert_eq!(star.positions().len(), 11);
        assert_eq!(star.colors().len(), 11);
        assert_eq!(star.indices().len(), 30);
        assert!(star.validate().is_ok());

        let triangles: Vec<_> = star.triangles().collect();
        assert!(triangles.iter().all(|t| t[0] == 0));
        assert_eq!(triangles[0], [0, 1, 2]);
        // the final triangle closes the fan instead of reading past the rim
        assert_eq!(triangles[9], [0, 10, 1]);
    }

    #[test]
    fn test_star_radii_and_colors() {
        let star = Mesh::star(STAR_POINTS, STAR_OUTER_RADIUS, STAR_INNER_RADIUS);
        assert_eq!(star.colors()[0], WHITE);

        let first = star.positions()[1];
        assert!(first[0].abs() < 1e-6);
        assert!((first[1] + STAR_OUTER_RADIUS).abs() < 1e-6);

        for (k, (p, c)) in star.positions()[1..].iter().zip(&star.colors()[1..]).enumerate() {
            let radius = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert_eq!(p[2], 0.0);
            if k % 2 == 0 {
                assert!((radius - STAR_OUTER_RADIUS).abs() < 1e-6);
                assert_eq!(*c, GOLD);
            } else {
                assert!((radius - STAR_INNER_RADIUS).abs() < 1e-6);
                assert_eq!(*c, LIGHT_YELLOW);
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_meshes() {
        let positions = vec![[0.0; 3]; 3];

        let mesh = Mesh::new(positions.clone(), vec![WHITE; 2], vec![0, 1, 2]);
        assert_eq!(
            mesh.validate(),
            Err(GeometryError::ColorCountMismatch {
                positions: 3,
                colors: 2
            })
        );

        let mesh = Mesh::new(positions.clone(), vec![WHITE; 3], vec![0, 1]);
        assert_eq!(mesh.validate(), Err(GeometryError::PartialTriangle(2)));

        let mesh = Mesh::new(positions, vec![WHITE; 3], vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(
            mesh.validate(),
            Err(GeometryError::IndexOutOfRange {
                slot: 5,
                index: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_every_shape_is_valid() {
        for kind in ShapeKind::ALL {
            assert!(kind.build().validate().is_ok(), "{} failed", kind.name());
        }
    }
}
