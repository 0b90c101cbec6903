use prism_engine::coords::NdcRect;
use prism_engine::frame::GuiVertex;

/// Local triangle list shared by every widget quad.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Four-vertex quad for one widget.
///
/// Corner order is fixed and other code relies on it:
///
/// | vertex | corner       | uv     |
/// |--------|--------------|--------|
/// | 0      | bottom-left  | (0, 1) |
/// | 1      | top-left     | (0, 0) |
/// | 2      | top-right    | (1, 0) |
/// | 3      | bottom-right | (1, 1) |
///
/// Collapsing a panel only moves vertices 0 and 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadMesh {
    vertices: [GuiVertex; 4],
}

impl QuadMesh {
    pub fn from_rect(rect: NdcRect) -> Self {
        let bl = rect.bottom_left();
        let tl = rect.top_left();
        let tr = rect.top_right();
        let br = rect.bottom_right();
        Self {
            vertices: [
                GuiVertex::new(bl.x, bl.y, 0.0, 1.0),
                GuiVertex::new(tl.x, tl.y, 0.0, 0.0),
                GuiVertex::new(tr.x, tr.y, 1.0, 0.0),
                GuiVertex::new(br.x, br.y, 1.0, 1.0),
            ],
        }
    }

    /// Moves the bottom edge to match `rect`, leaving the top edge alone.
    pub fn set_bottom(&mut self, rect: NdcRect) {
        let bl = rect.bottom_left();
        let br = rect.bottom_right();
        self.vertices[0].position = [bl.x, bl.y, 0.0];
        self.vertices[3].position = [br.x, br.y, 0.0];
    }

    #[inline]
    pub fn vertices(&self) -> &[GuiVertex; 4] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16; 6] {
        &QUAD_INDICES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_follow_documented_order() {
        let mesh = QuadMesh::from_rect(NdcRect::new(0.1, 0.9, 0.4, 1.0));
        let v = mesh.vertices();
        assert_eq!(v[0].position, [0.1, 0.9 - 1.0, 0.0]);
        assert_eq!(v[1].position, [0.1, 0.9, 0.0]);
        assert_eq!(v[2].position, [0.1 + 0.4, 0.9, 0.0]);
        assert_eq!(v[3].position, [0.1 + 0.4, 0.9 - 1.0, 0.0]);
        assert_eq!(v[0].uv, [0.0, 1.0]);
        assert_eq!(v[2].uv, [1.0, 0.0]);
    }

    #[test]
    fn set_bottom_leaves_top_edge() {
        let rect = NdcRect::new(0.1, 0.9, 0.4, 1.0);
        let mut mesh = QuadMesh::from_rect(rect);
        let before = *mesh.vertices();
        mesh.set_bottom(rect.with_height(0.1));
        let after = mesh.vertices();
        assert_eq!(after[1], before[1]);
        assert_eq!(after[2], before[2]);
        assert!((after[0].position[1] - 0.8).abs() < 1e-6);
        assert!((after[3].position[1] - 0.8).abs() < 1e-6);
    }
}
