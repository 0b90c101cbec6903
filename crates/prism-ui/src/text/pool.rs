/// Largest quad count whose vertex indices still fit in `u16`.
pub const MAX_POOL_QUADS: u32 = (u16::MAX as u32 + 1) / 4;

/// Pre-generated index pattern shared by every glyph quad.
///
/// Quad `q` covers vertices `4q..4q+4` in TL, TR, BL, BR order and
/// contributes triangles `(TL, TR, BL)` and `(TR, BR, BL)`.
#[derive(Debug, Clone)]
pub struct QuadIndexPool {
    indices: Vec<u16>,
    quads: u32,
}

impl QuadIndexPool {
    pub fn new(quads: u32) -> Self {
        let quads = if quads > MAX_POOL_QUADS {
            log::warn!("glyph index pool clamped from {quads} to {MAX_POOL_QUADS} quads");
            MAX_POOL_QUADS
        } else {
            quads
        };

        let mut indices = Vec::with_capacity(quads as usize * 6);
        for q in 0..quads {
            let s = (q * 4) as u16;
            indices.extend_from_slice(&[s, s + 1, s + 2, s + 1, s + 3, s + 2]);
        }
        Self { indices, quads }
    }

    #[inline]
    pub fn quad_capacity(&self) -> u32 {
        self.quads
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_repeats_every_four_vertices() {
        let pool = QuadIndexPool::new(3);
        assert_eq!(pool.indices().len(), 18);
        assert_eq!(&pool.indices()[..6], &[0, 1, 2, 1, 3, 2]);
        assert_eq!(&pool.indices()[12..], &[8, 9, 10, 9, 11, 10]);
    }

    #[test]
    fn clamps_to_u16_range() {
        let pool = QuadIndexPool::new(MAX_POOL_QUADS + 10);
        assert_eq!(pool.quad_capacity(), MAX_POOL_QUADS);
        assert_eq!(pool.indices().last().copied(), Some(u16::MAX - 1));
    }
}
