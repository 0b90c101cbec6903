use crate::error::TextError;

/// Describes a fixed-grid glyph atlas: one character per cell, row-major,
/// starting at `first`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontConfig {
    pub columns: u32,
    pub rows: u32,
    pub first: char,
    pub last: char,
    pub atlas_width: u32,
    pub atlas_height: u32,
    /// Upper bound on glyph quads across every label.
    pub quad_capacity: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            columns: 32,
            rows: 3,
            first: ' ',
            last: '~',
            atlas_width: 512,
            atlas_height: 48,
            quad_capacity: 800,
        }
    }
}

/// Pixel rectangle of one glyph cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct MonoFont {
    config: FontConfig,
    glyph_width: u32,
    glyph_height: u32,
}

impl MonoFont {
    pub fn new(config: FontConfig) -> Result<Self, TextError> {
        let FontConfig {
            columns,
            rows,
            atlas_width,
            atlas_height,
            ..
        } = config;
        if columns == 0
            || rows == 0
            || atlas_width % columns != 0
            || atlas_height % rows != 0
            || atlas_width < columns
            || atlas_height < rows
        {
            return Err(TextError::AtlasNotDivisible {
                width: atlas_width,
                height: atlas_height,
                columns,
                rows,
            });
        }

        let chars = (config.last as u32).saturating_sub(config.first as u32) + 1;
        if chars > columns * rows {
            return Err(TextError::GridTooSmall {
                chars,
                cells: columns * rows,
            });
        }

        Ok(Self {
            config,
            glyph_width: atlas_width / columns,
            glyph_height: atlas_height / rows,
        })
    }

    #[inline]
    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    #[inline]
    pub fn glyph_size(&self) -> (u32, u32) {
        (self.glyph_width, self.glyph_height)
    }

    /// Cell rectangle for `c`. Characters outside `first..=last` fail.
    pub fn map_glyph(&self, c: char) -> Result<GlyphRect, TextError> {
        if c < self.config.first || c > self.config.last {
            return Err(TextError::UnsupportedChar(c));
        }
        let index = c as u32 - self.config.first as u32;
        Ok(GlyphRect {
            x: (index % self.config.columns) * self.glyph_width,
            y: (index / self.config.columns) * self.glyph_height,
            width: self.glyph_width,
            height: self.glyph_height,
        })
    }

    /// Normalized `[u, v, width, height]` for `c`.
    pub fn uv_rect(&self, c: char) -> Result<[f32; 4], TextError> {
        let g = self.map_glyph(c)?;
        let w = self.config.atlas_width as f32;
        let h = self.config.atlas_height as f32;
        Ok([
            g.x as f32 / w,
            g.y as f32 / h,
            g.width as f32 / w,
            g.height as f32 / h,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> MonoFont {
        MonoFont::new(FontConfig::default()).unwrap()
    }

    // ── map_glyph ─────────────────────────────────────────────────────────

    #[test]
    fn first_char_maps_to_origin() {
        assert_eq!(
            font().map_glyph(' ').unwrap(),
            GlyphRect {
                x: 0,
                y: 0,
                width: 16,
                height: 16
            }
        );
    }

    #[test]
    fn wraps_to_next_row_after_columns() {
        // '@' is index 32: first cell of row 1.
        let g = font().map_glyph('@').unwrap();
        assert_eq!((g.x, g.y), (0, 16));
        let g = font().map_glyph('A').unwrap();
        assert_eq!((g.x, g.y), (16, 16));
    }

    #[test]
    fn last_char_stays_inside_atlas() {
        let f = font();
        let g = f.map_glyph('~').unwrap();
        assert!(g.x + g.width <= 512);
        assert!(g.y + g.height <= 48);
    }

    #[test]
    fn every_printable_char_is_a_full_cell_inside_atlas() {
        let f = font();
        let mut seen = std::collections::HashSet::new();
        for c in ' '..='~' {
            let g = f.map_glyph(c).unwrap();
            assert_eq!((g.width, g.height), (16, 16), "{c:?}");
            assert_eq!((g.x % 16, g.y % 16), (0, 0), "{c:?}");
            assert!(g.x + g.width <= 512 && g.y + g.height <= 48, "{c:?}");
            assert!(seen.insert((g.x, g.y)), "{c:?} shares a cell");
        }
        assert_eq!(seen.len(), 95);
    }

    #[test]
    fn out_of_range_chars_fail() {
        let f = font();
        assert_eq!(f.map_glyph('\n'), Err(TextError::UnsupportedChar('\n')));
        assert_eq!(f.map_glyph('é'), Err(TextError::UnsupportedChar('é')));
    }

    #[test]
    fn uv_rect_is_normalized() {
        let uv = font().uv_rect('!').unwrap();
        assert_eq!(uv, [16.0 / 512.0, 0.0, 16.0 / 512.0, 16.0 / 48.0]);
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn rejects_indivisible_atlas() {
        let cfg = FontConfig {
            atlas_width: 500,
            ..FontConfig::default()
        };
        assert!(matches!(
            MonoFont::new(cfg),
            Err(TextError::AtlasNotDivisible { .. })
        ));
    }

    #[test]
    fn rejects_grid_smaller_than_char_range() {
        let cfg = FontConfig {
            rows: 2,
            atlas_height: 32,
            ..FontConfig::default()
        };
        assert_eq!(
            MonoFont::new(cfg).unwrap_err(),
            TextError::GridTooSmall {
                chars: 95,
                cells: 64
            }
        );
    }
}
