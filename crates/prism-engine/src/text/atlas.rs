use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("font parse error: {0}")]
    Font(String),

    #[error("atlas image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("atlas grid must have at least one row and one column")]
    EmptyGrid,

    #[error("atlas {width}x{height} does not divide into {columns}x{rows} cells")]
    NotDivisible {
        width: u32,
        height: u32,
        columns: u32,
        rows: u32,
    },
}

/// Cell arrangement of a grid atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    /// Character in cell 0.
    pub first: char,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 32,
            rows: 3,
            first: ' ',
        }
    }
}

impl GridLayout {
    pub fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }

    fn check(&self) -> Result<(), AtlasError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(AtlasError::EmptyGrid);
        }
        Ok(())
    }

    /// Character stored in `cell`, if it is a valid scalar value.
    fn char_at(&self, cell: u32) -> Option<char> {
        char::from_u32(self.first as u32 + cell)
    }
}

/// Single-channel (R8) glyph atlas.
#[derive(Debug, Clone)]
pub struct GridAtlas {
    width: u32,
    height: u32,
    layout: GridLayout,
    pixels: Vec<u8>,
}

impl GridAtlas {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Row-major coverage, one byte per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.width / self.layout.columns, self.height / self.layout.rows)
    }

    /// Rasterizes every cell's character from a TrueType/OpenType font.
    ///
    /// Glyphs are drawn at `cell_px` pixels, centred horizontally and placed
    /// on a shared baseline.
    pub fn bake(font_bytes: &[u8], layout: GridLayout, cell_px: u32) -> Result<Self, AtlasError> {
        layout.check()?;
        let font = fontdue::Font::from_bytes(font_bytes, fontdue::FontSettings::default())
            .map_err(|e| AtlasError::Font(e.to_string()))?;

        let cell = cell_px.max(1);
        let px = cell as f32 * 0.8;
        let ascent = font
            .horizontal_line_metrics(px)
            .map_or(px, |m| m.ascent);
        let baseline = ((cell as f32 - px) * 0.5 + ascent).round() as i32;

        let mut atlas = Self::empty(layout, cell * layout.columns, cell * layout.rows);

        for index in 0..layout.cell_count() {
            let Some(ch) = layout.char_at(index) else { continue };
            let (metrics, bitmap) = font.rasterize(ch, px);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }

            let cx = (index % layout.columns * cell) as i32;
            let cy = (index / layout.columns * cell) as i32;
            let left = cx + (cell as i32 - metrics.width as i32) / 2;
            let top = cy + baseline - metrics.ymin - metrics.height as i32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    atlas.plot_clipped(
                        left + gx as i32,
                        top + gy as i32,
                        (cx, cy, cell as i32),
                        coverage,
                    );
                }
            }
        }

        log::info!(
            "baked {}x{} glyph atlas ({} cells of {}px)",
            atlas.width,
            atlas.height,
            layout.cell_count(),
            cell
        );
        Ok(atlas)
    }

    /// Loads a pre-rendered atlas image.
    ///
    /// Coverage comes from the alpha channel when the image has one, from
    /// luminance otherwise.
    pub fn load_png(path: impl AsRef<Path>, layout: GridLayout) -> Result<Self, AtlasError> {
        layout.check()?;
        let img = image::open(path.as_ref())?;
        let (width, height) = (img.width(), img.height());
        if width % layout.columns != 0 || height % layout.rows != 0 {
            return Err(AtlasError::NotDivisible {
                width,
                height,
                columns: layout.columns,
                rows: layout.rows,
            });
        }

        let pixels = if img.color().has_alpha() {
            img.to_rgba8().pixels().map(|p| p.0[3]).collect()
        } else {
            img.to_luma8().into_raw()
        };

        log::info!("loaded {}x{} glyph atlas from {}", width, height, path.as_ref().display());
        Ok(Self {
            width,
            height,
            layout,
            pixels,
        })
    }

    /// Asset-free atlas: every visible character is an outlined box.
    pub fn blank(layout: GridLayout, cell_px: u32) -> Self {
        let columns = layout.columns.max(1);
        let rows = layout.rows.max(1);
        let layout = GridLayout { columns, rows, ..layout };
        let cell = cell_px.max(4);
        let mut atlas = Self::empty(layout, cell * columns, cell * rows);

        for index in 0..layout.cell_count() {
            if layout.char_at(index).is_none_or(char::is_whitespace) {
                continue;
            }
            let cx = index % columns * cell;
            let cy = index / columns * cell;
            for i in 1..cell - 1 {
                atlas.set(cx + i, cy + 1, 255);
                atlas.set(cx + i, cy + cell - 2, 255);
                atlas.set(cx + 1, cy + i, 255);
                atlas.set(cx + cell - 2, cy + i, 255);
            }
        }
        atlas
    }

    fn empty(layout: GridLayout, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layout,
            pixels: vec![0; (width * height) as usize],
        }
    }

    fn set(&mut self, x: u32, y: u32, value: u8) {
        let i = (y * self.width + x) as usize;
        if let Some(p) = self.pixels.get_mut(i) {
            *p = value;
        }
    }

    /// Writes a pixel only if it falls inside the given cell.
    fn plot_clipped(&mut self, x: i32, y: i32, (cx, cy, cell): (i32, i32, i32), value: u8) {
        if x < cx || y < cy || x >= cx + cell || y >= cy + cell {
            return;
        }
        self.set(x as u32, y as u32, value);
    }
}
