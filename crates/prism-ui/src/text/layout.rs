use prism_engine::coords::Vec2;
use prism_engine::frame::GuiVertex;
use prism_engine::gpu::{DrawIndexed, UploadBuffer};

use super::{MonoFont, QuadIndexPool};
use crate::error::TextError;
use crate::widget::WidgetId;

/// Horizontal pen advance is `font_size / ADVANCE_DIVISOR`.
pub const ADVANCE_DIVISOR: f32 = 142.857_14;
/// Glyph height is `font_size / HEIGHT_DIVISOR`.
pub const HEIGHT_DIVISOR: f32 = 100.0;

/// Handle into a [`TextStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextId(pub(crate) usize);

impl TextId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One laid-out label.
///
/// Owns four positions and four texcoords per character, stored at
/// `vertex_offset..vertex_offset + 4 * char_count` in the shared text vertex
/// buffer. The range never moves once allocated.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    parent: WidgetId,
    origin: Vec2,
    font_size: f32,
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    vertex_offset: u32,
    char_count: u32,
    visible: bool,
    instance_count: u32,
}

impl Text {
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn parent(&self) -> WidgetId {
        self.parent
    }

    /// Top-left of the first glyph in NDC.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[inline]
    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    #[inline]
    pub fn vertex_offset(&self) -> u32 {
        self.vertex_offset
    }

    #[inline]
    pub fn char_count(&self) -> u32 {
        self.char_count
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.char_count * 4
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.char_count * 6
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Draw against the shared index pool. Hidden text still yields a draw
    /// with zero instances.
    pub fn draw(&self) -> DrawIndexed {
        DrawIndexed {
            index_count: self.index_count(),
            instance_count: self.instance_count,
            start_index: 0,
            base_vertex: self.vertex_offset as i32,
            first_instance: 0,
        }
    }

    fn glyph_uvs(font: &MonoFont, c: char) -> Result<[[f32; 2]; 4], TextError> {
        let [u, v, w, h] = font.uv_rect(c)?;
        Ok([[u, v], [u + w, v], [u, v + h], [u + w, v + h]])
    }
}

// ── TextStore ─────────────────────────────────────────────────────────────

/// Append-only allocator of [`Text`]s into one shared vertex range.
#[derive(Debug)]
pub struct TextStore {
    font: MonoFont,
    pool: QuadIndexPool,
    texts: Vec<Text>,
    next_vertex: u32,
    vertex_capacity: u32,
    dirty: bool,
}

impl TextStore {
    /// `vertex_capacity` is the size of the per-frame text vertex buffer.
    pub fn new(font: MonoFont, vertex_capacity: u32) -> Self {
        let pool = QuadIndexPool::new(font.config().quad_capacity);
        Self {
            font,
            pool,
            texts: Vec::new(),
            next_vertex: 0,
            vertex_capacity,
            dirty: true,
        }
    }

    #[inline]
    pub fn font(&self) -> &MonoFont {
        &self.font
    }

    #[inline]
    pub fn index_pool(&self) -> &QuadIndexPool {
        &self.pool
    }

    /// First vertex index the next text will receive.
    #[inline]
    pub fn next_vertex(&self) -> u32 {
        self.next_vertex
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn get(&self, id: TextId) -> Result<&Text, TextError> {
        self.texts.get(id.0).ok_or(TextError::UnknownText(id.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextId, &Text)> {
        self.texts.iter().enumerate().map(|(i, t)| (TextId(i), t))
    }

    /// Lays out `content` starting at `parent_origin + offset`.
    ///
    /// Each character gets a quad `font_size / ADVANCE_DIVISOR` wide and
    /// `font_size / HEIGHT_DIVISOR` tall, extending down from the pen. Nothing
    /// is allocated when any character fails to map or capacity runs out.
    pub fn layout_text(
        &mut self,
        content: &str,
        parent: WidgetId,
        parent_origin: Vec2,
        offset: Vec2,
        font_size: f32,
    ) -> Result<TextId, TextError> {
        let char_count = content.chars().count() as u32;

        let used_quads = self.next_vertex / 4;
        let requested = used_quads + char_count;
        if requested > self.pool.quad_capacity() {
            return Err(TextError::GlyphPoolExhausted {
                requested,
                capacity: self.pool.quad_capacity(),
            });
        }
        let required = self.next_vertex + char_count * 4;
        if required > self.vertex_capacity {
            return Err(TextError::TextVertexCapacity {
                required,
                capacity: self.vertex_capacity,
            });
        }

        let advance = font_size / ADVANCE_DIVISOR;
        let height = font_size / HEIGHT_DIVISOR;
        let origin = parent_origin + offset;

        let mut positions = Vec::with_capacity(char_count as usize * 4);
        let mut uvs = Vec::with_capacity(char_count as usize * 4);
        let mut pen = origin.x;
        for c in content.chars() {
            uvs.extend_from_slice(&Text::glyph_uvs(&self.font, c)?);
            positions.extend_from_slice(&[
                [pen, origin.y, 0.0],
                [pen + advance, origin.y, 0.0],
                [pen, origin.y - height, 0.0],
                [pen + advance, origin.y - height, 0.0],
            ]);
            pen += advance;
        }

        let id = TextId(self.texts.len());
        self.texts.push(Text {
            content: content.to_owned(),
            parent,
            origin,
            font_size,
            positions,
            uvs,
            vertex_offset: self.next_vertex,
            char_count,
            visible: true,
            instance_count: 1,
        });
        self.next_vertex = required;
        self.dirty = true;
        log::debug!(
            "text {:?} '{}' at vertex {} ({} glyphs)",
            id,
            content,
            required - char_count * 4,
            char_count
        );
        Ok(id)
    }

    /// Overwrites only the texcoords of an existing text with `content`.
    ///
    /// Glyph positions are not reflowed. Characters past the text's original
    /// glyph count are dropped; glyphs past the new length keep their old
    /// texcoords. Returns how many glyphs were rewritten.
    pub fn relayout_uvs(&mut self, id: TextId, content: &str) -> Result<usize, TextError> {
        let font = &self.font;
        let text = self
            .texts
            .get_mut(id.0)
            .ok_or(TextError::UnknownText(id.0))?;

        let slots = text.char_count as usize;
        let wanted = content.chars().count();
        if wanted > slots {
            log::warn!(
                "text {:?}: '{}' has {} glyphs, only {} slots; extra glyphs dropped",
                id,
                content,
                wanted,
                slots
            );
        }

        let mut written = 0;
        for (i, c) in content.chars().take(slots).enumerate() {
            let quad = Text::glyph_uvs(font, c)?;
            text.uvs[i * 4..i * 4 + 4].copy_from_slice(&quad);
            written += 1;
        }
        text.content = content.to_owned();
        self.dirty = true;
        Ok(written)
    }

    pub fn set_visible(&mut self, id: TextId, visible: bool) -> Result<(), TextError> {
        let text = self
            .texts
            .get_mut(id.0)
            .ok_or(TextError::UnknownText(id.0))?;
        text.visible = visible;
        Ok(())
    }

    /// One instance for visible texts, zero for hidden ones.
    pub fn sync_instance_counts(&mut self) {
        for text in &mut self.texts {
            text.instance_count = u32::from(text.visible);
        }
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Copies every text's vertices to its offset range in `buffer` and marks
    /// the store clean.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is smaller than [`next_vertex`](Self::next_vertex).
    pub fn write_vertices(&mut self, buffer: &mut UploadBuffer<GuiVertex>) {
        for text in &self.texts {
            let vertices: Vec<GuiVertex> = text
                .positions
                .iter()
                .zip(&text.uvs)
                .map(|(p, uv)| GuiVertex {
                    position: *p,
                    uv: *uv,
                })
                .collect();
            buffer.copy_slice(text.vertex_offset as usize, &vertices);
        }
        self.dirty = false;
    }
}
