//! Every widget quad packed into one vertex list and one index list.

use std::collections::HashMap;

use prism_engine::frame::GuiVertex;
use prism_engine::gpu::{DrawIndexed, UploadBuffer};

use crate::error::WidgetError;
use crate::widget::{QUAD_INDICES, Widget, WidgetArena, WidgetId};

/// Where one widget's quad lives inside the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubGeometry {
    pub index_count: u32,
    pub start_index: u32,
    pub base_vertex: u32,
}

impl SubGeometry {
    /// Draw for this quad. `first_instance` selects the color slot.
    pub fn draw(self, color_slot: u32) -> DrawIndexed {
        DrawIndexed {
            index_count: self.index_count,
            instance_count: 1,
            start_index: self.start_index,
            base_vertex: self.base_vertex as i32,
            first_instance: color_slot,
        }
    }
}

/// Shared vertex and index data for all widgets.
///
/// Widgets are appended in order; a widget's range never moves afterwards.
/// Any change marks the whole aggregate dirty and the next upload copies all
/// of it.
#[derive(Debug, Default)]
pub struct GeometryAggregate {
    vertices: Vec<GuiVertex>,
    indices: Vec<u16>,
    entries: Vec<(WidgetId, SubGeometry)>,
    by_name: HashMap<String, usize>,
    dirty: bool,
}

impl GeometryAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh aggregate over every widget in arena order.
    pub fn build(arena: &WidgetArena) -> Result<Self, WidgetError> {
        let mut geometry = Self::new();
        for (id, widget) in arena.iter() {
            geometry.append(id, widget)?;
        }
        log::debug!(
            "gui geometry: {} widgets, {} vertices, {} indices",
            geometry.len(),
            geometry.vertices.len(),
            geometry.indices.len()
        );
        Ok(geometry)
    }

    pub fn append(&mut self, id: WidgetId, widget: &Widget) -> Result<SubGeometry, WidgetError> {
        if self.by_name.contains_key(widget.name()) {
            return Err(WidgetError::DuplicateName(widget.name().to_owned()));
        }
        let sub = SubGeometry {
            index_count: QUAD_INDICES.len() as u32,
            start_index: self.indices.len() as u32,
            base_vertex: self.vertices.len() as u32,
        };
        self.vertices.extend_from_slice(widget.mesh().vertices());
        self.indices.extend_from_slice(widget.mesh().indices());
        self.by_name
            .insert(widget.name().to_owned(), self.entries.len());
        self.entries.push((id, sub));
        self.dirty = true;
        Ok(sub)
    }

    /// Rewrites one widget's vertices in place from its current mesh.
    pub fn update_partial(&mut self, widget: &Widget) -> Result<(), WidgetError> {
        let sub = self
            .sub_geometry(widget.name())
            .ok_or_else(|| WidgetError::UnknownWidget(widget.name().to_owned()))?;
        let base = sub.base_vertex as usize;
        self.vertices[base..base + 4].copy_from_slice(widget.mesh().vertices());
        self.dirty = true;
        Ok(())
    }

    pub fn sub_geometry(&self, name: &str) -> Option<SubGeometry> {
        self.by_name.get(name).map(|&i| self.entries[i].1)
    }

    /// Entries in append order.
    pub fn entries(&self) -> &[(WidgetId, SubGeometry)] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[GuiVertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Copies every vertex into `buffer` starting at slot 0.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` holds fewer vertices than the aggregate.
    pub fn write_vertices(&mut self, buffer: &mut UploadBuffer<GuiVertex>) {
        buffer.copy_slice(0, &self.vertices);
        self.dirty = false;
    }
}
