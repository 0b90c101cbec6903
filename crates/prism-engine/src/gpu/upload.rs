use bytemuck::Pod;

/// Fixed-capacity CPU mirror of one per-frame GPU buffer.
///
/// Element count is decided once at construction. Writes mark the buffer dirty;
/// the renderer uploads dirty buffers in full before recording draws that read
/// them.
#[derive(Debug, Clone)]
pub struct UploadBuffer<T: Pod> {
    label: &'static str,
    data: Vec<T>,
    dirty: bool,
}

impl<T: Pod> UploadBuffer<T> {
    /// Zero-initialized buffer of `count` elements.
    pub fn new(label: &'static str, count: usize) -> Self {
        Self {
            label,
            data: vec![T::zeroed(); count],
            dirty: true,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Number of element slots.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Byte size of one element.
    pub fn stride(&self) -> usize {
        std::mem::size_of::<T>()
    }

    pub fn byte_len(&self) -> usize {
        self.data.len() * self.stride()
    }

    /// Writes `value` into `slot`.
    ///
    /// # Panics
    ///
    /// If `slot >= capacity()`. Slot counts are static sizing decisions; going
    /// past them is a programming error.
    pub fn copy_data(&mut self, slot: usize, value: &T) {
        assert!(
            slot < self.data.len(),
            "{}: slot {} out of bounds (capacity {})",
            self.label,
            slot,
            self.data.len()
        );
        self.data[slot] = *value;
        self.dirty = true;
    }

    /// Writes `values` starting at `first`.
    ///
    /// # Panics
    ///
    /// If the range extends past `capacity()`.
    pub fn copy_slice(&mut self, first: usize, values: &[T]) {
        let end = first + values.len();
        assert!(
            end <= self.data.len(),
            "{}: range {}..{} out of bounds (capacity {})",
            self.label,
            first,
            end,
            self.data.len()
        );
        self.data[first..end].copy_from_slice(values);
        self.dirty = true;
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.data.get(slot)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether the buffer was dirty and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
