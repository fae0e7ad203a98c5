use std::cell::Cell;

use crate::error::{BatchError, MeshBuffer, Result};
use crate::render::ResourceId;

use super::vertex::VertexShape;

/// Largest vertex count whose slots are still addressable by `u32` indices.
const INDEXABLE_VERTICES: usize = u32::MAX as usize;

/// Logical contents of a mesh, handed to the backend on upload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshData<'a, V> {
    pub vertices: &'a [V],
    pub indices: &'a [u32],
}

impl<'a, V: VertexShape> MeshData<'a, V> {
    #[inline]
    pub fn vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.vertices)
    }

    #[inline]
    pub fn index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.indices)
    }
}

/// Append-only vertex/index storage reused across frames.
///
/// Physical buffers double whenever an append does not fit and never shrink;
/// `clear` only resets the logical counts. Every append checks both buffers
/// before writing, so a failed append leaves the mesh untouched.
///
/// Uploads are lazy: [`bind`](Self::bind) yields the data once after each
/// change and `None` until the next one.
#[derive(Debug)]
pub struct GrowableMesh<V: VertexShape> {
    id: ResourceId,

    vertices: Vec<V>,
    indices: Vec<u32>,
    vertex_count: usize,
    index_count: usize,

    max_vertices: Option<usize>,
    max_indices: Option<usize>,

    dirty: Cell<bool>,
}

impl<V: VertexShape> GrowableMesh<V> {
    /// Creates a mesh with `capacity` physical slots in each buffer (at least 1).
    pub fn new(id: ResourceId, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            id,
            vertices: vec![V::zeroed(); capacity],
            indices: vec![0; capacity],
            vertex_count: 0,
            index_count: 0,
            max_vertices: None,
            max_indices: None,
            dirty: Cell::new(false),
        }
    }

    /// Caps the logical size of the buffers. Appends past a cap fail with
    /// [`BatchError::ResourceExhausted`].
    pub fn with_limits(mut self, max_vertices: Option<usize>, max_indices: Option<usize>) -> Self {
        self.max_vertices = max_vertices;
        self.max_indices = max_indices;
        self
    }

    #[inline]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    #[inline]
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_capacity(&self) -> usize {
        self.indices.len()
    }

    /// Logical vertices.
    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices[..self.vertex_count]
    }

    /// Logical indices.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices[..self.index_count]
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Returns the logical data if it changed since the last bind, and marks
    /// the mesh clean.
    pub fn bind(&self) -> Option<MeshData<'_, V>> {
        if !self.dirty.replace(false) {
            return None;
        }
        Some(MeshData {
            vertices: self.vertices(),
            indices: self.indices(),
        })
    }

    /// Resets the logical counts. Capacity and old contents stay in place.
    #[inline]
    pub fn clear(&mut self) {
        self.vertex_count = 0;
        self.index_count = 0;
        self.dirty.set(true);
    }

    /// Makes sure `vertices` more vertices and `indices` more indices fit.
    pub fn reserve(&mut self, vertices: usize, indices: usize) -> Result<()> {
        let vertex_len = self.checked_len(MeshBuffer::Vertices, vertices)?;
        let index_len = self.checked_len(MeshBuffer::Indices, indices)?;

        grow(&mut self.vertices, vertex_len, self.max_vertices, V::zeroed());
        grow(&mut self.indices, index_len, self.max_indices, 0);
        Ok(())
    }

    pub fn add_vertex(&mut self, vertex: V) -> Result<()> {
        self.reserve(1, 0)?;
        self.push_vertex(vertex);
        self.dirty.set(true);
        Ok(())
    }

    pub fn add_vertices(&mut self, vertices: &[V]) -> Result<()> {
        self.reserve(vertices.len(), 0)?;
        self.extend_vertices(vertices);
        self.dirty.set(true);
        Ok(())
    }

    /// Appends a raw index. Winding and range are the caller's business.
    pub fn add_index(&mut self, index: u32) -> Result<()> {
        self.reserve(0, 1)?;
        self.push_index(index);
        self.dirty.set(true);
        Ok(())
    }

    /// Appends raw indices. Winding and range are the caller's business.
    pub fn add_indices(&mut self, indices: &[u32]) -> Result<()> {
        self.reserve(0, indices.len())?;
        for &i in indices {
            self.push_index(i);
        }
        self.dirty.set(true);
        Ok(())
    }

    /// Appends a triangle as `(base, base + 1, base + 2)`.
    pub fn add_triangle(&mut self, a: V, b: V, c: V) -> Result<()> {
        self.reserve(3, 3)?;
        let base = self.base();
        self.extend_vertices(&[a, b, c]);
        for i in [0, 1, 2] {
            self.push_index(base + i);
        }
        self.dirty.set(true);
        Ok(())
    }

    /// Appends a quad as two triangles sharing the `a`-`c` diagonal.
    ///
    /// Corners must walk the perimeter (`a → b → c → d`); any other order
    /// produces a bow-tie or flipped quad without complaint.
    pub fn add_quad(&mut self, a: V, b: V, c: V, d: V) -> Result<()> {
        self.reserve(4, 6)?;
        let base = self.base();
        self.extend_vertices(&[a, b, c, d]);
        for i in [0, 1, 2, 0, 2, 3] {
            self.push_index(base + i);
        }
        self.dirty.set(true);
        Ok(())
    }

    /// Appends a vertex block and indices relative to its first vertex.
    ///
    /// Every index must address a vertex of the block; otherwise nothing is
    /// written and [`BatchError::InvalidIndex`] is returned.
    pub fn add_geometry(&mut self, vertices: &[V], indices: &[u32]) -> Result<()> {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(BatchError::InvalidIndex {
                index,
                vertices: vertices.len(),
            });
        }
        // reserve() caps the vertex count at u32::MAX, so `base + i` stays in range
        self.reserve(vertices.len(), indices.len())?;
        let base = self.base();
        self.extend_vertices(vertices);
        for &i in indices {
            self.push_index(base + i);
        }
        self.dirty.set(true);
        Ok(())
    }

    // ── internals ─────────────────────────────────────────────────────────

    #[inline]
    fn base(&self) -> u32 {
        // reserve() keeps vertex_count within INDEXABLE_VERTICES
        self.vertex_count as u32
    }

    #[inline]
    fn push_vertex(&mut self, v: V) {
        self.vertices[self.vertex_count] = v;
        self.vertex_count += 1;
    }

    #[inline]
    fn extend_vertices(&mut self, vs: &[V]) {
        let end = self.vertex_count + vs.len();
        self.vertices[self.vertex_count..end].copy_from_slice(vs);
        self.vertex_count = end;
    }

    #[inline]
    fn push_index(&mut self, i: u32) {
        self.indices[self.index_count] = i;
        self.index_count += 1;
    }

    fn checked_len(&self, buffer: MeshBuffer, extra: usize) -> Result<usize> {
        let (current, limit) = match buffer {
            MeshBuffer::Vertices => (
                self.vertex_count,
                self.max_vertices.unwrap_or(usize::MAX).min(INDEXABLE_VERTICES),
            ),
            MeshBuffer::Indices => (self.index_count, self.max_indices.unwrap_or(usize::MAX)),
        };

        let requested = current.saturating_add(extra);
        if requested > limit {
            return Err(BatchError::ResourceExhausted {
                buffer,
                requested,
                limit,
            });
        }
        Ok(requested)
    }
}

/// Doubles `buf` until it holds `len` elements, never past `limit`.
fn grow<T: Copy>(buf: &mut Vec<T>, len: usize, limit: Option<usize>, fill: T) {
    if len <= buf.len() {
        return;
    }

    let mut capacity = buf.len().max(1);
    while capacity < len {
        capacity = capacity.saturating_mul(2);
    }
    if let Some(limit) = limit {
        capacity = capacity.min(limit).max(len);
    }

    log::trace!("growing mesh buffer {} -> {}", buf.len(), capacity);
    buf.resize(capacity, fill);
}
