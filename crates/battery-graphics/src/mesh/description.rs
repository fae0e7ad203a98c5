//! Backend-neutral vertex layout descriptions.
//!
//! A [`VertexDescription`] lists the attributes of a vertex type in memory
//! order. Backends turn it into their own layout; the wgpu conversion lives
//! here because it is the one every backend in this workspace needs.

use crate::error::{BatchError, Result};

/// Scalar type of a vertex attribute component.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexAttributeType {
    /// Unsigned 8-bit.
    Byte,
    /// Signed 16-bit.
    Short,
    /// Signed 32-bit.
    Int,
    /// 32-bit float.
    Float,
}

impl VertexAttributeType {
    /// Size of one component in bytes.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            VertexAttributeType::Byte => 1,
            VertexAttributeType::Short => 2,
            VertexAttributeType::Int => 4,
            VertexAttributeType::Float => 4,
        }
    }
}

/// One named attribute of a vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexAttribute {
    /// Shader input name.
    pub name: &'static str,
    pub ty: VertexAttributeType,
    /// Component count (1..=4).
    pub components: u8,
    /// Integer components are read as `[0, 1]` / `[-1, 1]` floats.
    pub normalized: bool,
}

impl VertexAttribute {
    #[inline]
    pub const fn new(
        name: &'static str,
        ty: VertexAttributeType,
        components: u8,
        normalized: bool,
    ) -> Self {
        Self {
            name,
            ty,
            components,
            normalized,
        }
    }

    /// Size of the whole attribute in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.ty.size() * self.components as usize
    }

    /// Matching wgpu vertex format, if there is one.
    ///
    /// wgpu has no 3-component 8/16-bit formats and no normalized 32-bit
    /// integers; those return `None`.
    pub fn wgpu_format(&self) -> Option<wgpu::VertexFormat> {
        use wgpu::VertexFormat as F;
        use VertexAttributeType as T;

        let format = match (self.ty, self.components, self.normalized) {
            (T::Byte, 2, false) => F::Uint8x2,
            (T::Byte, 4, false) => F::Uint8x4,
            (T::Byte, 2, true) => F::Unorm8x2,
            (T::Byte, 4, true) => F::Unorm8x4,

            (T::Short, 2, false) => F::Sint16x2,
            (T::Short, 4, false) => F::Sint16x4,
            (T::Short, 2, true) => F::Snorm16x2,
            (T::Short, 4, true) => F::Snorm16x4,

            (T::Int, 1, false) => F::Sint32,
            (T::Int, 2, false) => F::Sint32x2,
            (T::Int, 3, false) => F::Sint32x3,
            (T::Int, 4, false) => F::Sint32x4,

            (T::Float, 1, _) => F::Float32,
            (T::Float, 2, _) => F::Float32x2,
            (T::Float, 3, _) => F::Float32x3,
            (T::Float, 4, _) => F::Float32x4,

            _ => return None,
        };
        Some(format)
    }
}

/// Ordered, tightly packed attribute list of a vertex type.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexDescription {
    attributes: &'static [VertexAttribute],
    stride: usize,
}

impl VertexDescription {
    /// Builds a description; the stride is the sum of attribute sizes.
    pub const fn new(attributes: &'static [VertexAttribute]) -> Self {
        let mut stride = 0;
        let mut i = 0;
        while i < attributes.len() {
            stride += attributes[i].size();
            i += 1;
        }
        Self { attributes, stride }
    }

    #[inline]
    pub const fn attributes(&self) -> &'static [VertexAttribute] {
        self.attributes
    }

    /// Size of one vertex in bytes.
    #[inline]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Byte offset of the attribute called `name`.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let mut offset = 0;
        for attr in self.attributes {
            if attr.name == name {
                return Some(offset);
            }
            offset += attr.size();
        }
        None
    }

    /// wgpu attributes with shader locations assigned in declaration order.
    pub fn wgpu_attributes(&self) -> Result<Vec<wgpu::VertexAttribute>> {
        let mut out = Vec::with_capacity(self.attributes.len());
        let mut offset = 0u64;

        for (location, attr) in self.attributes.iter().enumerate() {
            let format = attr
                .wgpu_format()
                .ok_or(BatchError::UnsupportedAttribute { name: attr.name })?;

            out.push(wgpu::VertexAttribute {
                format,
                offset,
                shader_location: location as u32,
            });
            offset += attr.size() as u64;
        }

        Ok(out)
    }

    /// Per-vertex buffer layout over attributes produced by [`Self::wgpu_attributes`].
    pub fn wgpu_layout<'a>(
        &self,
        attributes: &'a [wgpu::VertexAttribute],
    ) -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATTRS: &[VertexAttribute] = &[
        VertexAttribute::new("a", VertexAttributeType::Float, 3, false),
        VertexAttribute::new("b", VertexAttributeType::Short, 2, true),
        VertexAttribute::new("c", VertexAttributeType::Byte, 4, true),
    ];

    #[test]
    fn stride_is_sum_of_sizes() {
        const D: VertexDescription = VertexDescription::new(ATTRS);
        assert_eq!(D.stride(), 12 + 4 + 4);
        assert_eq!(D.attributes().len(), 3);
    }

    #[test]
    fn offsets_are_cumulative() {
        let d = VertexDescription::new(ATTRS);
        assert_eq!(d.offset_of("a"), Some(0));
        assert_eq!(d.offset_of("b"), Some(12));
        assert_eq!(d.offset_of("c"), Some(16));
        assert_eq!(d.offset_of("missing"), None);
    }

    #[test]
    fn wgpu_attributes_follow_declaration_order() {
        let d = VertexDescription::new(ATTRS);
        let attrs = d.wgpu_attributes().unwrap();

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attrs[1].format, wgpu::VertexFormat::Snorm16x2);
        assert_eq!(attrs[2].format, wgpu::VertexFormat::Unorm8x4);
        assert_eq!(attrs[2].offset, 16);
        assert_eq!(attrs[2].shader_location, 2);

        let layout = d.wgpu_layout(&attrs);
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
    }

    #[test]
    fn three_byte_attribute_is_unsupported() {
        const BAD: &[VertexAttribute] =
            &[VertexAttribute::new("in_type", VertexAttributeType::Byte, 3, true)];
        let err = VertexDescription::new(BAD).wgpu_attributes().unwrap_err();
        assert!(matches!(err, BatchError::UnsupportedAttribute { name: "in_type" }));
    }

    #[test]
    fn normalized_int_has_no_format() {
        let attr = VertexAttribute::new("i", VertexAttributeType::Int, 2, true);
        assert_eq!(attr.wgpu_format(), None);
    }
}
