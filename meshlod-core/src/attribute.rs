//! Typed per-vertex attribute storage and index buffers

use crate::error::{Error, InvalidMeshError, Result};
use serde::{Deserialize, Serialize};

/// Name of the attribute every mesh must carry
pub const ATTRIBUTE_POSITION: &str = "position";
pub const ATTRIBUTE_NORMAL: &str = "normal";
pub const ATTRIBUTE_UV: &str = "uv";
pub const ATTRIBUTE_COLOR: &str = "color";

/// Numeric type of the components stored in an [`AttributeValues`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl ValueKind {
    /// Size of a single component in bytes
    pub fn byte_width(self) -> usize {
        match self {
            ValueKind::I8 | ValueKind::U8 => 1,
            ValueKind::I16 | ValueKind::U16 => 2,
            ValueKind::I32 | ValueKind::U32 | ValueKind::F32 => 4,
            ValueKind::F64 => 8,
        }
    }
}

/// Dense component array that keeps the numeric type it was loaded with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValues {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Expands `$body` once per variant with `$v` bound to the inner vector.
macro_rules! with_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            AttributeValues::I8($v) => $body,
            AttributeValues::U8($v) => $body,
            AttributeValues::I16($v) => $body,
            AttributeValues::U16($v) => $body,
            AttributeValues::I32($v) => $body,
            AttributeValues::U32($v) => $body,
            AttributeValues::F32($v) => $body,
            AttributeValues::F64($v) => $body,
        }
    };
}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for AttributeValues {
                fn from(values: Vec<$ty>) -> Self {
                    AttributeValues::$variant(values)
                }
            }
        )*
    };
}

impl_from_vec!(
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    f32 => F32,
    f64 => F64,
);

impl AttributeValues {
    /// Total number of components
    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValues::I8(_) => ValueKind::I8,
            AttributeValues::U8(_) => ValueKind::U8,
            AttributeValues::I16(_) => ValueKind::I16,
            AttributeValues::U16(_) => ValueKind::U16,
            AttributeValues::I32(_) => ValueKind::I32,
            AttributeValues::U32(_) => ValueKind::U32,
            AttributeValues::F32(_) => ValueKind::F32,
            AttributeValues::F64(_) => ValueKind::F64,
        }
    }

    /// Read one component widened to `f64`.
    ///
    /// Stored values are never modified; the widening only feeds
    /// computations such as quantization and bounding boxes.
    #[inline]
    pub fn component(&self, index: usize) -> f64 {
        with_values!(self, v => v[index] as f64)
    }

    /// A zero-filled array of the same numeric type with `len` components
    pub fn zeroed_like(&self, len: usize) -> Self {
        match self {
            AttributeValues::I8(_) => AttributeValues::I8(vec![0; len]),
            AttributeValues::U8(_) => AttributeValues::U8(vec![0; len]),
            AttributeValues::I16(_) => AttributeValues::I16(vec![0; len]),
            AttributeValues::U16(_) => AttributeValues::U16(vec![0; len]),
            AttributeValues::I32(_) => AttributeValues::I32(vec![0; len]),
            AttributeValues::U32(_) => AttributeValues::U32(vec![0; len]),
            AttributeValues::F32(_) => AttributeValues::F32(vec![0.0; len]),
            AttributeValues::F64(_) => AttributeValues::F64(vec![0.0; len]),
        }
    }

    /// Copy item `src_item` of `src` over item `dst_item` of `self`.
    ///
    /// Both arrays must hold the same numeric type.
    pub fn copy_item(
        &mut self,
        dst_item: usize,
        src: &AttributeValues,
        src_item: usize,
        item_size: usize,
    ) -> Result<()> {
        let dst = dst_item * item_size;
        let from = src_item * item_size;

        macro_rules! copy_arms {
            ($out:expr, $input:expr, $dst:expr, $from:expr, $n:expr; $($variant:ident),*) => {
                match ($out, $input) {
                    $(
                        (AttributeValues::$variant(out), AttributeValues::$variant(input)) => {
                            out[$dst..$dst + $n].copy_from_slice(&input[$from..$from + $n]);
                            Ok(())
                        }
                    )*
                    (out, input) => Err(Error::InvalidData(format!(
                        "cannot copy {:?} components into a {:?} array",
                        input.kind(),
                        out.kind()
                    ))),
                }
            };
        }

        copy_arms!(self, src, dst, from, item_size; I8, U8, I16, U16, I32, U32, F32, F64)
    }

    /// Drop everything past `len` components and release the spare capacity.
    pub fn truncate(&mut self, len: usize) {
        with_values!(self, v => {
            v.truncate(len);
            v.shrink_to_fit();
        })
    }

    /// Raw native-endian bytes of the component array
    pub fn as_bytes(&self) -> &[u8] {
        with_values!(self, v => bytemuck::cast_slice(v.as_slice()))
    }

    pub fn byte_len(&self) -> usize {
        self.len() * self.kind().byte_width()
    }
}

/// One named vertex stream: `item_size` components per vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeBuffer {
    pub item_size: usize,
    pub normalized: bool,
    pub values: AttributeValues,
}

impl AttributeBuffer {
    /// Create a buffer, checking the item size and that the values split evenly
    pub fn new(
        values: impl Into<AttributeValues>,
        item_size: usize,
        normalized: bool,
    ) -> std::result::Result<Self, InvalidMeshError> {
        let buffer = Self {
            item_size,
            normalized,
            values: values.into(),
        };
        buffer.check_layout()?;
        Ok(buffer)
    }

    /// Number of vertices stored in this buffer
    pub fn vertex_count(&self) -> usize {
        if self.item_size == 0 {
            return 0;
        }
        self.values.len() / self.item_size
    }

    /// Component `component` of vertex `vertex`, widened to `f64`
    #[inline]
    pub fn get(&self, vertex: usize, component: usize) -> f64 {
        self.values.component(vertex * self.item_size + component)
    }

    /// Same item size and normalization as `other`
    pub fn same_layout(&self, other: &AttributeBuffer) -> bool {
        self.item_size == other.item_size && self.normalized == other.normalized
    }

    pub(crate) fn check_layout(&self) -> std::result::Result<(), InvalidMeshError> {
        if !(1..=4).contains(&self.item_size) {
            return Err(InvalidMeshError::InvalidItemSize {
                item_size: self.item_size,
            });
        }
        if self.values.len() % self.item_size != 0 {
            return Err(InvalidMeshError::RaggedValues {
                len: self.values.len(),
                item_size: self.item_size,
            });
        }
        Ok(())
    }
}

/// Triangle-list index buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Indices {
    pub fn len(&self) -> usize {
        match self {
            Indices::U16(v) => v.len(),
            Indices::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vertex referenced at `position`
    #[inline]
    pub fn get(&self, position: usize) -> usize {
        match self {
            Indices::U16(v) => v[position] as usize,
            Indices::U32(v) => v[position] as usize,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Indices::U16(v) => bytemuck::cast_slice(v.as_slice()),
            Indices::U32(v) => bytemuck::cast_slice(v.as_slice()),
        }
    }
}

impl From<Vec<u16>> for Indices {
    fn from(indices: Vec<u16>) -> Self {
        Indices::U16(indices)
    }
}

impl From<Vec<u32>> for Indices {
    fn from(indices: Vec<u32>) -> Self {
        Indices::U32(indices)
    }
}
