//! Mesh data structures and functionality

use crate::attribute::{AttributeBuffer, Indices, ATTRIBUTE_POSITION};
use crate::error::InvalidMeshError;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An indexed mesh with any number of named per-vertex attribute streams.
///
/// Attributes are kept in a [`BTreeMap`] so every traversal over them
/// happens in the same (name-sorted) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Triangle-list vertex references; `None` means vertex order defines faces
    pub indices: Option<Indices>,
    pub attributes: BTreeMap<String, AttributeBuffer>,
    /// Alternate value sets per base attribute, index-aligned with the base
    pub morph_targets: BTreeMap<String, Vec<AttributeBuffer>>,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Largest absolute side length
    pub fn max_extent(&self) -> f64 {
        let s = self.size();
        s.x.abs().max(s.y.abs()).max(s.z.abs())
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the index buffer
    pub fn with_indices(mut self, indices: impl Into<Indices>) -> Self {
        self.insert_indices(indices);
        self
    }

    /// Add or replace a named attribute
    pub fn with_attribute(mut self, name: impl Into<String>, buffer: AttributeBuffer) -> Self {
        self.insert_attribute(name, buffer);
        self
    }

    /// Append a morph target for the attribute `name`
    pub fn with_morph_target(mut self, name: impl Into<String>, buffer: AttributeBuffer) -> Self {
        self.insert_morph_target(name, buffer);
        self
    }

    pub fn insert_indices(&mut self, indices: impl Into<Indices>) {
        self.indices = Some(indices.into());
    }

    pub fn insert_attribute(&mut self, name: impl Into<String>, buffer: AttributeBuffer) {
        self.attributes.insert(name.into(), buffer);
    }

    pub fn insert_morph_target(&mut self, name: impl Into<String>, buffer: AttributeBuffer) {
        self.morph_targets.entry(name.into()).or_default().push(buffer);
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<AttributeBuffer> {
        self.attributes.remove(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeBuffer> {
        self.attributes.get(name)
    }

    pub fn position(&self) -> Option<&AttributeBuffer> {
        self.attribute(ATTRIBUTE_POSITION)
    }

    /// Number of logical vertices, taken from the `position` stream
    /// (or any attribute when `position` is absent)
    pub fn vertex_count(&self) -> usize {
        self.position()
            .or_else(|| self.attributes.values().next())
            .map(AttributeBuffer::vertex_count)
            .unwrap_or(0)
    }

    /// Number of vertices visited when walking the faces: the index count
    /// for indexed meshes, the vertex count otherwise
    pub fn effective_vertex_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.effective_vertex_count() / 3
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.effective_vertex_count() == 0
    }

    /// Approximate byte footprint of attributes, morph targets and indices
    pub fn byte_size(&self) -> usize {
        let attributes: usize = self.attributes.values().map(|b| b.values.byte_len()).sum();
        let morphs: usize = self
            .morph_targets
            .values()
            .flatten()
            .map(|b| b.values.byte_len())
            .sum();
        let indices = self.indices.as_ref().map_or(0, |i| i.as_bytes().len());
        attributes + morphs + indices
    }

    /// Bounding box of the `position` stream.
    ///
    /// Components beyond the stream's item size count as zero. Returns a
    /// zero box at the origin when there are no positions.
    pub fn bounding_box(&self) -> Aabb {
        let origin = Aabb {
            min: Point3::origin(),
            max: Point3::origin(),
        };
        let Some(position) = self.position() else {
            return origin;
        };
        let count = position.vertex_count();
        if count == 0 {
            return origin;
        }

        let dims = position.item_size.min(3);
        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);
        for v in 0..count {
            for axis in 0..3 {
                let c = if axis < dims { position.get(v, axis) } else { 0.0 };
                min[axis] = min[axis].min(c);
                max[axis] = max[axis].max(c);
            }
        }
        Aabb { min, max }
    }

    /// Check every structural invariant the decimator relies on
    pub fn validate(&self) -> Result<(), InvalidMeshError> {
        let position = self.position().ok_or(InvalidMeshError::MissingPosition)?;
        position.check_layout()?;
        let expected = position.vertex_count();

        for (name, buffer) in &self.attributes {
            buffer.check_layout()?;
            let found = buffer.vertex_count();
            if found != expected {
                return Err(InvalidMeshError::VertexCountMismatch {
                    attribute: name.clone(),
                    expected,
                    found,
                });
            }
        }

        for (name, targets) in &self.morph_targets {
            let base = self
                .attributes
                .get(name)
                .ok_or_else(|| InvalidMeshError::OrphanMorphTarget {
                    attribute: name.clone(),
                })?;
            for (target, buffer) in targets.iter().enumerate() {
                if !buffer.same_layout(base) {
                    return Err(InvalidMeshError::MorphLayoutMismatch {
                        attribute: name.clone(),
                        target,
                    });
                }
                buffer.check_layout()?;
                let found = buffer.vertex_count();
                if found != expected {
                    return Err(InvalidMeshError::MorphVertexCountMismatch {
                        attribute: name.clone(),
                        target,
                        expected,
                        found,
                    });
                }
            }
        }

        if let Some(indices) = &self.indices {
            if let Some((position, index)) = indices
                .iter()
                .enumerate()
                .find(|&(_, index)| index >= expected)
            {
                return Err(InvalidMeshError::IndexOutOfRange {
                    position,
                    index,
                    vertex_count: expected,
                });
            }
        }

        Ok(())
    }
}
