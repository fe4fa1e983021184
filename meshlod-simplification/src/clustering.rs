//! Clustering-based mesh decimation
//!
//! Implements spatial-hash vertex welding. Every vertex visited by the face
//! list is quantized across *all* of its attributes into a fixed-width
//! integer key; vertices that share a key collapse into the first of them
//! seen in traversal order. Position, normal, UV, color and any other stream
//! all take part, so a hard edge or a UV seam keeps coincident vertices
//! apart. Morph targets do not contribute to the key but are compacted in
//! lockstep with their base attribute.

use crate::MeshDecimator;
use meshlod_core::{AttributeBuffer, AttributeValues, Error, Indices, Mesh, Result};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Smallest tolerance used for quantization
pub const MIN_TOLERANCE: f64 = f64::EPSILON;

// ============================================================
// Quantization
// ============================================================

/// Clamp a tolerance to [`MIN_TOLERANCE`]. NaN clamps as well.
pub fn clamp_tolerance(tolerance: f64) -> f64 {
    tolerance.max(MIN_TOLERANCE)
}

/// Maps attribute components to integer buckets for one tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    /// Buckets per unit, `10^log10(1 / tolerance)`
    pub hasher: f64,
    /// Half-bucket offset so values round to the nearest bucket
    pub bias: f64,
}

impl Quantizer {
    /// Quantizer for `tolerance`, clamped to [`MIN_TOLERANCE`]
    pub fn new(tolerance: f64) -> Self {
        let tolerance = clamp_tolerance(tolerance);
        let hasher = 10f64.powf((1.0 / tolerance).log10());
        // An infinite tolerance puts every value in bucket 0.
        let bias = if hasher == 0.0 {
            0.0
        } else {
            0.5 * tolerance * hasher
        };
        Self { hasher, bias }
    }

    /// Index of the bucket holding `value`, as an integral `f64`
    #[inline]
    pub fn bucket(&self, value: f64) -> f64 {
        (value * self.hasher + self.bias).floor()
    }

    /// Bucket of `value` as a hashable key component.
    ///
    /// Uses the bit pattern of the exact bucket index, so magnitudes far past
    /// the `i64` range still get distinct keys. `-0.0` folds onto `0.0`.
    #[inline]
    pub fn key(&self, value: f64) -> u64 {
        let bucket = self.bucket(value);
        if bucket == 0.0 {
            0
        } else {
            bucket.to_bits()
        }
    }
}

// ============================================================
// Output streams
// ============================================================

/// Preallocated output array for one source buffer.
struct Stream<'a> {
    source: &'a AttributeBuffer,
    values: AttributeValues,
}

impl<'a> Stream<'a> {
    fn new(source: &'a AttributeBuffer, vertex_capacity: usize) -> Self {
        Self {
            values: source.values.zeroed_like(vertex_capacity * source.item_size),
            source,
        }
    }

    fn copy_vertex(&mut self, dst: usize, src: usize) -> Result<()> {
        self.values
            .copy_item(dst, &self.source.values, src, self.source.item_size)
    }

    fn finish(mut self, unique: usize) -> AttributeBuffer {
        self.values.truncate(unique * self.source.item_size);
        AttributeBuffer {
            item_size: self.source.item_size,
            normalized: self.source.normalized,
            values: self.values,
        }
    }
}

// ============================================================
// Cluster Decimator
// ============================================================

/// Attribute-aware vertex clustering decimator.
///
/// The result keeps the face list exactly (one output index per traversed
/// vertex) while every attribute and morph target shrinks to the number of
/// distinct clusters. Output vertex `k` is the first vertex of cluster `k`
/// in traversal order, so results are deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterDecimator;

impl ClusterDecimator {
    pub fn new() -> Self {
        Self
    }

    fn weld(mesh: &Mesh, tolerance: f64) -> Result<Mesh> {
        mesh.validate()?;

        let effective = mesh.effective_vertex_count();
        if effective == 0 {
            return Ok(mesh.clone());
        }
        if effective > u32::MAX as usize {
            return Err(Error::Algorithm(format!(
                "{} vertices exceed the 32-bit index range",
                effective
            )));
        }

        let quantizer = Quantizer::new(tolerance);
        let indices = mesh.indices.as_ref();
        let key_width: usize = mesh.attributes.values().map(|b| b.item_size).sum();
        trace!(
            hasher = quantizer.hasher,
            bias = quantizer.bias,
            key_width,
            "quantizing vertices"
        );

        // Clusters never outnumber the distinct vertices referenced. Sized for
        // that worst case and trimmed at the end.
        let capacity = effective.min(mesh.vertex_count());
        let mut attributes: Vec<(&String, Stream)> = mesh
            .attributes
            .iter()
            .map(|(name, buffer)| (name, Stream::new(buffer, capacity)))
            .collect();
        let mut morphs: Vec<(&String, Vec<Stream>)> = mesh
            .morph_targets
            .iter()
            .map(|(name, targets)| {
                let streams = targets.iter().map(|b| Stream::new(b, capacity)).collect();
                (name, streams)
            })
            .collect();

        let mut clusters: HashMap<Box<[u64]>, u32> = HashMap::with_capacity(capacity);
        let mut key: Vec<u64> = Vec::with_capacity(key_width);
        let mut remap: Vec<u32> = Vec::with_capacity(effective);

        for i in 0..effective {
            let v = indices.map_or(i, |indices| indices.get(i));

            key.clear();
            for (_, stream) in &attributes {
                let source = stream.source;
                for c in 0..source.item_size {
                    key.push(quantizer.key(source.get(v, c)));
                }
            }

            let existing = clusters.get(key.as_slice()).copied();
            let compact = match existing {
                Some(compact) => compact,
                None => {
                    let compact = clusters.len() as u32;
                    for (_, stream) in attributes.iter_mut() {
                        stream.copy_vertex(compact as usize, v)?;
                    }
                    for (_, targets) in morphs.iter_mut() {
                        for stream in targets.iter_mut() {
                            stream.copy_vertex(compact as usize, v)?;
                        }
                    }
                    clusters.insert(key.as_slice().into(), compact);
                    compact
                }
            };
            remap.push(compact);
        }

        let unique = clusters.len();
        debug!(traversed = effective, unique, "clustered vertices");

        let indices = match indices {
            Some(Indices::U32(_)) => Indices::U32(remap),
            // Cluster ids never exceed the distinct vertices referenced.
            Some(Indices::U16(_)) => Indices::U16(remap.iter().map(|&k| k as u16).collect()),
            None if unique <= u16::MAX as usize + 1 => {
                Indices::U16(remap.iter().map(|&k| k as u16).collect())
            }
            None => Indices::U32(remap),
        };

        Ok(Mesh {
            indices: Some(indices),
            attributes: attributes
                .into_iter()
                .map(|(name, stream)| (name.clone(), stream.finish(unique)))
                .collect(),
            morph_targets: morphs
                .into_iter()
                .map(|(name, targets)| {
                    let targets = targets.into_iter().map(|s| s.finish(unique)).collect();
                    (name.clone(), targets)
                })
                .collect(),
        })
    }
}

impl MeshDecimator for ClusterDecimator {
    #[tracing::instrument(
        level = "debug",
        name = "cluster_decimate",
        skip_all,
        fields(tolerance = tolerance, vertices = mesh.vertex_count())
    )]
    fn decimate(&self, mesh: &Mesh, tolerance: f64) -> Result<Mesh> {
        Self::weld(mesh, tolerance)
    }
}

/// Decimate `mesh` with the default [`ClusterDecimator`]
pub fn decimate(mesh: &Mesh, tolerance: f64) -> Result<Mesh> {
    ClusterDecimator.decimate(mesh, tolerance)
}
