//! Procedural meshes for benchmarks

use meshlod_core::{AttributeBuffer, Mesh, ATTRIBUTE_NORMAL, ATTRIBUTE_POSITION, ATTRIBUTE_UV};

/// Indexed `size` x `size` grid on the unit square where every quad owns
/// its four corners, as an exporter that splits faces would write it.
pub fn split_grid(size: usize) -> Mesh {
    let step = 1.0 / size.max(1) as f32;
    let mut positions = Vec::with_capacity(size * size * 12);
    let mut uvs = Vec::with_capacity(size * size * 8);
    let mut indices = Vec::with_capacity(size * size * 6);

    for y in 0..size {
        for x in 0..size {
            let base = (positions.len() / 3) as u32;
            for (dx, dy) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
                let u = (x + dx) as f32 * step;
                let v = (y + dy) as f32 * step;
                positions.extend_from_slice(&[u, v, 0.0]);
                uvs.extend_from_slice(&[u, v]);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    let mut mesh = Mesh::new().with_indices(indices);
    if let Ok(buffer) = AttributeBuffer::new(positions, 3, false) {
        mesh.insert_attribute(ATTRIBUTE_POSITION, buffer);
    }
    if let Ok(buffer) = AttributeBuffer::new(uvs, 2, false) {
        mesh.insert_attribute(ATTRIBUTE_UV, buffer);
    }
    mesh
}

/// Non-indexed unit sphere with normals and UVs whose radius wobbles
/// by up to `noise`, so coarser tolerances have real work to do.
pub fn noisy_sphere(rings: usize, segments: usize, noise: f32) -> Mesh {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let corner = |r: usize, s: usize| {
        let theta = std::f32::consts::PI * r as f32 / rings as f32;
        let phi = std::f32::consts::TAU * (s % segments) as f32 / segments as f32;
        let normal = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
        let wobble = ((r * 31 + (s % segments) * 17) % 13) as f32 / 12.0 - 0.5;
        let radius = 1.0 + noise * wobble;
        (normal.map(|n| n * radius), normal)
    };

    let vertex_count = rings * segments * 6;
    let mut positions = Vec::with_capacity(vertex_count * 3);
    let mut normals = Vec::with_capacity(vertex_count * 3);
    let mut uvs = Vec::with_capacity(vertex_count * 2);
    for r in 0..rings {
        for s in 0..segments {
            let quad = [(r, s), (r + 1, s), (r + 1, s + 1), (r, s + 1)];
            for i in [0, 1, 2, 0, 2, 3] {
                let (cr, cs) = quad[i];
                let (position, normal) = corner(cr, cs);
                positions.extend_from_slice(&position);
                normals.extend_from_slice(&normal);
                uvs.extend_from_slice(&[cs as f32 / segments as f32, cr as f32 / rings as f32]);
            }
        }
    }

    let mut mesh = Mesh::new();
    for (name, values, item_size) in [
        (ATTRIBUTE_POSITION, positions, 3),
        (ATTRIBUTE_NORMAL, normals, 3),
        (ATTRIBUTE_UV, uvs, 2),
    ] {
        if let Ok(buffer) = AttributeBuffer::new(values, item_size, false) {
            mesh.insert_attribute(name, buffer);
        }
    }
    mesh
}
