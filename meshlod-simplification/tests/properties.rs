//! Integration tests for meshlod-simplification
//!
//! These tests check the clustering decimator's structural guarantees on
//! meshes large enough to exercise real merging, and that the pipeline
//! builds a consistent ladder from them.

use meshlod_core::{
    AttributeBuffer, AttributeValues, Indices, Mesh, ATTRIBUTE_NORMAL, ATTRIBUTE_POSITION,
    ATTRIBUTE_UV,
};
use meshlod_simplification::*;

/// Deterministic value in [-1, 1) derived from an integer seed
fn jitter(seed: u32) -> f32 {
    let mut x = seed.wrapping_mul(0x9E37_79B9) ^ 0x85EB_CA6B;
    x ^= x >> 15;
    x = x.wrapping_mul(0x2C1B_3C6D);
    x ^= x >> 12;
    (x % 2000) as f32 / 1000.0 - 1.0
}

/// Non-indexed UV sphere: every triangle owns its three corners, and the
/// positions carry a small deterministic jitter so that larger tolerances
/// have something to merge.
fn make_jittered_sphere(rings: usize, segments: usize, noise: f32) -> Mesh {
    let lattice = |r: usize, s: usize| -> [f32; 3] {
        let theta = std::f32::consts::PI * r as f32 / rings as f32;
        let phi = 2.0 * std::f32::consts::PI * (s % segments) as f32 / segments as f32;
        let seed = (r * (segments + 1) + s % segments) as u32;
        let radius = 1.0 + noise * jitter(seed);
        [
            radius * theta.sin() * phi.cos(),
            radius * theta.cos(),
            radius * theta.sin() * phi.sin(),
        ]
    };

    let mut positions = Vec::new();
    let mut uvs = Vec::new();
    for r in 0..rings {
        for s in 0..segments {
            let quad = [(r, s), (r + 1, s), (r + 1, s + 1), (r, s + 1)];
            for corner in [0, 1, 2, 0, 2, 3] {
                let (cr, cs) = quad[corner];
                positions.extend_from_slice(&lattice(cr, cs));
                uvs.push(cs as f32 / segments as f32);
                uvs.push(cr as f32 / rings as f32);
            }
        }
    }

    Mesh::new()
        .with_attribute(
            ATTRIBUTE_POSITION,
            AttributeBuffer::new(positions, 3, false).unwrap(),
        )
        .with_attribute(ATTRIBUTE_UV, AttributeBuffer::new(uvs, 2, false).unwrap())
}

fn position_only(mesh: &Mesh) -> Mesh {
    let mut out = mesh.clone();
    out.attributes.retain(|name, _| name == ATTRIBUTE_POSITION);
    out
}

/// Cube with 4 unshared corners per face, indexed, optional per-face normals
fn make_cube(with_normals: bool) -> Mesh {
    let corners: [[f32; 3]; 8] = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    let faces: [([usize; 4], [f32; 3]); 6] = [
        ([0, 3, 2, 1], [0.0, 0.0, -1.0]),
        ([4, 5, 6, 7], [0.0, 0.0, 1.0]),
        ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
        ([3, 7, 6, 2], [0.0, 1.0, 0.0]),
        ([0, 4, 7, 3], [-1.0, 0.0, 0.0]),
        ([1, 2, 6, 5], [1.0, 0.0, 0.0]),
    ];

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();
    for (fi, (quad, normal)) in faces.iter().enumerate() {
        for &c in quad {
            positions.extend_from_slice(&corners[c]);
            normals.extend_from_slice(normal);
        }
        let b = (fi * 4) as u32;
        indices.extend_from_slice(&[b, b + 1, b + 2, b, b + 2, b + 3]);
    }

    let mut mesh = Mesh::new()
        .with_attribute(
            ATTRIBUTE_POSITION,
            AttributeBuffer::new(positions, 3, false).unwrap(),
        )
        .with_indices(indices);
    if with_normals {
        mesh.insert_attribute(
            ATTRIBUTE_NORMAL,
            AttributeBuffer::new(normals, 3, false).unwrap(),
        );
    }
    mesh
}

#[test]
fn test_cube_position_only_welds_to_eight() {
    let cube = make_cube(false);
    assert_eq!(cube.vertex_count(), 24);

    let result = decimate(&cube, 0.5).unwrap();
    assert_eq!(result.vertex_count(), 8);

    let indices = result.indices.as_ref().unwrap();
    assert_eq!(indices.len(), 36);
    let mut referenced: Vec<usize> = indices.iter().collect();
    referenced.sort_unstable();
    referenced.dedup();
    assert_eq!(referenced, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_cube_with_normals_keeps_all_corners() {
    let cube = make_cube(true);
    let result = decimate(&cube, 0.5).unwrap();
    assert_eq!(result.vertex_count(), 24);
    assert_eq!(result.effective_vertex_count(), 36);
}

#[test]
fn test_topology_preserved_for_every_tolerance() {
    let sphere = make_jittered_sphere(12, 16, 0.01);
    let effective = sphere.effective_vertex_count();
    for tolerance in [0.0, 1e-6, 1e-3, 0.02, 0.1, 1.0, 100.0] {
        let result = decimate(&sphere, tolerance).unwrap();
        assert_eq!(result.effective_vertex_count(), effective);
        let unique = result.vertex_count();
        assert!(unique <= sphere.vertex_count());
        assert!(result.indices.as_ref().unwrap().iter().all(|i| i < unique));
        for buffer in result.attributes.values() {
            assert_eq!(buffer.values.len(), unique * buffer.item_size);
        }
    }
}

#[test]
fn test_idempotent_at_equal_tolerance() {
    let sphere = make_jittered_sphere(10, 14, 0.02);
    for tolerance in [1e-4, 0.01, 0.05, 0.3] {
        let once = decimate(&sphere, tolerance).unwrap();
        let twice = decimate(&once, tolerance).unwrap();
        assert_eq!(twice.vertex_count(), once.vertex_count());
        assert_eq!(twice, once);
    }
}

#[test]
fn test_coarser_tolerance_never_exceeds_exact_weld() {
    // At a tiny tolerance only bit-identical corners merge; every coarser
    // tolerance can only merge further.
    let sphere = position_only(&make_jittered_sphere(12, 16, 0.01));
    let exact = decimate(&sphere, 1e-9).unwrap().vertex_count();

    for tolerance in [1e-6, 1e-4, 0.05, 0.5] {
        let unique = decimate(&sphere, tolerance).unwrap().vertex_count();
        assert!(unique <= exact, "{} > {} at {}", unique, exact, tolerance);
    }
    assert!(decimate(&sphere, 0.5).unwrap().vertex_count() < exact);
    assert_eq!(decimate(&sphere, 5.0).unwrap().vertex_count(), 1);
}

#[test]
fn test_uv_attribute_limits_merging() {
    let sphere = make_jittered_sphere(8, 12, 0.0);
    let positions = position_only(&sphere);

    let with_uv = decimate(&sphere, 1e-4).unwrap().vertex_count();
    let without_uv = decimate(&positions, 1e-4).unwrap().vertex_count();

    // The UV seam at phi = 0 and the poles keep extra vertices apart.
    assert!(with_uv > without_uv, "{} <= {}", with_uv, without_uv);
}

#[test]
fn test_morph_target_lockstep() {
    let sphere = position_only(&make_jittered_sphere(6, 8, 0.0));
    let count = sphere.vertex_count();
    // Each morph row stores the index of the vertex it belongs to.
    let morph: Vec<f32> = (0..count).flat_map(|v| [v as f32; 3]).collect();
    let mesh = sphere.with_morph_target(
        ATTRIBUTE_POSITION,
        AttributeBuffer::new(morph, 3, false).unwrap(),
    );

    let result = decimate(&mesh, 1e-4).unwrap();
    let unique = result.vertex_count();
    let target = &result.morph_targets[ATTRIBUTE_POSITION][0];
    assert_eq!(target.vertex_count(), unique);

    let (AttributeValues::F32(base), AttributeValues::F32(morph), AttributeValues::F32(source)) = (
        &result.position().unwrap().values,
        &target.values,
        &mesh.position().unwrap().values,
    ) else {
        panic!("expected f32 buffers");
    };

    for k in 0..unique {
        let origin = morph[k * 3] as usize;
        assert_eq!(&base[k * 3..k * 3 + 3], &source[origin * 3..origin * 3 + 3]);
        assert!(morph[k * 3..k * 3 + 3].iter().all(|&m| m == origin as f32));
    }

    // Representatives are discovered in traversal order.
    let origins: Vec<usize> = (0..unique).map(|k| morph[k * 3] as usize).collect();
    assert!(origins.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_non_indexed_output_picks_u16() {
    let sphere = make_jittered_sphere(4, 6, 0.0);
    let result = decimate(&sphere, 1e-4).unwrap();
    assert!(matches!(result.indices, Some(Indices::U16(_))));
}

#[test]
fn test_non_indexed_output_widens_past_u16() {
    // 70000 distinct points along x, one vertex each.
    let count = 70_000usize;
    let positions: Vec<f32> = (0..count).flat_map(|i| [i as f32, 0.0, 0.0]).collect();
    let mesh = Mesh::new().with_attribute(
        ATTRIBUTE_POSITION,
        AttributeBuffer::new(positions, 3, false).unwrap(),
    );

    let result = decimate(&mesh, 0.01).unwrap();
    let unique = result.vertex_count();
    assert_eq!(unique, count);
    let Some(Indices::U32(indices)) = &result.indices else {
        panic!("expected 32-bit indices, got {:?}", result.indices.as_ref().map(|i| i.len()));
    };
    assert_eq!(indices.len(), count);
    assert!(indices.iter().all(|&i| (i as usize) < unique));
}

#[test]
fn test_pipeline_ladder_shrinks() {
    let sphere = position_only(&make_jittered_sphere(24, 32, 0.004));
    let mut reporter = CollectingReporter::new();
    let levels = DecimationPipeline::new(PipelineConfig::default().with_coefficients(vec![
        1e-6, 1e-3, 0.1,
    ]))
    .unwrap()
    .run(&sphere, &mut reporter)
    .unwrap();

    assert_eq!(levels.len(), 3);
    let counts: Vec<usize> = reporter.reports.iter().map(|r| r.vertex_count).collect();
    let exact = decimate(&sphere, 1e-9).unwrap().vertex_count();
    assert!(counts.iter().all(|&c| c <= exact));
    assert!(counts[2] < counts[0], "{:?}", counts);
    for level in &levels {
        assert_eq!(level.effective_vertex_count(), sphere.effective_vertex_count());
    }
}
