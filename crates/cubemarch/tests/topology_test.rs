//! Property tests on the shape of extracted meshes.
//!
//! A field whose boundary samples all lie below the threshold encloses every
//! inside region, so the extracted surface must be closed and consistently
//! oriented: after welding coincident vertices, each directed edge appears
//! exactly once and is matched by its reverse.

use std::collections::HashMap;

use cubemarch::{
    worst_case_vertices, EngineOptions, IsoSurfaceEngine, MeshView, NormalMode, SphereField, UVec3,
    Vec3,
};
use glam::IVec3;
use proptest::prelude::*;

/// Vertices lie on a half-cube lattice, so doubling and rounding welds them exactly.
fn weld_key(p: Vec3, cube_size: f32) -> IVec3 {
    (p * 2.0 / cube_size).round().as_ivec3()
}

fn directed_edges(mesh: &MeshView<'_>, cube_size: f32) -> HashMap<(IVec3, IVec3), usize> {
    let mut edges = HashMap::new();
    for tri in mesh.triangles() {
        let keys = tri.map(|p| weld_key(p, cube_size));
        for i in 0..3 {
            *edges.entry((keys[i], keys[(i + 1) % 3])).or_insert(0) += 1;
        }
    }
    edges
}

fn field_strategy() -> impl Strategy<Value = (UVec3, Vec<f32>)> {
    (3u32..7, 3u32..7, 3u32..7).prop_flat_map(|(nx, ny, nz)| {
        let dims = UVec3::new(nx, ny, nz);
        let len = (nx * ny * nz) as usize;
        (Just(dims), prop::collection::vec(0.0f32..1.0, len))
    })
}

fn engine_with(dims: UVec3, values: &[f32], cube_size: f32, boundary_zero: bool) -> IsoSurfaceEngine {
    let mut engine = IsoSurfaceEngine::new(dims, cube_size, 0.5).unwrap();
    engine.fill_from_provider(&|x: u32, y: u32, z: u32| {
        let on_boundary = x == 0
            || y == 0
            || z == 0
            || x == dims.x - 1
            || y == dims.y - 1
            || z == dims.z - 1;
        if boundary_zero && on_boundary {
            0.0
        } else {
            values[(x * dims.y * dims.z + y * dims.z + z) as usize]
        }
    });
    engine
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_enclosed_fields_give_closed_meshes((dims, values) in field_strategy()) {
        let cube_size = 2.0;
        let mut engine = engine_with(dims, &values, cube_size, true);
        let mesh = engine.rebuild_mesh().unwrap();

        let edges = directed_edges(&mesh, cube_size);
        for (&(a, b), &count) in &edges {
            prop_assert_eq!(count, 1, "edge {:?}->{:?} used {} times", a, b, count);
            prop_assert_eq!(edges.get(&(b, a)), Some(&1), "edge {:?}->{:?} has no twin", a, b);
        }
    }

    #[test]
    fn prop_rebuild_is_deterministic((dims, values) in field_strategy()) {
        let mut engine = engine_with(dims, &values, 1.0, false);
        let first = engine.rebuild_mesh().unwrap().vertices().to_vec();
        let second = engine.rebuild_mesh().unwrap();
        prop_assert_eq!(first.as_slice(), second.vertices());
    }

    #[test]
    fn prop_mesh_stays_inside_bounds((dims, values) in field_strategy()) {
        let mut engine = engine_with(dims, &values, 1.5, false);
        let (min, max) = engine.bounds();
        let mesh = engine.rebuild_mesh().unwrap();

        prop_assert_eq!(mesh.vertex_count() % 3, 0);
        prop_assert!(mesh.vertex_count() <= worst_case_vertices(dims));
        for v in mesh.vertices() {
            prop_assert!(v.cmpge(min - 1e-4).all() && v.cmple(max + 1e-4).all(), "{:?} outside", v);
        }
        for n in mesh.normals() {
            prop_assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}

#[test]
fn test_sphere_is_closed_with_smooth_normals() {
    let dims = UVec3::splat(12);
    let options = EngineOptions::new(dims, 1.0, 0.5).with_normal_mode(NormalMode::Smooth);
    let mut engine = IsoSurfaceEngine::configure(options).unwrap();
    engine.fill_from_provider(&SphereField::centered(dims, 4.0));

    let mesh = engine.rebuild_mesh().unwrap();
    let edges = directed_edges(&mesh, 1.0);
    assert!(!edges.is_empty());
    assert!(edges.keys().all(|&(a, b)| edges.get(&(b, a)) == Some(&1)));

    // Smooth normals agree wherever vertices coincide.
    let mut seen: HashMap<IVec3, Vec3> = HashMap::new();
    for (v, n) in mesh.vertices().iter().zip(mesh.normals()) {
        let n0 = *seen.entry(weld_key(*v, 1.0)).or_insert(*n);
        assert!(n0.distance(*n) < 1e-5);
    }
}

#[cfg(feature = "parallel")]
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_parallel_matches_serial((dims, values) in field_strategy()) {
        let mut serial = engine_with(dims, &values, 1.0, false);
        let expected = serial.rebuild_mesh().unwrap().vertices().to_vec();

        let options = serial.options().clone().with_parallel(true);
        let mut parallel = IsoSurfaceEngine::configure(options).unwrap();
        parallel.grid_mut().values_mut().copy_from_slice(serial.grid().values());
        prop_assert_eq!(parallel.rebuild_mesh().unwrap().vertices(), expected.as_slice());
    }
}
