//! Integration tests for the engine boundary API.

use cubemarch::*;

fn engine(dims: UVec3, cube_size: f32) -> IsoSurfaceEngine {
    IsoSurfaceEngine::new(dims, cube_size, 0.5).expect("configure failed")
}

#[test]
fn test_single_corner_scenario() {
    init_logging();
    let mut engine = engine(UVec3::splat(3), 2.0);
    engine.set_sample(0, 0, 0, 0.9).unwrap();

    let mesh = engine.rebuild_mesh().unwrap();
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.vertex_count(), 3);

    // Grid point (0, 0, 0) is corner 3 of cube (0, 0, 0); its crossed edges
    // are 2, 3 and 11.
    let center = engine.cube_center(UVec3::ZERO);
    assert_eq!(center, Vec3::splat(-1.0));
    let expected: Vec<Vec3> = engine.case_table()[1 << 3]
        .iter()
        .map(|&e| engine.edge_midpoints()[e as usize] * 2.0 + center)
        .collect();
    assert_eq!(engine.mesh().vertices(), expected.as_slice());
    assert_eq!(engine.mesh().indices().collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn test_code_one_emits_edges_0_8_3() {
    let mut engine = engine(UVec3::splat(2), 1.0);
    // Corner 0 sits at grid offset (0, 1, 0).
    engine.set_sample(0, 1, 0, 1.0).unwrap();
    let midpoints = engine.edge_midpoints();
    let mesh = engine.rebuild_mesh().unwrap();

    assert_eq!(
        mesh.vertices(),
        &[midpoints[0], midpoints[8], midpoints[3]]
    );
}

#[test]
fn test_uniform_grids_are_empty() {
    let mut engine = engine(UVec3::new(5, 4, 3), 1.0);
    assert!(engine.rebuild_mesh().unwrap().is_empty());

    engine.fill_from_provider(&|_, _, _| 0.5);
    assert!(engine.rebuild_mesh().unwrap().is_empty());

    engine.fill_from_provider(&|_, _, _| 1.0);
    assert!(engine.rebuild_mesh().unwrap().is_empty());
}

#[test]
fn test_sample_access_errors() {
    let mut engine = engine(UVec3::new(4, 3, 2), 1.0);
    engine.set_sample(3, 2, 1, 0.75).unwrap();
    assert_eq!(engine.get_sample(3, 2, 1).unwrap(), 0.75);

    assert!(matches!(
        engine.set_sample(4, 0, 0, 1.0),
        Err(CubemarchError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        engine.get_sample(0, 3, 0),
        Err(CubemarchError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        engine.get_sample(0, 0, 2),
        Err(CubemarchError::IndexOutOfRange { .. })
    ));
}

#[test]
fn test_invalid_configuration() {
    for dims in [UVec3::new(1, 5, 5), UVec3::new(5, 1, 5), UVec3::new(5, 5, 1)] {
        assert!(matches!(
            IsoSurfaceEngine::new(dims, 1.0, 0.5),
            Err(CubemarchError::InvalidDimension { value: 1, .. })
        ));
    }
    assert!(matches!(
        IsoSurfaceEngine::new(UVec3::splat(3), 1.0, f32::NAN),
        Err(CubemarchError::ThresholdOutOfRange(_))
    ));
    assert!(matches!(
        IsoSurfaceEngine::new(UVec3::splat(3), 0.0, 0.5),
        Err(CubemarchError::InvalidCubeSize(_))
    ));
}

#[test]
fn test_options_from_json() {
    let options = EngineOptions::from_json(
        r#"{ "grid_dims": [6, 6, 6], "cube_size": 0.5, "normal_mode": "Smooth" }"#,
    )
    .unwrap();
    let mut engine = IsoSurfaceEngine::configure(options).unwrap();
    assert_eq!(engine.options().normal_mode, NormalMode::Smooth);
    assert_eq!(engine.volume_size(), Vec3::splat(2.5));

    engine.fill_from_provider(&SphereField::centered(UVec3::splat(6), 2.0));
    let mesh = engine.rebuild_mesh().unwrap();
    assert!(!mesh.is_empty());
    assert_eq!(mesh.normals().len(), mesh.vertex_count());
}

#[test]
fn test_tables_are_consistent() {
    let engine = engine(UVec3::new(4, 3, 5), 1.0);
    for (e, [a, b]) in engine.edge_corners().iter().enumerate() {
        let mid = (engine.corner_positions()[*a] + engine.corner_positions()[*b]) * 0.5;
        assert_eq!(engine.edge_midpoints()[e], mid, "edge {e}");
    }

    // Corner offsets address the same samples as the grid's own indexing.
    let offsets = engine.corner_offsets();
    let grid = engine.grid();
    for (corner, offset) in CORNER_GRID_OFFSETS.iter().enumerate() {
        let direct = grid.flat_index(offset.x, offset.y, offset.z).unwrap();
        assert_eq!(offsets.get(corner), direct);
    }

    assert!(engine.case_table()[0].is_empty());
    assert!(engine.case_table()[255].is_empty());
}

#[test]
fn test_failed_rebuild_keeps_previous_mesh() {
    let dims = UVec3::splat(3);
    let mut grid = VoxelGrid::new(dims).unwrap();
    grid.set(0, 0, 0, 1.0).unwrap();

    // Room for one cube's worth of vertices only.
    let mut assembler = MeshAssembler::with_capacity(dims, 1.0, MAX_VERTICES_PER_CUBE).unwrap();
    let first: Vec<Vec3> = assembler.rebuild(&grid, 0.5).unwrap().vertices().to_vec();
    assert_eq!(first.len(), 3);

    // The center sample is a corner of all eight cubes.
    grid.set(1, 1, 1, 1.0).unwrap();
    assert!(matches!(
        assembler.rebuild(&grid, 0.5),
        Err(CubemarchError::CapacityExceeded { capacity: 15, .. })
    ));
    assert_eq!(assembler.mesh().vertices(), first.as_slice());
}
