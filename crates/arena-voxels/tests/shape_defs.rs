use std::sync::Arc;

use arena_voxels::{
    ArenaVoxelShape, ArenaVoxelType, ChasmType, VoxelFacing2D, VoxelFacing3D,
    VoxelShapeDefinition, VoxelShapeLibrary, VoxelShapeScaleType, scaled_vertex_y,
};

fn shape_def(shape: ArenaVoxelShape) -> VoxelShapeDefinition {
    VoxelShapeDefinition::init_box_from_classic(&shape, VoxelShapeScaleType::ScaledFromMin, 1.0)
}

#[test]
fn scale_type_round_trip() {
    assert_eq!(scaled_vertex_y(1.0, VoxelShapeScaleType::ScaledFromMin, 2.0), 2.0);
    assert_eq!(scaled_vertex_y(1.0, VoxelShapeScaleType::UnscaledFromMin, 2.0), 1.0);
    assert_eq!(scaled_vertex_y(1.0, VoxelShapeScaleType::UnscaledFromMin, 7.5), 1.0);
    // Unscaled-from-max keeps the top glued to the top of the scaled voxel.
    assert_eq!(scaled_vertex_y(1.0, VoxelShapeScaleType::UnscaledFromMax, 2.0), 2.0);
    assert_eq!(scaled_vertex_y(0.0, VoxelShapeScaleType::UnscaledFromMax, 2.0), 1.0);
}

#[test]
fn renderer_geometry_applies_scale_type() {
    let def = VoxelShapeDefinition::init_box_from_classic(
        &ArenaVoxelShape::Wall,
        VoxelShapeScaleType::ScaledFromMin,
        2.0,
    );
    let n = def.mesh.vertex_count();
    let (mut p, mut nrm, mut t) = (vec![0.0; n * 3], vec![0.0; n * 3], vec![0.0; n * 2]);
    def.mesh
        .write_renderer_geometry_buffers(def.scale_type, 2.0, &mut p, &mut nrm, &mut t);
    let max_y = p.chunks_exact(3).map(|v| v[1]).fold(f64::MIN, f64::max);
    assert_eq!(max_y, 2.0);
    assert_eq!(nrm, def.mesh.normals);
    assert_eq!(t, def.mesh.tex_coords);
}

#[test]
fn capability_flags_follow_voxel_type() {
    let wall = shape_def(ArenaVoxelShape::Wall);
    assert!(!wall.allows_back_faces());
    assert!(wall.enables_neighbor_geometry());
    assert!(!wall.allows_adjacent_door_faces());
    assert!(wall.allows_internal_face_removal());
    assert!(wall.allows_adjacent_face_combining());

    let chasm = shape_def(ArenaVoxelShape::Chasm {
        chasm_type: ChasmType::Dry,
    });
    assert!(chasm.is_context_sensitive());
    assert!(chasm.allows_back_faces());
    assert!(!chasm.enables_neighbor_geometry());

    let raised = shape_def(ArenaVoxelShape::Raised {
        y_offset: 0.0,
        y_size: 0.5,
        v_bottom: 1.0,
        v_top: 0.5,
    });
    assert!(raised.is_elevated_platform());

    let air = VoxelShapeDefinition::air();
    assert!(air.mesh.is_empty());
    assert!(air.allows_adjacent_door_faces());
    assert!(!air.enables_neighbor_geometry());
    assert_eq!(air.voxel_type, ArenaVoxelType::None);
}

#[test]
fn facing_lookups() {
    let wall = shape_def(ArenaVoxelShape::Wall);
    assert_eq!(wall.mesh.find_index_buffer_index_with_facing(VoxelFacing3D::PositiveX), Some(0));
    assert_eq!(wall.mesh.find_index_buffer_index_with_facing(VoxelFacing3D::NegativeY), Some(1));
    assert_eq!(wall.mesh.find_texture_slot_index_with_facing(VoxelFacing3D::PositiveY), Some(2));
    for facing in VoxelFacing3D::ALL {
        assert!(wall.mesh.has_full_coverage_of_facing(facing));
    }

    let floor = shape_def(ArenaVoxelShape::Floor);
    assert!(floor.mesh.has_full_coverage_of_facing(VoxelFacing3D::PositiveY));
    assert_eq!(floor.mesh.find_index_buffer_index_with_facing(VoxelFacing3D::NegativeX), None);
    assert_eq!(floor.mesh.find_texture_slot_index_with_facing(VoxelFacing3D::NegativeY), None);

    let edge = shape_def(ArenaVoxelShape::Edge {
        facing: VoxelFacing2D::NegativeZ,
        y_offset: 0.0,
        flipped: false,
    });
    assert_eq!(edge.mesh.find_index_buffer_index_with_facing(VoxelFacing3D::NegativeZ), Some(0));
    assert!(!edge.mesh.has_full_coverage_of_facing(VoxelFacing3D::NegativeZ));

    let chasm = shape_def(ArenaVoxelShape::Chasm {
        chasm_type: ChasmType::Lava,
    });
    assert_eq!(chasm.mesh.find_texture_slot_index_with_facing(VoxelFacing3D::PositiveY), None);
    assert!(!chasm.mesh.has_full_coverage_of_facing(VoxelFacing3D::PositiveY));
}

#[test]
fn raised_caps_cover_only_at_voxel_bounds() {
    let low = shape_def(ArenaVoxelShape::Raised {
        y_offset: 0.0,
        y_size: 0.25,
        v_bottom: 1.0,
        v_top: 0.75,
    });
    assert!(low.mesh.has_full_coverage_of_facing(VoxelFacing3D::NegativeY));
    assert!(!low.mesh.has_full_coverage_of_facing(VoxelFacing3D::PositiveY));
    assert!(!low.mesh.has_full_coverage_of_facing(VoxelFacing3D::PositiveX));
}

#[test]
fn box_values_per_shape() {
    let raised = shape_def(ArenaVoxelShape::Raised {
        y_offset: 0.5,
        y_size: 0.25,
        v_bottom: 1.0,
        v_top: 0.75,
    });
    assert_eq!(raised.box_shape.height, 0.25);
    assert_eq!(raised.box_shape.y_offset, 0.5);

    let dry = shape_def(ArenaVoxelShape::Chasm {
        chasm_type: ChasmType::Dry,
    });
    let wet = shape_def(ArenaVoxelShape::Chasm {
        chasm_type: ChasmType::Wet,
    });
    assert!((dry.box_shape.height - 0.10).abs() < 1e-12);
    assert!(wet.box_shape.height > dry.box_shape.height);
    assert!((dry.box_shape.y_offset + 0.10).abs() < 1e-12);

    let diag = shape_def(ArenaVoxelShape::Diagonal { type1: true });
    assert!(diag.box_shape.width < core::f64::consts::SQRT_2);
    assert!(diag.box_shape.y_rotation < 0.0);
    let other = shape_def(ArenaVoxelShape::Diagonal { type1: false });
    assert!(other.box_shape.y_rotation > 0.0);

    let wall = shape_def(ArenaVoxelShape::Wall);
    assert_eq!(wall.box_world_y_range(), (0.0, 1.0));
}

#[test]
fn library_shares_identical_configurations() {
    let mut lib = VoxelShapeLibrary::new();
    let a = lib.get_or_create(&ArenaVoxelShape::Wall, VoxelShapeScaleType::ScaledFromMin, 1.5);
    let b = lib.get_or_create(&ArenaVoxelShape::Wall, VoxelShapeScaleType::ScaledFromMin, 1.5);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(lib.len(), 1);

    let c = lib.get_or_create(&ArenaVoxelShape::Wall, VoxelShapeScaleType::ScaledFromMin, 2.0);
    assert!(!Arc::ptr_eq(&a, &c));

    let e1 = lib.get_or_create(
        &ArenaVoxelShape::Edge {
            facing: VoxelFacing2D::PositiveX,
            y_offset: 0.0,
            flipped: false,
        },
        VoxelShapeScaleType::ScaledFromMin,
        1.5,
    );
    let e2 = lib.get_or_create(
        &ArenaVoxelShape::Edge {
            facing: VoxelFacing2D::PositiveX,
            y_offset: 0.0,
            flipped: true,
        },
        VoxelShapeScaleType::ScaledFromMin,
        1.5,
    );
    assert!(!Arc::ptr_eq(&e1, &e2));
    assert_eq!(lib.len(), 4);

    lib.clear();
    assert!(lib.is_empty());
    assert!(lib.air().mesh.is_empty());
}
