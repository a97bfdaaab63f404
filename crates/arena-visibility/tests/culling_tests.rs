use arena_chunk::ChunkInt2;
use arena_geom::{RenderCamera, Vec3};
use arena_visibility::tree::{NODE_COUNTS, TREE_LEVEL_INDEX_LEAF, leaf_local_index};
use arena_visibility::{VisibilityType, VoxelVisibilityChunk, VoxelVisibilityChunkManager};

const HEIGHT: i32 = 6;
const CEILING: f64 = 1.0;

fn chunk_at(x: i32, z: i32) -> VoxelVisibilityChunk {
    let mut chunk = VoxelVisibilityChunk::default();
    chunk.init(ChunkInt2::new(x, z), HEIGHT, CEILING);
    chunk
}

fn camera(eye: Vec3, dir: Vec3) -> RenderCamera {
    RenderCamera::new(eye, dir, 60.0, 16.0 / 9.0)
}

#[test]
fn node_bounds_follow_chunk_origin_and_height() {
    let chunk = chunk_at(1, -1);
    let root = chunk.node_bbox(0, 0);
    assert_eq!(root.min, Vec3::new(64.0, 0.0, -64.0));
    assert_eq!(root.max, Vec3::new(128.0, 6.0, 0.0));
    for level in 0..TREE_LEVEL_INDEX_LEAF {
        for local in 0..NODE_COUNTS[level] {
            let parent = *chunk.node_bbox(level, local);
            for child in local * 4..local * 4 + 4 {
                assert!(parent.contains_box(chunk.node_bbox(level + 1, child)));
            }
        }
    }
    let leaf = chunk.node_bbox(TREE_LEVEL_INDEX_LEAF, 3);
    assert_eq!(leaf.width(), 1.0);
    assert_eq!(leaf.depth(), 1.0);
    assert_eq!(leaf.height(), 6.0);
}

#[test]
fn distant_chunk_in_view_resolves_at_root() {
    let mut chunk = chunk_at(0, 0);
    chunk.update(&camera(Vec3::new(32.0, 3.0, -200.0), Vec3::UNIT_Z));
    assert_eq!(chunk.root_visibility(), VisibilityType::Inside);
    assert_eq!(chunk.frustum_test_count(), 1);
    assert!(chunk.leaf_node_frustum_tests().iter().all(|&v| v));
    assert_eq!(chunk.visibility_type(5, 1023), VisibilityType::Inside);
    assert_eq!(chunk.visible_leaf_columns().count(), 4096);
}

#[test]
fn chunk_behind_camera_resolves_at_root() {
    let mut chunk = chunk_at(0, 0);
    chunk.update(&camera(Vec3::new(32.0, 3.0, -10.0), -Vec3::UNIT_Z));
    assert_eq!(chunk.root_visibility(), VisibilityType::Outside);
    assert_eq!(chunk.frustum_test_count(), 1);
    assert!(!chunk.any_visible_leaf_nodes());
    assert!(chunk.leaf_node_frustum_tests().iter().all(|&v| !v));
    assert_eq!(chunk.visible_leaf_columns().count(), 0);
}

#[test]
fn camera_inside_chunk_culls_columns_behind_it() {
    let mut chunk = chunk_at(0, 0);
    chunk.update(&camera(Vec3::new(32.5, 3.0, 32.0), Vec3::UNIT_X));
    assert_eq!(chunk.root_visibility(), VisibilityType::Partial);
    assert!(chunk.any_visible_leaf_nodes());
    for z in 0..64 {
        for x in 0..32 {
            assert!(!chunk.leaf_node_frustum_test(x, z), "column ({x}, {z}) is behind the eye");
        }
    }
    assert!(chunk.leaf_node_frustum_test(40, 32));
    assert!(chunk.leaf_node_frustum_test(63, 32));
    assert!(chunk.frustum_test_count() > 1);
    assert!(chunk.frustum_test_count() < 5461);
}

#[test]
fn forward_plane_through_the_chunk_splits_leaves_exactly() {
    // Wide enough that only the forward plane at x = 32.5 cuts the chunk, so leaf column
    // 32 straddles it and the side planes contain everything in front.
    let cam = RenderCamera::new(Vec3::new(32.5, 3.0, 32.0), Vec3::UNIT_X, 170.0, 16.0);
    let mut chunk = chunk_at(0, 0);
    chunk.update(&cam);
    assert_eq!(chunk.root_visibility(), VisibilityType::Partial);
    for z in 0..64 {
        for x in 0..64 {
            let bbox = chunk.node_bbox(TREE_LEVEL_INDEX_LEAF, leaf_local_index(x, z));
            let vis = cam.bbox_visibility(bbox);
            let visible = chunk.leaf_node_frustum_test(x, z);
            if x < 32 {
                assert!(vis.completely_invisible, "({x}, {z}) should be behind the plane");
                assert!(!visible, "column ({x}, {z}) is behind the eye");
            } else if x == 32 {
                assert!(!vis.completely_visible && !vis.completely_invisible, "({x}, {z}) should straddle");
                assert!(visible, "straddling column ({x}, {z}) must count as visible");
            } else {
                assert!(vis.completely_visible, "({x}, {z}) should be inside every plane");
                assert!(visible, "column ({x}, {z}) is in front of the eye");
            }
        }
    }
    assert_eq!(chunk.visible_leaf_columns().count(), 32 * 64);
}

#[test]
fn repeated_updates_agree() {
    let mut chunk = chunk_at(0, 0);
    let cam = camera(Vec3::new(10.3, 2.0, 5.7), Vec3::new(1.0, -0.2, 0.6));
    chunk.update(&cam);
    let first = chunk.leaf_node_frustum_tests().to_vec();
    let count = chunk.frustum_test_count();
    chunk.update(&cam);
    assert_eq!(chunk.leaf_node_frustum_tests(), first.as_slice());
    assert_eq!(chunk.frustum_test_count(), count);
}

#[test]
fn update_overwrites_previous_frame() {
    let mut chunk = chunk_at(0, 0);
    chunk.update(&camera(Vec3::new(32.0, 3.0, -200.0), Vec3::UNIT_Z));
    chunk.update(&camera(Vec3::new(32.0, 3.0, -10.0), -Vec3::UNIT_Z));
    assert!(chunk.leaf_node_frustum_tests().iter().all(|&v| !v));
    assert_eq!(chunk.visibility_type(3, 10), VisibilityType::Outside);
}

#[test]
fn clear_resets_results() {
    let mut chunk = chunk_at(2, 2);
    chunk.update(&camera(Vec3::new(160.0, 3.0, -100.0), Vec3::UNIT_Z));
    assert!(chunk.any_visible_leaf_nodes());
    chunk.clear();
    assert_eq!(chunk.position(), ChunkInt2::default());
    assert!(!chunk.any_visible_leaf_nodes());
    assert_eq!(chunk.frustum_test_count(), 0);
}

#[test]
fn manager_tracks_chunk_delta() {
    let mut manager = VoxelVisibilityChunkManager::new();
    let cam = camera(Vec3::new(32.0, 3.0, -200.0), Vec3::UNIT_Z);
    let a = ChunkInt2::new(0, 0);
    let b = ChunkInt2::new(0, -5);
    manager.update(&[a, b], &[], &cam, HEIGHT, CEILING);
    assert_eq!(manager.len(), 2);
    assert!(manager.chunk(a).is_some_and(|c| c.any_visible_leaf_nodes()));
    assert!(manager.chunk(b).is_some_and(|c| !c.any_visible_leaf_nodes()));
    assert_eq!(manager.total_frustum_test_count(), 2);

    manager.update(&[], &[b], &cam, HEIGHT, CEILING);
    assert_eq!(manager.len(), 1);
    assert!(manager.chunk(b).is_none());

    manager.clear();
    assert!(manager.is_empty());
}
