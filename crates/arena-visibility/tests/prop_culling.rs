use arena_chunk::ChunkInt2;
use arena_geom::{RenderCamera, Vec3};
use arena_visibility::tree::{LEAF_NODE_COUNT, NODE_COUNTS, TREE_LEVEL_INDEX_LEAF};
use arena_visibility::{VisibilityType, VoxelVisibilityChunk};
use proptest::prelude::*;

fn arb_camera() -> impl Strategy<Value = RenderCamera> {
    (
        -40.0f64..100.0,
        0.5f64..5.5,
        -40.0f64..100.0,
        -1.0f64..1.0,
        -0.5f64..0.5,
        -1.0f64..1.0,
        30.0f64..100.0,
    )
        .prop_filter("direction must be horizontal-ish", |t| t.3.abs() + t.5.abs() > 0.1)
        .prop_map(|(x, y, z, dx, dy, dz, fov)| {
            RenderCamera::new(
                Vec3::new(x + 0.37, y, z + 0.37),
                Vec3::new(dx, dy, dz),
                fov,
                16.0 / 9.0,
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Resolved subtrees never disagree with their children.
    #[test]
    fn resolved_nodes_broadcast_to_children(cam in arb_camera()) {
        let mut chunk = VoxelVisibilityChunk::default();
        chunk.init(ChunkInt2::new(0, 0), 6, 1.0);
        chunk.update(&cam);
        for level in 0..TREE_LEVEL_INDEX_LEAF {
            for local in 0..NODE_COUNTS[level] {
                let vis = chunk.visibility_type(level, local);
                if vis == VisibilityType::Partial {
                    continue;
                }
                for child in local * 4..local * 4 + 4 {
                    if level + 1 < TREE_LEVEL_INDEX_LEAF {
                        prop_assert_eq!(chunk.visibility_type(level + 1, child), vis);
                    } else {
                        prop_assert_eq!(chunk.leaf_node_frustum_tests()[child], vis == VisibilityType::Inside);
                    }
                }
            }
        }
    }

    // Skipping subtrees gives the same answer as testing every column.
    #[test]
    fn leaves_match_direct_tests(cam in arb_camera()) {
        let mut chunk = VoxelVisibilityChunk::default();
        chunk.init(ChunkInt2::new(0, 0), 6, 1.0);
        chunk.update(&cam);
        prop_assert!(chunk.frustum_test_count() <= 5461);
        for local in 0..LEAF_NODE_COUNT {
            let direct = !cam.bbox_visibility(chunk.node_bbox(TREE_LEVEL_INDEX_LEAF, local)).completely_invisible;
            prop_assert_eq!(chunk.leaf_node_frustum_tests()[local], direct, "leaf {}", local);
        }
    }
}
