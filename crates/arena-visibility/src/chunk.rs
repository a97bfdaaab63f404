use arena_chunk::{Chunk, ChunkInt2, PoolChunk};
use arena_geom::{Aabb, BBoxVisibility, RenderCamera, Vec3};

use crate::stack::SubtreeStack;
use crate::tree::{
    CHILD_COUNT_PER_NODE, GLOBAL_NODE_OFFSETS, INTERNAL_NODE_COUNT, LEAF_NODE_COUNT, NODE_COUNTS,
    TOTAL_NODE_COUNT, TREE_LEVEL_COUNT, TREE_LEVEL_INDEX_LEAF, TREE_LEVEL_INDEX_ROOT,
    first_child_local_index, global_node_index, leaf_local_index, node_side_length, z_order_point,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisibilityType {
    #[default]
    Outside,
    Partial,
    Inside,
}

impl VisibilityType {
    fn from_bbox(vis: BBoxVisibility) -> Self {
        if vis.completely_invisible {
            VisibilityType::Outside
        } else if vis.completely_visible {
            VisibilityType::Inside
        } else {
            VisibilityType::Partial
        }
    }
}

/// Frustum culling state for one chunk.
///
/// Internal nodes keep a three-way classification; leaves (one per voxel column) only
/// keep whether any part of the column may be visible.
#[derive(Clone, Debug)]
pub struct VoxelVisibilityChunk {
    chunk: Chunk,
    node_bboxes: Vec<Aabb>,
    internal_node_visibility_types: Vec<VisibilityType>,
    leaf_node_frustum_tests: Vec<bool>,
    frustum_test_count: usize,
}

impl Default for VoxelVisibilityChunk {
    fn default() -> Self {
        Self {
            chunk: Chunk::default(),
            node_bboxes: vec![Aabb::default(); TOTAL_NODE_COUNT],
            internal_node_visibility_types: vec![VisibilityType::Outside; INTERNAL_NODE_COUNT],
            leaf_node_frustum_tests: vec![false; LEAF_NODE_COUNT],
            frustum_test_count: 0,
        }
    }
}

impl VoxelVisibilityChunk {
    /// Places the chunk and precomputes every node's world-space bounds. Nodes span the
    /// full chunk height.
    pub fn init(&mut self, position: ChunkInt2, height: i32, ceiling_scale: f64) {
        self.chunk.init(position, height);
        let origin = position.world_origin();
        let top = f64::from(height) * ceiling_scale;
        for level in 0..TREE_LEVEL_COUNT {
            let side = node_side_length(level) as f64;
            for local in 0..NODE_COUNTS[level] {
                let (x, z) = z_order_point(level, local);
                let (x, z) = (x as f64, z as f64);
                let min = origin + Vec3::new(x * side, 0.0, z * side);
                let max = origin + Vec3::new((x + 1.0) * side, top, (z + 1.0) * side);
                self.node_bboxes[GLOBAL_NODE_OFFSETS[level] + local] = Aabb::new(min, max);
            }
        }
        self.internal_node_visibility_types.fill(VisibilityType::Outside);
        self.leaf_node_frustum_tests.fill(false);
        self.frustum_test_count = 0;
    }

    #[inline]
    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    #[inline]
    pub fn position(&self) -> ChunkInt2 {
        self.chunk.position()
    }

    #[inline]
    pub fn node_bbox(&self, level: usize, local: usize) -> &Aabb {
        &self.node_bboxes[global_node_index(level, local)]
    }

    /// Classification of an internal node from the last update.
    pub fn visibility_type(&self, level: usize, local: usize) -> VisibilityType {
        assert!(level < TREE_LEVEL_INDEX_LEAF, "leaf nodes only store a bool");
        self.internal_node_visibility_types[global_node_index(level, local)]
    }

    #[inline]
    pub fn root_visibility(&self) -> VisibilityType {
        self.internal_node_visibility_types[0]
    }

    /// Whether the column at (`x`, `z`) passed the last frustum test.
    #[inline]
    pub fn leaf_node_frustum_test(&self, x: usize, z: usize) -> bool {
        self.leaf_node_frustum_tests[leaf_local_index(x, z)]
    }

    /// Leaf results in Morton order.
    #[inline]
    pub fn leaf_node_frustum_tests(&self) -> &[bool] {
        &self.leaf_node_frustum_tests
    }

    #[inline]
    pub fn any_visible_leaf_nodes(&self) -> bool {
        self.root_visibility() != VisibilityType::Outside
    }

    /// Columns that passed the last test, as (x, z) voxel offsets inside the chunk.
    pub fn visible_leaf_columns(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.leaf_node_frustum_tests
            .iter()
            .enumerate()
            .filter(|&(_, &visible)| visible)
            .map(|(local, _)| z_order_point(TREE_LEVEL_INDEX_LEAF, local))
    }

    /// Box tests run by the last update.
    #[inline]
    pub fn frustum_test_count(&self) -> usize {
        self.frustum_test_count
    }

    /// Walks the tree top-down without recursion. Partially visible internal nodes are
    /// descended into; fully inside or outside ones write their result to every
    /// descendant and are skipped.
    pub fn update(&mut self, camera: &RenderCamera) {
        let mut stack = SubtreeStack::new();
        let mut level = TREE_LEVEL_INDEX_ROOT;
        let mut local = 0usize;
        self.frustum_test_count = 0;

        loop {
            let global = global_node_index(level, local);
            let bbox_vis = camera.bbox_visibility(&self.node_bboxes[global]);
            self.frustum_test_count += 1;

            if level < TREE_LEVEL_INDEX_LEAF {
                let vis = VisibilityType::from_bbox(bbox_vis);
                self.internal_node_visibility_types[global] = vis;
                if vis == VisibilityType::Partial {
                    stack.push(local);
                    local = first_child_local_index(level, local);
                    level += 1;
                    continue;
                }
                self.broadcast(level, local, vis);
            } else {
                self.leaf_node_frustum_tests[local] = !bbox_vis.completely_invisible;
            }

            // Step to the next sibling, climbing while this was the last child.
            loop {
                if level == TREE_LEVEL_INDEX_ROOT {
                    return;
                }
                if local % CHILD_COUNT_PER_NODE != CHILD_COUNT_PER_NODE - 1 {
                    local += 1;
                    break;
                }
                local = stack.pop();
                level -= 1;
            }
        }
    }

    /// Writes `vis` to every descendant of (`level`, `local`).
    fn broadcast(&mut self, level: usize, local: usize, vis: VisibilityType) {
        let mut span = 1usize;
        for child_level in (level + 1)..TREE_LEVEL_COUNT {
            span *= CHILD_COUNT_PER_NODE;
            let start = local * span;
            let end = start + span;
            if child_level < TREE_LEVEL_INDEX_LEAF {
                let offset = GLOBAL_NODE_OFFSETS[child_level];
                self.internal_node_visibility_types[offset + start..offset + end].fill(vis);
            } else {
                self.leaf_node_frustum_tests[start..end].fill(vis != VisibilityType::Outside);
            }
        }
    }

    pub fn clear(&mut self) {
        self.chunk.clear();
        self.internal_node_visibility_types.fill(VisibilityType::Outside);
        self.leaf_node_frustum_tests.fill(false);
        self.frustum_test_count = 0;
    }
}

impl PoolChunk for VoxelVisibilityChunk {
    fn position(&self) -> ChunkInt2 {
        self.chunk.position()
    }

    fn clear(&mut self) {
        VoxelVisibilityChunk::clear(self);
    }
}
