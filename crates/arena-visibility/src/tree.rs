//! Fixed shape of the visibility quadtree.
//!
//! Nodes are stored level by level. Inside a level they are in Morton (Z) order, so the
//! children of local node `i` are the four consecutive nodes `4i..4i + 4` one level down
//! and every subtree covers a contiguous range at each deeper level.

use arena_chunk::Chunk;

pub const TREE_LEVEL_COUNT: usize = 7;
pub const TREE_LEVEL_INDEX_ROOT: usize = 0;
pub const TREE_LEVEL_INDEX_LEAF: usize = TREE_LEVEL_COUNT - 1;
pub const CHILD_COUNT_PER_NODE: usize = 4;

/// Nodes in each level.
pub const NODE_COUNTS: [usize; TREE_LEVEL_COUNT] = node_counts();
/// Nodes along one side of the chunk in each level.
pub const NODES_PER_SIDE: [usize; TREE_LEVEL_COUNT] = nodes_per_side();
/// Index of each level's first node in the flat node array.
pub const GLOBAL_NODE_OFFSETS: [usize; TREE_LEVEL_COUNT] = global_node_offsets();

pub const TOTAL_NODE_COUNT: usize = GLOBAL_NODE_OFFSETS[TREE_LEVEL_INDEX_LEAF] + LEAF_NODE_COUNT;
pub const INTERNAL_NODE_COUNT: usize = GLOBAL_NODE_OFFSETS[TREE_LEVEL_INDEX_LEAF];
pub const LEAF_NODE_COUNT: usize = NODE_COUNTS[TREE_LEVEL_INDEX_LEAF];

/// (x, z) cell of every node in its own level's grid, indexed by global node index.
pub static Z_ORDER_POINTS: [(u16, u16); TOTAL_NODE_COUNT] = z_order_points();

const _: () = assert!(NODES_PER_SIDE[TREE_LEVEL_INDEX_LEAF] == Chunk::WIDTH as usize);
const _: () = assert!(NODES_PER_SIDE[TREE_LEVEL_INDEX_LEAF] == Chunk::DEPTH as usize);
const _: () = assert!(TOTAL_NODE_COUNT == 5461);

const fn node_counts() -> [usize; TREE_LEVEL_COUNT] {
    let mut out = [0; TREE_LEVEL_COUNT];
    let mut level = 0;
    while level < TREE_LEVEL_COUNT {
        out[level] = 1 << (2 * level);
        level += 1;
    }
    out
}

const fn nodes_per_side() -> [usize; TREE_LEVEL_COUNT] {
    let mut out = [0; TREE_LEVEL_COUNT];
    let mut level = 0;
    while level < TREE_LEVEL_COUNT {
        out[level] = 1 << level;
        level += 1;
    }
    out
}

const fn global_node_offsets() -> [usize; TREE_LEVEL_COUNT] {
    let counts = node_counts();
    let mut out = [0; TREE_LEVEL_COUNT];
    let mut level = 1;
    while level < TREE_LEVEL_COUNT {
        out[level] = out[level - 1] + counts[level - 1];
        level += 1;
    }
    out
}

const fn z_order_points() -> [(u16, u16); TOTAL_NODE_COUNT] {
    let mut out = [(0, 0); TOTAL_NODE_COUNT];
    let mut level = 0;
    while level < TREE_LEVEL_COUNT {
        let offset = GLOBAL_NODE_OFFSETS[level];
        let mut local = 0;
        while local < NODE_COUNTS[level] {
            let (x, z) = morton_decode(local as u32);
            out[offset + local] = (x as u16, z as u16);
            local += 1;
        }
        level += 1;
    }
    out
}

const fn spread_bits(v: u32) -> u32 {
    let mut v = v & 0x0000_ffff;
    v = (v | (v << 8)) & 0x00ff_00ff;
    v = (v | (v << 4)) & 0x0f0f_0f0f;
    v = (v | (v << 2)) & 0x3333_3333;
    (v | (v << 1)) & 0x5555_5555
}

const fn compact_bits(v: u32) -> u32 {
    let mut v = v & 0x5555_5555;
    v = (v | (v >> 1)) & 0x3333_3333;
    v = (v | (v >> 2)) & 0x0f0f_0f0f;
    v = (v | (v >> 4)) & 0x00ff_00ff;
    (v | (v >> 8)) & 0x0000_ffff
}

/// Interleaves `x` into the even bits and `z` into the odd bits.
#[inline]
pub const fn morton_encode(x: u32, z: u32) -> u32 {
    spread_bits(x) | (spread_bits(z) << 1)
}

#[inline]
pub const fn morton_decode(index: u32) -> (u32, u32) {
    (compact_bits(index), compact_bits(index >> 1))
}

#[inline]
pub fn global_node_index(level: usize, local: usize) -> usize {
    assert!(level < TREE_LEVEL_COUNT, "tree level {level} out of range");
    assert!(local < NODE_COUNTS[level], "node {local} out of range for level {level}");
    GLOBAL_NODE_OFFSETS[level] + local
}

/// Local index of the first child; the other three follow it.
#[inline]
pub fn first_child_local_index(level: usize, local: usize) -> usize {
    assert!(level < TREE_LEVEL_INDEX_LEAF, "leaf nodes have no children");
    local * CHILD_COUNT_PER_NODE
}

#[inline]
pub fn z_order_point(level: usize, local: usize) -> (usize, usize) {
    let (x, z) = Z_ORDER_POINTS[global_node_index(level, local)];
    (x as usize, z as usize)
}

/// Local leaf index of the voxel column at (`x`, `z`).
#[inline]
pub fn leaf_local_index(x: usize, z: usize) -> usize {
    assert!(x < Chunk::WIDTH as usize && z < Chunk::DEPTH as usize, "column ({x}, {z}) out of chunk");
    morton_encode(x as u32, z as u32) as usize
}

/// Voxels covered by one side of a node in `level`.
#[inline]
pub fn node_side_length(level: usize) -> usize {
    Chunk::WIDTH as usize / NODES_PER_SIDE[level]
}
