use crate::draw_call::RenderDrawCall;

/// Doors draw up to two faces, chasms two calls, other shapes one per index buffer.
pub const MAX_DRAW_CALLS_PER_VOXEL: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderVoxelDrawCallRangeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DrawCallRange {
    index: usize,
    count: usize,
}

/// Per-chunk storage of voxel draw calls. Each voxel owns one contiguous range addressed
/// by a range id; freed ranges and ids are reused first-fit.
#[derive(Debug, Default)]
pub struct RenderVoxelDrawCallHeap {
    draw_calls: Vec<RenderDrawCall>,
    // Sorted by index, never adjacent to each other.
    free_blocks: Vec<DrawCallRange>,
    ranges: Vec<Option<DrawCallRange>>,
    freed_ids: Vec<u32>,
}

impl RenderVoxelDrawCallHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, count: usize) -> RenderVoxelDrawCallRangeId {
        assert!(
            (1..=MAX_DRAW_CALLS_PER_VOXEL).contains(&count),
            "invalid draw call count {count}"
        );

        let index = match self.free_blocks.iter().position(|b| b.count >= count) {
            Some(i) => {
                let block = &mut self.free_blocks[i];
                let index = block.index;
                block.index += count;
                block.count -= count;
                if block.count == 0 {
                    self.free_blocks.remove(i);
                }
                index
            }
            None => {
                let index = self.draw_calls.len();
                self.draw_calls.resize(index + count, RenderDrawCall::default());
                index
            }
        };

        let range = Some(DrawCallRange { index, count });
        match self.freed_ids.pop() {
            Some(id) => {
                self.ranges[id as usize] = range;
                RenderVoxelDrawCallRangeId(id)
            }
            None => {
                self.ranges.push(range);
                RenderVoxelDrawCallRangeId((self.ranges.len() - 1) as u32)
            }
        }
    }

    fn range(&self, id: RenderVoxelDrawCallRangeId) -> DrawCallRange {
        match self.ranges.get(id.0 as usize).copied().flatten() {
            Some(range) => range,
            None => panic!("draw call range {} is not allocated", id.0),
        }
    }

    pub fn get(&self, id: RenderVoxelDrawCallRangeId) -> &[RenderDrawCall] {
        let r = self.range(id);
        &self.draw_calls[r.index..r.index + r.count]
    }

    pub fn get_mut(&mut self, id: RenderVoxelDrawCallRangeId) -> &mut [RenderDrawCall] {
        let r = self.range(id);
        &mut self.draw_calls[r.index..r.index + r.count]
    }

    pub fn free(&mut self, id: RenderVoxelDrawCallRangeId) {
        let freed = self.range(id);
        self.ranges[id.0 as usize] = None;
        self.freed_ids.push(id.0);

        let at = self.free_blocks.partition_point(|b| b.index < freed.index);
        self.free_blocks.insert(at, freed);

        // Merge with the following block, then with the preceding one.
        if at + 1 < self.free_blocks.len() {
            let next = self.free_blocks[at + 1];
            if freed.index + freed.count == next.index {
                self.free_blocks[at].count += next.count;
                self.free_blocks.remove(at + 1);
            }
        }
        if at > 0 {
            let prev = self.free_blocks[at - 1];
            if prev.index + prev.count == self.free_blocks[at].index {
                self.free_blocks[at - 1].count += self.free_blocks[at].count;
                self.free_blocks.remove(at);
            }
        }

        // Give a trailing free block back to the vector.
        if let Some(last) = self.free_blocks.last().copied() {
            if last.index + last.count == self.draw_calls.len() {
                self.draw_calls.truncate(last.index);
                self.free_blocks.pop();
            }
        }
    }

    /// Draw calls currently owned by live ranges.
    pub fn live_draw_call_count(&self) -> usize {
        self.ranges.iter().flatten().map(|r| r.count).sum()
    }

    pub fn live_range_count(&self) -> usize {
        self.ranges.iter().flatten().count()
    }

    /// Slots in the backing vector, live or free.
    pub fn capacity_used(&self) -> usize {
        self.draw_calls.len()
    }

    pub fn clear(&mut self) {
        self.draw_calls.clear();
        self.free_blocks.clear();
        self.ranges.clear();
        self.freed_ids.clear();
    }
}
