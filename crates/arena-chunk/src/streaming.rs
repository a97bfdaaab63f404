use hashbrown::HashSet;

use crate::coords::ChunkInt2;

/// Chunks that entered and left the active area in one update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkDelta {
    pub new_positions: Vec<ChunkInt2>,
    pub freed_positions: Vec<ChunkInt2>,
}

impl ChunkDelta {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.new_positions.is_empty() && self.freed_positions.is_empty()
    }
}

/// The square of active chunk positions around a center chunk.
#[derive(Debug, Default)]
pub struct ChunkSet {
    active: HashSet<ChunkInt2>,
    center: Option<ChunkInt2>,
    distance: i32,
}

impl ChunkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the active area to `center` with radius `distance` and reports the positions
    /// that were added and removed. New positions come nearest-first.
    pub fn update(&mut self, center: ChunkInt2, distance: i32) -> ChunkDelta {
        debug_assert!(distance >= 0);
        if self.center == Some(center) && self.distance == distance {
            return ChunkDelta::default();
        }

        let mut wanted = HashSet::with_capacity(((2 * distance + 1) * (2 * distance + 1)) as usize);
        for z in -distance..=distance {
            for x in -distance..=distance {
                wanted.insert(center.offset(x, z));
            }
        }

        let mut freed: Vec<ChunkInt2> = self.active.difference(&wanted).copied().collect();
        let mut new: Vec<ChunkInt2> = wanted.difference(&self.active).copied().collect();
        new.sort_by_key(|p| (p.distance(center), *p));
        freed.sort();

        if !new.is_empty() || !freed.is_empty() {
            log::debug!(
                target: "events",
                "chunk_set_update center=({}, {}) distance={} new={} freed={}",
                center.x,
                center.z,
                distance,
                new.len(),
                freed.len()
            );
        }

        self.active = wanted;
        self.center = Some(center);
        self.distance = distance;
        ChunkDelta {
            new_positions: new,
            freed_positions: freed,
        }
    }

    #[inline]
    pub fn center(&self) -> Option<ChunkInt2> {
        self.center
    }

    #[inline]
    pub fn contains(&self, position: ChunkInt2) -> bool {
        self.active.contains(&position)
    }

    pub fn positions(&self) -> impl Iterator<Item = ChunkInt2> + '_ {
        self.active.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Frees every chunk.
    pub fn clear(&mut self) -> ChunkDelta {
        let mut freed: Vec<ChunkInt2> = self.active.drain().collect();
        freed.sort();
        self.center = None;
        self.distance = 0;
        ChunkDelta {
            new_positions: Vec::new(),
            freed_positions: freed,
        }
    }
}
