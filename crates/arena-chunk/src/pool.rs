use hashbrown::HashMap;

use crate::coords::ChunkInt2;

/// Anything stored per active chunk and recycled when the chunk leaves range.
pub trait PoolChunk: Default {
    fn position(&self) -> ChunkInt2;
    fn clear(&mut self);
}

/// Active chunks in a dense vector with a position index, plus cleared chunks kept for
/// reuse so their allocations survive streaming.
#[derive(Debug)]
pub struct ChunkPool<T> {
    active: Vec<T>,
    pool: Vec<T>,
    index: HashMap<ChunkInt2, usize>,
}

impl<T> Default for ChunkPool<T> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            pool: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: PoolChunk> ChunkPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cleared chunk to populate, reused from the pool when possible.
    pub fn take_recycled(&mut self) -> T {
        self.pool.pop().unwrap_or_default()
    }

    /// Makes a populated chunk active. Its position must not already be active.
    pub fn insert(&mut self, chunk: T) -> usize {
        let position = chunk.position();
        debug_assert!(!self.index.contains_key(&position), "chunk {position:?} already active");
        let i = self.active.len();
        self.active.push(chunk);
        self.index.insert(position, i);
        i
    }

    /// Takes a recycled chunk, lets `init` populate it for `position` and activates it.
    pub fn spawn(&mut self, position: ChunkInt2, init: impl FnOnce(&mut T)) -> usize {
        let mut chunk = self.take_recycled();
        init(&mut chunk);
        debug_assert_eq!(chunk.position(), position, "init must place the chunk");
        self.insert(chunk)
    }

    /// Clears the chunk at `position` and returns it to the pool. Indices of other chunks
    /// may change.
    pub fn recycle(&mut self, position: ChunkInt2) -> bool {
        let Some(i) = self.index.remove(&position) else {
            return false;
        };
        let mut chunk = self.active.swap_remove(i);
        if let Some(moved) = self.active.get(i) {
            self.index.insert(moved.position(), i);
        }
        chunk.clear();
        self.pool.push(chunk);
        true
    }

    /// Recycles every active chunk.
    pub fn recycle_all(&mut self) {
        self.index.clear();
        for mut chunk in self.active.drain(..) {
            chunk.clear();
            self.pool.push(chunk);
        }
    }

    /// Drops pooled chunks, e.g. after the streaming distance shrank.
    pub fn trim_pool(&mut self) {
        self.pool.clear();
    }

    #[inline]
    pub fn index_of(&self, position: ChunkInt2) -> Option<usize> {
        self.index.get(&position).copied()
    }

    #[inline]
    pub fn get(&self, position: ChunkInt2) -> Option<&T> {
        self.index_of(position).map(|i| &self.active[i])
    }

    #[inline]
    pub fn get_mut(&mut self, position: ChunkInt2) -> Option<&mut T> {
        self.index_of(position).map(|i| &mut self.active[i])
    }

    #[inline]
    pub fn at(&self, index: usize) -> &T {
        &self.active[index]
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        &mut self.active[index]
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.active
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.active
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.active.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.active.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[inline]
    pub fn pooled_len(&self) -> usize {
        self.pool.len()
    }
}
