use crate::tree::TREE_LEVEL_COUNT;

/// Parent nodes of the current position during traversal. The leaf level never pushes,
/// so one slot per internal level is enough.
#[derive(Clone, Copy, Debug)]
pub struct SubtreeStack {
    entries: [usize; SubtreeStack::CAPACITY],
    len: usize,
}

impl Default for SubtreeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtreeStack {
    pub const CAPACITY: usize = TREE_LEVEL_COUNT - 1;

    pub const fn new() -> Self {
        Self {
            entries: [0; Self::CAPACITY],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, local: usize) {
        assert!(self.len < Self::CAPACITY, "subtree stack overflow");
        self.entries[self.len] = local;
        self.len += 1;
    }

    #[inline]
    pub fn pop(&mut self) -> usize {
        assert!(self.len > 0, "subtree stack underflow");
        self.len -= 1;
        self.entries[self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
