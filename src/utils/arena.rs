//! Flat, append-only storage addressed by index

pub type ArenaIndex = usize;

/// Append-only backing store whose elements refer to each other by [ArenaIndex].
#[derive(Debug)]
pub struct Arena<T> {
    store: Vec<T>,
}

impl<T> Arena<T> {
    /// Creates a new Arena with space for `capacity` amount of elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
        }
    }

    /// Adds the item to the arena, returning its index.
    pub fn add(&mut self, item: T) -> ArenaIndex {
        let index = self.store.len();
        self.store.push(item);
        index
    }

    /// Number of items stored so far
    pub fn len(&self) -> usize {
        self.store.len()
    }
}

impl<T> std::ops::Index<ArenaIndex> for Arena<T> {
    type Output = T;

    fn index(&self, index: ArenaIndex) -> &Self::Output {
        &self.store[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_sequential() {
        let mut arena = Arena::with_capacity(2);
        assert_eq!(arena.len(), 0);
        let a = arena.add("a");
        let b = arena.add("b");
        assert_eq!((a, b), (0, 1));
        assert_eq!(arena[b], "b");
        assert_eq!(arena.len(), 2);
    }
}
