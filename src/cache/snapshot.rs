use time::OffsetDateTime;

/// Immutable copy of a collection and its lookup table, captured by one load.
///
/// Snapshots are shared behind `Arc` and never mutated after construction; a
/// refresh builds a new snapshot and swaps it into the cache slot.
#[derive(Debug)]
pub struct CachedSnapshot<T, A> {
    items: Vec<T>,
    auxiliary: Vec<A>,
    loaded_at: OffsetDateTime,
    generation: u64,
}

impl<T, A> CachedSnapshot<T, A> {
    pub fn new(items: Vec<T>, auxiliary: Vec<A>, loaded_at: OffsetDateTime, generation: u64) -> Self {
        Self {
            items,
            auxiliary,
            loaded_at,
            generation,
        }
    }

    /// Records in ascending primary-key order, as returned by the store.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn auxiliary(&self) -> &[A] {
        &self.auxiliary
    }

    pub fn loaded_at(&self) -> OffsetDateTime {
        self.loaded_at
    }

    /// Sequence number of the load that produced this snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
