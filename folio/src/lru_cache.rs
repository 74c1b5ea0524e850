// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small least-recently-used cache.

/// Borrowed form of a cache key, so that lookups need not allocate.
pub(crate) trait LookupKey<K> {
    fn matches(&self, key: &K) -> bool;
    fn to_key(self) -> K;
}

struct Slot<K, V> {
    last_used: u64,
    key: K,
    value: V,
}

/// Linear scan cache, meant for a few dozen entries at most.
pub(crate) struct LruCache<K, V> {
    slots: Vec<Slot<K, V>>,
    clock: u64,
    capacity: usize,
}

impl<K, V> LruCache<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            clock: 0,
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// Returns the value for `key`, creating it with `make` on a miss.
    ///
    /// When full, a miss replaces the entry used longest ago.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: impl LookupKey<K>,
        make: impl FnOnce() -> V,
    ) -> &V {
        self.clock += 1;
        let now = self.clock;
        let index = match self.slots.iter().position(|slot| key.matches(&slot.key)) {
            Some(index) => index,
            None => {
                let slot = Slot {
                    last_used: now,
                    key: key.to_key(),
                    value: make(),
                };
                if self.slots.len() < self.capacity {
                    self.slots.push(slot);
                    self.slots.len() - 1
                } else {
                    let oldest = self
                        .slots
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, slot)| slot.last_used)
                        .map_or(0, |(index, _)| index);
                    self.slots[oldest] = slot;
                    oldest
                }
            }
        };
        let slot = &mut self.slots[index];
        slot.last_used = now;
        &slot.value
    }

    /// Returns `true` if an entry for `key` is cached, without touching it.
    #[cfg(test)]
    pub(crate) fn contains(&self, key: impl LookupKey<K>) -> bool {
        self.slots.iter().any(|slot| key.matches(&slot.key))
    }
}
