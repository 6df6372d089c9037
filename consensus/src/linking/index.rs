use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use hashgraph_common::crypto::Hash;
use super::LinkedEvent;

/// Non-ancient linked events, searchable by hash.
///
/// Events are also bucketed by birth round so that advancing the ancient
/// threshold only touches the rounds that just became ancient.
pub(crate) struct ParentIndex {
    by_hash: HashMap<Hash, Arc<LinkedEvent>>,
    by_round: BTreeMap<u64, Vec<Hash>>,
}

impl ParentIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_hash: HashMap::with_capacity(capacity),
            by_round: BTreeMap::new(),
        }
    }

    /// Insert an event, replacing any event with the same hash.
    pub fn insert(&mut self, event: Arc<LinkedEvent>) -> Option<Arc<LinkedEvent>> {
        let hash = event.hash().clone();
        let birth_round = event.birth_round();
        let previous = self.by_hash.insert(hash.clone(), event);
        // Same hash means same birth round, the bucket already has it
        if previous.is_none() {
            self.by_round.entry(birth_round).or_default().push(hash);
        }
        previous
    }

    pub fn get(&self, hash: &Hash) -> Option<&Arc<LinkedEvent>> {
        self.by_hash.get(hash)
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.by_hash.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }

    /// Lowest birth round still indexed.
    pub fn min_birth_round(&self) -> Option<u64> {
        self.by_round.keys().next().copied()
    }

    /// Remove every event born at or below `threshold`.
    /// Returns them in ascending birth round order.
    pub fn prune(&mut self, threshold: u64) -> Vec<Arc<LinkedEvent>> {
        let ancient_rounds = match threshold.checked_add(1) {
            Some(first_kept) => {
                let kept = self.by_round.split_off(&first_kept);
                std::mem::replace(&mut self.by_round, kept)
            }
            None => std::mem::take(&mut self.by_round),
        };

        let mut pruned = Vec::with_capacity(ancient_rounds.values().map(Vec::len).sum());
        for hash in ancient_rounds.into_values().flatten() {
            if let Some(event) = self.by_hash.remove(&hash) {
                pruned.push(event);
            }
        }
        pruned
    }

    pub fn clear(&mut self) {
        self.by_hash.clear();
        self.by_round.clear();
    }
}
