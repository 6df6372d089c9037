//! Fixtures for building event graphs in tests.

use std::collections::BTreeMap;
use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::{config::ROUND_FIRST, time::TimestampMillis};
use super::{EventDescriptor, NodeId, PlatformEvent};

// Parent as seen by the child under construction
#[derive(Clone)]
struct ParentRef {
    descriptor: EventDescriptor,
    time_created: TimestampMillis,
}

impl ParentRef {
    fn from_event(event: &PlatformEvent) -> Self {
        Self {
            descriptor: event.descriptor(),
            time_created: event.time_created(),
        }
    }
}

/// Builds a single [`PlatformEvent`] with explicit values.
///
/// Unset values get sensible defaults:
/// - birth round: the highest parent birth round, or `ROUND_FIRST`
/// - time created: one millisecond after the latest parent, or 0
/// - payload: 16 random bytes, so that two built events never share a hash
#[derive(Clone, Default)]
pub struct TestingEventBuilder {
    creator: NodeId,
    birth_round: Option<u64>,
    time_created: Option<TimestampMillis>,
    self_parent: Option<ParentRef>,
    other_parent: Option<ParentRef>,
    self_parent_birth_round_override: Option<u64>,
    other_parent_birth_round_override: Option<u64>,
    payload: Option<Vec<u8>>,
}

impl TestingEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_creator(mut self, creator: NodeId) -> Self {
        self.creator = creator;
        self
    }

    pub fn set_birth_round(mut self, birth_round: u64) -> Self {
        self.birth_round = Some(birth_round);
        self
    }

    pub fn set_time_created(mut self, time_created: TimestampMillis) -> Self {
        self.time_created = Some(time_created);
        self
    }

    pub fn set_self_parent(mut self, parent: &PlatformEvent) -> Self {
        self.self_parent = Some(ParentRef::from_event(parent));
        self
    }

    pub fn set_other_parent(mut self, parent: &PlatformEvent) -> Self {
        self.other_parent = Some(ParentRef::from_event(parent));
        self
    }

    /// Make the child claim a birth round for its self parent that differs
    /// from the parent's real one.
    pub fn override_self_parent_birth_round(mut self, birth_round: u64) -> Self {
        self.self_parent_birth_round_override = Some(birth_round);
        self
    }

    /// Make the child claim a birth round for its other parent that differs
    /// from the parent's real one.
    pub fn override_other_parent_birth_round(mut self, birth_round: u64) -> Self {
        self.other_parent_birth_round_override = Some(birth_round);
        self
    }

    pub fn set_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn build(self) -> PlatformEvent {
        let parents = [self.self_parent.as_ref(), self.other_parent.as_ref()];

        let birth_round = self.birth_round.unwrap_or_else(|| {
            parents
                .iter()
                .flatten()
                .map(|p| p.descriptor.birth_round())
                .max()
                .unwrap_or(ROUND_FIRST)
        });

        let time_created = self.time_created.unwrap_or_else(|| {
            parents
                .iter()
                .flatten()
                .map(|p| p.time_created + 1)
                .max()
                .unwrap_or(0)
        });

        let self_parent = Self::claimed(self.self_parent, self.self_parent_birth_round_override);
        let other_parent = Self::claimed(self.other_parent, self.other_parent_birth_round_override);

        let payload = self
            .payload
            .unwrap_or_else(|| rand::random::<[u8; 16]>().to_vec());

        PlatformEvent::new(
            self.creator,
            birth_round,
            time_created,
            self_parent,
            other_parent,
            payload,
        )
    }

    fn claimed(parent: Option<ParentRef>, birth_round: Option<u64>) -> Option<EventDescriptor> {
        parent.map(|p| match birth_round {
            Some(round) => EventDescriptor::new(p.descriptor.hash().clone(), p.descriptor.creator(), round),
            None => p.descriptor,
        })
    }
}

/// Generates an honest random event graph across several creators.
///
/// Each event picks a random creator, uses that creator's latest event as
/// self parent and another creator's latest event as other parent. Birth
/// rounds never decrease along parent links and creation times strictly
/// increase along self parent links.
pub struct GraphGenerator {
    rng: StdRng,
    creators: Vec<NodeId>,
    latest: BTreeMap<NodeId, PlatformEvent>,
    current_round: u64,
    clock: TimestampMillis,
    round_advance_probability: f64,
}

impl GraphGenerator {
    pub fn new(seed: u64, creator_count: u64) -> Self {
        assert!(creator_count >= 2, "a graph needs at least two creators");
        Self {
            rng: StdRng::seed_from_u64(seed),
            creators: (0..creator_count).map(NodeId::new).collect(),
            latest: BTreeMap::new(),
            current_round: ROUND_FIRST,
            clock: 1_000,
            round_advance_probability: 0.05,
        }
    }

    /// Probability that the network birth round advances before an event.
    pub fn with_round_advance_probability(mut self, probability: f64) -> Self {
        self.round_advance_probability = probability;
        self
    }

    pub fn current_round(&self) -> u64 {
        self.current_round
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn generate_event(&mut self) -> PlatformEvent {
        if self.rng.gen_bool(self.round_advance_probability) {
            self.current_round += 1;
        }
        self.clock += self.rng.gen_range(1..=10);

        let creator = self.creators[self.rng.gen_range(0..self.creators.len())];
        let other_creator = loop {
            let candidate = self.creators[self.rng.gen_range(0..self.creators.len())];
            if candidate != creator {
                break candidate;
            }
        };

        let self_parent = self.latest.get(&creator).cloned();
        let other_parent = self.latest.get(&other_creator).cloned();

        let birth_round = [self_parent.as_ref(), other_parent.as_ref()]
            .iter()
            .flatten()
            .map(|p| p.birth_round())
            .fold(self.current_round, u64::max);

        let payload: [u8; 16] = self.rng.gen();
        let event = PlatformEvent::new(
            creator,
            birth_round,
            self.clock,
            self_parent.map(|p| p.descriptor()),
            other_parent.map(|p| p.descriptor()),
            payload.to_vec(),
        );

        self.latest.insert(creator, event.clone());
        event
    }
}
