use std::fmt::{Display, Error, Formatter};
use serde::Serialize;
use crate::{
    crypto::{Hash, Hashable},
    serializer::{Serializer, Writer},
    time::TimestampMillis,
};
use super::{EventDescriptor, HasBirthRound, NodeId};

// Every field of an event that takes part in its hash
#[derive(Clone, Debug, Serialize)]
struct EventCore {
    creator: NodeId,
    birth_round: u64,
    time_created: TimestampMillis,
    self_parent: Option<EventDescriptor>,
    other_parent: Option<EventDescriptor>,
    #[serde(with = "hex::serde")]
    payload: Vec<u8>,
}

impl Serializer for EventCore {
    fn write(&self, writer: &mut Writer) {
        self.creator.write(writer);
        writer.write_u64(&self.birth_round);
        writer.write_u64(&self.time_created);
        self.self_parent.write(writer);
        self.other_parent.write(writer);
        writer.write_blob(&self.payload);
    }

    fn size(&self) -> usize {
        self.creator.size()
            + 8
            + 8
            + self.self_parent.size()
            + self.other_parent.size()
            + 8
            + self.payload.len()
    }
}

impl Hashable for EventCore {}

/// An event as gossiped between nodes or produced by the local event creator.
///
/// The hash is computed once at construction over every other field, so a
/// `PlatformEvent` is immutable for its whole lifetime.
#[derive(Clone, Debug, Serialize)]
pub struct PlatformEvent {
    #[serde(flatten)]
    core: EventCore,
    hash: Hash,
}

impl PlatformEvent {
    pub fn new(
        creator: NodeId,
        birth_round: u64,
        time_created: TimestampMillis,
        self_parent: Option<EventDescriptor>,
        other_parent: Option<EventDescriptor>,
        payload: Vec<u8>,
    ) -> Self {
        let core = EventCore {
            creator,
            birth_round,
            time_created,
            self_parent,
            other_parent,
            payload,
        };
        let hash = Hashable::hash(&core);
        Self { core, hash }
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    pub fn creator(&self) -> NodeId {
        self.core.creator
    }

    pub fn birth_round(&self) -> u64 {
        self.core.birth_round
    }

    pub fn time_created(&self) -> TimestampMillis {
        self.core.time_created
    }

    pub fn self_parent(&self) -> Option<&EventDescriptor> {
        self.core.self_parent.as_ref()
    }

    pub fn other_parent(&self) -> Option<&EventDescriptor> {
        self.core.other_parent.as_ref()
    }

    pub fn payload(&self) -> &[u8] {
        &self.core.payload
    }

    // Descriptor a child uses to reference this event
    pub fn descriptor(&self) -> EventDescriptor {
        EventDescriptor::new(self.hash.clone(), self.core.creator, self.core.birth_round)
    }

    pub fn is_genesis(&self) -> bool {
        self.core.self_parent.is_none() && self.core.other_parent.is_none()
    }
}

impl HasBirthRound for PlatformEvent {
    fn birth_round(&self) -> u64 {
        self.core.birth_round
    }
}

impl Display for PlatformEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "Event[hash: {}, creator: {}, birth round: {}, created: {}]",
            self.hash.short_hex(),
            self.core.creator,
            self.core.birth_round,
            self.core.time_created
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genesis(creator: u64, payload: &[u8]) -> PlatformEvent {
        PlatformEvent::new(NodeId::new(creator), 1, 1_000, None, None, payload.to_vec())
    }

    #[test]
    fn test_hash_covers_every_field() {
        let base = genesis(0, b"a");
        assert_eq!(base.hash(), genesis(0, b"a").hash());

        assert_ne!(base.hash(), genesis(1, b"a").hash());
        assert_ne!(base.hash(), genesis(0, b"b").hash());

        let later = PlatformEvent::new(NodeId::new(0), 1, 1_001, None, None, b"a".to_vec());
        assert_ne!(base.hash(), later.hash());

        let other_round = PlatformEvent::new(NodeId::new(0), 2, 1_000, None, None, b"a".to_vec());
        assert_ne!(base.hash(), other_round.hash());
    }

    #[test]
    fn test_parent_claim_changes_hash() {
        let parent = genesis(0, b"p");
        let honest = PlatformEvent::new(NodeId::new(0), 1, 2_000, Some(parent.descriptor()), None, vec![]);
        let lying = PlatformEvent::new(
            NodeId::new(0),
            1,
            2_000,
            Some(EventDescriptor::new(parent.hash().clone(), NodeId::new(0), 7)),
            None,
            vec![],
        );
        assert_ne!(honest.hash(), lying.hash());
    }

    #[test]
    fn test_size_matches_hashed_bytes() {
        let parent = genesis(0, b"p");
        let event = PlatformEvent::new(NodeId::new(1), 2, 2_000, Some(parent.descriptor()), None, vec![9; 300]);
        assert_eq!(event.core.to_bytes().len(), event.core.size());
    }

    #[test]
    fn test_descriptor_matches_event() {
        let event = genesis(3, b"x");
        let descriptor = event.descriptor();
        assert_eq!(descriptor.hash(), event.hash());
        assert_eq!(descriptor.creator(), NodeId::new(3));
        assert_eq!(descriptor.birth_round(), 1);
        assert!(event.is_genesis());
    }
}
