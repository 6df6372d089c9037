use std::fmt::{Display, Error, Formatter};
use serde::{Deserialize, Serialize};
use crate::{
    crypto::{Hash, HASH_SIZE},
    serializer::{Serializer, Writer},
};
use super::{HasBirthRound, NodeId};

/// Reference from a child event to one of its parents.
///
/// `birth_round` is the birth round the child's creator believed the parent
/// had when the child was created. It is a claim, checked by the linker
/// against the parent it actually finds.
///
/// Two descriptors are equal when they name the same hash, whatever they
/// claim about the creator or birth round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventDescriptor {
    hash: Hash,
    creator: NodeId,
    birth_round: u64,
}

impl EventDescriptor {
    pub fn new(hash: Hash, creator: NodeId, birth_round: u64) -> Self {
        Self {
            hash,
            creator,
            birth_round,
        }
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    pub fn creator(&self) -> NodeId {
        self.creator
    }

    pub fn birth_round(&self) -> u64 {
        self.birth_round
    }
}

impl HasBirthRound for EventDescriptor {
    fn birth_round(&self) -> u64 {
        self.birth_round
    }
}

impl PartialEq for EventDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for EventDescriptor {}

impl std::hash::Hash for EventDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl Display for EventDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "EventDescriptor[hash: {}, creator: {}, birth round: {}]",
            self.hash.short_hex(),
            self.creator,
            self.birth_round
        )
    }
}

impl Serializer for EventDescriptor {
    fn write(&self, writer: &mut Writer) {
        self.hash.write(writer);
        self.creator.write(writer);
        writer.write_u64(&self.birth_round);
    }

    fn size(&self) -> usize {
        HASH_SIZE + self.creator.size() + 8
    }
}
