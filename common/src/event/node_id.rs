use std::fmt::{Display, Error, Formatter};
use serde::{Deserialize, Serialize};
use crate::serializer::{Serializer, Writer};

/// Identifier of a node taking part in consensus, as assigned by the roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl Serializer for NodeId {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(&self.0);
    }

    fn size(&self) -> usize {
        8
    }
}
