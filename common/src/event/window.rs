use std::fmt::{Display, Error, Formatter};
use serde::{Deserialize, Serialize};
use crate::config::ROUND_UNDEFINED;
use super::HasBirthRound;

/// Which events are still relevant to consensus.
///
/// Produced by the round computation stage each time a round is decided.
/// Anything born at or below `ancient_threshold` is ancient: it can no longer
/// influence consensus and may be dropped by every stage that holds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWindow {
    latest_consensus_round: u64,
    ancient_threshold: u64,
}

impl EventWindow {
    pub const fn new(latest_consensus_round: u64, ancient_threshold: u64) -> Self {
        Self {
            latest_consensus_round,
            ancient_threshold,
        }
    }

    /// Window of a node that has not decided any round yet, nothing is ancient.
    pub const fn genesis() -> Self {
        Self::new(ROUND_UNDEFINED, ROUND_UNDEFINED)
    }

    /// Window with the given ancient threshold, for callers that only care
    /// about ancientness.
    pub const fn with_ancient_threshold(ancient_threshold: u64) -> Self {
        Self::new(ancient_threshold, ancient_threshold)
    }

    pub fn latest_consensus_round(&self) -> u64 {
        self.latest_consensus_round
    }

    pub fn ancient_threshold(&self) -> u64 {
        self.ancient_threshold
    }

    pub fn is_genesis(&self) -> bool {
        self.latest_consensus_round == ROUND_UNDEFINED
    }

    #[inline]
    pub fn is_ancient_round(&self, birth_round: u64) -> bool {
        birth_round <= self.ancient_threshold
    }

    #[inline]
    pub fn is_ancient<T: HasBirthRound + ?Sized>(&self, value: &T) -> bool {
        self.is_ancient_round(value.birth_round())
    }
}

impl Default for EventWindow {
    fn default() -> Self {
        Self::genesis()
    }
}

impl Display for EventWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "EventWindow[latest consensus round: {}, ancient threshold: {}]",
            self.latest_consensus_round, self.ancient_threshold
        )
    }
}
