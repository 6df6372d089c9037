use std::{
    fmt::{self, Debug, Display, Formatter},
    sync::Arc,
};
use hashgraph_common::{
    crypto::Hash,
    event::{HasBirthRound, NodeId, PlatformEvent},
    time::TimestampMillis,
};

/// A [`PlatformEvent`] together with the parents the linker resolved for it.
///
/// Parent links only ever point to older events, so a graph of linked events
/// has no cycles and plain reference counting reclaims it. Links are fixed
/// when the event is linked and never change afterwards: an absent parent
/// stays absent, a present parent stays reachable for as long as this event
/// is alive, even after the linker forgets about it.
pub struct LinkedEvent {
    base_event: Arc<PlatformEvent>,
    self_parent: Option<Arc<LinkedEvent>>,
    other_parent: Option<Arc<LinkedEvent>>,
}

impl LinkedEvent {
    pub(crate) fn new(
        base_event: Arc<PlatformEvent>,
        self_parent: Option<Arc<LinkedEvent>>,
        other_parent: Option<Arc<LinkedEvent>>,
    ) -> Self {
        Self {
            base_event,
            self_parent,
            other_parent,
        }
    }

    pub fn base_event(&self) -> &Arc<PlatformEvent> {
        &self.base_event
    }

    pub fn self_parent(&self) -> Option<&Arc<LinkedEvent>> {
        self.self_parent.as_ref()
    }

    pub fn other_parent(&self) -> Option<&Arc<LinkedEvent>> {
        self.other_parent.as_ref()
    }

    pub fn hash(&self) -> &Hash {
        self.base_event.hash()
    }

    pub fn creator(&self) -> NodeId {
        self.base_event.creator()
    }

    pub fn birth_round(&self) -> u64 {
        self.base_event.birth_round()
    }

    pub fn time_created(&self) -> TimestampMillis {
        self.base_event.time_created()
    }
}

impl HasBirthRound for LinkedEvent {
    fn birth_round(&self) -> u64 {
        self.base_event.birth_round()
    }
}

// Dropping the last handle on a long ancestry must not recurse once per
// generation, so parents that die with this event are unlinked in a loop.
impl Drop for LinkedEvent {
    fn drop(&mut self) {
        let mut pending: Vec<Arc<LinkedEvent>> = Vec::new();
        pending.extend(self.self_parent.take());
        pending.extend(self.other_parent.take());

        while let Some(parent) = pending.pop() {
            if let Ok(mut parent) = Arc::try_unwrap(parent) {
                pending.extend(parent.self_parent.take());
                pending.extend(parent.other_parent.take());
            }
        }
    }
}

impl Debug for LinkedEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedEvent")
            .field("base_event", &self.base_event)
            .field("self_parent", &self.self_parent.as_ref().map(|p| p.hash().short_hex()))
            .field("other_parent", &self.other_parent.as_ref().map(|p| p.hash().short_hex()))
            .finish()
    }
}

impl Display for LinkedEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Linked{}", self.base_event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashgraph_common::event::testing::TestingEventBuilder;

    fn linked(event: PlatformEvent, self_parent: Option<&Arc<LinkedEvent>>) -> Arc<LinkedEvent> {
        Arc::new(LinkedEvent::new(Arc::new(event), self_parent.cloned(), None))
    }

    #[test]
    fn test_accessors_follow_base_event() {
        let event = TestingEventBuilder::new()
            .set_creator(NodeId::new(2))
            .set_birth_round(5)
            .set_time_created(77)
            .build();
        let linked = linked(event.clone(), None);

        assert_eq!(linked.hash(), event.hash());
        assert_eq!(linked.creator(), NodeId::new(2));
        assert_eq!(linked.birth_round(), 5);
        assert_eq!(linked.time_created(), 77);
        assert!(linked.self_parent().is_none());
        assert!(linked.other_parent().is_none());
    }

    #[test]
    fn test_parent_outlives_other_handles() {
        let parent_event = TestingEventBuilder::new().build();
        let parent = linked(parent_event.clone(), None);
        let child = linked(
            TestingEventBuilder::new().set_self_parent(&parent_event).build(),
            Some(&parent),
        );

        drop(parent);
        let kept = child.self_parent().expect("parent must stay reachable");
        assert_eq!(kept.hash(), parent_event.hash());
    }

    #[test]
    fn test_dropping_long_chain_does_not_overflow() {
        let mut previous_event = TestingEventBuilder::new().build();
        let mut tip = linked(previous_event.clone(), None);
        for _ in 0..200_000 {
            let event = TestingEventBuilder::new()
                .set_self_parent(&previous_event)
                .set_payload(vec![])
                .build();
            tip = linked(event.clone(), Some(&tip));
            previous_event = event;
        }
        drop(tip);
    }

    #[test]
    fn test_shared_parent_is_not_dropped_early() {
        let parent_event = TestingEventBuilder::new().build();
        let parent = linked(parent_event.clone(), None);
        let first = linked(TestingEventBuilder::new().set_self_parent(&parent_event).build(), Some(&parent));
        let second = linked(TestingEventBuilder::new().set_self_parent(&parent_event).build(), Some(&parent));
        drop(parent);

        drop(first);
        assert_eq!(second.self_parent().unwrap().hash(), parent_event.hash());
    }
}
