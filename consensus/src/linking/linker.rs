use std::{
    fmt::{Display, Error, Formatter},
    sync::Arc,
};
use log::{debug, error, log_enabled, trace, Level};
use hashgraph_common::{
    crypto::Hash,
    event::{EventDescriptor, EventWindow, PlatformEvent},
};
use crate::config::linker_index_checks_enabled;
use super::{
    config::LinkerConfig,
    error::{LinkerError, LinkerResult},
    index::ParentIndex,
    logs_and_metrics::{LinkerLogsAndMetrics, LinkerStats},
    LinkedEvent,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParentKind {
    SelfParent,
    OtherParent,
}

impl Display for ParentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Self::SelfParent => write!(f, "self parent"),
            Self::OtherParent => write!(f, "other parent"),
        }
    }
}

/// Links events to their parents. Expects events in topological order.
///
/// A parent is left unlinked when:
/// - the parent is ancient, or was never seen
/// - the parent's birth round differs from the one claimed by the child
/// - for the self parent only, it was created after the child
///
/// Only non-ancient events are kept. Each window advance drops the events
/// that became ancient, which bounds the memory held by the linker itself.
pub struct ConsensusLinker {
    index: ParentIndex,
    event_window: EventWindow,
    logs_and_metrics: LinkerLogsAndMetrics,
}

impl ConsensusLinker {
    /// Create a linker under the genesis event window.
    ///
    /// The config is validated before anything is allocated.
    pub fn new(config: &LinkerConfig) -> LinkerResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: &LinkerConfig) -> Self {
        Self {
            index: ParentIndex::with_capacity(config.initial_capacity),
            event_window: EventWindow::genesis(),
            logs_and_metrics: LinkerLogsAndMetrics::new(config.log_period()),
        }
    }

    /// Find and link the parents of the given event.
    ///
    /// Returns `None` if the event is ancient, in which case it is not
    /// remembered either.
    pub fn link_event<E: Into<Arc<PlatformEvent>>>(&mut self, event: E) -> Option<Arc<LinkedEvent>> {
        let event: Arc<PlatformEvent> = event.into();
        if self.event_window.is_ancient(event.as_ref()) {
            if log_enabled!(Level::Trace) {
                trace!("dropping ancient event {} under {}", event, self.event_window);
            }
            self.logs_and_metrics.ancient_event_dropped();
            return None;
        }

        let self_parent = self.parent_to_link(&event, event.self_parent(), ParentKind::SelfParent);
        let other_parent = self.parent_to_link(&event, event.other_parent(), ParentKind::OtherParent);

        let linked = Arc::new(LinkedEvent::new(event, self_parent, other_parent));
        if let Some(previous) = self.index.insert(linked.clone()) {
            debug!("event {} linked again, replacing the previous link", previous);
        }
        self.logs_and_metrics.event_linked();

        Some(linked)
    }

    /// Set the event window, dropping every event that became ancient.
    ///
    /// Returns the dropped events in ascending birth round order. Linked
    /// events handed out earlier are left untouched.
    ///
    /// # Panics
    ///
    /// If the new ancient threshold is below the current one. Accepting an
    /// older window would let pruned history be linked again.
    pub fn set_event_window(&mut self, event_window: EventWindow) -> Vec<Arc<LinkedEvent>> {
        match self.try_set_event_window(event_window) {
            Ok(pruned) => pruned,
            Err(e) => panic!("{}", e),
        }
    }

    /// Same as [`Self::set_event_window`], reporting a regression as an error.
    /// The linker is left unchanged on error.
    pub fn try_set_event_window(&mut self, event_window: EventWindow) -> LinkerResult<Vec<Arc<LinkedEvent>>> {
        let current = self.event_window.ancient_threshold();
        let new = event_window.ancient_threshold();
        if new < current {
            return Err(LinkerError::WindowRegression { current, new });
        }

        self.event_window = event_window;
        let pruned = self.index.prune(new);
        if !pruned.is_empty() {
            debug!("{} events became ancient under {}", pruned.len(), self.event_window);
            self.logs_and_metrics.events_pruned(pruned.len());
        }

        if linker_index_checks_enabled() {
            self.check_index();
        }

        Ok(pruned)
    }

    /// Forget every indexed event. The event window is kept.
    pub fn clear(&mut self) {
        debug!("clearing linker index of {} events", self.index.len());
        self.index.clear();
    }

    pub fn event_window(&self) -> &EventWindow {
        &self.event_window
    }

    /// Number of events that future events can still be linked to.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.index.contains(hash)
    }

    pub fn get(&self, hash: &Hash) -> Option<&Arc<LinkedEvent>> {
        self.index.get(hash)
    }

    pub fn stats(&self) -> LinkerStats {
        self.logs_and_metrics.stats()
    }

    // Find the parent to link to a child, or None if it should not be linked
    fn parent_to_link(
        &mut self,
        child: &PlatformEvent,
        descriptor: Option<&EventDescriptor>,
        kind: ParentKind,
    ) -> Option<Arc<LinkedEvent>> {
        let descriptor = descriptor?;

        if self.event_window.is_ancient(descriptor) {
            if log_enabled!(Level::Trace) {
                trace!("{} {} of {} is ancient", kind, descriptor, child);
            }
            return None;
        }

        let candidate = match self.index.get(descriptor.hash()) {
            Some(candidate) => candidate.clone(),
            None => {
                self.logs_and_metrics.child_has_missing_parent(child, descriptor);
                return None;
            }
        };

        if candidate.birth_round() != descriptor.birth_round() {
            self.logs_and_metrics
                .parent_has_incorrect_birth_round(child, descriptor, &candidate);
            return None;
        }

        // Other parent creation times come from another node's clock and
        // are not comparable with the child's
        if kind == ParentKind::SelfParent && candidate.time_created() > child.time_created() {
            self.logs_and_metrics
                .child_time_is_before_self_parent_time(child, &candidate);
            return None;
        }

        Some(candidate)
    }

    fn check_index(&self) {
        if let Some(lowest) = self.index.min_birth_round() {
            if self.event_window.is_ancient_round(lowest) {
                error!(
                    "linker index still holds events of birth round {} under {}",
                    lowest, self.event_window
                );
                debug_assert!(false, "ancient events left in the linker index");
            }
        }
    }
}

impl Default for ConsensusLinker {
    fn default() -> Self {
        Self::with_valid_config(&LinkerConfig::default())
    }
}
