//! Logs and metrics for the consensus linker.
//!
//! Every failure mode has its own counter and its own rate limited log line,
//! so a burst of one kind of bad parent never hides another kind.

use std::time::{Duration, Instant};
use log::{error, warn};
use metrics::counter;
use serde::Serialize;
use hashgraph_common::event::{EventDescriptor, PlatformEvent};
use super::LinkedEvent;

/// Allows one log line per period and counts what it swallowed in between.
#[derive(Debug)]
pub struct RateLimitedLogger {
    period: Duration,
    last_logged: Option<Instant>,
    suppressed: u64,
}

impl RateLimitedLogger {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_logged: None,
            suppressed: 0,
        }
    }

    /// Returns the number of lines suppressed since the last one if a line
    /// may be logged now, `None` otherwise.
    pub fn ready(&mut self) -> Option<u64> {
        self.ready_at(Instant::now())
    }

    fn ready_at(&mut self, now: Instant) -> Option<u64> {
        let allowed = match self.last_logged {
            Some(last) => now.saturating_duration_since(last) >= self.period,
            None => true,
        };

        if allowed {
            self.last_logged = Some(now);
            Some(std::mem::take(&mut self.suppressed))
        } else {
            self.suppressed += 1;
            None
        }
    }
}

/// Local tallies of what the linker did since it was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkerStats {
    pub linked_events: u64,
    pub ancient_events: u64,
    pub pruned_events: u64,
    pub missing_parents: u64,
    pub birth_round_mismatches: u64,
    pub time_created_mismatches: u64,
}

pub(crate) struct LinkerLogsAndMetrics {
    missing_parent_logger: RateLimitedLogger,
    birth_round_mismatch_logger: RateLimitedLogger,
    time_created_mismatch_logger: RateLimitedLogger,
    stats: LinkerStats,
}

impl LinkerLogsAndMetrics {
    pub fn new(log_period: Duration) -> Self {
        Self {
            missing_parent_logger: RateLimitedLogger::new(log_period),
            birth_round_mismatch_logger: RateLimitedLogger::new(log_period),
            time_created_mismatch_logger: RateLimitedLogger::new(log_period),
            stats: LinkerStats::default(),
        }
    }

    pub fn stats(&self) -> LinkerStats {
        self.stats
    }

    pub fn event_linked(&mut self) {
        self.stats.linked_events += 1;
        counter!("hashgraph_linker_linked_events").increment(1);
    }

    pub fn ancient_event_dropped(&mut self) {
        self.stats.ancient_events += 1;
        counter!("hashgraph_linker_ancient_events").increment(1);
    }

    pub fn events_pruned(&mut self, count: usize) {
        self.stats.pruned_events += count as u64;
        counter!("hashgraph_linker_pruned_events").increment(count as u64);
    }

    // Events reach the linker in topological order, so a non-ancient parent
    // that is not indexed points at a bug upstream.
    pub fn child_has_missing_parent(&mut self, child: &PlatformEvent, parent: &EventDescriptor) {
        self.stats.missing_parents += 1;
        counter!("hashgraph_linker_missing_parents").increment(1);

        if let Some(suppressed) = self.missing_parent_logger.ready() {
            error!(
                "Child has a missing parent. This should not be possible. Child: {}, parent: {} ({} similar lines suppressed)",
                child, parent, suppressed
            );
        }
    }

    pub fn parent_has_incorrect_birth_round(
        &mut self,
        child: &PlatformEvent,
        parent: &EventDescriptor,
        candidate: &LinkedEvent,
    ) {
        self.stats.birth_round_mismatches += 1;
        counter!("hashgraph_linker_birth_round_mismatches").increment(1);

        if let Some(suppressed) = self.birth_round_mismatch_logger.ready() {
            warn!(
                "Event has a parent with a different birth round than claimed. Child: {}, parent: {}, claimed birth round: {}, actual birth round: {} ({} similar lines suppressed)",
                child,
                candidate,
                parent.birth_round(),
                candidate.birth_round(),
                suppressed
            );
        }
    }

    pub fn child_time_is_before_self_parent_time(&mut self, child: &PlatformEvent, candidate: &LinkedEvent) {
        self.stats.time_created_mismatches += 1;
        counter!("hashgraph_linker_time_created_mismatches").increment(1);

        if let Some(suppressed) = self.time_created_mismatch_logger.ready() {
            error!(
                "Child time created is before self parent time created. Child: {}, parent: {}, child time created: {}, parent time created: {} ({} similar lines suppressed)",
                child,
                candidate,
                child.time_created(),
                candidate.time_created(),
                suppressed
            );
        }
    }
}
