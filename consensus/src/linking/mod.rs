//! Event linking, the first consensus stage every event goes through.
//!
//! Events from gossip and from the local event creator are attached to their
//! parents before the round computation stage sees them. The linker checks
//! the claims a child makes about its parents and refuses links that would
//! break the causal order:
//!
//! | Check | Self parent | Other parent |
//! |-------|-------------|--------------|
//! | Parent known and not ancient | yes | yes |
//! | Claimed birth round matches | yes | yes |
//! | Parent not created after child | yes | no |
//!
//! A refused link leaves the parent absent, the event itself is still linked.
//! Only ancient events are dropped entirely.
//!
//! ## Memory
//!
//! The linker keeps non-ancient events only. The round computation stage
//! advances the [`EventWindow`](hashgraph_common::event::EventWindow) with
//! [`ConsensusLinker::set_event_window`], which drops every event that became
//! ancient. A caller that never advances the window makes the linker grow
//! without bound.
//!
//! ## Metrics
//!
//! - `hashgraph_linker_linked_events`
//! - `hashgraph_linker_ancient_events`
//! - `hashgraph_linker_pruned_events`
//! - `hashgraph_linker_missing_parents`
//! - `hashgraph_linker_birth_round_mismatches`
//! - `hashgraph_linker_time_created_mismatches`

pub mod config;
pub mod error;
pub mod intake;
mod index;
mod linked_event;
mod linker;
mod logs_and_metrics;

pub use config::LinkerConfig;
pub use error::{LinkerError, LinkerResult};
pub use intake::{spawn_linker, LinkerHandle, LinkerInput};
pub use linked_event::LinkedEvent;
pub use linker::ConsensusLinker;
pub use logs_and_metrics::{LinkerStats, RateLimitedLogger};
