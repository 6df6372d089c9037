//! Event model shared by the consensus stages.
//!
//! These types describe events as they arrive from gossip or from the local
//! event creator. They are immutable once built and cheap to share behind an
//! `Arc`.

mod descriptor;
mod node_id;
mod platform_event;
mod window;

#[cfg(any(test, feature = "testutils"))]
pub mod testing;

pub use descriptor::EventDescriptor;
pub use node_id::NodeId;
pub use platform_event::PlatformEvent;
pub use window::EventWindow;

/// Anything that carries a birth round and can therefore be tested
/// against an [`EventWindow`].
pub trait HasBirthRound {
    fn birth_round(&self) -> u64;
}
