//! Types shared between the consensus stages of a hashgraph node.

pub mod config;
pub mod crypto;
pub mod event;
pub mod serializer;
pub mod time;
