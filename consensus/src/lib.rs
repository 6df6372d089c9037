// Hashgraph consensus library
// Event intake stages that run before the round computation

#![allow(clippy::type_complexity)]

extern crate log;

pub mod config;
pub mod linking;
