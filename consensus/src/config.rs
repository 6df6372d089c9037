use lazy_static::lazy_static;
use std::env;

// Default capacity of the linker index, in events.
// A healthy network keeps a few rounds of events per node non-ancient,
// so this is enough for a few dozen nodes without rehashing.
pub const DEFAULT_LINKER_INITIAL_CAPACITY: usize = 1024;

// Upper bound accepted for the index pre-allocation
pub const MAX_LINKER_INITIAL_CAPACITY: usize = 1 << 24;

// Minimum period between two log lines for the same linking failure mode
pub const DEFAULT_LINKER_LOG_PERIOD_SECONDS: u64 = 60;

// Capacity of the channels in front of and behind the linker intake stage
pub const DEFAULT_LINKER_INTAKE_CAPACITY: usize = 1024;

// -----------------------------------------------------------------------------
// Runtime toggles
// -----------------------------------------------------------------------------
//
// Environment variables:
//   - HASHGRAPH_LINKER_INDEX_CHECKS
//       "1" | "true"  => after each window change, verify that the linker
//                        index holds no ancient event
//       (unset/other) => disabled (default)

lazy_static! {
    static ref LINKER_INDEX_CHECKS_ENABLED: bool = {
        match env::var("HASHGRAPH_LINKER_INDEX_CHECKS") {
            Ok(v) => matches!(v.as_str(), "1" | "true" | "TRUE" | "True"),
            Err(_) => false,
        }
    };
}

/// Returns true if the linker should verify its index after every window change.
/// Read once from the environment, cached afterwards.
pub fn linker_index_checks_enabled() -> bool {
    *LINKER_INDEX_CHECKS_ENABLED
}
