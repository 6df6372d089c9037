pub const VERSION: &str = env!("BUILD_VERSION");

// Round numbering shared by every consensus stage

// Birth round given to the events of a freshly started network
pub const ROUND_FIRST: u64 = 1;

// Ancient threshold meaning "nothing is ancient yet".
// No well formed event has this birth round.
pub const ROUND_UNDEFINED: u64 = 0;
