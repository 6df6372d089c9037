// Time types used across the node
//
// Event creation times are chosen by the event creator and travel inside the
// event. They are compared against each other (self-parent ordering) but never
// against the local clock by the consensus stages.

// Millis timestamps used to determine it using its type
pub type TimestampMillis = u64;
