pub mod projection;
pub mod counters;
