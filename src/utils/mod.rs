pub mod progress;
pub mod rate_limit;
