//! Rate limiting - process-wide permits guarding upstream providers

mod limiter;

pub use limiter::{RateLimitConfig, RateLimitResult, RateLimiter};
