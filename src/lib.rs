//! Aggregation core for a Spanish wildfire dashboard.
//!
//! Loads a flat table of historical wildfire records once, then offers pure,
//! synchronous transforms over it: regional rankings, yearly cause
//! percentages, a seasonal kernel-density surface, a trend label and the
//! header KPIs. Every transform returns either a populated result or an
//! explicit no-data sentinel; errors are reserved for missing or malformed
//! sources at startup.
pub mod density;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod loader;
pub mod lookup;
pub mod output;
pub mod reports;
pub mod types;
pub mod util;
