//! API Routes
//!
//! Route handlers organized by functionality.

pub mod charts;
pub mod export;
pub mod health;
pub mod metrics;
pub mod page;
