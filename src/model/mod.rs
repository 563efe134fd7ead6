//! Plain data for the table: seat and fork identities plus the fork itself.

pub mod fork;
pub mod ids;

pub use fork::*;
pub use ids::*;
