//! Clearance rule engine — derives the status and validity horizon a
//! stored clearance carries. Both functions are pure; they run at write
//! time so verification reads never recompute policy.

pub mod classify;
pub mod expiry;

pub use classify::classify;
pub use expiry::expiry_of;
