//! API request and response data models.
//!
//! These models define the public API contract and are distinct from the
//! database models so storage and API representations can evolve
//! independently. Registration fields serialize in camelCase to match the
//! form field names clients submit.

pub mod contact;
pub mod payments;
pub mod registrations;
