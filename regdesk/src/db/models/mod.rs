//! Database record models matching table schemas.
//!
//! Database models are distinct from API models so storage and API
//! representations can evolve independently.

pub mod documents;
pub mod registrations;
