//! service-core: Shared infrastructure for the search site and any service built next to it.
pub mod error;
pub mod middleware;
pub mod observability;
