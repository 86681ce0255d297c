//! Property domain module.
//!
//! Read model for listings and the structured filter used to query them.

mod filter;
mod property;
mod property_type;

pub use filter::{PropertyFilter, SortOrder};
pub use property::{Property, PropertyContact, PropertyLocation};
pub use property_type::{ListingStatus, PropertyType};

#[cfg(test)]
pub(crate) use property::fixtures;
