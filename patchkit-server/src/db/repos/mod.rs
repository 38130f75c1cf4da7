//! Repository implementations for database access

pub mod countries;

pub use countries::{CountryRepository, PgCountryRepository};
