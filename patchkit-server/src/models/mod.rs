//! Domain models
//!
//! Request types validate their input when applied. Invalid input returns
//! an error, never a panic.

pub mod country;
pub mod user;

pub use country::{Country, CountryError, NewCountry, UpdateCountryRequest};
pub use user::{CreateUserRequest, User};
