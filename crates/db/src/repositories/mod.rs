//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod city_repo;
pub mod country_repo;
pub mod lodging_repo;
pub mod review_repo;
pub mod session_repo;
pub mod user_repo;

pub use booking_repo::{BookingCreateOutcome, BookingRepo};
pub use city_repo::CityRepo;
pub use country_repo::CountryRepo;
pub use lodging_repo::LodgingRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
