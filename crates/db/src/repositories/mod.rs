//! Repositories wrapping entity queries.

pub mod donation;
pub mod donation_request;
pub mod ngo_profile;
pub mod user;
pub mod volunteer_profile;

pub use donation::{DeliveryCount, DonationRepository};
pub use donation_request::DonationRequestRepository;
pub use ngo_profile::NgoProfileRepository;
pub use user::UserRepository;
pub use volunteer_profile::VolunteerProfileRepository;
