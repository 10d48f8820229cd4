//! Database entities.

pub mod donation;
pub mod donation_request;
pub mod ngo_profile;
pub mod review_status;
pub mod user;
pub mod volunteer_profile;

pub use donation::Entity as Donation;
pub use donation_request::Entity as DonationRequest;
pub use ngo_profile::Entity as NgoProfile;
pub use user::Entity as User;
pub use volunteer_profile::Entity as VolunteerProfile;
