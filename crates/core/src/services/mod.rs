//! Business logic services.

#![allow(missing_docs)]

pub mod auth;
pub mod certificate;
pub mod donation;
pub mod donation_request;
pub mod recommendation;
pub mod registration;
pub mod session;
pub mod user;

pub use auth::authorize;
pub use certificate::{CertificateGenerator, CertificateService, HttpCertificateGenerator};
pub use donation::{
    CreateDonationInput, DisplayStatus, DonationService, DonationView, LeaderboardEntry,
    VolunteerBoard,
};
pub use donation_request::{CreateRequestInput, DonationRequestService};
pub use recommendation::{
    DonationScorer, HttpDonationScorer, RecommendQuery, RecommendationService, ScoredDonation,
};
pub use registration::{
    RegisterNgoInput, RegisterVolunteerInput, RegistrationService, ReviewDecision,
    VolunteerSummary,
};
pub use session::{MemorySessionStore, RedisSessionStore, SessionData, SessionService, SessionStore};
pub use user::{DonorSummary, LoginInput, RegisterInput, UserService};
