//! Core business logic for AaharSetu.

pub mod services;

pub use services::*;
