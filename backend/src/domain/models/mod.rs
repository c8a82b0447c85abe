//! Domain models for the donation tracker.

pub mod achievement;
pub mod badge;
pub mod donation;
