//! Early Diabetes Risk Screening - Core Service
//!
//! Trains a gradient-boosted classifier on preprocessed health-survey data,
//! picks a sensitivity-weighted decision threshold on the held-out partition,
//! and serves the persisted model artifact to the desktop front-end.

pub mod api;
pub mod constants;
pub mod logic;
