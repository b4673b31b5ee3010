//! API Module - Front-End Contract
//!
//! Serde DTOs the desktop form consumes: the model banner shown above the
//! questionnaire and the scored result for the respondent view. The GUI
//! renders these; it computes nothing from them.

pub mod model_info;

pub use model_info::{ModelInfo, RiskAssessment};
