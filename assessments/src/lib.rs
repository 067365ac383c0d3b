//! Performa assessment library
//!
//! Calculation and classification engine for the Performa sports-medicine
//! platform: fitness-assessment protocols that turn validated measurements
//! into a numeric result, a category, and training recommendations.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: every evaluator is a stateless transform
//! 2. **Evidence-Based**: formulas from published physiological research
//! 3. **Validate Once**: submissions are validated at the boundary;
//!    calculators never re-validate
//! 4. **Type Safety**: method/sex branches are tagged variants, so a
//!    missing required measurement cannot reach a formula

pub mod aerobic;
pub mod body_composition;
pub mod errors;
pub mod history;
pub mod protocols;
pub mod strength;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::{CalculationError, HistoryError};
pub use history::{AssessmentLog, HistoryEntry, JsonFileStore};
pub use protocols::{ProtocolDescriptor, RawInput};
pub use types::{CalculationResult, ProtocolId, Sex, ValidationReport};
