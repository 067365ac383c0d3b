//! Core types shared by the assessment protocols

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CalculationError;

/// Biological sex for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(CalculationError::InvalidChoice {
                field: "gender",
                value: other.to_string(),
            }),
        }
    }
}

/// Resistance-training experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    /// Form label shown to the user (years of training)
    pub fn label(&self) -> &'static str {
        match self {
            Experience::Beginner => "Iniciante (0-1 anos)",
            Experience::Intermediate => "Intermediário (1-3 anos)",
            Experience::Advanced => "Avançado (3+ anos)",
        }
    }
}

impl FromStr for Experience {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Experience::Beginner),
            "intermediate" => Ok(Experience::Intermediate),
            "advanced" => Ok(Experience::Advanced),
            other => Err(CalculationError::InvalidChoice {
                field: "experience",
                value: other.to_string(),
            }),
        }
    }
}

/// Lift being estimated in the one-repetition-maximum protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Exercise {
    BenchPress,
    Squat,
    Deadlift,
    OverheadPress,
    #[default]
    Other,
}

impl Exercise {
    pub fn label(&self) -> &'static str {
        match self {
            Exercise::BenchPress => "Supino Reto",
            Exercise::Squat => "Agachamento",
            Exercise::Deadlift => "Levantamento Terra",
            Exercise::OverheadPress => "Desenvolvimento",
            Exercise::Other => "Outro",
        }
    }
}

impl FromStr for Exercise {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bench-press" => Ok(Exercise::BenchPress),
            "squat" => Ok(Exercise::Squat),
            "deadlift" => Ok(Exercise::Deadlift),
            "overhead-press" => Ok(Exercise::OverheadPress),
            "other" => Ok(Exercise::Other),
            value => Err(CalculationError::InvalidChoice {
                field: "exercise",
                value: value.to_string(),
            }),
        }
    }
}

/// Identifier of an assessment protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProtocolId {
    #[serde(rename = "cooper-test")]
    CooperTest,
    #[serde(rename = "one-rm-test")]
    OneRepMax,
    #[serde(rename = "body-fat-navy")]
    BodyFatNavy,
    #[serde(rename = "body-fat-bmi")]
    BodyFatBmi,
}

impl ProtocolId {
    pub const ALL: [ProtocolId; 4] = [
        ProtocolId::CooperTest,
        ProtocolId::OneRepMax,
        ProtocolId::BodyFatNavy,
        ProtocolId::BodyFatBmi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolId::CooperTest => "cooper-test",
            ProtocolId::OneRepMax => "one-rm-test",
            ProtocolId::BodyFatNavy => "body-fat-navy",
            ProtocolId::BodyFatBmi => "body-fat-bmi",
        }
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolId {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cooper-test" => Ok(ProtocolId::CooperTest),
            "one-rm-test" => Ok(ProtocolId::OneRepMax),
            "body-fat-navy" => Ok(ProtocolId::BodyFatNavy),
            "body-fat-bmi" => Ok(ProtocolId::BodyFatBmi),
            value => Err(CalculationError::InvalidChoice {
                field: "protocol",
                value: value.to_string(),
            }),
        }
    }
}

/// Outcome of a single protocol evaluation
///
/// Immutable once produced; the value is rounded to one decimal place the
/// way it is displayed to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub value: f64,
    pub unit: String,
    pub interpretation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub recommendations: Vec<String>,
}

/// Result of validating a raw submission before calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }
}

/// Round to one decimal place, matching the displayed precision
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
