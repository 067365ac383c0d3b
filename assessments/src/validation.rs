//! Submission validation for the assessment protocols
//!
//! One validator per protocol mirrors the form constraints: numeric ranges
//! come from `validator` derive attributes on the form structs, presence and
//! enum membership are custom checks. Messages are the Portuguese texts
//! shown to the user. Calculators do not re-validate.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::aerobic::CooperTestInput;
use crate::body_composition::{BmiMeasurements, BodyFatInput, BodyFatMethod, NavyMeasurements};
use crate::errors::CalculationError;
use crate::protocols::RawInput;
use crate::strength::OneRepMaxInput;
use crate::types::{Sex, ValidationReport};

const MSG_GENDER: &str = "Gênero deve ser especificado";

// ============================================================================
// Cooper Test
// ============================================================================

const MSG_DISTANCE: &str = "Distância deve estar entre 500 e 5000 metros";
const MSG_AGE_15_80: &str = "Idade deve estar entre 15 e 80 anos";

/// Raw Cooper test submission, prior to validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CooperTestForm {
    #[validate(range(
        min = 500.0,
        max = 5000.0,
        message = "Distância deve estar entre 500 e 5000 metros"
    ))]
    pub distance: Option<f64>,
    #[validate(range(min = 15.0, max = 80.0, message = "Idade deve estar entre 15 e 80 anos"))]
    pub age: Option<f64>,
    pub gender: Option<String>,
    #[validate(range(
        min = 30.0,
        max = 200.0,
        message = "Peso corporal deve estar entre 30 e 200 kg"
    ))]
    pub weight: Option<f64>,
}

impl CooperTestForm {
    pub fn from_raw(raw: &RawInput) -> Self {
        Self {
            distance: raw.number("distance"),
            age: raw.number("age"),
            gender: raw.choice("gender").map(str::to_string),
            weight: raw.number("weight"),
        }
    }

    /// Convert into the typed evaluator input, surfacing missing fields
    pub fn into_input(self) -> Result<CooperTestInput, CalculationError> {
        let distance_m = self
            .distance
            .ok_or(CalculationError::MissingMeasurement("distância"))?;
        let age = self
            .age
            .ok_or(CalculationError::MissingMeasurement("idade"))?;
        let sex: Sex = self
            .gender
            .as_deref()
            .ok_or(CalculationError::MissingMeasurement("gênero"))?
            .parse()?;

        Ok(CooperTestInput {
            distance_m,
            age_years: age.round() as u32,
            sex,
            body_weight_kg: self.weight,
        })
    }
}

/// Validate a Cooper test submission
pub fn validate_cooper_test(form: &CooperTestForm) -> ValidationReport {
    let mut errors = Vec::new();
    if form.distance.is_none() {
        errors.push(MSG_DISTANCE.to_string());
    }
    if form.age.is_none() {
        errors.push(MSG_AGE_15_80.to_string());
    }
    if !gender_is_valid(form.gender.as_deref()) {
        errors.push(MSG_GENDER.to_string());
    }
    errors.extend(range_messages(form.validate()));
    reject_non_finite(&mut errors, &[form.distance, form.age, form.weight]);
    ValidationReport::from_errors(errors)
}

// ============================================================================
// One-Repetition Maximum
// ============================================================================

const MSG_LIFTED: &str = "Peso deve estar entre 1 e 500 kg";
const MSG_REPS: &str = "Repetições devem estar entre 1 e 20";
const MSG_EXPERIENCE: &str = "Nível de experiência deve ser especificado";

/// Raw 1RM submission, prior to validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OneRepMaxForm {
    #[validate(range(min = 1.0, max = 500.0, message = "Peso deve estar entre 1 e 500 kg"))]
    pub weight: Option<f64>,
    #[validate(range(min = 1.0, max = 20.0, message = "Repetições devem estar entre 1 e 20"))]
    pub repetitions: Option<f64>,
    pub exercise: Option<String>,
    pub experience: Option<String>,
    #[validate(range(
        min = 30.0,
        max = 200.0,
        message = "Peso corporal deve estar entre 30 e 200 kg"
    ))]
    pub body_weight: Option<f64>,
}

impl OneRepMaxForm {
    pub fn from_raw(raw: &RawInput) -> Self {
        Self {
            weight: raw.number("weight"),
            repetitions: raw.number("repetitions"),
            exercise: raw.choice("exercise").map(str::to_string),
            experience: raw.choice("experience").map(str::to_string),
            body_weight: raw.number("body_weight"),
        }
    }

    pub fn into_input(self) -> Result<OneRepMaxInput, CalculationError> {
        let lifted_kg = self
            .weight
            .ok_or(CalculationError::MissingMeasurement("peso"))?;
        let repetitions = self
            .repetitions
            .ok_or(CalculationError::MissingMeasurement("repetições"))?;
        let experience = self
            .experience
            .as_deref()
            .ok_or(CalculationError::MissingMeasurement("nível de experiência"))?
            .parse()?;
        // The lift is descriptive only; an absent choice falls back to Other
        let exercise = match self.exercise.as_deref() {
            Some(value) => value.parse()?,
            None => Default::default(),
        };

        Ok(OneRepMaxInput {
            lifted_kg,
            repetitions: repetitions.round() as u32,
            exercise,
            experience,
            body_weight_kg: self.body_weight,
        })
    }
}

/// Validate a 1RM submission
pub fn validate_one_rep_max(form: &OneRepMaxForm) -> ValidationReport {
    let mut errors = Vec::new();
    if form.weight.is_none() {
        errors.push(MSG_LIFTED.to_string());
    }
    if form.repetitions.is_none() {
        errors.push(MSG_REPS.to_string());
    }
    if !matches!(
        form.experience.as_deref().map(str::parse::<crate::types::Experience>),
        Some(Ok(_))
    ) {
        errors.push(MSG_EXPERIENCE.to_string());
    }
    errors.extend(range_messages(form.validate()));
    reject_non_finite(&mut errors, &[form.weight, form.repetitions, form.body_weight]);
    ValidationReport::from_errors(errors)
}

// ============================================================================
// Body Fat
// ============================================================================

const MSG_HEIGHT: &str = "Altura deve estar entre 100 e 250 cm";
const MSG_BF_WEIGHT: &str = "Peso deve estar entre 30 e 300 kg";
const MSG_WAIST: &str = "Circunferência da cintura deve estar entre 50 e 200 cm";
const MSG_NECK: &str = "Circunferência do pescoço deve estar entre 20 e 60 cm";
const MSG_HIP: &str =
    "Circunferência do quadril é obrigatória para mulheres e deve estar entre 60 e 200 cm";
const MSG_WAIST_NECK: &str = "Circunferência da cintura deve ser maior que a do pescoço";

/// Raw body-fat submission, prior to validation
///
/// The method is fixed by the protocol dispatching the form; the
/// circumference fields only apply to the Navy method.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BodyFatForm {
    pub method: Option<String>,
    #[validate(range(min = 100.0, max = 250.0, message = "Altura deve estar entre 100 e 250 cm"))]
    pub height: Option<f64>,
    #[validate(range(min = 30.0, max = 300.0, message = "Peso deve estar entre 30 e 300 kg"))]
    pub weight: Option<f64>,
    #[validate(range(min = 15.0, max = 80.0, message = "Idade deve estar entre 15 e 80 anos"))]
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub waist: Option<f64>,
    pub neck: Option<f64>,
    pub hip: Option<f64>,
}

impl BodyFatForm {
    pub fn from_raw(raw: &RawInput) -> Self {
        Self {
            method: raw.choice("method").map(str::to_string),
            height: raw.number("height"),
            weight: raw.number("weight"),
            age: raw.number("age"),
            gender: raw.choice("gender").map(str::to_string),
            waist: raw.number("waist"),
            neck: raw.number("neck"),
            hip: raw.number("hip"),
        }
    }

    pub fn with_method(mut self, method: BodyFatMethod) -> Self {
        self.method = Some(
            match method {
                BodyFatMethod::Navy => "navy",
                BodyFatMethod::Bmi => "bmi",
            }
            .to_string(),
        );
        self
    }

    fn parse_method(&self) -> Result<BodyFatMethod, CalculationError> {
        match self.method.as_deref() {
            Some("navy") => Ok(BodyFatMethod::Navy),
            Some("bmi") => Ok(BodyFatMethod::Bmi),
            Some(other) => Err(CalculationError::UnsupportedMethod(other.to_string())),
            None => Err(CalculationError::MissingMeasurement("método")),
        }
    }

    pub fn into_input(self) -> Result<BodyFatInput, CalculationError> {
        let method = self.parse_method()?;
        let sex: Sex = self
            .gender
            .as_deref()
            .ok_or(CalculationError::MissingMeasurement("gênero"))?
            .parse()?;
        let height_cm = self
            .height
            .ok_or(CalculationError::MissingMeasurement("altura"))?;

        match method {
            BodyFatMethod::Navy => {
                let waist_cm = self
                    .waist
                    .ok_or(CalculationError::MissingMeasurement("cintura"))?;
                let neck_cm = self
                    .neck
                    .ok_or(CalculationError::MissingMeasurement("pescoço"))?;
                let measurements = match sex {
                    Sex::Male => NavyMeasurements::Male {
                        height_cm,
                        waist_cm,
                        neck_cm,
                    },
                    Sex::Female => NavyMeasurements::Female {
                        height_cm,
                        waist_cm,
                        neck_cm,
                        hip_cm: self
                            .hip
                            .ok_or(CalculationError::MissingMeasurement("quadril"))?,
                    },
                };
                Ok(BodyFatInput::Navy(measurements))
            }
            BodyFatMethod::Bmi => Ok(BodyFatInput::Bmi(BmiMeasurements {
                height_cm,
                weight_kg: self
                    .weight
                    .ok_or(CalculationError::MissingMeasurement("peso"))?,
                age_years: self
                    .age
                    .ok_or(CalculationError::MissingMeasurement("idade"))?
                    .round() as u32,
                sex,
            })),
        }
    }
}

/// Validate a body-fat submission for the method carried by the form
pub fn validate_body_fat(form: &BodyFatForm) -> ValidationReport {
    let mut errors = Vec::new();
    if form.height.is_none() {
        errors.push(MSG_HEIGHT.to_string());
    }
    if form.weight.is_none() {
        errors.push(MSG_BF_WEIGHT.to_string());
    }
    if form.age.is_none() {
        errors.push(MSG_AGE_15_80.to_string());
    }
    if !gender_is_valid(form.gender.as_deref()) {
        errors.push(MSG_GENDER.to_string());
    }
    errors.extend(range_messages(form.validate()));

    if matches!(form.parse_method(), Ok(BodyFatMethod::Navy)) {
        if !form.waist.map_or(false, |v| (50.0..=200.0).contains(&v)) {
            errors.push(MSG_WAIST.to_string());
        }
        if !form.neck.map_or(false, |v| (20.0..=60.0).contains(&v)) {
            errors.push(MSG_NECK.to_string());
        }
        let needs_hip = gender_is_female(form.gender.as_deref());
        if needs_hip && !form.hip.map_or(false, |v| (60.0..=200.0).contains(&v)) {
            errors.push(MSG_HIP.to_string());
        }

        // The Navy regressions take log10(waist - neck) for men and
        // log10(waist + hip - neck) for women; a non-positive difference
        // would make the formula undefined.
        let girth_minus_neck = match (form.waist, form.neck) {
            (Some(waist), Some(neck)) if needs_hip => {
                form.hip.map(|hip| waist + hip - neck)
            }
            (Some(waist), Some(neck)) => Some(waist - neck),
            _ => None,
        };
        if matches!(girth_minus_neck, Some(d) if d <= 0.0) {
            errors.push(MSG_WAIST_NECK.to_string());
        }
    }

    reject_non_finite(
        &mut errors,
        &[form.height, form.weight, form.age, form.waist, form.neck, form.hip],
    );
    ValidationReport::from_errors(errors)
}

// ============================================================================
// Helpers
// ============================================================================

fn gender_is_valid(gender: Option<&str>) -> bool {
    matches!(gender.map(str::parse::<Sex>), Some(Ok(_)))
}

fn gender_is_female(gender: Option<&str>) -> bool {
    matches!(gender.map(str::parse::<Sex>), Some(Ok(Sex::Female)))
}

/// Flatten derive-produced range violations into their display messages
fn range_messages(result: Result<(), ValidationErrors>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    if let Err(errors) = result {
        for field_errors in errors.field_errors().values() {
            for error in field_errors.iter() {
                if let Some(message) = &error.message {
                    out.push(message.to_string());
                }
            }
        }
        out.sort();
    }
    out
}

/// NaN and infinity never pass validation
fn reject_non_finite(errors: &mut Vec<String>, values: &[Option<f64>]) {
    if values.iter().flatten().any(|v| !v.is_finite()) {
        errors.push("Os valores informados devem ser números válidos".to_string());
    }
}
