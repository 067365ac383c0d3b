//! Performa WASM module
//!
//! WebAssembly bindings for the assessment formulas, so the calculators
//! can run directly in the browser. Only the scalar hot paths are exposed;
//! classification and recommendations stay in the host application.

use wasm_bindgen::prelude::*;

use performa_assessments::aerobic;
use performa_assessments::body_composition::{self, BmiMeasurements, NavyMeasurements};
use performa_assessments::strength;
use performa_assessments::types::Sex;

/// Estimate VO2max (ml/kg/min) from the Cooper 12-minute run distance
#[wasm_bindgen]
pub fn cooper_vo2max(distance_m: f64) -> f64 {
    if !distance_m.is_finite() || distance_m <= 0.0 {
        return 0.0;
    }
    aerobic::cooper_vo2max(distance_m)
}

/// Estimate 1RM (kg) as the mean of the four regression formulas
///
/// Repetitions are clamped to the 1-20 range the formulas are valid for.
#[wasm_bindgen]
pub fn estimate_one_rep_max(lifted_kg: f64, repetitions: u32) -> f64 {
    if !lifted_kg.is_finite() || lifted_kg <= 0.0 {
        return 0.0;
    }
    let reps = repetitions.clamp(1, 20);
    strength::estimate_one_rep_max(lifted_kg, reps).average
}

/// Body-fat percentage via the Navy circumference method, male formula
#[wasm_bindgen]
pub fn navy_body_fat_male(height_cm: f64, waist_cm: f64, neck_cm: f64) -> f64 {
    if height_cm <= 0.0 || waist_cm <= neck_cm {
        return 0.0;
    }
    body_composition::navy_body_fat(&NavyMeasurements::Male {
        height_cm,
        waist_cm,
        neck_cm,
    })
}

/// Body-fat percentage via the Navy circumference method, female formula
#[wasm_bindgen]
pub fn navy_body_fat_female(height_cm: f64, waist_cm: f64, neck_cm: f64, hip_cm: f64) -> f64 {
    if height_cm <= 0.0 || waist_cm + hip_cm <= neck_cm {
        return 0.0;
    }
    body_composition::navy_body_fat(&NavyMeasurements::Female {
        height_cm,
        waist_cm,
        neck_cm,
        hip_cm,
    })
}

/// Body-fat percentage via the Deurenberg BMI regression
#[wasm_bindgen]
pub fn bmi_body_fat(height_cm: f64, weight_kg: f64, age_years: u32, is_male: bool) -> f64 {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return 0.0;
    }
    body_composition::bmi_body_fat(&BmiMeasurements {
        height_cm,
        weight_kg,
        age_years,
        sex: if is_male { Sex::Male } else { Sex::Female },
    })
}
