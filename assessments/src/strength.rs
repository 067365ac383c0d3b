//! One-repetition-maximum estimation from submaximal sets
//!
//! The estimate is the arithmetic mean of four published regression
//! formulas (Epley, Brzycki, Lander, O'Conner), which tracks measured 1RM
//! better than any single formula across the 1-20 repetition range. The
//! estimate is then related to body weight to classify strength level.

use serde::{Deserialize, Serialize};

use crate::types::{round_to_tenth, CalculationResult, Exercise, Experience};

/// Input for the 1RM estimator
///
/// Repetitions must already be validated to 1..=20: beyond that the
/// regressions lose validity, and the Brzycki/Lander denominators approach
/// zero near 37 repetitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneRepMaxInput {
    /// Load lifted for the submaximal set (kg)
    pub lifted_kg: f64,
    pub repetitions: u32,
    pub exercise: Exercise,
    pub experience: Experience,
    /// Body weight, needed for the strength classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_weight_kg: Option<f64>,
}

/// Per-formula breakdown of the 1RM estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneRepMaxEstimate {
    /// Epley: `w x (1 + r/30)`
    pub epley: f64,
    /// Brzycki: `w x 36 / (37 - r)`
    pub brzycki: f64,
    /// Lander: `w x 100 / (101.3 - 2.67123 x r)`
    pub lander: f64,
    /// O'Conner: `w x (1 + 0.025 x r)`
    pub oconner: f64,
    /// Mean of the four formulas
    pub average: f64,
}

/// Strength level relative to body weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthCategory {
    Elite,
    Avancado,
    Intermediario,
    Iniciante,
    Novato,
}

impl StrengthCategory {
    /// User-facing label (pt-BR)
    pub fn label(&self) -> &'static str {
        match self {
            StrengthCategory::Elite => "Elite",
            StrengthCategory::Avancado => "Avançado",
            StrengthCategory::Intermediario => "Intermediário",
            StrengthCategory::Iniciante => "Iniciante",
            StrengthCategory::Novato => "Novato",
        }
    }
}

/// Label used when body weight was not provided and the estimate could not
/// be classified.
pub const NOT_EVALUATED_LABEL: &str = "Não avaliado";

/// Typed result of a 1RM evaluation
///
/// `category` is `None` when body weight was absent: the estimate itself is
/// still valid, but it could not be related to body weight. Callers decide
/// how to surface the incompleteness; the display conversion uses
/// [`NOT_EVALUATED_LABEL`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneRepMaxResult {
    pub estimate: OneRepMaxEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<StrengthCategory>,
    pub recommendations: Vec<String>,
}

impl From<OneRepMaxResult> for CalculationResult {
    fn from(result: OneRepMaxResult) -> Self {
        let label = result
            .category
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| NOT_EVALUATED_LABEL.to_string());
        CalculationResult {
            value: round_to_tenth(result.estimate.average),
            unit: "kg".to_string(),
            interpretation: format!("1RM Estimado: {:.1} kg", result.estimate.average),
            category: Some(label),
            recommendations: result.recommendations,
        }
    }
}

/// Estimate 1RM as the mean of the four regression formulas
pub fn estimate_one_rep_max(lifted_kg: f64, repetitions: u32) -> OneRepMaxEstimate {
    let w = lifted_kg;
    let r = f64::from(repetitions);

    let epley = w * (1.0 + r / 30.0);
    let brzycki = w * (36.0 / (37.0 - r));
    let lander = w * (100.0 / (101.3 - 2.67123 * r));
    let oconner = w * (1.0 + 0.025 * r);

    let average = (epley + brzycki + lander + oconner) / 4.0;

    OneRepMaxEstimate {
        epley,
        brzycki,
        lander,
        oconner,
        average,
    }
}

/// Classify the estimate by its ratio to body weight
///
/// Thresholds follow bench-press strength standards.
pub fn classify_strength(one_rm_kg: f64, body_weight_kg: f64) -> StrengthCategory {
    let ratio = one_rm_kg / body_weight_kg;
    if ratio >= 1.5 {
        StrengthCategory::Elite
    } else if ratio >= 1.25 {
        StrengthCategory::Avancado
    } else if ratio >= 1.0 {
        StrengthCategory::Intermediario
    } else if ratio >= 0.75 {
        StrengthCategory::Iniciante
    } else {
        StrengthCategory::Novato
    }
}

/// Training recommendations keyed by experience level (pt-BR)
pub fn strength_recommendations(experience: Experience) -> Vec<String> {
    let mut recommendations = vec![
        "Mantenha uma progressão gradual nos treinos".to_string(),
        "Priorize a técnica antes de aumentar a carga".to_string(),
    ];

    match experience {
        Experience::Beginner => {
            recommendations.push("Foque no aprendizado dos movimentos básicos".to_string());
            recommendations.push("Treine com supervisão de um profissional".to_string());
            recommendations.push("Aumente a carga em 2,5-5kg por semana".to_string());
        }
        Experience::Intermediate => {
            recommendations.push("Varie os métodos de treino (séries, repetições)".to_string());
            recommendations.push("Considere periodização no seu treinamento".to_string());
            recommendations.push("Monitore a recuperação entre as sessões".to_string());
        }
        Experience::Advanced => {
            recommendations.push("Implemente técnicas avançadas de treinamento".to_string());
            recommendations
                .push("Considere trabalhar com diferentes faixas de repetições".to_string());
            recommendations.push("Monitore indicadores de overtraining".to_string());
        }
    }

    recommendations
}

/// Evaluate a validated 1RM submission
///
/// Pure function; the caller is responsible for pre-validation.
pub fn evaluate(input: &OneRepMaxInput) -> OneRepMaxResult {
    let estimate = estimate_one_rep_max(input.lifted_kg, input.repetitions);
    let category = input
        .body_weight_kg
        .map(|bw| classify_strength(estimate.average, bw));
    let recommendations = strength_recommendations(input.experience);

    OneRepMaxResult {
        estimate,
        category,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_reference_scenario() {
        // 80 kg x 8 reps: the four formulas average out just below 100 kg
        let estimate = estimate_one_rep_max(80.0, 8);
        assert!((estimate.epley - 101.3).abs() < 0.1);
        assert!((estimate.brzycki - 99.3).abs() < 0.1);
        assert!((estimate.lander - 100.1).abs() < 0.1);
        assert!((estimate.oconner - 96.0).abs() < 0.1);
        assert!(estimate.average > 95.0 && estimate.average < 105.0);
    }

    #[test]
    fn test_single_rep_estimate_close_to_lifted() {
        // For 1 rep every formula is within a few percent of the actual load
        let estimate = estimate_one_rep_max(100.0, 1);
        assert!(estimate.average > 100.0 && estimate.average < 105.0);
    }

    #[rstest]
    #[case(120.0, 80.0, StrengthCategory::Elite)]
    #[case(100.0, 80.0, StrengthCategory::Avancado)]
    #[case(85.0, 80.0, StrengthCategory::Intermediario)]
    #[case(65.0, 80.0, StrengthCategory::Iniciante)]
    #[case(50.0, 80.0, StrengthCategory::Novato)]
    fn test_strength_ratio_table(
        #[case] one_rm: f64,
        #[case] body_weight: f64,
        #[case] expected: StrengthCategory,
    ) {
        assert_eq!(classify_strength(one_rm, body_weight), expected);
    }

    #[test]
    fn test_missing_body_weight_leaves_category_unset() {
        let result = evaluate(&OneRepMaxInput {
            lifted_kg: 80.0,
            repetitions: 8,
            exercise: Exercise::BenchPress,
            experience: Experience::Intermediate,
            body_weight_kg: None,
        });
        assert!(result.category.is_none());

        let display: CalculationResult = result.into();
        assert_eq!(display.category.as_deref(), Some(NOT_EVALUATED_LABEL));
    }

    #[test]
    fn test_with_body_weight_classifies() {
        let result = evaluate(&OneRepMaxInput {
            lifted_kg: 80.0,
            repetitions: 8,
            exercise: Exercise::BenchPress,
            experience: Experience::Intermediate,
            body_weight_kg: Some(75.0),
        });
        // ~99.2 / 75 ~= 1.32 -> Avançado
        assert_eq!(result.category, Some(StrengthCategory::Avancado));
    }

    #[test]
    fn test_recommendations_by_experience() {
        assert_eq!(strength_recommendations(Experience::Beginner).len(), 5);
        let advanced = strength_recommendations(Experience::Advanced);
        assert!(advanced
            .iter()
            .any(|r| r.contains("overtraining")));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: estimate is strictly increasing in lifted weight
        #[test]
        fn prop_estimate_monotonic_in_weight(
            w1 in 1.0f64..400.0,
            delta in 0.5f64..100.0,
            reps in 1u32..=20
        ) {
            let lo = estimate_one_rep_max(w1, reps).average;
            let hi = estimate_one_rep_max(w1 + delta, reps).average;
            prop_assert!(hi > lo);
        }

        /// Property: for fixed weight, more reps means a higher estimate
        #[test]
        fn prop_estimate_monotonic_in_reps(
            weight in 1.0f64..=500.0,
            reps in 1u32..20
        ) {
            let lo = estimate_one_rep_max(weight, reps).average;
            let hi = estimate_one_rep_max(weight, reps + 1).average;
            prop_assert!(hi > lo);
        }

        /// Property: the average always lies between the formula extremes
        #[test]
        fn prop_average_within_formula_bounds(
            weight in 1.0f64..=500.0,
            reps in 1u32..=20
        ) {
            let e = estimate_one_rep_max(weight, reps);
            let min = e.epley.min(e.brzycki).min(e.lander).min(e.oconner);
            let max = e.epley.max(e.brzycki).max(e.lander).max(e.oconner);
            prop_assert!(e.average >= min && e.average <= max);
        }
    }
}
