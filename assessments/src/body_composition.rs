//! Body-fat percentage estimation
//!
//! Two formula families are supported:
//!
//! - **Navy method**: log10 regression over circumference measurements
//!   (waist/neck for men, waist+hip/neck for women) and height.
//! - **BMI method** (Deurenberg): linear regression over body-mass index
//!   and age, with sex-specific intercepts.
//!
//! The input is a tagged variant per method and sex, so a female Navy
//! measurement set without a hip circumference cannot be constructed. The
//! untyped submission boundary in [`crate::protocols`] reports the missing
//! hip as a [`crate::errors::CalculationError::MissingMeasurement`].

use serde::{Deserialize, Serialize};

use crate::types::{round_to_tenth, CalculationResult, Sex};

/// Formula family used for the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFatMethod {
    Navy,
    Bmi,
}

/// Circumference measurements for the Navy method
///
/// The female variant carries the hip circumference the formula requires,
/// making the missing-hip failure unrepresentable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "sex", rename_all = "lowercase")]
pub enum NavyMeasurements {
    Male {
        height_cm: f64,
        waist_cm: f64,
        neck_cm: f64,
    },
    Female {
        height_cm: f64,
        waist_cm: f64,
        neck_cm: f64,
        hip_cm: f64,
    },
}

impl NavyMeasurements {
    pub fn sex(&self) -> Sex {
        match self {
            NavyMeasurements::Male { .. } => Sex::Male,
            NavyMeasurements::Female { .. } => Sex::Female,
        }
    }
}

/// Inputs for the BMI-based (Deurenberg) estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiMeasurements {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: u32,
    pub sex: Sex,
}

/// Input for the body-composition evaluator, tagged by method
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum BodyFatInput {
    Navy(NavyMeasurements),
    Bmi(BmiMeasurements),
}

impl BodyFatInput {
    pub fn method(&self) -> BodyFatMethod {
        match self {
            BodyFatInput::Navy(_) => BodyFatMethod::Navy,
            BodyFatInput::Bmi(_) => BodyFatMethod::Bmi,
        }
    }

    pub fn sex(&self) -> Sex {
        match self {
            BodyFatInput::Navy(m) => m.sex(),
            BodyFatInput::Bmi(m) => m.sex,
        }
    }
}

/// Body-fat category (American Council on Exercise ranges)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    Essencial,
    Atleta,
    Fitness,
    Aceitavel,
    Obesidade,
}

impl BodyFatCategory {
    /// User-facing label (pt-BR)
    pub fn label(&self) -> &'static str {
        match self {
            BodyFatCategory::Essencial => "Essencial",
            BodyFatCategory::Atleta => "Atleta",
            BodyFatCategory::Fitness => "Fitness",
            BodyFatCategory::Aceitavel => "Aceitável",
            BodyFatCategory::Obesidade => "Obesidade",
        }
    }

    /// Half-open percentage range `[min, max)` covered by this category for
    /// the given sex. The ranges tile the whole domain.
    pub fn range(&self, sex: Sex) -> (f64, f64) {
        match (self, sex) {
            (BodyFatCategory::Essencial, Sex::Male) => (0.0, 6.0),
            (BodyFatCategory::Atleta, Sex::Male) => (6.0, 14.0),
            (BodyFatCategory::Fitness, Sex::Male) => (14.0, 18.0),
            (BodyFatCategory::Aceitavel, Sex::Male) => (18.0, 25.0),
            (BodyFatCategory::Obesidade, Sex::Male) => (25.0, f64::INFINITY),
            (BodyFatCategory::Essencial, Sex::Female) => (0.0, 14.0),
            (BodyFatCategory::Atleta, Sex::Female) => (14.0, 21.0),
            (BodyFatCategory::Fitness, Sex::Female) => (21.0, 25.0),
            (BodyFatCategory::Aceitavel, Sex::Female) => (25.0, 32.0),
            (BodyFatCategory::Obesidade, Sex::Female) => (32.0, f64::INFINITY),
        }
    }

    pub const ALL: [BodyFatCategory; 5] = [
        BodyFatCategory::Essencial,
        BodyFatCategory::Atleta,
        BodyFatCategory::Fitness,
        BodyFatCategory::Aceitavel,
        BodyFatCategory::Obesidade,
    ];
}

/// Typed result of a body-fat evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyFatResult {
    /// Estimated body-fat percentage
    pub percent: f64,
    pub category: BodyFatCategory,
    pub method: BodyFatMethod,
    pub recommendations: Vec<String>,
}

impl From<BodyFatResult> for CalculationResult {
    fn from(result: BodyFatResult) -> Self {
        let interpretation = match result.method {
            BodyFatMethod::Navy => format!("Percentual de Gordura: {:.1}%", result.percent),
            BodyFatMethod::Bmi => {
                format!("Percentual de Gordura (via BMI): {:.1}%", result.percent)
            }
        };
        CalculationResult {
            value: round_to_tenth(result.percent),
            unit: "%".to_string(),
            interpretation,
            category: Some(result.category.label().to_string()),
            recommendations: result.recommendations,
        }
    }
}

/// Navy circumference formula
///
/// Men: `495 / (1.0324 - 0.19077 log10(waist - neck) + 0.15456 log10(height)) - 450`
/// Women: `495 / (1.29579 - 0.35004 log10(waist + hip - neck) + 0.22100 log10(height)) - 450`
///
/// The waist (plus hip for women) must exceed the neck circumference or the
/// logarithm is undefined; [`crate::validation::validate_body_fat`] rejects
/// such measurements before they reach the formula.
pub fn navy_body_fat(measurements: &NavyMeasurements) -> f64 {
    match *measurements {
        NavyMeasurements::Male {
            height_cm,
            waist_cm,
            neck_cm,
        } => {
            495.0
                / (1.0324 - 0.19077 * (waist_cm - neck_cm).log10()
                    + 0.15456 * height_cm.log10())
                - 450.0
        }
        NavyMeasurements::Female {
            height_cm,
            waist_cm,
            neck_cm,
            hip_cm,
        } => {
            495.0
                / (1.29579 - 0.35004 * (waist_cm + hip_cm - neck_cm).log10()
                    + 0.22100 * height_cm.log10())
                - 450.0
        }
    }
}

/// Deurenberg BMI formula
///
/// Men: `1.20 x BMI + 0.23 x age - 16.2`
/// Women: `1.20 x BMI + 0.23 x age - 5.4`
pub fn bmi_body_fat(measurements: &BmiMeasurements) -> f64 {
    let height_m = measurements.height_cm / 100.0;
    let bmi = measurements.weight_kg / (height_m * height_m);
    let age = f64::from(measurements.age_years);
    match measurements.sex {
        Sex::Male => 1.20 * bmi + 0.23 * age - 16.2,
        Sex::Female => 1.20 * bmi + 0.23 * age - 5.4,
    }
}

/// Classify a body-fat percentage into its sex-specific category
///
/// Total over all finite percentages; each value matches exactly one
/// category.
pub fn classify_body_fat(percent: f64, sex: Sex) -> BodyFatCategory {
    match sex {
        Sex::Male => {
            if percent < 6.0 {
                BodyFatCategory::Essencial
            } else if percent < 14.0 {
                BodyFatCategory::Atleta
            } else if percent < 18.0 {
                BodyFatCategory::Fitness
            } else if percent < 25.0 {
                BodyFatCategory::Aceitavel
            } else {
                BodyFatCategory::Obesidade
            }
        }
        Sex::Female => {
            if percent < 14.0 {
                BodyFatCategory::Essencial
            } else if percent < 21.0 {
                BodyFatCategory::Atleta
            } else if percent < 25.0 {
                BodyFatCategory::Fitness
            } else if percent < 32.0 {
                BodyFatCategory::Aceitavel
            } else {
                BodyFatCategory::Obesidade
            }
        }
    }
}

/// Lifestyle recommendations keyed by category (pt-BR)
pub fn body_fat_recommendations(category: BodyFatCategory) -> Vec<String> {
    let mut recommendations = vec![
        "Mantenha uma dieta balanceada e equilibrada".to_string(),
        "Pratique exercícios regularmente".to_string(),
    ];

    match category {
        BodyFatCategory::Essencial => {
            recommendations
                .push("Atenção: você pode estar com gordura corporal muito baixa".to_string());
            recommendations.push("Consulte um nutricionista para avaliação".to_string());
            recommendations.push("Monitore sua saúde regularmente".to_string());
        }
        BodyFatCategory::Atleta => {
            recommendations.push("Excelente composição corporal para atletas".to_string());
            recommendations
                .push("Mantenha o equilíbrio entre treino e recuperação".to_string());
            recommendations.push("Continue monitorando sua composição corporal".to_string());
        }
        BodyFatCategory::Fitness => {
            recommendations.push("Ótima composição corporal!".to_string());
            recommendations.push("Continue com seu programa de exercícios atual".to_string());
            recommendations.push("Foque na manutenção dos resultados".to_string());
        }
        BodyFatCategory::Aceitavel => {
            recommendations.push("Há espaço para melhoria na composição corporal".to_string());
            recommendations.push("Considere incluir exercícios de força".to_string());
            recommendations.push("Monitore sua alimentação mais de perto".to_string());
        }
        BodyFatCategory::Obesidade => {
            recommendations.push("Recomenda-se buscar orientação profissional".to_string());
            recommendations.push("Inicie um programa gradual de perda de peso".to_string());
            recommendations
                .push("Considere acompanhamento médico e nutricional".to_string());
            recommendations
                .push("Foque em mudanças de estilo de vida sustentáveis".to_string());
        }
    }

    recommendations
}

/// Evaluate a body-composition input
///
/// Pure function; the caller is responsible for pre-validation of the
/// numeric ranges. Missing-measurement failures cannot occur here because
/// the input type carries everything its branch needs.
pub fn evaluate(input: &BodyFatInput) -> BodyFatResult {
    let percent = match input {
        BodyFatInput::Navy(m) => navy_body_fat(m),
        BodyFatInput::Bmi(m) => bmi_body_fat(m),
    };
    let category = classify_body_fat(percent, input.sex());
    let recommendations = body_fat_recommendations(category);

    BodyFatResult {
        percent,
        category,
        method: input.method(),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_navy_male_reference_scenario() {
        // 175 cm, 85 cm waist, 38 cm neck -> low-to-mid teens
        let percent = navy_body_fat(&NavyMeasurements::Male {
            height_cm: 175.0,
            waist_cm: 85.0,
            neck_cm: 38.0,
        });
        assert!(percent > 10.0 && percent < 20.0, "got {percent}");
    }

    #[test]
    fn test_navy_female_scenario() {
        let percent = navy_body_fat(&NavyMeasurements::Female {
            height_cm: 165.0,
            waist_cm: 75.0,
            neck_cm: 33.0,
            hip_cm: 95.0,
        });
        assert!(percent > 15.0 && percent < 35.0, "got {percent}");
    }

    #[test]
    fn test_bmi_method_sex_offset() {
        // Same body, different sex: the female intercept adds 10.8 points
        let base = BmiMeasurements {
            height_cm: 175.0,
            weight_kg: 70.0,
            age_years: 30,
            sex: Sex::Male,
        };
        let male = bmi_body_fat(&base);
        let female = bmi_body_fat(&BmiMeasurements {
            sex: Sex::Female,
            ..base
        });
        assert!((female - male - 10.8).abs() < 1e-9);
    }

    #[test]
    fn test_bmi_method_reference_value() {
        // BMI 22.86, age 30, male -> 1.20*22.86 + 0.23*30 - 16.2 ~= 18.1
        let percent = bmi_body_fat(&BmiMeasurements {
            height_cm: 175.0,
            weight_kg: 70.0,
            age_years: 30,
            sex: Sex::Male,
        });
        assert!((percent - 18.1).abs() < 0.2);
    }

    #[rstest]
    #[case(Sex::Male, 4.0, BodyFatCategory::Essencial)]
    #[case(Sex::Male, 10.0, BodyFatCategory::Atleta)]
    #[case(Sex::Male, 15.0, BodyFatCategory::Fitness)]
    #[case(Sex::Male, 20.0, BodyFatCategory::Aceitavel)]
    #[case(Sex::Male, 30.0, BodyFatCategory::Obesidade)]
    #[case(Sex::Female, 12.0, BodyFatCategory::Essencial)]
    #[case(Sex::Female, 18.0, BodyFatCategory::Atleta)]
    #[case(Sex::Female, 23.0, BodyFatCategory::Fitness)]
    #[case(Sex::Female, 28.0, BodyFatCategory::Aceitavel)]
    #[case(Sex::Female, 35.0, BodyFatCategory::Obesidade)]
    fn test_category_table(
        #[case] sex: Sex,
        #[case] percent: f64,
        #[case] expected: BodyFatCategory,
    ) {
        assert_eq!(classify_body_fat(percent, sex), expected);
    }

    #[test]
    fn test_evaluate_navy_converts_to_result() {
        let result: CalculationResult = evaluate(&BodyFatInput::Navy(NavyMeasurements::Male {
            height_cm: 175.0,
            waist_cm: 85.0,
            neck_cm: 38.0,
        }))
        .into();
        assert_eq!(result.unit, "%");
        assert!(result.interpretation.starts_with("Percentual de Gordura:"));
        assert!(result.category.is_some());
    }

    #[test]
    fn test_evaluate_bmi_interpretation_names_method() {
        let result: CalculationResult = evaluate(&BodyFatInput::Bmi(BmiMeasurements {
            height_cm: 175.0,
            weight_kg: 70.0,
            age_years: 30,
            sex: Sex::Male,
        }))
        .into();
        assert!(result.interpretation.contains("via BMI"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: classification is total and matches exactly one
        /// declared category range
        #[test]
        fn prop_categories_total_and_exclusive(
            percent in 0.0f64..60.0,
            male in proptest::bool::ANY
        ) {
            let sex = if male { Sex::Male } else { Sex::Female };
            let category = classify_body_fat(percent, sex);
            let matching = BodyFatCategory::ALL
                .iter()
                .filter(|c| {
                    let (min, max) = c.range(sex);
                    percent >= min && percent < max
                })
                .count();
            prop_assert_eq!(matching, 1);
            let (min, max) = category.range(sex);
            prop_assert!(percent >= min && percent < max);
        }

        /// Property: Navy estimate grows with waist circumference
        #[test]
        fn prop_navy_monotonic_in_waist(
            waist in 60.0f64..150.0,
            delta in 1.0f64..40.0
        ) {
            let lo = navy_body_fat(&NavyMeasurements::Male {
                height_cm: 175.0,
                waist_cm: waist,
                neck_cm: 38.0,
            });
            let hi = navy_body_fat(&NavyMeasurements::Male {
                height_cm: 175.0,
                waist_cm: waist + delta,
                neck_cm: 38.0,
            });
            prop_assert!(hi > lo);
        }

        /// Property: BMI estimate grows with weight
        #[test]
        fn prop_bmi_monotonic_in_weight(
            weight in 30.0f64..200.0,
            delta in 1.0f64..50.0,
            age in 15u32..=80
        ) {
            let lo = bmi_body_fat(&BmiMeasurements {
                height_cm: 170.0, weight_kg: weight, age_years: age, sex: Sex::Female,
            });
            let hi = bmi_body_fat(&BmiMeasurements {
                height_cm: 170.0, weight_kg: weight + delta, age_years: age, sex: Sex::Female,
            });
            prop_assert!(hi > lo);
        }
    }
}
