//! Assessment protocol registry
//!
//! Describes the available protocols (name, category, difficulty, form
//! fields) and dispatches raw submissions through validation and
//! calculation. The descriptor metadata is what a client renders as the
//! assessment form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aerobic;
use crate::body_composition::{self, BodyFatMethod};
use crate::errors::CalculationError;
use crate::strength;
use crate::types::{CalculationResult, ProtocolId, ValidationReport};
use crate::validation::{
    validate_body_fat, validate_cooper_test, validate_one_rep_max, BodyFatForm, CooperTestForm,
    OneRepMaxForm,
};

/// Broad protocol grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolCategory {
    Cardio,
    Strength,
    BodyComposition,
}

/// How demanding the protocol is to administer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

/// Kind of form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    Select,
}

/// A choice offered by a select field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One field of a protocol's submission form
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Label shown to the user (pt-BR)
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub options: &'static [SelectOption],
}

impl FieldSpec {
    const fn number(
        name: &'static str,
        label: &'static str,
        required: bool,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number,
            required,
            min: Some(min),
            max: Some(max),
            options: &[],
        }
    }

    const fn select(name: &'static str, label: &'static str, options: &'static [SelectOption]) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Select,
            required: true,
            min: None,
            max: None,
            options,
        }
    }
}

/// Static description of one assessment protocol
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProtocolDescriptor {
    pub id: ProtocolId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ProtocolCategory,
    pub difficulty: Difficulty,
    pub fields: &'static [FieldSpec],
}

const GENDER_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "male", label: "Masculino" },
    SelectOption { value: "female", label: "Feminino" },
];

const EXERCISE_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "bench-press", label: "Supino Reto" },
    SelectOption { value: "squat", label: "Agachamento" },
    SelectOption { value: "deadlift", label: "Levantamento Terra" },
    SelectOption { value: "overhead-press", label: "Desenvolvimento" },
    SelectOption { value: "other", label: "Outro" },
];

const EXPERIENCE_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "beginner", label: "Iniciante (0-1 anos)" },
    SelectOption { value: "intermediate", label: "Intermediário (1-3 anos)" },
    SelectOption { value: "advanced", label: "Avançado (3+ anos)" },
];

const COOPER_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("distance", "Distância percorrida (metros)", true, 500.0, 5000.0),
    FieldSpec::number("age", "Idade (anos)", true, 15.0, 80.0),
    FieldSpec::select("gender", "Gênero", GENDER_OPTIONS),
    FieldSpec::number("weight", "Peso corporal (kg) - Opcional", false, 30.0, 200.0),
];

const ONE_RM_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("weight", "Peso levantado (kg)", true, 1.0, 500.0),
    FieldSpec::number("repetitions", "Número de repetições", true, 1.0, 20.0),
    FieldSpec::select("exercise", "Exercício", EXERCISE_OPTIONS),
    FieldSpec::select("experience", "Nível de experiência", EXPERIENCE_OPTIONS),
];

const BODY_FAT_NAVY_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("height", "Altura (cm)", true, 100.0, 250.0),
    FieldSpec::number("weight", "Peso (kg)", true, 30.0, 300.0),
    FieldSpec::number("waist", "Circunferência da cintura (cm)", true, 50.0, 200.0),
    FieldSpec::number("neck", "Circunferência do pescoço (cm)", true, 20.0, 60.0),
    FieldSpec::number("hip", "Circunferência do quadril (cm) - Mulheres", false, 60.0, 200.0),
    FieldSpec::number("age", "Idade (anos)", true, 15.0, 80.0),
    FieldSpec::select("gender", "Gênero", GENDER_OPTIONS),
];

const BODY_FAT_BMI_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("height", "Altura (cm)", true, 100.0, 250.0),
    FieldSpec::number("weight", "Peso (kg)", true, 30.0, 300.0),
    FieldSpec::number("age", "Idade (anos)", true, 15.0, 80.0),
    FieldSpec::select("gender", "Gênero", GENDER_OPTIONS),
];

static PROTOCOLS: [ProtocolDescriptor; 4] = [
    ProtocolDescriptor {
        id: ProtocolId::CooperTest,
        name: "Teste de Cooper",
        description: "Avalia a capacidade aeróbica através da distância percorrida em 12 minutos",
        category: ProtocolCategory::Cardio,
        difficulty: Difficulty::Basic,
        fields: COOPER_FIELDS,
    },
    ProtocolDescriptor {
        id: ProtocolId::OneRepMax,
        name: "Teste de 1RM",
        description: "Estima a força máxima para uma repetição baseado em repetições submáximas",
        category: ProtocolCategory::Strength,
        difficulty: Difficulty::Intermediate,
        fields: ONE_RM_FIELDS,
    },
    ProtocolDescriptor {
        id: ProtocolId::BodyFatNavy,
        name: "Percentual de Gordura (Método Navy)",
        description: "Calcula o percentual de gordura corporal usando medidas de circunferência",
        category: ProtocolCategory::BodyComposition,
        difficulty: Difficulty::Basic,
        fields: BODY_FAT_NAVY_FIELDS,
    },
    ProtocolDescriptor {
        id: ProtocolId::BodyFatBmi,
        name: "Percentual de Gordura (via BMI)",
        description: "Estima o percentual de gordura corporal baseado no IMC e dados demográficos",
        category: ProtocolCategory::BodyComposition,
        difficulty: Difficulty::Basic,
        fields: BODY_FAT_BMI_FIELDS,
    },
];

/// All registered protocols, in display order
pub fn all() -> &'static [ProtocolDescriptor] {
    &PROTOCOLS
}

/// Descriptor for one protocol
pub fn descriptor(id: ProtocolId) -> &'static ProtocolDescriptor {
    PROTOCOLS
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| unreachable!("every ProtocolId has a descriptor"))
}

/// A raw form submission: named numeric measurements plus enumerated
/// choices, exactly as entered. This is the shape recorded into history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    values: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    choices: BTreeMap<String, String>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn with_choice(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.choices.insert(name.into(), value.into());
        self
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn choice(&self, name: &str) -> Option<&str> {
        self.choices.get(name).map(String::as_str)
    }
}

/// Validate a raw submission against a protocol's constraints
pub fn validate(id: ProtocolId, raw: &RawInput) -> ValidationReport {
    match id {
        ProtocolId::CooperTest => validate_cooper_test(&CooperTestForm::from_raw(raw)),
        ProtocolId::OneRepMax => validate_one_rep_max(&OneRepMaxForm::from_raw(raw)),
        ProtocolId::BodyFatNavy => {
            validate_body_fat(&BodyFatForm::from_raw(raw).with_method(BodyFatMethod::Navy))
        }
        ProtocolId::BodyFatBmi => {
            validate_body_fat(&BodyFatForm::from_raw(raw).with_method(BodyFatMethod::Bmi))
        }
    }
}

/// Evaluate a raw submission
///
/// Converts the raw record into the protocol's typed input (surfacing
/// missing measurements and invalid choices) and runs the pure evaluator.
/// Callers are expected to run [`validate`] first; range violations are not
/// re-checked here.
pub fn evaluate(id: ProtocolId, raw: &RawInput) -> Result<CalculationResult, CalculationError> {
    match id {
        ProtocolId::CooperTest => {
            let input = CooperTestForm::from_raw(raw).into_input()?;
            Ok(aerobic::evaluate(&input).into())
        }
        ProtocolId::OneRepMax => {
            let input = OneRepMaxForm::from_raw(raw).into_input()?;
            Ok(strength::evaluate(&input).into())
        }
        ProtocolId::BodyFatNavy => {
            let input = BodyFatForm::from_raw(raw)
                .with_method(BodyFatMethod::Navy)
                .into_input()?;
            Ok(body_composition::evaluate(&input).into())
        }
        ProtocolId::BodyFatBmi => {
            let input = BodyFatForm::from_raw(raw)
                .with_method(BodyFatMethod::Bmi)
                .into_input()?;
            Ok(body_composition::evaluate(&input).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cooper_raw() -> RawInput {
        RawInput::new()
            .with_value("distance", 2400.0)
            .with_value("age", 25.0)
            .with_choice("gender", "male")
    }

    #[test]
    fn test_registry_exposes_all_protocols() {
        assert_eq!(all().len(), 4);
        for id in ProtocolId::ALL {
            assert_eq!(descriptor(id).id, id);
        }
    }

    #[test]
    fn test_descriptor_metadata() {
        let cooper = descriptor(ProtocolId::CooperTest);
        assert_eq!(cooper.name, "Teste de Cooper");
        assert_eq!(cooper.category, ProtocolCategory::Cardio);
        assert_eq!(cooper.fields.len(), 4);

        let navy = descriptor(ProtocolId::BodyFatNavy);
        assert!(navy.fields.iter().any(|f| f.name == "hip" && !f.required));
    }

    #[test]
    fn test_validate_then_evaluate_cooper() {
        let raw = cooper_raw();
        assert!(validate(ProtocolId::CooperTest, &raw).is_valid);

        let result = evaluate(ProtocolId::CooperTest, &raw).unwrap();
        assert_eq!(result.value, 42.4);
        assert_eq!(result.category.as_deref(), Some("Bom"));
    }

    #[test]
    fn test_evaluate_one_rep_max_without_body_weight() {
        let raw = RawInput::new()
            .with_value("weight", 80.0)
            .with_value("repetitions", 8.0)
            .with_choice("exercise", "bench-press")
            .with_choice("experience", "intermediate");
        let result = evaluate(ProtocolId::OneRepMax, &raw).unwrap();
        assert!(result.value > 95.0 && result.value < 105.0);
        assert_eq!(result.category.as_deref(), Some("Não avaliado"));
    }

    #[test]
    fn test_evaluate_navy_female_without_hip_is_error() {
        let raw = RawInput::new()
            .with_value("height", 165.0)
            .with_value("weight", 60.0)
            .with_value("age", 30.0)
            .with_value("waist", 75.0)
            .with_value("neck", 33.0)
            .with_choice("gender", "female");
        let err = evaluate(ProtocolId::BodyFatNavy, &raw).unwrap_err();
        assert!(matches!(
            err,
            CalculationError::MissingMeasurement("quadril")
        ));
    }

    #[test]
    fn test_evaluate_bmi_protocol() {
        let raw = RawInput::new()
            .with_value("height", 175.0)
            .with_value("weight", 70.0)
            .with_value("age", 30.0)
            .with_choice("gender", "male");
        let result = evaluate(ProtocolId::BodyFatBmi, &raw).unwrap();
        assert_eq!(result.unit, "%");
        assert!((result.value - 18.1).abs() < 0.2);
    }

    #[test]
    fn test_validate_reports_all_violations() {
        let raw = RawInput::new()
            .with_value("distance", 100.0)
            .with_value("age", 10.0)
            .with_choice("gender", "other");
        let report = validate(ProtocolId::CooperTest, &raw);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn test_raw_input_serde_round_trip() {
        let raw = cooper_raw();
        let json = serde_json::to_string(&raw).unwrap();
        let back: RawInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, raw);
        assert_eq!(back.number("distance"), Some(2400.0));
        assert_eq!(back.choice("gender"), Some("male"));
    }
}
