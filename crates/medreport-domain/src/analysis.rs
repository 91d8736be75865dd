//! MedicalAnalysis - the structured result of analyzing one report

use crate::{DoctorType, SchemaError, Severity};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Disclaimer every `medication_suggestion` is asked to start with
pub const MEDICATION_DISCLAIMER: &str = "CONSULT A DOCTOR. This AI cannot prescribe medications.";

/// Structured analysis of a medical report
///
/// Produced once per request, either by validating the LLM's JSON output or
/// through [`MedicalAnalysis::new`] with typed values. There are no setters:
/// the value is rendered or serialized and then discarded.
///
/// # Examples
///
/// ```
/// use medreport_domain::{DoctorType, MedicalAnalysis, Severity};
///
/// let analysis = MedicalAnalysis::new(
///     Severity::Moderate,
///     vec!["Blood pressure is elevated (160/100)".to_string()],
///     vec!["Monitor blood pressure daily".to_string()],
///     "CONSULT A DOCTOR. This AI cannot prescribe medications.".to_string(),
///     "Schedule a visit within two weeks.".to_string(),
///     DoctorType::Cardiologist,
/// );
///
/// let restored = MedicalAnalysis::from_fields(&analysis.to_fields()).unwrap();
/// assert_eq!(analysis, restored);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalAnalysis {
    severity_analysis: Severity,
    key_abnormal_findings: Vec<String>,
    precautions_and_next_steps: Vec<String>,
    medication_suggestion: String,
    physician_recommendation: String,
    recommended_doctor_type: DoctorType,
}

impl MedicalAnalysis {
    /// Field names, in schema order
    pub const FIELDS: [&'static str; 6] = [
        "severity_analysis",
        "key_abnormal_findings",
        "precautions_and_next_steps",
        "medication_suggestion",
        "physician_recommendation",
        "recommended_doctor_type",
    ];

    /// Create an analysis from typed values
    pub fn new(
        severity_analysis: Severity,
        key_abnormal_findings: Vec<String>,
        precautions_and_next_steps: Vec<String>,
        medication_suggestion: String,
        physician_recommendation: String,
        recommended_doctor_type: DoctorType,
    ) -> Self {
        Self {
            severity_analysis,
            key_abnormal_findings,
            precautions_and_next_steps,
            medication_suggestion,
            physician_recommendation,
            recommended_doctor_type,
        }
    }

    /// Parse and validate raw JSON text
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the text is not JSON, is not an object,
    /// misses a field, has a field of the wrong type, or carries a value
    /// outside one of the closed sets.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_fields(&value)
    }

    /// Validate a field mapping
    pub fn from_fields(value: &Value) -> Result<Self, SchemaError> {
        let obj = value.as_object().ok_or(SchemaError::NotAnObject)?;

        let severity_label = required_str(obj, "severity_analysis")?;
        let severity_analysis = Severity::parse(severity_label)
            .ok_or_else(|| SchemaError::UnknownSeverity(severity_label.to_string()))?;

        let key_abnormal_findings = required_str_list(obj, "key_abnormal_findings")?;
        let precautions_and_next_steps = required_str_list(obj, "precautions_and_next_steps")?;
        let medication_suggestion = required_str(obj, "medication_suggestion")?.to_string();
        let physician_recommendation = required_str(obj, "physician_recommendation")?.to_string();

        let doctor_label = required_str(obj, "recommended_doctor_type")?;
        let recommended_doctor_type = DoctorType::parse(doctor_label)
            .ok_or_else(|| SchemaError::UnknownDoctorType(doctor_label.to_string()))?;

        Ok(Self {
            severity_analysis,
            key_abnormal_findings,
            precautions_and_next_steps,
            medication_suggestion,
            physician_recommendation,
            recommended_doctor_type,
        })
    }

    /// Serialize to a field mapping
    pub fn to_fields(&self) -> Value {
        let mut fields = Map::new();
        fields.insert(
            "severity_analysis".to_string(),
            Value::from(self.severity_analysis.as_str()),
        );
        fields.insert(
            "key_abnormal_findings".to_string(),
            Value::from(self.key_abnormal_findings.clone()),
        );
        fields.insert(
            "precautions_and_next_steps".to_string(),
            Value::from(self.precautions_and_next_steps.clone()),
        );
        fields.insert(
            "medication_suggestion".to_string(),
            Value::from(self.medication_suggestion.clone()),
        );
        fields.insert(
            "physician_recommendation".to_string(),
            Value::from(self.physician_recommendation.clone()),
        );
        fields.insert(
            "recommended_doctor_type".to_string(),
            Value::from(self.recommended_doctor_type.as_str()),
        );
        Value::Object(fields)
    }

    /// Overall severity
    pub fn severity_analysis(&self) -> Severity {
        self.severity_analysis
    }

    /// Most important abnormal findings, in patient-friendly language
    pub fn key_abnormal_findings(&self) -> &[String] {
        &self.key_abnormal_findings
    }

    /// Actionable precautions and next steps
    pub fn precautions_and_next_steps(&self) -> &[String] {
        &self.precautions_and_next_steps
    }

    /// Cautious medication note
    pub fn medication_suggestion(&self) -> &str {
        &self.medication_suggestion
    }

    /// Whether and how urgently to see a doctor
    pub fn physician_recommendation(&self) -> &str {
        &self.physician_recommendation
    }

    /// Recommended specialist
    pub fn recommended_doctor_type(&self) -> DoctorType {
        self.recommended_doctor_type
    }

    /// Whether the medication note opens with the mandated disclaimer
    pub fn has_medication_disclaimer(&self) -> bool {
        self.medication_suggestion
            .trim_start()
            .starts_with(MEDICATION_DISCLAIMER)
    }
}

fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, SchemaError> {
    obj.get(field).ok_or(SchemaError::MissingField(field))
}

fn required_str<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, SchemaError> {
    required(obj, field)?
        .as_str()
        .ok_or(SchemaError::WrongType {
            field,
            expected: "a string",
        })
}

fn required_str_list(obj: &Map<String, Value>, field: &'static str) -> Result<Vec<String>, SchemaError> {
    let wrong_type = SchemaError::WrongType {
        field,
        expected: "an array of strings",
    };

    required(obj, field)?
        .as_array()
        .ok_or_else(|| wrong_type.clone())?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(|| wrong_type.clone()))
        .collect()
}
