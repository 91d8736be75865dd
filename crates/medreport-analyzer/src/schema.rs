//! Response schema sent with every generation request
//!
//! Gemini accepts an OpenAPI-subset schema. Enum lists come straight from the
//! domain's closed sets so the schema and the validator cannot drift apart.

use medreport_domain::{DoctorType, MedicalAnalysis, Severity, MEDICATION_DISCLAIMER};
use serde_json::{json, Value};

/// Schema for `MedicalAnalysis`
pub fn response_schema() -> Value {
    let severities: Vec<&str> = Severity::ALL.iter().map(|s| s.as_str()).collect();
    let doctor_types: Vec<&str> = DoctorType::ALL.iter().map(|d| d.as_str()).collect();

    json!({
        "type": "OBJECT",
        "description": "Structured data output for the medical report analysis.",
        "properties": {
            "severity_analysis": {
                "type": "STRING",
                "format": "enum",
                "enum": severities,
                "description": "Overall severity level based on the report findings."
            },
            "key_abnormal_findings": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 3-5 most critical or abnormal findings from the report in patient-friendly language."
            },
            "precautions_and_next_steps": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Clear, actionable steps and precautions the patient should take immediately (e.g., monitor blood pressure, change diet)."
            },
            "medication_suggestion": {
                "type": "STRING",
                "description": format!(
                    "A cautious suggestion regarding potential medication/supplement needs. Must start with a strong disclaimer: '{}'",
                    MEDICATION_DISCLAIMER
                )
            },
            "physician_recommendation": {
                "type": "STRING",
                "description": "A clear instruction on whether a doctor's visit is required and how urgent it is."
            },
            "recommended_doctor_type": {
                "type": "STRING",
                "format": "enum",
                "enum": doctor_types,
                "description": "The recommended type of medical professional to visit based on the primary findings."
            }
        },
        "required": MedicalAnalysis::FIELDS,
        "propertyOrdering": MedicalAnalysis::FIELDS
    })
}
