//! Parse LLM output into a validated analysis

use medreport_domain::{MedicalAnalysis, SchemaError};

/// Parse and validate the model's JSON response
///
/// A surrounding markdown code fence is removed first; everything else must
/// match the schema exactly.
pub fn parse_analysis_response(response: &str) -> Result<MedicalAnalysis, SchemaError> {
    MedicalAnalysis::from_json(strip_code_fence(response))
}

/// Parse without tolerating code fences
pub(crate) fn parse_raw_response(response: &str) -> Result<MedicalAnalysis, SchemaError> {
    MedicalAnalysis::from_json(response)
}

/// Remove a ```json ... ``` (or bare ```) wrapper if present
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json"); the body may start on the same line
    let info_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let body = rest[info_len..].trim();

    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medreport_domain::Severity;

    const VALID: &str = r#"{
        "severity_analysis": "Low",
        "key_abnormal_findings": ["Vitamin D slightly low"],
        "precautions_and_next_steps": ["Spend time outdoors"],
        "medication_suggestion": "CONSULT A DOCTOR. This AI cannot prescribe medications.",
        "physician_recommendation": "No urgent visit needed.",
        "recommended_doctor_type": "General Practitioner"
    }"#;

    #[test]
    fn test_parse_valid_json() {
        let analysis = parse_analysis_response(VALID).unwrap();
        assert_eq!(analysis.severity_analysis(), Severity::Low);
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = format!("```json\n{}\n```", VALID);
        assert!(parse_analysis_response(&response).is_ok());
        assert!(parse_raw_response(&response).is_err());
    }

    #[test]
    fn test_parse_json_with_bare_fence() {
        let response = format!("```\n{}\n```\n", VALID);
        assert!(parse_analysis_response(&response).is_ok());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_analysis_response("This is not JSON");
        assert!(matches!(result, Err(SchemaError::MalformedJson(_))));
    }

    #[test]
    fn test_strip_code_fence_plain() {
        assert_eq!(strip_code_fence("  {\"key\": 1}  "), "{\"key\": 1}");
    }

    #[test]
    fn test_strip_code_fence_unterminated() {
        assert_eq!(strip_code_fence("```json\n{\"key\": 1}"), "{\"key\": 1}");
    }

    #[test]
    fn test_parse_single_line_fence_with_info_string() {
        let one_line = VALID.replace('\n', " ");
        let response = format!("```json {}```", one_line);
        assert!(parse_analysis_response(&response).is_ok());
    }

    #[test]
    fn test_strip_code_fence_single_line() {
        assert_eq!(strip_code_fence("```json {\"key\": 1}```"), "{\"key\": 1}");
        assert_eq!(strip_code_fence("```JSON{\"key\": 1}```"), "{\"key\": 1}");
        assert_eq!(strip_code_fence("```{\"key\": 1}```"), "{\"key\": 1}");
    }

    #[test]
    fn test_strip_code_fence_body_on_opening_line() {
        assert_eq!(
            strip_code_fence("```{\n  \"key\": 1\n}\n```"),
            "{\n  \"key\": 1\n}"
        );
    }
}
