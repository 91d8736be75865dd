//! Doctor type module - closed set of specialist categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of medical professional recommended for follow-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoctorType {
    /// Primary care
    #[serde(rename = "General Practitioner")]
    GeneralPractitioner,

    /// Heart and blood vessels
    #[serde(rename = "Cardiologist")]
    Cardiologist,

    /// Hormones and metabolism
    #[serde(rename = "Endocrinologist")]
    Endocrinologist,

    /// Cancer
    #[serde(rename = "Oncologist")]
    Oncologist,

    /// Children
    #[serde(rename = "Pediatrician")]
    Pediatrician,

    /// Digestive system
    #[serde(rename = "Gastroenterologist")]
    Gastroenterologist,

    /// Any specialty not listed above
    #[serde(rename = "Other Specialist")]
    OtherSpecialist,
}

impl DoctorType {
    /// Every category
    pub const ALL: [DoctorType; 7] = [
        DoctorType::GeneralPractitioner,
        DoctorType::Cardiologist,
        DoctorType::Endocrinologist,
        DoctorType::Oncologist,
        DoctorType::Pediatrician,
        DoctorType::Gastroenterologist,
        DoctorType::OtherSpecialist,
    ];

    /// Get the wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorType::GeneralPractitioner => "General Practitioner",
            DoctorType::Cardiologist => "Cardiologist",
            DoctorType::Endocrinologist => "Endocrinologist",
            DoctorType::Oncologist => "Oncologist",
            DoctorType::Pediatrician => "Pediatrician",
            DoctorType::Gastroenterologist => "Gastroenterologist",
            DoctorType::OtherSpecialist => "Other Specialist",
        }
    }

    /// Parse a wire label (exact match)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|doctor| doctor.as_str() == s)
    }
}

impl fmt::Display for DoctorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DoctorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid doctor type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_labels() {
        for doctor in DoctorType::ALL {
            assert_eq!(DoctorType::parse(doctor.as_str()), Some(doctor));
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(DoctorType::parse("Neurologist"), None);
        assert_eq!(DoctorType::parse("cardiologist"), None);
    }

    #[test]
    fn test_display_matches_wire_label() {
        assert_eq!(DoctorType::OtherSpecialist.to_string(), "Other Specialist");
    }
}
