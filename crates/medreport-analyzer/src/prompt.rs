//! LLM prompt engineering for report analysis

use medreport_domain::MEDICATION_DISCLAIMER;

/// Persona and rules sent as the system instruction
pub const SYSTEM_INSTRUCTION: &str = "You are a highly analytical, empathetic, and CAUTIOUS AI medical assistant. \
Your analysis must be strictly based on the provided text. \
You MUST return the results in the exact JSON schema provided. \
ALWAYS include a prominent disclaimer.";

const ANALYSIS_INSTRUCTIONS: &str = "Analyze the following raw medical report text from a patient's lab/imaging report. \
Extract the key abnormal data points and provide a severity analysis, \
precautions, and a clear physician recommendation, \
strictly adhering to the requested JSON schema.";

/// Builds the system instruction and user prompt for one report
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// System instruction for the model
    pub fn system_instruction(&self) -> String {
        format!(
            "{} The medication_suggestion field must start with: '{}'",
            SYSTEM_INSTRUCTION, MEDICATION_DISCLAIMER
        )
    }

    /// Build the user prompt
    ///
    /// The report is wrapped in `---` sentinels so it cannot be mistaken for
    /// instructions.
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(ANALYSIS_INSTRUCTIONS.len() + self.text.len() + 32);
        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str(" \n\n");
        prompt.push_str("MEDICAL REPORT TEXT:\n");
        prompt.push_str("---");
        prompt.push_str(&self.text);
        prompt.push_str("---");
        prompt
    }
}
