//! Instruction text sent to the model alongside every uploaded W-2 image.

const W2_PROMPT: &str = r#"Please extract all the filled-out fields from the attached W-2 form and return the result in json format.
⚠️ Important Instructions:
- Only include fields that are filled.
- Keep the key names exactly as written on the W-2 form (e.g., "Wages, tips, other compensation", "Federal income tax withheld").
- If any fields appear more than once, pick the most clearly filled instance.
- Skip decorative or empty parts.
- Maintain clear, clean formatting.
📦 Example output format:
{
  "Employee’s social security number": "XXX-XX-XXXX",
  "Employer identification number (EIN)": "12-3456789",
  "Wages, tips, other compensation": "$45,000.00",
  "Federal income tax withheld": "$3,500.00",
  "Social security wages": "$45,000.00",
  "Social security tax withheld": "$2,790.00"
}"#;

/// Returns the fixed W-2 field extraction prompt.
///
/// The text asks for filled fields only, keyed by the label printed on the
/// form, and ends with an example object so the model answers with a flat
/// JSON object of strings.
pub fn w2_prompt() -> &'static str {
    W2_PROMPT
}
