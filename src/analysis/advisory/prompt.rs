//! Prompt construction for the advisory path: the system instruction that
//! mandates the JSON output contract, and the bounded context block built
//! from one symptom report.

use crate::analysis::types::SymptomReport;

pub const TRIAGE_SYSTEM_PROMPT: &str = r#"You are a cautious symptom triage assistant for a consumer health app. You are NOT a doctor and you never diagnose; you suggest possibilities to discuss with a clinician and how urgently to seek care.

ABSOLUTE RULES — NO EXCEPTIONS:
1. Respond with a single JSON object and nothing else. No prose before or after it.
2. The object MUST contain: "triageLevel" (exactly one of "low", "medium", "high"), "conditions" (non-empty array), "actions" (non-empty string), "confidenceScore" (number between 0.0 and 1.0).
3. Every entry of "conditions" MUST contain "name", "likelihood" (number 0-100), and "recommendation". It MAY contain "reasoning", "confidenceTier" ("high" | "medium" | "low"), "references" (array of strings), and "selfCare".
4. The object MAY contain "reasoning" and "limitationsNote".
5. When torn between two triage levels, choose the more urgent one.
6. Signs of a cardiac event, stroke, or breathing difficulty are always "high" with actions directing emergency services.
7. Phrase conditions as possibilities ("possible ...", "consistent with ..."), never as diagnoses."#;

/// Build the bounded natural-language context block for one report.
///
/// The description is expected to be sanitized already; it is wrapped in
/// delimiter tags so the model cannot confuse it with instructions.
pub fn build_context_block(report: &SymptomReport) -> String {
    let mut block = String::new();

    block.push_str("<SYMPTOM_DESCRIPTION>\n");
    block.push_str(&report.description);
    block.push_str("\n</SYMPTOM_DESCRIPTION>\n\n");

    block.push_str("<INTERVIEW_ANSWERS>\n");
    block.push_str(&format!("pain scale: {}/10\n", report.answers.pain_scale));
    block.push_str(&format!(
        "fever: {}\n",
        if report.answers.fever { "yes" } else { "no" }
    ));
    block.push_str(&format!("duration: {}\n", report.answers.duration.label()));
    block.push_str(&format!(
        "body location: {}\n",
        report.answers.body_location.label()
    ));
    block.push_str("</INTERVIEW_ANSWERS>\n");

    if let Some(demo) = &report.demographics {
        let mut lines = Vec::new();
        if let Some(age) = demo.age {
            lines.push(format!("age: {age}"));
        }
        if let Some(sex) = demo.sex {
            lines.push(format!("sex: {sex:?}").to_lowercase());
        }
        if let Some(profile) = demo.profile {
            lines.push(format!("profile: {profile:?}").to_lowercase());
        }
        if !lines.is_empty() {
            block.push_str("\n<PATIENT_CONTEXT>\n");
            for line in lines {
                block.push_str(&line);
                block.push('\n');
            }
            block.push_str("</PATIENT_CONTEXT>\n");
        }
    }

    block.push_str("\nAssess the symptoms above. Respond with the JSON object only.");
    block
}
