//! Prompt sent to the completion model when guidance is requested

use derm_core::SectionKind;

pub const SYSTEM_PROMPT: &str = "You are a medical expert specializing in dermatology. Provide clear, structured information using only plain text. Use consistent formatting with clear section headers and simple line breaks between items. Do not use any special characters or formatting.";

/// What each section should contain, in request order
fn section_brief(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Overview => {
            "Provide a clear overview of the condition, including affected areas, appearance, and typical patient demographics."
        }
        SectionKind::Symptoms => {
            "List all common symptoms and signs, including early warning signs and how symptoms progress."
        }
        SectionKind::Treatment => {
            "List all available treatment options, including medical treatments, home remedies, and recommended medications."
        }
        SectionKind::MedicalCare => {
            "List specific warning signs, emergency symptoms, and risk factors that require medical attention."
        }
        SectionKind::Prevention => {
            "List lifestyle recommendations, preventive measures, and daily care tips."
        }
    }
}

const FORMATTING_RULES: &str = "Important formatting rules:
1. Use only plain text - no special characters, bullet points, or markdown
2. Each section should start with the exact section name followed by a colon
3. Each item should be on a new line
4. Do not use any special characters like •, -, or *
5. Keep the information clear and concise
6. Ensure all sections are filled with relevant information";

/// Build the user prompt for a disease.
///
/// Section headers come from `SectionKind::marker`, so the parser and the
/// prompt cannot drift apart.
pub fn guidance_prompt(disease: &str) -> String {
    let mut prompt = format!(
        "Provide comprehensive medical information about {}. Format your response exactly as follows:\n\n",
        disease
    );
    for kind in SectionKind::ALL {
        prompt.push_str(kind.marker());
        prompt.push('\n');
        prompt.push_str(section_brief(kind));
        prompt.push_str("\n\n");
    }
    prompt.push_str(FORMATTING_RULES);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_disease_and_every_marker_in_order() {
        let prompt = guidance_prompt("Urticaria Hives");
        assert!(prompt.contains("about Urticaria Hives."));

        let positions: Vec<usize> = SectionKind::ALL
            .iter()
            .map(|kind| prompt.find(kind.marker()).expect("marker present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(prompt.ends_with("relevant information"));
    }
}
