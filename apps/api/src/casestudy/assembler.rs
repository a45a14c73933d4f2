//! Prompt Assembler — turns the submitted form into the generation prompt.
//!
//! Pure functions only: deterministic output for a given form, no I/O.
//! A thematic section is emitted only when at least one of its fields has
//! non-blank content, and only the non-blank fields are emitted, so the
//! assembled prompt never contains a heading with an empty body.

use crate::casestudy::models::CaseStudyForm;
use crate::casestudy::prompts::CASE_STUDY_PROMPT_TEMPLATE;
use crate::errors::AppError;

/// Labels for the six fields that must be non-blank before generation.
const REQUIRED_FIELDS: &[(&str, fn(&CaseStudyForm) -> &str)] = &[
    ("Case Study Title", |f| &f.case_study_title),
    ("Author's Name", |f| &f.author_name),
    ("Course Level", |f| &f.course_level),
    ("Educational Context", |f| &f.educational_context),
    ("Problem, Opportunity, or Goal", |f| &f.problem_goal),
    ("AI Tools or Platforms", |f| &f.ai_tools),
];

/// Rejects the form if any required field is blank after trimming.
/// Must run before any completion call is made.
pub fn validate_form(form: &CaseStudyForm) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .filter(|(_, get)| get(form).trim().is_empty())
        .map(|(label, _)| *label)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Concatenates the non-empty thematic sections as `Title` headings with
/// `Label: value` lines, omitting blank fields and empty sections.
pub fn assemble_sections(form: &CaseStudyForm) -> String {
    let mut out = String::new();

    for section in form.sections() {
        let non_blank: Vec<(&str, &str)> = section
            .fields
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(label, value)| (*label, value.trim()))
            .collect();

        if non_blank.is_empty() {
            continue;
        }

        out.push_str(&format!("\n\n{}\n", section.title));
        for (label, value) in non_blank {
            out.push_str(&format!("\n{label}: {value}\n"));
        }
    }

    out
}

/// Builds the full case-study generation prompt from the form.
pub fn build_generation_prompt(form: &CaseStudyForm) -> String {
    CASE_STUDY_PROMPT_TEMPLATE.replace("{sections}", &assemble_sections(form))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> CaseStudyForm {
        CaseStudyForm {
            case_study_title: "AI in Biology Courses".to_string(),
            author_name: "Jane Doe".to_string(),
            course_level: "Undergraduate".to_string(),
            educational_context: "Intro biology, 200 students".to_string(),
            problem_goal: "Improve feedback turnaround".to_string(),
            ai_tools: "GPT-4 via a tutoring interface".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_passes_with_required_fields() {
        assert!(validate_form(&complete_form()).is_ok());
    }

    #[test]
    fn test_validation_fails_with_blank_title() {
        let mut form = complete_form();
        form.case_study_title = "   ".to_string();
        let err = validate_form(&form).unwrap_err();
        assert!(err.to_string().contains("Case Study Title"));
    }

    #[test]
    fn test_validation_lists_all_missing_fields() {
        let form = CaseStudyForm::default();
        let err = validate_form(&form).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Case Study Title"));
        assert!(msg.contains("Author's Name"));
        assert!(msg.contains("Course Level"));
        assert!(msg.contains("Educational Context"));
        assert!(msg.contains("Problem, Opportunity, or Goal"));
        assert!(msg.contains("AI Tools or Platforms"));
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        // Only the six required fields gate generation
        let form = complete_form();
        assert!(form.impact.is_empty());
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let form = complete_form();
        let sections = assemble_sections(&form);
        assert!(sections.contains("1. Introduction and Context of AI Use"));
        assert!(sections.contains("2. Description of AI Technology"));
        // Sections 3-7 have no content and must not appear
        assert!(!sections.contains("3. Implementation Process"));
        assert!(!sections.contains("7. Sustainability and Future AI Use"));
    }

    #[test]
    fn test_blank_fields_within_a_section_are_omitted() {
        let mut form = complete_form();
        form.preparation_phase = "Faculty workshops over two weeks".to_string();
        let sections = assemble_sections(&form);
        assert!(sections.contains("3. Implementation Process"));
        assert!(sections.contains("Preparation Phase: Faculty workshops over two weeks"));
        assert!(!sections.contains("Execution Phase:"));
        assert!(!sections.contains("Post-deployment Support:"));
    }

    #[test]
    fn test_field_values_are_trimmed() {
        let mut form = complete_form();
        form.course_level = "  Undergraduate  ".to_string();
        let sections = assemble_sections(&form);
        assert!(sections.contains("Course Level: Undergraduate\n"));
    }

    #[test]
    fn test_no_heading_without_body() {
        // Every emitted heading must be followed by at least one field line
        let mut form = complete_form();
        form.inclusivity = "Screen-reader compatible UI".to_string();
        let sections = assemble_sections(&form);
        for title in [
            "1. Introduction and Context of AI Use",
            "2. Description of AI Technology",
            "4. Ethical and Inclusive Considerations",
        ] {
            let idx = sections.find(title).unwrap();
            let after = &sections[idx + title.len()..];
            assert!(
                after.trim_start().contains(':'),
                "heading '{title}' has no field lines"
            );
        }
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let form = complete_form();
        assert_eq!(assemble_sections(&form), assemble_sections(&form));
    }

    #[test]
    fn test_generation_prompt_embeds_sections() {
        let form = complete_form();
        let prompt = build_generation_prompt(&form);
        assert!(prompt.contains("Course Level: Undergraduate"));
        assert!(prompt.contains("(placeholder: topic)"));
        assert!(!prompt.contains("{sections}"));
    }
}
