//! Data model for one case-study submission.
//!
//! Everything here is transient: a form comes in, a result goes into the
//! session store, and the next submission replaces it wholesale. There is
//! no persisted schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The full form as submitted by the SPA. Field names are camelCase on the
/// wire to match the form's `formData` object. Every field is free text;
/// blank means "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseStudyForm {
    pub case_study_title: String,
    pub author_name: String,

    // 1. Introduction and Context of AI Use
    pub course_level: String,
    pub educational_context: String,
    pub problem_goal: String,

    // 2. Description of AI Technology
    pub ai_tools: String,
    pub ai_functionality: String,
    pub ai_justification: String,

    // 3. Implementation Process
    pub preparation_phase: String,
    pub execution_phase: String,
    pub post_deployment: String,

    // 4. Ethical and Inclusive Considerations
    pub ethical_practices: String,
    pub inclusivity: String,
    pub edi_principles: String,

    // 5. Outcomes and Educational Impact
    pub impact: String,
    pub evidence: String,
    pub critical_reflection: String,

    // 6. Challenges and Limitations
    pub challenges: String,
    pub mitigation_strategies: String,
    pub reflective_insights: String,

    // 7. Sustainability and Future AI Use
    pub future_plans: String,
    pub future_research: String,
    pub recommendations: String,

    pub acknowledgements: String,
}

/// One thematic section of the form: a heading plus its labeled fields.
/// A section is "present" only if at least one field is non-blank.
pub struct Section<'a> {
    pub title: &'static str,
    pub fields: [(&'static str, &'a str); 3],
}

impl CaseStudyForm {
    /// The seven thematic sections in generation order. Blank-field
    /// filtering happens in the assembler, not here.
    pub fn sections(&self) -> [Section<'_>; 7] {
        [
            Section {
                title: "1. Introduction and Context of AI Use",
                fields: [
                    ("Course Level", &self.course_level),
                    ("Educational Context", &self.educational_context),
                    ("Problem, Opportunity, or Goal", &self.problem_goal),
                ],
            },
            Section {
                title: "2. Description of AI Technology",
                fields: [
                    ("AI Tools or Platforms", &self.ai_tools),
                    ("AI Functionality", &self.ai_functionality),
                    ("Technology Justification", &self.ai_justification),
                ],
            },
            Section {
                title: "3. Implementation Process",
                fields: [
                    ("Preparation Phase", &self.preparation_phase),
                    ("Execution Phase", &self.execution_phase),
                    ("Post-deployment Support", &self.post_deployment),
                ],
            },
            Section {
                title: "4. Ethical and Inclusive Considerations",
                fields: [
                    ("Ethical AI Practices", &self.ethical_practices),
                    ("Inclusivity and Accessibility", &self.inclusivity),
                    ("EDI Principles", &self.edi_principles),
                ],
            },
            Section {
                title: "5. Outcomes and Educational Impact",
                fields: [
                    ("AI Impact", &self.impact),
                    ("Evidence of Impact", &self.evidence),
                    ("Critical Reflection", &self.critical_reflection),
                ],
            },
            Section {
                title: "6. Challenges and Limitations of AI Implementation",
                fields: [
                    ("Challenges and Barriers", &self.challenges),
                    ("Mitigation Strategies", &self.mitigation_strategies),
                    ("Reflective Insights", &self.reflective_insights),
                ],
            },
            Section {
                title: "7. Sustainability and Future AI Use",
                fields: [
                    ("Future Plans", &self.future_plans),
                    ("Future Research", &self.future_research),
                    ("Recommendations", &self.recommendations),
                ],
            },
        ]
    }
}

/// The finished output of one pipeline run. Overwritten wholesale on each
/// new submission; no versioning or history.
#[derive(Debug, Clone, Serialize)]
pub struct CaseStudyResult {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    /// Final case-study body (citations integrated or fallback-substituted).
    pub case_study: String,
    /// Full reference strings, in resolution order.
    pub references: Vec<String>,
    pub guiding_questions: String,
    pub acknowledgements: String,
    pub generated_at: DateTime<Utc>,
}

impl CaseStudyResult {
    /// Composes the downloadable markdown document: title header, author
    /// line, body, and the optional acknowledgements block.
    pub fn to_markdown(&self) -> String {
        let mut doc = format!(
            "# {}\n\n**Author:** {}\n\n{}",
            self.title, self.author, self.case_study
        );
        if !self.acknowledgements.trim().is_empty() {
            doc.push_str(&format!(
                "\n\n**Acknowledgements**\n{}",
                self.acknowledgements.trim()
            ));
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_acknowledgements(ack: &str) -> CaseStudyResult {
        CaseStudyResult {
            id: Uuid::new_v4(),
            title: "Implementing AI in Undergraduate Biology".to_string(),
            author: "Jane Doe".to_string(),
            case_study: "Body text.".to_string(),
            references: vec![],
            guiding_questions: String::new(),
            acknowledgements: ack.to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_form_deserializes_camel_case() {
        let json = serde_json::json!({
            "caseStudyTitle": "AI in Biology",
            "authorName": "Jane Doe",
            "courseLevel": "Undergraduate",
            "aiTools": "GPT-4"
        });
        let form: CaseStudyForm = serde_json::from_value(json).unwrap();
        assert_eq!(form.case_study_title, "AI in Biology");
        assert_eq!(form.course_level, "Undergraduate");
        // Unspecified fields default to empty rather than failing
        assert!(form.educational_context.is_empty());
    }

    #[test]
    fn test_sections_are_in_fixed_order() {
        let form = CaseStudyForm::default();
        let sections = form.sections();
        assert_eq!(sections.len(), 7);
        assert_eq!(sections[0].title, "1. Introduction and Context of AI Use");
        assert_eq!(sections[6].title, "7. Sustainability and Future AI Use");
    }

    #[test]
    fn test_markdown_includes_title_and_author() {
        let doc = result_with_acknowledgements("").to_markdown();
        assert!(doc.starts_with("# Implementing AI in Undergraduate Biology\n\n"));
        assert!(doc.contains("**Author:** Jane Doe"));
        assert!(doc.contains("Body text."));
        assert!(!doc.contains("Acknowledgements"));
    }

    #[test]
    fn test_markdown_appends_acknowledgements_when_present() {
        let doc = result_with_acknowledgements("  Thanks to the faculty team.  ").to_markdown();
        assert!(doc.ends_with("**Acknowledgements**\nThanks to the faculty team."));
    }
}
