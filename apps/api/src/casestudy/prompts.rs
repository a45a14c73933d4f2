// All LLM prompt constants for the case-study pipeline.
// System prompts live in llm_client::prompts; these are the user messages.

/// Case-study generation prompt. Replace `{sections}` with the assembled
/// non-empty sections before sending.
pub const CASE_STUDY_PROMPT_TEMPLATE: &str = r#"Generate a comprehensive case study in APA 7th edition format about AI implementation in an educational context based on the following information.

The case study should be written as a cohesive academic narrative that flows naturally between topics, while covering only these sections that have content:
{sections}

Format guidelines:
- Write in a flowing academic narrative style that connects ideas across sections
- Include ONLY the main section headings as provided above to improve readability
- DO NOT include sections that were not provided in the input
- Do NOT include any subheadings within sections
- Create placeholder for citations for any academic claim.
- The tone should be academic but accessible, with a focus on practical insights

When you need to include a citation, use the format (placeholder: topic) where "topic" briefly describes what the citation is about. For example, (placeholder: AI bias in education) or (placeholder: learning analytics)."#;

/// Per-placeholder citation discovery prompt. Replace `{topic}`.
/// Sent with web search enabled so the model can find a real source.
pub const SOURCE_SEARCH_PROMPT_TEMPLATE: &str = r#"Find a real academic source (journal article or book) that would be appropriate for a citation about: '{topic}'
in the context of AI in education or educational technology implementation.

Return ONLY a properly formatted APA 7th edition reference entry.
Do not include any explanation or additional text."#;

/// Citation integration prompt. Replace `{case_study}` and `{references}`
/// (references newline-joined).
pub const INTEGRATION_PROMPT_TEMPLATE: &str = r#"Below is a case study about AI implementation in education that contains citation placeholders in the format (placeholder: topic).

Please rewrite this case study by:
1. Integrating the following academic references appropriately throughout the text where the placeholders appear
2. Maintaining the exact same content and structure of the original case study
3. Adding a properly formatted References section at the end following APA 7th edition guidelines
4. Using proper in-text citations (Author, Year) that correspond to the references list

Case Study:
{case_study}

Available References to Integrate:
{references}

Important instructions:
- Preserve the academic narrative flow of the case study
- Maintain the EXACT same section structure as the original case study - do not add or remove any sections
- Keep all section headings exactly as they are in the original
- Do NOT add any subheadings
- Maintain all original content and insights
- Only modify the citation placeholders to use proper academic citations
- Use each reference where it is most relevant to the topic being discussed
- Ensure every reference is used at least once in the text
- Add a properly formatted References section at the end"#;

/// Guiding-question generation prompt. Replace `{case_study}`.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Based on the following case study, generate 5-7 thoughtful questions that could help the author expand and improve their work.
Focus on areas that might be underdeveloped, need more evidence, or could benefit from additional perspectives.

Case study: {case_study}"#;
