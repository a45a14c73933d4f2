// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt for every call that writes or rewrites the case study.
pub const ACADEMIC_WRITER_SYSTEM: &str = "You are an expert academic writer \
    specializing in education technology and AI implementation case studies. \
    You follow APA 7th edition formatting perfectly.";

/// System prompt for the guiding-question review call.
pub const ACADEMIC_REVIEWER_SYSTEM: &str = "You are an expert academic reviewer \
    who provides constructive feedback on case studies about AI in education.";
