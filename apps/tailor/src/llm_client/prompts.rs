// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Closing instruction for any prompt whose answer is rendered as a document.
/// Output is shown verbatim inside a preformatted block and split per line for DOCX,
/// so markup of any kind would leak into the artifacts.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Please provide the revised resume in plain text format \
with clearly marked sections (e.g., Summary, Experience, Education, Skills, etc.).";
