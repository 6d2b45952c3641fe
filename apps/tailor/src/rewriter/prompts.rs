// Prompt constants for the resume rewriter.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Rewrite prompt template.
/// Replace: {job_description}, {original_resume}, {output_instruction}
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Given the following original resume and a job description, rewrite and optimize the resume to match the job requirements while ensuring it accurately reflects the candidate's skills. Generate new bullet points and rewrite sections as needed for clarity and ATS optimization.

Job Description:
{job_description}

Original Resume:
{original_resume}

{output_instruction}"#;
