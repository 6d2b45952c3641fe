//! Resume Rewriter — asks the LLM to tailor a resume to a job description.
//!
//! Exactly one completion is requested per run. No retry: an error, a timeout
//! or a blank completion all end the run as a generation failure.

pub mod prompts;

use async_trait::async_trait;
use tracing::{error, info};

use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError, Sampling};
use crate::rewriter::prompts::REWRITE_PROMPT_TEMPLATE;

pub const REWRITE_SAMPLING: Sampling = Sampling {
    max_tokens: 1500,
    temperature: 0.7,
    top_p: 1.0,
    n: 1,
};

/// Backend that turns a rewrite prompt into resume text.
///
/// Carried in `AppState` as `Arc<dyn ResumeWriter>`; `LlmClient` is the default.
#[async_trait]
pub trait ResumeWriter: Send + Sync {
    async fn rewrite(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl ResumeWriter for LlmClient {
    async fn rewrite(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(prompt, REWRITE_SAMPLING).await
    }
}

/// Embeds both texts verbatim into the fixed rewrite instruction.
pub fn build_rewrite_prompt(original_resume: &str, job_description: &str) -> String {
    fill_template(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("{job_description}", job_description),
            ("{original_resume}", original_resume),
            ("{output_instruction}", PLAIN_TEXT_INSTRUCTION),
        ],
    )
}

/// Returns the trimmed rewritten resume, or `None` when the backend fails or
/// answers with nothing but whitespace.
pub async fn generate_resume(
    writer: &dyn ResumeWriter,
    original_resume: &str,
    job_description: &str,
) -> Option<String> {
    let prompt = build_rewrite_prompt(original_resume, job_description);

    match writer.rewrite(&prompt).await {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                error!("Resume rewrite returned an empty completion");
                return None;
            }
            info!("Resume rewrite produced {} chars", text.len());
            Some(text.to_string())
        }
        Err(e) => {
            error!("Resume rewrite failed: {e}");
            None
        }
    }
}

/// Single left-to-right substitution pass, so placeholder-looking text inside
/// a substituted value is never expanded again.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
