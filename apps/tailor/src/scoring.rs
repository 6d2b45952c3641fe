//! Match scoring — word-level overlap between a job description and a resume.
//!
//! Score = |job ∩ resume| / |job| × 100, rounded to two decimals. The metric is
//! recall over the job vocabulary, so it is asymmetric: a resume that repeats
//! every job word scores 100 regardless of how much else it contains.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Anything that is not a letter, a number, an underscore or whitespace.
/// Combining marks are not word characters and are stripped too.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s]+").unwrap());

/// Overlap score in `[0, 100]`, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct MatchScore {
    percent: f64,
    /// The job text had no tokens, so nothing was measured.
    unmeasured: bool,
}

impl MatchScore {
    const UNMEASURED: MatchScore = MatchScore {
        percent: 0.0,
        unmeasured: true,
    };

    pub fn value(self) -> f64 {
        self.percent
    }

    /// Rounds half to even on the exact binary value: `3.125` becomes `3.12`.
    fn from_ratio(ratio: f64) -> Self {
        let percent = (ratio * 100.0).clamp(0.0, 100.0);
        let rounded = format!("{percent:.2}").parse().unwrap_or(percent);
        MatchScore {
            percent: rounded,
            unmeasured: false,
        }
    }
}

/// Whole numbers keep one decimal (`25.0`), others print their shortest form
/// (`33.33`). An unmeasured score prints as a bare `0`.
impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unmeasured {
            write!(f, "0")
        } else if self.percent.fract() == 0.0 {
            write!(f, "{:.1}", self.percent)
        } else {
            write!(f, "{}", self.percent)
        }
    }
}

/// Lower-cases `text`, drops every character that is neither a word character
/// nor whitespace, and returns the set of whitespace-separated tokens.
pub fn normalize_tokens(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");

    cleaned.split_whitespace().map(str::to_string).collect()
}

pub fn compute_match_score(job_text: &str, resume_text: &str) -> MatchScore {
    let job_tokens = normalize_tokens(job_text);
    if job_tokens.is_empty() {
        return MatchScore::UNMEASURED;
    }
    let resume_tokens = normalize_tokens(resume_text);
    let common = job_tokens.intersection(&resume_tokens).count();

    MatchScore::from_ratio(common as f64 / job_tokens.len() as f64)
}
