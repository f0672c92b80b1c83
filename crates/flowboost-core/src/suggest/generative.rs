//! Generative task breakdown via the hosted suggestion endpoint.
//!
//! The endpoint returns free text; suggestions are recovered by splitting on
//! the `N. ` numbered-list pattern. Any failure - transport error, non-2xx,
//! or a reply with no numbered lines - is logged and turned into an empty
//! list plus a generic user-visible notice. Nothing propagates to the
//! caller as an error.

use crate::api::ApiClient;

/// Shown when suggestion generation fails for any reason.
pub const SUGGESTION_ERROR_NOTICE: &str = "Unable to generate suggestions. Please try again.";

/// What a generative suggestion attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionOutcome {
    pub steps: Vec<String>,
    /// Generic notice for the user when `steps` is empty because of a
    /// failure.
    pub notice: Option<&'static str>,
}

/// Split free text into suggestion strings on the `N. ` numbered-list
/// pattern. Fragments are trimmed; empty ones are discarded. Works for both
/// one-item-per-line replies and numbered lists run together on one line.
pub fn parse_numbered_steps(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut starts: Vec<(usize, usize)> = Vec::new(); // (marker offset, content offset)

    let mut i = 0;
    while i < bytes.len() {
        let at_boundary = i == 0 || bytes[i - 1].is_ascii_whitespace();
        if at_boundary && bytes[i].is_ascii_digit() {
            let mut j = i;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j + 1 < bytes.len() && bytes[j] == b'.' && bytes[j + 1] == b' ' {
                starts.push((i, j + 2));
                i = j + 2;
                continue;
            }
        }
        i += 1;
    }

    let mut steps = Vec::with_capacity(starts.len());
    for (idx, &(_, content)) in starts.iter().enumerate() {
        let end = starts.get(idx + 1).map_or(text.len(), |&(next, _)| next);
        let fragment = text[content..end].trim();
        if !fragment.is_empty() {
            steps.push(fragment.to_string());
        }
    }
    steps
}

/// Breakdown provider backed by the task-suggestions endpoint.
pub struct GenerativeBreakdown<'a> {
    api: &'a ApiClient,
}

impl<'a> GenerativeBreakdown<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Ask the endpoint to break down `task_title`. The server folds the
    /// user's stored preferences into the prompt.
    pub async fn suggest(&self, task_title: &str) -> SuggestionOutcome {
        match self.api.generate_suggestions(task_title).await {
            Ok(text) => {
                let steps = parse_numbered_steps(&text);
                if steps.is_empty() {
                    tracing::warn!(reply = %text, "suggestion reply had no numbered steps");
                    SuggestionOutcome {
                        steps,
                        notice: Some(SUGGESTION_ERROR_NOTICE),
                    }
                } else {
                    SuggestionOutcome {
                        steps,
                        notice: None,
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "suggestion generation failed");
                SuggestionOutcome {
                    steps: Vec::new(),
                    notice: Some(SUGGESTION_ERROR_NOTICE),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_step_per_line() {
        let text = "1. Outline the report\n2. Draft the introduction\n3. Revise for clarity\n";
        assert_eq!(
            parse_numbered_steps(text),
            vec![
                "Outline the report",
                "Draft the introduction",
                "Revise for clarity"
            ]
        );
    }

    #[test]
    fn parses_list_run_together_on_one_line() {
        let text = "Sure! 1. Start small 2. Keep going 3. Finish up";
        assert_eq!(
            parse_numbered_steps(text),
            vec!["Start small", "Keep going", "Finish up"]
        );
    }

    #[test]
    fn skips_preamble_and_blank_fragments() {
        let text = "Here are some steps:\n\n1. First step\n\n2.  \n3. Third step";
        assert_eq!(parse_numbered_steps(text), vec!["First step", "Third step"]);
    }

    #[test]
    fn ignores_numbers_inside_words_and_decimals() {
        let text = "Take 2.5 hours total\n1. Real step";
        assert_eq!(parse_numbered_steps(text), vec!["Real step"]);
    }

    #[test]
    fn prose_without_numbers_yields_nothing() {
        // The server's own fallback text is prose; it parses to nothing and
        // the caller shows the generic notice instead.
        let text = "Break this task into smaller steps of 15-30 minutes each.";
        assert!(parse_numbered_steps(text).is_empty());
    }

    #[test]
    fn multi_digit_markers_work() {
        let mut text = String::new();
        for n in 1..=12 {
            text.push_str(&format!("{n}. Step number {n}\n"));
        }
        let steps = parse_numbered_steps(&text);
        assert_eq!(steps.len(), 12);
        assert_eq!(steps[11], "Step number 12");
    }
}
