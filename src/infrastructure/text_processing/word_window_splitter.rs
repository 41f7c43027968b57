use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};

const SENTENCE_CUT_THRESHOLD: f64 = 0.7;

/// Splits on whitespace into windows sized from a token budget. Consecutive
/// windows share `overlap_words` words; a window that is not the last one is
/// trimmed back to its final `.`, `;` or `,` when that falls in the last 30%
/// of the window.
#[derive(Debug, Clone)]
pub struct WordWindowSplitter {
    max_words: usize,
    overlap_words: usize,
}

impl WordWindowSplitter {
    pub fn new(
        max_tokens: usize,
        overlap_ratio: f32,
        tokens_per_word: f32,
    ) -> Result<Self, TextSplitterError> {
        if tokens_per_word <= 0.0 {
            return Err(TextSplitterError::InvalidConfiguration(format!(
                "tokens_per_word must be positive, got {tokens_per_word}"
            )));
        }
        if !(0.0..1.0).contains(&overlap_ratio) {
            return Err(TextSplitterError::InvalidConfiguration(format!(
                "overlap_ratio must be in [0, 1), got {overlap_ratio}"
            )));
        }

        let max_words = (max_tokens as f32 / tokens_per_word) as usize;
        if max_words == 0 {
            return Err(TextSplitterError::InvalidConfiguration(format!(
                "max_tokens {max_tokens} leaves no room for a single word"
            )));
        }
        let overlap_words = (max_words as f32 * overlap_ratio) as usize;

        Ok(Self {
            max_words,
            overlap_words,
        })
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn overlap_words(&self) -> usize {
        self.overlap_words
    }

    fn trim_to_sentence_boundary(window: &str) -> &str {
        let Some(cut) = window.rfind(['.', ';', ',']) else {
            return window;
        };

        let chars_before_cut = window[..cut].chars().count() as f64;
        let total_chars = window.chars().count() as f64;

        if chars_before_cut > total_chars * SENTENCE_CUT_THRESHOLD {
            &window[..=cut]
        } else {
            window
        }
    }
}

#[async_trait]
impl TextSplitter for WordWindowSplitter {
    async fn split(&self, text: &str) -> Result<Vec<String>, TextSplitterError> {
        let words: Vec<&str> = text.split_whitespace().collect();

        if words.len() <= self.max_words {
            return Ok(vec![text.to_string()]);
        }

        let step = (self.max_words - self.overlap_words).max(1);
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < words.len() {
            let end = (start + self.max_words).min(words.len());
            let window = words[start..end].join(" ");

            let chunk = if end < words.len() {
                Self::trim_to_sentence_boundary(&window)
            } else {
                window.as_str()
            };
            chunks.push(chunk.trim().to_string());

            start += step;
        }

        Ok(chunks)
    }
}
