//! CLIP token counts for caption text.
//!
//! Uses the OpenAI CLIP BPE vocabulary bundled with `instant-clip-tokenizer`,
//! so no model files are needed. Counts exclude the start/end-of-text markers.

use instant_clip_tokenizer::Tokenizer;

/// Counts CLIP tokens per caption.
pub struct TokenCounter {
    tokenizer: Tokenizer,
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter").finish_non_exhaustive()
    }
}

impl TokenCounter {
    /// Build the tokenizer from the embedded vocabulary.
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Number of tokens in one caption.
    pub fn count(&self, caption: &str) -> usize {
        let mut tokens = Vec::new();
        self.tokenizer.encode(caption, &mut tokens);
        tokens.len()
    }

    /// Token count of every caption, in input order.
    pub fn count_all<'a, I>(&self, captions: I) -> Vec<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens = Vec::new();
        captions
            .into_iter()
            .map(|caption| {
                tokens.clear();
                self.tokenizer.encode(caption, &mut tokens);
                tokens.len()
            })
            .collect()
    }
}
