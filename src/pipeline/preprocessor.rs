// ============================================================
// Layer 4 — Sentence Preprocessor
// ============================================================
// Prepares one raw annotated sentence for the tokenizer.
//
// Raw sentences come from annotation spreadsheets and often carry:
//   - The `@` target marker glued to a word ("@man")
//   - Non-breaking spaces (U+00A0) and zero-width spaces (U+200B)
//   - Byte order marks and stray control characters
//   - Tabs, line breaks and runs of spaces
//
// Steps (applied in order):
//   1. Replace the marker and odd whitespace/control chars with a space
//   2. Collapse runs of spaces and trim
//   3. Wrap with the encoder's begin/end sentence markers
//      (no space before `</s>` for byte-level BPE)
//
// Reference: Rust Book §8 (Strings in Rust)

use crate::domain::options::{SubwordScheme, TokenConventions};
use crate::domain::sentence_pair::TARGET_MARKER;

pub struct SentencePreprocessor {
    conventions: TokenConventions,
}

impl SentencePreprocessor {
    pub fn new(conventions: TokenConventions) -> Self {
        Self { conventions }
    }

    /// Remove the target marker and normalise whitespace.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1: Normalise individual characters ───────────────────────────
        let step1 = text.chars().map(|c| match c {
            TARGET_MARKER => ' ',
            '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
            c if c.is_control() => ' ',
            c => c,
        });

        // ── Step 2: Collapse spaces ───────────────────────────────────────────
        let mut out        = String::with_capacity(text.len());
        let mut last_space = true;

        for c in step1 {
            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        out.trim_end().to_string()
    }

    /// Clean and wrap: `"{begin} {sentence} {end}"`.
    ///
    /// Byte-level BPE turns a space in front of the end marker into a
    /// word-initial `Ġ` piece, so that scheme gets `"{begin} {sentence}{end}"`.
    pub fn prepare(&self, text: &str) -> String {
        let gap = match self.conventions.scheme {
            SubwordScheme::WordPiece => " ",
            SubwordScheme::ByteLevel => "",
        };
        format!(
            "{} {}{}{}",
            self.conventions.begin_marker,
            self.clean(text),
            gap,
            self.conventions.end_marker
        )
    }
}
