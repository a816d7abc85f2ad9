//! Bitap approximate string matching.
//!
//! Scores are location independent: a match with `k` errors scores
//! `k / pattern_len`, so 0 is a perfect match and 1 is no match at all.
//! Patterns longer than [`MAX_PATTERN_LEN`] are split into chunks and the
//! chunk scores averaged.

use std::collections::HashMap;

/// Longest pattern chunk matched in a single bit-parallel pass.
pub const MAX_PATTERN_LEN: usize = 32;

/// Floor applied to fuzzy scores that aren't whole-string equality.
const MIN_FUZZY_SCORE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitapOptions {
    /// Highest acceptable score (0.0 means only error-free matches).
    pub threshold: f64,
    /// Shortest run of pattern characters the text must contain.
    pub min_match_char_len: usize,
}

impl Default for BitapOptions {
    fn default() -> Self {
        Self { threshold: 0.5, min_match_char_len: 2 }
    }
}

/// Outcome of matching one pattern against one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitapMatch {
    pub is_match: bool,
    pub score: f64,
}

impl BitapMatch {
    const NONE: Self = Self { is_match: false, score: 1.0 };
}

#[derive(Debug, Clone)]
struct Chunk {
    chars: Vec<char>,
    alphabet: HashMap<char, u64>,
}

impl Chunk {
    fn new(chars: &[char]) -> Self {
        let len = chars.len();
        let mut alphabet = HashMap::new();
        for (i, c) in chars.iter().enumerate() {
            *alphabet.entry(*c).or_insert(0) |= 1u64 << (len - i - 1);
        }
        Self { chars: chars.to_vec(), alphabet }
    }
}

/// A compiled, lowercased search pattern.
#[derive(Debug, Clone)]
pub struct BitapPattern {
    pattern: String,
    chunks: Vec<Chunk>,
}

impl BitapPattern {
    pub fn new(pattern: &str) -> Self {
        let pattern = pattern.to_lowercase();
        let chars: Vec<char> = pattern.chars().collect();
        let len = chars.len();

        let mut chunks = Vec::new();
        if len > MAX_PATTERN_LEN {
            let remainder = len % MAX_PATTERN_LEN;
            let end = len - remainder;
            for start in (0..end).step_by(MAX_PATTERN_LEN) {
                chunks.push(Chunk::new(&chars[start..start + MAX_PATTERN_LEN]));
            }
            if remainder > 0 {
                chunks.push(Chunk::new(&chars[len - MAX_PATTERN_LEN..]));
            }
        } else if len > 0 {
            chunks.push(Chunk::new(&chars));
        }

        Self { pattern, chunks }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Match against `text`, which must already be lowercased.
    pub fn search(&self, text: &str, opts: &BitapOptions) -> BitapMatch {
        if self.pattern == text {
            return BitapMatch { is_match: true, score: 0.0 };
        }
        if self.chunks.is_empty() {
            return BitapMatch::NONE;
        }

        let text: Vec<char> = text.chars().collect();
        let mut total = 0.0;
        let mut any_match = false;
        for chunk in &self.chunks {
            let m = search_chunk(&text, chunk, opts);
            any_match |= m.is_match;
            total += m.score;
        }

        if any_match {
            BitapMatch { is_match: true, score: total / self.chunks.len() as f64 }
        } else {
            BitapMatch::NONE
        }
    }
}

fn search_chunk(text: &[char], chunk: &Chunk, opts: &BitapOptions) -> BitapMatch {
    let pattern = &chunk.chars;
    let pattern_len = pattern.len();
    let text_len = text.len();
    let score_for = |errors: usize| errors as f64 / pattern_len as f64;

    let check_runs = opts.min_match_char_len > 1;
    let mut match_mask = vec![false; text_len];
    let mut threshold = opts.threshold;

    // Exact occurrences tighten the threshold before the fuzzy pass.
    let mut from = 0;
    while let Some(index) = find(text, pattern, from) {
        threshold = threshold.min(score_for(0));
        from = index + pattern_len;
        if check_runs {
            match_mask[index..index + pattern_len].fill(true);
        }
    }

    let mut best_location: Option<usize> = None;
    let mut final_score = 1.0;
    let mask = 1u64 << (pattern_len - 1);
    let finish = text_len + pattern_len;
    let mut last_bits: Vec<u64> = Vec::new();

    for errors in 0..pattern_len {
        let mut bits = vec![0u64; finish + 2];
        bits[finish + 1] = (1u64 << errors) - 1;

        for j in (1..=finish).rev() {
            let location = j - 1;
            let char_match = text
                .get(location)
                .and_then(|c| chunk.alphabet.get(c))
                .copied()
                .unwrap_or(0);
            if check_runs && location < text_len {
                match_mask[location] = char_match != 0;
            }

            bits[j] = ((bits[j + 1] << 1) | 1) & char_match;
            if errors > 0 {
                bits[j] |= ((last_bits[j + 1] | last_bits[j]) << 1) | 1 | last_bits[j + 1];
            }

            if bits[j] & mask != 0 {
                final_score = score_for(errors);
                if final_score <= threshold {
                    threshold = final_score;
                    best_location = Some(location);
                    if location == 0 {
                        break;
                    }
                }
            }
        }

        if score_for(errors + 1) > threshold {
            break;
        }
        last_bits = bits;
    }

    let mut is_match = best_location.is_some();
    if check_runs && !has_run(&match_mask, opts.min_match_char_len) {
        is_match = false;
    }

    BitapMatch { is_match, score: f64::max(MIN_FUZZY_SCORE, final_score) }
}

/// Index of the first occurrence of `needle` in `haystack` at or after `from`.
fn find(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() || from > haystack.len() - needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

fn has_run(mask: &[bool], min_len: usize) -> bool {
    let mut run = 0;
    for &m in mask {
        run = if m { run + 1 } else { 0 };
        if run >= min_len {
            return true;
        }
    }
    false
}
