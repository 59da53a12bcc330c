//! Case folding and normalization helpers shared by the matchers.
//!
//! All comparisons fold one character to exactly one character, so offsets
//! found in folded text map straight back onto the original input.

/// Fold a single character for case-insensitive comparison.
///
/// Only the first character of the lowercase mapping is kept: `İ` lowercases
/// to `i` + combining dot, and keeping the mapping 1:1 is what lets match
/// offsets stay valid in the original string.
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Fold a whole string with [`fold_char`].
pub fn fold(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Strip any trailing `.` characters.
pub fn strip_trailing_periods(s: &str) -> &str {
    s.trim_end_matches('.')
}

/// Normalize a sentence for full-sentence comparison.
///
/// Surrounding whitespace and trailing periods are dropped and case is folded.
/// Other punctuation (`!`, `?`, `,`) is kept and therefore significant.
pub fn normalize_sentence(s: &str) -> String {
    fold(strip_trailing_periods(s.trim()))
}

/// Case-insensitive, trailing-period-insensitive containment.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    let needle = fold(strip_trailing_periods(needle));
    if needle.is_empty() {
        return false;
    }
    fold(strip_trailing_periods(haystack)).contains(&needle)
}

/// Whether a character is a Turkish (or plain Latin) vowel.
pub fn is_vowel(c: char) -> bool {
    matches!(
        fold_char(c),
        'a' | 'e' | 'ı' | 'i' | 'o' | 'ö' | 'u' | 'ü' | 'â' | 'î' | 'û'
    )
}

/// Input text split into folded characters with a byte offset per character.
///
/// `offsets[i]` is the byte offset of character `i` in the original string and
/// `offsets[len]` is the string's byte length, so every char index maps to a
/// valid slice boundary.
#[derive(Debug, Clone)]
pub struct FoldedText {
    chars: Vec<char>,
    offsets: Vec<usize>,
}

impl FoldedText {
    pub fn new(s: &str) -> Self {
        let mut chars = Vec::with_capacity(s.len());
        let mut offsets = Vec::with_capacity(s.len() + 1);
        for (idx, c) in s.char_indices() {
            chars.push(fold_char(c));
            offsets.push(idx);
        }
        offsets.push(s.len());
        Self { chars, offsets }
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Byte offset of the character at `char_idx` (or the end of the text).
    pub fn byte_offset(&self, char_idx: usize) -> usize {
        self.offsets[char_idx.min(self.chars.len())]
    }

    /// Character index of a byte offset, rounding down to a char boundary.
    pub fn char_index(&self, byte_offset: usize) -> usize {
        match self.offsets.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Find `needle` (already folded) starting the search at `from`.
    pub fn find(&self, needle: &[char], from: usize) -> Option<usize> {
        self.find_within(needle, from, self.chars.len())
    }

    /// Find `needle` so that the whole match lies in `from..end`.
    pub fn find_within(&self, needle: &[char], from: usize, end: usize) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let end = end.min(self.chars.len());
        if from >= end || end - from < needle.len() {
            return None;
        }
        (from..=end - needle.len()).find(|&start| self.chars[start..start + needle.len()] == *needle)
    }

    /// Index of the first whitespace character at or after `from`, or the end.
    pub fn word_end(&self, from: usize) -> usize {
        self.chars[from.min(self.chars.len())..]
            .iter()
            .position(|c| c.is_whitespace())
            .map_or(self.chars.len(), |idx| from + idx)
    }

    /// Whether the text continues with `needle` at `at`, without running past `end`.
    pub fn matches_at(&self, needle: &[char], at: usize, end: usize) -> bool {
        let end = end.min(self.chars.len());
        !needle.is_empty() && at + needle.len() <= end && self.chars[at..at + needle.len()] == *needle
    }
}

/// Fold a segment into a char vector ready for [`FoldedText::find`].
pub fn folded_chars(s: &str) -> Vec<char> {
    s.chars().map(fold_char).collect()
}

/// Convert a caret offset counted in characters into a byte offset of `s`,
/// clamping to the end of the string.
pub fn char_to_byte(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_keeps_one_char_per_char() {
        let input = "İSTANBUL'a Geldim";
        assert_eq!(fold(input).chars().count(), input.chars().count());
        assert_eq!(fold("GELDİM"), "geldim");
    }

    #[test]
    fn sentence_normalization_ignores_case_and_trailing_periods() {
        assert_eq!(normalize_sentence("Ben parka geldim..."), "ben parka geldim");
        assert_eq!(normalize_sentence("  Ben Parka Geldim "), "ben parka geldim");
        assert_ne!(normalize_sentence("Ben parka geldim!!"), "ben parka geldim");
    }

    #[test]
    fn containment_is_case_insensitive() {
        assert!(contains_folded("Ben parka GELDİM.", "geldim"));
        assert!(!contains_folded("Ben parka", "gel"));
        assert!(!contains_folded("anything", ""));
    }

    #[test]
    fn folded_text_maps_offsets_back_to_bytes() {
        let text = FoldedText::new("Çok güzel");
        let idx = text.find(&folded_chars("GÜZEL"), 0).unwrap();
        assert_eq!(idx, 4);
        assert_eq!(&"Çok güzel"[text.byte_offset(idx)..], "güzel");
        assert_eq!(text.char_index(text.byte_offset(idx)), idx);
    }

    #[test]
    fn find_within_respects_upper_bound() {
        let text = FoldedText::new("geldim geldi");
        let needle = folded_chars("di");
        assert_eq!(text.find_within(&needle, 0, 6), Some(3));
        assert_eq!(text.find_within(&needle, 4, 6), None);
        assert!(text.matches_at(&needle, 3, 6));
        assert!(!text.matches_at(&needle, 3, 4));
    }

    #[test]
    fn char_offsets_convert_to_bytes() {
        assert_eq!(char_to_byte("güzel", 2), 3);
        assert_eq!(char_to_byte("güzel", 99), "güzel".len());
    }

    #[test]
    fn vowels_include_turkish_letters() {
        assert!(is_vowel('ı'));
        assert!(is_vowel('Ü'));
        assert!(!is_vowel('y'));
    }
}
