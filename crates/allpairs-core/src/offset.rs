//! Character to byte offset conversion
//!
//! Annotators report mention offsets in characters while spans are byte
//! offsets. `CharOffsets` builds the mapping once per text so converting
//! many mentions stays linear.

use crate::{AllPairsError, Result};

/// Lookup table from character index to byte index for one text
#[derive(Debug, Clone)]
pub struct CharOffsets {
    /// `char_to_byte[i]` is the byte offset of char `i`; the last entry is `text.len()`
    char_to_byte: Vec<usize>,
}

impl CharOffsets {
    pub fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        char_to_byte.push(text.len());
        Self { char_to_byte }
    }

    /// Number of characters in the text
    pub fn char_count(&self) -> usize {
        self.char_to_byte.len() - 1
    }

    pub fn to_byte(&self, char_idx: usize) -> Option<usize> {
        self.char_to_byte.get(char_idx).copied()
    }

    /// Convert a half-open character range to a byte range
    pub fn to_bytes(&self, char_start: usize, char_end: usize) -> Result<(usize, usize)> {
        if char_start > char_end {
            return Err(AllPairsError::InvalidSpan {
                start: char_start,
                end: char_end,
            });
        }
        match (self.to_byte(char_start), self.to_byte(char_end)) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(AllPairsError::OutOfBounds {
                start: char_start,
                end: char_end,
                len: self.char_count(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_identity() {
        let offsets = CharOffsets::new("The cat");
        assert_eq!(offsets.char_count(), 7);
        assert_eq!(offsets.to_bytes(4, 7).unwrap(), (4, 7));
    }

    #[test]
    fn test_multibyte_text() {
        let text = "Café Zürich";
        let offsets = CharOffsets::new(text);
        assert_eq!(offsets.char_count(), 11);

        let (start, end) = offsets.to_bytes(5, 11).unwrap();
        assert_eq!(&text[start..end], "Zürich");
    }

    #[test]
    fn test_out_of_range() {
        let offsets = CharOffsets::new("abc");
        assert!(offsets.to_bytes(0, 3).is_ok());
        assert!(matches!(
            offsets.to_bytes(1, 4),
            Err(AllPairsError::OutOfBounds { len: 3, .. })
        ));
        assert!(matches!(
            offsets.to_bytes(2, 1),
            Err(AllPairsError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_empty_text() {
        let offsets = CharOffsets::new("");
        assert_eq!(offsets.char_count(), 0);
        assert_eq!(offsets.to_bytes(0, 0).unwrap(), (0, 0));
    }
}
