use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default input preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Vietnamese input methods emit both precomposed and combining diacritics
        text.nfc().collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(DefaultPreprocessor.process("  học sinh \n"), "học sinh");
    }

    #[test]
    fn test_composes_combining_marks() {
        // "ọ" written as o + combining dot below
        let decomposed = "ho\u{0323}c";
        assert_eq!(DefaultPreprocessor.process(decomposed), "học");
    }

    #[test]
    fn test_blank_is_empty() {
        assert!(DefaultPreprocessor.process(" \t ").is_empty());
    }
}
