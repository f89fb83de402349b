use std::borrow::Cow;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::ValidationError;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// Characters left alone by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A trimmed, non-empty word ready to be sent to the dictionary service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupQuery(String);

impl LookupQuery {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let word = DefaultPreprocessor.process(input);
        if word.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Form stored in the `search` URL parameter
    pub fn encoded(&self) -> String {
        encode_component(&self.0)
    }
}

impl fmt::Display for LookupQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Percent-decode a URL component, keeping the raw text if it is not valid UTF-8
pub fn decode_component(text: &str) -> String {
    match percent_decode_str(text).decode_utf8() {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(e) => {
            tracing::warn!("Undecodable search parameter '{}': {}", text, e);
            text.to_string()
        }
    }
}
