//! Tokenizer for the WKT grammar.

use crate::error::CodecError;

/// Reader over a string producing WKT tokens: words, numbers and punctuation.
///
/// Whitespace between tokens is skipped. Word comparison is case-insensitive.
#[derive(Debug, Clone)]
pub struct TextScanner<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> TextScanner<'a> {
    /// Creates a scanner at the start of the text.
    pub fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    /// Current byte offset from the start of the text.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if only whitespace is left.
    pub fn is_at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.position >= self.text.len()
    }

    /// Next character after whitespace, without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.text[self.position..].chars().next()
    }

    /// Consumes the character `c` if it is next. Returns true if it was consumed.
    pub fn consume(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.position += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes the character `c` or fails if something else is next.
    pub fn expect(&mut self, c: char) -> Result<(), CodecError> {
        if self.consume(c) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{c}'")))
        }
    }

    /// Next word (a run of ASCII letters), without consuming it.
    pub fn peek_word(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let len = self.text.as_bytes()[self.position..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();

        if len == 0 {
            None
        } else {
            Some(&self.text[self.position..self.position + len])
        }
    }

    /// Consumes the next word.
    pub fn scan_word(&mut self) -> Option<&'a str> {
        let word = self.peek_word()?;
        self.position += word.len();
        Some(word)
    }

    /// Consumes the next word if it equals `keyword`, ignoring case.
    pub fn consume_keyword(&mut self, keyword: &str) -> bool {
        match self.peek_word() {
            Some(word) if word.eq_ignore_ascii_case(keyword) => {
                self.position += word.len();
                true
            }
            _ => false,
        }
    }

    /// Consumes a number. Any token that parses as a float is accepted, including `NaN` and `inf`; the
    /// caller decides whether non-finite values are allowed.
    pub fn scan_number(&mut self) -> Result<f64, CodecError> {
        let token = self.scan_token();
        token
            .parse::<f64>()
            .map_err(|_| self.invalid_token("number", token))
    }

    /// Consumes an integer.
    pub fn scan_integer(&mut self) -> Result<i32, CodecError> {
        let token = self.scan_token();
        token
            .parse::<i32>()
            .map_err(|_| self.invalid_token("integer", token))
    }

    /// Builds an error describing what was expected at the current position.
    pub fn unexpected(&mut self, expected: &str) -> CodecError {
        self.skip_whitespace();
        let found = match self.text[self.position..].chars().next() {
            Some(c) => format!("'{c}'"),
            None => "end of text".to_string(),
        };

        CodecError::DataCorrupted(format!(
            "expected {expected} at offset {}, found {found}",
            self.position
        ))
    }

    fn invalid_token(&self, expected: &str, token: &str) -> CodecError {
        if token.is_empty() {
            CodecError::DataCorrupted(format!(
                "expected {expected} at offset {}",
                self.position
            ))
        } else {
            CodecError::DataCorrupted(format!(
                "invalid {expected} '{token}' before offset {}",
                self.position
            ))
        }
    }

    fn scan_token(&mut self) -> &'a str {
        self.skip_whitespace();
        let len = self.text.as_bytes()[self.position..]
            .iter()
            .take_while(|b| !is_delimiter(**b))
            .count();
        let token = &self.text[self.position..self.position + len];
        self.position += len;
        token
    }

    fn skip_whitespace(&mut self) {
        self.position += self.text.as_bytes()[self.position..]
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
    }
}

fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'(' | b')' | b',' | b';' | b'=')
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn scans_tokens() {
        let mut scanner = TextScanner::new("  point Z ( 1.5 -2e3,NaN)  ");
        assert!(scanner.consume_keyword("POINT"));
        assert_eq!(scanner.scan_word(), Some("Z"));
        assert!(scanner.consume('('));
        assert_eq!(scanner.scan_number().unwrap(), 1.5);
        assert_eq!(scanner.scan_number().unwrap(), -2000.0);
        assert!(scanner.consume(','));
        assert!(scanner.scan_number().unwrap().is_nan());
        assert!(!scanner.consume(','));
        scanner.expect(')').unwrap();
        assert!(scanner.is_at_end());
    }

    #[test]
    fn word_stops_at_parenthesis() {
        let mut scanner = TextScanner::new("MULTIPOINTZ(0 0 0)");
        assert_eq!(scanner.peek_word(), Some("MULTIPOINTZ"));
        assert_eq!(scanner.scan_word(), Some("MULTIPOINTZ"));
        assert_eq!(scanner.peek(), Some('('));
        assert_eq!(scanner.scan_word(), None);
    }

    #[test]
    fn keyword_is_not_consumed_on_mismatch() {
        let mut scanner = TextScanner::new("EMPTY");
        assert!(!scanner.consume_keyword("POINT"));
        assert!(scanner.consume_keyword("empty"));
        assert!(scanner.is_at_end());
    }

    #[test]
    fn invalid_number() {
        let mut scanner = TextScanner::new("1.2.3)");
        assert_matches!(scanner.scan_number(), Err(CodecError::DataCorrupted(_)));

        let mut scanner = TextScanner::new(")");
        assert_matches!(scanner.scan_number(), Err(CodecError::DataCorrupted(_)));
    }

    #[test]
    fn srid_prefix_tokens() {
        let mut scanner = TextScanner::new("SRID=4326;POINT");
        assert!(scanner.consume_keyword("srid"));
        scanner.expect('=').unwrap();
        assert_eq!(scanner.scan_integer().unwrap(), 4326);
        scanner.expect(';').unwrap();
        assert_eq!(scanner.scan_word(), Some("POINT"));
    }

    #[test]
    fn expect_reports_end_of_text() {
        let mut scanner = TextScanner::new("(1 2");
        scanner.expect('(').unwrap();
        scanner.scan_number().unwrap();
        scanner.scan_number().unwrap();
        let Err(CodecError::DataCorrupted(message)) = scanner.expect(')') else {
            panic!("expected an error");
        };
        assert!(message.contains("end of text"));
    }
}
