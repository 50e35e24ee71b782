//! Tokenizer for directive parameter strings.
//!
//! A directive's parameters are colon-separated, but embedded JSON payloads
//! contain colons, commas, and brackets of their own. The lexer tracks
//! brace/bracket nesting and quoted-string state character by character so
//! that only top-level colons split fields.

/// Keyed optional sections a directive may carry after its positional fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Markers,
    GeoJson,
    Animation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A section keyword (`markers`, `geojson`, `animation`)
    Section(Section),
    /// The literal `inline` keyword introducing a section payload
    Inline,
    /// Any other top-level field (style key, coordinates, payload, ...)
    Field,
}

/// One top-level field of a directive parameter string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    fn classify(text: &'a str) -> Self {
        let kind = match text.trim() {
            "markers" => TokenKind::Section(Section::Markers),
            "geojson" => TokenKind::Section(Section::GeoJson),
            "animation" => TokenKind::Section(Section::Animation),
            "inline" => TokenKind::Inline,
            _ => TokenKind::Field,
        };
        Self { kind, text }
    }
}

/// Tracks nesting depth and quoted-string state one character at a time
///
/// Inside a double-quoted string every character is inert (honoring `\"`
/// escapes); outside, `{`/`[` and `}`/`]` adjust the depth.
#[derive(Debug, Default, Clone)]
pub(crate) struct NestingTracker {
    depth: i32,
    in_string: bool,
    escaped: bool,
}

impl NestingTracker {
    pub(crate) fn advance(&mut self, c: char) {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.in_string = false;
            }
            return;
        }
        match c {
            '"' => self.in_string = true,
            '{' | '[' => self.depth += 1,
            '}' | ']' => self.depth -= 1,
            _ => {}
        }
    }

    pub(crate) fn at_top_level(&self) -> bool {
        self.depth == 0 && !self.in_string
    }
}

/// Lexes a directive parameter string into its top-level fields
///
/// Splits on colons that sit outside any brace/bracket nesting and outside
/// quoted strings, then classifies each field.
pub fn lex(params: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut tracker = NestingTracker::default();
    let mut field_start = 0;

    for (i, c) in params.char_indices() {
        if c == ':' && tracker.at_top_level() {
            tokens.push(Token::classify(&params[field_start..i]));
            field_start = i + 1;
            continue;
        }
        tracker.advance(c);
    }
    tokens.push(Token::classify(&params[field_start..]));
    tokens
}

/// Finds the byte index of the `]` closing the directive opened at `open`
///
/// `open` must point at the directive's `[`. Returns `None` when the
/// directive is unterminated.
pub(crate) fn directive_end(text: &str, open: usize) -> Option<usize> {
    debug_assert!(text[open..].starts_with('['));
    let mut tracker = NestingTracker::default();
    for (i, c) in text[open..].char_indices() {
        tracker.advance(c);
        if tracker.at_top_level() {
            return Some(open + i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_plain_fields() {
        let tokens = lex("default:40.7128,-74.0060:12:NYC");
        assert_eq!(texts(&tokens), vec!["default", "40.7128,-74.0060", "12", "NYC"]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Field));
    }

    #[test]
    fn test_json_payload_not_split() {
        let tokens = lex(r#"default:1,2:5:geojson:inline:{"type":"Point","coordinates":[1,2]}"#);
        assert_eq!(
            texts(&tokens),
            vec![
                "default",
                "1,2",
                "5",
                "geojson",
                "inline",
                r#"{"type":"Point","coordinates":[1,2]}"#
            ]
        );
        assert_eq!(tokens[3].kind, TokenKind::Section(Section::GeoJson));
        assert_eq!(tokens[4].kind, TokenKind::Inline);
        assert_eq!(tokens[5].kind, TokenKind::Field);
    }

    #[test]
    fn test_colon_inside_quoted_string() {
        let tokens = lex(r#"a:{"note":"colon : inside"}:b"#);
        assert_eq!(texts(&tokens), vec!["a", r#"{"note":"colon : inside"}"#, "b"]);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let tokens = lex(r#"a:{"note":"say \" hi"}:b"#);
        assert_eq!(texts(&tokens), vec!["a", r#"{"note":"say \" hi"}"#, "b"]);
    }

    #[test]
    fn test_section_keywords_classified() {
        let tokens = lex("markers:inline:A,1,2|B,3,4");
        assert_eq!(tokens[0].kind, TokenKind::Section(Section::Markers));
        assert_eq!(tokens[1].kind, TokenKind::Inline);
        assert_eq!(tokens[2].text, "A,1,2|B,3,4");
    }

    #[test]
    fn test_directive_end_simple() {
        let text = "Hello [MAP:default:1,2:5] world";
        let open = text.find('[').unwrap();
        assert_eq!(directive_end(text, open), Some(text.find(']').unwrap()));
    }

    #[test]
    fn test_directive_end_with_nested_arrays() {
        let text = r#"[MAP:default:1,2:5:animation:inline:{"coordinates":[[0,0],[1,1]]}] tail"#;
        let close = directive_end(text, 0).unwrap();
        assert_eq!(&text[close..close + 1], "]");
        assert_eq!(&text[close + 1..], " tail");
    }

    #[test]
    fn test_directive_end_unterminated() {
        assert_eq!(directive_end("[MAP:default:1,2:5", 0), None);
        assert_eq!(directive_end(r#"[MAP:a:1,2:5:geojson:inline:{"x":1"#, 0), None);
    }
}
