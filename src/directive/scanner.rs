//! Splits raw prose into an ordered sequence of text and map segments.
//!
//! Scanning is pure and lossless: concatenating the segments' source text
//! reproduces the input exactly, and malformed directives degrade to literal
//! text instead of being dropped.

use crate::core::config::MapConfig;
use crate::directive::decoder::decode;
use crate::directive::lexer::directive_end;
use serde::{Deserialize, Serialize};

/// Opening delimiter of a map directive
pub const DIRECTIVE_OPEN: &str = "[MAP:";

/// One atomic unit of a scanned document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Text {
        content: String,
    },
    Map {
        config: MapConfig,
        /// The exact matched directive span, kept for lossless reconstruction
        raw: String,
    },
}

impl Segment {
    /// The segment's contribution to the original source text
    pub fn source_text(&self) -> &str {
        match self {
            Segment::Text { content } => content,
            Segment::Map { raw, .. } => raw,
        }
    }
}

/// Scans raw text for `[MAP:...]` directives
///
/// Pure function: identical input always yields identical output. Directive
/// spans that are unterminated or fail to decode are preserved as literal
/// text.
pub fn scan(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut seg_start = 0;
    let mut search = 0;

    while let Some(found) = text[search..].find(DIRECTIVE_OPEN) {
        let open = search + found;
        let Some(close) = directive_end(text, open) else {
            // Unterminated: keep scanning past the opener so a later
            // well-formed directive is still recognized.
            search = open + DIRECTIVE_OPEN.len();
            continue;
        };

        let params = &text[open + DIRECTIVE_OPEN.len()..close];
        match decode(params) {
            Some(config) => {
                if open > seg_start {
                    segments.push(Segment::Text {
                        content: text[seg_start..open].to_string(),
                    });
                }
                segments.push(Segment::Map {
                    config,
                    raw: text[open..=close].to_string(),
                });
                seg_start = close + 1;
            }
            None => {
                log::debug!("undecodable directive preserved as text: {:?}", params);
            }
        }
        search = close + 1;
    }

    if seg_start < text.len() {
        segments.push(Segment::Text {
            content: text[seg_start..].to_string(),
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn reconstruct(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.source_text()).collect()
    }

    #[test]
    fn test_coordinate_scenario() {
        let segments = scan("Hello [MAP:default:40.7128,-74.0060:12] world");
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[0],
            Segment::Text {
                content: "Hello ".to_string()
            }
        );
        let Segment::Map { config, .. } = &segments[1] else {
            panic!("expected a map segment");
        };
        assert_eq!(config.coordinates, LatLng::new(40.7128, -74.0060));
        assert_eq!(config.style_key, "default");
        assert_eq!(config.zoom, 12);
        assert_eq!(
            segments[2],
            Segment::Text {
                content: " world".to_string()
            }
        );
    }

    #[test]
    fn test_no_directive_single_text_segment() {
        let segments = scan("Just plain prose.");
        assert_eq!(
            segments,
            vec![Segment::Text {
                content: "Just plain prose.".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_lossless_reconstruction() {
        let text = concat!(
            "Intro [MAP:default:1.0,2.0:5:Title] middle ",
            r#"[MAP:dark:3.0,4.0:8:geojson:inline:{"type":"Point","coordinates":[4.0,3.0]}]"#,
            " and [MAP:broken] outro"
        );
        let segments = scan(text);
        assert_eq!(reconstruct(&segments), text);
    }

    #[test]
    fn test_idempotence() {
        let text = "A [MAP:default:1.0,2.0:5] B [MAP:not valid] C";
        let first = scan(text);
        let second = scan(&reconstruct(&first));
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_directive_degrades_to_text() {
        let segments = scan("see [MAP:default] here");
        assert_eq!(
            segments,
            vec![Segment::Text {
                content: "see [MAP:default] here".to_string()
            }]
        );
    }

    #[test]
    fn test_unterminated_directive_preserved() {
        let segments = scan("dangling [MAP:default:1.0,2.0:5");
        assert_eq!(
            segments,
            vec![Segment::Text {
                content: "dangling [MAP:default:1.0,2.0:5".to_string()
            }]
        );
    }

    #[test]
    fn test_valid_directive_after_unterminated_one() {
        let segments = scan("x [MAP:oops y [MAP:default:1.0,2.0:5] z");
        // The unterminated opener stays literal while the inner well-formed
        // directive is still recognized.
        assert_eq!(reconstruct(&segments), "x [MAP:oops y [MAP:default:1.0,2.0:5] z");
        assert_eq!(segments[0].source_text(), "x [MAP:oops y ");
        assert!(matches!(segments[1], Segment::Map { .. }));
        assert_eq!(segments[2].source_text(), " z");
    }

    #[test]
    fn test_adjacent_directives() {
        let segments = scan("[MAP:default:1.0,2.0:5][MAP:dark:3.0,4.0:6]");
        assert_eq!(segments.len(), 2);
        assert!(matches!(segments[0], Segment::Map { .. }));
        assert!(matches!(segments[1], Segment::Map { .. }));
    }

    #[test]
    fn test_json_payload_with_brackets_scans_cleanly() {
        let text = concat!(
            "go ",
            r#"[MAP:default:0.0,0.0:3:animation:inline:{"coordinates":[[0,0],[1,1],[2,2]]}]"#,
            " stop"
        );
        let segments = scan(text);
        assert_eq!(segments.len(), 3);
        let Segment::Map { config, .. } = &segments[1] else {
            panic!("expected a map segment");
        };
        assert_eq!(config.animation.as_ref().unwrap().path.len(), 3);
        assert_eq!(segments[2].source_text(), " stop");
    }
}
