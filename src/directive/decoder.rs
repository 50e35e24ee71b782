//! Decodes one directive's parameter string into a typed [`MapConfig`].
//!
//! The decoder is total: malformed input never panics or errors out. A
//! missing or non-finite coordinate pair invalidates the whole directive
//! (`None`), while a broken optional section (`markers`, `geojson`,
//! `animation`) only nulls that section and leaves the rest of the config
//! intact.

use crate::core::config::{
    AnimationConfig, GeoJsonConfig, GeoJsonStyle, MapConfig, Marker, DEFAULT_ZOOM,
};
use crate::core::geo::LatLng;
use crate::data::geojson::GeoJsonGeometry;
use crate::directive::lexer::{lex, Section, Token, TokenKind};
use serde::Deserialize;

/// Decodes a directive parameter string (the text between `[MAP:` and `]`)
///
/// Returns `None` when the required fields are missing or unparsable, in
/// which case the caller degrades the directive to literal text.
pub fn decode(params: &str) -> Option<MapConfig> {
    let tokens = lex(params);
    let mut cursor = Cursor::new(&tokens);

    let style_key = cursor.next_field()?.trim();
    if style_key.is_empty() {
        return None;
    }
    let coordinates = parse_coordinates(cursor.next_field()?)?;
    let zoom = cursor
        .next_field()
        .map(parse_zoom)
        .unwrap_or(DEFAULT_ZOOM);

    let mut config = MapConfig::new(coordinates, style_key.to_string(), zoom);

    // The field after zoom is a title unless it opens a keyed section.
    if cursor.peek_kind() == Some(TokenKind::Field) {
        let title = cursor.next_field().unwrap_or_default().trim();
        if !title.is_empty() {
            config.title = Some(title.to_string());
        }
    }

    // Keyed sections are position-independent; each expects `inline` and a
    // payload right behind its keyword.
    while let Some(token) = cursor.next() {
        let TokenKind::Section(section) = token.kind else {
            log::debug!("ignoring stray directive field {:?}", token.text);
            continue;
        };
        let Some(payload) = cursor.section_payload() else {
            log::debug!("section {:?} missing inline payload", section);
            continue;
        };
        match section {
            Section::Markers => config.markers = parse_markers(payload),
            Section::GeoJson => config.geojson = parse_geojson(payload, cursor.style_suffix()),
            Section::Animation => {
                config.animation = parse_animation(payload, cursor.style_suffix())
            }
        }
    }

    Some(config)
}

/// Cursor over the lexer's token stream
struct Cursor<'a, 'b> {
    tokens: &'b [Token<'a>],
    pos: usize,
}

impl<'a, 'b> Cursor<'a, 'b> {
    fn new(tokens: &'b [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    fn next_field(&mut self) -> Option<&'a str> {
        self.next().map(|t| t.text)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    /// Consumes `inline` plus the payload field behind a section keyword
    fn section_payload(&mut self) -> Option<&'a str> {
        if self.peek_kind() != Some(TokenKind::Inline) {
            return None;
        }
        self.pos += 1;
        self.next_field()
    }

    /// Consumes an optional `key=value,key=value` styling field
    fn style_suffix(&mut self) -> Option<&'a str> {
        match self.tokens.get(self.pos) {
            Some(t) if t.kind == TokenKind::Field && t.text.contains('=') => {
                self.pos += 1;
                Some(t.text)
            }
            _ => None,
        }
    }
}

/// Parses `"<lat>,<lon>"`; both parts must be finite numbers
fn parse_coordinates(field: &str) -> Option<LatLng> {
    let (lat, lng) = field.split_once(',')?;
    let lat = parse_finite(lat)?;
    let lng = parse_finite(lng)?;
    Some(LatLng::new(lat, lng))
}

/// Parses a float, discarding non-numeric and non-finite results
fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_zoom(field: &str) -> u8 {
    field
        .trim()
        .parse::<i64>()
        .map(|z| z.clamp(0, 22) as u8)
        .unwrap_or(DEFAULT_ZOOM)
}

/// Parses `name,lat,lon` triples separated by `|`; triples with unparsable
/// coordinates are skipped individually
fn parse_markers(payload: &str) -> Vec<Marker> {
    let mut markers = Vec::new();
    for triple in payload.split('|') {
        let parts: Vec<&str> = triple.split(',').collect();
        if parts.len() < 3 {
            log::debug!("skipping malformed marker triple {:?}", triple);
            continue;
        }
        let (Some(lat), Some(lng)) = (parse_finite(parts[1]), parse_finite(parts[2])) else {
            log::debug!("skipping marker with non-numeric coordinates {:?}", triple);
            continue;
        };
        let mut marker = Marker::new(parts[0].trim().to_string(), lat, lng);
        if parts.len() > 3 {
            marker = marker.with_description(parts[3..].join(",").trim().to_string());
        }
        markers.push(marker);
    }
    markers
}

fn parse_geojson(payload: &str, suffix: Option<&str>) -> Option<GeoJsonConfig> {
    let data = match GeoJsonGeometry::from_str(payload.trim()) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("dropping geojson section: {}", e);
            return None;
        }
    };

    let mut style = GeoJsonStyle::default();
    for (key, value) in style_pairs(suffix) {
        match key {
            "fill" => style.fill = value.to_string(),
            "stroke" => style.stroke = value.to_string(),
            "opacity" => {
                if let Some(v) = parse_finite(value) {
                    style.opacity = v;
                }
            }
            "fillOpacity" => {
                if let Some(v) = parse_finite(value) {
                    style.fill_opacity = v;
                }
            }
            _ => log::debug!("ignoring unknown geojson style key {:?}", key),
        }
    }

    Some(GeoJsonConfig { data, style })
}

#[derive(Deserialize)]
struct AnimationPayload {
    coordinates: Vec<[f64; 2]>,
}

fn parse_animation(payload: &str, suffix: Option<&str>) -> Option<AnimationConfig> {
    let parsed: AnimationPayload = match serde_json::from_str(payload.trim()) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("dropping animation section: {}", e);
            return None;
        }
    };
    if parsed.coordinates.len() < 2 {
        log::warn!(
            "dropping animation section: path needs at least 2 points, got {}",
            parsed.coordinates.len()
        );
        return None;
    }
    if parsed
        .coordinates
        .iter()
        .any(|c| !c[0].is_finite() || !c[1].is_finite())
    {
        log::warn!("dropping animation section: non-finite path coordinate");
        return None;
    }

    // Payload coordinates follow GeoJSON [lon, lat] order.
    let path = parsed
        .coordinates
        .iter()
        .map(|c| LatLng::new(c[1], c[0]))
        .collect();

    let mut config = AnimationConfig::new(path);
    for (key, value) in style_pairs(suffix) {
        match key {
            "duration" => {
                if let Some(v) = parse_finite(value).filter(|v| *v > 0.0) {
                    config.duration_ms = v as u64;
                }
            }
            "color" => config.color = value.to_string(),
            "width" => {
                if let Some(v) = parse_finite(value).filter(|v| *v > 0.0) {
                    config.width = v;
                }
            }
            "autoStart" => {
                if let Ok(v) = value.trim().parse::<bool>() {
                    config.auto_start = v;
                }
            }
            "loop" => {
                if let Ok(v) = value.trim().parse::<bool>() {
                    config.looped = v;
                }
            }
            "loopDelay" => {
                if let Some(v) = parse_finite(value).filter(|v| *v >= 0.0) {
                    config.loop_delay_ms = v as u64;
                }
            }
            _ => log::debug!("ignoring unknown animation style key {:?}", key),
        }
    }

    Some(config)
}

/// Iterates the `key=value` pairs of an optional styling suffix
fn style_pairs(suffix: Option<&str>) -> impl Iterator<Item = (&str, &str)> {
    suffix
        .unwrap_or("")
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
}
