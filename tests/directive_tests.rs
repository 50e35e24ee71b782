//! End-to-end scanner/decoder properties over realistic prose.

use maptext::prelude::*;

fn reconstruct(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.source_text()).collect()
}

#[test]
fn test_scan_is_idempotent_over_reconstruction() {
    let inputs = [
        "no directives at all",
        "one [MAP:default:40.7128,-74.0060:12] directive",
        "broken [MAP:default] and [MAP:dark:1.0,2.0:4] mixed",
        "unterminated [MAP:default:1.0,2.0:4 trailing",
        "",
    ];
    for input in inputs {
        let first = scan(input);
        let second = scan(&reconstruct(&first));
        assert_eq!(first, second, "idempotence failed for {:?}", input);
    }
}

#[test]
fn test_lossless_reconstruction_with_nested_payloads() {
    let text = concat!(
        "Trip report. ",
        r#"[MAP:outdoor:46.5,10.5:11:Stelvio:animation:inline:{"coordinates":[[10.4,46.4],[10.5,46.5],[10.6,46.6]]}:duration=3000,color=#0000ff]"#,
        " then dinner at ",
        r#"[MAP:streets:46.49,10.42:15:markers:inline:Trattoria,46.49,10.42]"#,
        "."
    );
    let segments = scan(text);
    assert_eq!(reconstruct(&segments), text);
    assert_eq!(segments.iter().filter(|s| matches!(s, Segment::Map { .. })).count(), 2);
}

#[test]
fn test_decoder_totality_on_malformed_input() {
    assert!(decode("default").is_none());
    let segments = scan("see [MAP:default] here");
    assert_eq!(
        segments,
        vec![Segment::Text {
            content: "see [MAP:default] here".to_string()
        }]
    );
}

#[test]
fn test_full_directive_decodes_every_section() {
    let params = concat!(
        "winter:46.5,10.5:11:Pass",
        ":markers:inline:Summit,46.53,10.45,The top|Base,46.46,10.37",
        r#":geojson:inline:{"type":"LineString","coordinates":[[10.4,46.4],[10.5,46.5]]}:stroke=#222222,opacity=0.8"#,
        r#":animation:inline:{"coordinates":[[10.4,46.4],[10.5,46.5],[10.6,46.6]]}:duration=4000,loop=false"#
    );
    let config = decode(params).expect("directive should decode");
    assert_eq!(config.style_key, "winter");
    assert_eq!(config.zoom, 11);
    assert_eq!(config.title.as_deref(), Some("Pass"));
    assert_eq!(config.markers.len(), 2);
    assert_eq!(config.markers[0].description.as_deref(), Some("The top"));
    let geojson = config.geojson.expect("geojson should decode");
    assert_eq!(geojson.style.stroke, "#222222");
    assert_eq!(geojson.style.opacity, 0.8);
    let animation = config.animation.expect("animation should decode");
    assert_eq!(animation.duration_ms, 4000);
    assert!(!animation.looped);
}

#[test]
fn test_animation_failure_never_invalidates_map() {
    let text = r#"x [MAP:default:1.0,2.0:5:animation:inline:{"coordinates":"oops"}] y"#;
    let segments = scan(text);
    assert_eq!(segments.len(), 3);
    let Segment::Map { config, .. } = &segments[1] else {
        panic!("expected a map segment");
    };
    assert!(config.animation.is_none());
    assert_eq!(config.coordinates, LatLng::new(1.0, 2.0));
}

#[test]
fn test_malformed_geojson_isolation() {
    let text = "x [MAP:default:1.0,2.0:5:geojson:inline:{broken] y";
    // The unbalanced payload still closes the directive bracket at its
    // matching depth; the geojson section alone is dropped.
    let segments = scan("x [MAP:default:1.0,2.0:5:geojson:inline:not-json-at-all] y");
    let Segment::Map { config, .. } = &segments[1] else {
        panic!("expected a map segment");
    };
    assert!(config.geojson.is_none());
    assert_eq!(config.zoom, 5);
    // And a payload whose braces swallow the closer degrades wholesale.
    assert_eq!(
        scan(text),
        vec![Segment::Text {
            content: text.to_string()
        }]
    );
}

#[test]
fn test_segment_order_matches_source() {
    let text = "a [MAP:default:1.0,1.0:3] b [MAP:dark:2.0,2.0:4] c";
    let segments = scan(text);
    let kinds: Vec<&str> = segments
        .iter()
        .map(|s| match s {
            Segment::Text { .. } => "text",
            Segment::Map { .. } => "map",
        })
        .collect();
    assert_eq!(kinds, vec!["text", "map", "text", "map", "text"]);
}
