use protea::{PatternRecord, QueryParser};

fn catalog() -> Vec<PatternRecord> {
    vec![
        PatternRecord::new("persona", "Persona")
            .with_description("Ask the model to adopt a persona")
            .with_category("input semantics")
            .add_tag("role")
            .add_example("From now on, act as a security reviewer."),
        PatternRecord::new("few-shot", "Few Shot Examples")
            .with_description("Provide labeled examples before the task")
            .with_category("prompt structure")
            .add_example("This is a few shot example with two demonstrations."),
        PatternRecord::new("template", "Output Template")
            .with_description("Constrain output to a template")
            .with_category("output customization")
            .add_tag("format"),
    ]
}

#[test]
fn test_bare_term_filters() {
    let parser = QueryParser::new();
    let records = catalog();
    let hits = parser.filter("persona", &records);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "persona");
}

#[test]
fn test_implicit_and_narrows() {
    let parser = QueryParser::new();
    let records = catalog();
    // Both terms must appear somewhere in the record.
    let hits = parser.filter("output template", &records);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "template");
}

#[test]
fn test_a_not_b() {
    let parser = QueryParser::new();
    let records = catalog();
    // "examples" appears only in the few-shot record once "template" is excluded.
    let hits = parser.filter("examples NOT template", &records);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "few-shot");
}

#[test]
fn test_or_binds_looser_than_and() {
    let parser = QueryParser::new();
    let records = catalog();
    // persona OR (template AND format): matches persona and template.
    let hits = parser.filter("persona OR template format", &records);
    let ids: Vec<&str> = hits.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["persona", "template"]);
}

#[test]
fn test_phrase_is_contiguous() {
    let parser = QueryParser::new();
    let query = parser.parse(r#""few shot""#);
    let records = catalog();

    assert!(query.matches_record(&records[1]));

    let scrambled = PatternRecord::new("x", "x").with_description("shot a few times");
    assert!(!query.matches_record(&scrambled));
}

#[test]
fn test_fuzzy_suffix_tolerance() {
    let parser = QueryParser::new();
    let typo = PatternRecord::new("x", "x").with_description("a promt pattern");
    let worse = PatternRecord::new("y", "y").with_description("a prmt pattern");

    let query = parser.parse("prompt~1");
    assert!(query.matches_record(&typo));
    assert!(!query.matches_record(&worse));
}

#[test]
fn test_default_fuzzy_mode() {
    let strict = QueryParser::new();
    let lenient = QueryParser::new().with_default_fuzzy(1);
    let typo = PatternRecord::new("x", "x").with_description("a promt pattern");

    assert!(!strict.parse("prompt").matches_record(&typo));
    assert!(lenient.parse("prompt").matches_record(&typo));
}

#[test]
fn test_field_or_semantics() {
    let parser = QueryParser::new();
    let records = catalog();
    // "role" lives only in a tag; still a match for the record.
    let hits = parser.filter("role", &records);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "persona");
}

#[test]
fn test_malformed_queries_never_panic() {
    let parser = QueryParser::new();
    let records = catalog();

    for input in ["AND", "a AND", "NOT", r#"""#, "OR OR OR", "~2"] {
        // Degrades to a literal phrase; matching just returns few/no hits.
        let _ = parser.filter(input, &records);
    }

    // A dangling operator means the raw text is searched literally.
    let query = parser.parse("persona AND");
    assert_eq!(query.to_string(), "\"persona and\"");
}

#[test]
fn test_case_insensitive_matching() {
    let parser = QueryParser::new();
    let records = catalog();
    let hits = parser.filter("PERSONA", &records);
    assert_eq!(hits.len(), 1);
}
