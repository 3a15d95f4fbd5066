use crate::conf::FieldLayout;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Severity, Source};
use crate::protocol::UnknownProtocolPolicy;
use crate::tagging::{
    ClassificationError, Classifier, ClassifyOptions, ClassifySummary, KeyCounts, KeyTuple,
    LineOutcome, TagTables, UNTAGGED, build_tag_tables,
};
use pretty_assertions::assert_eq;

const LOOKUP: &str = "dstport,protocol,tag\n80,tcp,http\n443,tcp,https\n68,udp,dhcp\n";

fn record(dstport: &str, protocol: &str) -> String {
    format!(
        "2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 49153 {dstport} {protocol} 25 20000 1620140761 1620140821 ACCEPT OK"
    )
}

fn key(values: &[&str]) -> KeyTuple {
    values.iter().copied().collect()
}

fn tables() -> TagTables {
    build_tag_tables(LOOKUP, &mut Diagnostics::new()).unwrap()
}

fn run(
    tables: &mut TagTables,
    layout: &FieldLayout,
    options: ClassifyOptions,
    lines: &[String],
    diagnostics: &mut Diagnostics,
) -> Result<ClassifySummary, ClassificationError> {
    let mut classifier = Classifier::new(layout, &tables.header, &tables.index, options, diagnostics);
    classifier.classify(
        lines.iter().map(String::as_str),
        &mut tables.tag_counts,
        &mut tables.key_counts,
        diagnostics,
    )
}

#[test]
fn matched_and_unmatched_records_are_tallied() {
    // Arrange
    let layout = FieldLayout::default();
    let mut tables = build_tag_tables(
        "dstport,protocol,tag\n80,6,http\n443,6,https\n",
        &mut Diagnostics::new(),
    )
    .unwrap();
    let lines = vec![record("80", "6"), record("22", "6")];
    let mut diagnostics = Diagnostics::new();

    // Act
    run(&mut tables, &layout, ClassifyOptions::default(), &lines, &mut diagnostics).unwrap();

    // Assert
    assert_eq!(tables.tag_counts.get("http"), Some(1));
    assert_eq!(tables.tag_counts.get("https"), Some(0));
    assert_eq!(tables.tag_counts.get(UNTAGGED), Some(1));
    assert_eq!(tables.key_counts.get(&key(&["80", "tcp"])), Some(1));
    assert_eq!(tables.key_counts.get(&key(&["443", "tcp"])), Some(0));
    assert_eq!(tables.key_counts.get(&key(&["22", "tcp"])), Some(1));
    assert!(diagnostics.is_empty());
}

#[test]
fn protocol_number_is_rendered_as_name_in_key() {
    let layout = FieldLayout::default();
    let mut t = tables();
    let mut diagnostics = Diagnostics::new();
    let mut classifier = Classifier::new(
        &layout,
        &t.header,
        &t.index,
        ClassifyOptions::default(),
        &mut diagnostics,
    );

    let outcome = classifier
        .classify_line(
            1,
            &record("68", "17"),
            &mut t.tag_counts,
            &mut t.key_counts,
            &mut diagnostics,
        )
        .unwrap();

    assert_eq!(outcome, LineOutcome::Tagged);
    assert_eq!(t.tag_counts.get("dhcp"), Some(1));
    assert_eq!(t.key_counts.get(&key(&["68", "udp"])), Some(1));
}

#[test]
fn tag_total_equals_processed_records_and_blanks_are_skipped() {
    // Arrange
    let layout = FieldLayout::default();
    let mut t = tables();
    let lines = vec![
        record("80", "6"),
        String::new(),
        record("443", "6"),
        "   ".to_string(),
        record("443", "6"),
        record("8080", "6"),
    ];
    let mut diagnostics = Diagnostics::new();

    // Act
    let summary = run(&mut t, &layout, ClassifyOptions::default(), &lines, &mut diagnostics).unwrap();

    // Assert
    assert_eq!(
        summary,
        ClassifySummary {
            processed: 4,
            skipped_blank: 2,
            rejected: 0,
        }
    );
    assert_eq!(t.tag_counts.total(), summary.processed);
    assert_eq!(t.key_counts.total(), summary.processed);
    assert_eq!(t.tag_counts.get("https"), Some(2));
    assert_eq!(t.tag_counts.get(UNTAGGED), Some(1));
}

#[test]
fn keys_seen_only_in_logs_are_counted_after_lookup_keys() {
    let layout = FieldLayout::default();
    let mut t = tables();
    let lines = vec![record("22", "6"), record("80", "6"), record("22", "6")];

    run(&mut t, &layout, ClassifyOptions::default(), &lines, &mut Diagnostics::new()).unwrap();

    let entries: Vec<_> = t
        .key_counts
        .iter()
        .map(|(k, c)| (k.to_string(), c))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("80,tcp".to_string(), 1),
            ("443,tcp".to_string(), 0),
            ("68,udp".to_string(), 0),
            ("22,tcp".to_string(), 2),
        ]
    );
}

#[test]
fn wrong_token_count_is_reported_but_still_classified() {
    // Arrange
    let layout = FieldLayout::default();
    let mut t = tables();
    let lines = vec![format!("{} trailing", record("443", "6"))];
    let mut diagnostics = Diagnostics::new();

    // Act
    let summary = run(&mut t, &layout, ClassifyOptions::default(), &lines, &mut diagnostics).unwrap();

    // Assert
    assert_eq!(summary.processed, 1);
    assert_eq!(t.tag_counts.get("https"), Some(1));

    let warnings: Vec<_> = diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].source, Source::Log);
    assert_eq!(
        warnings[0].kind,
        DiagnosticKind::MalformedRow {
            expected: 14,
            actual: 15
        }
    );
}

#[test]
fn short_record_is_skipped_when_lenient() {
    // Arrange
    let layout = FieldLayout::default();
    let mut t = tables();
    let lines = vec![
        "2 123456789012 eni-0a1b2c3d 10.0.1.201".to_string(),
        record("80", "6"),
    ];
    let mut diagnostics = Diagnostics::new();

    // Act
    let summary = run(&mut t, &layout, ClassifyOptions::default(), &lines, &mut diagnostics).unwrap();

    // Assert
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(t.tag_counts.total(), 1);

    let errors: Vec<_> = diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, Some(1));
    assert_eq!(
        errors[0].kind,
        DiagnosticKind::RecordFormat {
            column: "dstport".into(),
            index: 6,
            tokens: 4
        }
    );
    // the malformed-row warning precedes the rejection
    assert_eq!(diagnostics.warnings().count(), 1);
}

#[test]
fn short_record_aborts_when_strict() {
    let layout = FieldLayout::default();
    let mut t = tables();
    let lines = vec![record("80", "6"), "2 123456789012".to_string()];
    let options = ClassifyOptions {
        strict: true,
        ..ClassifyOptions::default()
    };

    let err = run(&mut t, &layout, options, &lines, &mut Diagnostics::new()).unwrap_err();

    assert_eq!(
        err,
        ClassificationError::RecordFormat {
            line: 2,
            column: "dstport".into(),
            index: 6,
            tokens: 2,
        }
    );
}

#[test]
fn unknown_protocol_passes_through_with_one_warning_per_code() {
    // Arrange
    let layout = FieldLayout::default();
    let mut t = tables();
    let lines = vec![record("80", "255"), record("80", "255"), record("80", "6")];
    let mut diagnostics = Diagnostics::new();

    // Act
    run(&mut t, &layout, ClassifyOptions::default(), &lines, &mut diagnostics).unwrap();

    // Assert
    assert_eq!(t.key_counts.get(&key(&["80", "255"])), Some(2));
    assert_eq!(t.tag_counts.get(UNTAGGED), Some(2));
    assert_eq!(t.tag_counts.get("http"), Some(1));

    let warnings: Vec<_> = diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].kind,
        DiagnosticKind::UnknownProtocol { code: "255".into() }
    );
}

#[test]
fn unknown_protocol_is_rejected_under_reject_policy() {
    let layout = FieldLayout::default();
    let mut t = tables();
    let lines = vec![record("80", "255")];
    let options = ClassifyOptions {
        unknown_protocol: UnknownProtocolPolicy::Reject,
        ..ClassifyOptions::default()
    };
    let mut diagnostics = Diagnostics::new();

    let summary = run(&mut t, &layout, options, &lines, &mut diagnostics).unwrap();

    assert_eq!(summary.rejected, 1);
    assert_eq!(t.tag_counts.total(), 0);
    assert!(!t.key_counts.contains(&key(&["80", "255"])));
    let error = diagnostics.errors().next().unwrap();
    assert_eq!(error.severity, Severity::Error);
    assert_eq!(error.kind, DiagnosticKind::UnknownProtocol { code: "255".into() });
}

#[test]
fn fields_missing_from_layout_are_dropped_from_the_key() {
    // Arrange
    let layout = FieldLayout::from_mapping([("dstport", 0), ("protocol", 1)]).unwrap();
    let mut t = build_tag_tables(
        "dstport,vlan,protocol,tag\n80,7,tcp,http\n",
        &mut Diagnostics::new(),
    )
    .unwrap();
    let mut diagnostics = Diagnostics::new();

    // Act
    let classifier = Classifier::new(
        &layout,
        &t.header,
        &t.index,
        ClassifyOptions::default(),
        &mut diagnostics,
    );

    // Assert
    let columns: Vec<_> = classifier.columns().iter().map(|c| c.index).collect();
    assert_eq!(columns, vec![0, 1]);
    let warning = diagnostics.warnings().next().unwrap();
    assert_eq!(warning.kind, DiagnosticKind::UnknownField { field: "vlan".into() });

    drop(classifier);
    let lines = vec!["80 6".to_string()];
    run(&mut t, &layout, ClassifyOptions::default(), &lines, &mut Diagnostics::new()).unwrap();
    assert_eq!(t.key_counts.get(&key(&["80", "tcp"])), Some(1));
}

#[test]
fn partitioned_classification_merges_to_sequential_result() {
    // Arrange
    let layout = FieldLayout::default();
    let lines: Vec<String> = [
        ("80", "6"),
        ("22", "6"),
        ("443", "6"),
        ("68", "17"),
        ("22", "6"),
        ("53", "17"),
        ("80", "6"),
    ]
    .iter()
    .map(|(port, proto)| record(port, proto))
    .collect();

    let mut sequential = tables();
    run(
        &mut sequential,
        &layout,
        ClassifyOptions::default(),
        &lines,
        &mut Diagnostics::new(),
    )
    .unwrap();

    // Act
    let mut merged = tables();
    for chunk in lines.chunks(3) {
        let mut part = tables();
        run(&mut part, &layout, ClassifyOptions::default(), chunk, &mut Diagnostics::new())
            .unwrap();
        merged.tag_counts.merge(&part.tag_counts);
        merged.key_counts.merge(&part.key_counts);
    }

    // Assert
    assert_eq!(merged.tag_counts, sequential.tag_counts);
    for (k, count) in sequential.key_counts.iter() {
        assert_eq!(merged.key_counts.get(k), Some(count), "key {k}");
    }
    assert_eq!(merged.key_counts.len(), sequential.key_counts.len());
}

#[test]
fn key_counts_match_per_key_line_counts() {
    let layout = FieldLayout::default();
    let mut t = tables();
    let lines: Vec<String> = (0..50)
        .map(|i| record(["80", "22", "443", "8443"][i % 4], "6"))
        .collect();

    run(&mut t, &layout, ClassifyOptions::default(), &lines, &mut Diagnostics::new()).unwrap();

    let mut expected = KeyCounts::new();
    for port in ["80", "22", "443", "8443"] {
        let count = (0..50).filter(|i| ["80", "22", "443", "8443"][i % 4] == port).count() as u64;
        expected.add(&key(&[port, "tcp"]), count);
    }
    for (k, count) in expected.iter() {
        assert_eq!(t.key_counts.get(k), Some(count), "key {k}");
    }
}
