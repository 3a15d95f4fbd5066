use integration_tests::harness::Workspace;
use pretty_assertions::assert_eq;

const TAG_REPORT: &str = "\
Tag Counts: 
Tag,Count 
Untagged,8
sv_P1,2
sv_P2,1
SV_P3,0
sv_P4,0
sv_P5,0
email,3
";

const COMBINATION_REPORT: &str = "\
Port/Protocol Combination Counts:
Port,Protocol,Count
25,tcp,1
68,udp,0
23,tcp,1
31,udp,0
443,tcp,1
22,tcp,0
3389,tcp,0
0,icmp,0
110,tcp,1
993,tcp,1
143,tcp,1
49153,tcp,1
49154,tcp,1
49155,tcp,1
49156,tcp,1
49157,tcp,1
49158,tcp,1
80,tcp,1
1024,tcp,1
";

/// Sample VPC flow log against the sample lookup table
#[test]
fn sample_inputs_produce_both_reports() {
    let ws = Workspace::new();
    let lookup = ws.fixture("lookup.csv");
    let log = ws.fixture("flow.log");

    ws.run(&[lookup.to_str().unwrap(), log.to_str().unwrap()])
        .unwrap();

    assert_eq!(ws.tag_report(), TAG_REPORT);
    assert_eq!(ws.combination_report(), COMBINATION_REPORT);
}

#[test]
fn rerunning_overwrites_with_identical_reports() {
    let ws = Workspace::new();
    let lookup = ws.fixture("lookup.csv");
    let log = ws.fixture("flow.log");
    let args = [lookup.to_str().unwrap(), log.to_str().unwrap()];

    ws.run(&args).unwrap();
    let first = (ws.tag_report(), ws.combination_report());
    ws.run(&args).unwrap();
    let second = (ws.tag_report(), ws.combination_report());

    assert_eq!(first, second);
}

#[test]
fn numeric_protocols_in_lookup_match_named_protocols_in_reports() {
    let ws = Workspace::new();
    let lookup = ws.write("lookup.csv", "dstport,protocol,tag\n80,6,http\n443,6,https\n");
    let log = ws.write(
        "flow.log",
        "2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 49153 80 6 25 20000 1620140761 1620140821 ACCEPT OK\n\
         2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 49153 22 6 25 20000 1620140761 1620140821 ACCEPT OK\n",
    );

    ws.run(&[lookup.to_str().unwrap(), log.to_str().unwrap()])
        .unwrap();

    let tags = ws.tag_report();
    assert!(tags.contains("http,1\n"), "unexpected tag report: {tags}");
    assert!(tags.contains("Untagged,1\n"), "unexpected tag report: {tags}");
    let combos = ws.combination_report();
    assert!(combos.contains("80,tcp,1\n"), "unexpected combinations: {combos}");
    assert!(combos.contains("22,tcp,1\n"), "unexpected combinations: {combos}");
}

#[test]
fn missing_log_file_fails_without_writing_reports() {
    let ws = Workspace::new();
    let lookup = ws.fixture("lookup.csv");
    let log = ws.path().join("absent.log");

    let err = ws
        .run(&[lookup.to_str().unwrap(), log.to_str().unwrap()])
        .unwrap_err();

    assert!(err.contains("log file"), "unexpected error: {err}");
    assert!(err.contains("does not exist"), "unexpected error: {err}");
    assert!(!ws.output_dir().exists());
}

#[test]
fn single_positional_argument_is_a_usage_error() {
    let ws = Workspace::new();
    let lookup = ws.fixture("lookup.csv");

    let err = ws.run(&[lookup.to_str().unwrap()]).unwrap_err();

    assert!(err.contains("<LOG_FILE>"), "unexpected error: {err}");
}

#[test]
fn strict_mode_fails_on_short_records() {
    let ws = Workspace::new();
    let lookup = ws.fixture("lookup.csv");
    let log = ws.write("flow.log", "2 123456789012 eni-0a1b2c3d\n");

    let lenient = ws.run(&[lookup.to_str().unwrap(), log.to_str().unwrap()]);
    let strict = ws.run(&["--strict", lookup.to_str().unwrap(), log.to_str().unwrap()]);

    assert!(lenient.is_ok());
    assert!(ws.tag_report().contains("Untagged,0\n"));
    let err = strict.unwrap_err();
    assert!(err.contains("line 1"), "unexpected error: {err}");
}
