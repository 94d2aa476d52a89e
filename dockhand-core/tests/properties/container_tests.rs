//! Property tests for `docker ps` output parsing

use proptest::prelude::*;

use dockhand_core::docker::{ContainerRecord, parse_container_list};

/// Field strategy: anything `docker ps` can print inside one column,
/// which never includes the `;` delimiter or line breaks.
fn field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.,:/()\\[\\]>-]{0,40}"
}

proptest! {
    /// Property: formatting a record and parsing the line round-trips all
    /// four fields exactly.
    #[test]
    fn format_then_parse_round_trips(
        name in field(),
        image in field(),
        status in field(),
        ports in field(),
    ) {
        // The parser trims the whole line, so the outermost fields cannot
        // carry outer whitespace; docker never prints any there either.
        let record = ContainerRecord {
            name: name.trim_start().to_string(),
            image,
            status,
            ports: ports.trim_end().to_string(),
        };
        let parsed = ContainerRecord::parse_line(&record.to_string());
        prop_assert_eq!(parsed, record);
    }

    /// Property: any status containing "up" in any case classifies as
    /// running.
    #[test]
    fn up_substring_means_running(
        prefix in "[a-tv-zA-TV-Z ]{0,10}",
        suffix in "[a-zA-Z ]{0,10}",
        up in "[uU][pP]",
    ) {
        let record = ContainerRecord {
            name: "c".to_string(),
            image: "img".to_string(),
            status: format!("{prefix}{up}{suffix}"),
            ports: String::new(),
        };
        prop_assert!(record.is_running());
    }

    /// Property: statuses without "up" classify as stopped.
    #[test]
    fn status_without_up_is_stopped(status in "[a-oq-zA-OQ-Z0-9 ()]{0,30}") {
        let record = ContainerRecord {
            name: "c".to_string(),
            image: "img".to_string(),
            status,
            ports: String::new(),
        };
        prop_assert!(!record.is_running());
    }

    /// Property: every non-blank input line yields exactly one record, in
    /// order, regardless of how many fields it carries.
    #[test]
    fn one_record_per_nonblank_line(lines in prop::collection::vec(field(), 0..8)) {
        let nonblank: Vec<&String> =
            lines.iter().filter(|l| !l.trim().is_empty()).collect();
        let output = lines.join("\n");
        let records = parse_container_list(&output);
        prop_assert_eq!(records.len(), nonblank.len());
        for (record, line) in records.iter().zip(&nonblank) {
            prop_assert_eq!(record.name.as_str(), line.trim());
        }
    }
}

#[test]
fn known_status_texts_classify_as_expected() {
    let up = ContainerRecord::parse_line("c;i;Up 3 hours;");
    assert!(up.is_running());
    let exited = ContainerRecord::parse_line("c;i;Exited (0) 2 days ago;");
    assert!(!exited.is_running());
    let shouting = ContainerRecord::parse_line("c;i;UP;");
    assert!(shouting.is_running());
}
