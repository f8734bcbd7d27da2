/// Formatting extracted records with a `{field}` text template

use crate::issue_data::IssueRecord;

pub const DEFAULT_TEMPLATE: &str = "- [#{id}]({url})";

/// Render one line per record.
///
/// Each `{name}` naming a record field is replaced with that record's value.
/// Unknown placeholders and stray braces are kept verbatim, and substituted
/// values are never scanned again.
pub fn format_records(records: &[IssueRecord], template: &str) -> String {
    records
        .iter()
        .map(|record| format_record(record, template))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_record(record: &IssueRecord, template: &str) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let value = after_open
            .find('}')
            .and_then(|close| record.get(&after_open[..close]).map(|value| (close, value)));

        match value {
            Some((close, value)) => {
                output.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                output.push('{');
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Pretty JSON array of the records, for pasting into other tools
pub fn records_to_json(records: &[IssueRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
