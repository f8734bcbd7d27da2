/// Table extraction: turn the selected issue rows into records

use crate::issue_data::{ColumnIndexMap, Field, IssueRecord};
use crate::links::{issue_id, resolve_href};
use crate::page::{HostPage, IssueRow, IssueTable};
use url::Url;

/// Extract one record per selected row, or per row when nothing is selected.
///
/// Missing table, columns or links never fail: they degrade to an empty
/// result or empty strings.
pub fn extract<P: HostPage>(page: &P) -> Vec<IssueRecord> {
    let Some(table) = page.issue_table() else {
        log::debug!("No issue table on this page");
        return Vec::new();
    };

    let columns = ColumnIndexMap::from_headers(&table.header_labels());
    let all_rows = table.rows();
    let selected: Vec<&<P::Table as IssueTable>::Row> =
        all_rows.iter().filter(|row| row.is_selected()).collect();

    // No selection is treated as "select all"
    let rows_to_process = if selected.is_empty() {
        all_rows.iter().collect()
    } else {
        selected
    };

    let base = page.origin();
    rows_to_process
        .into_iter()
        .map(|row| read_row(row, &columns, base.as_ref()))
        .collect()
}

fn read_row<R: IssueRow>(row: &R, columns: &ColumnIndexMap, base: Option<&Url>) -> IssueRecord {
    let mut record = IssueRecord::default();

    for field in Field::ALL {
        let text = columns
            .get(field)
            .and_then(|index| row.cell_text(index))
            .unwrap_or_default();
        record.set_column(field, text);
    }

    // Prefer the subject link, fall back to the issues column
    let url = [Field::Subject, Field::Issues]
        .into_iter()
        .map(|field| link_url(row, columns, field, base))
        .find(|url| !url.is_empty())
        .unwrap_or_default();

    record.id = issue_id(&url);
    record.url = url;
    record
}

/// Absolute URL of the link in a mapped column, or "" if there is none
pub(crate) fn link_url<R: IssueRow>(
    row: &R,
    columns: &ColumnIndexMap,
    field: Field,
    base: Option<&Url>,
) -> String {
    let Some(href) = columns.get(field).and_then(|index| row.cell_href(index)) else {
        return String::new();
    };

    match base {
        Some(base) => resolve_href(base, &href),
        None => match Url::parse(&href) {
            Ok(url) => url.into(),
            Err(_) => String::new(),
        },
    }
}
