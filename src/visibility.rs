/// Hiding unselected rows of the issue list

use crate::page::{HostPage, IssueRow, IssueTable};

/// Class added to rows hidden by the extension
pub const HIDDEN_CLASS: &str = "redmine-formatter-hidden";

/// Stylesheet injected once into the host page
pub const HIDDEN_STYLE: &str = ".redmine-formatter-hidden { display: none !important; }";

/// Hide (or show again) every row whose checkbox is not checked.
///
/// Selected rows are left untouched, so they are never hidden here.
pub fn set_hidden_for_unselected<P: HostPage>(page: &P, hide: bool) {
    let Some(table) = page.issue_table() else {
        return;
    };

    let mut changed = 0;
    for row in table.rows() {
        if !row.is_selected() {
            row.set_hidden(hide);
            changed += 1;
        }
    }
    log::debug!("Set hidden={} on {} unselected rows", hide, changed);
}
