/// Batch field updates through the host page's own context menu

use thiserror::Error;

use crate::extractor::link_url;
use crate::issue_data::{BatchRequest, ColumnIndexMap, Field};
use crate::links::{issue_id, retarget_issue_href};
use crate::page::{HostPage, IssueTable, Menu, MenuEntry, selected_rows};

#[derive(Debug, Error, PartialEq)]
pub enum BatchError {
    #[error("No issues are selected")]
    NoSelection,
    #[error("Context menu did not open")]
    MenuUnavailable,
    #[error("Context menu has no \"{0}\" submenu")]
    SubmenuNotFound(String),
}

/// Waits used while driving the context menu
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTiming {
    /// Upper bound for the context menu to render after the trigger click
    pub menu_timeout_ms: u32,
    /// How often to look for the rendered menu
    pub poll_interval_ms: u32,
    /// Pause after each row so the host page is not flooded with requests
    pub row_delay_ms: u32,
}

impl Default for BatchTiming {
    fn default() -> Self {
        BatchTiming {
            menu_timeout_ms: 2000,
            poll_interval_ms: 50,
            row_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub applied: usize,
    pub skipped: usize,
}

/// Apply `request` to every selected row, one row at a time.
///
/// Fails fast when nothing is selected, the context menu never opens, or
/// the requested submenu does not exist. Rows without a derivable issue ID
/// are skipped. Whether the host page accepted each click is not observed.
pub async fn batch_update<P: HostPage>(
    page: &P,
    request: &BatchRequest,
    timing: &BatchTiming,
) -> Result<BatchSummary, BatchError> {
    let table = page.issue_table().ok_or(BatchError::NoSelection)?;
    let rows = selected_rows(&table);
    let first = rows.first().ok_or(BatchError::NoSelection)?;

    let menu = open_menu(page, first, timing).await?;
    let submenu = menu
        .submenu(&request.key)
        .ok_or_else(|| BatchError::SubmenuNotFound(request.key.clone()))?;

    let columns = ColumnIndexMap::from_headers(&table.header_labels());
    let base = page.origin();
    let mut summary = BatchSummary::default();

    for row in &rows {
        let id = issue_id(&link_url(row, &columns, Field::Subject, base.as_ref()));
        if id.is_empty() {
            summary.skipped += 1;
            continue;
        }

        match submenu.entry(&request.value) {
            Some(entry) => {
                let href = retarget_issue_href(&entry.href(), &id);
                entry.set_href(&href);
                entry.activate();
                summary.applied += 1;
            }
            None => {
                log::warn!("No \"{}\" entry under \"{}\" for issue #{}", request.value, request.key, id);
                summary.skipped += 1;
            }
        }

        page.pause(timing.row_delay_ms).await;
    }

    log::info!(
        "Batch {}={}: {} applied, {} skipped",
        request.key,
        request.value,
        summary.applied,
        summary.skipped
    );
    Ok(summary)
}

async fn open_menu<P: HostPage>(
    page: &P,
    row: &<P::Table as IssueTable>::Row,
    timing: &BatchTiming,
) -> Result<P::Menu, BatchError> {
    if !page.open_context_menu(row) {
        log::warn!("Selected row has no context menu trigger");
        return Err(BatchError::MenuUnavailable);
    }

    let poll = timing.poll_interval_ms.max(1);
    let mut waited = 0;
    loop {
        if let Some(menu) = page.context_menu() {
            log::debug!("Context menu ready after {} ms", waited);
            return Ok(menu);
        }
        if waited >= timing.menu_timeout_ms {
            log::warn!("Context menu not rendered after {} ms", waited);
            return Err(BatchError::MenuUnavailable);
        }
        page.pause(poll).await;
        waited += poll;
    }
}
