/// Access to the host page, abstracted so the scraping and batch logic
/// can run against the live DOM or against an in-memory page in tests.
use url::Url;

/// The rendered issue list
pub trait IssueTable {
    type Row: IssueRow;

    /// Text of every header cell, in column order
    fn header_labels(&self) -> Vec<String>;

    /// Body rows in document order
    fn rows(&self) -> Vec<Self::Row>;
}

/// One body row of the issue list
pub trait IssueRow {
    /// Whether the row's checkbox is checked right now
    fn is_selected(&self) -> bool;

    /// Trimmed text of the cell at `index`, if the row has that many cells
    fn cell_text(&self, index: usize) -> Option<String>;

    /// Raw `href` of the first link inside the cell at `index`
    fn cell_href(&self, index: usize) -> Option<String>;

    fn set_hidden(&self, hidden: bool);
}

/// A (sub)menu of the host page's context menu
pub trait Menu: Sized {
    type Entry: MenuEntry;

    /// Nested menu under the entry whose label equals `label`
    fn submenu(&self, label: &str) -> Option<Self>;

    /// Entry whose label equals `label`
    fn entry(&self, label: &str) -> Option<Self::Entry>;
}

pub trait MenuEntry {
    fn href(&self) -> String;
    fn set_href(&self, href: &str);
    fn activate(&self);
}

#[allow(async_fn_in_trait)]
pub trait HostPage {
    type Table: IssueTable;
    type Menu: Menu;

    fn issue_table(&self) -> Option<Self::Table>;

    /// Base URL that relative issue links are resolved against
    fn origin(&self) -> Option<Url>;

    /// Activate the row's context menu trigger. Returns false when the row has none.
    fn open_context_menu(&self, row: &<Self::Table as IssueTable>::Row) -> bool;

    /// The context menu, once it is open and rendered
    fn context_menu(&self) -> Option<Self::Menu>;

    async fn pause(&self, ms: u32);
}

/// Rows whose checkbox is checked, in document order
pub fn selected_rows<T: IssueTable>(table: &T) -> Vec<T::Row> {
    table.rows().into_iter().filter(|row| row.is_selected()).collect()
}
