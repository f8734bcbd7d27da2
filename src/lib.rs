/// Redmine Formatter - Chrome Extension for Redmine issue lists
/// Built with Rust + WASM + Yew

mod issue_data;
mod links;
mod page;
mod extractor;
mod visibility;
mod batch;
mod messages;
mod template;
mod settings;
pub mod dom;
pub mod content;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use batch::{BatchError, BatchSummary, BatchTiming, batch_update};
pub use extractor::extract;
pub use issue_data::{BatchRequest, ColumnIndexMap, Field, IssueRecord};
pub use messages::{Reply, Request, Response, route};
pub use page::{HostPage, IssueRow, IssueTable, Menu, MenuEntry};
pub use template::{format_record, format_records};
pub use visibility::{HIDDEN_CLASS, set_hidden_for_unselected};

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Hook the content script into the Redmine page
#[wasm_bindgen]
pub fn start_content_script() -> Result<(), JsValue> {
    content::start()
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
