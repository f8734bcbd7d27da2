/// Live host page, backed by web-sys

use js_sys::{Function, Promise};
use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::page::{HostPage, IssueRow, IssueTable, Menu, MenuEntry};
use crate::visibility::{HIDDEN_CLASS, HIDDEN_STYLE};

const ISSUE_TABLE: &str = "#content table.list";
const CHECKED_BOX: &str = "input[type=\"checkbox\"]:checked";
const MENU_TRIGGER: &str = ".js-contextmenu";
const CONTEXT_MENU: &str = "#context-menu";
const STYLE_ID: &str = "redmine-formatter-style";

#[derive(Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> DomPage {
        DomPage { document }
    }

    pub fn current() -> Option<DomPage> {
        web_sys::window()?.document().map(DomPage::new)
    }
}

#[derive(Clone)]
pub struct DomTable(Element);

#[derive(Clone)]
pub struct DomRow(Element);

#[derive(Clone)]
pub struct DomMenu(Element);

#[derive(Clone)]
pub struct DomEntry(Element);

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => elements(list),
        Err(e) => {
            log::warn!("Bad selector {}: {:?}", selector, e);
            Vec::new()
        }
    }
}

fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn trimmed_text(element: &Element) -> String {
    element.text_content().unwrap_or_default().trim().to_string()
}

fn click(element: &Element) {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => html.click(),
        None => log::warn!("Cannot click <{}>", element.tag_name()),
    }
}

impl IssueTable for DomTable {
    type Row = DomRow;

    fn header_labels(&self) -> Vec<String> {
        query_all(&self.0, "th").iter().map(trimmed_text).collect()
    }

    fn rows(&self) -> Vec<DomRow> {
        query_all(&self.0, "tbody tr").into_iter().map(DomRow).collect()
    }
}

impl DomRow {
    fn cell(&self, index: usize) -> Option<Element> {
        let index = u32::try_from(index).ok()?;
        self.0.get_elements_by_tag_name("td").item(index)
    }
}

impl IssueRow for DomRow {
    fn is_selected(&self) -> bool {
        query(&self.0, CHECKED_BOX).is_some()
    }

    fn cell_text(&self, index: usize) -> Option<String> {
        self.cell(index).map(|cell| trimmed_text(&cell))
    }

    fn cell_href(&self, index: usize) -> Option<String> {
        let cell = self.cell(index)?;
        query(&cell, "a")?.get_attribute("href")
    }

    fn set_hidden(&self, hidden: bool) {
        if let Err(e) = self.0.class_list().toggle_with_force(HIDDEN_CLASS, hidden) {
            log::warn!("Failed to toggle row visibility: {:?}", e);
        }
    }
}

impl Menu for DomMenu {
    type Entry = DomEntry;

    fn submenu(&self, label: &str) -> Option<DomMenu> {
        let item = query_all(&self.0, "li a")
            .into_iter()
            .find(|link| trimmed_text(link) == label)?;
        let parent = item.closest("li").ok().flatten()?;
        query(&parent, "ul").map(DomMenu)
    }

    fn entry(&self, label: &str) -> Option<DomEntry> {
        query_all(&self.0, "a")
            .into_iter()
            .find(|link| trimmed_text(link) == label)
            .map(DomEntry)
    }
}

impl MenuEntry for DomEntry {
    fn href(&self) -> String {
        self.0.get_attribute("href").unwrap_or_default()
    }

    fn set_href(&self, href: &str) {
        if let Err(e) = self.0.set_attribute("href", href) {
            log::warn!("Failed to rewrite menu link: {:?}", e);
        }
    }

    fn activate(&self) {
        click(&self.0);
    }
}

impl HostPage for DomPage {
    type Table = DomTable;
    type Menu = DomMenu;

    fn issue_table(&self) -> Option<DomTable> {
        self.document.query_selector(ISSUE_TABLE).ok().flatten().map(DomTable)
    }

    fn origin(&self) -> Option<Url> {
        let location = self.document.location()?;
        let origin = location.origin().ok()?;
        Url::parse(&origin).ok()
    }

    /// Redmine keeps the previous menu's links in the hidden container
    /// until the new menu arrives, so they are cleared before the click.
    fn open_context_menu(&self, row: &DomRow) -> bool {
        let Some(trigger) = query(&row.0, MENU_TRIGGER) else {
            return false;
        };

        if let Some(stale) = self.document.query_selector(CONTEXT_MENU).ok().flatten() {
            stale.set_inner_html("");
        }
        click(&trigger);
        true
    }

    /// Open means shown and holding at least one link.
    fn context_menu(&self) -> Option<DomMenu> {
        let menu = self.document.query_selector(CONTEXT_MENU).ok().flatten()?;
        if !is_shown(&menu) {
            return None;
        }
        query(&menu, "li a")?;
        Some(DomMenu(menu))
    }

    async fn pause(&self, ms: u32) {
        if let Err(e) = sleep(ms).await {
            log::warn!("Timer failed: {:?}", e);
        }
    }
}

fn is_shown(element: &Element) -> bool {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return true;
    };
    if html.hidden() {
        return false;
    }
    html.style()
        .get_property_value("display")
        .map(|display| display.trim() != "none")
        .unwrap_or(true)
}

async fn sleep(ms: u32) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
    let promise = timer_promise(|resolve| {
        window.set_timeout_with_callback_and_timeout_and_arguments_0(resolve, timeout)
    });
    JsFuture::from(promise).await.map(|_| ())
}

/// Promise settled by a timer. If `schedule` cannot register the timer the
/// promise rejects with its error instead of staying pending.
pub fn timer_promise<F>(schedule: F) -> Promise
where
    F: FnOnce(&Function) -> Result<i32, JsValue>,
{
    let mut schedule = Some(schedule);
    Promise::new(&mut |resolve, reject| {
        let Some(schedule) = schedule.take() else {
            return;
        };
        if let Err(e) = schedule(&resolve) {
            log::warn!("setTimeout failed: {:?}", e);
            if let Err(e) = reject.call1(&JsValue::NULL, &e) {
                log::error!("Failed to reject timer promise: {:?}", e);
            }
        }
    })
}

/// Add the stylesheet that hides rows carrying `HIDDEN_CLASS`. Safe to call twice.
pub fn install_hidden_style(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(HIDDEN_STYLE));

    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document
            .document_element()
            .ok_or("document has no root element")?
            .append_child(&style)?,
    };
    Ok(())
}
