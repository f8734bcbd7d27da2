/// In-memory host page used by unit tests
use std::cell::RefCell;
use std::rc::Rc;

use url::Url;

use crate::page::{HostPage, IssueRow, IssueTable, Menu, MenuEntry};

pub struct FakeRow {
    selected: bool,
    cells: Vec<(String, Option<String>)>,
    has_trigger: bool,
}

impl FakeRow {
    pub fn new(selected: bool) -> FakeRow {
        FakeRow {
            selected,
            cells: Vec::new(),
            has_trigger: true,
        }
    }

    pub fn cell(mut self, text: &str, href: Option<&str>) -> FakeRow {
        self.cells.push((text.to_string(), href.map(str::to_string)));
        self
    }

    pub fn without_trigger(mut self) -> FakeRow {
        self.has_trigger = false;
        self
    }
}

struct RowState {
    row: FakeRow,
    hidden: bool,
}

#[derive(Default)]
struct PageState {
    rows: Vec<RowState>,
    menu_open: bool,
    pauses_since_open: u32,
    pauses: Vec<u32>,
    trigger_clicks: Vec<usize>,
    activated: Vec<String>,
}

pub struct MenuNode {
    label: String,
    href: RefCell<String>,
    children: Vec<Rc<MenuNode>>,
}

impl MenuNode {
    fn new(label: &str, href: &str, children: Vec<Rc<MenuNode>>) -> Rc<MenuNode> {
        Rc::new(MenuNode {
            label: label.to_string(),
            href: RefCell::new(href.to_string()),
            children,
        })
    }
}

#[derive(Clone)]
pub struct FakePage {
    headers: Option<Vec<String>>,
    state: Rc<RefCell<PageState>>,
    menu: Option<Rc<MenuNode>>,
    menu_delay_pauses: u32,
}

impl FakePage {
    pub fn new(headers: &[&str], rows: Vec<FakeRow>) -> FakePage {
        let state = PageState {
            rows: rows
                .into_iter()
                .map(|row| RowState { row, hidden: false })
                .collect(),
            ..PageState::default()
        };

        FakePage {
            headers: Some(headers.iter().map(|h| h.to_string()).collect()),
            state: Rc::new(RefCell::new(state)),
            menu: None,
            menu_delay_pauses: 0,
        }
    }

    pub fn without_table() -> FakePage {
        FakePage {
            headers: None,
            ..FakePage::new(&[], Vec::new())
        }
    }

    /// Context menu with one submenu per `(label, [(entry label, href)])`
    pub fn with_menu(mut self, submenus: Vec<(&str, Vec<(&str, &str)>)>) -> FakePage {
        let children = submenus
            .into_iter()
            .map(|(label, entries)| {
                let entries = entries
                    .into_iter()
                    .map(|(entry, href)| MenuNode::new(entry, href, Vec::new()))
                    .collect();
                MenuNode::new(label, "", entries)
            })
            .collect();
        self.menu = Some(MenuNode::new("", "", children));
        self
    }

    /// The menu only renders after this many pauses following the trigger click
    pub fn menu_renders_after(mut self, pauses: u32) -> FakePage {
        self.menu_delay_pauses = pauses;
        self
    }

    pub fn hidden(&self) -> Vec<bool> {
        self.state.borrow().rows.iter().map(|r| r.hidden).collect()
    }

    pub fn pauses(&self) -> Vec<u32> {
        self.state.borrow().pauses.clone()
    }

    pub fn trigger_clicks(&self) -> Vec<usize> {
        self.state.borrow().trigger_clicks.clone()
    }

    /// Entry hrefs at the moment each entry was activated
    pub fn activated(&self) -> Vec<String> {
        self.state.borrow().activated.clone()
    }
}

#[derive(Clone)]
pub struct FakeTable {
    headers: Vec<String>,
    state: Rc<RefCell<PageState>>,
}

impl IssueTable for FakeTable {
    type Row = FakeRowHandle;

    fn header_labels(&self) -> Vec<String> {
        self.headers.clone()
    }

    fn rows(&self) -> Vec<FakeRowHandle> {
        (0..self.state.borrow().rows.len())
            .map(|index| FakeRowHandle {
                state: self.state.clone(),
                index,
            })
            .collect()
    }
}

pub struct FakeRowHandle {
    state: Rc<RefCell<PageState>>,
    index: usize,
}

impl IssueRow for FakeRowHandle {
    fn is_selected(&self) -> bool {
        self.state.borrow().rows[self.index].row.selected
    }

    fn cell_text(&self, index: usize) -> Option<String> {
        let state = self.state.borrow();
        state.rows[self.index]
            .row
            .cells
            .get(index)
            .map(|(text, _)| text.trim().to_string())
    }

    fn cell_href(&self, index: usize) -> Option<String> {
        let state = self.state.borrow();
        state.rows[self.index]
            .row
            .cells
            .get(index)
            .and_then(|(_, href)| href.clone())
    }

    fn set_hidden(&self, hidden: bool) {
        self.state.borrow_mut().rows[self.index].hidden = hidden;
    }
}

pub struct FakeMenu {
    node: Rc<MenuNode>,
    state: Rc<RefCell<PageState>>,
}

impl Menu for FakeMenu {
    type Entry = FakeEntry;

    fn submenu(&self, label: &str) -> Option<FakeMenu> {
        self.node
            .children
            .iter()
            .find(|child| child.label == label && !child.children.is_empty())
            .map(|child| FakeMenu {
                node: child.clone(),
                state: self.state.clone(),
            })
    }

    fn entry(&self, label: &str) -> Option<FakeEntry> {
        self.node
            .children
            .iter()
            .find(|child| child.label == label)
            .map(|child| FakeEntry {
                node: child.clone(),
                state: self.state.clone(),
            })
    }
}

pub struct FakeEntry {
    node: Rc<MenuNode>,
    state: Rc<RefCell<PageState>>,
}

impl MenuEntry for FakeEntry {
    fn href(&self) -> String {
        self.node.href.borrow().clone()
    }

    fn set_href(&self, href: &str) {
        *self.node.href.borrow_mut() = href.to_string();
    }

    fn activate(&self) {
        let href = self.href();
        self.state.borrow_mut().activated.push(href);
    }
}

impl HostPage for FakePage {
    type Table = FakeTable;
    type Menu = FakeMenu;

    fn issue_table(&self) -> Option<FakeTable> {
        self.headers.as_ref().map(|headers| FakeTable {
            headers: headers.clone(),
            state: self.state.clone(),
        })
    }

    fn origin(&self) -> Option<Url> {
        Url::parse("https://redmine.example.com/projects/web/issues").ok()
    }

    fn open_context_menu(&self, row: &FakeRowHandle) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.rows[row.index].row.has_trigger {
            return false;
        }
        state.trigger_clicks.push(row.index);
        state.menu_open = true;
        state.pauses_since_open = 0;
        true
    }

    fn context_menu(&self) -> Option<FakeMenu> {
        let state = self.state.borrow();
        if !state.menu_open || state.pauses_since_open < self.menu_delay_pauses {
            return None;
        }
        self.menu.as_ref().map(|node| FakeMenu {
            node: node.clone(),
            state: self.state.clone(),
        })
    }

    async fn pause(&self, ms: u32) {
        let mut state = self.state.borrow_mut();
        state.pauses.push(ms);
        if state.menu_open {
            state.pauses_since_open += 1;
        }
    }
}
