/// Data structures for Redmine Formatter
use serde::{Deserialize, Serialize};

/// A table-backed issue field, identified in the host page by its header label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Project,
    Tracker,
    Status,
    Subject,
    Date,
    Replies,
    Issues,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Project,
        Field::Tracker,
        Field::Status,
        Field::Subject,
        Field::Date,
        Field::Replies,
        Field::Issues,
    ];

    /// Header text of this column on a zh-TW Redmine issue list
    pub fn label(self) -> &'static str {
        match self {
            Field::Project => "專案",
            Field::Tracker => "追蹤標籤",
            Field::Status => "狀態",
            Field::Subject => "主旨",
            Field::Date => "日期",
            Field::Replies => "回應",
            Field::Issues => "議題",
        }
    }

    pub fn from_label(label: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.label() == label)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Column position of each field in the current table layout.
///
/// Rebuilt for every extraction: layouts differ between pages and Redmine
/// versions, so nothing here is cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndexMap {
    slots: [Option<usize>; 7],
}

impl ColumnIndexMap {
    /// Scan header labels in order; unknown headers are ignored and a later
    /// duplicate overwrites an earlier one.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> ColumnIndexMap {
        let mut map = ColumnIndexMap::default();
        for (index, header) in headers.iter().enumerate() {
            if let Some(field) = Field::from_label(header.as_ref().trim()) {
                map.slots[field.slot()] = Some(index);
            }
        }
        map
    }

    pub fn get(&self, field: Field) -> Option<usize> {
        self.slots[field.slot()]
    }
}

/// One extracted issue row
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueRecord {
    pub project: String,
    pub tracker: String,
    pub status: String,
    pub subject: String,
    pub url: String,
    pub id: String,
    pub date: String,
    pub replies: String,
    pub issues: String,
}

impl IssueRecord {
    pub const FIELD_NAMES: [&'static str; 9] = [
        "project", "tracker", "status", "subject", "url", "id", "date", "replies", "issues",
    ];

    /// Look up a value by its serialized field name
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "project" => &self.project,
            "tracker" => &self.tracker,
            "status" => &self.status,
            "subject" => &self.subject,
            "url" => &self.url,
            "id" => &self.id,
            "date" => &self.date,
            "replies" => &self.replies,
            "issues" => &self.issues,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub(crate) fn set_column(&mut self, field: Field, value: String) {
        match field {
            Field::Project => self.project = value,
            Field::Tracker => self.tracker = value,
            Field::Status => self.status = value,
            Field::Subject => self.subject = value,
            Field::Date => self.date = value,
            Field::Replies => self.replies = value,
            Field::Issues => self.issues = value,
        }
    }
}

/// A batch field change requested by the popup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchRequest {
    /// Context menu label of the field, e.g. "狀態"
    pub key: String,
    /// Label of the target value inside that submenu
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_map_matches_known_headers() {
        let headers = ["", "#", "專案", "追蹤標籤", "狀態", "主旨", "更新"];
        let map = ColumnIndexMap::from_headers(&headers);

        assert_eq!(map.get(Field::Project), Some(2));
        assert_eq!(map.get(Field::Tracker), Some(3));
        assert_eq!(map.get(Field::Status), Some(4));
        assert_eq!(map.get(Field::Subject), Some(5));
        assert_eq!(map.get(Field::Date), None);
        assert_eq!(map.get(Field::Issues), None);
    }

    #[test]
    fn test_column_map_trims_and_last_duplicate_wins() {
        let headers = [" 狀態 ", "主旨", "狀態"];
        let map = ColumnIndexMap::from_headers(&headers);

        assert_eq!(map.get(Field::Status), Some(2));
        assert_eq!(map.get(Field::Subject), Some(1));
    }

    #[test]
    fn test_column_map_requires_exact_label() {
        let headers = ["狀態 (舊)", "Subject"];
        let map = ColumnIndexMap::from_headers(&headers);

        assert_eq!(map, ColumnIndexMap::default());
    }

    #[test]
    fn test_record_get_by_name() {
        let record = IssueRecord {
            id: "42".to_string(),
            status: "新建立".to_string(),
            ..IssueRecord::default()
        };

        assert_eq!(record.get("id"), Some("42"));
        assert_eq!(record.get("status"), Some("新建立"));
        assert_eq!(record.get("replies"), Some(""));
        assert_eq!(record.get("assignee"), None);
    }

    #[test]
    fn test_record_serializes_every_field() {
        let json = serde_json::to_value(IssueRecord::default()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), IssueRecord::FIELD_NAMES.len());
        for name in IssueRecord::FIELD_NAMES {
            assert!(object.contains_key(name), "missing {}", name);
        }
    }
}
