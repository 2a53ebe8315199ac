use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum EventKind {
    Add,
    Delete,
    Ignored,
}

impl EventKind {
    /// Classify an action label. "add session label" is a superstring of
    /// "add session" and must not count as an add.
    pub fn from_label(label: &str) -> Self {
        let l = label.to_lowercase();

        if l.contains("add session") && !l.contains("add session label") {
            EventKind::Add
        } else if l.contains("deleted session") {
            EventKind::Delete
        } else {
            EventKind::Ignored
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Add => "add",
            EventKind::Delete => "delete",
            EventKind::Ignored => "ignored",
        }
    }

    /// Contribution to the net count of a session key.
    pub fn signal(&self) -> i32 {
        match self {
            EventKind::Add => 1,
            EventKind::Delete => -1,
            EventKind::Ignored => 0,
        }
    }

    pub fn is_mutation(&self) -> bool {
        !matches!(self, EventKind::Ignored)
    }
}
