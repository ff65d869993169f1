//! Line-level diffs between two texts.

use similar::{ChangeTag, TextDiff};

/// Whether a run of lines is shared, only in the new text or only in the old
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
}

impl From<ChangeTag> for DiffKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => DiffKind::Unchanged,
            ChangeTag::Insert => DiffKind::Added,
            ChangeTag::Delete => DiffKind::Removed,
        }
    }
}

/// Consecutive lines of the same kind, newlines included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub text: String,
}

/// Ordered diff from an old text to a new one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    entries: Vec<DiffEntry>,
}

impl DiffReport {
    /// Diff `old` against `new` line by line
    pub fn between(old: &str, new: &str) -> Self {
        let diff = TextDiff::from_lines(old, new);
        let mut entries: Vec<DiffEntry> = Vec::new();

        for change in diff.iter_all_changes() {
            let kind = DiffKind::from(change.tag());
            match entries.last_mut() {
                Some(last) if last.kind == kind => last.text.push_str(change.value()),
                _ => entries.push(DiffEntry {
                    kind,
                    text: change.value().to_string(),
                }),
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    /// Whether anything was added or removed
    pub fn has_changes(&self) -> bool {
        self.entries.iter().any(|e| e.kind != DiffKind::Unchanged)
    }

    pub fn added(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter().filter(|e| e.kind == DiffKind::Added)
    }

    pub fn removed(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter().filter(|e| e.kind == DiffKind::Removed)
    }
}
