use crate::input::InputState;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Parent,
    Directory,
    File,
}

#[derive(Debug, Clone)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Directory browser used as the file picker.
///
/// Only files with the accepted extension are listed unless `show_all` is
/// on; the filter narrows the listing and nothing else.
pub struct FilePicker {
    pub dir: PathBuf,
    pub query: InputState,
    pub entries: Vec<PickerEntry>,
    pub filtered: Vec<PickerEntry>,
    pub selected_index: usize,
    pub show_all: bool,
    extension: String,
}

impl FilePicker {
    pub fn open(dir: PathBuf, extension: &str) -> Result<Self> {
        let mut picker = Self {
            dir,
            query: InputState::new(),
            entries: Vec::new(),
            filtered: Vec::new(),
            selected_index: 0,
            show_all: false,
            extension: extension.trim_start_matches('.').to_string(),
        };
        picker.reload()?;
        Ok(picker)
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn reload(&mut self) -> Result<()> {
        let read_dir = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot list {}", self.dir.display()))?;

        let mut entries = Vec::new();
        if let Some(parent) = self.dir.parent() {
            entries.push(PickerEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                kind: EntryKind::Parent,
            });
        }

        for entry in read_dir.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            let kind = if path.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(PickerEntry { name, path, kind });
        }

        entries.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        self.entries = entries;
        self.refilter();
        Ok(())
    }

    fn is_listed(&self, entry: &PickerEntry) -> bool {
        if entry.kind == EntryKind::Parent {
            return self.query.is_empty();
        }
        if !self.show_all && entry.name.starts_with('.') {
            return false;
        }
        if entry.kind == EntryKind::File
            && !self.show_all
            && !has_extension(&entry.path, &self.extension)
        {
            return false;
        }
        let query = self.query.buffer.to_lowercase();
        query.is_empty() || entry.name.to_lowercase().contains(&query)
    }

    fn refilter(&mut self) {
        self.filtered = self
            .entries
            .iter()
            .filter(|e| self.is_listed(e))
            .cloned()
            .collect();
        self.selected_index = 0;
    }

    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
        self.refilter();
    }

    pub fn push_query(&mut self, c: char) {
        self.query.handle_char(c);
        self.refilter();
    }

    pub fn pop_query(&mut self) {
        self.query.handle_backspace();
        self.refilter();
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index < self.filtered.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    pub fn selected(&self) -> Option<&PickerEntry> {
        self.filtered.get(self.selected_index)
    }

    /// Acts on the current selection. Returns the chosen file, or `None`
    /// when the picker navigated into another directory instead.
    pub fn activate(&mut self) -> Result<Option<PathBuf>> {
        if let Some(path) = self.query_as_file() {
            return Ok(Some(path));
        }

        let Some(entry) = self.selected().cloned() else {
            return Ok(None);
        };

        match entry.kind {
            EntryKind::File => Ok(Some(entry.path)),
            EntryKind::Parent | EntryKind::Directory => {
                let previous = std::mem::replace(&mut self.dir, entry.path);
                self.query.clear();
                if let Err(e) = self.reload() {
                    self.dir = previous;
                    self.reload()?;
                    return Err(e);
                }
                Ok(None)
            }
        }
    }

    fn query_as_file(&self) -> Option<PathBuf> {
        if self.query.is_empty() {
            return None;
        }
        let typed = Path::new(&self.query.buffer);
        let candidate = if typed.is_absolute() {
            typed.to_path_buf()
        } else {
            self.dir.join(typed)
        };
        candidate.is_file().then_some(candidate)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
