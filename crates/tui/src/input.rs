use directories::BaseDirs;
use std::path::PathBuf;
use url::Url;

pub struct InputState {
    pub buffer: String,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn handle_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn handle_backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Turns text pasted into the terminal (typically a file dragged onto the
/// window) into a filesystem path.
///
/// Terminals deliver drops as quoted paths, shell-escaped paths or `file://`
/// URIs depending on the emulator. Only the first dropped entry is kept.
pub fn normalize_dropped_path(raw: &str) -> Option<PathBuf> {
    let first = raw.lines().map(str::trim).find(|l| !l.is_empty())?;

    let unquoted = strip_quotes(first);

    if unquoted.starts_with("file://") {
        return Url::parse(unquoted).ok()?.to_file_path().ok();
    }

    let unescaped = unescape_shell(unquoted);
    if unescaped.is_empty() {
        return None;
    }

    Some(expand_home(&unescaped))
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn unescape_shell(s: &str) -> String {
    if cfg!(windows) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
