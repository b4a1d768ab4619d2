pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Keyboard Shortcuts:

File:
  o / Space     Open file picker
  Drag & drop   Drop a file onto the terminal window
  Click         Drop zone opens the picker

File picker:
  ↑ / ↓         Move selection
  Type          Filter entries, or type a path
  Tab           Toggle showing all files
  Enter         Open directory / choose file
  Esc           Close picker

Upload:
  Enter / u     Upload & Predict
  Click         Upload button

General:
  ?             Toggle this help
  Enter / Esc   Dismiss a notice
  q / Ctrl + Q  Quit
"#
        .to_string()
    }
}
