use super::*;

impl App {
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Paste(text) => {
                self.handle_paste(&text);
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.dismiss_notice();
            }
            return Ok(false);
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return Ok(false);
        }

        if let Some(picker) = self.picker.as_mut() {
            match key.code {
                KeyCode::Esc => self.picker = None,
                KeyCode::Up => picker.move_up(),
                KeyCode::Down => picker.move_down(),
                KeyCode::Tab => picker.toggle_show_all(),
                KeyCode::Backspace => picker.pop_query(),
                KeyCode::Char(c) => picker.push_query(c),
                KeyCode::Enter => self.activate_picker()?,
                _ => {}
            }
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('o') | KeyCode::Char(' ') => self.open_picker()?,
            KeyCode::Enter | KeyCode::Char('u') => {
                self.submit();
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<bool> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(false);
        }
        if self.notice.is_some() {
            self.dismiss_notice();
            return Ok(false);
        }
        if self.show_help || self.picker.is_some() {
            return Ok(false);
        }

        match self.layout.hit_test(mouse.column, mouse.row) {
            Some(PanelType::DropZone) => self.open_picker()?,
            Some(PanelType::SubmitButton) => {
                self.submit();
            }
            _ => {}
        }
        Ok(false)
    }

    /// Terminals deliver drag-and-drop as a bracketed paste. The drop zone
    /// takes it, so it never leaks into the picker filter as keystrokes.
    fn handle_paste(&mut self, text: &str) {
        if self.notice.is_some() || self.show_help {
            return;
        }
        self.picker = None;
        self.drop_text(text);
    }
}
