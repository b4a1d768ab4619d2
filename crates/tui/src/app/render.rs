use super::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
};

const POSITIVE_COLOR: Color = Color::Rgb(46, 125, 50);
const NEGATIVE_COLOR: Color = Color::Rgb(198, 40, 40);
const ACCENT_COLOR: Color = Color::Rgb(25, 118, 210);

impl App {
    pub fn result_banner(&self) -> Option<ResultBanner> {
        self.workflow.label().map(|label| ResultBanner {
            label: label.clone(),
            positive: label.matches_positive(&self.config.classifier.positive_label),
        })
    }

    pub fn submit_control(&self) -> SubmitControl {
        if self.workflow.is_submitting() {
            SubmitControl {
                label: "Processing...",
                enabled: false,
            }
        } else {
            SubmitControl {
                label: "Upload & Predict",
                enabled: true,
            }
        }
    }

    pub fn drop_zone_text(&self) -> String {
        match self.selected_file {
            Some(ref file) => format!("📂 {}", file.name),
            None => format!(
                "📂 Choose {} File or Drag & Drop",
                self.config.ui.accepted_extension.to_uppercase()
            ),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        self.layout.calculate_layout(area);
        let panels = self.layout.get_panels().to_vec();

        for panel in panels {
            match panel.panel_type {
                PanelType::Title => self.render_title(frame, panel.rect),
                PanelType::DropZone => self.render_drop_zone(frame, panel.rect),
                PanelType::SubmitButton => self.render_submit_button(frame, panel.rect),
                PanelType::ResultBanner => self.render_result_banner(frame, panel.rect),
                PanelType::StatusBar => self.render_status_bar(frame, panel.rect),
            }
        }

        if let Some(ref picker) = self.picker {
            self.render_picker(frame, area, picker);
        }

        if self.show_help {
            self.render_help(frame, area);
        }

        if let Some(ref notice) = self.notice {
            self.render_notice(frame, area, notice);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(Span::styled(
            format!("⚡ {}", self.config.ui.title),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED),
        ));
        frame.render_widget(Paragraph::new(title).centered(), area);
    }

    fn render_drop_zone(&self, frame: &mut Frame, area: Rect) {
        let (border_color, hint) = match self.selected_file {
            Some(ref file) => (POSITIVE_COLOR, format!("{} bytes", file.len())),
            None => (ACCENT_COLOR, "[o] browse or drop a file here".to_string()),
        };

        let text = vec![
            Line::default(),
            Line::from(Span::styled(
                self.drop_zone_text(),
                Style::default()
                    .fg(ACCENT_COLOR)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ];

        frame.render_widget(
            Paragraph::new(text).centered().block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color)),
            ),
            area,
        );
    }

    fn render_submit_button(&self, frame: &mut Frame, area: Rect) {
        let control = self.submit_control();
        let style = if control.enabled {
            Style::default()
                .fg(Color::White)
                .bg(ACCENT_COLOR)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        };

        frame.render_widget(
            Paragraph::new(control.label)
                .centered()
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style)),
            area,
        );
    }

    fn render_result_banner(&self, frame: &mut Frame, area: Rect) {
        let Some(banner) = self.result_banner() else {
            return;
        };

        let (color, icon) = if banner.positive {
            (POSITIVE_COLOR, "🕊️")
        } else {
            (NEGATIVE_COLOR, "🚁")
        };

        let text = Line::from(vec![
            Span::styled("Prediction: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{icon} {}", banner.label)),
        ]);

        frame.render_widget(
            Paragraph::new(text)
                .centered()
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color)),
                ),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let service = match self.service_status {
            ServiceStatus::Unknown => "classifier: ? unknown".to_string(),
            ServiceStatus::Checking => "classifier: … checking".to_string(),
            ServiceStatus::Online(_) => "classifier: ● online".to_string(),
            ServiceStatus::Offline => "classifier: ○ offline".to_string(),
        };
        let last = self
            .resolved_at
            .map(|t| format!(" | last result {}", t.format("%H:%M:%S")))
            .unwrap_or_default();

        let text = format!(" {service}{last} | [o] open  [Enter] upload  [?] help  [q] quit");
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Gray).bg(Color::Black)),
            area,
        );
    }

    fn render_picker(&self, frame: &mut Frame, area: Rect, picker: &FilePicker) {
        let popup_area = self.centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = picker
            .filtered
            .iter()
            .map(|entry| {
                let text = match entry.kind {
                    EntryKind::Parent => "⬑ ..".to_string(),
                    EntryKind::Directory => format!("📁 {}/", entry.name),
                    EntryKind::File => format!("   {}", entry.name),
                };
                ListItem::new(text)
            })
            .collect();

        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(picker.selected_index.min(items.len().saturating_sub(1))));
        }

        let filter = if picker.show_all {
            "all files".to_string()
        } else {
            format!("*.{}", picker.extension())
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Open: {} ", picker.dir.display()))
                    .title_bottom(format!(
                        " filter: {} [{}]  [Tab] toggle  [Esc] cancel ",
                        picker.query.buffer, filter
                    )),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, popup_area, &mut list_state);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let popup_area = self.centered_rect(60, 60, area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(self.keybinds.help_text()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help - Press ? to close "),
            ),
            popup_area,
        );
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let popup_area = self.centered_rect(50, 25, area);
        let border_color = match notice.kind {
            NoticeKind::NoFileSelected => ACCENT_COLOR,
            NoticeKind::UploadFailed | NoticeKind::FileUnreadable | NoticeKind::ActionFailed => {
                NEGATIVE_COLOR
            }
        };
        let text = format!("\n{}\n\n[Enter] OK", notice.message);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(text)
                .centered()
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color))
                        .title(" Notice "),
                ),
            popup_area,
        );
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
                ratatui::layout::Constraint::Percentage(percent_y),
                ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Horizontal)
            .constraints([
                ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
                ratatui::layout::Constraint::Percentage(percent_x),
                ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
