use ratatui::layout::{Constraint, Direction, Flex, Layout, Position, Rect};

use super::panel::{Panel, PanelType};

const CARD_WIDTH: u16 = 64;
const TITLE_HEIGHT: u16 = 2;
const DROP_ZONE_HEIGHT: u16 = 7;
const BUTTON_WIDTH: u16 = 24;
const BUTTON_HEIGHT: u16 = 3;
const BANNER_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

/// Single-card layout, cached between draws for mouse hit testing.
#[derive(Default)]
pub struct LayoutState {
    cached_panels: Vec<Panel>,
}

impl LayoutState {
    pub fn calculate_layout(&mut self, area: Rect) -> &[Panel] {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)])
            .split(area);

        let card_column = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CARD_WIDTH.min(area.width))])
            .flex(Flex::Center)
            .split(main_layout[0])[0];

        let card = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TITLE_HEIGHT),
                Constraint::Length(DROP_ZONE_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(BANNER_HEIGHT),
            ])
            .flex(Flex::Center)
            .split(card_column);

        let button = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(BUTTON_WIDTH.min(card[3].width))])
            .flex(Flex::Center)
            .split(card[3])[0];

        self.cached_panels = vec![
            Panel {
                panel_type: PanelType::Title,
                rect: card[0],
            },
            Panel {
                panel_type: PanelType::DropZone,
                rect: card[1],
            },
            Panel {
                panel_type: PanelType::SubmitButton,
                rect: button,
            },
            Panel {
                panel_type: PanelType::ResultBanner,
                rect: card[5],
            },
            Panel {
                panel_type: PanelType::StatusBar,
                rect: main_layout[1],
            },
        ];

        &self.cached_panels
    }

    pub fn get_panels(&self) -> &[Panel] {
        &self.cached_panels
    }

    pub fn get_rect(&self, panel_type: PanelType) -> Option<Rect> {
        self.cached_panels
            .iter()
            .find(|p| p.panel_type == panel_type)
            .map(|p| p.rect)
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<PanelType> {
        self.cached_panels
            .iter()
            .find(|p| p.rect.contains(Position::new(column, row)))
            .map(|p| p.panel_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_is_centered_and_panels_do_not_overlap() {
        let mut layout = LayoutState::default();
        layout.calculate_layout(Rect::new(0, 0, 100, 30));

        let drop_zone = layout.get_rect(PanelType::DropZone).expect("drop zone");
        let button = layout.get_rect(PanelType::SubmitButton).expect("button");
        let status = layout.get_rect(PanelType::StatusBar).expect("status bar");

        assert_eq!(drop_zone.width, CARD_WIDTH);
        assert_eq!(drop_zone.x, (100 - CARD_WIDTH) / 2);
        assert!(button.y >= drop_zone.y + drop_zone.height);
        assert_eq!(status.y, 29);
    }

    #[test]
    fn hit_test_finds_button_and_drop_zone() {
        let mut layout = LayoutState::default();
        layout.calculate_layout(Rect::new(0, 0, 80, 30));

        let drop_zone = layout.get_rect(PanelType::DropZone).expect("drop zone");
        let button = layout.get_rect(PanelType::SubmitButton).expect("button");

        assert_eq!(
            layout.hit_test(drop_zone.x + 1, drop_zone.y + 1),
            Some(PanelType::DropZone)
        );
        assert_eq!(
            layout.hit_test(button.x + 1, button.y + 1),
            Some(PanelType::SubmitButton)
        );
        assert_eq!(layout.hit_test(0, 0), None);
    }

    #[test]
    fn narrow_terminals_shrink_the_card() {
        let mut layout = LayoutState::default();
        layout.calculate_layout(Rect::new(0, 0, 40, 30));

        let drop_zone = layout.get_rect(PanelType::DropZone).expect("drop zone");
        assert_eq!(drop_zone.width, 40);
    }
}
