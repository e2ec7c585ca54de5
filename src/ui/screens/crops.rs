use crate::models::Crop;
use crate::ui::Theme;
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct CropsScreen<'a> {
    pub crops: &'a [Crop],
    pub today: NaiveDate,
    pub selected_index: usize,
}

impl<'a> CropsScreen<'a> {
    pub fn new(crops: &'a [Crop], today: NaiveDate) -> Self {
        Self {
            crops,
            today,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for CropsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(5),    // List
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Crops", Theme::title()),
            Span::styled(format!(" ({})", self.crops.len()), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_list(chunks[1], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[h]", Theme::nav_key()),
            Span::styled("Toggle Harvested ", Theme::nav_label()),
            Span::styled("[x]", Theme::nav_key()),
            Span::styled("Remove ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl CropsScreen<'_> {
    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.crops.is_empty() {
            Paragraph::new(Span::styled(
                "No crops recorded. Add one with `cropsense crop add`.",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .crops
            .iter()
            .enumerate()
            .map(|(i, crop)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };

                let line = Line::from(vec![
                    Span::styled(format!("{:<24}", crop.name), Theme::normal()),
                    Span::styled(
                        format!("{:>5}d  ", crop.age_days(self.today)),
                        Theme::dim(),
                    ),
                    Span::styled(
                        format!("{:<10}", crop.status.as_str()),
                        Style::default().fg(crop.status.color()),
                    ),
                    Span::styled(
                        crop.health.as_str(),
                        Style::default().fg(crop.health.color()),
                    ),
                ]);
                ListItem::new(line).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}
