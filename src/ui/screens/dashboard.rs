use crate::models::{Report, WeatherSnapshot};
use crate::ui::components::{temperature_gauge, DistributionBar};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Widget, Wrap},
};

pub struct DashboardScreen<'a> {
    pub farm_name: &'a str,
    pub report: &'a Report,
    pub weather: Option<&'a WeatherSnapshot>,
    pub last_refreshed: Option<&'a str>,
    pub status_message: Option<&'a str>,
    pub selected_index: usize,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(farm_name: &'a str, report: &'a Report, weather: Option<&'a WeatherSnapshot>) -> Self {
        Self {
            farm_name,
            report,
            weather,
            last_refreshed: None,
            status_message: None,
            selected_index: 0,
        }
    }

    pub fn refreshed_at(mut self, when: Option<&'a str>) -> Self {
        self.last_refreshed = when;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Weather + distribution
                Constraint::Length(3), // Weather alert
                Constraint::Min(6),    // Insights
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_summary(chunks[1], buf);
        self.render_alert(chunks[2], buf);
        self.render_insights(chunks[3], buf);
        self.render_status_message(chunks[4], buf);
        render_nav(chunks[5], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!("CropSense - {}", self.farm_name),
                Theme::title(),
            ))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = format!(
            "Last refreshed: {}",
            self.last_refreshed.unwrap_or("Never")
        );
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        // Hide the distribution chart entirely when there is nothing to count
        let constraints = if self.report.distribution.is_empty() {
            vec![Constraint::Percentage(30), Constraint::Percentage(70)]
        } else {
            vec![
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(50),
            ]
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        temperature_gauge("Temperature", self.weather.map(|w| w.temperature_c))
            .render(cols[0], buf);

        let block = Block::default()
            .title("Conditions")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let conditions = match self.weather {
            Some(w) => Span::styled(w.condition_main.clone(), Theme::normal()),
            None => Span::styled("Weather unavailable", Theme::dim()),
        };
        Paragraph::new(conditions).block(block).render(cols[1], buf);

        if !self.report.distribution.is_empty() {
            DistributionBar::new(self.report.distribution).render(cols[2], buf);
        }
    }

    fn render_alert(&self, area: Rect, buf: &mut Buffer) {
        let alert = match &self.report.alert {
            Some(alert) => alert,
            None => return,
        };

        let style = Style::default()
            .fg(alert.kind.color())
            .add_modifier(Modifier::BOLD);
        let block = Block::default()
            .title(Span::styled(alert.kind.as_str(), style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(alert.kind.color()));

        Paragraph::new(Span::styled(alert.message.as_str(), Theme::normal()))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_insights(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!("Insights ({})", self.report.insights.len()),
                Theme::header(),
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .report
            .insights
            .iter()
            .map(|insight| {
                let style = Style::default().fg(insight.category.color());
                let title_line = Line::from(vec![
                    Span::styled(format!("{} ", insight.category.symbol()), style),
                    Span::styled(insight.title.as_str(), style),
                ]);
                let body_line = Line::from(vec![
                    Span::styled("  ", Theme::dim()),
                    Span::styled(insight.body.as_str(), Theme::dim()),
                ]);
                ListItem::new(vec![title_line, body_line])
            })
            .collect();

        // Scrolls to keep the selected insight in view
        let mut state = ListState::default();
        if !self.report.insights.is_empty() {
            state.select(Some(self.selected_index.min(self.report.insights.len() - 1)));
        }
        let list = List::new(items).highlight_style(Theme::selected());
        ratatui::widgets::StatefulWidget::render(list, inner, buf, &mut state);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("unavailable") || msg.contains("failed") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }
}

pub(crate) fn render_nav(area: Rect, buf: &mut Buffer) {
    let nav = Line::from(vec![
        Span::styled("[1]", Theme::nav_key()),
        Span::styled("Dashboard ", Theme::nav_label()),
        Span::styled("[2]", Theme::nav_key()),
        Span::styled("Crops ", Theme::nav_label()),
        Span::styled("[↑↓]", Theme::nav_key()),
        Span::styled("Scroll ", Theme::nav_label()),
        Span::styled("[r]", Theme::nav_key()),
        Span::styled("Refresh ", Theme::nav_label()),
        Span::styled("[q]", Theme::nav_key()),
        Span::styled("Quit", Theme::nav_label()),
    ]);
    Paragraph::new(nav).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropDistribution, Insight, InsightCategory, WeatherAlert, WeatherAlertKind};

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn renders_alert_and_insights() {
        let report = Report {
            distribution: CropDistribution {
                growing: 1,
                harvested: 0,
            },
            alert: Some(WeatherAlert::new(WeatherAlertKind::RainAlert, "Skip irrigation")),
            insights: vec![Insight::new(
                InsightCategory::Water,
                "Wheat A: Crown Root",
                "Irrigate now",
            )],
        };
        let weather = WeatherSnapshot::new("Rain", 21.0);

        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new("North Field", &report, Some(&weather)).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("CropSense - North Field"));
        assert!(text.contains("Rain Alert"));
        assert!(text.contains("Wheat A: Crown Root"));
        assert!(text.contains("Growing 1"));
    }

    #[test]
    fn empty_distribution_is_not_charted() {
        let report = Report {
            insights: vec![Insight::new(InsightCategory::Info, "All Clear", "Nothing to do")],
            ..Report::default()
        };

        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new("North Field", &report, None).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Weather unavailable"));
        assert!(text.contains("All Clear"));
        assert!(!text.contains("Harvested"));
    }

    #[test]
    fn selected_insight_scrolls_into_view() {
        let insights: Vec<Insight> = (0..20)
            .map(|i| {
                Insight::new(
                    InsightCategory::Warning,
                    format!("Crop{:02}: Weed Control Window", i),
                    "Check the field",
                )
            })
            .collect();
        let report = Report {
            insights,
            ..Report::default()
        };

        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new("North Field", &report, None)
            .with_selection(19)
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Insights (20)"));
        assert!(text.contains("Crop19"));
        assert!(!text.contains("Crop00"));
    }
}
