use crate::models::CropDistribution;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Two-segment bar of growing vs harvested crops
pub struct DistributionBar {
    distribution: CropDistribution,
}

impl DistributionBar {
    pub fn new(distribution: CropDistribution) -> Self {
        Self { distribution }
    }
}

impl Widget for DistributionBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title("Crops")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.distribution.is_empty() {
            Paragraph::new(Span::styled("No crops recorded", Theme::dim())).render(inner, buf);
            return;
        }

        let legend = Line::from(vec![
            Span::styled("■ ", Style::default().fg(Theme::GROWING)),
            Span::styled(
                format!("Growing {}  ", self.distribution.growing),
                Theme::normal(),
            ),
            Span::styled("■ ", Style::default().fg(Theme::HARVESTED)),
            Span::styled(
                format!("Harvested {}", self.distribution.harvested),
                Theme::normal(),
            ),
        ]);
        Paragraph::new(legend).render(inner, buf);

        if inner.height >= 2 {
            let bar_y = inner.y + 1;
            let filled = (inner.width as f64 * self.distribution.growing_ratio()).round() as u16;

            for x in inner.x..inner.x + inner.width {
                let color = if x < inner.x + filled {
                    Theme::GROWING
                } else {
                    Theme::HARVESTED
                };
                buf[(x, bar_y)].set_char('█').set_fg(color);
            }
        }
    }
}
