use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    app::{Banner, NivelBanner},
    ui::Theme,
};

/// Toast with the last success/error message, bottom-right.
pub fn render(frame: &mut Frame<'_>, area: Rect, banner: Option<&Banner>) {
    let Some(banner) = banner else {
        return;
    };
    let theme = Theme::default();

    let width = (banner.mensaje.chars().count() as u16 + 4).min(area.width);
    let height = 3u16;
    let x = area.x + area.width.saturating_sub(width);
    let y = area.y + area.height.saturating_sub(height + 1);
    let rect = Rect {
        x,
        y,
        width,
        height,
    };

    let style = match banner.nivel {
        NivelBanner::Exito => Style::default().fg(theme.positive),
        NivelBanner::Error => Style::default().fg(theme.error),
    };

    let block = Block::default().borders(Borders::ALL).border_style(style);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Line::from(banner.mensaje.as_str()))
            .style(style)
            .block(block),
        rect,
    );
}
