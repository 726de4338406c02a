use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::Seccion, ui::Theme};

pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, activa: Seccion, theme: &Theme) {
    let mut spans = Vec::new();
    for (indice, seccion) in Seccion::TODAS.iter().enumerate() {
        let etiqueta = format!(" {} {} ", indice + 1, seccion.label());
        let style = if *seccion == activa {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(etiqueta, style));
        spans.push(Span::styled("│", Style::default().fg(theme.border)));
    }
    spans.pop();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
