use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{app::forms::Formulario, ui::Theme};

fn centrado(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Modal with one line per field; the focused field is highlighted.
pub fn render(frame: &mut Frame<'_>, area: Rect, formulario: &Formulario, theme: &Theme) {
    let alto = formulario.campos.len() as u16 + 2;
    let rect = centrado(area, 56, alto);

    let lines: Vec<Line<'_>> = formulario
        .campos
        .iter()
        .enumerate()
        .map(|(indice, campo)| {
            let enfocado = indice == formulario.foco;
            let etiqueta_style = if enfocado {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dim)
            };
            let valor = if campo.secreto {
                "*".repeat(campo.valor.chars().count())
            } else {
                campo.valor.clone()
            };
            let cursor = if enfocado { "▏" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:<24}", campo.etiqueta), etiqueta_style),
                Span::styled(valor, Style::default().fg(theme.text)),
                Span::styled(cursor, Style::default().fg(theme.accent)),
            ])
        })
        .collect();

    let block = Block::default()
        .title(formulario.titulo)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

/// Confirmation modal for deletions.
pub fn render_confirmacion(frame: &mut Frame<'_>, area: Rect, mensaje: &str, theme: &Theme) {
    let width = (mensaje.chars().count() as u16 + 6).clamp(30, area.width);
    let rect = centrado(area, width, 3);

    let block = Block::default()
        .title("Confirmar Eliminación")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error));

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Line::from(mensaje))
            .block(block)
            .alignment(ratatui::layout::Alignment::Center),
        rect,
    );
}
