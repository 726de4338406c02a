pub mod clientes;
pub mod cuentas;
pub mod movimientos;
pub mod reportes;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::ui::Theme;

pub(crate) fn estado_label(estado: bool) -> &'static str {
    if estado { "Activo" } else { "Inactivo" }
}

/// Search line, column header and row list shared by every list screen.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_tabla(
    frame: &mut Frame<'_>,
    area: Rect,
    titulo: &str,
    busqueda: &str,
    en_busqueda: bool,
    encabezado: &str,
    filas: Vec<String>,
    seleccionado: usize,
    theme: &Theme,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let mut estado = vec![
        Span::styled(titulo, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" — {} registros", filas.len()),
            Style::default().fg(theme.dim),
        ),
    ];
    if en_busqueda {
        estado.push(Span::raw("   "));
        estado.push(Span::styled(
            format!("/{busqueda}▏"),
            Style::default().fg(theme.accent),
        ));
    } else if !busqueda.trim().is_empty() {
        estado.push(Span::raw("   "));
        estado.push(Span::styled(
            format!("/{busqueda}"),
            Style::default().fg(theme.dim),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(estado)), layout[0]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("  {encabezado}"),
            Style::default().fg(theme.dim).add_modifier(Modifier::BOLD),
        ))),
        layout[1],
    );

    let vacio = filas.is_empty();
    let items: Vec<ListItem<'_>> = filas.into_iter().map(ListItem::new).collect();
    let mut list_state = ListState::default();
    if !vacio {
        list_state.select(Some(seleccionado));
    }

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, layout[2], &mut list_state);
}
