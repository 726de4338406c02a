pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Modo, Seccion};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.seccion, &theme);

    match state.seccion {
        Seccion::Clientes => screens::clientes::render(frame, layout[2], state),
        Seccion::Cuentas => screens::cuentas::render(frame, layout[2], state),
        Seccion::Movimientos => screens::movimientos::render(frame, layout[2], state),
        Seccion::Reportes => screens::reportes::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::banner::render(frame, area, state.banner.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut line = vec![
        Span::styled("API", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Zona", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.zona)),
    ];
    if state.cargando {
        line.push(Span::raw("  "));
        line.push(Span::styled("Cargando...", Style::default().fg(theme.accent)));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let modo = match state.seccion {
        Seccion::Clientes => state.clientes.modo,
        Seccion::Cuentas => state.cuentas.modo,
        Seccion::Movimientos => state.movimientos.modo,
        Seccion::Reportes => state.reportes.modo,
    };

    let hints = match (state.seccion, modo) {
        (_, Modo::Busqueda) => "Enter aplicar  ·  Esc limpiar",
        (_, Modo::Formulario) => "Tab/↑↓ campo  ·  Enter guardar  ·  Esc cancelar",
        (_, Modo::ConfirmarEliminar) => "Enter confirmar  ·  Esc cancelar",
        (Seccion::Clientes, Modo::Lista) | (Seccion::Cuentas, Modo::Lista) => {
            "1-4 sección  ·  / buscar  ·  n nuevo  ·  e editar  ·  d eliminar  ·  r recargar  ·  q salir"
        }
        (Seccion::Movimientos, Modo::Lista) => {
            "1-4 sección  ·  / buscar  ·  n nuevo  ·  d eliminar  ·  r recargar  ·  q salir"
        }
        (Seccion::Reportes, Modo::Lista) => {
            "1-4 sección  ·  e consulta  ·  p guardar PDF  ·  x exportar CSV  ·  q salir"
        }
    };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(theme.dim)))),
        area,
    );
}
