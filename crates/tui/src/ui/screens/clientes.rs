use ratatui::{Frame, layout::Rect};

use crate::{
    app::{AppState, Modo},
    ui::{Theme, components},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let lista = &state.clientes;

    let filas = lista
        .visibles()
        .iter()
        .map(|cliente| {
            format!(
                "{:<14} {:<26} {:<8} {:<13} {:<24} {}",
                cliente.identificacion,
                cliente.nombre,
                cliente.genero.as_deref().unwrap_or("-"),
                cliente.telefono,
                cliente.direccion,
                super::estado_label(cliente.estado),
            )
        })
        .collect();
    let encabezado = format!(
        "{:<14} {:<26} {:<8} {:<13} {:<24} {}",
        "Identificación", "Nombre", "Género", "Teléfono", "Dirección", "Estado"
    );

    super::render_tabla(
        frame,
        area,
        "Clientes",
        &lista.busqueda,
        lista.modo == Modo::Busqueda,
        &encabezado,
        filas,
        lista.seleccionado,
        &theme,
    );

    match lista.modo {
        Modo::Formulario => {
            components::formulario::render(frame, area, &lista.formulario, &theme);
        }
        Modo::ConfirmarEliminar => {
            if let Some(cliente) = lista.seleccionado_visible() {
                components::formulario::render_confirmacion(
                    frame,
                    area,
                    &format!("¿Eliminar el cliente {}?", cliente.nombre),
                    &theme,
                );
            }
        }
        _ => {}
    }
}
