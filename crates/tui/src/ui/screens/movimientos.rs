use ratatui::{Frame, layout::Rect};

use services::Movimiento;

use crate::{
    app::{AppState, Modo},
    ui::{Theme, components},
};

fn tipo_label(movimiento: &Movimiento) -> &'static str {
    if movimiento.valor >= 0.0 {
        "Depósito"
    } else {
        "Retiro"
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let lista = &state.movimientos;

    let filas = lista
        .visibles()
        .iter()
        .map(|movimiento| {
            let fecha = movimiento
                .fecha
                .with_timezone(&state.zona)
                .format("%d/%m/%Y %H:%M")
                .to_string();
            format!(
                "{:<17} {:<12} {:<14} {:<9} {:>10} {:>10} {}",
                fecha,
                movimiento.cuenta.numero_cuenta,
                movimiento.cuenta.cliente_identificacion,
                tipo_label(movimiento),
                format!("{:.2}", movimiento.valor),
                format!("{:.2}", movimiento.saldo),
                super::estado_label(movimiento.estado),
            )
        })
        .collect();
    let encabezado = format!(
        "{:<17} {:<12} {:<14} {:<9} {:>10} {:>10} {}",
        "Fecha", "Cuenta", "Cliente", "Tipo", "Valor", "Saldo", "Estado"
    );

    super::render_tabla(
        frame,
        area,
        "Movimientos",
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
            if let Some(movimiento) = lista.seleccionado_visible() {
                components::formulario::render_confirmacion(
                    frame,
                    area,
                    &format!(
                        "¿Eliminar el movimiento de {:.2} en la cuenta {}?",
                        movimiento.valor, movimiento.cuenta.numero_cuenta
                    ),
                    &theme,
                );
            }
        }
        _ => {}
    }
}
