use ratatui::{Frame, layout::Rect};

use crate::{
    app::{AppState, Modo},
    ui::{Theme, components},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let lista = &state.cuentas;

    let filas = lista
        .visibles()
        .iter()
        .map(|cuenta| {
            let saldo_actual = cuenta
                .saldo_actual
                .map(|saldo| format!("{saldo:.2}"))
                .unwrap_or_else(|| "-".to_string());
            format!(
                "{:<12} {:<11} {:>12} {:>12} {:<14} {}",
                cuenta.numero_cuenta,
                cuenta.tipo_cuenta,
                format!("{:.2}", cuenta.saldo_inicial),
                saldo_actual,
                cuenta.cliente_identificacion,
                super::estado_label(cuenta.estado),
            )
        })
        .collect();
    let encabezado = format!(
        "{:<12} {:<11} {:>12} {:>12} {:<14} {}",
        "Número", "Tipo", "Saldo inicial", "Saldo actual", "Cliente", "Estado"
    );

    super::render_tabla(
        frame,
        area,
        "Cuentas",
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
            if let Some(cuenta) = lista.seleccionado_visible() {
                components::formulario::render_confirmacion(
                    frame,
                    area,
                    &format!("¿Eliminar la cuenta {}?", cuenta.numero_cuenta),
                    &theme,
                );
            }
        }
        _ => {}
    }
}
