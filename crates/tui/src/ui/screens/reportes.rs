use ratatui::{Frame, layout::Rect};

use crate::{
    app::{AppState, Modo},
    ui::{Theme, components},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let reportes = &state.reportes;

    let titulo = match &reportes.consulta {
        Some(consulta) => format!(
            "Estado de Cuenta — {} ({} al {})",
            consulta.cliente_nombre, consulta.desde, consulta.hasta
        ),
        None => "Estado de Cuenta".to_string(),
    };

    let filas = reportes
        .filas
        .iter()
        .map(|movimiento| {
            let fecha = movimiento
                .fecha
                .with_timezone(&state.zona)
                .format("%d/%m/%Y %H:%M")
                .to_string();
            format!(
                "{:<17} {:<12} {:>12} {:>10} {:>12} {}",
                fecha,
                movimiento.cuenta.numero_cuenta,
                format!("{:.2}", movimiento.saldo_inicial),
                format!("{:.2}", movimiento.valor),
                format!("{:.2}", movimiento.saldo),
                super::estado_label(movimiento.estado),
            )
        })
        .collect();
    let encabezado = format!(
        "{:<17} {:<12} {:>12} {:>10} {:>12} {}",
        "Fecha", "Cuenta", "Saldo inicial", "Valor", "Saldo", "Estado"
    );

    super::render_tabla(
        frame,
        area,
        &titulo,
        "",
        false,
        &encabezado,
        filas,
        reportes.seleccionado,
        &theme,
    );

    if reportes.modo == Modo::Formulario {
        components::formulario::render(frame, area, &reportes.formulario, &theme);
    }
}
