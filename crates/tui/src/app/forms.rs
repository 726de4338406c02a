//! Modal input forms and the parsing of their free-text fields.

use services::{Cliente, ClienteSolicitud, Cuenta, CuentaSolicitud};

use api_types::movimiento::TipoMovimiento;

#[derive(Debug, Clone)]
pub struct Campo {
    pub etiqueta: &'static str,
    pub valor: String,
    pub secreto: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Formulario {
    pub titulo: &'static str,
    pub campos: Vec<Campo>,
    pub foco: usize,
}

impl Formulario {
    fn nuevo(titulo: &'static str, campos: Vec<Campo>) -> Self {
        Self {
            titulo,
            campos,
            foco: 0,
        }
    }

    pub fn avanzar_foco(&mut self) {
        if !self.campos.is_empty() {
            self.foco = (self.foco + 1) % self.campos.len();
        }
    }

    pub fn retroceder_foco(&mut self) {
        if !self.campos.is_empty() {
            self.foco = self.foco.checked_sub(1).unwrap_or(self.campos.len() - 1);
        }
    }

    pub fn escribir(&mut self, ch: char) {
        if let Some(campo) = self.campos.get_mut(self.foco) {
            campo.valor.push(ch);
        }
    }

    pub fn borrar(&mut self) {
        if let Some(campo) = self.campos.get_mut(self.foco) {
            campo.valor.pop();
        }
    }

    pub fn valor(&self, etiqueta: &str) -> &str {
        self.campos
            .iter()
            .find(|campo| campo.etiqueta == etiqueta)
            .map(|campo| campo.valor.as_str())
            .unwrap_or("")
    }
}

fn campo(etiqueta: &'static str, valor: &str) -> Campo {
    Campo {
        etiqueta,
        valor: valor.to_string(),
        secreto: false,
    }
}

fn campo_secreto(etiqueta: &'static str) -> Campo {
    Campo {
        etiqueta,
        valor: String::new(),
        secreto: true,
    }
}

fn texto_estado(estado: bool) -> &'static str {
    if estado { "s" } else { "n" }
}

/// Form for creating a client, or editing `existente`.
pub fn formulario_cliente(existente: Option<&Cliente>) -> Formulario {
    let mut campos = vec![
        campo("Nombre", existente.map(|c| c.nombre.as_str()).unwrap_or("")),
        campo(
            "Género",
            existente.and_then(|c| c.genero.as_deref()).unwrap_or(""),
        ),
        campo(
            "Identificación",
            existente.map(|c| c.identificacion.as_str()).unwrap_or(""),
        ),
        campo(
            "Dirección",
            existente.map(|c| c.direccion.as_str()).unwrap_or(""),
        ),
        campo(
            "Teléfono",
            existente.map(|c| c.telefono.as_str()).unwrap_or(""),
        ),
    ];
    if existente.is_none() {
        campos.push(campo_secreto("Contraseña"));
    }
    campos.push(campo(
        "Estado (s/n)",
        texto_estado(existente.map(|c| c.estado).unwrap_or(true)),
    ));

    Formulario::nuevo(
        if existente.is_some() {
            "Editar Cliente"
        } else {
            "Nuevo Cliente"
        },
        campos,
    )
}

pub fn formulario_cuenta(existente: Option<&Cuenta>) -> Formulario {
    Formulario::nuevo(
        if existente.is_some() {
            "Editar Cuenta"
        } else {
            "Nueva Cuenta"
        },
        vec![
            campo(
                "Identificación cliente",
                existente
                    .map(|c| c.cliente_identificacion.as_str())
                    .unwrap_or(""),
            ),
            campo(
                "Tipo (AHORRO/CORRIENTE)",
                existente.map(|c| c.tipo_cuenta.as_str()).unwrap_or(""),
            ),
            campo(
                "Saldo inicial",
                &existente
                    .map(|c| c.saldo_inicial.to_string())
                    .unwrap_or_default(),
            ),
            campo(
                "Estado (s/n)",
                texto_estado(existente.map(|c| c.estado).unwrap_or(true)),
            ),
        ],
    )
}

pub fn formulario_movimiento() -> Formulario {
    Formulario::nuevo(
        "Nuevo Movimiento",
        vec![
            campo("Número de cuenta", ""),
            campo("Tipo (DEBITO/CREDITO)", ""),
            campo("Valor", ""),
        ],
    )
}

pub fn formulario_reporte() -> Formulario {
    Formulario::nuevo(
        "Estado de Cuenta",
        vec![
            campo("Identificación cliente", ""),
            campo("Desde (AAAA-MM-DD)", ""),
            campo("Hasta (AAAA-MM-DD)", ""),
        ],
    )
}

pub fn parsear_estado(texto: &str) -> bool {
    matches!(
        texto.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "true" | "1" | "activo"
    )
}

pub fn parsear_valor(texto: &str) -> Result<f64, String> {
    texto
        .trim()
        .parse()
        .map_err(|_| format!("Valor inválido: {texto}"))
}

pub fn parsear_fecha(texto: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(texto.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Fecha inválida: {texto}"))
}

pub fn parsear_tipo_movimiento(texto: &str) -> Result<TipoMovimiento, String> {
    match texto.trim().to_uppercase().as_str() {
        "DEBITO" | "D" => Ok(TipoMovimiento::Debito),
        "CREDITO" | "C" => Ok(TipoMovimiento::Credito),
        otro => Err(format!("Tipo de movimiento inválido: {otro}")),
    }
}

/// Reads the client form back into a service request.
pub fn solicitud_cliente(formulario: &Formulario) -> Result<ClienteSolicitud, String> {
    let nombre = formulario.valor("Nombre").trim().to_string();
    let identificacion = formulario.valor("Identificación").trim().to_string();
    if nombre.is_empty() {
        return Err("El nombre es requerido".to_string());
    }
    if identificacion.is_empty() {
        return Err("La identificación es requerida".to_string());
    }

    let genero = formulario.valor("Género").trim().to_string();
    Ok(ClienteSolicitud {
        nombre,
        genero: (!genero.is_empty()).then_some(genero),
        identificacion,
        direccion: formulario.valor("Dirección").trim().to_string(),
        telefono: formulario.valor("Teléfono").trim().to_string(),
        contrasena: formulario.valor("Contraseña").to_string(),
        estado: parsear_estado(formulario.valor("Estado (s/n)")),
    })
}

pub fn solicitud_cuenta(formulario: &Formulario) -> Result<CuentaSolicitud, String> {
    let cliente_identificacion = formulario.valor("Identificación cliente").trim().to_string();
    let tipo_cuenta = formulario
        .valor("Tipo (AHORRO/CORRIENTE)")
        .trim()
        .to_uppercase();
    if cliente_identificacion.is_empty() {
        return Err("La identificación del cliente es requerida".to_string());
    }
    if tipo_cuenta.is_empty() {
        return Err("El tipo de cuenta es requerido".to_string());
    }

    Ok(CuentaSolicitud {
        cliente_identificacion,
        tipo_cuenta,
        saldo_inicial: parsear_valor(formulario.valor("Saldo inicial"))?,
        estado: parsear_estado(formulario.valor("Estado (s/n)")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_reconoce_afirmativos() {
        assert!(parsear_estado("s"));
        assert!(parsear_estado(" Sí "));
        assert!(parsear_estado("true"));
        assert!(!parsear_estado("n"));
        assert!(!parsear_estado(""));
    }

    #[test]
    fn tipo_de_movimiento_acepta_abreviaturas() {
        assert_eq!(
            parsear_tipo_movimiento("debito").unwrap(),
            TipoMovimiento::Debito
        );
        assert_eq!(
            parsear_tipo_movimiento(" C ").unwrap(),
            TipoMovimiento::Credito
        );
        assert!(parsear_tipo_movimiento("retiro").is_err());
    }

    #[test]
    fn solicitud_cliente_exige_nombre_e_identificacion() {
        let mut formulario = formulario_cliente(None);
        assert!(solicitud_cliente(&formulario).is_err());

        for (etiqueta, valor) in [("Nombre", "Jose Lema"), ("Identificación", "0102030405")] {
            if let Some(campo) = formulario
                .campos
                .iter_mut()
                .find(|c| c.etiqueta == etiqueta)
            {
                campo.valor = valor.to_string();
            }
        }
        let solicitud = solicitud_cliente(&formulario).unwrap();
        assert_eq!(solicitud.nombre, "Jose Lema");
        assert!(solicitud.estado);
    }

    #[test]
    fn formulario_de_edicion_no_pide_contrasena() {
        let cliente = Cliente {
            id: Some("c1".to_string()),
            identificacion: "0102030405".to_string(),
            nombre: "Jose Lema".to_string(),
            genero: None,
            edad: None,
            direccion: String::new(),
            telefono: String::new(),
            estado: false,
        };
        let formulario = formulario_cliente(Some(&cliente));
        assert!(
            formulario
                .campos
                .iter()
                .all(|campo| campo.etiqueta != "Contraseña")
        );
        assert_eq!(formulario.valor("Estado (s/n)"), "n");
    }

    #[test]
    fn el_foco_rota_en_ambas_direcciones() {
        let mut formulario = formulario_movimiento();
        assert_eq!(formulario.foco, 0);
        formulario.retroceder_foco();
        assert_eq!(formulario.foco, 2);
        formulario.avanzar_foco();
        assert_eq!(formulario.foco, 0);
    }
}
