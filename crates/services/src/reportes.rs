//! Account-statement reports.

use base64::Engine;
use chrono::NaiveDate;

use api_types::reporte::PdfBase64Respuesta;

use crate::{
    envelope,
    error::{Entidad, Result, ServiceError},
    movimientos::Movimiento,
    transporte::Transporte,
};

#[derive(Clone)]
pub struct ReporteService {
    api: Transporte,
}

impl ReporteService {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            api: Transporte::new(http, base_url),
        }
    }

    fn parametros(
        cliente_id: &str,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("clienteId", cliente_id.to_string()),
            ("fechaInicio", desde.format("%Y-%m-%d").to_string()),
            ("fechaFin", hasta.format("%Y-%m-%d").to_string()),
        ]
    }

    fn validar(cliente_id: &str, desde: NaiveDate, hasta: NaiveDate) -> Result<()> {
        if cliente_id.trim().is_empty() {
            return Err(ServiceError::Validacion(
                "El ID del cliente es requerido".to_string(),
            ));
        }
        if hasta < desde {
            return Err(ServiceError::Validacion(
                "El rango de fechas es inválido".to_string(),
            ));
        }
        Ok(())
    }

    /// Statement rows for a client over a date range.
    pub async fn estado_cuenta(
        &self,
        cliente_id: &str,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<Vec<Movimiento>> {
        Self::validar(cliente_id, desde, hasta)?;
        let res = self
            .api
            .get_con_parametros(
                Entidad::Reporte,
                "reportes",
                &Self::parametros(cliente_id, desde, hasta),
            )
            .await?;
        Ok(envelope::unwrap_lista(res)
            .iter()
            .map(Movimiento::desde_dto)
            .collect())
    }

    /// Same statement rendered by the backend as a PDF document.
    pub async fn pdf(
        &self,
        cliente_id: &str,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<Vec<u8>> {
        Self::validar(cliente_id, desde, hasta)?;
        self.api
            .get_bytes(
                Entidad::Reporte,
                "reportes/pdf",
                &Self::parametros(cliente_id, desde, hasta),
                "application/pdf",
            )
            .await
    }

    /// Base64 variant of the PDF endpoint; returns the suggested filename
    /// and the decoded document.
    pub async fn pdf_base64(
        &self,
        cliente_id: &str,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<(String, Vec<u8>)> {
        Self::validar(cliente_id, desde, hasta)?;
        let res = self
            .api
            .get_con_parametros(
                Entidad::Reporte,
                "reportes/pdf/base64",
                &Self::parametros(cliente_id, desde, hasta),
            )
            .await?;
        let respuesta: PdfBase64Respuesta = serde_json::from_value(res)
            .map_err(|err| ServiceError::Cliente(format!("respuesta ilegible: {err}")))?;
        let documento = base64::prelude::BASE64_STANDARD
            .decode(respuesta.pdf_base64.as_bytes())
            .map_err(|err| ServiceError::Cliente(format!("documento ilegible: {err}")))?;
        Ok((respuesta.filename, documento))
    }
}

/// Serializes statement rows as CSV for export.
pub fn a_csv(movimientos: &[Movimiento]) -> Result<String> {
    let mut escritor = csv::Writer::from_writer(Vec::new());
    escritor
        .write_record([
            "Fecha",
            "Cliente",
            "Numero Cuenta",
            "Saldo Inicial",
            "Movimiento",
            "Saldo Disponible",
            "Estado",
        ])
        .map_err(csv_fallido)?;
    for movimiento in movimientos {
        escritor
            .write_record([
                movimiento.fecha.to_rfc3339(),
                movimiento.cuenta.cliente_nombre.clone(),
                movimiento.cuenta.numero_cuenta.clone(),
                movimiento.saldo_inicial.to_string(),
                movimiento.valor.to_string(),
                movimiento.saldo.to_string(),
                if movimiento.estado {
                    "Activo".to_string()
                } else {
                    "Inactivo".to_string()
                },
            ])
            .map_err(csv_fallido)?;
    }
    let bytes = escritor
        .into_inner()
        .map_err(|err| ServiceError::Cliente(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ServiceError::Cliente(err.to_string()))
}

fn csv_fallido(err: csv::Error) -> ServiceError {
    ServiceError::Cliente(err.to_string())
}
