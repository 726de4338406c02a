use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure of a service operation, already translated to the message the
/// user should see.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected locally, before any request went out.
    #[error("{0}")]
    Validacion(String),
    /// A resolver could not match a business key against the fetched list.
    #[error("{0}")]
    NoEncontrado(String),
    /// The backend answered with an error status.
    #[error("{mensaje}")]
    Servidor { status: StatusCode, mensaje: String },
    /// The backend could not be reached at all.
    #[error("No se puede conectar con el servidor. Verifique su conexión.")]
    SinConexion(#[source] reqwest::Error),
    /// A failure on this side of the wire (bad URL, unreadable body).
    #[error("Error: {0}")]
    Cliente(String),
}

/// Entity a request was about, for per-entity error wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entidad {
    Cliente,
    Cuenta,
    Movimiento,
    Reporte,
}

impl Entidad {
    fn no_encontrado(self) -> &'static str {
        match self {
            Self::Cliente => "Cliente no encontrado",
            Self::Cuenta => "Cuenta no encontrada",
            Self::Movimiento => "Movimiento no encontrado",
            Self::Reporte => "Reporte no encontrado",
        }
    }

    fn duplicado(self) -> &'static str {
        match self {
            Self::Cliente => "Ya existe un cliente con esa cédula",
            Self::Cuenta => "Ya existe una cuenta con ese número",
            Self::Movimiento => "Ya existe el movimiento",
            Self::Reporte => "Ya existe el reporte",
        }
    }
}

/// Error detail bodies seen in the wild. Field names vary per endpoint.
#[derive(Debug, Default, Deserialize)]
struct DetalleError {
    message: Option<String>,
    error: Option<String>,
    details: Option<String>,
}

impl DetalleError {
    fn mensaje(self) -> Option<String> {
        [self.message, self.error, self.details]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

fn mensaje_para_estado(entidad: Entidad, status: StatusCode, detalle: Option<String>) -> String {
    match status.as_u16() {
        400 => detalle.unwrap_or_else(|| "Datos inválidos".to_string()),
        404 => entidad.no_encontrado().to_string(),
        409 => entidad.duplicado().to_string(),
        500 => "Error interno del servidor".to_string(),
        otro => detalle.unwrap_or_else(|| format!("Error del servidor: {otro}")),
    }
}

/// Translates a non-success response into the user-visible error.
pub(crate) async fn desde_respuesta(entidad: Entidad, res: reqwest::Response) -> ServiceError {
    let status = res.status();
    let detalle = match res.json::<DetalleError>().await {
        Ok(cuerpo) => cuerpo.mensaje(),
        Err(_) => None,
    };
    ServiceError::Servidor {
        status,
        mensaje: mensaje_para_estado(entidad, status, detalle),
    }
}
