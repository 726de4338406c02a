//! Request and response bodies for the accounts API.
//!
//! Only the shapes the backend accepts verbatim live here. Everything the
//! backend *returns* is loosely typed and goes through the adapters in the
//! `services` crate instead.

use serde::{Deserialize, Serialize};

pub mod cliente {
    use super::*;

    /// Nested `persona` block of the client payload.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Persona {
        pub nombre: String,
        pub genero: Option<String>,
        pub identificacion: String,
        pub telefono: String,
        pub direccion: String,
    }

    /// Body for `POST /clientes`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClienteNuevo {
        pub persona: Persona,
        pub username: String,
        pub password: String,
        pub estado: bool,
    }

    /// Body for `PUT /clientes/{id}`.
    ///
    /// Credentials are never resubmitted on update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClienteActualizado {
        pub persona: Persona,
        pub estado: bool,
    }
}

pub mod cuenta {
    use super::*;

    /// Body for `POST /cuentas`. The backend assigns the account number.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CuentaNueva {
        pub cliente_id: String,
        pub tipo: String,
        pub saldo_inicial: f64,
        pub estado: bool,
    }

    /// Body for `PUT /cuentas/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CuentaActualizada {
        pub tipo: String,
        pub estado: bool,
    }
}

pub mod movimiento {
    use super::*;

    /// Movement direction as the backend spells it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TipoMovimiento {
        Debito,
        Credito,
    }

    /// Body for `POST /movimientos`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MovimientoNuevo {
        pub cuenta_id: String,
        pub tipo: TipoMovimiento,
        pub valor: f64,
    }

    /// Confirmation body returned by movement creation and deletion.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct OperacionRespuesta {
        pub resultado: String,
    }
}

pub mod reporte {
    use super::*;

    /// Body of `GET /reportes/pdf/base64`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PdfBase64Respuesta {
        pub pdf_base64: String,
        pub filename: String,
    }
}
