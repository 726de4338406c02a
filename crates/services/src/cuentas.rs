//! Accounts: model, adapter and service.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use api_types::cuenta::{CuentaActualizada, CuentaNueva};

use crate::{
    clientes::ClienteService,
    dto, envelope,
    error::{Entidad, Result, ServiceError},
    transporte::Transporte,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Cuenta {
    pub id: Option<String>,
    pub cliente_id: Option<String>,
    pub cliente_nombre: Option<String>,
    pub cliente_identificacion: String,
    pub numero_cuenta: String,
    pub tipo_cuenta: String,
    pub saldo_inicial: f64,
    pub saldo_actual: Option<f64>,
    pub estado: bool,
}

impl Cuenta {
    pub fn desde_dto(registro: &Value) -> Self {
        Self {
            id: dto::texto(registro, &["id", "cuentaId", "uuid"]),
            cliente_id: dto::texto(registro, &["clienteId"]),
            cliente_nombre: dto::texto(registro, &["clienteNombre"]),
            cliente_identificacion: dto::texto(
                registro,
                &["clienteIdentificacion", "identificacionCliente"],
            )
            .unwrap_or_default(),
            numero_cuenta: dto::texto(registro, &["numeroCuenta", "numero"]).unwrap_or_default(),
            tipo_cuenta: dto::texto(registro, &["tipo", "tipoCuenta"]).unwrap_or_default(),
            saldo_inicial: dto::numero(registro, &["saldoInicial", "saldo"]).unwrap_or(0.0),
            saldo_actual: dto::numero(registro, &["saldoActual"]),
            estado: dto::booleano(registro, &["estado", "active"]).unwrap_or(true),
        }
    }
}

/// Form-level data for creating or updating an account. The account number
/// is assigned by the backend; the owning client is referenced by the
/// identification number typed in the form.
#[derive(Clone, Debug, Default)]
pub struct CuentaSolicitud {
    pub cliente_identificacion: String,
    pub tipo_cuenta: String,
    pub saldo_inicial: f64,
    pub estado: bool,
}

#[derive(Clone)]
pub struct CuentaService {
    api: Transporte,
    clientes: ClienteService,
    cache: Arc<Mutex<Vec<Cuenta>>>,
}

impl CuentaService {
    pub fn new(http: reqwest::Client, base_url: &str, clientes: ClienteService) -> Self {
        Self {
            api: Transporte::new(http, base_url),
            clientes,
            cache: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fetches the full account list and replaces the cached copy.
    pub async fn listar(&self) -> Result<Vec<Cuenta>> {
        let res = self.api.get(Entidad::Cuenta, "cuentas").await?;
        let cuentas: Vec<Cuenta> = envelope::unwrap_lista(res)
            .iter()
            .map(Cuenta::desde_dto)
            .collect();
        *self.cache.lock().await = cuentas.clone();
        Ok(cuentas)
    }

    /// Last successfully fetched list.
    pub async fn en_cache(&self) -> Vec<Cuenta> {
        self.cache.lock().await.clone()
    }

    /// Fetches one account; the backend may answer `null` for an unknown
    /// id instead of a 404.
    pub async fn obtener(&self, id: &str) -> Result<Option<Cuenta>> {
        if id.trim().is_empty() {
            return Err(ServiceError::Validacion("El ID es requerido".to_string()));
        }
        let res = self
            .api
            .get(Entidad::Cuenta, &format!("cuentas/{id}"))
            .await?;
        let registro = envelope::unwrap_objeto(res);
        Ok((!registro.is_null()).then(|| Cuenta::desde_dto(&registro)))
    }

    pub async fn listar_por_cliente(&self, identificacion: &str) -> Result<Vec<Cuenta>> {
        let ident = identificacion.trim();
        if ident.is_empty() {
            return Err(ServiceError::Validacion(
                "La identificación del cliente es requerida".to_string(),
            ));
        }
        let res = self
            .api
            .get(Entidad::Cuenta, &format!("cuentas/cliente/{ident}"))
            .await?;
        Ok(envelope::unwrap_lista(res)
            .iter()
            .map(Cuenta::desde_dto)
            .collect())
    }

    /// Creates an account for the client typed in by identification
    /// number. The write endpoint only accepts the backend id, so the
    /// client is resolved first; without a match no request is issued.
    pub async fn crear(&self, solicitud: &CuentaSolicitud) -> Result<Cuenta> {
        let cliente = self
            .clientes
            .buscar_por_identificacion(&solicitud.cliente_identificacion)
            .await?;
        let cliente_id = cliente.and_then(|cliente| cliente.id).ok_or_else(|| {
            ServiceError::NoEncontrado("Cliente no encontrado por identificación".to_string())
        })?;

        let cuerpo = CuentaNueva {
            cliente_id,
            tipo: solicitud.tipo_cuenta.clone(),
            saldo_inicial: solicitud.saldo_inicial,
            estado: solicitud.estado,
        };
        let res = self.api.post(Entidad::Cuenta, "cuentas", &cuerpo).await?;
        let cuenta = Cuenta::desde_dto(&envelope::unwrap_objeto(res));
        self.refrescar().await;
        Ok(cuenta)
    }

    pub async fn actualizar(&self, id: &str, solicitud: &CuentaSolicitud) -> Result<Cuenta> {
        if id.trim().is_empty() {
            return Err(ServiceError::Validacion("El ID es requerido".to_string()));
        }
        let cuerpo = CuentaActualizada {
            tipo: solicitud.tipo_cuenta.clone(),
            estado: solicitud.estado,
        };
        let res = self
            .api
            .put(Entidad::Cuenta, &format!("cuentas/{id}"), &cuerpo)
            .await?;
        let cuenta = Cuenta::desde_dto(&envelope::unwrap_objeto(res));
        self.refrescar().await;
        Ok(cuenta)
    }

    pub async fn eliminar(&self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(ServiceError::Validacion("El ID es requerido".to_string()));
        }
        self.api
            .delete(Entidad::Cuenta, &format!("cuentas/{id}"))
            .await?;
        self.refrescar().await;
        Ok(())
    }

    async fn refrescar(&self) {
        if let Err(err) = self.listar().await {
            tracing::warn!("no se pudo refrescar la lista de cuentas: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adapta_campos_alternativos() {
        let cuenta = Cuenta::desde_dto(&json!({"numero": "123", "saldo": 50}));
        assert_eq!(cuenta.numero_cuenta, "123");
        assert_eq!(cuenta.saldo_inicial, 50.0);
        assert_eq!(cuenta.tipo_cuenta, "");
        assert!(cuenta.estado);
    }

    #[test]
    fn numero_de_cuenta_numerico_se_coacciona() {
        let cuenta = Cuenta::desde_dto(&json!({"numeroCuenta": 478758, "tipo": "AHORRO"}));
        assert_eq!(cuenta.numero_cuenta, "478758");
        assert_eq!(cuenta.tipo_cuenta, "AHORRO");
    }

    #[test]
    fn saldo_actual_ausente_queda_ausente() {
        let cuenta = Cuenta::desde_dto(&json!({"saldoInicial": 100}));
        assert_eq!(cuenta.saldo_actual, None);
        let con_saldo = Cuenta::desde_dto(&json!({"saldoInicial": 100, "saldoActual": 75.5}));
        assert_eq!(con_saldo.saldo_actual, Some(75.5));
    }

    #[test]
    fn identificacion_del_cliente_cae_al_alias() {
        let cuenta = Cuenta::desde_dto(&json!({"identificacionCliente": "0102030405"}));
        assert_eq!(cuenta.cliente_identificacion, "0102030405");
    }
}
