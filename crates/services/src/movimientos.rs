//! Movements: model, adapter, hydration and service.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::Value;
use tokio::{sync::Mutex, task::JoinSet};

use api_types::movimiento::{MovimientoNuevo, OperacionRespuesta, TipoMovimiento};

use crate::{
    cuentas::{Cuenta, CuentaService},
    dto, envelope,
    error::{Entidad, Result, ServiceError},
    transporte::Transporte,
};

/// Denormalized account fields a movement needs for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CuentaRef {
    pub numero_cuenta: String,
    pub cliente_nombre: String,
    pub cliente_identificacion: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Movimiento {
    pub id: Option<String>,
    pub fecha: DateTime<Utc>,
    /// Raw account reference, present when the backend does not
    /// denormalize; used to hydrate `cuenta`.
    pub cuenta_id: Option<String>,
    pub cuenta: CuentaRef,
    pub saldo_inicial: f64,
    /// Signed amount: positive is a deposit, negative a withdrawal.
    pub valor: f64,
    pub saldo: f64,
    pub estado: bool,
}

impl Movimiento {
    pub fn desde_dto(registro: &Value) -> Self {
        Self {
            id: dto::texto(registro, &["id", "movimientoId", "uuid"]),
            fecha: decodificar_fecha(registro.get("fecha")),
            cuenta_id: dto::texto(registro, &["cuentaId"]),
            cuenta: CuentaRef {
                numero_cuenta: dto::texto(registro, &["numeroCuenta"]).unwrap_or_default(),
                cliente_nombre: dto::texto(registro, &["clienteNombre"]).unwrap_or_default(),
                cliente_identificacion: dto::texto(registro, &["clienteIdentificacion"])
                    .unwrap_or_default(),
            },
            saldo_inicial: dto::numero(registro, &["saldoInicial", "saldoPreMovimiento"])
                .unwrap_or(0.0),
            valor: dto::numero(registro, &["valor"]).unwrap_or(0.0),
            saldo: dto::numero(registro, &["saldo", "saldoPostMovimiento"]).unwrap_or(0.0),
            estado: dto::booleano(registro, &["estado"]).unwrap_or(true),
        }
    }

    /// A movement that carries a raw account reference but no display
    /// fields is unusable until hydrated against the account list.
    pub fn necesita_hidratacion(&self) -> bool {
        self.cuenta_id.is_some()
            && (self.cuenta.numero_cuenta.is_empty()
                || self.cuenta.cliente_identificacion.is_empty())
    }
}

/// Timestamps arrive as epoch seconds, epoch milliseconds, numeric strings
/// or date strings depending on the backend build. Anything unreadable
/// decodes to "now" instead of failing the record.
fn decodificar_fecha(valor: Option<&Value>) -> DateTime<Utc> {
    match valor {
        Some(Value::Number(numero)) => numero
            .as_f64()
            .and_then(fecha_desde_epoch)
            .unwrap_or_else(Utc::now),
        Some(Value::String(texto)) => fecha_desde_texto(texto).unwrap_or_else(Utc::now),
        _ => Utc::now(),
    }
}

/// Values above 1e12 are epoch milliseconds; anything smaller is a
/// (possibly fractional) second count.
fn fecha_desde_epoch(valor: f64) -> Option<DateTime<Utc>> {
    let milisegundos = if valor > 1e12 {
        valor as i64
    } else {
        (valor * 1000.0).floor() as i64
    };
    Utc.timestamp_millis_opt(milisegundos).single()
}

fn fecha_desde_texto(texto: &str) -> Option<DateTime<Utc>> {
    if let Ok(numero) = texto.trim().parse::<f64>() {
        return fecha_desde_epoch(numero);
    }
    if let Ok(fecha) = DateTime::parse_from_rfc3339(texto) {
        return Some(fecha.with_timezone(&Utc));
    }
    // LocalDateTime sin zona, como lo serializa el backend Java.
    if let Ok(fecha) = NaiveDateTime::parse_from_str(texto, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&fecha));
    }
    if let Ok(dia) = NaiveDate::parse_from_str(texto, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&dia.and_time(NaiveTime::MIN)));
    }
    None
}

/// Merges recovered account display fields onto every movement whose raw
/// reference is in the map. Movements without a match stay as they were.
fn combinar_hidratacion(
    movimientos: Vec<Movimiento>,
    cuentas: &HashMap<String, Cuenta>,
) -> Vec<Movimiento> {
    movimientos
        .into_iter()
        .map(|mut movimiento| {
            if let Some(cuenta) = movimiento
                .cuenta_id
                .as_ref()
                .and_then(|id| cuentas.get(id))
            {
                movimiento.cuenta = CuentaRef {
                    numero_cuenta: cuenta.numero_cuenta.clone(),
                    cliente_nombre: cuenta.cliente_nombre.clone().unwrap_or_default(),
                    cliente_identificacion: cuenta.cliente_identificacion.clone(),
                };
            }
            movimiento
        })
        .collect()
}

#[derive(Clone)]
pub struct MovimientoService {
    api: Transporte,
    cuentas: CuentaService,
    cache: Arc<Mutex<Vec<Movimiento>>>,
}

impl MovimientoService {
    pub fn new(http: reqwest::Client, base_url: &str, cuentas: CuentaService) -> Self {
        Self {
            api: Transporte::new(http, base_url),
            cuentas,
            cache: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fetches the full movement list and replaces the cached copy.
    pub async fn listar(&self) -> Result<Vec<Movimiento>> {
        let res = self.api.get(Entidad::Movimiento, "movimientos").await?;
        let movimientos: Vec<Movimiento> = envelope::unwrap_lista(res)
            .iter()
            .map(Movimiento::desde_dto)
            .collect();
        *self.cache.lock().await = movimientos.clone();
        Ok(movimientos)
    }

    /// Last successfully fetched list.
    pub async fn en_cache(&self) -> Vec<Movimiento> {
        self.cache.lock().await.clone()
    }

    /// Fetches the movement list and hydrates display fields for entries
    /// that only carry a raw account reference.
    pub async fn listar_hidratado(&self) -> Result<Vec<Movimiento>> {
        let movimientos = self.listar().await?;
        Ok(self.hidratar(movimientos).await)
    }

    /// Hydration is all-or-nothing: the distinct referenced accounts are
    /// fetched concurrently and any lookup failure degrades the whole
    /// batch to the unhydrated list.
    pub async fn hidratar(&self, movimientos: Vec<Movimiento>) -> Vec<Movimiento> {
        let pendientes: HashSet<String> = movimientos
            .iter()
            .filter(|movimiento| movimiento.necesita_hidratacion())
            .filter_map(|movimiento| movimiento.cuenta_id.clone())
            .collect();
        if pendientes.is_empty() {
            return movimientos;
        }

        let mut tareas = JoinSet::new();
        for id in pendientes {
            let cuentas = self.cuentas.clone();
            tareas.spawn(async move {
                let resultado = cuentas.obtener(&id).await;
                (id, resultado)
            });
        }

        let mut por_id = HashMap::new();
        while let Some(terminada) = tareas.join_next().await {
            match terminada {
                Ok((id, Ok(Some(cuenta)))) => {
                    por_id.insert(id, cuenta);
                }
                // Una cuenta desconocida deja su movimiento sin hidratar.
                Ok((_, Ok(None))) => {}
                Ok((id, Err(err))) => {
                    tracing::warn!("hidratación abandonada, falló la cuenta {id}: {err}");
                    return movimientos;
                }
                Err(err) => {
                    tracing::warn!("hidratación abandonada: {err}");
                    return movimientos;
                }
            }
        }

        combinar_hidratacion(movimientos, &por_id)
    }

    /// Posts a deposit or withdrawal against the account typed in by
    /// number. The write endpoint only accepts the backend id, so the
    /// account is resolved first; without a match no request is issued.
    pub async fn registrar(
        &self,
        numero_cuenta: &str,
        tipo: TipoMovimiento,
        valor: f64,
    ) -> Result<String> {
        let numero = numero_cuenta.trim();
        if numero.is_empty() {
            return Err(ServiceError::Validacion(
                "El número de cuenta es requerido".to_string(),
            ));
        }

        let cuentas = self.cuentas.listar().await?;
        let cuenta_id = cuentas
            .into_iter()
            .find(|cuenta| cuenta.numero_cuenta == numero)
            .and_then(|cuenta| cuenta.id)
            .ok_or_else(|| ServiceError::NoEncontrado("Cuenta no encontrada".to_string()))?;

        let cuerpo = MovimientoNuevo {
            cuenta_id,
            tipo,
            valor,
        };
        let res = self
            .api
            .post(Entidad::Movimiento, "movimientos", &cuerpo)
            .await?;
        let resultado = serde_json::from_value::<OperacionRespuesta>(res)
            .map(|confirmacion| confirmacion.resultado)
            .unwrap_or_else(|_| "Movimiento registrado".to_string());
        self.refrescar().await;
        Ok(resultado)
    }

    pub async fn eliminar(&self, id: &str) -> Result<String> {
        if id.trim().is_empty() {
            return Err(ServiceError::Validacion("El ID es requerido".to_string()));
        }
        let res = self
            .api
            .delete(Entidad::Movimiento, &format!("movimientos/{id}"))
            .await?;
        let resultado = serde_json::from_value::<OperacionRespuesta>(res)
            .map(|confirmacion| confirmacion.resultado)
            .unwrap_or_else(|_| "Movimiento eliminado".to_string());
        self.refrescar().await;
        Ok(resultado)
    }

    async fn refrescar(&self) {
        if let Err(err) = self.listar().await {
            tracing::warn!("no se pudo refrescar la lista de movimientos: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn epoch_en_segundos_y_milisegundos_dan_el_mismo_instante() {
        let segundos = Movimiento::desde_dto(&json!({"fecha": 1_700_000_000}));
        let milisegundos = Movimiento::desde_dto(&json!({"fecha": 1_700_000_000_000_i64}));
        assert_eq!(segundos.fecha, milisegundos.fecha);
        assert_eq!(segundos.fecha.timestamp(), 1_700_000_000);
    }

    #[test]
    fn epoch_fraccionario_trunca_al_milisegundo() {
        let movimiento = Movimiento::desde_dto(&json!({"fecha": 1_700_000_000.75}));
        assert_eq!(movimiento.fecha.timestamp_millis(), 1_700_000_000_750);
    }

    #[test]
    fn fecha_como_cadena_numerica_sigue_la_misma_regla() {
        let texto = Movimiento::desde_dto(&json!({"fecha": "1700000000"}));
        let numero = Movimiento::desde_dto(&json!({"fecha": 1_700_000_000}));
        assert_eq!(texto.fecha, numero.fecha);
    }

    #[test]
    fn fecha_rfc3339_y_local_datetime_se_leen() {
        let rfc = Movimiento::desde_dto(&json!({"fecha": "2024-02-10T08:30:00Z"}));
        assert_eq!(rfc.fecha.timestamp(), 1_707_553_800);
        let local = Movimiento::desde_dto(&json!({"fecha": "2024-02-10T08:30:00"}));
        assert_eq!(local.fecha, rfc.fecha);
    }

    #[test]
    fn fecha_ausente_no_falla_el_registro() {
        let antes = Utc::now();
        let movimiento = Movimiento::desde_dto(&json!({"valor": 10}));
        assert!(movimiento.fecha >= antes);
        assert_eq!(movimiento.valor, 10.0);
    }

    #[test]
    fn saldos_caen_a_los_campos_pre_y_post() {
        let movimiento = Movimiento::desde_dto(&json!({
            "saldoPreMovimiento": 100,
            "saldoPostMovimiento": 50,
            "valor": -50,
        }));
        assert_eq!(movimiento.saldo_inicial, 100.0);
        assert_eq!(movimiento.saldo, 50.0);
        assert_eq!(movimiento.valor, -50.0);
    }

    #[test]
    fn saldo_primario_gana_cuando_es_numerico() {
        let movimiento = Movimiento::desde_dto(&json!({
            "saldoInicial": "no numerico",
            "saldoPreMovimiento": 80,
        }));
        assert_eq!(movimiento.saldo_inicial, 80.0);
    }

    #[test]
    fn detecta_movimientos_sin_datos_de_cuenta() {
        let sin_datos = Movimiento::desde_dto(&json!({"cuentaId": "a1"}));
        assert!(sin_datos.necesita_hidratacion());

        let completo = Movimiento::desde_dto(&json!({
            "cuentaId": "a1",
            "numeroCuenta": "478758",
            "clienteIdentificacion": "0102030405",
        }));
        assert!(!completo.necesita_hidratacion());

        let sin_referencia = Movimiento::desde_dto(&json!({"valor": 5}));
        assert!(!sin_referencia.necesita_hidratacion());
    }

    #[test]
    fn combinar_solo_toca_movimientos_resueltos() {
        let movimientos = vec![
            Movimiento::desde_dto(&json!({"cuentaId": "a1"})),
            Movimiento::desde_dto(&json!({"cuentaId": "a2"})),
        ];
        let mut cuentas = HashMap::new();
        cuentas.insert(
            "a1".to_string(),
            Cuenta::desde_dto(&json!({
                "id": "a1",
                "numeroCuenta": "478758",
                "clienteNombre": "Jose Lema",
                "clienteIdentificacion": "0102030405",
            })),
        );

        let combinados = combinar_hidratacion(movimientos, &cuentas);
        assert_eq!(combinados[0].cuenta.numero_cuenta, "478758");
        assert_eq!(combinados[0].cuenta.cliente_nombre, "Jose Lema");
        assert_eq!(combinados[1].cuenta, CuentaRef::default());
    }
}
