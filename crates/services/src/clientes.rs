//! Clients: model, adapter and service.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use api_types::cliente::{ClienteActualizado, ClienteNuevo, Persona};

use crate::{
    dto, envelope,
    error::{Entidad, Result, ServiceError},
    transporte::Transporte,
};

/// A client as the rest of the application sees it.
///
/// The backend never returns credentials on reads, so there is no password
/// field here.
#[derive(Clone, Debug, PartialEq)]
pub struct Cliente {
    pub id: Option<String>,
    pub identificacion: String,
    pub nombre: String,
    pub genero: Option<String>,
    pub edad: Option<i64>,
    pub direccion: String,
    pub telefono: String,
    pub estado: bool,
}

impl Cliente {
    /// Adapts a loosely-typed backend record, tolerating the nested
    /// `persona` shape and the legacy flat field names.
    pub fn desde_dto(registro: &Value) -> Self {
        let persona = dto::persona(registro);

        let nombre_pila = dto::texto(registro, &["nombre"])
            .or_else(|| persona.and_then(|p| dto::texto(p, &["nombre"])))
            .unwrap_or_default();
        let apellido = persona
            .and_then(|p| dto::texto(p, &["apellido", "apellidos"]))
            .unwrap_or_default();
        let completo = [nombre_pila.as_str(), apellido.as_str()]
            .iter()
            .copied()
            .filter(|parte| !parte.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        let nombre = if completo.is_empty() { nombre_pila.trim().to_string() } else { completo };

        Self {
            id: dto::texto(registro, &["id", "clienteId", "idCliente", "uuid"]),
            identificacion: dto::texto(registro, &["identificacion"])
                .or_else(|| persona.and_then(|p| dto::texto(p, &["identificacion"])))
                .or_else(|| dto::texto(registro, &["cedula", "identification"]))
                .unwrap_or_default(),
            nombre,
            genero: dto::texto(registro, &["genero"])
                .or_else(|| persona.and_then(|p| dto::texto(p, &["genero"])))
                .or_else(|| dto::texto(registro, &["sexo", "gender"])),
            edad: dto::entero(registro, &["edad"])
                .or_else(|| persona.and_then(|p| dto::entero(p, &["edad"]))),
            direccion: dto::texto(registro, &["direccion"])
                .or_else(|| persona.and_then(|p| dto::texto(p, &["direccion"])))
                .or_else(|| dto::texto(registro, &["address"]))
                .unwrap_or_default(),
            telefono: dto::texto(registro, &["telefono"])
                .or_else(|| persona.and_then(|p| dto::texto(p, &["telefono"])))
                .or_else(|| dto::texto(registro, &["phone"]))
                .unwrap_or_default(),
            estado: dto::booleano(registro, &["estado", "active"]).unwrap_or(true),
        }
    }
}

/// Form-level data for creating or updating a client.
#[derive(Clone, Debug, Default)]
pub struct ClienteSolicitud {
    pub nombre: String,
    pub genero: Option<String>,
    pub identificacion: String,
    pub direccion: String,
    pub telefono: String,
    pub contrasena: String,
    pub estado: bool,
}

impl ClienteSolicitud {
    fn persona(&self) -> Persona {
        Persona {
            nombre: self.nombre.clone(),
            genero: self.genero.clone(),
            identificacion: self.identificacion.clone(),
            telefono: self.telefono.clone(),
            direccion: self.direccion.clone(),
        }
    }
}

/// Username the backend requires on creation: derived from the display
/// name, falling back to the identification number.
fn username_por_defecto(nombre: &str, identificacion: &str) -> String {
    let propuesto: String = nombre
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".")
        .chars()
        .take(20)
        .collect();
    if propuesto.is_empty() {
        identificacion.to_string()
    } else {
        propuesto
    }
}

#[derive(Clone)]
pub struct ClienteService {
    api: Transporte,
    cache: Arc<Mutex<Vec<Cliente>>>,
}

impl ClienteService {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            api: Transporte::new(http, base_url),
            cache: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fetches the full client list and replaces the cached copy.
    pub async fn listar(&self) -> Result<Vec<Cliente>> {
        let res = self.api.get(Entidad::Cliente, "clientes").await?;
        let clientes: Vec<Cliente> = envelope::unwrap_lista(res)
            .iter()
            .map(Cliente::desde_dto)
            .collect();
        *self.cache.lock().await = clientes.clone();
        Ok(clientes)
    }

    /// Last successfully fetched list.
    pub async fn en_cache(&self) -> Vec<Cliente> {
        self.cache.lock().await.clone()
    }

    pub async fn obtener(&self, id: &str) -> Result<Cliente> {
        if id.trim().is_empty() {
            return Err(ServiceError::Validacion("El ID es requerido".to_string()));
        }
        let res = self
            .api
            .get(Entidad::Cliente, &format!("clientes/{id}"))
            .await?;
        Ok(Cliente::desde_dto(&envelope::unwrap_objeto(res)))
    }

    /// Resolves a client by its identification number, scanning the fresh
    /// list for an exact match.
    ///
    /// An empty identification is rejected before any request goes out.
    pub async fn buscar_por_identificacion(&self, identificacion: &str) -> Result<Option<Cliente>> {
        let ident = identificacion.trim();
        if ident.is_empty() {
            return Err(ServiceError::Validacion(
                "La identificación es requerida".to_string(),
            ));
        }
        let clientes = self.listar().await?;
        Ok(clientes
            .into_iter()
            .find(|cliente| cliente.identificacion == ident))
    }

    pub async fn crear(&self, solicitud: &ClienteSolicitud) -> Result<Cliente> {
        let cuerpo = ClienteNuevo {
            persona: solicitud.persona(),
            username: username_por_defecto(&solicitud.nombre, &solicitud.identificacion),
            password: solicitud.contrasena.clone(),
            estado: solicitud.estado,
        };
        let res = self.api.post(Entidad::Cliente, "clientes", &cuerpo).await?;
        let cliente = Cliente::desde_dto(&envelope::unwrap_objeto(res));
        self.refrescar().await;
        Ok(cliente)
    }

    pub async fn actualizar(&self, id: &str, solicitud: &ClienteSolicitud) -> Result<Cliente> {
        if id.trim().is_empty() {
            return Err(ServiceError::Validacion("El ID es requerido".to_string()));
        }
        let cuerpo = ClienteActualizado {
            persona: solicitud.persona(),
            estado: solicitud.estado,
        };
        let res = self
            .api
            .put(Entidad::Cliente, &format!("clientes/{id}"), &cuerpo)
            .await?;
        let cliente = Cliente::desde_dto(&envelope::unwrap_objeto(res));
        self.refrescar().await;
        Ok(cliente)
    }

    pub async fn eliminar(&self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(ServiceError::Validacion("El ID es requerido".to_string()));
        }
        self.api
            .delete(Entidad::Cliente, &format!("clientes/{id}"))
            .await?;
        self.refrescar().await;
        Ok(())
    }

    /// Refreshes the cache after a confirmed mutation. A refresh failure
    /// keeps the stale list; it never fails the mutation itself.
    async fn refrescar(&self) {
        if let Err(err) = self.listar().await {
            tracing::warn!("no se pudo refrescar la lista de clientes: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adapta_registro_plano() {
        let cliente = Cliente::desde_dto(&json!({
            "id": "c1",
            "nombre": "Jose Lema",
            "identificacion": "0102030405",
            "genero": "M",
            "edad": 35,
            "direccion": "Otavalo sn y principal",
            "telefono": "098254785",
            "estado": true,
        }));
        assert_eq!(cliente.id.as_deref(), Some("c1"));
        assert_eq!(cliente.nombre, "Jose Lema");
        assert_eq!(cliente.identificacion, "0102030405");
        assert_eq!(cliente.edad, Some(35));
        assert_eq!(cliente.direccion, "Otavalo sn y principal");
        assert!(cliente.estado);
    }

    #[test]
    fn adapta_registro_con_persona_anidada() {
        let cliente = Cliente::desde_dto(&json!({
            "id": 7,
            "persona": {
                "nombre": "Marianela",
                "apellido": "Montalvo",
                "identificacion": "0987654321",
                "telefono": "097548965",
            },
        }));
        assert_eq!(cliente.id.as_deref(), Some("7"));
        assert_eq!(cliente.nombre, "Marianela Montalvo");
        assert_eq!(cliente.identificacion, "0987654321");
        assert_eq!(cliente.telefono, "097548965");
    }

    #[test]
    fn nombre_raiz_gana_sobre_persona() {
        let cliente = Cliente::desde_dto(&json!({
            "nombre": "Juan",
            "persona": {"nombre": "Otro", "apellidos": "Osorio"},
        }));
        assert_eq!(cliente.nombre, "Juan Osorio");
    }

    #[test]
    fn identificacion_cae_a_cedula() {
        let cliente = Cliente::desde_dto(&json!({"cedula": "1710034065"}));
        assert_eq!(cliente.identificacion, "1710034065");
    }

    #[test]
    fn estado_ausente_es_activo() {
        let cliente = Cliente::desde_dto(&json!({"nombre": "Ana"}));
        assert!(cliente.estado);
        let inactivo = Cliente::desde_dto(&json!({"active": false}));
        assert!(!inactivo.estado);
    }

    #[test]
    fn registro_vacio_adapta_a_valores_por_defecto() {
        let cliente = Cliente::desde_dto(&Value::Null);
        assert_eq!(cliente.id, None);
        assert_eq!(cliente.nombre, "");
        assert!(cliente.estado);
    }

    #[test]
    fn username_se_deriva_del_nombre() {
        assert_eq!(username_por_defecto("Jose Lema", "0102030405"), "jose.lema");
        assert_eq!(
            username_por_defecto("Juan Osorio Bautista Larga", "17"),
            "juan.osorio.bautista"
        );
        assert_eq!(username_por_defecto("", "0102030405"), "0102030405");
    }
}
