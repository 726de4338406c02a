//! Shared HTTP plumbing for the entity services.

use serde::Serialize;
use serde_json::Value;

use crate::error::{self, Entidad, Result, ServiceError};

#[derive(Clone, Debug)]
pub(crate) struct Transporte {
    http: reqwest::Client,
    base_url: String,
}

impl Transporte {
    pub(crate) fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get(&self, entidad: Entidad, path: &str) -> Result<Value> {
        let res = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(envio_fallido)?;
        cuerpo_json(entidad, res).await
    }

    pub(crate) async fn get_con_parametros(
        &self,
        entidad: Entidad,
        path: &str,
        parametros: &[(&str, String)],
    ) -> Result<Value> {
        let res = self
            .http
            .get(self.url(path))
            .query(parametros)
            .send()
            .await
            .map_err(envio_fallido)?;
        cuerpo_json(entidad, res).await
    }

    pub(crate) async fn get_bytes(
        &self,
        entidad: Entidad,
        path: &str,
        parametros: &[(&str, String)],
        accept: &str,
    ) -> Result<Vec<u8>> {
        let res = self
            .http
            .get(self.url(path))
            .query(parametros)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await
            .map_err(envio_fallido)?;
        if !res.status().is_success() {
            return Err(error::desde_respuesta(entidad, res).await);
        }
        let bytes = res.bytes().await.map_err(envio_fallido)?;
        Ok(bytes.to_vec())
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        entidad: Entidad,
        path: &str,
        cuerpo: &B,
    ) -> Result<Value> {
        let res = self
            .http
            .post(self.url(path))
            .json(cuerpo)
            .send()
            .await
            .map_err(envio_fallido)?;
        cuerpo_json(entidad, res).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        entidad: Entidad,
        path: &str,
        cuerpo: &B,
    ) -> Result<Value> {
        let res = self
            .http
            .put(self.url(path))
            .json(cuerpo)
            .send()
            .await
            .map_err(envio_fallido)?;
        cuerpo_json(entidad, res).await
    }

    pub(crate) async fn delete(&self, entidad: Entidad, path: &str) -> Result<Value> {
        let res = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(envio_fallido)?;
        cuerpo_json(entidad, res).await
    }
}

/// Reads a success body as JSON; an empty body counts as null, which the
/// unwrappers downstream degrade to an empty result.
async fn cuerpo_json(entidad: Entidad, res: reqwest::Response) -> Result<Value> {
    if !res.status().is_success() {
        return Err(error::desde_respuesta(entidad, res).await);
    }
    let texto = res.text().await.map_err(envio_fallido)?;
    if texto.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&texto)
        .map_err(|err| ServiceError::Cliente(format!("respuesta ilegible: {err}")))
}

fn envio_fallido(err: reqwest::Error) -> ServiceError {
    if err.is_builder() || err.is_decode() {
        ServiceError::Cliente(err.to_string())
    } else {
        ServiceError::SinConexion(err)
    }
}
