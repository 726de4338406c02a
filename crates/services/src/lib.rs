//! Client-side services for the accounts API.
//!
//! This crate is a thin client: clients, accounts and movements live
//! behind the HTTP backend and are never persisted locally beyond each
//! service's last-fetched-list cache. Responses arrive loosely typed and
//! inconsistently enveloped; everything funnels through the unwrappers in
//! [`envelope`] and the per-entity adapters before the rest of the
//! application sees it. Failures are translated to user-readable messages
//! at this boundary.

pub mod clientes;
pub mod cuentas;
pub mod envelope;
pub mod error;
pub mod movimientos;
pub mod reportes;

mod dto;
mod transporte;

pub use clientes::{Cliente, ClienteService, ClienteSolicitud};
pub use cuentas::{Cuenta, CuentaService, CuentaSolicitud};
pub use error::{Result, ServiceError};
pub use movimientos::{CuentaRef, Movimiento, MovimientoService};
pub use reportes::ReporteService;

/// The four entity services wired over one shared HTTP client.
#[derive(Clone)]
pub struct Servicios {
    pub clientes: ClienteService,
    pub cuentas: CuentaService,
    pub movimientos: MovimientoService,
    pub reportes: ReporteService,
}

impl Servicios {
    pub fn nuevo(base_url: &str) -> Self {
        let http = reqwest::Client::new();
        let clientes = ClienteService::new(http.clone(), base_url);
        let cuentas = CuentaService::new(http.clone(), base_url, clientes.clone());
        let movimientos = MovimientoService::new(http.clone(), base_url, cuentas.clone());
        let reportes = ReporteService::new(http, base_url);
        Self {
            clientes,
            cuentas,
            movimientos,
            reportes,
        }
    }
}
