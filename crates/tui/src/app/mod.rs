//! Page controllers: section state, key handling and service calls.

pub mod forms;

use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};

use services::{Cliente, Cuenta, Movimiento, Servicios};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui,
};

use forms::Formulario;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seccion {
    Clientes,
    Cuentas,
    Movimientos,
    Reportes,
}

impl Seccion {
    pub const TODAS: [Self; 4] = [
        Self::Clientes,
        Self::Cuentas,
        Self::Movimientos,
        Self::Reportes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Clientes => "Clientes",
            Self::Cuentas => "Cuentas",
            Self::Movimientos => "Movimientos",
            Self::Reportes => "Reportes",
        }
    }
}

/// Input focus of the active section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modo {
    #[default]
    Lista,
    Busqueda,
    Formulario,
    ConfirmarEliminar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NivelBanner {
    Exito,
    Error,
}

/// Success/error message shown until the next action.
#[derive(Debug, Clone)]
pub struct Banner {
    pub nivel: NivelBanner,
    pub mensaje: String,
}

/// Rows an entity exposes to the search box.
pub trait Filtrable {
    fn coincide(&self, termino: &str) -> bool;
}

impl Filtrable for Cliente {
    fn coincide(&self, termino: &str) -> bool {
        self.nombre.to_lowercase().contains(termino)
            || self.identificacion.to_lowercase().contains(termino)
    }
}

impl Filtrable for Cuenta {
    fn coincide(&self, termino: &str) -> bool {
        self.numero_cuenta.to_lowercase().contains(termino)
            || self.cliente_identificacion.to_lowercase().contains(termino)
            || self.tipo_cuenta.to_lowercase().contains(termino)
    }
}

impl Filtrable for Movimiento {
    fn coincide(&self, termino: &str) -> bool {
        self.cuenta.numero_cuenta.to_lowercase().contains(termino)
            || self
                .cuenta
                .cliente_identificacion
                .to_lowercase()
                .contains(termino)
            || self.valor.to_string().contains(termino)
    }
}

/// List page state: full item list plus search term and modal bookkeeping.
#[derive(Debug)]
pub struct ListaState<T> {
    pub items: Vec<T>,
    pub busqueda: String,
    pub seleccionado: usize,
    pub modo: Modo,
    pub formulario: Formulario,
    /// Id under edit; `None` while creating.
    pub editando: Option<String>,
}

impl<T> Default for ListaState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            busqueda: String::new(),
            seleccionado: 0,
            modo: Modo::Lista,
            formulario: Formulario::default(),
            editando: None,
        }
    }
}

impl<T: Filtrable> ListaState<T> {
    /// Items matching the current search term, in list order.
    pub fn visibles(&self) -> Vec<&T> {
        let termino = self.busqueda.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| termino.is_empty() || item.coincide(&termino))
            .collect()
    }

    pub fn seleccionado_visible(&self) -> Option<&T> {
        self.visibles().get(self.seleccionado).copied()
    }

    /// Replaces the whole list, never patches it.
    pub fn reemplazar(&mut self, items: Vec<T>) {
        self.items = items;
        self.seleccionado = 0;
    }

    fn select_next(&mut self) {
        let visibles = self.visibles().len();
        if visibles == 0 {
            return;
        }
        self.seleccionado = (self.seleccionado + 1).min(visibles - 1);
    }

    fn select_prev(&mut self) {
        self.seleccionado = self.seleccionado.saturating_sub(1);
    }
}

/// Last successfully resolved statement query.
#[derive(Debug, Clone)]
pub struct ConsultaReporte {
    pub cliente_id: String,
    pub cliente_nombre: String,
    pub desde: NaiveDate,
    pub hasta: NaiveDate,
}

#[derive(Debug)]
pub struct ReportesState {
    pub formulario: Formulario,
    pub filas: Vec<Movimiento>,
    pub consulta: Option<ConsultaReporte>,
    pub modo: Modo,
    pub seleccionado: usize,
}

impl Default for ReportesState {
    fn default() -> Self {
        Self {
            formulario: forms::formulario_reporte(),
            filas: Vec::new(),
            consulta: None,
            modo: Modo::Formulario,
            seleccionado: 0,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub seccion: Seccion,
    pub clientes: ListaState<Cliente>,
    pub cuentas: ListaState<Cuenta>,
    pub movimientos: ListaState<Movimiento>,
    pub reportes: ReportesState,
    pub banner: Option<Banner>,
    pub cargando: bool,
    pub zona: Tz,
    pub base_url: String,
}

pub struct App {
    servicios: Servicios,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let zona: Tz = config
            .timezone
            .parse()
            .map_err(|_| AppError::Terminal(format!("zona horaria inválida: {}", config.timezone)))?;
        let servicios = Servicios::nuevo(&config.base_url);
        let state = AppState {
            seccion: Seccion::Clientes,
            clientes: ListaState::default(),
            cuentas: ListaState::default(),
            movimientos: ListaState::default(),
            reportes: ReportesState::default(),
            banner: None,
            cargando: false,
            zona,
            base_url: config.base_url,
        };

        Ok(Self {
            servicios,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.cargar_clientes().await;
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        match ui::keymap::map_key(key) {
            ui::keymap::AppAction::Quit => self.should_quit = true,
            ui::keymap::AppAction::Cancel => self.cancelar(),
            ui::keymap::AppAction::NextField => {
                if let Some(formulario) = self.formulario_activo() {
                    formulario.avanzar_foco();
                }
            }
            ui::keymap::AppAction::Up => self.arriba(),
            ui::keymap::AppAction::Down => self.abajo(),
            ui::keymap::AppAction::Backspace => self.retroceso(),
            ui::keymap::AppAction::Submit => self.confirmar().await,
            ui::keymap::AppAction::Input(ch) => self.entrada(ch).await,
            ui::keymap::AppAction::None => {}
        }
    }

    fn modo_actual(&self) -> Modo {
        match self.state.seccion {
            Seccion::Clientes => self.state.clientes.modo,
            Seccion::Cuentas => self.state.cuentas.modo,
            Seccion::Movimientos => self.state.movimientos.modo,
            Seccion::Reportes => self.state.reportes.modo,
        }
    }

    fn poner_modo(&mut self, modo: Modo) {
        match self.state.seccion {
            Seccion::Clientes => self.state.clientes.modo = modo,
            Seccion::Cuentas => self.state.cuentas.modo = modo,
            Seccion::Movimientos => self.state.movimientos.modo = modo,
            Seccion::Reportes => self.state.reportes.modo = modo,
        }
    }

    fn formulario_activo(&mut self) -> Option<&mut Formulario> {
        match self.state.seccion {
            Seccion::Clientes if self.state.clientes.modo == Modo::Formulario => {
                Some(&mut self.state.clientes.formulario)
            }
            Seccion::Cuentas if self.state.cuentas.modo == Modo::Formulario => {
                Some(&mut self.state.cuentas.formulario)
            }
            Seccion::Movimientos if self.state.movimientos.modo == Modo::Formulario => {
                Some(&mut self.state.movimientos.formulario)
            }
            Seccion::Reportes if self.state.reportes.modo == Modo::Formulario => {
                Some(&mut self.state.reportes.formulario)
            }
            _ => None,
        }
    }

    fn cancelar(&mut self) {
        self.state.banner = None;
        match self.modo_actual() {
            Modo::Formulario | Modo::ConfirmarEliminar => {
                // El formulario de reportes es la pantalla inicial: sin
                // resultados previos no hay lista a la que volver.
                if self.state.seccion == Seccion::Reportes && self.state.reportes.filas.is_empty() {
                    return;
                }
                self.poner_modo(Modo::Lista);
            }
            Modo::Busqueda => {
                match self.state.seccion {
                    Seccion::Clientes => self.state.clientes.busqueda.clear(),
                    Seccion::Cuentas => self.state.cuentas.busqueda.clear(),
                    Seccion::Movimientos => self.state.movimientos.busqueda.clear(),
                    Seccion::Reportes => {}
                }
                self.poner_modo(Modo::Lista);
            }
            Modo::Lista => {}
        }
    }

    fn arriba(&mut self) {
        if let Some(formulario) = self.formulario_activo() {
            formulario.retroceder_foco();
            return;
        }
        if self.modo_actual() == Modo::ConfirmarEliminar {
            return;
        }
        match self.state.seccion {
            Seccion::Clientes => self.state.clientes.select_prev(),
            Seccion::Cuentas => self.state.cuentas.select_prev(),
            Seccion::Movimientos => self.state.movimientos.select_prev(),
            Seccion::Reportes => {
                self.state.reportes.seleccionado = self.state.reportes.seleccionado.saturating_sub(1);
            }
        }
    }

    fn abajo(&mut self) {
        if let Some(formulario) = self.formulario_activo() {
            formulario.avanzar_foco();
            return;
        }
        if self.modo_actual() == Modo::ConfirmarEliminar {
            return;
        }
        match self.state.seccion {
            Seccion::Clientes => self.state.clientes.select_next(),
            Seccion::Cuentas => self.state.cuentas.select_next(),
            Seccion::Movimientos => self.state.movimientos.select_next(),
            Seccion::Reportes => {
                let tope = self.state.reportes.filas.len().saturating_sub(1);
                self.state.reportes.seleccionado =
                    (self.state.reportes.seleccionado + 1).min(tope);
            }
        }
    }

    fn retroceso(&mut self) {
        match self.modo_actual() {
            Modo::Busqueda => match self.state.seccion {
                Seccion::Clientes => {
                    self.state.clientes.busqueda.pop();
                    self.state.clientes.seleccionado = 0;
                }
                Seccion::Cuentas => {
                    self.state.cuentas.busqueda.pop();
                    self.state.cuentas.seleccionado = 0;
                }
                Seccion::Movimientos => {
                    self.state.movimientos.busqueda.pop();
                    self.state.movimientos.seleccionado = 0;
                }
                Seccion::Reportes => {}
            },
            Modo::Formulario => {
                if let Some(formulario) = self.formulario_activo() {
                    formulario.borrar();
                }
            }
            _ => {}
        }
    }

    async fn entrada(&mut self, ch: char) {
        match self.modo_actual() {
            Modo::Busqueda => match self.state.seccion {
                Seccion::Clientes => {
                    self.state.clientes.busqueda.push(ch);
                    self.state.clientes.seleccionado = 0;
                }
                Seccion::Cuentas => {
                    self.state.cuentas.busqueda.push(ch);
                    self.state.cuentas.seleccionado = 0;
                }
                Seccion::Movimientos => {
                    self.state.movimientos.busqueda.push(ch);
                    self.state.movimientos.seleccionado = 0;
                }
                Seccion::Reportes => {}
            },
            Modo::Formulario => {
                if let Some(formulario) = self.formulario_activo() {
                    formulario.escribir(ch);
                }
            }
            Modo::ConfirmarEliminar => {}
            Modo::Lista => self.comando(ch).await,
        }
    }

    async fn comando(&mut self, ch: char) {
        self.state.banner = None;
        match ch {
            'q' | 'Q' => self.should_quit = true,
            '1' => self.ir_a(Seccion::Clientes).await,
            '2' => self.ir_a(Seccion::Cuentas).await,
            '3' => self.ir_a(Seccion::Movimientos).await,
            '4' => self.ir_a(Seccion::Reportes).await,
            'r' | 'R' => self.recargar().await,
            '/' => {
                if self.state.seccion != Seccion::Reportes {
                    self.poner_modo(Modo::Busqueda);
                }
            }
            'n' | 'N' => self.abrir_creacion(),
            'e' | 'E' => self.abrir_edicion(),
            'd' | 'D' => {
                if self.state.seccion != Seccion::Reportes {
                    self.poner_modo(Modo::ConfirmarEliminar);
                }
            }
            'p' | 'P' => {
                if self.state.seccion == Seccion::Reportes {
                    self.guardar_pdf().await;
                }
            }
            'x' | 'X' => {
                if self.state.seccion == Seccion::Reportes {
                    self.exportar_csv();
                }
            }
            _ => {}
        }
    }

    async fn ir_a(&mut self, seccion: Seccion) {
        self.state.seccion = seccion;
        match seccion {
            Seccion::Clientes if self.state.clientes.items.is_empty() => {
                self.cargar_clientes().await;
            }
            Seccion::Cuentas if self.state.cuentas.items.is_empty() => {
                self.cargar_cuentas().await;
            }
            Seccion::Movimientos if self.state.movimientos.items.is_empty() => {
                self.cargar_movimientos().await;
            }
            _ => {}
        }
    }

    async fn recargar(&mut self) {
        match self.state.seccion {
            Seccion::Clientes => self.cargar_clientes().await,
            Seccion::Cuentas => self.cargar_cuentas().await,
            Seccion::Movimientos => self.cargar_movimientos().await,
            Seccion::Reportes => {}
        }
    }

    fn abrir_creacion(&mut self) {
        match self.state.seccion {
            Seccion::Clientes => {
                self.state.clientes.formulario = forms::formulario_cliente(None);
                self.state.clientes.editando = None;
                self.state.clientes.modo = Modo::Formulario;
            }
            Seccion::Cuentas => {
                self.state.cuentas.formulario = forms::formulario_cuenta(None);
                self.state.cuentas.editando = None;
                self.state.cuentas.modo = Modo::Formulario;
            }
            Seccion::Movimientos => {
                self.state.movimientos.formulario = forms::formulario_movimiento();
                self.state.movimientos.modo = Modo::Formulario;
            }
            Seccion::Reportes => {
                self.state.reportes.formulario = forms::formulario_reporte();
                self.state.reportes.modo = Modo::Formulario;
            }
        }
    }

    fn abrir_edicion(&mut self) {
        match self.state.seccion {
            Seccion::Clientes => {
                let Some(cliente) = self.state.clientes.seleccionado_visible().cloned() else {
                    return;
                };
                self.state.clientes.formulario = forms::formulario_cliente(Some(&cliente));
                self.state.clientes.editando = cliente.id;
                self.state.clientes.modo = Modo::Formulario;
            }
            Seccion::Cuentas => {
                let Some(cuenta) = self.state.cuentas.seleccionado_visible().cloned() else {
                    return;
                };
                self.state.cuentas.formulario = forms::formulario_cuenta(Some(&cuenta));
                self.state.cuentas.editando = cuenta.id;
                self.state.cuentas.modo = Modo::Formulario;
            }
            // Los movimientos no se editan, solo se registran o eliminan.
            Seccion::Movimientos => {}
            Seccion::Reportes => {
                self.state.reportes.modo = Modo::Formulario;
            }
        }
    }

    async fn confirmar(&mut self) {
        match (self.state.seccion, self.modo_actual()) {
            (_, Modo::Busqueda) => self.poner_modo(Modo::Lista),
            (Seccion::Clientes, Modo::Formulario) => self.enviar_cliente().await,
            (Seccion::Clientes, Modo::ConfirmarEliminar) => self.eliminar_cliente().await,
            (Seccion::Cuentas, Modo::Formulario) => self.enviar_cuenta().await,
            (Seccion::Cuentas, Modo::ConfirmarEliminar) => self.eliminar_cuenta().await,
            (Seccion::Movimientos, Modo::Formulario) => self.enviar_movimiento().await,
            (Seccion::Movimientos, Modo::ConfirmarEliminar) => self.eliminar_movimiento().await,
            (Seccion::Reportes, Modo::Formulario) => self.consultar_reporte().await,
            _ => {}
        }
    }

    async fn enviar_cliente(&mut self) {
        let solicitud = match forms::solicitud_cliente(&self.state.clientes.formulario) {
            Ok(solicitud) => solicitud,
            Err(mensaje) => {
                self.mostrar_error(mensaje);
                return;
            }
        };

        let resultado = match self.state.clientes.editando.clone() {
            Some(id) => self
                .servicios
                .clientes
                .actualizar(&id, &solicitud)
                .await
                .map(|_| "Cliente actualizado"),
            None => self
                .servicios
                .clientes
                .crear(&solicitud)
                .await
                .map(|_| "Cliente creado"),
        };

        match resultado {
            Ok(mensaje) => {
                self.mostrar_exito(mensaje);
                self.state.clientes.modo = Modo::Lista;
                let clientes = self.servicios.clientes.en_cache().await;
                self.state.clientes.reemplazar(clientes);
            }
            Err(err) => self.mostrar_error(err.to_string()),
        }
    }

    async fn eliminar_cliente(&mut self) {
        self.state.clientes.modo = Modo::Lista;
        let Some(id) = self
            .state
            .clientes
            .seleccionado_visible()
            .and_then(|cliente| cliente.id.clone())
        else {
            return;
        };
        match self.servicios.clientes.eliminar(&id).await {
            Ok(()) => {
                self.mostrar_exito("Cliente eliminado");
                let clientes = self.servicios.clientes.en_cache().await;
                self.state.clientes.reemplazar(clientes);
            }
            Err(err) => self.mostrar_error(err.to_string()),
        }
    }

    async fn enviar_cuenta(&mut self) {
        let solicitud = match forms::solicitud_cuenta(&self.state.cuentas.formulario) {
            Ok(solicitud) => solicitud,
            Err(mensaje) => {
                self.mostrar_error(mensaje);
                return;
            }
        };

        let resultado = match self.state.cuentas.editando.clone() {
            Some(id) => self
                .servicios
                .cuentas
                .actualizar(&id, &solicitud)
                .await
                .map(|_| "Cuenta actualizada"),
            None => self
                .servicios
                .cuentas
                .crear(&solicitud)
                .await
                .map(|_| "Cuenta creada"),
        };

        match resultado {
            Ok(mensaje) => {
                self.mostrar_exito(mensaje);
                self.state.cuentas.modo = Modo::Lista;
                let cuentas = self.servicios.cuentas.en_cache().await;
                self.state.cuentas.reemplazar(cuentas);
            }
            Err(err) => self.mostrar_error(err.to_string()),
        }
    }

    async fn eliminar_cuenta(&mut self) {
        self.state.cuentas.modo = Modo::Lista;
        let Some(id) = self
            .state
            .cuentas
            .seleccionado_visible()
            .and_then(|cuenta| cuenta.id.clone())
        else {
            return;
        };
        match self.servicios.cuentas.eliminar(&id).await {
            Ok(()) => {
                self.mostrar_exito("Cuenta eliminada");
                let cuentas = self.servicios.cuentas.en_cache().await;
                self.state.cuentas.reemplazar(cuentas);
            }
            Err(err) => self.mostrar_error(err.to_string()),
        }
    }

    async fn enviar_movimiento(&mut self) {
        let formulario = &self.state.movimientos.formulario;
        let numero = formulario.valor("Número de cuenta").trim().to_string();
        let tipo = match forms::parsear_tipo_movimiento(formulario.valor("Tipo (DEBITO/CREDITO)")) {
            Ok(tipo) => tipo,
            Err(mensaje) => {
                self.mostrar_error(mensaje);
                return;
            }
        };
        let valor = match forms::parsear_valor(formulario.valor("Valor")) {
            Ok(valor) => valor,
            Err(mensaje) => {
                self.mostrar_error(mensaje);
                return;
            }
        };

        match self.servicios.movimientos.registrar(&numero, tipo, valor).await {
            Ok(resultado) => {
                self.mostrar_exito(resultado);
                self.state.movimientos.modo = Modo::Lista;
                // Recarga completa tras la mutación confirmada.
                self.cargar_movimientos().await;
            }
            Err(err) => self.mostrar_error(err.to_string()),
        }
    }

    async fn eliminar_movimiento(&mut self) {
        self.state.movimientos.modo = Modo::Lista;
        let Some(id) = self
            .state
            .movimientos
            .seleccionado_visible()
            .and_then(|movimiento| movimiento.id.clone())
        else {
            return;
        };
        match self.servicios.movimientos.eliminar(&id).await {
            Ok(resultado) => {
                self.mostrar_exito(resultado);
                self.cargar_movimientos().await;
            }
            Err(err) => self.mostrar_error(err.to_string()),
        }
    }

    async fn consultar_reporte(&mut self) {
        let formulario = &self.state.reportes.formulario;
        let identificacion = formulario.valor("Identificación cliente").trim().to_string();
        let desde = match forms::parsear_fecha(formulario.valor("Desde (AAAA-MM-DD)")) {
            Ok(fecha) => fecha,
            Err(mensaje) => {
                self.mostrar_error(mensaje);
                return;
            }
        };
        let hasta = match forms::parsear_fecha(formulario.valor("Hasta (AAAA-MM-DD)")) {
            Ok(fecha) => fecha,
            Err(mensaje) => {
                self.mostrar_error(mensaje);
                return;
            }
        };

        let cliente = match self
            .servicios
            .clientes
            .buscar_por_identificacion(&identificacion)
            .await
        {
            Ok(cliente) => cliente,
            Err(err) => {
                self.mostrar_error(err.to_string());
                return;
            }
        };
        let Some((cliente_id, cliente_nombre)) =
            cliente.and_then(|cliente| cliente.id.map(|id| (id, cliente.nombre)))
        else {
            self.mostrar_error("Cliente no encontrado por identificación");
            return;
        };

        match self
            .servicios
            .reportes
            .estado_cuenta(&cliente_id, desde, hasta)
            .await
        {
            Ok(filas) => {
                self.state.reportes.filas = filas;
                self.state.reportes.seleccionado = 0;
                self.state.reportes.consulta = Some(ConsultaReporte {
                    cliente_id,
                    cliente_nombre,
                    desde,
                    hasta,
                });
                self.state.reportes.modo = Modo::Lista;
            }
            Err(err) => self.mostrar_error(err.to_string()),
        }
    }

    async fn guardar_pdf(&mut self) {
        let Some(consulta) = self.state.reportes.consulta.clone() else {
            self.mostrar_error("Genere primero un reporte");
            return;
        };
        match self
            .servicios
            .reportes
            .pdf(&consulta.cliente_id, consulta.desde, consulta.hasta)
            .await
        {
            Ok(documento) => {
                let nombre = format!("reporte_{}.pdf", consulta.cliente_id);
                match std::fs::write(&nombre, &documento) {
                    Ok(()) => self.mostrar_exito(format!("Reporte guardado en {nombre}")),
                    Err(err) => self.mostrar_error(format!("No se pudo guardar el PDF: {err}")),
                }
            }
            Err(err) => self.mostrar_error(err.to_string()),
        }
    }

    fn exportar_csv(&mut self) {
        let Some(consulta) = self.state.reportes.consulta.clone() else {
            self.mostrar_error("Genere primero un reporte");
            return;
        };
        match services::reportes::a_csv(&self.state.reportes.filas) {
            Ok(texto) => {
                let nombre = format!("reporte_{}.csv", consulta.cliente_id);
                match std::fs::write(&nombre, texto) {
                    Ok(()) => self.mostrar_exito(format!("Reporte exportado a {nombre}")),
                    Err(err) => self.mostrar_error(format!("No se pudo exportar el CSV: {err}")),
                }
            }
            Err(err) => self.mostrar_error(err.to_string()),
        }
    }

    async fn cargar_clientes(&mut self) {
        self.state.cargando = true;
        match self.servicios.clientes.listar().await {
            Ok(clientes) => self.state.clientes.reemplazar(clientes),
            Err(err) => self.mostrar_error(err.to_string()),
        }
        self.state.cargando = false;
    }

    async fn cargar_cuentas(&mut self) {
        self.state.cargando = true;
        match self.servicios.cuentas.listar().await {
            Ok(cuentas) => self.state.cuentas.reemplazar(cuentas),
            Err(err) => self.mostrar_error(err.to_string()),
        }
        self.state.cargando = false;
    }

    async fn cargar_movimientos(&mut self) {
        self.state.cargando = true;
        match self.servicios.movimientos.listar_hidratado().await {
            Ok(movimientos) => self.state.movimientos.reemplazar(movimientos),
            Err(err) => self.mostrar_error(err.to_string()),
        }
        self.state.cargando = false;
    }

    fn mostrar_exito(&mut self, mensaje: impl Into<String>) {
        self.state.banner = Some(Banner {
            nivel: NivelBanner::Exito,
            mensaje: mensaje.into(),
        });
    }

    fn mostrar_error(&mut self, mensaje: impl Into<String>) {
        let mensaje = mensaje.into();
        tracing::warn!("{mensaje}");
        self.state.banner = Some(Banner {
            nivel: NivelBanner::Error,
            mensaje,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movimiento(numero: &str, identificacion: &str, valor: f64) -> Movimiento {
        Movimiento::desde_dto(&json!({
            "numeroCuenta": numero,
            "clienteIdentificacion": identificacion,
            "valor": valor,
        }))
    }

    #[test]
    fn la_busqueda_filtra_por_cuenta_identificacion_y_valor() {
        let mut lista = ListaState::default();
        lista.items = vec![
            movimiento("478758", "0102030405", -575.0),
            movimiento("225487", "0987654321", 600.0),
        ];

        lista.busqueda = "4787".to_string();
        assert_eq!(lista.visibles().len(), 1);

        lista.busqueda = "0987".to_string();
        assert_eq!(lista.visibles().len(), 1);
        assert_eq!(lista.visibles()[0].valor, 600.0);

        lista.busqueda = "-575".to_string();
        assert_eq!(lista.visibles().len(), 1);

        lista.busqueda = "nada".to_string();
        assert!(lista.visibles().is_empty());

        lista.busqueda.clear();
        assert_eq!(lista.visibles().len(), 2);
    }

    #[test]
    fn la_seleccion_se_limita_a_los_visibles() {
        let mut lista = ListaState::default();
        lista.items = vec![
            movimiento("478758", "0102030405", 1.0),
            movimiento("225487", "0987654321", 2.0),
        ];

        lista.select_next();
        assert_eq!(lista.seleccionado, 1);
        lista.select_next();
        assert_eq!(lista.seleccionado, 1);
        lista.select_prev();
        assert_eq!(lista.seleccionado, 0);
        lista.select_prev();
        assert_eq!(lista.seleccionado, 0);
    }

    #[test]
    fn reemplazar_resetea_la_seleccion() {
        let mut lista = ListaState::default();
        lista.items = vec![movimiento("478758", "0102030405", 1.0)];
        lista.seleccionado = 5;
        lista.reemplazar(Vec::new());
        assert_eq!(lista.seleccionado, 0);
        assert!(lista.items.is_empty());
    }
}
