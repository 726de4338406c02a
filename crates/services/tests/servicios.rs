//! Service tests against an in-process stub backend.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use api_types::movimiento::TipoMovimiento;
use services::{ServiceError, Servicios};

async fn servir(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let direccion = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{direccion}/api")
}

fn router_con_clientes(cuerpo: Value) -> Router {
    Router::new().route(
        "/api/clientes",
        get(move || {
            let cuerpo = cuerpo.clone();
            async move { Json(cuerpo) }
        }),
    )
}

#[tokio::test]
async fn todas_las_envolturas_devuelven_los_mismos_clientes() {
    let registros = json!([
        {"id": "c1", "nombre": "Jose Lema", "identificacion": "0102030405"},
        {"id": "c2", "nombre": "Marianela Montalvo", "identificacion": "0987654321"},
    ]);
    let formas = [
        registros.clone(),
        json!({"data": registros.clone()}),
        json!({"items": registros.clone()}),
        json!({"content": registros.clone()}),
    ];

    let mut listas = Vec::new();
    for forma in formas {
        let base = servir(router_con_clientes(forma)).await;
        let servicios = Servicios::nuevo(&base);
        listas.push(servicios.clientes.listar().await.unwrap());
    }

    for lista in &listas[1..] {
        assert_eq!(lista, &listas[0]);
    }
    assert_eq!(listas[0].len(), 2);
    assert_eq!(listas[0][0].nombre, "Jose Lema");
}

#[tokio::test]
async fn busqueda_vacia_se_rechaza_antes_de_la_red() {
    // Dirección inalcanzable: si la validación no corta antes, el error
    // sería de conexión y no de validación.
    let servicios = Servicios::nuevo("http://127.0.0.1:1/api");
    let err = servicios
        .clientes
        .buscar_por_identificacion("   ")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validacion(_)));
    assert_eq!(err.to_string(), "La identificación es requerida");
}

#[tokio::test]
async fn crear_cuenta_sin_cliente_no_contacta_el_endpoint() {
    let escrituras = Arc::new(AtomicUsize::new(0));
    let contador = escrituras.clone();
    let router = router_con_clientes(json!([
        {"id": "c1", "nombre": "Otro", "identificacion": "1111111111"},
    ]))
    .route(
        "/api/cuentas",
        post(move || {
            contador.fetch_add(1, Ordering::SeqCst);
            async { Json(json!({"id": "a9"})) }
        }),
    );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let solicitud = services::CuentaSolicitud {
        cliente_identificacion: "0102030405".to_string(),
        tipo_cuenta: "AHORRO".to_string(),
        saldo_inicial: 100.0,
        estado: true,
    };
    let err = servicios.cuentas.crear(&solicitud).await.unwrap_err();

    assert!(matches!(err, ServiceError::NoEncontrado(_)));
    assert_eq!(err.to_string(), "Cliente no encontrado por identificación");
    assert_eq!(escrituras.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn registrar_movimiento_resuelve_la_cuenta_y_recarga() {
    let capturado: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let lecturas = Arc::new(AtomicUsize::new(0));

    let cuerpo_capturado = capturado.clone();
    let contador_lecturas = lecturas.clone();
    let router = Router::new()
        .route(
            "/api/cuentas",
            get(|| async {
                Json(json!([
                    {"id": "a1", "numeroCuenta": "478758", "clienteId": "c1"},
                ]))
            }),
        )
        .route(
            "/api/movimientos",
            get(move || {
                contador_lecturas.fetch_add(1, Ordering::SeqCst);
                async { Json(json!([])) }
            })
            .post(move |Json(cuerpo): Json<Value>| {
                let cuerpo_capturado = cuerpo_capturado.clone();
                async move {
                    *cuerpo_capturado.lock().unwrap() = Some(cuerpo);
                    Json(json!({"resultado": "Movimiento realizado con éxito"}))
                }
            }),
        );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let resultado = servicios
        .movimientos
        .registrar("478758", TipoMovimiento::Debito, -50.0)
        .await
        .unwrap();

    assert_eq!(resultado, "Movimiento realizado con éxito");
    let enviado = capturado.lock().unwrap().clone().unwrap();
    assert_eq!(enviado["cuentaId"], "a1");
    assert_eq!(enviado["tipo"], "DEBITO");
    assert_eq!(enviado["valor"], -50.0);
    // La mutación confirmada dispara la recarga completa de la lista.
    assert_eq!(lecturas.load(Ordering::SeqCst), 1);
    assert!(servicios.movimientos.en_cache().await.is_empty());
}

#[tokio::test]
async fn movimiento_contra_cuenta_desconocida_no_se_envia() {
    let escrituras = Arc::new(AtomicUsize::new(0));
    let contador = escrituras.clone();
    let router = Router::new()
        .route("/api/cuentas", get(|| async { Json(json!([])) }))
        .route(
            "/api/movimientos",
            post(move || {
                contador.fetch_add(1, Ordering::SeqCst);
                async { Json(json!({"resultado": "no debería llegar"})) }
            }),
        );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let err = servicios
        .movimientos
        .registrar("478758", TipoMovimiento::Credito, 600.0)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Cuenta no encontrada");
    assert_eq!(escrituras.load(Ordering::SeqCst), 0);
}

fn movimientos_sin_denormalizar() -> Value {
    json!({"data": [
        {"id": "m1", "cuentaId": "a1", "valor": 10, "fecha": 1_700_000_000},
        {"id": "m2", "cuentaId": "a2", "valor": -5, "fecha": 1_700_000_000},
    ]})
}

#[tokio::test]
async fn hidratacion_es_todo_o_nada() {
    let router = Router::new()
        .route(
            "/api/movimientos",
            get(|| async { Json(movimientos_sin_denormalizar()) }),
        )
        .route(
            "/api/cuentas/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "a1" {
                    Ok(Json(json!({
                        "id": "a1",
                        "numeroCuenta": "478758",
                        "clienteNombre": "Jose Lema",
                        "clienteIdentificacion": "0102030405",
                    })))
                } else {
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }),
        );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let movimientos = servicios.movimientos.listar_hidratado().await.unwrap();

    // Una sola cuenta falló: ningún movimiento queda hidratado.
    assert_eq!(movimientos.len(), 2);
    for movimiento in &movimientos {
        assert_eq!(movimiento.cuenta.numero_cuenta, "");
        assert!(movimiento.necesita_hidratacion());
    }
}

#[tokio::test]
async fn hidratacion_completa_cuando_todas_las_cuentas_responden() {
    let router = Router::new()
        .route(
            "/api/movimientos",
            get(|| async { Json(movimientos_sin_denormalizar()) }),
        )
        .route(
            "/api/cuentas/{id}",
            get(|Path(id): Path<String>| async move {
                let numero = if id == "a1" { "478758" } else { "225487" };
                Json(json!({
                    "id": id,
                    "numeroCuenta": numero,
                    "clienteNombre": "Jose Lema",
                    "clienteIdentificacion": "0102030405",
                }))
            }),
        );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let movimientos = servicios.movimientos.listar_hidratado().await.unwrap();

    let numeros: Vec<&str> = movimientos
        .iter()
        .map(|movimiento| movimiento.cuenta.numero_cuenta.as_str())
        .collect();
    assert_eq!(numeros, vec!["478758", "225487"]);
    assert!(movimientos.iter().all(|m| !m.necesita_hidratacion()));
}

#[tokio::test]
async fn conflicto_se_traduce_al_mensaje_de_duplicado() {
    let router = Router::new().route(
        "/api/clientes",
        post(|| async {
            (
                StatusCode::CONFLICT,
                Json(json!({"message": "duplicate key"})),
            )
        })
        .get(|| async { Json(json!([])) }),
    );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let solicitud = services::ClienteSolicitud {
        nombre: "Jose Lema".to_string(),
        identificacion: "0102030405".to_string(),
        contrasena: "1234".to_string(),
        estado: true,
        ..Default::default()
    };
    let err = servicios.clientes.crear(&solicitud).await.unwrap_err();

    assert_eq!(err.to_string(), "Ya existe un cliente con esa cédula");
}

#[tokio::test]
async fn error_400_prefiere_el_detalle_del_servidor() {
    let router = Router::new().route(
        "/api/clientes",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "La edad debe ser positiva"})),
            )
        }),
    );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let err = servicios
        .clientes
        .crear(&services::ClienteSolicitud::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "La edad debe ser positiva");
}

#[tokio::test]
async fn servidor_caido_se_reporta_como_sin_conexion() {
    // Reservamos un puerto libre y lo soltamos antes de usarlo.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let direccion = listener.local_addr().unwrap();
    drop(listener);

    let servicios = Servicios::nuevo(&format!("http://{direccion}/api"));
    let err = servicios.clientes.listar().await.unwrap_err();

    assert!(matches!(err, ServiceError::SinConexion(_)));
    assert_eq!(
        err.to_string(),
        "No se puede conectar con el servidor. Verifique su conexión."
    );
}

#[tokio::test]
async fn reporte_envia_los_parametros_de_consulta() {
    let router = Router::new().route(
        "/api/reportes",
        get(
            |Query(parametros): Query<std::collections::HashMap<String, String>>| async move {
                if parametros.get("clienteId").map(String::as_str) == Some("c1")
                    && parametros.get("fechaInicio").map(String::as_str) == Some("2024-01-01")
                    && parametros.get("fechaFin").map(String::as_str) == Some("2024-02-01")
                {
                    Ok(Json(json!({"items": [
                        {"id": "m1", "valor": 75, "numeroCuenta": "478758"},
                    ]})))
                } else {
                    Err(StatusCode::BAD_REQUEST)
                }
            },
        ),
    );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let desde = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let hasta = chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let filas = servicios
        .reportes
        .estado_cuenta("c1", desde, hasta)
        .await
        .unwrap();

    assert_eq!(filas.len(), 1);
    assert_eq!(filas[0].valor, 75.0);
    assert_eq!(filas[0].cuenta.numero_cuenta, "478758");
}

#[tokio::test]
async fn el_pdf_en_base64_se_decodifica() {
    use base64::Engine;

    let documento = b"%PDF-1.4 contenido".to_vec();
    let codificado = base64::prelude::BASE64_STANDARD.encode(&documento);
    let router = Router::new().route(
        "/api/reportes/pdf/base64",
        get(move || {
            let codificado = codificado.clone();
            async move {
                Json(json!({
                    "pdfBase64": codificado,
                    "filename": "reporte_c1.pdf",
                }))
            }
        }),
    );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let desde = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let hasta = chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let (nombre, bytes) = servicios
        .reportes
        .pdf_base64("c1", desde, hasta)
        .await
        .unwrap();

    assert_eq!(nombre, "reporte_c1.pdf");
    assert_eq!(bytes, documento);
}

#[tokio::test]
async fn el_cliente_individual_puede_venir_envuelto_en_data() {
    let router = Router::new().route(
        "/api/clientes/{id}",
        get(|Path(id): Path<String>| async move {
            Json(json!({"data": {
                "id": id,
                "persona": {"nombre": "Marianela", "apellido": "Montalvo"},
                "identificacion": "0987654321",
            }}))
        }),
    );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let cliente = servicios.clientes.obtener("c2").await.unwrap();
    assert_eq!(cliente.id.as_deref(), Some("c2"));
    assert_eq!(cliente.nombre, "Marianela Montalvo");
}

#[tokio::test]
async fn las_cuentas_de_un_cliente_se_listan_por_identificacion() {
    let router = Router::new().route(
        "/api/cuentas/cliente/{identificacion}",
        get(|Path(identificacion): Path<String>| async move {
            Json(json!([
                {"id": "a1", "numeroCuenta": "478758", "clienteIdentificacion": identificacion},
            ]))
        }),
    );
    let base = servir(router).await;
    let servicios = Servicios::nuevo(&base);

    let cuentas = servicios
        .cuentas
        .listar_por_cliente("0102030405")
        .await
        .unwrap();
    assert_eq!(cuentas.len(), 1);
    assert_eq!(cuentas[0].cliente_identificacion, "0102030405");

    let err = servicios.cuentas.listar_por_cliente(" ").await.unwrap_err();
    assert!(matches!(err, ServiceError::Validacion(_)));
}
