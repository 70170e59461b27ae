use std::time::Duration;

use actix_cors::Cors;
use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use razorpay_tools::RazorpayApi;
use rpg_payment_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    helpers::PaymentSignatureVerifier,
    report::{export_hook, ReportGenerator},
    DebugStore,
    ReconciliationApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::razorpay::RazorpayGateway,
    routes::{
        health,
        last_order,
        last_payment,
        CreateOrderRoute,
        ExportReportRoute,
        PaymentDetailsRoute,
        PaymentRecordsRoute,
        VerifyPaymentRoute,
    },
};

/// A burst of record changes only ever needs one pending report rebuild, so the queue can be tiny.
const EVENT_BUFFER_SIZE: usize = 1;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let api = RazorpayApi::new(config.razorpay.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let gateway = RazorpayGateway::new(api);
    let handlers = create_event_handlers(&config, db.clone());
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, gateway, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// The report export is the only subscriber to record changes.
pub fn create_event_handlers(config: &ServerConfig, db: SqliteDatabase) -> EventHandlers {
    let mut hooks = EventHooks::default();
    info!("📊️ Payment reports will be written to {}", config.report_path.display());
    hooks.on_record_changed(export_hook(ReportGenerator::new(db, config.report_path.clone())));
    EventHandlers::new(EVENT_BUFFER_SIZE, hooks)
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    gateway: RazorpayGateway,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let debug_store = DebugStore::new();
    let verifier = PaymentSignatureVerifier::new(config.razorpay.key_secret.clone());
    let bind_addr = (config.host.clone(), config.port);
    let srv = HttpServer::new(move || {
        let api = ReconciliationApi::new(db.clone(), gateway.clone(), verifier.clone(), producers.clone())
            .with_debug_store(debug_store.clone())
            .with_default_currency(config.default_currency.as_str())
            .with_report_path(config.report_path.clone());
        let api_scope = web::scope("/api")
            .service(health)
            .service(CreateOrderRoute::<SqliteDatabase, RazorpayGateway>::new())
            .service(VerifyPaymentRoute::<SqliteDatabase, RazorpayGateway>::new())
            .service(PaymentDetailsRoute::<SqliteDatabase, RazorpayGateway>::new())
            .service(PaymentRecordsRoute::<SqliteDatabase, RazorpayGateway>::new())
            .service(ExportReportRoute::<SqliteDatabase, RazorpayGateway>::new());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("rpg::access_log"))
            .wrap(cors())
            .app_data(json_config())
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(debug_store.clone()))
            .service(api_scope);
        if config.enable_debug_routes {
            app.service(last_order).service(last_payment)
        } else {
            app
        }
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind(bind_addr)?
    .run();
    Ok(srv)
}

/// Browsers may call the API from any origin, with any method and headers.
pub fn cors() -> Cors {
    Cors::default().allow_any_origin().allow_any_method().allow_any_header().max_age(3600)
}

/// Malformed JSON bodies are reported with the same error shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Could not deserialize request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}
