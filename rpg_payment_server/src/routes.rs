//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Anything that waits on I/O (the database, the payment gateway, the
//! report file) must be awaited, never blocked on.
use actix_web::{
    get,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web,
    Either,
    HttpResponse,
    Responder,
};
use log::*;
use rpg_payment_engine::{
    order_objects::{CreateOrderRequest, VerificationResult, VerifyPaymentRequest},
    traits::{PaymentGateway, PaymentRecordStore},
    DebugStore,
    ReconciliationApi,
};

use crate::{
    data_objects::{
        CreateOrderResponse,
        DebugNotFound,
        HealthResponse,
        JsonResponse,
        LastOrderResponse,
        LastPaymentResponse,
        PaymentDetailsResponse,
        PaymentRecordResponse,
        RecordsResponse,
        VerifyPaymentResponse,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().json(HealthResponse {
        message: "Razorpay Payment Gateway API".to_string(),
        status: "Running".to_string(),
    })
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/payments/create-order" impl PaymentRecordStore, PaymentGateway);
/// Route handler for creating a new order
///
/// The amount is given in major units (e.g. rupees), as a number or a numeric string. Currency and receipt are
/// optional. Both JSON and url-encoded form bodies are accepted. The response carries the order as the gateway
/// created it, along with the public key id the browser needs to open the checkout.
pub async fn create_order<B: PaymentRecordStore, G: PaymentGateway>(
    body: Either<web::Json<CreateOrderRequest>, web::Form<CreateOrderRequest>>,
    api: web::Data<ReconciliationApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let request = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    debug!("💻️ POST create-order for {:?} {:?}", request.amount, request.currency);
    let summary = api.create_order(request).await?;
    Ok(HttpResponse::Ok().json(CreateOrderResponse::from(summary)))
}

route!(verify_payment => Post "/payments/verify-payment" impl PaymentRecordStore, PaymentGateway);
/// Route handler for checkout callbacks
///
/// The client forwards the order id, payment id and signature it received from the gateway's checkout. The
/// gateway's own field names (`razorpay_order_id` etc.) are accepted too. A signature that does not match is a 400.
///
/// The body may be JSON, or a url-encoded form as posted by the gateway's redirect checkout.
pub async fn verify_payment<B: PaymentRecordStore, G: PaymentGateway>(
    body: Either<web::Json<VerifyPaymentRequest>, web::Form<VerifyPaymentRequest>>,
    api: web::Data<ReconciliationApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let request = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    debug!("💻️ POST verify-payment for order {:?}", request.order_id);
    let response = match api.verify_payment(request).await? {
        VerificationResult::Verified(payment) => {
            HttpResponse::Ok().json(VerifyPaymentResponse::new("Payment verified successfully", payment))
        },
        VerificationResult::AlreadyPaid(payment) => {
            HttpResponse::Ok().json(VerifyPaymentResponse::new("Payment was already verified", payment))
        },
        VerificationResult::Rejected => {
            HttpResponse::BadRequest().json(JsonResponse::failure("Invalid signature - Payment verification failed"))
        },
    };
    Ok(response)
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(payment_details => Get "/payments/payment/{payment_id}" impl PaymentRecordStore, PaymentGateway);
pub async fn payment_details<B: PaymentRecordStore, G: PaymentGateway>(
    path: web::Path<String>,
    api: web::Data<ReconciliationApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let payment_id = path.into_inner();
    debug!("💻️ GET payment details for {payment_id}");
    let payment = api.get_payment_details(&payment_id).await?;
    Ok(HttpResponse::Ok().json(PaymentDetailsResponse {
        success: true,
        message: "Payment details retrieved".to_string(),
        payment,
    }))
}

route!(payment_records => Get "/payments/records" impl PaymentRecordStore, PaymentGateway);
pub async fn payment_records<B: PaymentRecordStore, G: PaymentGateway>(
    api: web::Data<ReconciliationApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET payment records");
    let records = api.list_payments().await?;
    let payments = records.into_iter().map(PaymentRecordResponse::from).collect();
    Ok(HttpResponse::Ok().json(RecordsResponse { success: true, payments }))
}

//----------------------------------------------   Export  ----------------------------------------------------
route!(export_report => Get "/payments/export" impl PaymentRecordStore, PaymentGateway);
/// Route handler for downloading the payments report
///
/// The report is rebuilt in the background whenever a record changes; this route only serves the latest copy.
pub async fn export_report<B: PaymentRecordStore, G: PaymentGateway>(
    api: web::Data<ReconciliationApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET payments report");
    let report = api.export_report().await?;
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(report.file_name.to_string())],
    };
    Ok(HttpResponse::Ok().content_type(report.content_type).insert_header(disposition).body(report.contents))
}

//----------------------------------------------   Debug  ----------------------------------------------------
#[get("/last-order")]
pub async fn last_order(store: web::Data<DebugStore>) -> impl Responder {
    trace!("💻️ GET last order");
    match store.last_order() {
        Some(last_order) => HttpResponse::Ok().json(LastOrderResponse { ok: true, last_order }),
        None => HttpResponse::NotFound().json(DebugNotFound::new("No order has been created yet")),
    }
}

#[get("/last-payment")]
pub async fn last_payment(store: web::Data<DebugStore>) -> impl Responder {
    trace!("💻️ GET last payment");
    match store.last_payment() {
        Some(last_payment) => HttpResponse::Ok().json(LastPaymentResponse { ok: true, last_payment }),
        None => HttpResponse::NotFound().json(DebugNotFound::new("No payment has been verified yet")),
    }
}
