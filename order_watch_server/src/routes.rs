//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. An order check makes several round trips to the marketplace and to
//! Discord, so it is always expressed as a future, and never blocks the worker:
//!
//! ```nocompile
//!     async fn my_handler() -> impl Responder {
//!         tokio::time::sleep(Duration::from_secs(5)).await; // <-- Ok. Worker thread will handle other requests here
//!     }
//! ```
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use order_watch_engine::{
    traits::{Notifier, OrderSource, SnapshotStore},
    OrderWatchApi,
};

use crate::errors::ServerError;

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
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Check  ----------------------------------------------------
route!(check_for_orders => Get "/check" impl SnapshotStore, OrderSource, Notifier);
/// Route handler for the order check endpoint
///
/// Runs one complete order watch cycle: the current orders are fetched and compared against the stored snapshot, any
/// new or shipped orders are sent to the account owner, and the snapshot is updated.
///
/// The response body is the notification text that was delivered. It is empty when nothing changed.
pub async fn check_for_orders<S, O, N>(api: web::Data<OrderWatchApi<S, O, N>>) -> Result<HttpResponse, ServerError>
where
    S: SnapshotStore,
    O: OrderSource,
    N: Notifier,
{
    trace!("💻️ Received order check request");
    let report = api.run_cycle().await.map_err(|e| {
        warn!("💻️ Order check failed. {e}");
        ServerError::from(e)
    })?;
    debug!("💻️ Order check complete. {} orders seen, news: {}", report.orders_seen, report.has_news());
    Ok(HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(report.message))
}

route!(trigger_check => Post "/check" impl SnapshotStore, OrderSource, Notifier);
/// The same as [`check_for_orders`], for schedulers that can only issue POST requests.
pub async fn trigger_check<S, O, N>(api: web::Data<OrderWatchApi<S, O, N>>) -> Result<HttpResponse, ServerError>
where
    S: SnapshotStore,
    O: OrderSource,
    N: Notifier,
{
    check_for_orders(api).await
}
