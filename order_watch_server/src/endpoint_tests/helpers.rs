use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, App};
use log::debug;
use order_watch_engine::{OrderWatchApi, WatchOptions};

use super::mocks::{MockMessenger, MockSource, MockStore};
use crate::routes::{health, CheckForOrdersRoute, TriggerCheckRoute};

pub type MockApi = OrderWatchApi<MockStore, MockSource, MockMessenger>;

pub fn mock_api(store: MockStore, source: MockSource, notifier: MockMessenger) -> MockApi {
    OrderWatchApi::new(store, source, notifier, WatchOptions::default())
}

pub async fn send_request(req: TestRequest, api: MockApi) -> Result<(StatusCode, String), String> {
    let app = App::new()
        .app_data(web::Data::new(api))
        .service(health)
        .service(CheckForOrdersRoute::<MockStore, MockSource, MockMessenger>::new())
        .service(TriggerCheckRoute::<MockStore, MockSource, MockMessenger>::new());
    let service = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::try_call_service(&service, req.to_request()).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}

pub async fn get_request(path: &str, api: MockApi) -> Result<(StatusCode, String), String> {
    send_request(TestRequest::get().uri(path), api).await
}

pub async fn post_request(path: &str, api: MockApi) -> Result<(StatusCode, String), String> {
    send_request(TestRequest::post().uri(path), api).await
}
