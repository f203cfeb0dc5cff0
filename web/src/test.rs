use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::Value;

use store::{DataPaths, Store};

use crate::controllers::{api, routes};

/// Loads the store from the fixtures shared with the store crate.
pub fn fixture_store() -> Store {
    Store::open(&DataPaths::in_dir("../store/tests/fixtures")).expect("Could not load fixtures")
}

/// Calls the API at the given URI and returns the status and JSON body.
pub async fn json_response(uri: &str) -> (StatusCode, Value) {
    let srv = test::init_service(
        App::new()
            .app_data(web::Data::new(fixture_store()))
            .configure(routes::<Store>)
            .default_service(web::route().to(api::not_found)),
    )
    .await;

    let req = test::TestRequest::with_uri(uri).to_request();
    let resp = test::call_service(&srv, req).await;
    let status = resp.status();

    (status, test::read_body_json(resp).await)
}
