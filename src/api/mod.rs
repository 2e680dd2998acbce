mod balance;
mod chain;
mod health;
pub mod models;
mod tx;

use actix_web::HttpResponse;
use actix_web::web::{self, ServiceConfig};
use log::warn;

use crate::error::LedgerError;
use models::ErrorResponse;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(chain::mine_block)
            .service(tx::post_transaction)
            .service(tx::post_credit)
            .service(tx::get_pending)
            .service(balance::get_balance),
    );
}

/// Rejections are the caller's to fix; encoding failures are ours.
fn error_response(err: &LedgerError) -> HttpResponse {
    warn!("request rejected: {err}");
    let body = ErrorResponse {
        error: err.to_string(),
    };
    match err {
        LedgerError::Encoding(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Blockchain;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Blockchain::with_difficulty(1).unwrap()))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(init_routes)).await
        };
    }

    #[actix_web::test]
    async fn fresh_chain_has_valid_genesis() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 1);
        assert_eq!(body["chain"][0]["index"], 1);
        assert_eq!(body["chain"][0]["previous_hash"], "0".repeat(64));

        let req = test::TestRequest::get().uri("/api/v1/validate/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], true);
    }

    #[actix_web::test]
    async fn credit_transfer_and_mine() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/balance/")
            .set_json(json!({ "receiver": "camp-lake", "amount": 20 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["index"], 2);

        let req = test::TestRequest::post()
            .uri("/api/v1/tx/")
            .set_json(json!({ "sender": "camp-lake", "receiver": "ana@mail.com", "amount": 10 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Transaction added to block 2");

        let req = test::TestRequest::get().uri("/api/v1/pending/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["pending_transactions"].as_array().unwrap().len(), 1);
        assert_eq!(body["pending_credits"]["camp-lake"].as_f64(), Some(20.0));

        let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let block: Value = test::read_body_json(resp).await;
        assert_eq!(block["index"], 2);
        assert_eq!(block["balances"]["camp-lake"].as_f64(), Some(10.0));
        assert_eq!(block["balances"]["ana@mail.com"].as_f64(), Some(10.0));
        assert!(block["hash"].as_str().unwrap().starts_with('0'));

        let req = test::TestRequest::get()
            .uri("/api/v1/balance/ana@mail.com/")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["balance"].as_f64(), Some(10.0));
    }

    #[actix_web::test]
    async fn rejects_invalid_transaction() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/tx/")
            .set_json(json!({ "sender": "a", "receiver": "a", "amount": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/balance/")
            .set_json(json!({ "receiver": "a", "amount": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert!(state.ledger.read().unwrap().pending_transactions().is_empty());
    }

    #[actix_web::test]
    async fn overflowing_credit_is_rejected_without_breaking_the_ledger() {
        let state = state();
        let app = app!(state);

        for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
            let req = test::TestRequest::post()
                .uri("/api/v1/balance/")
                .set_json(json!({ "receiver": "c", "amount": 5.0e28 }))
                .to_request();
            test::call_service(&app, req).await;

            let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }

        let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 2);

        let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn overdraft_mine_is_rejected() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/tx/")
            .set_json(json!({ "sender": "a", "receiver": "b", "amount": 3 }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("insufficient funds for a"));

        assert_eq!(state.ledger.read().unwrap().len(), 1);
    }
}
