use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::error_response;
use super::models::{AppState, CreditRequest, EnqueueResponse, PendingResponse, TransactionRequest};

/// Queue a transfer for the next mined block.
#[post("/tx/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<TransactionRequest>,
) -> impl Responder {
    let TransactionRequest {
        sender,
        receiver,
        amount,
    } = body.into_inner();

    let result = {
        let mut bc = state.ledger.write().expect("lock poisoned");
        bc.enqueue_transaction(sender.as_str(), receiver.as_str(), amount)
    };

    match result {
        Ok(index) => {
            info!("POST /tx/ - {sender} -> {receiver} ({amount}) queued for block {index}");
            HttpResponse::Ok().json(EnqueueResponse {
                message: format!("Transaction added to block {index}"),
                index,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// Queue a direct credit for the next mined block.
#[post("/balance/")]
pub async fn post_credit(
    state: web::Data<AppState>,
    body: web::Json<CreditRequest>,
) -> impl Responder {
    let CreditRequest { receiver, amount } = body.into_inner();

    let result = {
        let mut bc = state.ledger.write().expect("lock poisoned");
        bc.enqueue_credit(receiver.as_str(), amount)
    };

    match result {
        Ok(index) => {
            info!("POST /balance/ - {receiver} credited {amount} for block {index}");
            HttpResponse::Ok().json(EnqueueResponse {
                message: format!("Balance added to block {index}"),
                index,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// List the transactions and credits waiting for the next block.
#[get("/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let bc = state.ledger.read().expect("lock poisoned");
    HttpResponse::Ok().json(PendingResponse {
        pending_transactions: bc.pending_transactions(),
        pending_credits: bc.pending_credits(),
    })
}
