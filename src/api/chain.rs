use actix_web::{HttpResponse, Responder, get, post, web};
use log::{error, info};

use super::error_response;
use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.ledger.read().expect("lock poisoned");
    HttpResponse::Ok().json(ChainResponse {
        chain: bc.chain(),
        length: bc.len(),
    })
}

/// Validate the whole chain against its snapshot copy.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.ledger.read().expect("lock poisoned");
    let valid = bc.validate_chain();
    HttpResponse::Ok().json(ValidateResponse {
        valid,
        message: if valid {
            "The Blockchain is valid."
        } else {
            "The Blockchain is not valid."
        },
        length: bc.len(),
    })
}

/// Mine the pending pool into a new block.
///
/// The nonce search runs on the blocking thread pool while holding the write
/// guard, so readers wait for the append instead of seeing half of it.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let worker_state = state.clone();
    let outcome = web::block(move || {
        let mut bc = worker_state.ledger.write().expect("lock poisoned");
        bc.mine()
    })
    .await;

    match outcome {
        Ok(Ok(block)) => {
            info!("POST /mine/ - block #{} appended", block.index);
            HttpResponse::Ok().json(MineResponse {
                message: "A block is MINED",
                block,
            })
        }
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            error!("POST /mine/ - mining worker failed: {e}");
            HttpResponse::InternalServerError().body("mining worker failed")
        }
    }
}
