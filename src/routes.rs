use actix_web::{delete, get, http::StatusCode, post, web, HttpResponse};
use serde::Serialize;

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::schemas::{NewExpense, NewGroup};
use crate::store::MemoryStore;

pub type SharedLedger = web::Data<Ledger<MemoryStore>>;

#[derive(Serialize)]
struct ErrorJson {
    error: String,
}

fn status_for_ledger_error(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::GroupNotFound(_) => StatusCode::NOT_FOUND,
        LedgerError::UnknownPayer { .. } | LedgerError::InvalidAmount(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        LedgerError::MissingField(_) => StatusCode::BAD_REQUEST,
    }
}

fn error_response(err: LedgerError) -> HttpResponse {
    tracing::debug!("request rejected: {err}");
    HttpResponse::build(status_for_ledger_error(&err)).json(ErrorJson {
        error: err.to_string(),
    })
}

#[get("/groups")]
async fn list_groups(ledger: SharedLedger) -> HttpResponse {
    HttpResponse::Ok().json(ledger.groups().await)
}

#[post("/groups")]
async fn add_group(ledger: SharedLedger, json: web::Json<NewGroup>) -> HttpResponse {
    match ledger.add_group(json.into_inner()).await {
        Ok(group) => HttpResponse::Created().json(group),
        Err(err) => error_response(err),
    }
}

#[get("/groups/{id}")]
async fn get_group(ledger: SharedLedger, id: web::Path<String>) -> HttpResponse {
    let id = id.into_inner();
    match ledger.group(&id).await {
        Some(group) => HttpResponse::Ok().json(group),
        None => error_response(LedgerError::GroupNotFound(id)),
    }
}

#[delete("/groups/{id}")]
async fn remove_group(ledger: SharedLedger, id: web::Path<String>) -> HttpResponse {
    match ledger.remove_group(&id.into_inner()).await {
        Ok(group) => HttpResponse::Ok().json(group),
        Err(err) => error_response(err),
    }
}

#[get("/groups/{id}/expenses")]
async fn list_expenses(ledger: SharedLedger, id: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(ledger.expenses(&id.into_inner()).await)
}

#[post("/groups/{id}/expenses")]
async fn add_expense(
    ledger: SharedLedger,
    id: web::Path<String>,
    json: web::Json<NewExpense>,
) -> HttpResponse {
    let mut new_expense = json.into_inner();
    new_expense.group_id = id.into_inner();
    match ledger.add_expense(new_expense).await {
        Ok(expense) => HttpResponse::Created().json(expense),
        Err(err) => error_response(err),
    }
}

#[get("/groups/{id}/balance")]
async fn get_balance(ledger: SharedLedger, id: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(ledger.balances(&id.into_inner()).await)
}

#[get("/groups/{id}/settlements")]
async fn get_settlements(ledger: SharedLedger, id: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(ledger.settlements(&id.into_inner()).await)
}

#[get("/groups/{id}/summary")]
async fn get_summary(ledger: SharedLedger, id: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(ledger.summary(&id.into_inner()).await)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_groups)
        .service(add_group)
        .service(get_group)
        .service(remove_group)
        .service(list_expenses)
        .service(add_expense)
        .service(get_balance)
        .service(get_settlements)
        .service(get_summary);
}
