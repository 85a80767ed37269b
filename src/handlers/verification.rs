use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::VerificationService;

use super::require_user;

#[utoipa::path(
    post,
    path = "/verification",
    tag = "verification",
    request_body = SubmitVerificationRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Request filed", body = VerificationResponse),
        (status = 400, description = "Already verified or already pending")
    )
)]
pub async fn submit_request(
    verification_service: web::Data<VerificationService>,
    req: HttpRequest,
    request: web::Json<SubmitVerificationRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match verification_service
        .submit_request(&user.id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/verification/me",
    tag = "verification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's latest request, null when none filed")
    )
)]
pub async fn my_request(
    verification_service: web::Data<VerificationService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match verification_service.my_request(&user.id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/verification/pending",
    tag = "verification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending requests, oldest first")
    )
)]
pub async fn list_pending(
    verification_service: web::Data<VerificationService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_user(&req) {
        return Ok(e.error_response());
    }

    match verification_service.list_pending().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/verification/{id}/review",
    tag = "verification",
    request_body = ReviewVerificationRequest,
    params(("id" = String, Path, description = "Verification request id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Request settled", body = VerificationResponse),
        (status = 403, description = "Reviewer not allowed"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn review_request(
    verification_service: web::Data<VerificationService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<ReviewVerificationRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match verification_service
        .review_request(&path.into_inner(), &user.id, request.approve)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn verification_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/verification")
            .route("", web::post().to(submit_request))
            .route("/me", web::get().to(my_request))
            .route("/pending", web::get().to(list_pending))
            .route("/{id}/review", web::put().to(review_request)),
    );
}
