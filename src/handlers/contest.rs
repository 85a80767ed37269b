use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::ContestService;

use super::{auth_user, require_user};

#[utoipa::path(
    post,
    path = "/contests",
    tag = "contest",
    request_body = CreateContestRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Contest created", body = ContestResponse),
        (status = 400, description = "Invalid contest data")
    )
)]
pub async fn create_contest(
    contest_service: web::Data<ContestService>,
    req: HttpRequest,
    request: web::Json<CreateContestRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match contest_service
        .create_contest(&user.id, request.into_inner())
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
    path = "/contests",
    tag = "contest",
    params(
        ("status" = Option<String>, Query, description = "upcoming | active | ended"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Contest listing")
    )
)]
pub async fn list_contests(
    contest_service: web::Data<ContestService>,
    query: web::Query<ContestQuery>,
) -> Result<HttpResponse> {
    match contest_service.list_contests(query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{id}",
    tag = "contest",
    params(("id" = String, Path, description = "Contest id")),
    responses(
        (status = 200, description = "Contest detail", body = ContestResponse),
        (status = 404, description = "Contest not found")
    )
)]
pub async fn get_contest(
    contest_service: web::Data<ContestService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match contest_service.get_contest(&path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/contests/{id}/entries",
    tag = "contest",
    request_body = SubmitContestEntryRequest,
    params(("id" = String, Path, description = "Contest id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Artwork entered"),
        (status = 400, description = "Contest has ended"),
        (status = 403, description = "Not the artwork owner")
    )
)]
pub async fn submit_entry(
    contest_service: web::Data<ContestService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<SubmitContestEntryRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match contest_service
        .submit_entry(&path.into_inner(), &user.id, request.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/contests/{id}/entries",
    tag = "contest",
    params(("id" = String, Path, description = "Contest id")),
    responses(
        (status = 200, description = "Leaderboard, best average first"),
        (status = 404, description = "Contest not found")
    )
)]
pub async fn leaderboard(
    contest_service: web::Data<ContestService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let viewer = auth_user(&req);
    match contest_service
        .leaderboard(&path.into_inner(), viewer.as_ref().map(|u| u.id.as_str()))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn contest_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contests")
            .route("", web::post().to(create_contest))
            .route("", web::get().to(list_contests))
            .route("/{id}/entries", web::post().to(submit_entry))
            .route("/{id}/entries", web::get().to(leaderboard))
            .route("/{id}", web::get().to(get_contest)),
    );
}
