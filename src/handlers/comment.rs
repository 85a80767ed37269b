use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::CommentService;

use super::require_user;

#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "social",
    request_body = UpdateCommentRequest,
    params(("id" = String, Path, description = "Comment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn update_comment(
    comment_service: web::Data<CommentService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match comment_service
        .update_comment(&path.into_inner(), &user.id, request.into_inner())
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
    delete,
    path = "/comments/{id}",
    tag = "social",
    params(("id" = String, Path, description = "Comment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 403, description = "Not allowed"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(
    comment_service: web::Data<CommentService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match comment_service
        .delete_comment(&path.into_inner(), &user.id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn comment_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .route("/{id}", web::put().to(update_comment))
            .route("/{id}", web::delete().to(delete_comment)),
    );
}
