use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::{ArtworkService, CommentService, RatingService};

use super::{auth_user, require_user};

#[utoipa::path(
    post,
    path = "/artworks",
    tag = "artwork",
    request_body = CreateArtworkRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Artwork created", body = ArtworkResponse),
        (status = 400, description = "Invalid artwork data"),
        (status = 403, description = "Account type cannot upload")
    )
)]
pub async fn create_artwork(
    artwork_service: web::Data<ArtworkService>,
    req: HttpRequest,
    request: web::Json<CreateArtworkRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match artwork_service
        .create_artwork(&user.id, request.into_inner())
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
    path = "/artworks",
    tag = "artwork",
    params(
        ("keyword" = Option<String>, Query, description = "Match against title, description and tags"),
        ("style" = Option<String>, Query, description = "Style filter"),
        ("medium" = Option<String>, Query, description = "Medium filter"),
        ("price_min" = Option<i64>, Query, description = "Minimum price in cents"),
        ("price_max" = Option<i64>, Query, description = "Maximum price in cents"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Search results")
    )
)]
pub async fn search_artworks(
    artwork_service: web::Data<ArtworkService>,
    query: web::Query<ArtworkQuery>,
) -> Result<HttpResponse> {
    match artwork_service.search(query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/artworks/{id}",
    tag = "artwork",
    params(("id" = String, Path, description = "Artwork id")),
    responses(
        (status = 200, description = "Artwork detail", body = ArtworkDetailResponse),
        (status = 404, description = "Artwork not found")
    )
)]
pub async fn get_artwork(
    artwork_service: web::Data<ArtworkService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let viewer = auth_user(&req);
    match artwork_service
        .get_artwork(&path.into_inner(), viewer.as_ref().map(|u| u.id.as_str()))
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
    path = "/artworks/{id}",
    tag = "artwork",
    params(("id" = String, Path, description = "Artwork id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Artwork deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Artwork not found")
    )
)]
pub async fn delete_artwork(
    artwork_service: web::Data<ArtworkService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match artwork_service
        .delete_artwork(&path.into_inner(), &user.id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/artworks/{id}/like",
    tag = "social",
    request_body = SetLikeRequest,
    params(("id" = String, Path, description = "Artwork id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Like state set", body = LikeResponse),
        (status = 404, description = "Artwork not found")
    )
)]
pub async fn set_like(
    artwork_service: web::Data<ArtworkService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<SetLikeRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match artwork_service
        .set_like(&path.into_inner(), &user.id, request.liked)
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
    put,
    path = "/artworks/{id}/rating",
    tag = "rating",
    request_body = RateArtworkRequest,
    params(("id" = String, Path, description = "Artwork id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rating stored, average refreshed", body = RatingResponse),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Artwork not found")
    )
)]
pub async fn submit_rating(
    rating_service: web::Data<RatingService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<RateArtworkRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match rating_service
        .submit_rating(&path.into_inner(), &user.id, request.rating)
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
    path = "/artworks/{id}/rating",
    tag = "rating",
    params(("id" = String, Path, description = "Artwork id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's own rating", body = UserRatingResponse)
    )
)]
pub async fn get_user_rating(
    rating_service: web::Data<RatingService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match rating_service
        .get_user_rating(&path.into_inner(), &user.id)
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
    post,
    path = "/artworks/{id}/comments",
    tag = "social",
    request_body = AddCommentRequest,
    params(("id" = String, Path, description = "Artwork id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Invalid comment"),
        (status = 404, description = "Artwork not found")
    )
)]
pub async fn add_comment(
    comment_service: web::Data<CommentService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<AddCommentRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match comment_service
        .add_comment(&path.into_inner(), &user.id, request.into_inner())
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
    path = "/artworks/{id}/comments",
    tag = "social",
    params(
        ("id" = String, Path, description = "Artwork id"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Comment listing")
    )
)]
pub async fn list_comments(
    comment_service: web::Data<CommentService>,
    path: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match comment_service
        .list_comments(&path.into_inner(), query.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn artwork_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/artworks")
            .route("", web::post().to(create_artwork))
            .route("", web::get().to(search_artworks))
            .route("/{id}/like", web::put().to(set_like))
            .route("/{id}/rating", web::put().to(submit_rating))
            .route("/{id}/rating", web::get().to(get_user_rating))
            .route("/{id}/comments", web::post().to(add_comment))
            .route("/{id}/comments", web::get().to(list_comments))
            .route("/{id}", web::get().to(get_artwork))
            .route("/{id}", web::delete().to(delete_artwork)),
    );
}
