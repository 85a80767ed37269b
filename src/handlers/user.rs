use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::{CollectionService, FollowService, PortfolioService, UserService};

use super::{auth_user, require_user};

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile with statistics", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_profile(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    let profile = user_service.get_user(&user.id).await;
    let statistics = user_service.get_user_statistics(&user.id).await;
    match (profile, statistics) {
        (Ok(user), Ok(statistics)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "user": user,
                "statistics": statistics
            }
        }))),
        (Err(e), _) | (_, Err(e)) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/users/me",
    tag = "user",
    request_body = UpdateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid profile data"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_profile(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match user_service
        .update_profile(&user.id, request.into_inner())
        .await
    {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": { "user": user }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "user",
    params(("id" = String, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Public profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    let profile = user_service.get_user(&user_id).await;
    let statistics = user_service.get_user_statistics(&user_id).await;
    match (profile, statistics) {
        (Ok(user), Ok(statistics)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "user": user,
                "statistics": statistics
            }
        }))),
        (Err(e), _) | (_, Err(e)) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Platform totals", body = PlatformStats)
    )
)]
pub async fn platform_stats(user_service: web::Data<UserService>) -> Result<HttpResponse> {
    match user_service.get_platform_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": stats
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/users/{id}/follow",
    tag = "social",
    request_body = FollowRequest,
    params(("id" = String, Path, description = "User to follow")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Now following", body = FollowResponse),
        (status = 400, description = "Cannot follow yourself"),
        (status = 404, description = "User not found")
    )
)]
pub async fn follow(
    follow_service: web::Data<FollowService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<FollowRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match follow_service
        .follow(&user.id, &path.into_inner(), request.into_inner())
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
    path = "/users/{id}/follow",
    tag = "social",
    params(("id" = String, Path, description = "User to unfollow")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "No longer following", body = FollowResponse)
    )
)]
pub async fn unfollow(
    follow_service: web::Data<FollowService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match follow_service.unfollow(&user.id, &path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{id}/follow",
    tag = "social",
    params(("id" = String, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Follow state", body = FollowResponse)
    )
)]
pub async fn follow_state(
    follow_service: web::Data<FollowService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match follow_service
        .follow_state(&user.id, &path.into_inner())
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
    path = "/users/{id}/followers",
    tag = "social",
    params(
        ("id" = String, Path, description = "User id"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Page size")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Follower listing")
    )
)]
pub async fn list_followers(
    follow_service: web::Data<FollowService>,
    path: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match follow_service
        .list_followers(&path.into_inner(), query.into_inner())
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
    path = "/users/{id}/following",
    tag = "social",
    params(
        ("id" = String, Path, description = "User id"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Page size")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Following listing")
    )
)]
pub async fn list_following(
    follow_service: web::Data<FollowService>,
    path: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match follow_service
        .list_following(&path.into_inner(), query.into_inner())
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
    path = "/users/{id}/collections",
    tag = "collection",
    params(("id" = String, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User's collections")
    )
)]
pub async fn list_user_collections(
    collection_service: web::Data<CollectionService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let viewer = auth_user(&req);
    match collection_service
        .list_collections(&path.into_inner(), viewer.as_ref().map(|u| u.id.as_str()))
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
    path = "/users/{id}/portfolios",
    tag = "portfolio",
    params(("id" = String, Path, description = "Artist id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Artist's portfolios")
    )
)]
pub async fn list_user_portfolios(
    portfolio_service: web::Data<PortfolioService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let viewer = auth_user(&req);
    match portfolio_service
        .list_portfolios(&path.into_inner(), viewer.as_ref().map(|u| u.id.as_str()))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/stats", web::get().to(platform_stats)).service(
        web::scope("/users")
            .route("/me", web::get().to(get_profile))
            .route("/me", web::put().to(update_profile))
            .route("/{id}/follow", web::put().to(follow))
            .route("/{id}/follow", web::delete().to(unfollow))
            .route("/{id}/follow", web::get().to(follow_state))
            .route("/{id}/followers", web::get().to(list_followers))
            .route("/{id}/following", web::get().to(list_following))
            .route("/{id}/collections", web::get().to(list_user_collections))
            .route("/{id}/portfolios", web::get().to(list_user_portfolios))
            .route("/{id}", web::get().to(get_user)),
    );
}
