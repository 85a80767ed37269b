use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::PortfolioService;

use super::{auth_user, require_user};

#[utoipa::path(
    post,
    path = "/portfolios",
    tag = "portfolio",
    request_body = CreatePortfolioRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Portfolio created", body = PortfolioResponse),
        (status = 403, description = "Account type cannot create portfolios")
    )
)]
pub async fn create_portfolio(
    portfolio_service: web::Data<PortfolioService>,
    req: HttpRequest,
    request: web::Json<CreatePortfolioRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match portfolio_service
        .create_portfolio(&user.id, request.into_inner())
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
    path = "/portfolios/{id}",
    tag = "portfolio",
    request_body = UpdatePortfolioRequest,
    params(("id" = String, Path, description = "Portfolio id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Portfolio updated", body = PortfolioResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Portfolio not found")
    )
)]
pub async fn update_portfolio(
    portfolio_service: web::Data<PortfolioService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdatePortfolioRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match portfolio_service
        .update_portfolio(&path.into_inner(), &user.id, request.into_inner())
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
    path = "/portfolios/{id}/artworks",
    tag = "portfolio",
    params(("id" = String, Path, description = "Portfolio id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Portfolio pieces in curated order"),
        (status = 403, description = "Portfolio is private"),
        (status = 404, description = "Portfolio not found")
    )
)]
pub async fn get_portfolio_artworks(
    portfolio_service: web::Data<PortfolioService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let viewer = auth_user(&req);
    match portfolio_service
        .get_portfolio_artworks(&path.into_inner(), viewer.as_ref().map(|u| u.id.as_str()))
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
    path = "/portfolios/{id}/artworks",
    tag = "portfolio",
    request_body = AddPortfolioArtworkRequest,
    params(("id" = String, Path, description = "Portfolio id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Artwork added to portfolio"),
        (status = 403, description = "Not the owner or not your artwork"),
        (status = 404, description = "Portfolio or artwork not found")
    )
)]
pub async fn add_artwork(
    portfolio_service: web::Data<PortfolioService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<AddPortfolioArtworkRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match portfolio_service
        .add_artwork(&path.into_inner(), &user.id, request.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/portfolios/{id}/artworks/{artwork_id}",
    tag = "portfolio",
    params(
        ("id" = String, Path, description = "Portfolio id"),
        ("artwork_id" = String, Path, description = "Artwork id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Artwork removed from portfolio"),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn remove_artwork(
    portfolio_service: web::Data<PortfolioService>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    let (portfolio_id, artwork_id) = path.into_inner();
    match portfolio_service
        .remove_artwork(&portfolio_id, &user.id, &artwork_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/portfolios/{id}",
    tag = "portfolio",
    params(("id" = String, Path, description = "Portfolio id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Portfolio deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Portfolio not found")
    )
)]
pub async fn delete_portfolio(
    portfolio_service: web::Data<PortfolioService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match portfolio_service
        .delete_portfolio(&path.into_inner(), &user.id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn portfolio_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/portfolios")
            .route("", web::post().to(create_portfolio))
            .route(
                "/{id}/artworks/{artwork_id}",
                web::delete().to(remove_artwork),
            )
            .route("/{id}/artworks", web::get().to(get_portfolio_artworks))
            .route("/{id}/artworks", web::post().to(add_artwork))
            .route("/{id}", web::put().to(update_portfolio))
            .route("/{id}", web::delete().to(delete_portfolio)),
    );
}
