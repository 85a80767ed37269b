use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

use crate::models::*;
use crate::services::CollectionService;

use super::{auth_user, require_user};

#[utoipa::path(
    post,
    path = "/collections",
    tag = "collection",
    request_body = CreateCollectionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Collection created", body = CollectionResponse),
        (status = 400, description = "Invalid collection data")
    )
)]
pub async fn create_collection(
    collection_service: web::Data<CollectionService>,
    req: HttpRequest,
    request: web::Json<CreateCollectionRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match collection_service
        .create_collection(&user.id, request.into_inner())
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
    path = "/collections/{id}/artworks",
    tag = "collection",
    params(("id" = String, Path, description = "Collection id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Artworks in the collection"),
        (status = 403, description = "Collection is private"),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn get_collection_artworks(
    collection_service: web::Data<CollectionService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let viewer = auth_user(&req);
    match collection_service
        .get_collection_artworks(&path.into_inner(), viewer.as_ref().map(|u| u.id.as_str()))
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
    path = "/collections/{id}/artworks",
    tag = "collection",
    request_body = AddCollectionArtworkRequest,
    params(("id" = String, Path, description = "Collection id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Artwork saved to collection"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Collection or artwork not found")
    )
)]
pub async fn add_artwork(
    collection_service: web::Data<CollectionService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<AddCollectionArtworkRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match collection_service
        .add_artwork(&path.into_inner(), &user.id, &request.artwork_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/collections/{id}/artworks/{artwork_id}",
    tag = "collection",
    params(
        ("id" = String, Path, description = "Collection id"),
        ("artwork_id" = String, Path, description = "Artwork id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Artwork removed from collection"),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn remove_artwork(
    collection_service: web::Data<CollectionService>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    let (collection_id, artwork_id) = path.into_inner();
    match collection_service
        .remove_artwork(&collection_id, &user.id, &artwork_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/collections/{id}",
    tag = "collection",
    params(("id" = String, Path, description = "Collection id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Collection deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn delete_collection(
    collection_service: web::Data<CollectionService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match collection_service
        .delete_collection(&path.into_inner(), &user.id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn collection_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/collections")
            .route("", web::post().to(create_collection))
            .route(
                "/{id}/artworks/{artwork_id}",
                web::delete().to(remove_artwork),
            )
            .route("/{id}/artworks", web::get().to(get_collection_artworks))
            .route("/{id}/artworks", web::post().to(add_artwork))
            .route("/{id}", web::delete().to(delete_collection)),
    );
}
