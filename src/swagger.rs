use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::google_login,
        handlers::user::get_profile,
        handlers::user::update_profile,
        handlers::user::get_user,
        handlers::user::platform_stats,
        handlers::user::follow,
        handlers::user::unfollow,
        handlers::user::follow_state,
        handlers::user::list_followers,
        handlers::user::list_following,
        handlers::user::list_user_collections,
        handlers::user::list_user_portfolios,
        handlers::artwork::create_artwork,
        handlers::artwork::search_artworks,
        handlers::artwork::get_artwork,
        handlers::artwork::delete_artwork,
        handlers::artwork::set_like,
        handlers::artwork::submit_rating,
        handlers::artwork::get_user_rating,
        handlers::artwork::add_comment,
        handlers::artwork::list_comments,
        handlers::comment::update_comment,
        handlers::comment::delete_comment,
        handlers::contest::create_contest,
        handlers::contest::list_contests,
        handlers::contest::get_contest,
        handlers::contest::submit_entry,
        handlers::contest::leaderboard,
        handlers::collection::create_collection,
        handlers::collection::get_collection_artworks,
        handlers::collection::add_artwork,
        handlers::collection::remove_artwork,
        handlers::collection::delete_collection,
        handlers::portfolio::create_portfolio,
        handlers::portfolio::update_portfolio,
        handlers::portfolio::get_portfolio_artworks,
        handlers::portfolio::add_artwork,
        handlers::portfolio::remove_artwork,
        handlers::portfolio::delete_portfolio,
        handlers::verification::submit_request,
        handlers::verification::my_request,
        handlers::verification::list_pending,
        handlers::verification::review_request,
    ),
    components(
        schemas(
            ApiError,
            PlatformStats,
            PaginationParams,
            UserType,
            CreateUserRequest,
            LoginRequest,
            RefreshTokenRequest,
            GoogleLoginRequest,
            UpdateUserRequest,
            UserResponse,
            UserStatistics,
            UserSummary,
            AuthResponse,
            OwnerType,
            CreateArtworkRequest,
            ArtworkQuery,
            ArtworkResponse,
            ArtworkDetailResponse,
            SetLikeRequest,
            LikeResponse,
            RateArtworkRequest,
            RatingResponse,
            UserRatingResponse,
            AddCommentRequest,
            UpdateCommentRequest,
            CommentResponse,
            FollowRequest,
            FollowResponse,
            ContestStatus,
            CreateContestRequest,
            ContestResponse,
            ContestQuery,
            SubmitContestEntryRequest,
            ContestEntryResponse,
            CreateCollectionRequest,
            CollectionResponse,
            AddCollectionArtworkRequest,
            CreatePortfolioRequest,
            UpdatePortfolioRequest,
            PortfolioResponse,
            AddPortfolioArtworkRequest,
            VerificationStatus,
            SubmitVerificationRequest,
            ReviewVerificationRequest,
            VerificationResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "user", description = "User profile API"),
        (name = "artwork", description = "Artwork management and search API"),
        (name = "rating", description = "Artwork rating API"),
        (name = "social", description = "Likes, comments and follows API"),
        (name = "contest", description = "Contest and leaderboard API"),
        (name = "collection", description = "Collection API"),
        (name = "portfolio", description = "Portfolio API"),
        (name = "verification", description = "Account verification API"),
    ),
    info(
        title = "ArtLovers Backend API",
        version = "1.0.0",
        description = "ArtLovers community platform REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
