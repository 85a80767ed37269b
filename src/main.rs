use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};

use artlovers_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::GoogleOAuthService,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration");

    let pool = Arc::new(
        create_pool(&config.database)
            .await
            .expect("Failed to create database connection pool"),
    );

    run_migrations(pool.as_ref())
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );

    let google_service = GoogleOAuthService::new(config.google.clone());
    if !google_service.is_enabled() {
        log::warn!("Google OAuth is not configured; /auth/oauth/google will be rejected");
    }

    let auth_service = AuthService::new(pool.clone(), jwt_service.clone(), google_service);
    let user_service = UserService::new(pool.clone());
    let artwork_service = ArtworkService::new(pool.clone());
    let rating_service = RatingService::new(pool.clone());
    let comment_service = CommentService::new(pool.clone());
    let follow_service = FollowService::new(pool.clone());
    let contest_service = ContestService::new(pool.clone());
    let collection_service = CollectionService::new(pool.clone());
    let portfolio_service = PortfolioService::new(pool.clone());
    let verification_service = VerificationService::new(pool.clone());

    // Background refresh keeps contest statuses in step with their
    // schedules (upcoming -> active -> ended), once a minute.
    {
        let contest_service_clone = contest_service.clone();
        tokio::spawn(async move {
            loop {
                match contest_service_clone.refresh_statuses().await {
                    Ok(0) => {}
                    Ok(changed) => log::info!("Refreshed {} contest status(es)", changed),
                    Err(e) => log::error!("Failed to refresh contest statuses: {:?}", e),
                }
                tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            }
        });
    }

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(artwork_service.clone()))
            .app_data(web::Data::new(rating_service.clone()))
            .app_data(web::Data::new(comment_service.clone()))
            .app_data(web::Data::new(follow_service.clone()))
            .app_data(web::Data::new(contest_service.clone()))
            .app_data(web::Data::new(collection_service.clone()))
            .app_data(web::Data::new(portfolio_service.clone()))
            .app_data(web::Data::new(verification_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::user_config)
                    .configure(handlers::artwork_config)
                    .configure(handlers::comment_config)
                    .configure(handlers::contest_config)
                    .configure(handlers::collection_config)
                    .configure(handlers::portfolio_config)
                    .configure(handlers::verification_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
