use actix_web::{web, App, HttpServer};
use backend::config::Config;
use backend::contest::ContestRecordRepositoryImpl;
use backend::openapi::ApiDoc;
use log::error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let conn = match arangors::Connection::establish_basic_auth(
        &config.database.url,
        &config.database.username,
        &config.database.password,
    )
    .await
    {
        Ok(conn) => conn,
        Err(e) => {
            error!("Failed to connect to ArangoDB: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string()));
        }
    };

    let db = match conn.db(&config.database.name).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to get ArangoDB database: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()));
        }
    };

    let contest_repo = web::Data::new(ContestRecordRepositoryImpl::new(
        db.clone(),
        config.database.collection.clone(),
        std::time::Duration::from_secs(config.database.timeout_seconds),
    ));
    let db_data = web::Data::new(db);
    let openapi = ApiDoc::openapi();

    log::info!("Starting server on {}:{}", config.server.host, config.server.port);

    HttpServer::new(move || {
        App::new()
            .wrap(backend::middleware::Logger)
            .wrap(backend::middleware::cors_middleware())
            .app_data(db_data.clone())
            .app_data(contest_repo.clone())
            .service(backend::health::health_check)
            .service(backend::health::detailed_health_check)
            .service(
                web::scope("/api/contests")
                    .service(backend::contest::controller::calendar_handler)
                    .service(backend::contest::controller::list_contests_handler),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .workers(config.server.workers)
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
