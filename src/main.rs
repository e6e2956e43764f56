use actix_web::{App, HttpServer, middleware, web};

use explora::db::establish_connection_pool;
use explora::models::config::ServerConfig;
use explora::repository::DieselRepository;
use explora::routes::{categories, places, recommendations};

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    config::Config::builder()
        .set_default("bind_address", "0.0.0.0")?
        .set_default("port", 8080)?
        .set_default("review_expiration_days", 30)?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let server_config = load_config().unwrap_or_else(|e| {
        log::error!("Failed to load configuration: {e}");
        std::process::exit(1);
    });

    let pool = establish_connection_pool(&server_config.database_url).unwrap_or_else(|e| {
        log::error!("Failed to establish database connection pool: {e}");
        std::process::exit(1);
    });
    let repo = DieselRepository::new(pool);

    let bind_address = server_config.bind_address.clone();
    let port = server_config.port;
    log::info!("Starting server on {bind_address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .service(
                web::scope("/v1")
                    .service(categories::create_category)
                    .service(categories::list_categories)
                    .service(categories::set_category_status)
                    .service(places::create_place)
                    .service(places::nearby_places)
                    .service(recommendations::explore)
                    .service(recommendations::record_review),
            )
    })
    .bind((bind_address.as_str(), port))?
    .run()
    .await
}
