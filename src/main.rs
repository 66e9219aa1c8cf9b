use actix_web::{App, HttpServer, web};

use product_intake::catalog::QuestionCatalog;
use product_intake::models::config::ServerConfig;
use product_intake::repository::InMemoryRepository;
use product_intake::routes::api::{
    download_report, generate_questions, health, list_products, submit_product,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load server config, using defaults: {e}");
            ServerConfig::default()
        }
    };

    let repo = web::Data::new(InMemoryRepository::new());
    let catalog = web::Data::new(QuestionCatalog::new());

    log::info!(
        "Starting server on {}:{}",
        server_config.bind_address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(repo.clone())
            .app_data(catalog.clone())
            .service(list_products)
            .service(submit_product)
            .service(generate_questions)
            .service(download_report)
            .service(health)
    })
    .bind((server_config.bind_address.as_str(), server_config.port))?
    .run()
    .await
}
