use std::env;
use std::time::Duration;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use config::Config;
use dotenvy::dotenv;
use sha2::{Digest, Sha512};
use tera::Tera;

use trend_motor::cache::PageCache;
use trend_motor::db::{establish_connection_pool, run_migrations};
use trend_motor::models::config::ServerConfig;
use trend_motor::rate_limit::RateLimiter;
use trend_motor::repository::DieselRepository;
use trend_motor::routes::configure;
use trend_motor::storage::{Bucket, ImageUrlResolver, LocalStorage};

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("public_buckets")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

fn public_buckets(names: &[String]) -> Vec<Bucket> {
    names
        .iter()
        .filter_map(|name| match Bucket::try_from(name.as_str()) {
            Ok(bucket) => Some(bucket),
            Err(e) => {
                log::warn!("Ignoring public bucket {name}: {e}");
                None
            }
        })
        .collect()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run_migrations(&pool) {
        log::error!("{e}");
        std::process::exit(1);
    }

    let tera = match Tera::new(&format!("{}/**/*.html", server_config.templates_dir)) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to parse templates: {e}");
            std::process::exit(1);
        }
    };

    if server_config.admin_password.is_empty() {
        log::warn!("No admin password configured, the back office is locked");
    }

    // Sha512 gives exactly the 64 bytes the cookie key needs.
    let secret_key = Key::from(&Sha512::digest(server_config.secret.as_bytes()));
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let repo = web::Data::new(DieselRepository::new(pool));
    let storage = web::Data::new(LocalStorage::new(&server_config.storage_root));
    let urls = web::Data::new(ImageUrlResolver::new(
        &server_config.public_base_url,
        public_buckets(&server_config.public_buckets),
        server_config.secret.as_bytes(),
        server_config.signed_url_ttl_secs,
    ));
    let cache = web::Data::new(PageCache::new(
        Duration::from_secs(server_config.page_cache_ttl_secs),
        server_config.page_cache_max_entries,
    ));
    let limiter = web::Data::new(RateLimiter::from_config(&server_config.lead_rate_limit));
    let tera = web::Data::new(tera);

    let bind_address = server_config.bind_address.clone();
    let port = server_config.port;
    let assets_dir = server_config.assets_dir.clone();
    let server_config = web::Data::new(server_config);

    log::info!("Starting Trend Motor on {bind_address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .service(Files::new("/assets", &assets_dir))
            .app_data(repo.clone())
            .app_data(storage.clone())
            .app_data(urls.clone())
            .app_data(cache.clone())
            .app_data(limiter.clone())
            .app_data(tera.clone())
            .app_data(server_config.clone())
            .configure(configure)
    })
    .bind((bind_address, port))?
    .run()
    .await
}
