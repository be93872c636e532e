//! Helpers for integration tests.
#![allow(dead_code)]

use std::time::Duration;

use actix_web::web;
use tempfile::{NamedTempFile, TempDir};
use tera::Tera;

use trend_motor::cache::{DEFAULT_MAX_ENTRIES, PageCache};
use trend_motor::db::{DbPool, establish_connection_pool, run_migrations};
use trend_motor::domain::brand::{Brand, NewBrand};
use trend_motor::domain::motorcycle::{Motorcycle, NewMotorcycle};
use trend_motor::domain::slider::SlideContent;
use trend_motor::domain::types::{
    BrandId, BrandName, ButtonVariant, CurrencyCode, HexColor, MotorcycleName, OverlayOpacity,
    Price, Slug, SortOrder, StockStatus, TextAlign,
};
use trend_motor::models::config::{RateLimitConfig, ServerConfig};
use trend_motor::rate_limit::RateLimiter;
use trend_motor::repository::{BrandWriter, DieselRepository, MotorcycleWriter};
use trend_motor::storage::{Bucket, ImageUrlResolver, LocalStorage, Upload};

pub const ADMIN_PASSWORD: &str = "test-admin-password";
pub const SECRET: &str = "integration-test-secret-that-is-long-enough-for-a-cookie-key-0123456789";

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// Storage root in a temporary directory.
pub struct TestFiles {
    dir: TempDir,
}

impl TestFiles {
    pub fn new() -> Self {
        TestFiles {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn storage(&self) -> LocalStorage {
        LocalStorage::new(self.dir.path())
    }
}

pub fn urls() -> ImageUrlResolver {
    ImageUrlResolver::new("", [Bucket::Motors], SECRET.as_bytes(), 300)
}

pub fn cache() -> PageCache {
    PageCache::new(Duration::from_secs(300), DEFAULT_MAX_ENTRIES)
}

pub fn image(name: &str) -> Upload {
    Upload {
        file_name: name.to_string(),
        content_type: Some("image/jpeg".to_string()),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }
}

pub fn create_brand(repo: &DieselRepository, name: &str) -> Brand {
    repo.create_brand(&NewBrand {
        name: BrandName::new(name).unwrap(),
        slug: Slug::from_name(name).unwrap(),
        logo_path: None,
        is_active: true,
    })
    .expect("should create brand")
}

pub fn new_motorcycle(brand_id: BrandId, name: &str) -> NewMotorcycle {
    NewMotorcycle {
        brand_id,
        name: MotorcycleName::new(name).unwrap(),
        slug: Slug::from_name(name).unwrap(),
        subtitle: None,
        description: None,
        base_price: Price::new(250_000.0).unwrap(),
        currency: CurrencyCode::default(),
        stock_status: StockStatus::InStock,
        is_published: true,
        is_featured: false,
        is_new: false,
        badges: vec![],
        hero_image_path: None,
        sort_order: SortOrder::default(),
    }
}

pub fn create_motorcycle(repo: &DieselRepository, brand_id: BrandId, name: &str) -> Motorcycle {
    repo.create_motorcycle(&new_motorcycle(brand_id, name))
        .expect("should create motorcycle")
}

/// Published slide showing an external image.
pub fn slide_content(title: &str, image_url: &str) -> SlideContent {
    SlideContent {
        eyebrow: None,
        title: Some(title.to_string()),
        description: None,
        cta_label: None,
        cta_url: None,
        desktop_image_path: image_url.to_string(),
        mobile_image_path: None,
        alt: title.to_string(),
        overlay_opacity: OverlayOpacity::default(),
        text_align: TextAlign::default(),
        text_color: HexColor::default(),
        button_variant: ButtonVariant::default(),
        is_published: true,
        publish_at: None,
        unpublish_at: None,
    }
}

/// Application state shared by the HTTP tests.
pub struct TestApp {
    pub db: TestDb,
    pub files: TestFiles,
    pub tera: web::Data<Tera>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let db = TestDb::new();
        let files = TestFiles::new();
        let tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*.html"))
            .expect("templates should parse");
        let config = ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            database_url: String::new(),
            secret: SECRET.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            public_base_url: String::new(),
            storage_root: files.dir.path().display().to_string(),
            public_buckets: vec!["motors".to_string()],
            signed_url_ttl_secs: 300,
            page_cache_ttl_secs: 300,
            page_cache_max_entries: DEFAULT_MAX_ENTRIES,
            templates_dir: "templates".to_string(),
            assets_dir: "assets".to_string(),
            lead_rate_limit: RateLimitConfig::default(),
        };
        TestApp {
            db,
            files,
            tera: web::Data::new(tera),
            config,
        }
    }

    pub fn limiter(&self) -> RateLimiter {
        RateLimiter::from_config(&self.config.lead_rate_limit)
    }
}

/// Builds the application with the same middleware stack as the server.
#[allow(unused_macros)]
macro_rules! init_app {
    ($app:expr) => {{
        use actix_identity::IdentityMiddleware;
        use actix_session::{SessionMiddleware, storage::CookieSessionStore};
        use actix_web::cookie::Key;
        use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};

        let key = Key::from(common::SECRET.as_bytes());
        let framework =
            FlashMessagesFramework::builder(CookieMessageStore::builder(key.clone()).build())
                .build();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(framework)
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(actix_web::web::Data::new($app.db.repo()))
                .app_data(actix_web::web::Data::new($app.files.storage()))
                .app_data(actix_web::web::Data::new(common::urls()))
                .app_data(actix_web::web::Data::new(common::cache()))
                .app_data(actix_web::web::Data::new($app.limiter()))
                .app_data($app.tera.clone())
                .app_data(actix_web::web::Data::new($app.config.clone()))
                .configure(trend_motor::routes::configure),
        )
        .await
    }};
}
