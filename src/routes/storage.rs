use actix_files::NamedFile;
use actix_web::http::header::{CACHE_CONTROL, CacheControl, CacheDirective, TryIntoHeaderValue};
use actix_web::{HttpRequest, HttpResponse, get, web};
use chrono::Utc;
use serde::Deserialize;

use crate::storage::{Bucket, ImageUrlResolver, LocalStorage, ObjectKey, StorageError};

#[derive(Deserialize)]
struct SignedQuery {
    expires: i64,
    signature: String,
}

fn parse_object(bucket: &str, key: &str) -> Option<(Bucket, ObjectKey)> {
    let bucket = Bucket::try_from(bucket).ok()?;
    let key = ObjectKey::new(key).ok()?;
    Some((bucket, key))
}

fn serve_object(
    req: &HttpRequest,
    storage: &LocalStorage,
    bucket: Bucket,
    key: &ObjectKey,
    cache: CacheControl,
) -> HttpResponse {
    match NamedFile::open(storage.object_path(bucket, key)) {
        Ok(file) => {
            let mut response = file.use_etag(true).into_response(req);
            if let Ok(value) = cache.try_into_value() {
                response.headers_mut().insert(CACHE_CONTROL, value);
            }
            response
        }
        Err(_) => HttpResponse::NotFound().finish(),
    }
}

#[get("/storage/public/{bucket}/{key:.*}")]
pub async fn public_object(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    storage: web::Data<LocalStorage>,
    urls: web::Data<ImageUrlResolver>,
) -> HttpResponse {
    let (bucket, key) = path.into_inner();
    let Some((bucket, key)) = parse_object(&bucket, &key) else {
        return HttpResponse::NotFound().finish();
    };
    if !urls.is_public(bucket) {
        return HttpResponse::NotFound().finish();
    }
    serve_object(
        &req,
        &storage,
        bucket,
        &key,
        CacheControl(vec![CacheDirective::Public, CacheDirective::MaxAge(86_400)]),
    )
}

#[get("/storage/signed/{bucket}/{key:.*}")]
pub async fn signed_object(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    query: web::Query<SignedQuery>,
    storage: web::Data<LocalStorage>,
    urls: web::Data<ImageUrlResolver>,
) -> HttpResponse {
    let (bucket, key) = path.into_inner();
    let Some((bucket, key)) = parse_object(&bucket, &key) else {
        return HttpResponse::NotFound().finish();
    };
    match urls.verify(bucket, &key, query.expires, &query.signature, Utc::now()) {
        Ok(()) => serve_object(
            &req,
            &storage,
            bucket,
            &key,
            CacheControl(vec![CacheDirective::Private, CacheDirective::MaxAge(60)]),
        ),
        Err(StorageError::Expired) => HttpResponse::Gone().finish(),
        Err(e) => {
            log::warn!("Rejected signed storage url {bucket}/{key}: {e}");
            HttpResponse::Forbidden().finish()
        }
    }
}
