//! Static content delivery with SPA fallback.

use axum::{
    extract::Extension,
    http::{
        HeaderValue, StatusCode, Uri,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::assets::{Asset, AssetStore, ROOT_DOCUMENT};

/// Serve a static asset.
///
/// Direct hits carry a one-hour browser cache directive. Paths without a
/// backing file fall back to the root document so client-side routes
/// survive a hard reload; the fallback is served uncached.
pub async fn serve(Extension(store): Extension<Arc<AssetStore>>, uri: Uri) -> Response {
    let path = uri.path();

    if let Some(asset) = store.get(path) {
        let mut response = asset_response(asset);
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("max-age=3600"));
        return response;
    }

    debug!(path, "No asset match, serving root document");
    match store.get(ROOT_DOCUMENT) {
        Some(index) => asset_response(index),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

fn asset_response(asset: &Asset) -> Response {
    let mut response = asset.body.clone().into_response();
    match HeaderValue::from_str(&asset.content_type) {
        Ok(content_type) => {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(err) => {
            debug!("Invalid content type header: {err}");
        }
    }
    response
}
