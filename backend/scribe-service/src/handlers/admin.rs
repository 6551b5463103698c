/// Admin handlers - operator-only surface, hidden unless enabled
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::{AppError, Result};
use crate::AppState;

/// POST /api/v1/admin/cache/clear
///
/// Wholesale page cache invalidation. The route responds 404 when the
/// admin surface is disabled so it stays invisible in production unless
/// explicitly turned on.
pub async fn clear_page_cache(state: web::Data<AppState>) -> Result<HttpResponse> {
    if !state.admin_enabled {
        return Err(AppError::NotFound("resource not found".into()));
    }

    match &state.page_cache {
        Some(cache) => {
            let version = cache.clear().await?;
            info!("Operator cleared the page cache");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "cleared": true,
                "version": version
            })))
        }
        None => Ok(HttpResponse::Ok().json(serde_json::json!({
            "cleared": false,
            "detail": "no page cache configured"
        }))),
    }
}
