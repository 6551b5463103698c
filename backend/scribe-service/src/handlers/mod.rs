/// HTTP handlers for the public API
///
/// This module contains handlers for:
/// - Posts: index listing, creation, detail, author-only edits, comments
/// - Groups: group directory and per-group post listings
/// - Profiles: user pages, their posts, follow/unfollow actions
/// - Feed: the personalized followee feed
/// - Admin: the config-gated page cache clear
pub mod admin;
pub mod feed;
pub mod groups;
pub mod posts;
pub mod profiles;

// Re-export handler functions at module level
pub use admin::clear_page_cache;
pub use feed::get_feed;
pub use groups::{get_group_posts, list_groups};
pub use posts::{create_comment, create_post, get_post, list_posts, update_post};
pub use profiles::{follow_user, get_profile, get_user_posts, unfollow_user};

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

/// Posts per page on every listing endpoint
pub const PAGE_SIZE: u32 = 10;

/// Pagination query parameters (1-based page number)
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl PageQuery {
    /// Page number clamped to at least 1
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * PAGE_SIZE as i64
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE as i64
    }
}

/// One page of a listing plus the total count across all pages
#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, page: u32, total_count: i64) -> Self {
        Self {
            items,
            page,
            page_size: PAGE_SIZE,
            total_count,
        }
    }
}

/// Service health endpoint
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "scribe-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Route table for everything under `/api/v1`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .service(
                web::resource("")
                    .route(web::get().to(list_posts))
                    .route(web::post().to(create_post)),
            )
            .service(
                web::resource("/{post_id}")
                    .route(web::get().to(get_post))
                    .route(web::put().to(update_post)),
            )
            .route("/{post_id}/comments", web::post().to(create_comment)),
    )
    .service(
        web::scope("/groups")
            .route("", web::get().to(list_groups))
            .route("/{slug}/posts", web::get().to(get_group_posts)),
    )
    .service(
        web::scope("/users")
            .route("/{username}", web::get().to(get_profile))
            .route("/{username}/posts", web::get().to(get_user_posts))
            .route("/{username}/follow", web::post().to(follow_user))
            .route("/{username}/unfollow", web::post().to(unfollow_user)),
    )
    .route("/feed", web::get().to(get_feed))
    .service(web::scope("/admin").route("/cache/clear", web::post().to(clear_page_cache)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offsets() {
        let first = PageQuery { page: 1 };
        assert_eq!(first.offset(), 0);

        let second = PageQuery { page: 2 };
        assert_eq!(second.offset(), 10);

        // Page zero is treated as page one.
        let zero = PageQuery { page: 0 };
        assert_eq!(zero.page(), 1);
        assert_eq!(zero.offset(), 0);
    }

    #[test]
    fn test_page_response_carries_page_size() {
        let page = PageResponse::new(vec![1, 2, 3], 2, 13);
        assert_eq!(page.page_size, PAGE_SIZE);
        assert_eq!(page.total_count, 13);
        assert_eq!(page.items.len(), 3);
    }
}
