use axum::response::Html;

const INDEX_PAGE: &str = include_str!("../../static/index.html");

/// GET /
/// Upload form. Posts to `/upload_resume` and renders the JSON reply.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_page_posts_to_upload_route() {
        let Html(page) = index_handler().await;
        assert!(page.contains("/upload_resume"));
        assert!(page.contains("name=\"resume\""));
        assert!(page.contains("name=\"job_type\""));
    }
}
