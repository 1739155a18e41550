#[cfg(test)]
mod tests {
    use mongodb::bson::{self, doc, oid::ObjectId};
    use mongodb::error::Error as MongoError;

    use crate::database::connections::{DatabaseConfig, DatabaseConnections};
    use crate::database::document::BlogPostDocument;
    use crate::database::mongo_repo::{MongoBlogPostRepository, repo_error};
    use quill_core::domain::{BlogPostChanges, BlogPostContent, BlogPostId, NewBlogPost};
    use quill_core::error::RepoError;
    use quill_core::ports::BlogPostRepository;

    fn content(title: &str, body: &str, author: Option<&str>) -> BlogPostContent {
        BlogPostContent::new(
            Some(title.to_string()),
            Some(body.to_string()),
            author.map(str::to_string),
        )
        .unwrap()
    }

    /// Repository pointed at a port nothing listens on.
    async fn unreachable_repo() -> MongoBlogPostRepository {
        let config =
            DatabaseConfig::with_url("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200");
        let connections = DatabaseConnections::init(&config).await.unwrap();
        MongoBlogPostRepository::new(connections.blogs())
    }

    #[tokio::test]
    async fn test_io_errors_are_connection_failures() {
        let err = MongoError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(matches!(repo_error(err), RepoError::Connection(_)));
    }

    #[tokio::test]
    async fn test_decode_errors_are_query_failures() {
        // No timestamps: the stored document cannot be decoded.
        let decode = bson::from_document::<BlogPostDocument>(doc! { "title": "A" }).unwrap_err();
        let err = MongoError::from(decode);
        assert!(matches!(repo_error(err), RepoError::Query(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_failure() {
        let repo = unreachable_repo().await;

        assert!(matches!(
            repo.find_all().await,
            Err(RepoError::Connection(_))
        ));
        assert!(matches!(
            repo.insert(NewBlogPost::new(content("A", "B", None))).await,
            Err(RepoError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_id_fails_before_any_round_trip() {
        let repo = unreachable_repo().await;
        let id = BlogPostId::new("not-an-id");

        assert!(matches!(
            repo.find_by_id(&id).await,
            Err(RepoError::InvalidId(_))
        ));
        assert!(matches!(
            repo.update(&id, BlogPostChanges::new(content("A", "B", None)))
                .await,
            Err(RepoError::InvalidId(_))
        ));
        assert!(matches!(
            repo.delete(&id).await,
            Err(RepoError::InvalidId(_))
        ));
    }

    /// Needs a running server: `MONGODB_URL` or mongodb://localhost:27017.
    #[tokio::test]
    #[ignore]
    async fn test_mongo_blog_lifecycle() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = DatabaseConfig {
            collection: format!("blogs_test_{}", ObjectId::new().to_hex()),
            ..DatabaseConfig::with_url(url)
        };
        let connections = DatabaseConnections::init(&config).await.unwrap();
        let repo = MongoBlogPostRepository::new(connections.blogs());

        let created = repo
            .insert(NewBlogPost::new(content("A", "B", Some("ann"))))
            .await
            .unwrap();
        assert!(ObjectId::parse_str(created.id.as_str()).is_ok());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.created_at.timestamp_subsec_nanos() % 1_000_000, 0);

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found, created);

        repo.update(&created.id, BlogPostChanges::new(content("A2", "B2", None)))
            .await
            .unwrap();
        let updated = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "A2");
        assert_eq!(updated.body, "B2");
        assert_eq!(updated.author, None);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let missing = BlogPostId::new(ObjectId::new().to_hex());
        assert!(matches!(
            repo.update(&missing, BlogPostChanges::new(content("A", "B", None)))
                .await,
            Err(RepoError::NotFound)
        ));

        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        repo.delete(&created.id).await.unwrap();
        assert!(matches!(
            repo.delete(&created.id).await,
            Err(RepoError::NotFound)
        ));
        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());

        connections.blogs().drop().await.unwrap();
    }
}
