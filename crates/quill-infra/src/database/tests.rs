#[cfg(test)]
mod tests {
    use crate::database::entity::{category, post, user};
    use crate::database::postgres_repo::{
        PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use quill_core::domain::{Category, Post, User};
    use quill_core::ports::{BaseRepository, CategoryRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                category_id: None,
                location_id: None,
                title: "Test Post".to_owned(),
                body: "Body".to_owned(),
                pub_date: now.into(),
                is_published: true,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_find_user_by_username() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                username: "alice".to_owned(),
                email: "alice@example.com".to_owned(),
                password_hash: "hash".to_owned(),
                display_name: None,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result: Option<User> = repo.find_by_username("alice").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn test_find_category_by_slug() {
        let category_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![category::Model {
                id: category_id,
                title: "Travel".to_owned(),
                description: "On the road".to_owned(),
                slug: "travel".to_owned(),
                is_published: true,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let result: Option<Category> = repo.find_by_slug("travel").await.unwrap();

        assert!(result.is_some());
        let category = result.unwrap();
        assert_eq!(category.slug, "travel");
        assert!(category.is_published);
    }
}
