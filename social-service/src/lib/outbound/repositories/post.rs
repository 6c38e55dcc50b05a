use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostLike;
use crate::domain::post::models::PostSorting;
use crate::domain::post::models::PostWithLikes;
use crate::domain::post::ports::PostRepository;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_POSTS_WITH_LIKES: &str = r#"
    SELECT p.id, p.user_id, p.body, COUNT(l.id) AS likes
    FROM posts p
    LEFT OUTER JOIN likes l ON l.post_id = p.id
"#;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    body: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            user_id: row.user_id,
            body: row.body,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostWithLikesRow {
    id: i64,
    user_id: i64,
    body: String,
    likes: i64,
}

impl From<PostWithLikesRow> for PostWithLikes {
    fn from(row: PostWithLikesRow) -> Self {
        PostWithLikes {
            id: row.id,
            user_id: row.user_id,
            body: row.body,
            likes: row.likes,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    body: String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
            body: row.body,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LikeRow {
    id: i64,
    post_id: i64,
    user_id: i64,
}

impl From<LikeRow> for PostLike {
    fn from(row: LikeRow) -> Self {
        PostLike {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, user_id: i64, body: &str) -> Result<Post, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, body)
            VALUES ($1, $2)
            RETURNING id, user_id, body
            "#,
        )
        .bind(user_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_post(&self, id: i64) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, body
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.map(Post::from))
    }

    async fn list_with_likes(
        &self,
        sorting: PostSorting,
    ) -> Result<Vec<PostWithLikes>, PostError> {
        let order_by = match sorting {
            PostSorting::New => "p.id DESC",
            PostSorting::Old => "p.id ASC",
            PostSorting::MostLikes => "likes DESC",
        };
        let query = format!("{SELECT_POSTS_WITH_LIKES} GROUP BY p.id ORDER BY {order_by}");

        let rows = sqlx::query_as::<_, PostWithLikesRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(PostWithLikes::from).collect())
    }

    async fn find_with_likes(&self, id: i64) -> Result<Option<PostWithLikes>, PostError> {
        let query = format!("{SELECT_POSTS_WITH_LIKES} WHERE p.id = $1 GROUP BY p.id");

        let row = sqlx::query_as::<_, PostWithLikesRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.map(PostWithLikes::from))
    }

    async fn create_comment(
        &self,
        user_id: i64,
        post_id: i64,
        body: &str,
    ) -> Result<Comment, PostError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, user_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, body
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, PostError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, body
            FROM comments
            WHERE post_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create_like(&self, user_id: i64, post_id: i64) -> Result<PostLike, PostError> {
        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            INSERT INTO likes (post_id, user_id)
            VALUES ($1, $2)
            RETURNING id, post_id, user_id
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }
}
