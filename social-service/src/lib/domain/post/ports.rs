use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::LikePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostLike;
use crate::domain::post::models::PostSorting;
use crate::domain::post::models::PostWithComments;
use crate::domain::post::models::PostWithLikes;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a new post authored by `author_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        author_id: i64,
        command: CreatePostCommand,
    ) -> Result<Post, PostError>;

    /// List all posts with their like counts.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_posts(&self, sorting: PostSorting) -> Result<Vec<PostWithLikes>, PostError>;

    /// Retrieve one post with its like count and comments.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post_with_comments(&self, post_id: i64) -> Result<PostWithComments, PostError>;

    /// Comment on an existing post.
    ///
    /// # Errors
    /// * `NotFound` - Referenced post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_comment(
        &self,
        author_id: i64,
        command: CreateCommentCommand,
    ) -> Result<Comment, PostError>;

    /// List the comments on a post, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_comments(&self, post_id: i64) -> Result<Vec<Comment>, PostError>;

    /// Like an existing post.
    ///
    /// # Errors
    /// * `NotFound` - Referenced post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn like_post(&self, author_id: i64, command: LikePostCommand)
        -> Result<PostLike, PostError>;
}

/// Persistence operations for posts, comments, and likes.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, user_id: i64, body: &str) -> Result<Post, PostError>;

    /// Retrieve a post by identifier.
    ///
    /// # Returns
    /// Optional post entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_post(&self, id: i64) -> Result<Option<Post>, PostError>;

    /// Retrieve all posts with aggregated like counts.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_with_likes(&self, sorting: PostSorting)
        -> Result<Vec<PostWithLikes>, PostError>;

    /// Retrieve one post with its aggregated like count.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_with_likes(&self, id: i64) -> Result<Option<PostWithLikes>, PostError>;

    /// Persist a new comment.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_comment(
        &self,
        user_id: i64,
        post_id: i64,
        body: &str,
    ) -> Result<Comment, PostError>;

    /// Retrieve the comments on a post, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, PostError>;

    /// Persist a new like.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_like(&self, user_id: i64, post_id: i64) -> Result<PostLike, PostError>;
}
