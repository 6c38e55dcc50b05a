use std::sync::Arc;

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
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;

/// Domain service implementation for posts, comments, and likes.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        author_id: i64,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        tracing::debug!(user_id = author_id, "Creating post");

        self.repository.create_post(author_id, &command.body).await
    }

    async fn get_posts(&self, sorting: PostSorting) -> Result<Vec<PostWithLikes>, PostError> {
        tracing::debug!(?sorting, "Listing posts");

        self.repository.list_with_likes(sorting).await
    }

    async fn get_post_with_comments(&self, post_id: i64) -> Result<PostWithComments, PostError> {
        let post = self
            .repository
            .find_with_likes(post_id)
            .await?
            .ok_or(PostError::NotFound(post_id))?;

        let comments = self.repository.comments_for_post(post_id).await?;

        Ok(PostWithComments { post, comments })
    }

    async fn create_comment(
        &self,
        author_id: i64,
        command: CreateCommentCommand,
    ) -> Result<Comment, PostError> {
        tracing::debug!(user_id = author_id, post_id = command.post_id, "Creating comment");

        // The referenced post must exist
        self.repository
            .find_post(command.post_id)
            .await?
            .ok_or(PostError::NotFound(command.post_id))?;

        self.repository
            .create_comment(author_id, command.post_id, &command.body)
            .await
    }

    async fn get_comments(&self, post_id: i64) -> Result<Vec<Comment>, PostError> {
        self.repository.comments_for_post(post_id).await
    }

    async fn like_post(
        &self,
        author_id: i64,
        command: LikePostCommand,
    ) -> Result<PostLike, PostError> {
        tracing::debug!(user_id = author_id, post_id = command.post_id, "Liking post");

        self.repository
            .find_post(command.post_id)
            .await?
            .ok_or(PostError::NotFound(command.post_id))?;

        self.repository.create_like(author_id, command.post_id).await
    }
}
