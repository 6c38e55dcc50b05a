/// A post authored by a registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub body: String,
}

/// A post together with its aggregated like count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithLikes {
    pub id: i64,
    pub user_id: i64,
    pub body: String,
    pub likes: i64,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub body: String,
}

/// A like of a post by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLike {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
}

/// A post with its like count and all of its comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithComments {
    pub post: PostWithLikes,
    pub comments: Vec<Comment>,
}

/// Ordering for the post listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostSorting {
    /// Newest first (highest id first).
    #[default]
    New,
    /// Oldest first.
    Old,
    /// Most-liked first.
    MostLikes,
}

/// Command to create a new post.
#[derive(Debug)]
pub struct CreatePostCommand {
    pub body: String,
}

/// Command to comment on an existing post.
#[derive(Debug)]
pub struct CreateCommentCommand {
    pub post_id: i64,
    pub body: String,
}

/// Command to like an existing post.
#[derive(Debug)]
pub struct LikePostCommand {
    pub post_id: i64,
}
