pub mod post;
pub mod user;

pub use post::PostgresPostRepository;
pub use user::PostgresUserRepository;
