// In-memory blog posts, comments, likes, follows and feeds on top of the quilldb engine.

pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod records;
pub mod schema;
pub mod service;

mod blogs;
mod comments;
mod feed;
mod follows;
mod likes;
mod users;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{EntityKind, Error, Result};
pub use records::{Blog, BlogPatch, Comment, CreateBlog, CreateComment, CreateUser, User, UserPatch};
pub use schema::{BlogId, CommentId, UserId};
pub use service::SocialService;
