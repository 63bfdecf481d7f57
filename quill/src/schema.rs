use chrono::{DateTime, Utc};
use quilldb::prelude::Table;
use quilldb_derive::{Database, DatabaseFactory};
use serde::{Serialize, Deserialize};

pub type BlogId = usize;
pub type CommentId = usize;
pub type UserId = usize;

// A stored blog post. Comments are not stored here, they are looked up in the comments table by blog id
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BlogRecord
{
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes: u64
}

// A stored comment. `blog_id` resolved when the comment was created, but may dangle afterwards
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CommentRecord
{
    pub content: String,
    pub blog_id: BlogId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>
}

// Authors followed by one user, in the order they were followed, without duplicates
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Following
{
    pub user_id: UserId,
    pub following_ids: Vec<UserId>
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserRecord
{
    pub name: String,
    pub email: String
}

// Every table of the service. Blog, comment and user identifiers come from their own tables
#[derive(Database, DatabaseFactory)]
pub struct SocialDatabase
{
    pub blogs: Table<BlogRecord>,
    pub comments: Table<CommentRecord>,
    pub followings: Table<Following>,
    pub users: Table<UserRecord>
}
