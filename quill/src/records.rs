// Records exchanged with the routing layer. Inputs arrive already validated.

use chrono::{DateTime, Utc};
use quilldb::prelude::Entity;
use serde::{Serialize, Deserialize};

use crate::schema::{BlogId, BlogRecord, CommentId, CommentRecord, UserId, UserRecord};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlog
{
    pub title: String,
    pub content: String,
    pub author_id: UserId
}

// Partial update of a blog. Only `Some` fields are written
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPatch
{
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>
}

#[cfg(test)]
impl BlogPatch
{
    pub(crate) fn title(title: impl Into<String>) -> Self
    {
        Self { title: Some(title.into()), ..Self::default() }
    }

    pub(crate) fn is_empty(&self) -> bool
    {
        self.title.is_none() && self.content.is_none() && self.author_id.is_none()
    }
}

impl BlogPatch
{
    pub(crate) fn apply_to(&self, blog: &mut BlogRecord)
    {
        if let Some(title) = &self.title
        {
            blog.title = title.clone();
        }
        if let Some(content) = &self.content
        {
            blog.content = content.clone();
        }
        if let Some(author_id) = self.author_id
        {
            blog.author_id = author_id;
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment
{
    pub content: String,
    pub blog_id: BlogId,
    pub user_id: UserId
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser
{
    pub name: String,
    pub email: String
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch
{
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>
}

impl UserPatch
{
    pub(crate) fn apply_to(&self, user: &mut UserRecord)
    {
        if let Some(name) = &self.name
        {
            user.name = name.clone();
        }
        if let Some(email) = &self.email
        {
            user.email = email.clone();
        }
    }
}

// A blog post together with its comments in creation order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Blog
{
    pub id: BlogId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes: u64,
    pub comments: Vec<Comment>
}

impl Blog
{
    pub(crate) fn from_entity(entity: &Entity<BlogRecord>, comments: Vec<Comment>) -> Self
    {
        Self {
            id: entity.get_id(),
            title: entity.title.clone(),
            content: entity.content.clone(),
            author_id: entity.author_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            likes: entity.likes,
            comments
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment
{
    pub id: CommentId,
    pub content: String,
    pub blog_id: BlogId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>
}

impl From<&Entity<CommentRecord>> for Comment
{
    fn from(entity: &Entity<CommentRecord>) -> Self
    {
        Self {
            id: entity.get_id(),
            content: entity.content.clone(),
            blog_id: entity.blog_id,
            user_id: entity.user_id,
            created_at: entity.created_at
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User
{
    pub id: UserId,
    pub name: String,
    pub email: String
}

impl From<&Entity<UserRecord>> for User
{
    fn from(entity: &Entity<UserRecord>) -> Self
    {
        Self { id: entity.get_id(), name: entity.name.clone(), email: entity.email.clone() }
    }
}
