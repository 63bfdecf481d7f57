use std::convert::Infallible;

use chrono::{DateTime, Utc};
use quilldb::prelude::CommandDefinition;
use quilldb_derive::CommandDirectoryFactory;

use crate::error::Error;
use crate::records::{Blog, BlogPatch, Comment, CreateBlog, CreateComment, CreateUser, User, UserPatch};
use crate::schema::{BlogId, SocialDatabase, UserId};

// Parameters carrying the instant the command was issued at, so handlers never read a clock
pub struct Stamped<T>
{
  pub value: T,
  pub at: DateTime<Utc>
}

// Parameters addressed to one existing entity
pub struct Keyed<T>
{
  pub id: usize,
  pub value: T
}

pub struct FollowEdge
{
  pub user_id: UserId,
  pub author_id: UserId
}

// Every mutation of the social database. Handlers live next to the queries of their component
#[derive(CommandDirectoryFactory)]
pub struct SocialCommands
{
  pub create_blog: CommandDefinition<SocialDatabase, Stamped<CreateBlog>, Blog, Infallible>,
  pub update_blog: CommandDefinition<SocialDatabase, Stamped<Keyed<BlogPatch>>, Blog, Error>,
  pub remove_blog: CommandDefinition<SocialDatabase, BlogId, (), Error>,
  pub add_comment: CommandDefinition<SocialDatabase, Stamped<CreateComment>, Comment, Error>,
  pub like_blog: CommandDefinition<SocialDatabase, BlogId, Blog, Error>,
  pub unlike_blog: CommandDefinition<SocialDatabase, BlogId, Blog, Error>,
  pub follow_author: CommandDefinition<SocialDatabase, FollowEdge, Vec<UserId>, Infallible>,
  pub unfollow_author: CommandDefinition<SocialDatabase, FollowEdge, Vec<UserId>, Infallible>,
  pub create_user: CommandDefinition<SocialDatabase, CreateUser, User, Infallible>,
  pub update_user: CommandDefinition<SocialDatabase, Keyed<UserPatch>, User, Error>,
  pub remove_user: CommandDefinition<SocialDatabase, UserId, (), Error>
}
