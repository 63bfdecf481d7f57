// Blog store: creation, lookup, partial update and removal of blog posts.

use std::collections::BTreeMap;
use std::convert::Infallible;

use log::debug;
use quilldb::prelude::Entity;

use crate::commands::{Keyed, SocialCommands, Stamped};
use crate::error::{Error, Result};
use crate::records::{Blog, BlogPatch, Comment, CreateBlog};
use crate::schema::{BlogId, BlogRecord, SocialDatabase, UserId};
use crate::service::SocialService;

// Builds the view of one blog with its comments
pub(crate) fn blog_view(db: &SocialDatabase, entity: &Entity<BlogRecord>) -> Blog
{
    let comments = db.comments.iter()
        .filter(|c| c.blog_id == entity.get_id())
        .map(Comment::from)
        .collect();
    Blog::from_entity(entity, comments)
}

// Builds views of many blogs, grouping the comments table in a single pass
pub(crate) fn blog_views<'a, I>(db: &SocialDatabase, entities: I) -> Vec<Blog> where I: Iterator<Item = &'a Entity<BlogRecord>>
{
    let mut comments_by_blog: BTreeMap<BlogId, Vec<Comment>> = BTreeMap::new();
    for comment in db.comments.iter()
    {
        comments_by_blog.entry(comment.blog_id).or_default().push(Comment::from(comment));
    }

    entities
        .map(|entity| Blog::from_entity(entity, comments_by_blog.remove(&entity.get_id()).unwrap_or_default()))
        .collect()
}

pub(crate) fn find_blog(db: &SocialDatabase, id: BlogId) -> Result<Blog>
{
    db.blogs.get(id).map(|entity| blog_view(db, entity)).ok_or(Error::blog_not_found(id))
}

impl SocialCommands
{
    pub(crate) fn create_blog(db: &mut SocialDatabase, parameters: &Stamped<CreateBlog>) -> std::result::Result<Blog, Infallible>
    {
        let blog = &parameters.value;
        let id = db.blogs.add(BlogRecord {
            title: blog.title.clone(),
            content: blog.content.clone(),
            author_id: blog.author_id,
            created_at: parameters.at,
            updated_at: parameters.at,
            likes: 0
        });

        // A new identifier has no comments yet
        Ok(Blog {
            id,
            title: blog.title.clone(),
            content: blog.content.clone(),
            author_id: blog.author_id,
            created_at: parameters.at,
            updated_at: parameters.at,
            likes: 0,
            comments: Vec::new()
        })
    }

    pub(crate) fn update_blog(db: &mut SocialDatabase, parameters: &Stamped<Keyed<BlogPatch>>) -> Result<Blog>
    {
        let Keyed { id, value: patch } = &parameters.value;
        let blog = db.blogs.get_mut(*id).ok_or(Error::blog_not_found(*id))?;

        patch.apply_to(blog);
        blog.updated_at = parameters.at;

        find_blog(db, *id)
    }

    pub(crate) fn remove_blog(db: &mut SocialDatabase, id: &BlogId) -> Result<()>
    {
        // Comments of the blog are kept
        if db.blogs.remove(*id) { Ok(()) } else { Err(Error::blog_not_found(*id)) }
    }
}

impl SocialService
{
    pub fn create_blog(&self, blog: CreateBlog) -> Blog
    {
        let created = self.execute(|commands, at| commands.create_blog.create(Stamped { value: blog, at }))
            .unwrap_or_else(|never| match never {});
        debug!("Created blog {} by author {}", created.id, created.author_id);
        created
    }

    // All blogs in creation order
    pub fn find_all(&self) -> Vec<Blog>
    {
        let db = self.db();
        blog_views(&db, db.blogs.iter())
    }

    pub fn find_one(&self, id: BlogId) -> Result<Blog>
    {
        find_blog(&self.db(), id)
    }

    pub fn find_by_author(&self, author_id: UserId) -> Vec<Blog>
    {
        let db = self.db();
        blog_views(&db, db.blogs.iter().filter(|b| b.author_id == author_id))
    }

    // Blogs of one author when given, otherwise all blogs
    pub fn list_blogs(&self, author_id: Option<UserId>) -> Vec<Blog>
    {
        match author_id
        {
            Some(author_id) => self.find_by_author(author_id),
            None => self.find_all()
        }
    }

    // Writes the fields present in `patch` and refreshes `updated_at`, even for an empty patch
    pub fn update_blog(&self, id: BlogId, patch: BlogPatch) -> Result<Blog>
    {
        self.execute(|commands, at| commands.update_blog.create(Stamped { value: Keyed { id, value: patch }, at }))
    }

    pub fn remove_blog(&self, id: BlogId) -> Result<()>
    {
        self.execute(|commands, _| commands.remove_blog.create(id))
    }
}
