// Like counter embedded in each blog. It never drops below zero.

use crate::blogs::find_blog;
use crate::commands::SocialCommands;
use crate::error::{Error, Result};
use crate::records::Blog;
use crate::schema::{BlogId, SocialDatabase};
use crate::service::SocialService;

impl SocialCommands
{
    pub(crate) fn like_blog(db: &mut SocialDatabase, id: &BlogId) -> Result<Blog>
    {
        let blog = db.blogs.get_mut(*id).ok_or(Error::blog_not_found(*id))?;
        blog.likes += 1;
        find_blog(db, *id)
    }

    pub(crate) fn unlike_blog(db: &mut SocialDatabase, id: &BlogId) -> Result<Blog>
    {
        let blog = db.blogs.get_mut(*id).ok_or(Error::blog_not_found(*id))?;
        // Read first, so a no-op does not add a transaction entry
        if blog.likes > 0
        {
            blog.likes -= 1;
        }
        find_blog(db, *id)
    }
}

impl SocialService
{
    pub fn like_blog(&self, id: BlogId) -> Result<Blog>
    {
        self.execute(|commands, _| commands.like_blog.create(id))
    }

    // Unliking a blog with no likes leaves it unchanged
    pub fn unlike_blog(&self, id: BlogId) -> Result<Blog>
    {
        self.execute(|commands, _| commands.unlike_blog.create(id))
    }
}
