// Comment store. The comments table is the only copy of a comment; blogs show them by lookup.

use log::debug;

use crate::commands::{SocialCommands, Stamped};
use crate::error::{Error, Result};
use crate::records::{Comment, CreateComment};
use crate::schema::{BlogId, CommentRecord, SocialDatabase};
use crate::service::SocialService;

impl SocialCommands
{
    pub(crate) fn add_comment(db: &mut SocialDatabase, parameters: &Stamped<CreateComment>) -> Result<Comment>
    {
        let comment = &parameters.value;
        if !db.blogs.contains(comment.blog_id)
        {
            return Err(Error::blog_not_found(comment.blog_id));
        }

        let id = db.comments.add(CommentRecord {
            content: comment.content.clone(),
            blog_id: comment.blog_id,
            user_id: comment.user_id,
            created_at: parameters.at
        });

        Ok(Comment {
            id,
            content: comment.content.clone(),
            blog_id: comment.blog_id,
            user_id: comment.user_id,
            created_at: parameters.at
        })
    }
}

impl SocialService
{
    pub fn add_comment(&self, comment: CreateComment) -> Result<Comment>
    {
        let added = self.execute(|commands, at| commands.add_comment.create(Stamped { value: comment, at }))?;
        debug!("Added comment {} to blog {}", added.id, added.blog_id);
        Ok(added)
    }

    // Comments of a blog in creation order. Still answers after the blog is removed
    pub fn get_comments(&self, blog_id: BlogId) -> Vec<Comment>
    {
        self.db().comments.iter()
            .filter(|c| c.blog_id == blog_id)
            .map(Comment::from)
            .collect()
    }
}
