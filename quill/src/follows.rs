// Follow graph: for each user, the authors they follow. One hop only, self-follow allowed.

use std::convert::Infallible;

use log::debug;

use crate::commands::{FollowEdge, SocialCommands};
use crate::schema::{Following, SocialDatabase, UserId};
use crate::service::SocialService;

// Apply `change` to the follow list of a user, whose entry is created empty on first use
fn update_following<F>(db: &mut SocialDatabase, user_id: UserId, change: F) -> Vec<UserId> where F: FnOnce(&mut Vec<UserId>)
{
    let existing = db.followings.iter().find(|f| f.user_id == user_id).map(|f| f.get_id());
    let id = match existing
    {
        Some(id) => id,
        None => db.followings.add(Following { user_id, following_ids: Vec::new() })
    };

    match db.followings.get_mut(id)
    {
        Some(following) =>
        {
            change(&mut following.following_ids);
            following.following_ids.clone()
        },
        None => Vec::new()
    }
}

pub(crate) fn following_of(db: &SocialDatabase, user_id: UserId) -> Vec<UserId>
{
    db.followings.iter()
        .find(|f| f.user_id == user_id)
        .map(|f| f.following_ids.clone())
        .unwrap_or_default()
}

impl SocialCommands
{
    pub(crate) fn follow_author(db: &mut SocialDatabase, edge: &FollowEdge) -> Result<Vec<UserId>, Infallible>
    {
        Ok(update_following(db, edge.user_id, |following_ids|
        {
            if !following_ids.contains(&edge.author_id)
            {
                following_ids.push(edge.author_id);
            }
        }))
    }

    pub(crate) fn unfollow_author(db: &mut SocialDatabase, edge: &FollowEdge) -> Result<Vec<UserId>, Infallible>
    {
        Ok(update_following(db, edge.user_id, |following_ids| following_ids.retain(|id| *id != edge.author_id)))
    }
}

impl SocialService
{
    // Following the same author again changes nothing
    pub fn follow_author(&self, user_id: UserId, author_id: UserId) -> Vec<UserId>
    {
        debug!("User {} follows {}", user_id, author_id);
        self.execute(|commands, _| commands.follow_author.create(FollowEdge { user_id, author_id }))
            .unwrap_or_else(|never| match never {})
    }

    // Unfollowing an author that is not followed changes nothing
    pub fn unfollow_author(&self, user_id: UserId, author_id: UserId) -> Vec<UserId>
    {
        debug!("User {} unfollows {}", user_id, author_id);
        self.execute(|commands, _| commands.unfollow_author.create(FollowEdge { user_id, author_id }))
            .unwrap_or_else(|never| match never {})
    }

    // Authors followed by a user in follow order, empty when the user never followed anyone
    pub fn get_following(&self, user_id: UserId) -> Vec<UserId>
    {
        following_of(&self.db(), user_id)
    }

    // Whether a follow or unfollow call has ever been made for the user
    pub fn has_following_entry(&self, user_id: UserId) -> bool
    {
        self.db().followings.iter().any(|f| f.user_id == user_id)
    }
}
