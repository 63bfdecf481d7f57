// Personalized feed: posts of followed authors, newest first.

use std::collections::HashSet;

use log::trace;

use crate::blogs::blog_views;
use crate::follows::following_of;
use crate::records::Blog;
use crate::schema::UserId;
use crate::service::SocialService;

impl SocialService
{
    // Blogs written by authors the user follows, by `created_at` descending.
    // Blogs created at the same instant are ordered newest identifier first.
    pub fn get_feed(&self, user_id: UserId) -> Vec<Blog>
    {
        let db = self.db();
        let following: HashSet<UserId> = following_of(&db, user_id).into_iter().collect();

        let mut feed = blog_views(&db, db.blogs.iter().filter(|b| following.contains(&b.author_id)));
        feed.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        trace!("Feed of user {} has {} blogs from {} authors", user_id, feed.len(), following.len());
        feed
    }
}

#[cfg(test)]
mod tests
{
    use crate::records::CreateComment;
    use crate::service::test_support::*;

    #[test]
    fn feed_contains_followed_authors_newest_first()
    {
        let (service, clock) = create_service();
        let b1 = post_at(&service, &clock, 1, 5, "B1");
        let b2 = post_at(&service, &clock, 3, 5, "B2");
        post_at(&service, &clock, 2, 7, "B3");

        service.follow_author(42, 5);

        let ids: Vec<_> = service.get_feed(42).iter().map(|b| b.id).collect();
        assert_eq!(vec![b2.id, b1.id], ids);
    }

    #[test]
    fn feed_orders_by_creation_time_not_identifier()
    {
        let (service, clock) = create_service();
        let late = post_at(&service, &clock, 50, 1, "Late");
        let early = post_at(&service, &clock, 10, 2, "Early");

        service.follow_author(9, 2);
        service.follow_author(9, 1);

        let ids: Vec<_> = service.get_feed(9).iter().map(|b| b.id).collect();
        assert_eq!(vec![late.id, early.id], ids);
    }

    #[test]
    fn simultaneous_posts_list_newer_identifier_first()
    {
        let (service, clock) = create_service();
        let first = post_at(&service, &clock, 5, 1, "First");
        let second = post_at(&service, &clock, 5, 1, "Second");
        service.follow_author(2, 1);

        let ids: Vec<_> = service.get_feed(2).iter().map(|b| b.id).collect();
        assert_eq!(vec![second.id, first.id], ids);
    }

    #[test]
    fn empty_feeds_are_not_errors()
    {
        let (service, _) = create_service();
        assert!(service.get_feed(1).is_empty());

        service.follow_author(1, 3);
        assert!(service.get_feed(1).is_empty());

        post(&service, 3, "Now there is one");
        service.unfollow_author(1, 3);
        assert!(service.get_feed(1).is_empty());
    }

    #[test]
    fn feed_entries_carry_their_comments()
    {
        let (service, _) = create_service();
        let blog = post(&service, 3, "Discussed");
        let comment = service.add_comment(CreateComment { content: String::from("+1"), blog_id: blog.id, user_id: 1 }).unwrap();
        service.follow_author(1, 3);

        assert_eq!(vec![comment], service.get_feed(1)[0].comments);
    }
}
