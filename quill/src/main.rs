use std::sync::Arc;

use log::info;
use quill::config::Config;
use quill::{CreateBlog, CreateComment, CreateUser, SocialService, SystemClock};

// Seeds a few users and posts, then prints the feed of the first user
fn main() -> anyhow::Result<()>
{
    let config = Config::from_env();
    env_logger::Builder::new().parse_filters(&config.log_filter).init();

    let service = SocialService::new(Arc::new(SystemClock));

    if !config.seed_demo
    {
        info!("Seeding disabled, nothing to show");
        return Ok(());
    }

    let reader = service.create_user(CreateUser { name: String::from("Reader"), email: String::from("reader@example.com") });
    let writer = service.create_user(CreateUser { name: String::from("Writer"), email: String::from("writer@example.com") });

    let first = service.create_blog(CreateBlog { title: String::from("Hello"), content: String::from("My very first post."), author_id: writer.id });
    service.create_blog(CreateBlog { title: String::from("Again"), content: String::from("Another post from me."), author_id: writer.id });
    service.create_blog(CreateBlog { title: String::from("Unseen"), content: String::from("Nobody follows this one."), author_id: reader.id });

    service.follow_author(reader.id, writer.id);
    service.add_comment(CreateComment { content: String::from("Welcome!"), blog_id: first.id, user_id: reader.id })?;
    service.like_blog(first.id)?;

    info!("{} follows {:?}", reader.name, service.get_following(reader.id));
    for blog in service.get_feed(reader.id)
    {
        println!("{} ({}) - {} likes, {} comments", blog.title, blog.created_at, blog.likes, blog.comments.len());
    }

    Ok(())
}
