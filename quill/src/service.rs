use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLockReadGuard};

use chrono::{DateTime, Utc};
use quilldb::prelude::*;

use crate::clock::{Clock, SystemClock};
use crate::commands::SocialCommands;
use crate::schema::SocialDatabase;

// Blogs, comments, likes, follows, feeds and users in one in-memory database.
//
// Queries share a read lock. Commands are serialized through the command engine and each runs in
// its own transaction, so a failing command leaves no partial change behind.
// The operations are implemented next to their component in `blogs`, `comments`, `likes`,
// `follows`, `feed` and `users`.
pub struct SocialService
{
    query_engine: QueryEngine<SocialDatabase>,
    command_engine_mutex: Mutex<CommandEngine<SocialDatabase, SocialCommands>>,
    clock: Arc<dyn Clock>
}

impl Default for SocialService
{
    fn default() -> Self
    {
        Self::new(Arc::new(SystemClock))
    }
}

impl SocialService
{
    pub fn new(clock: Arc<dyn Clock>) -> Self
    {
        let (query_engine, command_engine) = Engine::new(SocialCommands::new(), |_: &mut SocialDatabase| {});
        Self { query_engine, command_engine_mutex: Mutex::new(command_engine), clock }
    }

    // Status of the most recent command
    pub fn last_transaction_status(&self) -> TransactionStatus
    {
        let command_engine = self.lock_command_engine();
        command_engine.get_transaction_status(command_engine.get_last_transaction_id())
    }

    pub(crate) fn db(&self) -> RwLockReadGuard<'_, SocialDatabase>
    {
        self.query_engine.get_db()
    }

    // The clock is read while holding the command engine, so timestamps follow identifier order
    pub(crate) fn execute<Cmd, F>(&self, build: F) -> Result<Cmd::Output, Cmd::Error>
        where Cmd: CommandBase<SocialDatabase>, F: FnOnce(&SocialCommands, DateTime<Utc>) -> Cmd
    {
        let mut command_engine = self.lock_command_engine();
        let command_definitions = command_engine.get_command_definitions();
        let command = build(&command_definitions, self.clock.now());
        command_engine.push_command(&command)
    }

    fn lock_command_engine(&self) -> MutexGuard<'_, CommandEngine<SocialDatabase, SocialCommands>>
    {
        self.command_engine_mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
pub(crate) mod test_support
{
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::clock::ManualClock;
    use crate::records::{Blog, CreateBlog};
    use crate::schema::UserId;
    use super::SocialService;

    pub(crate) fn epoch() -> DateTime<Utc>
    {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    pub(crate) fn create_service() -> (SocialService, Arc<ManualClock>)
    {
        let clock = Arc::new(ManualClock::new(epoch()));
        (SocialService::new(clock.clone()), clock)
    }

    pub(crate) fn post(service: &SocialService, author_id: UserId, title: &str) -> Blog
    {
        service.create_blog(CreateBlog { title: title.to_string(), content: String::from("Some content for the post"), author_id })
    }

    // Creates a post at `epoch + seconds`
    pub(crate) fn post_at(service: &SocialService, clock: &ManualClock, seconds: i64, author_id: UserId, title: &str) -> Blog
    {
        clock.set(epoch() + Duration::seconds(seconds));
        post(service, author_id, title)
    }
}
