use std::fmt;

use serde::Serialize;

// Kind of entity an identifier was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind
{
    Blog,
    User
}

impl fmt::Display for EntityKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            EntityKind::Blog => write!(f, "Blog"),
            EntityKind::User => write!(f, "User")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error
{
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: EntityKind, id: usize }
}

impl Error
{
    pub fn blog_not_found(id: usize) -> Self
    {
        Error::NotFound { kind: EntityKind::Blog, id }
    }

    pub fn user_not_found(id: usize) -> Self
    {
        Error::NotFound { kind: EntityKind::User, id }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn not_found_names_kind_and_id()
    {
        assert_eq!("Blog with ID 7 not found", Error::blog_not_found(7).to_string());
        assert_eq!("User with ID 2 not found", Error::user_not_found(2).to_string());
    }
}
