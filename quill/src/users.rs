// User registry. Blog authors and commenters are not checked against it.

use std::convert::Infallible;

use crate::commands::{Keyed, SocialCommands};
use crate::error::{Error, Result};
use crate::records::{CreateUser, User, UserPatch};
use crate::schema::{SocialDatabase, UserId, UserRecord};
use crate::service::SocialService;

impl SocialCommands
{
    pub(crate) fn create_user(db: &mut SocialDatabase, user: &CreateUser) -> std::result::Result<User, Infallible>
    {
        let id = db.users.add(UserRecord { name: user.name.clone(), email: user.email.clone() });
        Ok(User { id, name: user.name.clone(), email: user.email.clone() })
    }

    pub(crate) fn update_user(db: &mut SocialDatabase, parameters: &Keyed<UserPatch>) -> Result<User>
    {
        let user = db.users.get_mut(parameters.id).ok_or(Error::user_not_found(parameters.id))?;
        parameters.value.apply_to(user);
        Ok(User::from(&*user))
    }

    pub(crate) fn remove_user(db: &mut SocialDatabase, id: &UserId) -> Result<()>
    {
        if db.users.remove(*id) { Ok(()) } else { Err(Error::user_not_found(*id)) }
    }
}

impl SocialService
{
    pub fn create_user(&self, user: CreateUser) -> User
    {
        self.execute(|commands, _| commands.create_user.create(user))
            .unwrap_or_else(|never| match never {})
    }

    pub fn find_all_users(&self) -> Vec<User>
    {
        self.db().users.iter().map(User::from).collect()
    }

    pub fn find_user(&self, id: UserId) -> Result<User>
    {
        self.db().users.get(id).map(User::from).ok_or(Error::user_not_found(id))
    }

    pub fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User>
    {
        self.execute(|commands, _| commands.update_user.create(Keyed { id, value: patch }))
    }

    pub fn remove_user(&self, id: UserId) -> Result<()>
    {
        self.execute(|commands, _| commands.remove_user.create(id))
    }
}

#[cfg(test)]
mod tests
{
    use crate::error::Error;
    use crate::records::{CreateUser, UserPatch};
    use crate::service::test_support::*;

    fn ada() -> CreateUser
    {
        CreateUser { name: String::from("Ada"), email: String::from("ada@example.com") }
    }

    #[test]
    fn users_have_their_own_identity_space()
    {
        let (service, _) = create_service();
        post(&service, 1, "Blog first");

        let user = service.create_user(ada());

        assert_eq!(1, user.id);
        assert_eq!(vec![user.clone()], service.find_all_users());
        assert_eq!(Ok(user), service.find_user(1));
    }

    #[test]
    fn update_changes_only_given_fields()
    {
        let (service, _) = create_service();
        let user = service.create_user(ada());

        let updated = service.update_user(user.id, UserPatch { email: Some(String::from("ada@lovelace.dev")), ..UserPatch::default() }).unwrap();

        assert_eq!("Ada", updated.name);
        assert_eq!("ada@lovelace.dev", updated.email);
    }

    #[test]
    fn removed_users_are_not_found_and_blogs_are_untouched()
    {
        let (service, _) = create_service();
        let user = service.create_user(ada());
        let blog = post(&service, user.id, "Orphaned");

        service.remove_user(user.id).unwrap();

        assert_eq!(Err(Error::user_not_found(user.id)), service.find_user(user.id));
        assert_eq!(Err(Error::user_not_found(user.id)), service.remove_user(user.id));
        assert_eq!(Err(Error::user_not_found(user.id)), service.update_user(user.id, UserPatch::default()));
        assert_eq!(user.id, service.find_one(blog.id).unwrap().author_id);
    }
}
