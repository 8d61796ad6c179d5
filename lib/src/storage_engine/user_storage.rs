// lib/src/storage_engine/user_storage.rs

use sled::Transactional;
use tracing::info;

use models::errors::{HostelError, HostelResult};
use models::hostel::{normalize_email, AccountStatus, User, UserUpdate};

use super::collection::not_found;
use super::filters::UserFilter;
use super::sled_storage::HostelStore;
use super::storage_utils::{abort, claim_unique, finish, release_unique, tx_get, tx_put, tx_take};

const EMAIL: &str = "email";

impl HostelStore {
    /// Adds an account whose password is already hashed. Emails are unique.
    pub fn add_user(&self, user: User) -> HostelResult<User> {
        finish((self.users.tree(), &self.user_emails).transaction(|(users, emails)| {
            claim_unique(emails, &user.email, &user.id, EMAIL)?;
            tx_put(users, &user.id, &user)
        }))?;
        info!("Added user {} as {:?}", user.email, user.role);
        Ok(user)
    }

    pub fn get_user(&self, id: &str) -> HostelResult<User> {
        self.users.require(id)
    }

    pub fn get_user_by_email(&self, email: &str) -> HostelResult<Option<User>> {
        let email = match normalize_email(email) {
            Ok(email) => email,
            Err(_) => return Ok(None),
        };
        match self.user_emails.get(email.as_bytes())? {
            Some(id) => self.users.get(&String::from_utf8_lossy(&id)),
            None => Ok(None),
        }
    }

    pub fn has_users(&self) -> bool {
        !self.users.is_empty()
    }

    pub fn list_users(&self, filter: &UserFilter) -> HostelResult<Vec<User>> {
        let mut users: Vec<User> = self.users.list()?.into_iter().filter(|u| filter.matches(u)).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    /// Applies an edit; `password_hash` replaces the stored hash when present.
    /// `acting_user_id` cannot disable itself or give up its admin role.
    pub fn update_user(
        &self,
        id: &str,
        update: UserUpdate,
        password_hash: Option<String>,
        acting_user_id: &str,
    ) -> HostelResult<User> {
        if id == acting_user_id {
            if update.status == Some(AccountStatus::Disabled) {
                return Err(HostelError::conflict("you cannot disable your own account"));
            }
            if update.role.is_some_and(|role| !role.is_admin()) {
                return Err(HostelError::conflict("you cannot remove your own admin role"));
            }
        }
        finish((self.users.tree(), &self.user_emails).transaction(|(users, emails)| {
            let mut user: User = match tx_get(users, id)? {
                Some(user) => user,
                None => return abort(not_found::<User>(id)),
            };
            let previous_email = user.email.clone();
            if let Err(e) = user.apply_update(update.clone(), password_hash.clone()) {
                return abort(e);
            }
            if user.email != previous_email {
                claim_unique(emails, &user.email, &user.id, EMAIL)?;
                release_unique(emails, &previous_email)?;
            }
            tx_put(users, &user.id, &user)?;
            Ok(user)
        }))
    }

    /// Deletes an account. `acting_user_id` cannot delete itself.
    pub fn delete_user(&self, id: &str, acting_user_id: &str) -> HostelResult<User> {
        if id == acting_user_id {
            return Err(HostelError::conflict("you cannot delete your own account"));
        }
        let user = finish((self.users.tree(), &self.user_emails).transaction(|(users, emails)| {
            let user: User = match tx_take(users, id)? {
                Some(user) => user,
                None => return abort(not_found::<User>(id)),
            };
            release_unique(emails, &user.email)?;
            Ok(user)
        }))?;
        info!("Deleted user {}", user.email);
        Ok(user)
    }
}
