//! Patient accounts persisted as one JSON list, plus the explicit session
//! that replaces an ambient "current user".

use chrono::{DateTime, Utc};
use log::{info, warn};
use mediscout_core::{MediscoutError, Registration, SubmittedHealthRecord, UserAccount};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::KeyValueStore;

pub const USERS_KEY: &str = "mediscout_users";
pub const CURRENT_USER_KEY: &str = "mediscout_currentUser";

/// Who is logged in for the current request or page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<UserAccount>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn require_user(&self) -> Result<&UserAccount, MediscoutError> {
        self.user.as_ref().ok_or(MediscoutError::NotLoggedIn)
    }
}

pub struct AccountStore<S> {
    store: S,
}

impl<S: KeyValueStore> AccountStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// All registered accounts. A corrupted list reads as empty; writers go
    /// through `load_users` instead.
    pub fn users(&self) -> Vec<UserAccount> {
        read_json(&self.store, USERS_KEY).unwrap_or_default()
    }

    /// Session persisted by the last login or registration, if readable.
    pub fn restore_session(&mut self) -> Session {
        match self.store.get(CURRENT_USER_KEY) {
            None => Session::anonymous(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(user) => Session { user: Some(user) },
                Err(err) => {
                    warn!("dropping unreadable session: {err}");
                    if let Err(err) = self.store.remove(CURRENT_USER_KEY) {
                        warn!("could not clear session: {err}");
                    }
                    Session::anonymous()
                }
            },
        }
    }

    /// Creates an account and logs it in. Duplicate usernames are rejected
    /// without touching the store.
    pub fn register(
        &mut self,
        session: &mut Session,
        registration: Registration,
        now: DateTime<Utc>,
    ) -> Result<UserAccount, MediscoutError> {
        let mut users = self.load_users()?;
        if users
            .iter()
            .any(|user| user.username == registration.username)
        {
            return Err(MediscoutError::UsernameTaken);
        }

        let id = unique_user_id(&users, now);
        let account = registration.into_account(id);
        users.push(account.clone());
        write_json(&mut self.store, USERS_KEY, &users)?;
        self.start_session(session, account.clone())?;
        info!("registered {}", account.username);
        Ok(account)
    }

    /// Logs in with exact username and password. The error does not say
    /// which of the two was wrong.
    pub fn login(
        &mut self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<UserAccount, MediscoutError> {
        let account = self
            .users()
            .into_iter()
            .find(|user| user.username == username && user.password == password)
            .ok_or(MediscoutError::InvalidCredentials)?;
        self.start_session(session, account.clone())?;
        info!("{} logged in", account.username);
        Ok(account)
    }

    pub fn logout(&mut self, session: &mut Session) -> Result<(), MediscoutError> {
        session.user = None;
        self.store.remove(CURRENT_USER_KEY)
    }

    /// Appends `record` to the account's history. When that account is the
    /// session user, the session copy is refreshed too.
    pub fn append_health_record(
        &mut self,
        session: &mut Session,
        user_id: &str,
        record: SubmittedHealthRecord,
    ) -> Result<UserAccount, MediscoutError> {
        let mut users = self.load_users()?;
        let account = users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(|| MediscoutError::AccountNotFound(user_id.to_string()))?;
        account.health_records.push(record);
        let updated = account.clone();
        write_json(&mut self.store, USERS_KEY, &users)?;

        if session.current_user().is_some_and(|user| user.id == user_id) {
            self.start_session(session, updated.clone())?;
        }
        Ok(updated)
    }

    /// Users list for read-modify-write. An unreadable list is an error and
    /// stays in the store untouched.
    fn load_users(&self) -> Result<Vec<UserAccount>, MediscoutError> {
        let Some(raw) = self.store.get(USERS_KEY) else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|err| {
            MediscoutError::Storage(format!("unreadable account list under {USERS_KEY}: {err}"))
        })
    }

    fn start_session(
        &mut self,
        session: &mut Session,
        account: UserAccount,
    ) -> Result<(), MediscoutError> {
        write_json(&mut self.store, CURRENT_USER_KEY, &account)?;
        session.user = Some(account);
        Ok(())
    }
}

fn unique_user_id(users: &[UserAccount], now: DateTime<Utc>) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let id = format!("user_{millis}");
        if users.iter().all(|user| user.id != id) {
            return id;
        }
        millis += 1;
    }
}

fn read_json<T: DeserializeOwned, S: KeyValueStore>(store: &S, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("ignoring unreadable value under {key}: {err}");
            None
        }
    }
}

fn write_json<T: Serialize + ?Sized, S: KeyValueStore>(
    store: &mut S,
    key: &str,
    value: &T,
) -> Result<(), MediscoutError> {
    let serialized =
        serde_json::to_string(value).map_err(|err| MediscoutError::Serialization(err.to_string()))?;
    store.set(key, serialized)
}
