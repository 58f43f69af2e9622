//! The content store: every record the site and admin panel read or edit.
//!
//! [`ContentStore`] owns four collections (page content, chatbot config,
//! admin users and the admin session flag). It loads them from a
//! [`Storage`] backend once, serves reads from memory, and writes the
//! whole affected collection back after every mutation.
//!
//! Lookups by id or email that find nothing are not errors: updates and
//! deletes report `false` and leave everything untouched.

pub mod seed;
pub mod storage;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use noievoi_core::{
    AdminUser, AdminUserUpdate, ChatbotConfig, ChatbotQuestion, ContentId, ContentItem, Email,
    Page, PageView, PasswordHash, QuestionId,
};

use crate::services::auth::{AuthError, hash_password, matches_any};

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, keys};

/// Errors from content store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A collection could not be serialized.
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A password could not be hashed.
    #[error("credential error: {0}")]
    Auth(#[from] AuthError),

    /// Deleting would leave no admin able to log in.
    #[error("cannot delete the last admin user")]
    LastAdmin,
}

/// Admin record as found in storage.
///
/// Older data kept a plaintext `password`; it is hashed on load.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAdmin {
    email: Email,
    #[serde(default)]
    password_hash: Option<PasswordHash>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Outcome of reading one key at startup.
enum Loaded<T> {
    Stored(T),
    Missing,
    Malformed,
}

/// In-memory owner of all site data, persisted through a [`Storage`].
pub struct ContentStore {
    storage: Box<dyn Storage>,
    content: Vec<ContentItem>,
    chatbot: ChatbotConfig,
    admins: Vec<AdminUser>,
    authenticated: bool,
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("content", &self.content.len())
            .field("questions", &self.chatbot.questions.len())
            .field("admins", &self.admins.len())
            .field("authenticated", &self.authenticated)
            .finish_non_exhaustive()
    }
}

impl ContentStore {
    /// Load every collection from `storage`.
    ///
    /// A missing key is filled from the seed dataset and written back. A
    /// malformed value is replaced by seed data in memory only, logged at
    /// warn, and overwritten by the next mutation of that collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend cannot be read or the
    /// seeded data cannot be written.
    pub fn open(storage: Box<dyn Storage>) -> Result<Self, StoreError> {
        let mut store = Self {
            storage,
            content: Vec::new(),
            chatbot: seed::chatbot_config(),
            admins: Vec::new(),
            authenticated: false,
        };

        match store.load_content()? {
            Loaded::Stored(items) => store.content = items,
            Loaded::Missing => {
                store.content = seed::content();
                store.persist_content()?;
            }
            Loaded::Malformed => store.content = seed::content(),
        }

        match read_key::<ChatbotConfig>(store.storage.as_ref(), keys::CHATBOT_CONFIG)? {
            Loaded::Stored(config) => store.chatbot = config,
            Loaded::Missing => store.persist_chatbot()?,
            Loaded::Malformed => {}
        }

        store.load_admins()?;

        store.authenticated = store
            .storage
            .get(keys::ADMIN_AUTH)?
            .is_some_and(|raw| raw.trim() == "true");

        tracing::info!(?store, "content store loaded");
        Ok(store)
    }

    /// Replace every collection with the seed dataset and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing the seed password or writing fails.
    pub fn reset_to_seed(&mut self) -> Result<(), StoreError> {
        self.content = seed::content();
        self.chatbot = seed::chatbot_config();
        self.admins = seed::admin_users()?;
        self.authenticated = false;

        self.persist_content()?;
        self.persist_chatbot()?;
        self.persist_admins()?;
        self.persist_auth()?;
        tracing::info!("store reset to seed data");
        Ok(())
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Check a credential pair and, on success, set the session flag.
    ///
    /// The email must match exactly. A failed attempt leaves the flag as it
    /// was.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the flag cannot be persisted.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool, StoreError> {
        let matched = matches_any(password, &self.password_hashes(email));
        if matched {
            self.mark_authenticated()?;
        }
        Ok(matched)
    }

    /// Stored hashes of every admin with `email`, for verifying a login
    /// outside the store lock.
    #[must_use]
    pub fn password_hashes(&self, email: &str) -> Vec<PasswordHash> {
        self.admins
            .iter()
            .filter(|admin| admin.email.as_str() == email)
            .map(|admin| admin.password_hash.clone())
            .collect()
    }

    /// Set the session flag after credentials were checked elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the flag cannot be persisted.
    pub fn mark_authenticated(&mut self) -> Result<(), StoreError> {
        self.authenticated = true;
        self.persist_auth()
    }

    /// Clear the session flag.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the flag cannot be persisted.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.authenticated = false;
        self.persist_auth()
    }

    /// The persisted session flag.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// All content, in insertion order.
    #[must_use]
    pub fn list_content(&self) -> &[ContentItem] {
        &self.content
    }

    /// The content shown on `page`.
    #[must_use]
    pub fn page_view(&self, page: Page) -> PageView<'_> {
        PageView::new(&self.content, page)
    }

    /// Look up a content item by id.
    #[must_use]
    pub fn content_item(&self, id: &ContentId) -> Option<&ContentItem> {
        self.content.iter().find(|item| &item.id == id)
    }

    /// Append an item and return its id.
    ///
    /// An empty id becomes `<type>-<millis>`; an id already in use gets a
    /// `-<n>` suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted; the item is
    /// still added in memory.
    pub fn add_content(&mut self, mut item: ContentItem) -> Result<ContentId, StoreError> {
        let base = if item.id.is_empty() {
            ContentId::generated(item.kind().as_str(), now_millis())
        } else {
            item.id.clone()
        };
        item.id = ContentId::new(unique_id(base.as_str(), |candidate| {
            self.content.iter().any(|i| i.id.as_str() == candidate)
        }));

        let id = item.id.clone();
        self.content.push(item);
        tracing::info!(%id, "content added");
        self.persist_content()?;
        Ok(id)
    }

    /// Replace the item with the same id. Returns `false` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn update_content(&mut self, item: ContentItem) -> Result<bool, StoreError> {
        let Some(slot) = self.content.iter_mut().find(|i| i.id == item.id) else {
            return Ok(false);
        };
        tracing::info!(id = %item.id, "content updated");
        *slot = item;
        self.persist_content()?;
        Ok(true)
    }

    /// Remove the item with `id`. Returns `false` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn delete_content(&mut self, id: &ContentId) -> Result<bool, StoreError> {
        let before = self.content.len();
        self.content.retain(|item| &item.id != id);
        if self.content.len() == before {
            return Ok(false);
        }
        tracing::info!(%id, "content deleted");
        self.persist_content()?;
        Ok(true)
    }

    // =========================================================================
    // Chatbot
    // =========================================================================

    /// The chatbot configuration.
    #[must_use]
    pub const fn chatbot_config(&self) -> &ChatbotConfig {
        &self.chatbot
    }

    /// Replace the whole chatbot configuration.
    ///
    /// Questions without an id are assigned one.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be persisted.
    pub fn update_chatbot_config(&mut self, mut config: ChatbotConfig) -> Result<(), StoreError> {
        let questions = std::mem::take(&mut config.questions);
        self.chatbot = config;
        for question in questions {
            let id = self.fresh_question_id(&question.id);
            self.chatbot.questions.push(ChatbotQuestion { id, ..question });
        }
        tracing::info!(enabled = self.chatbot.enabled, "chatbot config updated");
        self.persist_chatbot()
    }

    /// Append a question and return its id (`q-<millis>` when empty). An id
    /// already in use gets a `-<n>` suffix.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be persisted.
    pub fn add_chatbot_question(
        &mut self,
        question: ChatbotQuestion,
    ) -> Result<QuestionId, StoreError> {
        let id = self.fresh_question_id(&question.id);
        self.chatbot.questions.push(ChatbotQuestion {
            id: id.clone(),
            ..question
        });
        tracing::info!(%id, "chatbot question added");
        self.persist_chatbot()?;
        Ok(id)
    }

    /// Replace the question with the same id. Returns `false` when there is
    /// none.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be persisted.
    pub fn update_chatbot_question(
        &mut self,
        question: ChatbotQuestion,
    ) -> Result<bool, StoreError> {
        let Some(slot) = self
            .chatbot
            .questions
            .iter_mut()
            .find(|q| q.id == question.id)
        else {
            return Ok(false);
        };
        tracing::info!(id = %question.id, "chatbot question updated");
        *slot = question;
        self.persist_chatbot()?;
        Ok(true)
    }

    /// Remove the question with `id`. Returns `false` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be persisted.
    pub fn delete_chatbot_question(&mut self, id: &QuestionId) -> Result<bool, StoreError> {
        let before = self.chatbot.questions.len();
        self.chatbot.questions.retain(|q| &q.id != id);
        if self.chatbot.questions.len() == before {
            return Ok(false);
        }
        tracing::info!(%id, "chatbot question deleted");
        self.persist_chatbot()?;
        Ok(true)
    }

    fn fresh_question_id(&self, requested: &QuestionId) -> QuestionId {
        let base = if requested.is_empty() {
            QuestionId::generated("q", now_millis())
        } else {
            requested.clone()
        };
        QuestionId::new(unique_id(base.as_str(), |candidate| {
            self.chatbot
                .questions
                .iter()
                .any(|q| q.id.as_str() == candidate)
        }))
    }

    // =========================================================================
    // Admin users
    // =========================================================================

    /// All admin accounts.
    #[must_use]
    pub fn admin_users(&self) -> &[AdminUser] {
        &self.admins
    }

    /// The first admin whose email matches exactly.
    #[must_use]
    pub fn find_admin_user(&self, email: &str) -> Option<&AdminUser> {
        self.admins.iter().find(|admin| admin.email.as_str() == email)
    }

    /// Append an admin. Duplicate emails are not rejected here.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn add_admin_user(&mut self, user: AdminUser) -> Result<(), StoreError> {
        tracing::info!(email = %user.email, "admin user added");
        self.admins.push(user);
        self.persist_admins()
    }

    /// Merge `update` into every admin with `email`. Returns `false` when
    /// there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn update_admin_user(
        &mut self,
        email: &str,
        update: &AdminUserUpdate,
    ) -> Result<bool, StoreError> {
        let mut found = false;
        for admin in self.admins.iter_mut().filter(|a| a.email.as_str() == email) {
            update.clone().apply_to(admin);
            found = true;
        }
        if !found {
            return Ok(false);
        }
        tracing::info!(email, "admin user updated");
        self.persist_admins()?;
        Ok(true)
    }

    /// Remove every admin with `email`. Returns `false` when there is none.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LastAdmin`, changing nothing, while only one
    /// admin exists (whichever email is given) or when every remaining
    /// admin carries `email`.
    pub fn delete_admin_user(&mut self, email: &str) -> Result<bool, StoreError> {
        let remaining = self
            .admins
            .iter()
            .filter(|admin| admin.email.as_str() != email)
            .count();
        if self.admins.len() <= 1 || remaining == 0 {
            return Err(StoreError::LastAdmin);
        }
        if remaining == self.admins.len() {
            return Ok(false);
        }
        self.admins.retain(|admin| admin.email.as_str() != email);
        tracing::info!(email, "admin user deleted");
        self.persist_admins()?;
        Ok(true)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Read stored content, skipping individual records that do not parse.
    fn load_content(&self) -> Result<Loaded<Vec<ContentItem>>, StoreError> {
        let raw = match read_key::<Vec<serde_json::Value>>(self.storage.as_ref(), keys::CONTENT)? {
            Loaded::Stored(raw) => raw,
            Loaded::Missing => return Ok(Loaded::Missing),
            Loaded::Malformed => return Ok(Loaded::Malformed),
        };

        let items = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable content item");
                    None
                }
            })
            .collect();
        Ok(Loaded::Stored(items))
    }

    /// Read admins, hashing legacy plaintext passwords and rewriting them.
    fn load_admins(&mut self) -> Result<(), StoreError> {
        let stored = match read_key::<Vec<StoredAdmin>>(self.storage.as_ref(), keys::ADMIN_USERS)? {
            Loaded::Stored(stored) => stored,
            Loaded::Missing => {
                self.admins = seed::admin_users()?;
                return self.persist_admins();
            }
            Loaded::Malformed => {
                self.admins = seed::admin_users()?;
                return Ok(());
            }
        };

        let mut rewrite = false;
        for record in stored {
            let password_hash = match (record.password_hash, record.password) {
                (Some(hash), _) => hash,
                (None, Some(plain)) => {
                    rewrite = true;
                    hash_password(&plain)?
                }
                (None, None) => {
                    tracing::warn!(email = %record.email, "dropping admin without credential");
                    rewrite = true;
                    continue;
                }
            };
            self.admins.push(AdminUser {
                email: record.email,
                password_hash,
                name: record.name,
            });
        }

        if self.admins.is_empty() {
            tracing::warn!("no usable admin users stored, restoring seed admin");
            self.admins = seed::admin_users()?;
            rewrite = true;
        }
        if rewrite {
            tracing::info!("rewriting admin users with hashed credentials");
            self.persist_admins()?;
        }
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
        self.storage.set(key, &json)?;
        Ok(())
    }

    fn persist_content(&self) -> Result<(), StoreError> {
        self.persist(keys::CONTENT, &self.content)
    }

    fn persist_chatbot(&self) -> Result<(), StoreError> {
        self.persist(keys::CHATBOT_CONFIG, &self.chatbot)
    }

    fn persist_admins(&self) -> Result<(), StoreError> {
        self.persist(keys::ADMIN_USERS, &self.admins)
    }

    fn persist_auth(&self) -> Result<(), StoreError> {
        let flag = if self.authenticated { "true" } else { "false" };
        self.storage.set(keys::ADMIN_AUTH, flag)?;
        Ok(())
    }
}

fn read_key<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &'static str,
) -> Result<Loaded<T>, StoreError> {
    let Some(raw) = storage.get(key)? else {
        tracing::info!(key, "nothing stored, using seed data");
        return Ok(Loaded::Missing);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Loaded::Stored(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is malformed, using seed data");
            Ok(Loaded::Malformed)
        }
    }
}

/// `base` if `taken` rejects it, otherwise the first free `base-<n>`.
fn unique_id(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_owned();
    }
    let mut n: u32 = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
