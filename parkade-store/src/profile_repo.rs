use chrono::{DateTime, Utc};
use parkade_core::{KvStore, KvWrite, ProfileId, StoreError};
use parkade_shared::{Notification, ParkingSpace, Ticket};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

pub mod keys {
    use parkade_core::ProfileId;

    pub const SPACES: &str = "catalog:spaces";
    pub const PROFILES: &str = "profiles:index";

    pub fn tickets(profile: &ProfileId) -> String {
        format!("profile:{}:tickets", profile)
    }

    pub fn notifications(profile: &ProfileId) -> String {
        format!("profile:{}:notifications", profile)
    }

    pub fn premium_flag(profile: &ProfileId) -> String {
        format!("profile:{}:isPremiumMember", profile)
    }

    pub fn premium_since(profile: &ProfileId) -> String {
        format!("profile:{}:premiumSince", profile)
    }
}

/// Persisted membership state of one profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipRecord {
    pub is_premium_member: bool,
    pub premium_since: Option<DateTime<Utc>>,
}

/// Typed access to the per-profile keys and the shared space catalog.
///
/// Read-modify-write sequences must hold [`ProfileRepository::lock`] for their
/// whole duration and stage every write in one [`UnitOfWork`].
#[derive(Clone)]
pub struct ProfileRepository {
    kv: Arc<dyn KvStore>,
    write_lock: Arc<Mutex<()>>,
}

impl ProfileRepository {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub fn begin(&self) -> UnitOfWork {
        UnitOfWork {
            kv: self.kv.clone(),
            writes: Vec::new(),
        }
    }

    pub async fn tickets(&self, profile: &ProfileId) -> Result<Vec<Ticket>, StoreError> {
        Ok(self.load_json(&keys::tickets(profile)).await?.unwrap_or_default())
    }

    pub async fn notifications(&self, profile: &ProfileId) -> Result<Vec<Notification>, StoreError> {
        Ok(self.load_json(&keys::notifications(profile)).await?.unwrap_or_default())
    }

    /// `None` when the catalog has never been written
    pub async fn spaces(&self) -> Result<Option<Vec<ParkingSpace>>, StoreError> {
        self.load_json(keys::SPACES).await
    }

    pub async fn profiles(&self) -> Result<Vec<ProfileId>, StoreError> {
        Ok(self.load_json(keys::PROFILES).await?.unwrap_or_default())
    }

    pub async fn membership(&self, profile: &ProfileId) -> Result<MembershipRecord, StoreError> {
        // Anything other than the literal "true" means not a member
        let is_premium_member = self.kv.get(&keys::premium_flag(profile)).await?.as_deref() == Some("true");

        let since_key = keys::premium_since(profile);
        let premium_since = match self.kv.get(&since_key).await? {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| StoreError::Corrupt { key: since_key.clone(), reason: e.to_string() })?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        Ok(MembershipRecord { is_premium_member, premium_since })
    }

    async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.kv.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt { key: key.to_string(), reason: e.to_string() }),
            None => Ok(None),
        }
    }
}

/// Writes staged by one user action, committed together or not at all
pub struct UnitOfWork {
    kv: Arc<dyn KvStore>,
    writes: Vec<KvWrite>,
}

impl UnitOfWork {
    pub fn put_tickets(&mut self, profile: &ProfileId, tickets: &[Ticket]) -> Result<(), StoreError> {
        self.put_json(keys::tickets(profile), &tickets)
    }

    pub fn put_notifications(&mut self, profile: &ProfileId, notifications: &[Notification]) -> Result<(), StoreError> {
        self.put_json(keys::notifications(profile), &notifications)
    }

    pub fn put_spaces(&mut self, spaces: &[ParkingSpace]) -> Result<(), StoreError> {
        self.put_json(keys::SPACES.to_string(), &spaces)
    }

    pub fn put_profiles(&mut self, profiles: &[ProfileId]) -> Result<(), StoreError> {
        self.put_json(keys::PROFILES.to_string(), &profiles)
    }

    pub fn put_membership(&mut self, profile: &ProfileId, record: &MembershipRecord) {
        let flag = if record.is_premium_member { "true" } else { "false" };
        self.writes.push(KvWrite::set(keys::premium_flag(profile), flag));

        match record.premium_since {
            Some(since) => self.writes.push(KvWrite::set(keys::premium_since(profile), since.to_rfc3339())),
            None => self.writes.push(KvWrite::delete(keys::premium_since(profile))),
        }
    }

    pub fn pending(&self) -> &[KvWrite] {
        &self.writes
    }

    pub async fn commit(self) -> Result<(), StoreError> {
        if self.writes.is_empty() {
            return Ok(());
        }
        self.kv.commit(self.writes).await
    }

    fn put_json<T: Serialize + ?Sized>(&mut self, key: String, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StoreError::Encode { key: key.clone(), reason: e.to_string() })?;
        self.writes.push(KvWrite::Set { key, value: json });
        Ok(())
    }
}
