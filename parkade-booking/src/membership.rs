use chrono::{DateTime, Duration, Utc};
use parkade_catalog::format_eur;
use parkade_core::ProfileId;
use parkade_shared::Notification;
use parkade_store::{MembershipRecord, ProfileRepository};
use serde::Serialize;
use tracing::{info, warn};

use crate::{notices, BookingError};

const BENEFITS: [&str; 6] = [
    "Unlimited parking access",
    "Reserved premium spots",
    "Priority customer support",
    "Flexible cancellation",
    "Monthly billing",
    "Special event parking",
];

/// The flat-rate premium offer
#[derive(Debug, Clone, Serialize)]
pub struct MembershipPlan {
    pub monthly_price_cents: i64,
    pub price_display: String,
    pub term_days: i64,
    pub benefits: Vec<String>,
}

impl MembershipPlan {
    pub fn monthly(price_cents: i64, term_days: i64) -> Self {
        Self {
            monthly_price_cents: price_cents,
            price_display: format_eur(price_cents),
            term_days,
            benefits: BENEFITS.iter().map(|b| b.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipStatus {
    pub is_premium_member: bool,
    pub premium_since: Option<DateTime<Utc>>,
    /// Anchored at subscription time, not at the time of the read
    pub valid_until: Option<DateTime<Utc>>,
    pub plan: MembershipPlan,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipChange {
    pub status: MembershipStatus,
    pub notification: Notification,
}

pub struct MembershipService {
    repo: ProfileRepository,
    plan: MembershipPlan,
}

impl MembershipService {
    pub fn new(repo: ProfileRepository, plan: MembershipPlan) -> Self {
        Self { repo, plan }
    }

    pub async fn status(&self, profile: &ProfileId) -> Result<MembershipStatus, BookingError> {
        let record = self.repo.membership(profile).await?;
        Ok(self.to_status(&record))
    }

    pub async fn subscribe(&self, profile: &ProfileId, now: DateTime<Utc>) -> Result<MembershipChange, BookingError> {
        let _guard = self.repo.lock().await;

        if self.repo.membership(profile).await?.is_premium_member {
            warn!("Subscribe refused for {}: already a member", profile);
            return Err(BookingError::AlreadyMember);
        }

        let record = MembershipRecord {
            is_premium_member: true,
            premium_since: Some(now),
        };
        let notification = notices::premium_welcome(now);
        self.persist(profile, &record, &notification).await?;

        info!("Premium membership started for {}", profile);
        Ok(MembershipChange { status: self.to_status(&record), notification })
    }

    pub async fn cancel(&self, profile: &ProfileId, now: DateTime<Utc>) -> Result<MembershipChange, BookingError> {
        let _guard = self.repo.lock().await;

        if !self.repo.membership(profile).await?.is_premium_member {
            warn!("Membership cancel refused for {}: not a member", profile);
            return Err(BookingError::NotMember);
        }

        let record = MembershipRecord::default();
        let notification = notices::premium_cancelled(now);
        self.persist(profile, &record, &notification).await?;

        info!("Premium membership cancelled for {}", profile);
        Ok(MembershipChange { status: self.to_status(&record), notification })
    }

    async fn persist(
        &self,
        profile: &ProfileId,
        record: &MembershipRecord,
        notification: &Notification,
    ) -> Result<(), BookingError> {
        let mut notifications = self.repo.notifications(profile).await?;
        notifications.push(notification.clone());

        let mut uow = self.repo.begin();
        uow.put_membership(profile, record);
        uow.put_notifications(profile, &notifications)?;
        uow.commit().await?;
        Ok(())
    }

    fn to_status(&self, record: &MembershipRecord) -> MembershipStatus {
        let valid_until = match (record.is_premium_member, record.premium_since) {
            (true, Some(since)) => Some(since + Duration::days(self.plan.term_days)),
            _ => None,
        };

        MembershipStatus {
            is_premium_member: record.is_premium_member,
            premium_since: record.premium_since,
            valid_until,
            plan: self.plan.clone(),
        }
    }
}
