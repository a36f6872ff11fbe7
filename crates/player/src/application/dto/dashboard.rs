use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tianfa_domain::{ActiveModes, GameMode, Inquisitor, Villain, WorldState};

/// A status-bar message that disappears on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub text: String,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub const TTL_SECS: i64 = 3;

    pub fn new(text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            expires_at: now + Duration::seconds(Self::TTL_SECS),
        }
    }

    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// What a pending deletion points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum DeleteTarget {
    Title(usize),
    Item(usize),
    Villain(String),
}

impl DeleteTarget {
    /// Noun used in notices.
    pub fn kind_label(&self) -> &'static str {
        match self {
            DeleteTarget::Title(_) => "称号",
            DeleteTarget::Item(_) => "物品",
            DeleteTarget::Villain(_) => "反派",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingDelete {
    pub target: DeleteTarget,
    pub label: String,
}

/// The single action awaiting confirmation. Mode and delete confirmations
/// are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PendingAction {
    Mode(GameMode),
    Delete(PendingDelete),
}

/// Everything a view needs to render the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub world: WorldState,
    pub inquisitor: Inquisitor,
    pub villains: Vec<Villain>,
    pub modes: ActiveModes,
    pub selected_villain: Option<Villain>,
    pub pending: Option<PendingAction>,
    pub notice: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_notice_expires_after_three_seconds() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let notice = Notice::new("hi", now);
        assert!(notice.is_visible_at(now + Duration::milliseconds(2999)));
        assert!(!notice.is_visible_at(now + Duration::seconds(3)));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(DeleteTarget::Title(0).kind_label(), "称号");
        assert_eq!(DeleteTarget::Item(0).kind_label(), "物品");
        assert_eq!(DeleteTarget::Villain("v1".into()).kind_label(), "反派");
    }
}
