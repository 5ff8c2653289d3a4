use strum::{Display, EnumIter, EnumString};

/// Cluster health as reported in `status` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum ClusterStatus {
    Red = 0,
    Yellow = 1,
    Green = 2,
}

impl ClusterStatus {
    #[must_use]
    pub const fn ordinal(self) -> i64 {
        self as i64
    }

    /// Look up a label; unknown labels and non-exact casing yield `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

/// Shard lifecycle as reported in `state` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ShardState {
    Created = 0,
    Recovering = 1,
    Started = 2,
    Relocated = 3,
    Closed = 4,
}

impl ShardState {
    #[must_use]
    pub const fn ordinal(self) -> i64 {
        self as i64
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_cluster_status_ordinals() {
        assert_eq!(ClusterStatus::from_label("red").map(ClusterStatus::ordinal), Some(0));
        assert_eq!(ClusterStatus::from_label("yellow").map(ClusterStatus::ordinal), Some(1));
        assert_eq!(ClusterStatus::from_label("green").map(ClusterStatus::ordinal), Some(2));
    }

    #[test]
    fn test_cluster_status_is_case_sensitive() {
        assert_eq!(ClusterStatus::from_label("GREEN"), None);
        assert_eq!(ClusterStatus::from_label("unknown"), None);
    }

    #[test]
    fn test_shard_state_ordinals() {
        let ordinals: Vec<_> = ShardState::iter().map(|s| (s.to_string(), s.ordinal())).collect();
        assert_eq!(
            ordinals,
            vec![
                ("CREATED".to_string(), 0),
                ("RECOVERING".to_string(), 1),
                ("STARTED".to_string(), 2),
                ("RELOCATED".to_string(), 3),
                ("CLOSED".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_shard_state_labels_round_trip() {
        for state in ShardState::iter() {
            assert_eq!(ShardState::from_label(&state.to_string()), Some(state));
        }
        assert_eq!(ShardState::from_label("started"), None);
    }
}
