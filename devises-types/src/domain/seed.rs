use serde::{Deserialize, Serialize};

/// Progress of the one-time population of the local store.
///
/// `NotChecked -> Checking -> {Populating -> Populated | AlreadyPopulated}`.
/// Any failure along the way lands in `Failed`. There is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SeedState {
    #[default]
    NotChecked,
    Checking,
    Populating,
    Populated,
    AlreadyPopulated,
    Failed,
}

impl SeedState {
    /// True once seeding has settled and will not run again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Populated | Self::AlreadyPopulated | Self::Failed
        )
    }
}

impl AsRef<str> for SeedState {
    fn as_ref(&self) -> &str {
        match self {
            Self::NotChecked => "NOT_CHECKED",
            Self::Checking => "CHECKING",
            Self::Populating => "POPULATING",
            Self::Populated => "POPULATED",
            Self::AlreadyPopulated => "ALREADY_POPULATED",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for SeedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!SeedState::NotChecked.is_terminal());
        assert!(!SeedState::Checking.is_terminal());
        assert!(!SeedState::Populating.is_terminal());
        assert!(SeedState::Populated.is_terminal());
        assert!(SeedState::AlreadyPopulated.is_terminal());
        assert!(SeedState::Failed.is_terminal());
    }
}
