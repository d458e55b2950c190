use serde::{Deserialize, Serialize};

/// Verdict of the pre-submission checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub eligible: bool,
    pub reason: String,
}

impl Eligibility {
    pub(crate) fn ineligible(reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            reason: reason.into(),
        }
    }

    pub(crate) fn eligible(is_private: bool) -> Self {
        let mut reason = String::from("eligible for transfer");
        if is_private {
            reason.push_str(
                " (note: private repository features depend on the destination account's plan)",
            );
        }
        Self {
            eligible: true,
            reason,
        }
    }
}
