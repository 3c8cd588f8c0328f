//! Reply policy for structured intents nobody handles
//!
//! Some deployments prefer the bot to stay quiet when the extractor names an
//! intent outside the known set; others prefer an explicit reply. Both are
//! supported and the choice is configuration, not code.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownIntentPolicy {
    /// Produce no reply and no mutation
    Silent,
    /// Reply with the "didn't understand that intent" text
    #[default]
    Reply,
}

impl UnknownIntentPolicy {
    pub fn replies(&self) -> bool {
        matches!(self, UnknownIntentPolicy::Reply)
    }
}
