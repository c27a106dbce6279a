//! Debate roles and their fixed profiles.
//!
//! Everything role-specific — display identity and system instruction — lives
//! in one lookup here, so the orchestrator and the terminal shell never
//! branch on "is this the positive side" themselves.

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// The three fixed dialogue participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Positive,
    Negative,
    Judge,
}

/// Display descriptor for a role: how its turns are labelled and rendered.
#[derive(Debug, Clone, Copy)]
pub struct RoleProfile {
    /// Transcript label, also the prefix of persisted history entries.
    pub label: &'static str,
    /// Terminal icon shown before each turn.
    pub icon: &'static str,
    /// Terminal color for streamed output.
    pub color: Color,
}

const POSITIVE_PROFILE: RoleProfile = RoleProfile {
    label: "Positive",
    icon: "🔵",
    color: Color::Blue,
};

const NEGATIVE_PROFILE: RoleProfile = RoleProfile {
    label: "Negative",
    icon: "🔴",
    color: Color::Red,
};

const JUDGE_PROFILE: RoleProfile = RoleProfile {
    label: "Judge",
    icon: "⚖️",
    color: Color::Magenta,
};

/// Fixed user-content request for the very first Positive turn, which has no
/// accumulated context to respond to yet.
pub const OPENING_REQUEST: &str =
    "Deliver a short, forceful opening statement on this topic.";

impl Role {
    /// Static profile lookup.
    pub fn profile(self) -> &'static RoleProfile {
        match self {
            Role::Positive => &POSITIVE_PROFILE,
            Role::Negative => &NEGATIVE_PROFILE,
            Role::Judge => &JUDGE_PROFILE,
        }
    }

    /// Transcript label for this role.
    pub fn label(self) -> &'static str {
        self.profile().label
    }

    /// Build the role's system instruction for a debate on `topic`.
    pub fn instruction(self, topic: &str) -> String {
        match self {
            Role::Positive => format!(
                "You are a supporter of this topic. Based on the topic '{topic}', \
                 argue briefly and forcefully in favor of it, responding to the other \
                 side's challenges. Requirements:\n\
                 1. Be concise\n\
                 2. Make your claims explicit\n\
                 3. Ground your response in the opponent's prior point"
            ),
            Role::Negative => format!(
                "You are an opponent of this topic. Based on the topic '{topic}', \
                 argue briefly and forcefully against it, responding to the other \
                 side's case. Requirements:\n\
                 1. Be concise\n\
                 2. Make your claims explicit\n\
                 3. Ground your response in the opponent's prior point"
            ),
            Role::Judge => format!(
                "You are a professional, impartial debate judge. Analyze and judge \
                 the following debate on '{topic}'. Requirements:\n\
                 1. Assess the validity and logic of each side's arguments\n\
                 2. Evaluate each side's rhetorical skill and performance\n\
                 3. Point out each side's strengths and weaknesses\n\
                 4. Deliver a final verdict with your rationale"
            ),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_embed_topic() {
        for role in [Role::Positive, Role::Negative, Role::Judge] {
            assert!(role.instruction("cats are liquid").contains("cats are liquid"));
        }
    }

    #[test]
    fn labels_are_distinct() {
        assert_ne!(Role::Positive.label(), Role::Negative.label());
        assert_ne!(Role::Negative.label(), Role::Judge.label());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Positive).unwrap(), "\"positive\"");
    }
}
