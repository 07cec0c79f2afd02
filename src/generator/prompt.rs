//! Prompt construction for commit message generation.

use serde::{Deserialize, Serialize};

use crate::message::CommitType;

/// Maximum subject length requested from the model.
pub const MAX_SUBJECT_LENGTH: usize = 50;

/// Language the generated description is written in unless configured.
pub const DEFAULT_LANGUAGE: &str = "English";

/// A role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Build the fixed system instruction.
///
/// Lists the accepted commit types, the subject format, the length ceiling,
/// and the output language.
pub fn system_prompt(language: &str) -> String {
    let types: String = CommitType::ALL
        .iter()
        .map(|t| format!("- {}: {}", t.as_str(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an assistant that writes Git commit messages. Based on the Git diff provided by the user, write one commit message that follows the Conventional Commits format.

Format:
<type>(<scope>): <description>

Allowed types:
{types}

Rules:
1. Keep the message concise, no more than {MAX_SUBJECT_LENGTH} characters
2. Write the description in {language}
3. Follow the format above exactly

Reply with the commit message only, without any explanation or other content."#
    )
}

/// Build the message list sent to the model: the system instruction, then
/// the diff verbatim as the user message.
pub fn build_messages(diff: &str, language: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(language)),
        ChatMessage::user(diff),
    ]
}
