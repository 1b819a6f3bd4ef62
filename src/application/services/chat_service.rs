//! Chat Service
//!
//! Orchestrates one companion conversation turn: persist the user's message,
//! obtain a completion from the language model, persist the reply, and fold
//! the exchange into the rolling conversation state.

use std::sync::Arc;

use bson::oid::ObjectId;

use crate::domain::{
    ChatMessage, ChatMessageRepository, ConversationState, ConversationStateRepository,
    MessageRole,
};
use crate::infrastructure::cache::ConversationCache;
use crate::infrastructure::llm::CompletionClient;
use crate::shared::crypto::MessageCipher;
use crate::shared::error::AppError;

/// Persona instruction for every completion request.
const COMPANION_PERSONA: &str = "You are Kairos, a warm and supportive mental wellness \
companion. Listen carefully, validate feelings, and offer gentle, practical guidance. \
You are not a medical professional and you never give diagnoses.";

/// Chat service over the conversation repositories and completion client.
pub struct ChatService<M, S, C>
where
    M: ChatMessageRepository,
    S: ConversationStateRepository,
    C: CompletionClient,
{
    messages: Arc<M>,
    states: Arc<S>,
    completion: Arc<C>,
    cache: ConversationCache,
    cipher: MessageCipher,
}

impl<M, S, C> ChatService<M, S, C>
where
    M: ChatMessageRepository,
    S: ConversationStateRepository,
    C: CompletionClient,
{
    /// Create a new ChatService
    pub fn new(
        messages: Arc<M>,
        states: Arc<S>,
        completion: Arc<C>,
        cache: ConversationCache,
        cipher: MessageCipher,
    ) -> Self {
        Self {
            messages,
            states,
            completion,
            cache,
            cipher,
        }
    }

    /// Run one conversation turn and return the assistant's reply.
    ///
    /// The user's message is persisted before the completion call, so a
    /// model failure never loses what the user wrote; the assistant turn and
    /// state update happen only after a successful completion.
    pub async fn send_message(
        &self,
        user_id: ObjectId,
        text: &str,
    ) -> Result<ChatMessage, AppError> {
        let user_turn = ChatMessage::new(user_id, MessageRole::User, self.cipher.encrypt(text));
        self.messages.insert(&user_turn).await?;

        let summary = match self.cache.get_summary(user_id).await {
            Some(summary) => summary,
            None => self
                .states
                .find_by_user(user_id)
                .await?
                .map(|state| state.summary)
                .unwrap_or_default(),
        };

        let reply_text = self
            .completion
            .complete(&system_prompt(&summary), text)
            .await?;

        let mut assistant_turn =
            ChatMessage::new(user_id, MessageRole::Assistant, self.cipher.encrypt(&reply_text));
        assistant_turn.id = Some(self.messages.insert(&assistant_turn).await?);

        let mut state = self
            .states
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| ConversationState::empty(user_id));
        state.record_exchange(text, &reply_text);
        self.states.upsert(&state).await?;
        self.cache.put_summary(user_id, &state.summary).await;

        assistant_turn.content = reply_text;
        Ok(assistant_turn)
    }

    /// Return the user's conversation history, decrypted, oldest first.
    pub async fn history(&self, user_id: ObjectId) -> Result<Vec<ChatMessage>, AppError> {
        let mut messages = self.messages.list_for_user(user_id).await?;
        for message in &mut messages {
            message.content = self
                .cipher
                .decrypt(&message.content)
                .map_err(|e| AppError::Internal(format!("stored message unreadable: {e}")))?;
        }
        Ok(messages)
    }
}

/// Build the system prompt for a completion request.
fn system_prompt(summary: &str) -> String {
    if summary.is_empty() {
        COMPANION_PERSONA.to_string()
    } else {
        format!("{}\n\nConversation so far:\n{}", COMPANION_PERSONA, summary)
    }
}
