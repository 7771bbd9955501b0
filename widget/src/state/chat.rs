#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// CSS class list applied to the message node.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::User => "chat-msg user",
            Self::Bot => "chat-msg bot",
        }
    }
}

/// Lifecycle of a bot reply. User messages are created `Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageStatus {
    Pending,
    Streaming,
    Done,
    Failed,
}

/// A single rendered message. Lives only as long as the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub status: MessageStatus,
}

impl Message {
    pub fn user(id: u64, text: &str) -> Self {
        Self { id, role: Role::User, text: text.to_owned(), status: MessageStatus::Done }
    }

    /// A bot reply awaiting its first chunk.
    pub fn pending_bot(id: u64) -> Self {
        Self { id, role: Role::Bot, text: String::new(), status: MessageStatus::Pending }
    }

    pub fn push_chunk(&mut self, chunk: &str) {
        self.text.push_str(chunk);
        self.status = MessageStatus::Streaming;
    }

    pub fn finish(&mut self) {
        self.status = MessageStatus::Done;
    }

    /// Replace whatever streamed so far with `error_text`.
    pub fn fail(&mut self, error_text: &str) {
        error_text.clone_into(&mut self.text);
        self.status = MessageStatus::Failed;
    }
}

/// Per-page chat bookkeeping: message ids and the in-flight guard.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    next_id: u64,
    in_flight: bool,
}

impl ChatState {
    /// Allocate the next display-order id.
    pub fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Claim the exchange slot. Returns `false` if one is already running.
    pub fn begin_exchange(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn end_exchange(&mut self) {
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}
