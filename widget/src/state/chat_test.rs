use super::*;

// =============================================================
// Message
// =============================================================

#[test]
fn role_class_names() {
    assert_eq!(Role::User.class_name(), "chat-msg user");
    assert_eq!(Role::Bot.class_name(), "chat-msg bot");
}

#[test]
fn bot_message_accumulates_chunks() {
    let mut msg = Message::pending_bot(2);
    assert_eq!(msg.status, MessageStatus::Pending);
    msg.push_chunk("Hi");
    msg.push_chunk(" there");
    assert_eq!(msg.status, MessageStatus::Streaming);
    msg.finish();
    assert_eq!(msg.text, "Hi there");
    assert_eq!(msg.status, MessageStatus::Done);
}

#[test]
fn fail_replaces_partial_text() {
    let mut msg = Message::pending_bot(1);
    msg.push_chunk("half an ans");
    msg.fail("Sorry");
    assert_eq!(msg.text, "Sorry");
    assert_eq!(msg.status, MessageStatus::Failed);
}

#[test]
fn user_message_is_done() {
    let msg = Message::user(1, "hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.status, MessageStatus::Done);
}

// =============================================================
// ChatState
// =============================================================

#[test]
fn ids_increase() {
    let mut state = ChatState::default();
    assert_eq!(state.next_id(), 1);
    assert_eq!(state.next_id(), 2);
}

#[test]
fn second_exchange_is_refused_until_first_ends() {
    let mut state = ChatState::default();
    assert!(state.begin_exchange());
    assert!(!state.begin_exchange());
    assert!(state.in_flight());
    state.end_exchange();
    assert!(state.begin_exchange());
}
