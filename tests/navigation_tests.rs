mod support;

use crossterm::event::KeyCode;
use support::{char_key, ctrl, key, signed_in, signed_in_with_tasks, type_text};
use taskdesk_tui::app::{handle_key, update, AppState, LoginField, Screen, TaskField};
use taskdesk_tui::effects::Effect;
use taskdesk_tui::event::AppEvent;
use taskdesk_tui::model::{
    AccessToken, ChatMessage, ChatSessionId, ChatTranscript, MessageId, SenderType, StatusFilter,
    Task, TaskId,
};

fn three_tasks() -> AppState {
    signed_in_with_tasks(vec![
        Task::new(1, "Write report", "quarterly"),
        Task::new(2, "Buy milk", "").with_completed(true),
        Task::new(3, "Call plumber", "kitchen sink"),
    ])
}

// ============================================================================
// Login screen
// ============================================================================

#[test]
fn typing_fills_focused_login_field() {
    let mut state = AppState::new();
    type_text(&mut state, "alice");
    handle_key(&mut state, key(KeyCode::Tab));
    type_text(&mut state, "pw");

    assert_eq!(state.login.username.value(), "alice");
    assert_eq!(state.login.password.value(), "pw");
    assert_eq!(state.login.focus, LoginField::Password);
}

#[test]
fn q_is_text_on_login_screen() {
    let mut state = AppState::new();
    handle_key(&mut state, char_key('q'));
    assert!(!state.should_quit);
    assert_eq!(state.login.username.value(), "q");
}

#[test]
fn enter_submits_login() {
    let mut state = AppState::new();
    type_text(&mut state, "alice");
    handle_key(&mut state, key(KeyCode::Tab));
    type_text(&mut state, "password1");

    let effects = handle_key(&mut state, key(KeyCode::Enter));
    assert!(matches!(
        effects.as_slice(),
        [Effect::Login { credentials, .. }] if credentials.username == "alice"
    ));
    assert!(state.session.is_validating());
}

#[test]
fn ctrl_r_switches_to_register_mode() {
    let mut state = AppState::new();
    handle_key(&mut state, ctrl('r'));
    assert!(state.login.register);

    type_text(&mut state, "bob");
    handle_key(&mut state, key(KeyCode::Tab));
    type_text(&mut state, "password1");
    handle_key(&mut state, key(KeyCode::Tab));
    type_text(&mut state, "password1");

    let effects = handle_key(&mut state, key(KeyCode::Enter));
    assert!(matches!(effects.as_slice(), [Effect::Register { .. }]));
}

#[test]
fn ctrl_c_quits_from_anywhere() {
    let mut state = AppState::new();
    handle_key(&mut state, ctrl('c'));
    assert!(state.should_quit);

    let (mut state, _) = signed_in();
    state.chat_focused = true;
    state.screen = Screen::Chat;
    handle_key(&mut state, ctrl('c'));
    assert!(state.should_quit);
}

// ============================================================================
// Global keys
// ============================================================================

#[test]
fn number_keys_switch_screens() {
    let (mut state, _) = signed_in();
    handle_key(&mut state, char_key('2'));
    assert_eq!(state.screen, Screen::Chat);
    handle_key(&mut state, char_key('1'));
    assert_eq!(state.screen, Screen::Tasks);
}

#[test]
fn q_quits_when_signed_in() {
    let (mut state, _) = signed_in();
    handle_key(&mut state, char_key('q'));
    assert!(state.should_quit);
}

#[test]
fn help_overlay_swallows_next_key() {
    let (mut state, _) = signed_in();
    handle_key(&mut state, char_key('?'));
    assert!(state.show_help);

    handle_key(&mut state, char_key('q'));
    assert!(!state.show_help);
    assert!(!state.should_quit);
}

#[test]
fn logout_key_ends_session() {
    let mut state = three_tasks();
    let effects = handle_key(&mut state, char_key('L'));

    assert!(!state.session.is_authenticated());
    assert!(state.tasks.tasks().is_empty());
    assert!(effects.contains(&Effect::ClearToken));
    assert!(effects.contains(&Effect::DisconnectNotifications));
}

#[test]
fn notification_popup_dismissed_by_any_key() {
    let (mut state, _) = signed_in();
    let now = state.now;
    state.notifications.push("Task due".into(), now);

    handle_key(&mut state, char_key('q'));
    assert!(state.notifications.is_empty());
    assert!(!state.should_quit);
}

// ============================================================================
// Tasks screen
// ============================================================================

#[test]
fn j_k_move_selection_within_bounds() {
    let mut state = three_tasks();
    handle_key(&mut state, char_key('k'));
    assert_eq!(state.selected_task, 0);

    for _ in 0..5 {
        handle_key(&mut state, char_key('j'));
    }
    assert_eq!(state.selected_task, 2);
}

#[test]
fn space_toggles_selected_task() {
    let mut state = three_tasks();
    handle_key(&mut state, key(KeyCode::Down));

    let effects = handle_key(&mut state, char_key(' '));
    match effects.as_slice() {
        [Effect::UpdateTask { id, changes, .. }] => {
            assert_eq!(*id, TaskId::new(2));
            assert!(!changes.completed);
            assert_eq!(changes.title, "Buy milk");
        }
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn delete_requires_confirmation() {
    let mut state = three_tasks();

    let effects = handle_key(&mut state, char_key('d'));
    assert!(effects.is_empty());
    assert_eq!(state.confirm_delete, Some(TaskId::new(1)));

    let effects = handle_key(&mut state, char_key('y'));
    assert!(matches!(effects.as_slice(), [Effect::DeleteTask { id, .. }] if *id == TaskId::new(1)));
    assert!(state.confirm_delete.is_none());
}

#[test]
fn other_key_cancels_delete() {
    let mut state = three_tasks();
    handle_key(&mut state, char_key('d'));
    let effects = handle_key(&mut state, char_key('n'));

    assert!(effects.is_empty());
    assert!(state.confirm_delete.is_none());
    assert!(state.task_form.is_none());
}

#[test]
fn f_cycles_status_filter() {
    let mut state = three_tasks();
    handle_key(&mut state, char_key('f'));
    assert_eq!(state.tasks.filter(), StatusFilter::Pending);
    assert_eq!(state.tasks.visible().len(), 2);

    handle_key(&mut state, char_key('f'));
    assert_eq!(state.tasks.filter(), StatusFilter::Completed);
    assert_eq!(state.tasks.visible().len(), 1);
}

#[test]
fn search_filters_live_and_esc_clears() {
    let mut state = three_tasks();
    handle_key(&mut state, char_key('/'));
    assert!(state.searching);

    type_text(&mut state, "sink");
    assert_eq!(state.tasks.visible().len(), 1);
    assert_eq!(state.tasks.visible()[0].title, "Call plumber");

    handle_key(&mut state, key(KeyCode::Esc));
    assert!(!state.searching);
    assert_eq!(state.tasks.visible().len(), 3);
}

#[test]
fn search_swallows_global_keys() {
    let mut state = three_tasks();
    handle_key(&mut state, char_key('/'));
    handle_key(&mut state, char_key('q'));

    assert!(!state.should_quit);
    assert_eq!(state.tasks.search(), "q");
}

#[test]
fn r_refreshes_tasks() {
    let mut state = three_tasks();
    let effects = handle_key(&mut state, char_key('r'));
    assert!(matches!(effects.as_slice(), [Effect::RefreshTasks { .. }]));
}

// ============================================================================
// Task form
// ============================================================================

#[test]
fn new_task_form_submits_create() {
    let mut state = three_tasks();
    handle_key(&mut state, char_key('n'));
    assert!(state.task_form.is_some());

    type_text(&mut state, "Plant tomatoes");
    let effects = handle_key(&mut state, key(KeyCode::Enter));

    match effects.as_slice() {
        [Effect::CreateTask { task, .. }] => {
            assert_eq!(task.title, "Plant tomatoes");
            assert_eq!(task.deadline, None);
        }
        other => panic!("expected create, got {:?}", other),
    }
}

#[test]
fn blank_title_stays_local() {
    let mut state = three_tasks();
    handle_key(&mut state, char_key('n'));
    let effects = handle_key(&mut state, key(KeyCode::Enter));

    assert!(effects.is_empty());
    assert!(state.task_form.is_some());
    assert!(state.tasks.error().is_some());
}

#[test]
fn edit_form_prefills_and_toggles_completed() {
    let mut state = three_tasks();
    handle_key(&mut state, char_key('e'));

    let form = state.task_form.as_ref().unwrap();
    assert!(form.is_edit());
    assert_eq!(form.title.value(), "Write report");

    // Title -> Description -> Deadline -> Completed
    for _ in 0..3 {
        handle_key(&mut state, key(KeyCode::Tab));
    }
    assert_eq!(state.task_form.as_ref().unwrap().focus, TaskField::Completed);
    handle_key(&mut state, char_key(' '));

    let effects = handle_key(&mut state, key(KeyCode::Enter));
    match effects.as_slice() {
        [Effect::UpdateTask { id, changes, .. }] => {
            assert_eq!(*id, TaskId::new(1));
            assert!(changes.completed);
            assert_eq!(changes.description, "quarterly");
        }
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn esc_closes_task_form() {
    let mut state = three_tasks();
    handle_key(&mut state, char_key('n'));
    handle_key(&mut state, key(KeyCode::Esc));
    assert!(state.task_form.is_none());
}

// ============================================================================
// Chat screen
// ============================================================================

#[test]
fn chat_input_sends_and_clears() {
    let (mut state, _) = signed_in();
    handle_key(&mut state, char_key('2'));
    handle_key(&mut state, char_key('i'));
    assert!(state.chat_focused);

    type_text(&mut state, "hello");
    let effects = handle_key(&mut state, key(KeyCode::Enter));

    assert!(matches!(
        effects.as_slice(),
        [Effect::SendChatMessage { request, .. }] if request.content == "hello" && request.session_id.is_none()
    ));
    assert!(state.chat_input.is_empty());
    assert!(state.chat.is_typing());
}

#[test]
fn enter_while_reply_pending_sends_nothing() {
    let (mut state, _) = signed_in();
    state.screen = Screen::Chat;
    state.chat_focused = true;

    type_text(&mut state, "one");
    handle_key(&mut state, key(KeyCode::Enter));
    type_text(&mut state, "two");
    let effects = handle_key(&mut state, key(KeyCode::Enter));

    assert!(effects.is_empty());
    assert_eq!(state.chat_input.value(), "two");
}

/// Signed in on the chat screen with a `count`-message transcript loaded.
fn chat_with_transcript(count: usize) -> AppState {
    let (mut state, _) = signed_in();
    state.screen = Screen::Chat;
    let now = state.now;
    let seq = match state.chat.send_message(&AccessToken::new("tok"), "hello", now).as_slice() {
        [Effect::SendChatMessage { seq, .. }] => *seq,
        other => panic!("expected send, got {:?}", other),
    };
    let messages = (0..count)
        .map(|i| ChatMessage::new(MessageId::server(i.to_string()), "line", SenderType::Agent, now))
        .collect();
    update(
        &mut state,
        AppEvent::ChatReplied {
            seq,
            result: Ok(ChatTranscript {
                session_id: ChatSessionId::new("s-1"),
                messages,
            }),
        },
    );
    state
}

#[test]
fn chat_scroll_keys() {
    let mut state = chat_with_transcript(20);

    handle_key(&mut state, key(KeyCode::PageUp));
    assert_eq!(state.chat_scroll, 10);
    handle_key(&mut state, char_key('j'));
    assert_eq!(state.chat_scroll, 9);
    handle_key(&mut state, key(KeyCode::PageDown));
    assert_eq!(state.chat_scroll, 0);
}

#[test]
fn chat_scroll_stops_at_top_of_transcript() {
    // Three lines per single-line message
    let mut state = chat_with_transcript(4);
    assert_eq!(state.max_chat_scroll(), 12);

    for _ in 0..50 {
        handle_key(&mut state, char_key('k'));
    }
    assert_eq!(state.chat_scroll, 12);

    handle_key(&mut state, char_key('j'));
    assert_eq!(state.chat_scroll, 11);
}

#[test]
fn empty_chat_does_not_scroll() {
    let (mut state, _) = signed_in();
    state.screen = Screen::Chat;
    handle_key(&mut state, key(KeyCode::PageUp));
    assert_eq!(state.chat_scroll, 0);
}

#[test]
fn send_during_history_reload_keeps_input() {
    let mut state = chat_with_transcript(1);
    handle_key(&mut state, ctrl('r'));
    assert!(state.chat.is_loading_history());

    state.chat_focused = true;
    type_text(&mut state, "important text");
    assert!(handle_key(&mut state, key(KeyCode::Enter)).is_empty());
    assert_eq!(state.chat_input.value(), "important text");
}

#[test]
fn ctrl_n_starts_new_conversation() {
    let (mut state, _) = signed_in();
    state.screen = Screen::Chat;
    state.chat_focused = true;
    type_text(&mut state, "hi");
    handle_key(&mut state, key(KeyCode::Enter));
    handle_key(&mut state, key(KeyCode::Esc));

    handle_key(&mut state, ctrl('n'));
    assert!(state.chat.messages().is_empty());
    assert!(!state.chat.is_typing());
}

// ============================================================================
// Profile popup
// ============================================================================

#[test]
fn profile_popup_submits_update() {
    let (mut state, _) = signed_in();
    handle_key(&mut state, char_key('p'));
    assert!(state.profile_form.is_some());

    type_text(&mut state, "alicia");
    let effects = handle_key(&mut state, key(KeyCode::Enter));
    assert!(matches!(
        effects.as_slice(),
        [Effect::UpdateProfile { update, .. }] if update.username.as_deref() == Some("alicia")
    ));
}

#[test]
fn account_deletion_needs_y() {
    let (mut state, _) = signed_in();
    handle_key(&mut state, char_key('p'));

    assert!(handle_key(&mut state, ctrl('d')).is_empty());
    assert!(state.profile_form.as_ref().unwrap().confirm_delete);

    let effects = handle_key(&mut state, char_key('y'));
    assert!(matches!(effects.as_slice(), [Effect::DeleteAccount { .. }]));
}
