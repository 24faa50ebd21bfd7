use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::forms::{ProfileForm, TaskField, TaskForm};
use crate::app::update::logout;
use crate::app::{AppState, Screen};
use crate::effects::Effect;

/// Lines moved by PageUp / PageDown in the transcript.
const PAGE_JUMP: isize = 10;

/// Key handling. Modal layers are checked top-down: whatever is drawn on
/// top gets the key.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    if is_ctrl(&key, 'c') {
        state.should_quit = true;
        return Vec::new();
    }

    if !state.notifications.is_empty() {
        state.notifications.dismiss();
        return Vec::new();
    }

    if state.show_help {
        state.show_help = false;
        return Vec::new();
    }

    if !state.session.is_authenticated() {
        return handle_login_key(state, key);
    }

    if let Some(id) = state.confirm_delete.take() {
        if key.code == KeyCode::Char('y') {
            if let Some(token) = state.session.token().cloned() {
                return state.tasks.delete(&token, id);
            }
        }
        return Vec::new();
    }

    if state.profile_form.is_some() {
        return handle_profile_key(state, key);
    }

    if state.task_form.is_some() {
        return handle_task_form_key(state, key);
    }

    if state.searching {
        handle_search_key(state, key);
        return Vec::new();
    }

    if state.screen == Screen::Chat && state.chat_focused {
        return handle_chat_input_key(state, key);
    }

    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            Vec::new()
        }
        KeyCode::Char('?') => {
            state.show_help = true;
            Vec::new()
        }
        KeyCode::Char('1') => {
            state.screen = Screen::Tasks;
            Vec::new()
        }
        KeyCode::Char('2') => {
            state.screen = Screen::Chat;
            Vec::new()
        }
        KeyCode::Char('p') => {
            state.profile_form = Some(ProfileForm::default());
            Vec::new()
        }
        KeyCode::Char('L') => logout(state),
        KeyCode::Char('x') => {
            dismiss_errors(state);
            Vec::new()
        }
        _ => match state.screen {
            Screen::Tasks => handle_tasks_key(state, key),
            Screen::Chat => handle_chat_key(state, key),
        },
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn dismiss_errors(state: &mut AppState) {
    state.tasks.dismiss_error();
    state.chat.dismiss_error();
    state.session.dismiss_error();
    state.errors.clear();
}

fn handle_login_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    if is_ctrl(&key, 'r') {
        state.login.toggle_mode();
        state.session.dismiss_error();
        return Vec::new();
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            state.login.next_field();
            Vec::new()
        }
        KeyCode::Esc => {
            state.session.dismiss_error();
            Vec::new()
        }
        KeyCode::Enter => {
            let form = &state.login;
            if form.register {
                state.session.register(
                    form.username.value(),
                    form.password.value(),
                    form.confirmation.value(),
                )
            } else {
                state.session.login(form.username.value(), form.password.value())
            }
        }
        KeyCode::Backspace => {
            state.login.focused_mut().pop();
            Vec::new()
        }
        KeyCode::Char(c) => {
            state.login.focused_mut().push(c);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_tasks_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    let Some(token) = state.session.token().cloned() else {
        return Vec::new();
    };

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let len = state.tasks.visible().len();
            if len > 0 {
                state.selected_task = (state.selected_task + 1).min(len - 1);
            }
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.selected_task = state.selected_task.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Char('/') => {
            state.searching = true;
            Vec::new()
        }
        KeyCode::Char('f') => {
            let next = state.tasks.filter().next();
            state.tasks.set_filter(next);
            state.clamp_selection();
            Vec::new()
        }
        KeyCode::Char('n') => {
            state.task_form = Some(TaskForm::create());
            Vec::new()
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            let form = state
                .selected_task_id()
                .and_then(|id| state.tasks.get(id))
                .map(TaskForm::edit);
            if form.is_some() {
                state.task_form = form;
            }
            Vec::new()
        }
        KeyCode::Char(' ') => match state.selected_task_id() {
            Some(id) => state.tasks.toggle_completed(&token, id),
            None => Vec::new(),
        },
        KeyCode::Char('d') => {
            state.confirm_delete = state.selected_task_id();
            Vec::new()
        }
        KeyCode::Char('r') => state.tasks.refresh(&token),
        _ => Vec::new(),
    }
}

/// Search is applied live; Enter keeps it, Esc drops it.
fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.tasks.set_search("");
            state.searching = false;
        }
        KeyCode::Enter => state.searching = false,
        KeyCode::Backspace => {
            let mut search = state.tasks.search().to_string();
            search.pop();
            state.tasks.set_search(search);
        }
        KeyCode::Char(c) => {
            let search = format!("{}{}", state.tasks.search(), c);
            state.tasks.set_search(search);
        }
        _ => {}
    }
    state.clamp_selection();
}

fn handle_task_form_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    let Some(form) = state.task_form.as_mut() else {
        return Vec::new();
    };

    match key.code {
        KeyCode::Esc => {
            state.task_form = None;
            state.tasks.dismiss_error();
            Vec::new()
        }
        KeyCode::Tab | KeyCode::BackTab => {
            form.next_field();
            Vec::new()
        }
        KeyCode::Char(' ') if form.focus == TaskField::Completed => {
            form.completed = !form.completed;
            Vec::new()
        }
        KeyCode::Enter => {
            let Some(token) = state.session.token().cloned() else {
                return Vec::new();
            };
            let form = form.clone();
            match form.editing {
                Some(id) => state.tasks.update(
                    &token,
                    id,
                    form.title.value(),
                    form.description.value(),
                    form.deadline.value(),
                    form.completed,
                ),
                None => state.tasks.create(
                    &token,
                    form.title.value(),
                    form.description.value(),
                    form.deadline.value(),
                ),
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = form.focused_mut() {
                field.pop();
            }
            Vec::new()
        }
        KeyCode::Char(c) => {
            if let Some(field) = form.focused_mut() {
                field.push(c);
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_profile_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    let Some(form) = state.profile_form.as_mut() else {
        return Vec::new();
    };

    if form.confirm_delete {
        form.confirm_delete = false;
        if key.code == KeyCode::Char('y') {
            return state.session.delete_account();
        }
        return Vec::new();
    }

    if is_ctrl(&key, 'd') {
        form.confirm_delete = true;
        return Vec::new();
    }

    match key.code {
        KeyCode::Esc => {
            state.profile_form = None;
            state.session.dismiss_error();
            Vec::new()
        }
        KeyCode::Tab | KeyCode::BackTab => {
            form.next_field();
            Vec::new()
        }
        KeyCode::Enter => {
            let form = form.clone();
            state.session.update_profile(
                form.username.value(),
                form.password.value(),
                form.confirmation.value(),
            )
        }
        KeyCode::Backspace => {
            form.focused_mut().pop();
            Vec::new()
        }
        KeyCode::Char(c) => {
            form.focused_mut().push(c);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_chat_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    let Some(token) = state.session.token().cloned() else {
        return Vec::new();
    };

    if is_ctrl(&key, 'n') {
        state.chat.clear();
        state.chat_scroll = 0;
        return Vec::new();
    }
    if is_ctrl(&key, 'r') {
        return state.chat.load_history(&token);
    }

    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => {
            state.chat_focused = true;
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.scroll_chat(1);
            Vec::new()
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.scroll_chat(-1);
            Vec::new()
        }
        KeyCode::PageUp => {
            state.scroll_chat(PAGE_JUMP);
            Vec::new()
        }
        KeyCode::PageDown => {
            state.scroll_chat(-PAGE_JUMP);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_chat_input_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Esc => {
            state.chat_focused = false;
            Vec::new()
        }
        KeyCode::Enter => {
            let Some(token) = state.session.token().cloned() else {
                return Vec::new();
            };
            let now = state.now;
            let effects = state.chat.send_message(&token, state.chat_input.value(), now);
            if !effects.is_empty() {
                state.chat_input.clear();
                state.chat_scroll = 0;
            }
            effects
        }
        KeyCode::Backspace => {
            state.chat_input.pop();
            Vec::new()
        }
        KeyCode::Char(c) => {
            state.chat_input.push(c);
            Vec::new()
        }
        _ => Vec::new(),
    }
}
