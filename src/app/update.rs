use crate::app::{handle_key, AppState};
use crate::app::forms::LoginForm;
use crate::effects::Effect;
use crate::event::AppEvent;
use crate::store::Completion;

/// Update function following Elm Architecture.
/// Mutates state in place and returns the effects to run. No I/O.
pub fn update(state: &mut AppState, event: AppEvent) -> Vec<Effect> {
    match event {
        AppEvent::Key(key) => handle_key(state, key),

        AppEvent::Tick(now) => {
            state.now = now;
            Vec::new()
        }

        AppEvent::TokenRestored(token) => state.session.restore(token),

        AppEvent::SessionValidated { seq, result } => {
            let (completion, mut effects) = state.session.apply_validation(seq, result);
            if completion == Completion::Applied {
                state.login = LoginForm::default();
                effects.extend(start_session(state));
            }
            effects
        }

        AppEvent::ProfileUpdated { seq, result } => {
            let completion = state.session.apply_profile_update(seq, result);
            if completion == Completion::Applied {
                state.profile_form = None;
            }
            after(state, completion)
        }

        AppEvent::AccountDeleted { seq, result } => match state.session.apply_account_deleted(seq, result) {
            Completion::Applied => {
                tracing::info!("account deleted");
                teardown(state)
            }
            completion => after(state, completion),
        },

        AppEvent::TasksLoaded { seq, result } => {
            let completion = state.tasks.apply_refresh(seq, result);
            state.clamp_selection();
            after(state, completion)
        }

        AppEvent::TaskCreated { seq, result } => {
            let completion = state.tasks.apply_created(seq, result);
            if completion == Completion::Applied {
                state.task_form = None;
                state.selected_task = 0;
            }
            after(state, completion)
        }

        AppEvent::TaskUpdated { seq, result } => {
            let completion = state.tasks.apply_updated(seq, result);
            if completion == Completion::Applied {
                state.task_form = None;
                state.clamp_selection();
            }
            after(state, completion)
        }

        AppEvent::TaskDeleted { seq, id, result } => {
            let completion = state.tasks.apply_deleted(seq, id, result);
            state.clamp_selection();
            after(state, completion)
        }

        AppEvent::ChatReplied { seq, result } => {
            let completion = state.chat.apply_reply(seq, result);
            if completion == Completion::Applied {
                state.chat_scroll = 0;
            }
            after(state, completion)
        }

        AppEvent::ChatHistoryLoaded { seq, result } => {
            let completion = state.chat.apply_history(seq, result);
            after(state, completion)
        }

        AppEvent::NotificationReceived { user_id, text } => {
            // Frames still queued from a torn-down or replaced listener are dropped
            if state.session.is_current_user(user_id) {
                let now = state.now;
                state.notifications.push(text, now);
            }
            Vec::new()
        }

        AppEvent::ListenerChanged { user_id, status } => {
            if state.session.is_current_user(user_id) {
                state.notifications.status = status;
            }
            Vec::new()
        }

        AppEvent::Error { source, error } => {
            state.push_error(format!("{}: {}", source, error));
            Vec::new()
        }
    }
}

/// Explicit logout from the key map.
pub fn logout(state: &mut AppState) -> Vec<Effect> {
    if !state.session.is_authenticated() {
        return Vec::new();
    }
    teardown(state)
}

/// Work that follows every transition into `authenticated`.
fn start_session(state: &mut AppState) -> Vec<Effect> {
    let (Some(token), Some(user)) = (state.session.token().cloned(), state.session.user().cloned()) else {
        return Vec::new();
    };
    let mut effects = state.tasks.refresh(&token);
    effects.push(Effect::ConnectNotifications { user_id: user.id });
    effects
}

/// A 401 from any store ends the session.
fn after(state: &mut AppState, completion: Completion) -> Vec<Effect> {
    match completion {
        Completion::Unauthorized => {
            let effects = state.session.handle_unauthorized();
            clear_stores(state);
            effects
        }
        Completion::Applied | Completion::Failed | Completion::Stale => Vec::new(),
    }
}

fn teardown(state: &mut AppState) -> Vec<Effect> {
    let effects = state.session.logout();
    clear_stores(state);
    effects
}

fn clear_stores(state: &mut AppState) {
    state.tasks.clear();
    state.chat.clear();
    state.reset_view();
}
