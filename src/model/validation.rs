//! Local form checks. They mirror the backend's constraints so obviously
//! bad input never leaves the client.

use crate::error::ValidationError;

use super::task::{NewTask, TaskChanges};
use super::user::{Credentials, ProfileUpdate};

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 100;
pub const PASSWORD_MIN: usize = 8;

fn check_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if len < USERNAME_MIN {
        return Err(ValidationError::UsernameTooShort { min: USERNAME_MIN });
    }
    if len > USERNAME_MAX {
        return Err(ValidationError::UsernameTooLong { max: USERNAME_MAX });
    }
    Ok(())
}

fn check_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(ValidationError::PasswordTooShort { min: PASSWORD_MIN });
    }
    Ok(())
}

pub fn registration(
    username: &str,
    password: &str,
    confirmation: &str,
) -> Result<Credentials, ValidationError> {
    let username = username.trim();
    check_username(username)?;
    check_password(password, confirmation)?;
    Ok(Credentials::new(username, password))
}

/// Build a partial update from the profile form. Blank fields mean
/// "leave unchanged"; a username equal to the current one is not a change.
pub fn profile_update(
    current_username: &str,
    username: &str,
    password: &str,
    confirmation: &str,
) -> Result<ProfileUpdate, ValidationError> {
    let mut update = ProfileUpdate::default();

    let username = username.trim();
    if !username.is_empty() && username != current_username {
        check_username(username)?;
        update.username = Some(username.to_string());
    }

    if !password.is_empty() || !confirmation.is_empty() {
        check_password(password, confirmation)?;
        update.password = Some(password.to_string());
    }

    if update.is_empty() {
        return Err(ValidationError::NoChanges);
    }
    Ok(update)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn new_task(title: &str, description: &str, deadline: &str) -> Result<NewTask, ValidationError> {
    let title = non_blank(title).ok_or(ValidationError::EmptyTitle)?;
    Ok(NewTask {
        title,
        description: description.trim().to_string(),
        deadline: non_blank(deadline),
    })
}

pub fn task_changes(
    title: &str,
    description: &str,
    deadline: &str,
    completed: bool,
) -> Result<TaskChanges, ValidationError> {
    let title = non_blank(title).ok_or(ValidationError::EmptyTitle)?;
    Ok(TaskChanges {
        title,
        description: description.trim().to_string(),
        completed,
        deadline: non_blank(deadline),
    })
}
