//! Editable form buffers for the login screen and the popups.

use crate::model::{Task, TaskId};

/// Single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered as bullets.
    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            masked: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
    Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: TextField,
    pub password: TextField,
    pub confirmation: TextField,
    pub focus: LoginField,
    /// Registration mode shows the confirmation field.
    pub register: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: TextField::new(),
            password: TextField::masked(),
            confirmation: TextField::masked(),
            focus: LoginField::Username,
            register: false,
        }
    }
}

impl LoginForm {
    pub fn next_field(&mut self) {
        self.focus = match (self.focus, self.register) {
            (LoginField::Username, _) => LoginField::Password,
            (LoginField::Password, true) => LoginField::Confirmation,
            (LoginField::Password, false) | (LoginField::Confirmation, _) => LoginField::Username,
        };
    }

    pub fn toggle_mode(&mut self) {
        self.register = !self.register;
        self.confirmation.clear();
        if !self.register && self.focus == LoginField::Confirmation {
            self.focus = LoginField::Username;
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
            LoginField::Confirmation => &mut self.confirmation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskField {
    #[default]
    Title,
    Description,
    Deadline,
    Completed,
}

/// Create or edit popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// `None` when creating.
    pub editing: Option<TaskId>,
    pub title: TextField,
    pub description: TextField,
    pub deadline: TextField,
    pub completed: bool,
    pub focus: TaskField,
}

impl TaskForm {
    pub fn create() -> Self {
        Self {
            editing: None,
            title: TextField::new(),
            description: TextField::new(),
            deadline: TextField::new(),
            completed: false,
            focus: TaskField::Title,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            title: TextField::with_value(task.title.clone()),
            description: TextField::with_value(task.description.clone()),
            deadline: TextField::with_value(task.deadline.clone().unwrap_or_default()),
            completed: task.completed,
            focus: TaskField::Title,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// The completed toggle exists only when editing.
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            TaskField::Title => TaskField::Description,
            TaskField::Description => TaskField::Deadline,
            TaskField::Deadline if self.is_edit() => TaskField::Completed,
            TaskField::Deadline | TaskField::Completed => TaskField::Title,
        };
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            TaskField::Title => Some(&mut self.title),
            TaskField::Description => Some(&mut self.description),
            TaskField::Deadline => Some(&mut self.deadline),
            TaskField::Completed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Username,
    Password,
    Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub username: TextField,
    pub password: TextField,
    pub confirmation: TextField,
    pub focus: ProfileField,
    /// Waiting for `y` to delete the account.
    pub confirm_delete: bool,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            username: TextField::new(),
            password: TextField::masked(),
            confirmation: TextField::masked(),
            focus: ProfileField::Username,
            confirm_delete: false,
        }
    }
}

impl ProfileForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            ProfileField::Username => ProfileField::Password,
            ProfileField::Password => ProfileField::Confirmation,
            ProfileField::Confirmation => ProfileField::Username,
        };
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            ProfileField::Username => &mut self.username,
            ProfileField::Password => &mut self.password,
            ProfileField::Confirmation => &mut self.confirmation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_field_hides_value() {
        let mut field = TextField::masked();
        for c in "secret".chars() {
            field.push(c);
        }
        assert_eq!(field.value(), "secret");
        assert_eq!(field.display(), "••••••");
    }

    #[test]
    fn login_tab_skips_confirmation_outside_register_mode() {
        let mut form = LoginForm::default();
        form.next_field();
        assert_eq!(form.focus, LoginField::Password);
        form.next_field();
        assert_eq!(form.focus, LoginField::Username);

        form.toggle_mode();
        form.next_field();
        form.next_field();
        assert_eq!(form.focus, LoginField::Confirmation);

        form.toggle_mode();
        assert_eq!(form.focus, LoginField::Username);
    }

    #[test]
    fn edit_form_prefills_task() {
        let task = Task::new(4, "Ship", "v1").with_deadline("2026-05-01T09:00:00").with_completed(true);
        let mut form = TaskForm::edit(&task);
        assert_eq!(form.editing, Some(TaskId::new(4)));
        assert_eq!(form.deadline.value(), "2026-05-01T09:00:00");
        assert!(form.completed);

        form.next_field();
        form.next_field();
        form.next_field();
        assert_eq!(form.focus, TaskField::Completed);
        assert!(form.focused_mut().is_none());
    }

    #[test]
    fn create_form_cycles_three_fields() {
        let mut form = TaskForm::create();
        form.next_field();
        form.next_field();
        form.next_field();
        assert_eq!(form.focus, TaskField::Title);
    }
}
