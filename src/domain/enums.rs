use super::bookmark::BookmarkKind;

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    RenamingCurrent,
    AddingBookmark,
}

/// Which text field of a form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Label,
    Minutes,
}

impl FormField {
    pub fn toggle(self) -> Self {
        match self {
            Self::Label => Self::Minutes,
            Self::Minutes => Self::Label,
        }
    }
}

/// Input form for adding or editing a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub label: String,
    pub minutes: String,
    pub field: FormField,
    /// Index of the task being edited (None when adding)
    pub editing: Option<usize>,
}

impl TaskForm {
    pub fn empty() -> Self {
        Self {
            label: String::new(),
            minutes: String::new(),
            field: FormField::Label,
            editing: None,
        }
    }

    pub fn push(&mut self, c: char) {
        match self.field {
            FormField::Label => self.label.push(c),
            // Minutes only take digits
            FormField::Minutes => {
                if c.is_ascii_digit() {
                    self.minutes.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            FormField::Label => {
                self.label.pop();
            }
            FormField::Minutes => {
                self.minutes.pop();
            }
        }
    }
}

/// Form for placing a bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkForm {
    pub kind: BookmarkKind,
    pub time: String,
}

impl BookmarkForm {
    pub fn new() -> Self {
        Self {
            kind: BookmarkKind::Coffee,
            time: String::new(),
        }
    }
}

impl Default for BookmarkForm {
    fn default() -> Self {
        Self::new()
    }
}
