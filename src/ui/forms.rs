use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Course, Teacher};

/// Internal representation of the "teacher" form fields.
#[derive(Default, Clone)]
pub(crate) struct TeacherForm {
    pub(crate) full_name: String,
    pub(crate) age: String,
    pub(crate) active: TeacherField,
    pub(crate) error: Option<String>,
}

/// Fields available within the teacher form.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum TeacherField {
    Name,
    Age,
}

impl Default for TeacherField {
    fn default() -> Self {
        TeacherField::Name
    }
}

impl TeacherForm {
    /// Populate the form from an existing teacher when editing.
    pub(crate) fn from_teacher(teacher: &Teacher) -> Self {
        Self {
            full_name: teacher.full_name.clone(),
            age: teacher.age.to_string(),
            active: TeacherField::Name,
            error: None,
        }
    }

    /// Swap focus between the name and age fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            TeacherField::Name => TeacherField::Age,
            TeacherField::Age => TeacherField::Name,
        };
    }

    /// Append a character to the active field, validating allowed input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            TeacherField::Name => {
                if !ch.is_control() {
                    self.full_name.push(ch);
                    true
                } else {
                    false
                }
            }
            TeacherField::Age => {
                if ch.is_ascii_digit() {
                    self.age.push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            TeacherField::Name => {
                self.full_name.pop();
            }
            TeacherField::Age => {
                self.age.pop();
            }
        }
    }

    /// Validate the inputs and return typed values ready for persistence.
    pub(crate) fn parse_inputs(&self) -> Result<(String, i64)> {
        let name = self.full_name.trim();
        if name.is_empty() {
            return Err(anyhow!("Full name is required."));
        }
        let age_raw = self.age.trim();
        if age_raw.is_empty() {
            return Err(anyhow!("Age is required."));
        }
        let age = age_raw
            .parse::<i64>()
            .context("Age must be a valid number.")?;
        Ok((name.to_string(), age))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: TeacherField) -> Line<'static> {
        let (value, is_active) = match field {
            TeacherField::Name => (&self.full_name, self.active == TeacherField::Name),
            TeacherField::Age => (&self.age, self.active == TeacherField::Age),
        };
        styled_form_line(field_name, value, is_active)
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: TeacherField) -> usize {
        match field {
            TeacherField::Name => self.full_name.chars().count(),
            TeacherField::Age => self.age.chars().count(),
        }
    }
}

/// Form state for course creation and editing.
#[derive(Default, Clone)]
pub(crate) struct CourseForm {
    pub(crate) name: String,
    pub(crate) hours: String,
    pub(crate) active: CourseField,
    pub(crate) error: Option<String>,
}

/// Fields available within the course form.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum CourseField {
    Name,
    Hours,
}

impl Default for CourseField {
    fn default() -> Self {
        CourseField::Name
    }
}

impl CourseForm {
    /// Populate the form from an existing course when entering edit mode.
    pub(crate) fn from_course(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            hours: course.hours.to_string(),
            active: CourseField::Name,
            error: None,
        }
    }

    /// Swap focus between the name and hours fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            CourseField::Name => CourseField::Hours,
            CourseField::Hours => CourseField::Name,
        };
    }

    /// Insert a character into the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            CourseField::Name => {
                if !ch.is_control() {
                    self.name.push(ch);
                    true
                } else {
                    false
                }
            }
            CourseField::Hours => {
                if ch.is_ascii_digit() {
                    self.hours.push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Remove a character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            CourseField::Name => {
                self.name.pop();
            }
            CourseField::Hours => {
                self.hours.pop();
            }
        }
    }

    /// Validate and normalize form inputs before they are written to the
    /// database.
    pub(crate) fn parse_inputs(&self) -> Result<(String, i64)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Course name is required."));
        }
        let hours_raw = self.hours.trim();
        if hours_raw.is_empty() {
            return Err(anyhow!("Hours are required."));
        }
        let hours = hours_raw
            .parse::<i64>()
            .context("Hours must be a valid number.")?;
        Ok((name.to_string(), hours))
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field_name: &str, field: CourseField) -> Line<'static> {
        let (value, is_active) = match field {
            CourseField::Name => (&self.name, self.active == CourseField::Name),
            CourseField::Hours => (&self.hours, self.active == CourseField::Hours),
        };
        styled_form_line(field_name, value, is_active)
    }

    /// Character length of the requested field.
    pub(crate) fn value_len(&self, field: CourseField) -> usize {
        match field {
            CourseField::Name => self.name.chars().count(),
            CourseField::Hours => self.hours.chars().count(),
        }
    }
}

/// Shared rendering for a labelled form field with placeholder and focus
/// highlighting.
fn styled_form_line(field_name: &str, value: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        "<required>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, style),
    ])
}

#[derive(Clone)]
pub(crate) struct ConfirmTeacherDelete {
    pub(crate) id: i64,
    pub(crate) full_name: String,
}

impl ConfirmTeacherDelete {
    /// Build the confirmation state from the teacher being considered.
    pub(crate) fn from(teacher: Teacher) -> Self {
        Self {
            id: teacher.id,
            full_name: teacher.full_name,
        }
    }
}

/// State for confirming permanent course deletion.
pub(crate) struct ConfirmCourseDelete {
    pub(crate) course: Course,
}

/// State for confirming the removal of a course assignment from a specific
/// teacher.
pub(crate) struct ConfirmUnassign {
    pub(crate) teacher_id: i64,
    pub(crate) course: Course,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_form_rejects_empty_name() {
        let form = TeacherForm {
            age: "40".into(),
            ..TeacherForm::default()
        };
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn teacher_form_rejects_missing_age() {
        let form = TeacherForm {
            full_name: "Jane Doe".into(),
            ..TeacherForm::default()
        };
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn teacher_form_trims_and_parses() {
        let form = TeacherForm {
            full_name: "  Jane Doe  ".into(),
            age: "40".into(),
            ..TeacherForm::default()
        };
        let (name, age) = form.parse_inputs().unwrap();
        assert_eq!(name, "Jane Doe");
        assert_eq!(age, 40);
    }

    #[test]
    fn age_field_only_accepts_digits() {
        let mut form = TeacherForm::default();
        form.toggle_field();
        assert!(form.push_char('4'));
        assert!(!form.push_char('x'));
        assert_eq!(form.age, "4");
    }

    #[test]
    fn course_form_rejects_non_numeric_hours() {
        let form = CourseForm {
            name: "Algebra".into(),
            hours: "thirty".into(),
            ..CourseForm::default()
        };
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn course_form_parses_valid_input() {
        let form = CourseForm {
            name: "Algebra".into(),
            hours: "30".into(),
            ..CourseForm::default()
        };
        let (name, hours) = form.parse_inputs().unwrap();
        assert_eq!(name, "Algebra");
        assert_eq!(hours, 30);
    }
}
