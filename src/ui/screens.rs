use anyhow::Result;
use rusqlite::Connection;

use crate::db::{fetch_available_courses, fetch_courses_for_teacher};
use crate::models::{Course, Teacher};

/// State for the per-teacher detail view listing assigned courses.
pub(crate) struct CourseScreen {
    pub(crate) teacher: Teacher,
    pub(crate) courses: Vec<Course>,
    pub(crate) selected: usize,
}

impl CourseScreen {
    /// Load the teacher's current assignments and open the screen on the
    /// first entry.
    pub(crate) fn load(conn: &Connection, teacher: Teacher) -> Result<Self> {
        let courses = fetch_courses_for_teacher(conn, teacher.id)?;
        Ok(Self {
            teacher,
            courses,
            selected: 0,
        })
    }

    /// Re-query the assignments after a mutation, keeping the selection in
    /// bounds.
    pub(crate) fn refresh(&mut self, conn: &Connection) -> Result<()> {
        self.courses = fetch_courses_for_teacher(conn, self.teacher.id)?;
        self.ensure_in_bounds();
        Ok(())
    }

    pub(crate) fn current_course(&self) -> Option<&Course> {
        self.courses.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = clamped_offset(self.selected, offset, self.courses.len());
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.courses.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.courses.len() {
            self.selected = self.courses.len() - 1;
        }
    }
}

/// Wrapper around the global course list used by the manager screen.
pub(crate) struct CourseManagerScreen {
    pub(crate) courses: Vec<Course>,
    pub(crate) selected: usize,
}

impl CourseManagerScreen {
    pub(crate) fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            selected: 0,
        }
    }

    pub(crate) fn current_course(&self) -> Option<&Course> {
        self.courses.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = clamped_offset(self.selected, offset, self.courses.len());
    }

    pub(crate) fn set_courses(&mut self, courses: Vec<Course>) {
        self.courses = courses;
        self.ensure_in_bounds();
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.courses.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.courses.len() {
            self.selected = self.courses.len() - 1;
        }
    }
}

/// Picker state for assigning an existing course to the teacher currently
/// open in the detail view. Only courses not yet assigned are offered.
pub(crate) struct AssignCourseState {
    pub(crate) teacher_id: i64,
    pub(crate) available: Vec<Course>,
    pub(crate) selected: usize,
}

impl AssignCourseState {
    pub(crate) fn load(conn: &Connection, teacher_id: i64) -> Result<Self> {
        let available = fetch_available_courses(conn, teacher_id)?;
        Ok(Self {
            teacher_id,
            available,
            selected: 0,
        })
    }

    pub(crate) fn current_course(&self) -> Option<&Course> {
        self.available.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = clamped_offset(self.selected, offset, self.available.len());
    }
}

/// Clamp `current + offset` into `0..len`, treating an empty list as index 0.
fn clamped_offset(current: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len as isize - 1;
    (current as isize + offset).clamp(0, max) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_offset_handles_edges() {
        assert_eq!(clamped_offset(0, -1, 5), 0);
        assert_eq!(clamped_offset(4, 3, 5), 4);
        assert_eq!(clamped_offset(2, 1, 5), 3);
        assert_eq!(clamped_offset(0, 1, 0), 0);
    }
}
