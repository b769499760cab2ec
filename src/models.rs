//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. These types stay light-weight data holders so other layers can focus
//! on presentation and persistence logic. A record only ever exists with an
//! assigned id: the persistence layer hydrates structs on insert, so an
//! unpersisted, identityless teacher or course never escapes it.

use std::fmt;

#[derive(Debug, Clone)]
/// A teacher as stored in the `teachers` table. Courses are not embedded;
/// assignment queries go through the join table on demand.
pub struct Teacher {
    /// Primary key from the database. Edit/delete/assign flows bubble this id
    /// back to the persistence layer.
    pub id: i64,
    /// Full display name, also used for exact-match lookup.
    pub full_name: String,
    /// Age in years.
    pub age: i64,
}

impl fmt::Display for Teacher {
    /// Write the teacher's name to any formatter so the type plays nicely
    /// with Ratatui widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name)
    }
}

#[derive(Debug, Clone)]
/// A course as stored in the `courses` table and surfaced through the
/// `teacher_course` join.
pub struct Course {
    /// Primary key from the SQLite store.
    pub id: i64,
    /// Course name displayed in lists and used for scoped lookup.
    pub name: String,
    /// Planned duration in hours.
    pub hours: i64,
}

impl Course {
    /// Compose a `Name (N hours)` string used by list rows and lookup
    /// results.
    pub fn display_line(&self) -> String {
        format!("{} ({} hours)", self.name, self.hours)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
