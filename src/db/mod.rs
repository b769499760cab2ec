//! Persistence module split across logical submodules.

mod connection;
mod courses;
mod teachers;

pub use connection::{apply_schema, ensure_schema};
pub use courses::{
    assign_course, create_course, delete_course, fetch_available_courses, fetch_courses,
    fetch_courses_for_teacher, find_assigned_course, unassign_course, update_course,
    AssignmentError,
};
pub use teachers::{
    create_teacher, delete_teacher, fetch_teachers, find_teacher_by_name, update_teacher,
};
