use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::models::Course;

/// Raised when an assignment references an endpoint that does not exist.
/// Validation runs before the insert, so nothing is written when this fires.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("Teacher with id {0} does not exist.")]
    TeacherMissing(i64),
    #[error("Course with id {0} does not exist.")]
    CourseMissing(i64),
}

/// Retrieve every course in storage order.
pub fn fetch_courses(conn: &Connection) -> Result<Vec<Course>> {
    let mut stmt = conn
        .prepare("SELECT id, name, hours FROM courses ORDER BY id")
        .context("failed to prepare course query")?;

    let courses = stmt
        .query_map([], |row| {
            Ok(Course {
                id: row.get(0)?,
                name: row.get(1)?,
                hours: row.get(2)?,
            })
        })
        .context("failed to load courses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect courses")?;

    Ok(courses)
}

/// Get every course assigned to a specific teacher, joined through the
/// `teacher_course` table. Used by the detail view when the user drills into
/// a teacher.
pub fn fetch_courses_for_teacher(conn: &Connection, teacher_id: i64) -> Result<Vec<Course>> {
    let mut stmt = conn
        .prepare(
            "SELECT c.id, c.name, c.hours
             FROM courses c
             INNER JOIN teacher_course tc ON tc.course_id = c.id
             WHERE tc.teacher_id = ?1
             ORDER BY c.id",
        )
        .context("failed to prepare teacher courses query")?;

    let courses = stmt
        .query_map([teacher_id], |row| {
            Ok(Course {
                id: row.get(0)?,
                name: row.get(1)?,
                hours: row.get(2)?,
            })
        })
        .context("failed to iterate teacher courses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect teacher courses")?;

    Ok(courses)
}

/// Return courses not yet assigned to a given teacher, so the "Assign Course"
/// picker shows only eligible options.
pub fn fetch_available_courses(conn: &Connection, teacher_id: i64) -> Result<Vec<Course>> {
    let mut stmt = conn
        .prepare(
            "SELECT c.id, c.name, c.hours
             FROM courses c
             WHERE NOT EXISTS (
                 SELECT 1 FROM teacher_course tc
                 WHERE tc.course_id = c.id AND tc.teacher_id = ?1
             )
             ORDER BY c.id",
        )
        .context("failed to prepare available courses query")?;

    let courses = stmt
        .query_map([teacher_id], |row| {
            Ok(Course {
                id: row.get(0)?,
                name: row.get(1)?,
                hours: row.get(2)?,
            })
        })
        .context("failed to iterate available courses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect available courses")?;

    Ok(courses)
}

/// Look up a course by exact name among one teacher's assignments, returning
/// the first match in storage order.
pub fn find_assigned_course(
    conn: &Connection,
    teacher_id: i64,
    name: &str,
) -> Result<Option<Course>> {
    conn.query_row(
        "SELECT c.id, c.name, c.hours
         FROM courses c
         INNER JOIN teacher_course tc ON tc.course_id = c.id
         WHERE tc.teacher_id = ?1 AND c.name = ?2
         ORDER BY c.id LIMIT 1",
        params![teacher_id, name],
        |row| {
            Ok(Course {
                id: row.get(0)?,
                name: row.get(1)?,
                hours: row.get(2)?,
            })
        },
    )
    .optional()
    .context("failed to look up assigned course by name")
}

/// Insert a brand new course. We echo the hydrated struct so callers can
/// update UI state without having to re-query the database.
pub fn create_course(conn: &Connection, name: &str, hours: i64) -> Result<Course> {
    let inserted = conn
        .execute(
            "INSERT INTO courses (name, hours) VALUES (?1, ?2)",
            params![name, hours],
        )
        .context("failed to insert course")?;

    if inserted == 0 {
        return Err(anyhow!("Creating course failed, no rows affected."));
    }

    let id = conn.last_insert_rowid();
    Ok(Course {
        id,
        name: name.to_string(),
        hours,
    })
}

/// Update all editable course fields. Like other update helpers, we surface
/// an explicit error when zero rows are touched.
pub fn update_course(conn: &Connection, id: i64, name: &str, hours: i64) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE courses SET name = ?1, hours = ?2 WHERE id = ?3",
            params![name, hours, id],
        )
        .context("failed to update course")?;

    if updated == 0 {
        Err(anyhow!("Course not found"))
    } else {
        Ok(())
    }
}

/// Permanently delete a course. The join table cascades automatically so
/// teachers lose the assignment without additional cleanup.
pub fn delete_course(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM courses WHERE id = ?1", params![id])
        .context("failed to delete course")?;

    if deleted == 0 {
        Err(anyhow!("Course not found"))
    } else {
        Ok(())
    }
}

/// Create an assignment between a teacher and a course. Both endpoints are
/// checked first; a missing one yields [`AssignmentError`] naming the absent
/// id and nothing is written. Using `INSERT OR IGNORE` lets us treat repeated
/// requests idempotently, which simplifies state management in the UI.
pub fn assign_course(conn: &Connection, teacher_id: i64, course_id: i64) -> Result<()> {
    if !id_exists(conn, "teachers", teacher_id)? {
        return Err(AssignmentError::TeacherMissing(teacher_id).into());
    }
    if !id_exists(conn, "courses", course_id)? {
        return Err(AssignmentError::CourseMissing(course_id).into());
    }

    conn.execute(
        "INSERT OR IGNORE INTO teacher_course (teacher_id, course_id) VALUES (?1, ?2)",
        params![teacher_id, course_id],
    )
    .context("failed to assign course to teacher")?;
    Ok(())
}

/// Remove a teacher-course assignment and surface a descriptive error if the
/// link never existed.
pub fn unassign_course(conn: &Connection, teacher_id: i64, course_id: i64) -> Result<()> {
    let deleted = conn
        .execute(
            "DELETE FROM teacher_course WHERE teacher_id = ?1 AND course_id = ?2",
            params![teacher_id, course_id],
        )
        .context("failed to unassign course from teacher")?;

    if deleted == 0 {
        Err(anyhow!("Course not assigned to this teacher"))
    } else {
        Ok(())
    }
}

/// Existence probe shared by the assignment validation. The table name is one
/// of our two fixed entity tables, never user input.
fn id_exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
    let mut stmt = conn
        .prepare(&format!("SELECT 1 FROM {table} WHERE id = ?1"))
        .context("failed to prepare existence check")?;
    stmt.exists(params![id])
        .context("failed to run existence check")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{apply_schema, create_teacher, delete_teacher, fetch_teachers};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        conn
    }

    fn assignment_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM teacher_course", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn assigning_with_missing_teacher_names_the_id_and_writes_nothing() {
        let conn = test_conn();
        let course = create_course(&conn, "Algebra", 30).unwrap();

        let err = assign_course(&conn, 99, course.id).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AssignmentError>(),
            Some(&AssignmentError::TeacherMissing(99))
        );
        assert_eq!(assignment_count(&conn), 0);
    }

    #[test]
    fn assigning_with_missing_course_names_the_id_and_writes_nothing() {
        let conn = test_conn();
        let teacher = create_teacher(&conn, "Jane Doe", 40).unwrap();

        let err = assign_course(&conn, teacher.id, 42).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AssignmentError>(),
            Some(&AssignmentError::CourseMissing(42))
        );
        assert_eq!(assignment_count(&conn), 0);
    }

    #[test]
    fn repeated_assignment_is_idempotent() {
        let conn = test_conn();
        let teacher = create_teacher(&conn, "Jane Doe", 40).unwrap();
        let course = create_course(&conn, "Algebra", 30).unwrap();

        assign_course(&conn, teacher.id, course.id).unwrap();
        assign_course(&conn, teacher.id, course.id).unwrap();
        assert_eq!(assignment_count(&conn), 1);
    }

    #[test]
    fn deleting_a_teacher_cascades_only_their_assignments() {
        let conn = test_conn();
        let jane = create_teacher(&conn, "Jane Doe", 40).unwrap();
        let john = create_teacher(&conn, "John Roe", 50).unwrap();
        let algebra = create_course(&conn, "Algebra", 30).unwrap();
        let physics = create_course(&conn, "Physics", 45).unwrap();

        assign_course(&conn, jane.id, algebra.id).unwrap();
        assign_course(&conn, jane.id, physics.id).unwrap();
        assign_course(&conn, john.id, physics.id).unwrap();

        delete_teacher(&conn, jane.id).unwrap();

        assert_eq!(assignment_count(&conn), 1);
        assert_eq!(fetch_courses(&conn).unwrap().len(), 2);
        let johns: Vec<i64> = fetch_courses_for_teacher(&conn, john.id)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(johns, vec![physics.id]);
    }

    #[test]
    fn deleting_a_course_cascades_to_assignments() {
        let conn = test_conn();
        let jane = create_teacher(&conn, "Jane Doe", 40).unwrap();
        let algebra = create_course(&conn, "Algebra", 30).unwrap();
        assign_course(&conn, jane.id, algebra.id).unwrap();

        delete_course(&conn, algebra.id).unwrap();
        assert_eq!(assignment_count(&conn), 0);
        assert!(fetch_courses_for_teacher(&conn, jane.id).unwrap().is_empty());
    }

    #[test]
    fn updating_a_course_changes_exactly_one_entry() {
        let conn = test_conn();
        let algebra = create_course(&conn, "Algebra", 30).unwrap();
        let physics = create_course(&conn, "Physics", 45).unwrap();

        update_course(&conn, algebra.id, "Linear Algebra", 36).unwrap();

        let all = fetch_courses(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Linear Algebra");
        assert_eq!(all[0].hours, 36);
        assert_eq!(all[1].name, "Physics");
        assert_eq!(all[1].hours, physics.hours);
    }

    #[test]
    fn available_courses_excludes_already_assigned() {
        let conn = test_conn();
        let jane = create_teacher(&conn, "Jane Doe", 40).unwrap();
        let algebra = create_course(&conn, "Algebra", 30).unwrap();
        let physics = create_course(&conn, "Physics", 45).unwrap();
        assign_course(&conn, jane.id, algebra.id).unwrap();

        let available: Vec<i64> = fetch_available_courses(&conn, jane.id)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(available, vec![physics.id]);
    }

    #[test]
    fn scoped_lookup_only_sees_the_teachers_assignments() {
        let conn = test_conn();
        let jane = create_teacher(&conn, "Jane Doe", 40).unwrap();
        let algebra = create_course(&conn, "Algebra", 30).unwrap();
        create_course(&conn, "Physics", 45).unwrap();
        assign_course(&conn, jane.id, algebra.id).unwrap();

        let hit = find_assigned_course(&conn, jane.id, "Algebra")
            .unwrap()
            .unwrap();
        assert_eq!(hit.id, algebra.id);
        assert_eq!(hit.hours, 30);

        // Physics exists but is not assigned, so the scoped lookup misses.
        assert!(find_assigned_course(&conn, jane.id, "Physics")
            .unwrap()
            .is_none());
    }

    #[test]
    fn unassigning_a_missing_link_is_an_error() {
        let conn = test_conn();
        let jane = create_teacher(&conn, "Jane Doe", 40).unwrap();
        let algebra = create_course(&conn, "Algebra", 30).unwrap();
        assert!(unassign_course(&conn, jane.id, algebra.id).is_err());
    }

    #[test]
    fn insert_assign_list_delete_scenario() {
        let conn = test_conn();
        let jane = create_teacher(&conn, "Jane Doe", 40).unwrap();
        assert_eq!(jane.id, 1);
        let algebra = create_course(&conn, "Algebra", 30).unwrap();
        assert_eq!(algebra.id, 1);

        assign_course(&conn, jane.id, algebra.id).unwrap();
        let assigned = fetch_courses_for_teacher(&conn, jane.id).unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].name, "Algebra");
        assert_eq!(assigned[0].hours, 30);

        delete_teacher(&conn, jane.id).unwrap();
        assert!(fetch_teachers(&conn).unwrap().is_empty());
        let courses = fetch_courses(&conn).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "Algebra");
        assert!(fetch_courses_for_teacher(&conn, jane.id).unwrap().is_empty());
    }
}
