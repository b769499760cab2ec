use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Teacher;

/// Retrieve every teacher in storage order. The list screen relies on this
/// being the insertion order, so no explicit sort key beyond the id.
pub fn fetch_teachers(conn: &Connection) -> Result<Vec<Teacher>> {
    let mut stmt = conn
        .prepare("SELECT id, full_name, age FROM teachers ORDER BY id")
        .context("failed to prepare teacher query")?;

    let teachers = stmt
        .query_map([], |row| {
            Ok(Teacher {
                id: row.get(0)?,
                full_name: row.get(1)?,
                age: row.get(2)?,
            })
        })
        .context("failed to load teachers")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect teachers")?;

    Ok(teachers)
}

/// Insert a new teacher row, returning the hydrated struct so the caller can
/// push it straight into the in-memory list.
pub fn create_teacher(conn: &Connection, full_name: &str, age: i64) -> Result<Teacher> {
    let inserted = conn
        .execute(
            "INSERT INTO teachers (full_name, age) VALUES (?1, ?2)",
            params![full_name, age],
        )
        .context("failed to insert teacher")?;

    if inserted == 0 {
        return Err(anyhow!("Creating teacher failed, no rows affected."));
    }

    let id = conn.last_insert_rowid();
    Ok(Teacher {
        id,
        full_name: full_name.to_string(),
        age,
    })
}

/// Overwrite the name and age of an existing teacher. We surface an explicit
/// error when zero rows are touched so the UI can show a friendly message
/// instead of silently continuing.
pub fn update_teacher(conn: &Connection, id: i64, full_name: &str, age: i64) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE teachers SET full_name = ?1, age = ?2 WHERE id = ?3",
            params![full_name, age, id],
        )
        .context("failed to update teacher")?;

    if updated == 0 {
        Err(anyhow!("Teacher not found"))
    } else {
        Ok(())
    }
}

/// Remove a teacher row. The schema cascades to `teacher_course`, so we do
/// not have to delete the join table rows manually.
pub fn delete_teacher(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM teachers WHERE id = ?1", params![id])
        .context("failed to delete teacher")?;

    if deleted == 0 {
        Err(anyhow!("Teacher not found"))
    } else {
        Ok(())
    }
}

/// Look a teacher up by exact name, returning the first match. Names are not
/// unique, so "first match" is the storage-order winner.
pub fn find_teacher_by_name(conn: &Connection, full_name: &str) -> Result<Option<Teacher>> {
    conn.query_row(
        "SELECT id, full_name, age FROM teachers WHERE full_name = ?1 ORDER BY id LIMIT 1",
        params![full_name],
        |row| {
            Ok(Teacher {
                id: row.get(0)?,
                full_name: row.get(1)?,
                age: row.get(2)?,
            })
        },
    )
    .optional()
    .context("failed to look up teacher by name")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::apply_schema;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn created_teacher_is_found_by_name() {
        let conn = test_conn();
        let created = create_teacher(&conn, "Jane Doe", 40).unwrap();
        assert!(created.id > 0);

        let found = find_teacher_by_name(&conn, "Jane Doe").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.full_name, "Jane Doe");
        assert_eq!(found.age, 40);
    }

    #[test]
    fn lookup_miss_returns_none() {
        let conn = test_conn();
        create_teacher(&conn, "Jane Doe", 40).unwrap();
        assert!(find_teacher_by_name(&conn, "John Doe").unwrap().is_none());
    }

    #[test]
    fn duplicate_names_resolve_to_first_inserted() {
        let conn = test_conn();
        let first = create_teacher(&conn, "Jane Doe", 40).unwrap();
        create_teacher(&conn, "Jane Doe", 55).unwrap();

        let found = find_teacher_by_name(&conn, "Jane Doe").unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.age, 40);
    }

    #[test]
    fn fetch_returns_teachers_in_insertion_order() {
        let conn = test_conn();
        create_teacher(&conn, "Ada", 36).unwrap();
        create_teacher(&conn, "Grace", 45).unwrap();

        let names: Vec<String> = fetch_teachers(&conn)
            .unwrap()
            .into_iter()
            .map(|t| t.full_name)
            .collect();
        assert_eq!(names, vec!["Ada", "Grace"]);
    }

    #[test]
    fn update_rewrites_fields_in_place() {
        let conn = test_conn();
        let teacher = create_teacher(&conn, "Ada", 36).unwrap();
        update_teacher(&conn, teacher.id, "Ada Lovelace", 37).unwrap();

        let reloaded = find_teacher_by_name(&conn, "Ada Lovelace")
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.id, teacher.id);
        assert_eq!(reloaded.age, 37);
    }

    #[test]
    fn update_of_absent_id_is_an_error() {
        let conn = test_conn();
        assert!(update_teacher(&conn, 99, "Nobody", 1).is_err());
    }

    #[test]
    fn delete_of_absent_id_is_an_error() {
        let conn = test_conn();
        assert!(delete_teacher(&conn, 99).is_err());
    }
}
