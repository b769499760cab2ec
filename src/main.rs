//! Binary entry point that glues the SQLite-backed domain model to the TUI.
//! The bootstrapping pipeline: bring up the database, hydrate the initial
//! teacher list, and drive the Ratatui event loop until the user exits.
use school_manager::{ensure_schema, fetch_teachers, run_app, App};

/// Initialize persistence, load the teacher roster, and launch the Ratatui
/// event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for
/// example an unwritable home directory) to the terminal instead of crashing
/// silently. Once the loop is running, no single failed action terminates
/// the app; errors surface in the status footer.
fn main() -> anyhow::Result<()> {
    let conn = ensure_schema()?;
    let teachers = fetch_teachers(&conn)?;

    let mut app = App::new(conn, teachers);
    run_app(&mut app)
}
