use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{
    assign_course, create_course, create_teacher, delete_course, delete_teacher, fetch_courses,
    fetch_teachers, find_assigned_course, find_teacher_by_name, unassign_course, update_course,
    update_teacher,
};
use crate::models::{Course, Teacher};

use super::forms::{
    ConfirmCourseDelete, ConfirmTeacherDelete, ConfirmUnassign, CourseField, CourseForm,
    TeacherField, TeacherForm,
};
use super::helpers::{centered_rect, surface_error};
use super::screens::{AssignCourseState, CourseManagerScreen, CourseScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what keyboard shortcuts should
/// do.
enum Screen {
    Teachers,
    Courses(CourseScreen),
    CourseManager(CourseManagerScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingTeacher(TeacherForm),
    EditingTeacher {
        id: i64,
        form: TeacherForm,
    },
    ConfirmTeacherDelete(ConfirmTeacherDelete),
    /// Creating a course, optionally assigning it to a teacher in the same
    /// flow. The two steps are independent statements: if the assignment
    /// fails the course still exists, mirroring the no-rollback policy of
    /// the persistence layer.
    CreatingCourse {
        teacher_id: Option<i64>,
        form: CourseForm,
    },
    EditingCourse {
        course_id: i64,
        form: CourseForm,
    },
    ConfirmCourseDelete(ConfirmCourseDelete),
    AssigningCourse(AssignCourseState),
    ConfirmUnassign(ConfirmUnassign),
    Searching(SearchState),
}

/// Which lookup the search bar drives.
enum SearchTarget {
    Teachers,
    TeacherCourses,
}

/// State for an active exact-name lookup.
struct SearchState {
    target: SearchTarget,
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    teachers: Vec<Teacher>,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection, teachers: Vec<Teacher>) -> Self {
        Self {
            conn,
            teachers,
            selected: 0,
            screen: Screen::Teachers,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingTeacher(form) => self.handle_add_teacher(code, form)?,
            Mode::EditingTeacher { id, form } => self.handle_edit_teacher(code, id, form)?,
            Mode::ConfirmTeacherDelete(confirm) => {
                self.handle_confirm_teacher_delete(code, confirm)?
            }
            Mode::CreatingCourse { teacher_id, form } => {
                self.handle_create_course(code, teacher_id, form)?
            }
            Mode::EditingCourse { course_id, form } => {
                self.handle_edit_course(code, course_id, form)?
            }
            Mode::ConfirmCourseDelete(confirm) => {
                self.handle_confirm_course_delete(code, confirm)?
            }
            Mode::AssigningCourse(state) => self.handle_assign_course(code, state)?,
            Mode::ConfirmUnassign(confirm) => self.handle_confirm_unassign(code, confirm)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Teachers => self.handle_teachers_key(code, exit),
            Screen::Courses(_) => self.handle_courses_key(code, exit),
            Screen::CourseManager(_) => self.handle_course_manager_key(code, exit),
        }
    }

    fn handle_teachers_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_teacher_selection(-1),
            KeyCode::Down => self.move_teacher_selection(1),
            KeyCode::Enter => {
                if let Some(teacher) = self.current_teacher().cloned() {
                    self.clear_status();
                    let screen = CourseScreen::load(&self.conn, teacher)?;
                    self.screen = Screen::Courses(screen);
                } else {
                    self.set_status("No teacher selected.", StatusKind::Error);
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.clear_status();
                let courses = fetch_courses(&self.conn)?;
                self.screen = Screen::CourseManager(CourseManagerScreen::new(courses));
            }
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingTeacher(TeacherForm::default()));
            }
            KeyCode::Char('-') => {
                if let Some(teacher) = self.current_teacher().cloned() {
                    self.clear_status();
                    return Ok(Mode::ConfirmTeacherDelete(ConfirmTeacherDelete::from(
                        teacher,
                    )));
                } else {
                    self.set_status("No teacher selected to remove.", StatusKind::Error);
                }
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(teacher) = self.current_teacher().cloned() {
                    self.clear_status();
                    return Ok(Mode::EditingTeacher {
                        id: teacher.id,
                        form: TeacherForm::from_teacher(&teacher),
                    });
                } else {
                    self.set_status("No teacher selected to edit.", StatusKind::Error);
                }
            }
            KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchState {
                    target: SearchTarget::Teachers,
                    query: String::new(),
                }));
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_courses_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let Screen::Courses(ref mut courses) = self.screen else {
            return Ok(Mode::Normal);
        };

        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc => {
                self.screen = Screen::Teachers;
                self.clear_status();
            }
            KeyCode::Up => courses.move_selection(-1),
            KeyCode::Down => courses.move_selection(1),
            KeyCode::Char('a') | KeyCode::Char('A') => {
                let teacher_id = courses.teacher.id;
                self.clear_status();
                let state = AssignCourseState::load(&self.conn, teacher_id)?;
                if state.available.is_empty() {
                    self.set_status(
                        "No unassigned courses. Press '+' to create one.",
                        StatusKind::Info,
                    );
                } else {
                    return Ok(Mode::AssigningCourse(state));
                }
            }
            KeyCode::Char('+') => {
                let teacher_id = courses.teacher.id;
                self.clear_status();
                return Ok(Mode::CreatingCourse {
                    teacher_id: Some(teacher_id),
                    form: CourseForm::default(),
                });
            }
            KeyCode::Char('-') => {
                let teacher_id = courses.teacher.id;
                if let Some(course) = courses.current_course().cloned() {
                    self.clear_status();
                    return Ok(Mode::ConfirmUnassign(ConfirmUnassign { teacher_id, course }));
                } else {
                    self.set_status("No course selected to unassign.", StatusKind::Error);
                }
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(course) = courses.current_course().cloned() {
                    self.clear_status();
                    return Ok(Mode::EditingCourse {
                        course_id: course.id,
                        form: CourseForm::from_course(&course),
                    });
                } else {
                    self.set_status("No course selected to edit.", StatusKind::Error);
                }
            }
            KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchState {
                    target: SearchTarget::TeacherCourses,
                    query: String::new(),
                }));
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_course_manager_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let Screen::CourseManager(ref mut manager) = self.screen else {
            return Ok(Mode::Normal);
        };

        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc => {
                self.screen = Screen::Teachers;
                self.clear_status();
            }
            KeyCode::Up => manager.move_selection(-1),
            KeyCode::Down => manager.move_selection(1),
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::CreatingCourse {
                    teacher_id: None,
                    form: CourseForm::default(),
                });
            }
            KeyCode::Char('-') => {
                if let Some(course) = manager.current_course().cloned() {
                    self.clear_status();
                    return Ok(Mode::ConfirmCourseDelete(ConfirmCourseDelete { course }));
                } else {
                    self.set_status("No course selected to delete.", StatusKind::Error);
                }
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(course) = manager.current_course().cloned() {
                    self.clear_status();
                    return Ok(Mode::EditingCourse {
                        course_id: course.id,
                        form: CourseForm::from_course(&course),
                    });
                } else {
                    self.set_status("No course selected to edit.", StatusKind::Error);
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_teacher(&mut self, code: KeyCode, mut form: TeacherForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok((name, age)) => match create_teacher(&self.conn, &name, age) {
                    Ok(teacher) => {
                        self.set_status(
                            format!("Added teacher {}.", teacher.full_name),
                            StatusKind::Info,
                        );
                        self.reload_teachers()?;
                        return Ok(Mode::Normal);
                    }
                    Err(err) => form.error = Some(surface_error(&err)),
                },
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::AddingTeacher(form))
    }

    fn handle_edit_teacher(
        &mut self,
        code: KeyCode,
        id: i64,
        mut form: TeacherForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok((name, age)) => match update_teacher(&self.conn, id, &name, age) {
                    Ok(()) => {
                        self.set_status(format!("Updated teacher {name}."), StatusKind::Info);
                        self.reload_teachers()?;
                        return Ok(Mode::Normal);
                    }
                    Err(err) => form.error = Some(surface_error(&err)),
                },
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::EditingTeacher { id, form })
    }

    fn handle_confirm_teacher_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmTeacherDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match delete_teacher(&self.conn, confirm.id) {
                    Ok(()) => {
                        self.set_status(
                            format!("Removed teacher {}.", confirm.full_name),
                            StatusKind::Info,
                        );
                        self.reload_teachers()?;
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                    }
                }
                Ok(Mode::Normal)
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmTeacherDelete(confirm)),
        }
    }

    fn handle_create_course(
        &mut self,
        code: KeyCode,
        teacher_id: Option<i64>,
        mut form: CourseForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok((name, hours)) => match create_course(&self.conn, &name, hours) {
                    Ok(course) => {
                        // Second, independent step: the course is already
                        // committed even if the assignment below fails.
                        if let Some(teacher_id) = teacher_id {
                            if let Err(err) = assign_course(&self.conn, teacher_id, course.id) {
                                self.set_status(
                                    format!(
                                        "Created course {} but could not assign it: {}",
                                        course.name,
                                        surface_error(&err)
                                    ),
                                    StatusKind::Error,
                                );
                                self.refresh_course_lists()?;
                                return Ok(Mode::Normal);
                            }
                        }
                        self.set_status(format!("Added course {}.", course.name), StatusKind::Info);
                        self.refresh_course_lists()?;
                        return Ok(Mode::Normal);
                    }
                    Err(err) => form.error = Some(surface_error(&err)),
                },
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::CreatingCourse { teacher_id, form })
    }

    fn handle_edit_course(
        &mut self,
        code: KeyCode,
        course_id: i64,
        mut form: CourseForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok((name, hours)) => match update_course(&self.conn, course_id, &name, hours) {
                    Ok(()) => {
                        self.set_status(format!("Updated course {name}."), StatusKind::Info);
                        self.refresh_course_lists()?;
                        return Ok(Mode::Normal);
                    }
                    Err(err) => form.error = Some(surface_error(&err)),
                },
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::EditingCourse { course_id, form })
    }

    fn handle_confirm_course_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmCourseDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match delete_course(&self.conn, confirm.course.id) {
                    Ok(()) => {
                        self.set_status(
                            format!("Deleted course {}.", confirm.course.name),
                            StatusKind::Info,
                        );
                        self.refresh_course_lists()?;
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                    }
                }
                Ok(Mode::Normal)
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmCourseDelete(confirm)),
        }
    }

    fn handle_assign_course(&mut self, code: KeyCode, mut state: AssignCourseState) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Up => state.move_selection(-1),
            KeyCode::Down => state.move_selection(1),
            KeyCode::Enter => {
                if let Some(course) = state.current_course().cloned() {
                    match assign_course(&self.conn, state.teacher_id, course.id) {
                        Ok(()) => {
                            self.set_status(
                                format!("Assigned course {}.", course.name),
                                StatusKind::Info,
                            );
                            self.refresh_course_lists()?;
                        }
                        Err(err) => {
                            self.set_status(surface_error(&err), StatusKind::Error);
                        }
                    }
                    return Ok(Mode::Normal);
                }
            }
            _ => {}
        }
        Ok(Mode::AssigningCourse(state))
    }

    fn handle_confirm_unassign(&mut self, code: KeyCode, confirm: ConfirmUnassign) -> Result<Mode> {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match unassign_course(&self.conn, confirm.teacher_id, confirm.course.id) {
                    Ok(()) => {
                        self.set_status(
                            format!("Unassigned course {}.", confirm.course.name),
                            StatusKind::Info,
                        );
                        self.refresh_course_lists()?;
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                    }
                }
                Ok(Mode::Normal)
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmUnassign(confirm)),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Enter => {
                let query = state.query.trim().to_string();
                if query.is_empty() {
                    return Ok(Mode::Normal);
                }
                match state.target {
                    SearchTarget::Teachers => self.run_teacher_lookup(&query)?,
                    SearchTarget::TeacherCourses => self.run_course_lookup(&query)?,
                }
                return Ok(Mode::Normal);
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.query.push(ch);
                }
            }
            _ => {}
        }
        Ok(Mode::Searching(state))
    }

    /// Exact-name teacher lookup driven by the search bar. A hit also moves
    /// the list selection onto the found row.
    fn run_teacher_lookup(&mut self, query: &str) -> Result<()> {
        match find_teacher_by_name(&self.conn, query)? {
            Some(teacher) => {
                if let Some(index) = self.teachers.iter().position(|t| t.id == teacher.id) {
                    self.selected = index;
                }
                self.set_status(
                    format!("Found {} (age {}).", teacher.full_name, teacher.age),
                    StatusKind::Info,
                );
            }
            None => {
                self.set_status(format!("Teacher '{query}' not found."), StatusKind::Error);
            }
        }
        Ok(())
    }

    /// Exact-name course lookup scoped to the teacher open in the detail
    /// view.
    fn run_course_lookup(&mut self, query: &str) -> Result<()> {
        let Screen::Courses(ref mut courses) = self.screen else {
            return Ok(());
        };
        match find_assigned_course(&self.conn, courses.teacher.id, query)? {
            Some(course) => {
                if let Some(index) = courses.courses.iter().position(|c| c.id == course.id) {
                    courses.selected = index;
                }
                let message = format!("Found {}.", course.display_line());
                self.set_status(message, StatusKind::Info);
            }
            None => {
                self.set_status(
                    format!("Course '{query}' not assigned to this teacher."),
                    StatusKind::Error,
                );
            }
        }
        Ok(())
    }

    /// Re-query the teacher list after a mutation, keeping the selection in
    /// bounds.
    fn reload_teachers(&mut self) -> Result<()> {
        self.teachers = fetch_teachers(&self.conn)?;
        if self.teachers.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.teachers.len() {
            self.selected = self.teachers.len() - 1;
        }
        Ok(())
    }

    /// Refresh whichever course listing is currently on screen after a
    /// course or assignment mutation.
    fn refresh_course_lists(&mut self) -> Result<()> {
        match &mut self.screen {
            Screen::Courses(courses) => courses.refresh(&self.conn)?,
            Screen::CourseManager(manager) => manager.set_courses(fetch_courses(&self.conn)?),
            Screen::Teachers => {}
        }
        Ok(())
    }

    fn current_teacher(&self) -> Option<&Teacher> {
        self.teachers.get(self.selected)
    }

    fn move_teacher_selection(&mut self, offset: isize) {
        if self.teachers.is_empty() {
            return;
        }
        let max = self.teachers.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, max) as usize;
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Teachers => self.draw_teacher_list(frame, content_area),
            Screen::Courses(courses) => self.draw_course_view(frame, content_area, courses),
            Screen::CourseManager(manager) => self.draw_course_manager(frame, content_area, manager),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingTeacher(form) => self.draw_teacher_form(frame, area, "Add Teacher", form),
            Mode::EditingTeacher { form, .. } => {
                self.draw_teacher_form(frame, area, "Edit Teacher", form)
            }
            Mode::ConfirmTeacherDelete(confirm) => {
                self.draw_confirm_teacher(frame, area, confirm)
            }
            Mode::CreatingCourse { form, teacher_id } => {
                let title = if teacher_id.is_some() {
                    "Create & Assign Course"
                } else {
                    "Create Course"
                };
                self.draw_course_form(frame, area, title, form)
            }
            Mode::EditingCourse { form, .. } => {
                self.draw_course_form(frame, area, "Edit Course", form)
            }
            Mode::ConfirmCourseDelete(confirm) => {
                self.draw_confirm_course_delete(frame, area, confirm)
            }
            Mode::AssigningCourse(state) => self.draw_assign_course(frame, area, state),
            Mode::ConfirmUnassign(confirm) => self.draw_confirm_unassign(frame, area, confirm),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_teacher_list(&self, frame: &mut Frame, area: Rect) {
        if self.teachers.is_empty() {
            let message = Paragraph::new("No teachers yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Teachers"));
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .teachers
            .iter()
            .map(|teacher| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        teacher.full_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("  (age {})", teacher.age)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Teachers"))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_course_view(&self, frame: &mut Frame, area: Rect, courses: &CourseScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                courses.teacher.full_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::raw(format!(
                "age {}  -  {} courses assigned",
                courses.teacher.age,
                courses.courses.len()
            ))),
        ])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Teacher"));
        frame.render_widget(header, chunks[0]);

        if courses.courses.is_empty() {
            let message =
                Paragraph::new("No courses assigned. Press 'a' to assign or '+' to create one.")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title("Courses"));
            frame.render_widget(message, chunks[1]);
            return;
        }

        self.render_course_list(frame, chunks[1], "Courses", &courses.courses, courses.selected);
    }

    fn draw_course_manager(&self, frame: &mut Frame, area: Rect, manager: &CourseManagerScreen) {
        if manager.courses.is_empty() {
            let message = Paragraph::new("No courses yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("All Courses"));
            frame.render_widget(message, area);
            return;
        }

        self.render_course_list(frame, area, "All Courses", &manager.courses, manager.selected);
    }

    fn render_course_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        courses: &[Course],
        selected: usize,
    ) {
        let items: Vec<ListItem> = courses
            .iter()
            .map(|course| ListItem::new(Line::from(course.display_line())))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::AssigningCourse(_)) => Line::from(vec![
                Span::styled("[Up/Down]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Assign   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::Searching(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Look up   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::Normal) => match self.screen {
                Screen::Teachers => Line::from(vec![
                    Span::styled("[Enter]", key_style),
                    Span::raw(" Courses   "),
                    Span::styled("[+]", key_style),
                    Span::raw(" Add   "),
                    Span::styled("[e]", key_style),
                    Span::raw(" Edit   "),
                    Span::styled("[-]", key_style),
                    Span::raw(" Remove   "),
                    Span::styled("[/]", key_style),
                    Span::raw(" Find   "),
                    Span::styled("[c]", key_style),
                    Span::raw(" All Courses   "),
                    Span::styled("[q]", key_style),
                    Span::raw(" Quit"),
                ]),
                Screen::Courses(_) => Line::from(vec![
                    Span::styled("[a]", key_style),
                    Span::raw(" Assign   "),
                    Span::styled("[+]", key_style),
                    Span::raw(" New Course   "),
                    Span::styled("[e]", key_style),
                    Span::raw(" Edit   "),
                    Span::styled("[-]", key_style),
                    Span::raw(" Unassign   "),
                    Span::styled("[/]", key_style),
                    Span::raw(" Find   "),
                    Span::styled("[Esc]", key_style),
                    Span::raw(" Back"),
                ]),
                Screen::CourseManager(_) => Line::from(vec![
                    Span::styled("[+]", key_style),
                    Span::raw(" Add   "),
                    Span::styled("[e]", key_style),
                    Span::raw(" Edit   "),
                    Span::styled("[-]", key_style),
                    Span::raw(" Delete   "),
                    Span::styled("[Esc]", key_style),
                    Span::raw(" Back"),
                ]),
            },
            _ => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
        }
    }

    fn draw_teacher_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &TeacherForm) {
        let popup = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup);

        let mut lines = vec![
            form.build_line("Full name", TeacherField::Name),
            form.build_line("Age", TeacherField::Age),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let block = Block::default().borders(Borders::ALL).title(title.to_string());
        let paragraph = Paragraph::new(lines)
            .block(block.clone())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup);

        let inner = block.inner(popup);
        let (row, label_len, value_len) = match form.active {
            TeacherField::Name => (0, "Full name: ".len(), form.value_len(TeacherField::Name)),
            TeacherField::Age => (1, "Age: ".len(), form.value_len(TeacherField::Age)),
        };
        self.place_form_cursor(frame, inner, row, label_len, value_len);
    }

    fn draw_course_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &CourseForm) {
        let popup = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup);

        let mut lines = vec![
            form.build_line("Name", CourseField::Name),
            form.build_line("Hours", CourseField::Hours),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let block = Block::default().borders(Borders::ALL).title(title.to_string());
        let paragraph = Paragraph::new(lines)
            .block(block.clone())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup);

        let inner = block.inner(popup);
        let (row, label_len, value_len) = match form.active {
            CourseField::Name => (0, "Name: ".len(), form.value_len(CourseField::Name)),
            CourseField::Hours => (1, "Hours: ".len(), form.value_len(CourseField::Hours)),
        };
        self.place_form_cursor(frame, inner, row, label_len, value_len);
    }

    /// Position the terminal cursor at the end of the active form field so
    /// typing feels like a regular input box.
    fn place_form_cursor(
        &self,
        frame: &mut Frame,
        inner: Rect,
        row: u16,
        label_len: usize,
        value_len: usize,
    ) {
        if inner.height <= row {
            return;
        }
        let cursor_x = inner.x + (label_len + value_len) as u16;
        let cursor_y = inner.y + row;
        if cursor_x < inner.right() {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_confirm_teacher(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmTeacherDelete) {
        self.draw_confirm_dialog(
            frame,
            area,
            "Remove Teacher",
            vec![
                Line::from(format!("Remove teacher {}?", confirm.full_name)),
                Line::from("All of their course assignments will be removed as well."),
            ],
        );
    }

    fn draw_confirm_course_delete(
        &self,
        frame: &mut Frame,
        area: Rect,
        confirm: &ConfirmCourseDelete,
    ) {
        self.draw_confirm_dialog(
            frame,
            area,
            "Delete Course",
            vec![
                Line::from(format!("Delete course {}?", confirm.course.name)),
                Line::from("It will disappear from every teacher it is assigned to."),
            ],
        );
    }

    fn draw_confirm_unassign(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmUnassign) {
        self.draw_confirm_dialog(
            frame,
            area,
            "Unassign Course",
            vec![
                Line::from(format!(
                    "Unassign course {} from this teacher?",
                    confirm.course.name
                )),
                Line::from("The course itself is kept."),
            ],
        );
    }

    fn draw_confirm_dialog(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        mut lines: Vec<Line<'static>>,
    ) {
        let popup = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup);

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "[Y]",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("es   "),
            Span::styled(
                "[N]",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("o"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup);
    }

    fn draw_assign_course(&self, frame: &mut Frame, area: Rect, state: &AssignCourseState) {
        let popup = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup);

        let items: Vec<ListItem> = state
            .available
            .iter()
            .map(|course| ListItem::new(Line::from(course.display_line())))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Assign Course"))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(Some(state.selected));
        frame.render_stateful_widget(list, popup, &mut list_state);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let title = match state.target {
            SearchTarget::Teachers => "Find Teacher",
            SearchTarget::TeacherCourses => "Find Assigned Course",
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let paragraph = Paragraph::new(Span::raw(format!("Name: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Name: ".len() as u16 + state.query.chars().count() as u16;
        let cursor_y = inner.y;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}
