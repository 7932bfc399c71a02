use std::mem;

use anyhow::{anyhow, Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
    Wrap,
};
use ratatui::Frame;
use rusqlite::Connection;
use tracing::{error, info, warn};

use crate::db::{
    add_department, add_employee, add_role, list_departments, list_employees, list_roles,
    update_employee_role,
};
use crate::error::Error;

use super::forms::{PromptForm, Request};
use super::helpers::{centered_rect, column_widths, surface_error};
use super::screens::{Action, ResultsScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// What fills the main area.
enum Screen {
    Menu,
    Results(ResultsScreen),
}

/// Overlay state on top of the current screen.
enum Mode {
    Normal,
    Prompting(PromptForm),
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

/// Menu controller state. Owns the single connection for the whole session.
pub struct App {
    conn: Connection,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            selected: 0,
            screen: Screen::Menu,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Show an informational message in the footer.
    pub fn show_info<S: Into<String>>(&mut self, text: S) {
        self.set_status(text, StatusKind::Info);
    }

    /// Show an error message in the footer.
    pub fn show_error<S: Into<String>>(&mut self, text: S) {
        self.set_status(text, StatusKind::Error);
    }

    /// Feed one key press through the controller. Returns `true` once the user
    /// asked to leave.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => match self.screen {
                Screen::Menu => self.handle_menu_key(code, &mut exit)?,
                Screen::Results(_) => self.handle_results_key(code)?,
            },
            Mode::Prompting(form) => self.handle_prompt(code, form)?,
        };

        Ok(exit)
    }

    fn handle_menu_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = Action::ALL.len() - 1,
            KeyCode::Enter => return self.select_action(Action::ALL[self.selected], exit),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_results_key(&mut self, code: KeyCode) -> Result<Mode> {
        if let Screen::Results(results) = &mut self.screen {
            match code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Backspace => {
                    self.screen = Screen::Menu;
                }
                KeyCode::Up | KeyCode::Char('k') => results.move_selection(-1),
                KeyCode::Down | KeyCode::Char('j') => results.move_selection(1),
                KeyCode::PageUp => results.move_selection(-10),
                KeyCode::PageDown => results.move_selection(10),
                KeyCode::Home => results.select_first(),
                KeyCode::End => results.select_last(),
                _ => {}
            }
        }
        Ok(Mode::Normal)
    }

    fn handle_prompt(&mut self, code: KeyCode, mut form: PromptForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status(
                    format!("{} cancelled.", form.action.label()),
                    StatusKind::Info,
                );
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if form.on_last_field() {
                    return Ok(self.submit_form(form));
                }
                form.next_field();
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::Prompting(form))
    }

    /// Dispatch a menu entry. View actions run their query straight away;
    /// the others open their prompts.
    fn select_action(&mut self, action: Action, exit: &mut bool) -> Result<Mode> {
        match action {
            Action::Exit => {
                *exit = true;
                Ok(Mode::Normal)
            }
            Action::ViewDepartments | Action::ViewRoles | Action::ViewEmployees => {
                match self.load_results(action) {
                    Ok(results) => {
                        info!(action = action.label(), rows = results.rows.len(), "listed");
                        self.clear_status();
                        self.screen = Screen::Results(results);
                    }
                    Err(err) => self.report_failure(action, &err),
                }
                Ok(Mode::Normal)
            }
            Action::AddDepartment
            | Action::AddRole
            | Action::AddEmployee
            | Action::UpdateEmployeeRole => {
                let form = PromptForm::for_action(action)
                    .ok_or_else(|| anyhow!("no prompts defined for {}", action.label()))?;
                self.clear_status();
                Ok(Mode::Prompting(form))
            }
        }
    }

    fn load_results(&self, action: Action) -> Result<ResultsScreen> {
        match action {
            Action::ViewDepartments => Ok(ResultsScreen::departments(
                list_departments(&self.conn).context("failed to list departments")?,
            )),
            Action::ViewRoles => Ok(ResultsScreen::roles(
                list_roles(&self.conn).context("failed to list roles")?,
            )),
            Action::ViewEmployees => Ok(ResultsScreen::employees(
                list_employees(&self.conn).context("failed to list employees")?,
            )),
            other => Err(anyhow!("\"{}\" has no table to show", other.label())),
        }
    }

    /// Parse and run a completed form. Unparseable answers keep the form open;
    /// a database failure closes it and returns to the menu.
    fn submit_form(&mut self, mut form: PromptForm) -> Mode {
        let request = match form.parse_inputs() {
            Ok(request) => request,
            Err(err) => {
                let message = err.to_string();
                warn!(action = form.action.label(), %message, "rejected input");
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
                return Mode::Prompting(form);
            }
        };

        match self.execute(request) {
            Ok(message) => {
                info!(action = form.action.label(), %message, "action completed");
                self.set_status(message, StatusKind::Info);
            }
            Err(err) => self.report_failure(form.action, &err),
        }
        Mode::Normal
    }

    /// Run one request against the store and describe the outcome.
    fn execute(&self, request: Request) -> Result<String> {
        match request {
            Request::AddDepartment { name } => {
                let department =
                    add_department(&self.conn, &name).context("failed to add department")?;
                Ok(format!(
                    "Department added successfully (ID {}).",
                    department.id
                ))
            }
            Request::AddRole {
                title,
                salary,
                department_id,
            } => {
                let role = add_role(&self.conn, &title, salary, department_id)
                    .context("failed to add role")?;
                Ok(format!("Role added successfully (ID {}).", role.id))
            }
            Request::AddEmployee {
                first_name,
                last_name,
                role_id,
                manager_id,
            } => {
                let employee = add_employee(&self.conn, &first_name, &last_name, role_id, manager_id)
                    .context("failed to add employee")?;
                Ok(format!("Employee added successfully (ID {}).", employee.id))
            }
            Request::UpdateEmployeeRole {
                employee_id,
                role_id,
            } => {
                let changed = update_employee_role(&self.conn, employee_id, role_id)
                    .context("failed to update employee role")?;
                if changed == 0 {
                    Ok(format!(
                        "No employee with ID {employee_id}; nothing was updated."
                    ))
                } else {
                    Ok("Employee role updated successfully.".to_string())
                }
            }
        }
    }

    /// Log a failed action and put it in the footer. The session carries on.
    fn report_failure(&mut self, action: Action, err: &anyhow::Error) {
        let cause = surface_error(err);
        let rejected = err
            .downcast_ref::<Error>()
            .is_some_and(Error::is_constraint_violation);

        let message = if rejected {
            warn!(action = action.label(), error = %format!("{err:#}"), "rejected by database");
            format!("{} was rejected by the database: {cause}", action.label())
        } else {
            error!(action = action.label(), error = %format!("{err:#}"), "action failed");
            format!("{} failed: {cause}", action.label())
        };
        self.set_status(message, StatusKind::Error);
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
            Screen::Menu => self.draw_menu(frame, content_area),
            Screen::Results(results) => self.draw_results(frame, content_area, results),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::Prompting(form) = &self.mode {
            self.draw_prompt_form(frame, area, form);
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Action::ALL
            .iter()
            .map(|action| ListItem::new(action.label()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("What would you like to do?"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect, results: &ResultsScreen) {
        let widths = column_widths(&results.headers, &results.rows);

        let header = Row::new(results.headers.iter().map(|header| Cell::from(*header)))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        let rows = results
            .rows
            .iter()
            .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))));

        let title = format!("{} ({})", results.title, results.rows.len());
        let table = Table::new(rows, widths.into_iter().map(Constraint::Length))
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .column_spacing(3)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let selected = (!results.rows.is_empty()).then_some(results.selected);
        let mut state = TableState::default().with_selected(selected);
        frame.render_stateful_widget(table, area, &mut state);
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
            (_, Mode::Prompting(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Next / Submit   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch field   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::Results(_), Mode::Normal) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back to menu"),
            ]),
            (Screen::Menu, Mode::Normal) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Select   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_prompt_form(&self, frame: &mut Frame, area: Rect, form: &PromptForm) {
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(form.action.label())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = (0..form.fields.len())
            .map(|idx| form.build_line(idx))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter for next prompt • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        if inner.width > 0 {
            let cursor_x = (inner.x + form.cursor_offset() as u16).min(inner.right() - 1);
            let cursor_y = inner.y + form.active as u16;
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn move_selection(&mut self, offset: isize) {
        let len = Action::ALL.len() as isize;
        let new = (self.selected as isize + offset).rem_euclid(len);
        self.selected = new as usize;
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::db::{initialize, open_in_memory, Scripts};

    fn app() -> App {
        let conn = open_in_memory().unwrap();
        initialize(&conn, &Scripts::bundled()).unwrap();
        App::new(conn)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code).unwrap()
    }

    fn choose(app: &mut App, action: Action) -> bool {
        let idx = Action::ALL.iter().position(|a| *a == action).unwrap();
        press(app, KeyCode::Home);
        for _ in 0..idx {
            press(app, KeyCode::Down);
        }
        press(app, KeyCode::Enter)
    }

    /// Type each answer and confirm it with Enter, like a sequence of prompts.
    fn answer(app: &mut App, answers: &[&str]) {
        for text in answers {
            for ch in text.chars() {
                press(app, KeyCode::Char(ch));
            }
            press(app, KeyCode::Enter);
        }
    }

    fn status(app: &App) -> (&str, bool) {
        let status = app.status.as_ref().expect("status message");
        (
            status.text.as_str(),
            matches!(status.kind, StatusKind::Error),
        )
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn exit_action_ends_the_session() {
        let mut app = app();
        assert!(choose(&mut app, Action::Exit));
    }

    #[test]
    fn q_on_the_menu_quits() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn menu_selection_wraps() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        assert_eq!(Action::ALL[app.selected], Action::Exit);
        press(&mut app, KeyCode::Down);
        assert_eq!(Action::ALL[app.selected], Action::ViewDepartments);
    }

    #[test]
    fn adding_a_department_reports_success() {
        let mut app = app();
        assert!(!choose(&mut app, Action::AddDepartment));
        assert!(matches!(app.mode, Mode::Prompting(_)));

        answer(&mut app, &["Research"]);

        assert!(matches!(app.mode, Mode::Normal));
        let (text, is_error) = status(&app);
        assert!(!is_error);
        assert!(text.starts_with("Department added successfully"));
        assert!(list_departments(&app.conn)
            .unwrap()
            .iter()
            .any(|d| d.name == "Research"));
    }

    #[test]
    fn storage_failure_returns_to_the_menu_and_session_continues() {
        let mut app = app();
        choose(&mut app, Action::AddRole);
        answer(&mut app, &["Ghost", "100", "999"]);

        assert!(matches!(app.mode, Mode::Normal));
        assert!(matches!(app.screen, Screen::Menu));
        let (text, is_error) = status(&app);
        assert!(is_error);
        assert!(text.starts_with("Add a role was rejected by the database"));

        assert!(!choose(&mut app, Action::ViewRoles));
        match &app.screen {
            Screen::Results(results) => {
                assert!(!results.rows.is_empty());
                assert!(results.rows.iter().all(|row| row[1] != "Ghost"));
            }
            Screen::Menu => panic!("expected the roles table"),
        }
    }

    #[test]
    fn unparseable_salary_keeps_the_prompt_open() {
        let mut app = app();
        choose(&mut app, Action::AddRole);
        answer(&mut app, &["Engineer", "lots", "1"]);

        match &app.mode {
            Mode::Prompting(form) => {
                assert_eq!(form.error.as_deref(), Some("Salary must be a number."));
            }
            Mode::Normal => panic!("form should stay open"),
        }
    }

    #[test]
    fn updating_an_unknown_employee_is_informational() {
        let mut app = app();
        choose(&mut app, Action::UpdateEmployeeRole);
        answer(&mut app, &["999", "1"]);

        let (text, is_error) = status(&app);
        assert!(!is_error);
        assert_eq!(text, "No employee with ID 999; nothing was updated.");
    }

    #[test]
    fn adding_an_employee_with_a_manager_shows_in_the_table() {
        let mut app = app();
        choose(&mut app, Action::AddEmployee);
        answer(&mut app, &["Grace", "Hopper", "2", "1"]);
        assert!(!status(&app).1);

        choose(&mut app, Action::ViewEmployees);
        match &app.screen {
            Screen::Results(results) => {
                let row = results
                    .rows
                    .iter()
                    .find(|row| row[1] == "Grace")
                    .expect("new employee row");
                assert_eq!(row[6], "Ashley Rodriguez");
            }
            Screen::Menu => panic!("expected the employees table"),
        }
    }

    #[test]
    fn escape_cancels_a_prompt() {
        let mut app = app();
        choose(&mut app, Action::AddDepartment);
        press(&mut app, KeyCode::Char('X'));
        press(&mut app, KeyCode::Esc);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(status(&app).0, "Add a department cancelled.");
    }

    #[test]
    fn results_table_renders_rows_and_returns_to_menu() {
        let mut app = app();
        choose(&mut app, Action::ViewEmployees);

        let screen = render(&app);
        assert!(screen.contains("View all employees (8)"));
        assert!(screen.contains("Ashley"));
        assert!(screen.contains("Manager"));

        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.screen, Screen::Menu));
        assert!(render(&app).contains("Update an employee role"));
    }
}
