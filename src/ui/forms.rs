use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::{Error, Result};

use super::screens::Action;

/// One text prompt inside a [`PromptForm`].
#[derive(Clone)]
pub(crate) struct PromptField {
    pub(crate) message: &'static str,
    pub(crate) value: String,
    pub(crate) optional: bool,
}

impl PromptField {
    fn required(message: &'static str) -> Self {
        Self {
            message,
            value: String::new(),
            optional: false,
        }
    }

    fn optional(message: &'static str) -> Self {
        Self {
            optional: true,
            ..Self::required(message)
        }
    }
}

/// A typed request built from a completed form, ready for the data layer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Request {
    AddDepartment {
        name: String,
    },
    AddRole {
        title: String,
        salary: f64,
        department_id: i64,
    },
    AddEmployee {
        first_name: String,
        last_name: String,
        role_id: i64,
        manager_id: Option<i64>,
    },
    UpdateEmployeeRole {
        employee_id: i64,
        role_id: i64,
    },
}

/// Sequential prompts for the actions that need input. Enter moves to the
/// next prompt and submits from the last one.
#[derive(Clone)]
pub(crate) struct PromptForm {
    pub(crate) action: Action,
    pub(crate) fields: Vec<PromptField>,
    pub(crate) active: usize,
    pub(crate) error: Option<String>,
}

impl PromptForm {
    /// Build the prompts for `action`, or `None` when the action asks nothing.
    pub(crate) fn for_action(action: Action) -> Option<Self> {
        let fields = match action {
            Action::AddDepartment => vec![PromptField::required(
                "Enter the name of the department:",
            )],
            Action::AddRole => vec![
                PromptField::required("Enter the title of the role:"),
                PromptField::required("Enter the salary for the role:"),
                PromptField::required("Enter the department ID for the role:"),
            ],
            Action::AddEmployee => vec![
                PromptField::required("Enter the first name of the employee:"),
                PromptField::required("Enter the last name of the employee:"),
                PromptField::required("Enter the role ID for the employee:"),
                PromptField::optional(
                    "Enter the manager ID for the employee (leave blank if none):",
                ),
            ],
            Action::UpdateEmployeeRole => vec![
                PromptField::required("Enter the employee ID to update:"),
                PromptField::required("Enter the new role ID:"),
            ],
            Action::ViewDepartments | Action::ViewRoles | Action::ViewEmployees | Action::Exit => {
                return None
            }
        };

        Some(Self {
            action,
            fields,
            active: 0,
            error: None,
        })
    }

    /// Whether the active prompt is the last one, so Enter should submit.
    pub(crate) fn on_last_field(&self) -> bool {
        self.active + 1 >= self.fields.len()
    }

    pub(crate) fn next_field(&mut self) {
        self.active = (self.active + 1) % self.fields.len();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = (self.active + self.fields.len() - 1) % self.fields.len();
    }

    /// Append a character to the active prompt. Control characters are
    /// ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.fields[self.active].value.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.fields[self.active].value.pop();
    }

    /// Turn the raw answers into a [`Request`]. Only the numeric fields are
    /// checked here; everything else is left to the database constraints.
    pub(crate) fn parse_inputs(&self) -> Result<Request> {
        let text = |idx: usize| self.fields[idx].value.trim().to_string();

        match self.action {
            Action::AddDepartment => Ok(Request::AddDepartment { name: text(0) }),
            Action::AddRole => Ok(Request::AddRole {
                title: text(0),
                salary: parse_salary(&self.fields[1].value)?,
                department_id: parse_id("Department ID", &self.fields[2].value)?,
            }),
            Action::AddEmployee => Ok(Request::AddEmployee {
                first_name: text(0),
                last_name: text(1),
                role_id: parse_id("Role ID", &self.fields[2].value)?,
                manager_id: parse_optional_id("Manager ID", &self.fields[3].value)?,
            }),
            Action::UpdateEmployeeRole => Ok(Request::UpdateEmployeeRole {
                employee_id: parse_id("Employee ID", &self.fields[0].value)?,
                role_id: parse_id("Role ID", &self.fields[1].value)?,
            }),
            Action::ViewDepartments | Action::ViewRoles | Action::ViewEmployees | Action::Exit => {
                Err(Error::InvalidInput(format!(
                    "\"{}\" takes no input.",
                    self.action.label()
                )))
            }
        }
    }

    /// Render one prompt line, highlighting the active one.
    pub(crate) fn build_line(&self, idx: usize) -> Line<'static> {
        let field = &self.fields[idx];
        let is_active = idx == self.active;

        let display = if field.value.is_empty() {
            if field.optional {
                "<optional>".to_string()
            } else {
                "<required>".to_string()
            }
        } else {
            field.value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if field.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{} ", field.message)),
            Span::styled(display, style),
        ])
    }

    /// Column at which the cursor sits on the active prompt line.
    pub(crate) fn cursor_offset(&self) -> usize {
        let field = &self.fields[self.active];
        field.message.chars().count() + 1 + field.value.chars().count()
    }
}

fn parse_id(name: &str, raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidInput(format!("{name} is required.")));
    }
    raw.parse::<i64>()
        .map_err(|_| Error::InvalidInput(format!("{name} must be a whole number.")))
}

fn parse_optional_id(name: &str, raw: &str) -> Result<Option<i64>> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_id(name, raw).map(Some)
    }
}

fn parse_salary(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidInput("Salary is required.".into()));
    }
    match raw.parse::<f64>() {
        Ok(salary) if salary.is_finite() => Ok(salary),
        _ => Err(Error::InvalidInput("Salary must be a number.".into())),
    }
}
