use crate::models::{format_salary, Department, EmployeeListing, RoleListing};

/// Menu entries in the order they are shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployeeRole,
    Exit,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::ViewDepartments,
        Action::ViewRoles,
        Action::ViewEmployees,
        Action::AddDepartment,
        Action::AddRole,
        Action::AddEmployee,
        Action::UpdateEmployeeRole,
        Action::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::ViewDepartments => "View all departments",
            Action::ViewRoles => "View all roles",
            Action::ViewEmployees => "View all employees",
            Action::AddDepartment => "Add a department",
            Action::AddRole => "Add a role",
            Action::AddEmployee => "Add an employee",
            Action::UpdateEmployeeRole => "Update an employee role",
            Action::Exit => "Exit",
        }
    }
}

/// Rows from one of the "View all" queries, already formatted as text.
pub(crate) struct ResultsScreen {
    pub(crate) title: &'static str,
    pub(crate) headers: Vec<&'static str>,
    pub(crate) rows: Vec<Vec<String>>,
    pub(crate) selected: usize,
}

impl ResultsScreen {
    fn new(title: &'static str, headers: Vec<&'static str>, rows: Vec<Vec<String>>) -> Self {
        Self {
            title,
            headers,
            rows,
            selected: 0,
        }
    }

    pub(crate) fn departments(departments: Vec<Department>) -> Self {
        let rows = departments
            .into_iter()
            .map(|d| vec![d.id.to_string(), d.name])
            .collect();
        Self::new(Action::ViewDepartments.label(), vec!["ID", "Name"], rows)
    }

    pub(crate) fn roles(roles: Vec<RoleListing>) -> Self {
        let rows = roles
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.title,
                    r.department,
                    format_salary(r.salary),
                ]
            })
            .collect();
        Self::new(
            Action::ViewRoles.label(),
            vec!["ID", "Title", "Department", "Salary"],
            rows,
        )
    }

    pub(crate) fn employees(employees: Vec<EmployeeListing>) -> Self {
        let rows = employees
            .into_iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.first_name,
                    e.last_name,
                    e.title,
                    e.department,
                    format_salary(e.salary),
                    e.manager.unwrap_or_default(),
                ]
            })
            .collect();
        Self::new(
            Action::ViewEmployees.label(),
            vec![
                "ID",
                "First Name",
                "Last Name",
                "Title",
                "Department",
                "Salary",
                "Manager",
            ],
            rows,
        )
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_eight_actions_ending_with_exit() {
        let labels: Vec<_> = Action::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), 8);
        assert_eq!(labels[0], "View all departments");
        assert_eq!(labels[6], "Update an employee role");
        assert_eq!(labels.last(), Some(&"Exit"));
    }

    #[test]
    fn missing_manager_renders_as_blank_cell() {
        let screen = ResultsScreen::employees(vec![EmployeeListing {
            id: 4,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            title: "Engineer".into(),
            department: "Engineering".into(),
            salary: 85000.0,
            manager: None,
        }]);
        assert_eq!(screen.headers.len(), screen.rows[0].len());
        assert_eq!(screen.rows[0][5], "85000");
        assert_eq!(screen.rows[0][6], "");
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut screen = ResultsScreen::departments(vec![
            Department {
                id: 1,
                name: "Engineering".into(),
            },
            Department {
                id: 2,
                name: "Finance".into(),
            },
        ]);
        screen.move_selection(-3);
        assert_eq!(screen.selected, 0);
        screen.move_selection(5);
        assert_eq!(screen.selected, 1);
        screen.select_first();
        assert_eq!(screen.selected, 0);
        screen.select_last();
        assert_eq!(screen.selected, 1);
    }
}
