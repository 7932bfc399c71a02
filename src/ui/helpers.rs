use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for the prompt dialog.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Width of each column: the longest of the header and every cell, counted in
/// characters.
pub(crate) fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<u16> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let widest_cell = rows
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            widest_cell.max(header.chars().count()) as u16
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_cover_headers_and_cells() {
        let rows = vec![
            vec!["1".to_string(), "Engineering".to_string()],
            vec!["12".to_string(), "HR".to_string()],
        ];
        assert_eq!(column_widths(&["ID", "Name"], &rows), vec![2, 11]);
        assert_eq!(column_widths(&["Identifier"], &[]), vec![10]);
    }

    #[test]
    fn surface_error_prefers_the_root_cause() {
        let err = anyhow::anyhow!("FOREIGN KEY constraint failed").context("failed to add role");
        assert_eq!(surface_error(&err), "FOREIGN KEY constraint failed");
    }
}
