// maskedemail-cli/src/output.rs
use maskedemail_client::{MaskedEmail, MaskedEmailState};

/// Minimal tab-aligned table: every column is padded to its widest cell,
/// columns separated by a single space.
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: &[&str]) -> Self {
        Self {
            rows: vec![header.iter().map(|h| h.to_string()).collect()],
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn render(&self) -> String {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for row in &self.rows {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                line.push_str(cell);
                if i + 1 < row.len() {
                    for _ in cell.chars().count()..widths[i] {
                        line.push(' ');
                    }
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Render the `list` output. Deleted aliases are hidden unless
/// `show_deleted`; this is a view decision, the client returns them as the
/// service does.
pub fn masked_email_table(emails: &[MaskedEmail], show_deleted: bool, all_fields: bool) -> String {
    let mut table = if all_fields {
        Table::new(&[
            "Masked Email",
            "For Domain",
            "Description",
            "State",
            "ID",
            "Created At",
            "Last Email At",
        ])
    } else {
        Table::new(&["Masked Email", "For Domain", "Description", "State"])
    };

    for email in emails {
        if email.state == MaskedEmailState::Deleted && !show_deleted {
            continue;
        }

        let mut cells = vec![
            email.email.clone(),
            email.for_domain.trim().to_string(),
            email.description.trim().to_string(),
            email.state.to_string(),
        ];
        if all_fields {
            cells.push(email.id.clone());
            cells.push(email.created_at.clone().unwrap_or_default());
            cells.push(email.last_message_at.clone().unwrap_or_default());
        }
        table.row(cells);
    }

    table.render()
}

/// Print a styled success message
pub fn print_success(message: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{} {}\n", console::style("✓").green(), message));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(id: &str, email: &str, state: MaskedEmailState) -> MaskedEmail {
        MaskedEmail {
            id: id.to_string(),
            email: email.to_string(),
            state,
            for_domain: "example.com".to_string(),
            description: String::new(),
            created_by: "maskedemail-cli".to_string(),
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            last_message_at: None,
        }
    }

    #[test]
    fn test_table_pads_columns() {
        let mut table = Table::new(&["A", "Bee"]);
        table.row(vec!["longer".to_string(), "x".to_string()]);
        assert_eq!(table.render(), "A      Bee\nlonger x\n");
    }

    #[test]
    fn test_list_hides_deleted_by_default() {
        let emails = vec![
            alias("m1", "a@mask.com", MaskedEmailState::Enabled),
            alias("m2", "b@mask.com", MaskedEmailState::Deleted),
        ];

        let rendered = masked_email_table(&emails, false, false);
        assert!(rendered.contains("a@mask.com"));
        assert!(!rendered.contains("b@mask.com"));

        let with_deleted = masked_email_table(&emails, true, false);
        assert!(with_deleted.contains("b@mask.com"));
        assert!(with_deleted.contains("deleted"));
    }

    #[test]
    fn test_all_fields_adds_id_and_timestamps() {
        let emails = vec![alias("m1", "a@mask.com", MaskedEmailState::Enabled)];
        let rendered = masked_email_table(&emails, false, true);
        assert!(rendered.contains("ID"));
        assert!(rendered.contains("m1"));
        assert!(rendered.contains("2024-01-01T00:00:00Z"));
    }
}
