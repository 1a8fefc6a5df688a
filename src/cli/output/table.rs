//! Table output for the roles command, using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::cli::commands::roles::RoleInfo;

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format the crew's roles as a table
    pub fn format_roles(&self, roles: &[RoleInfo]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Step").add_attribute(Attribute::Bold),
            Cell::new("Role").add_attribute(Attribute::Bold),
            Cell::new("Id").add_attribute(Attribute::Bold),
            Cell::new("Next").add_attribute(Attribute::Bold),
            Cell::new("Tools").add_attribute(Attribute::Bold),
        ]);

        for (i, role) in roles.iter().enumerate() {
            let name_cell = if self.use_colors {
                Cell::new(&role.name).fg(Color::Cyan)
            } else {
                Cell::new(&role.name)
            };
            let tools = if role.tools.is_empty() {
                "-".to_string()
            } else {
                role.tools.join(", ")
            };

            table.add_row(vec![
                Cell::new(i + 1),
                name_cell,
                Cell::new(&role.id),
                Cell::new(&role.successor),
                Cell::new(tools),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if the terminal supports colors
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
