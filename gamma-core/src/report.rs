//! Console summary of a conversion.

use serde::Serialize;
use std::fmt::Write;

use crate::config::FAULT_LOG_FILE;
use crate::pipeline::PipelineOutput;

/// Banner title.
pub const TITLE: &str = "ANGLE CUTTING SYSTEM - GAMMA";

/// Column-group and description overview printed after a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub profile_codes: Vec<String>,
    pub descriptions: Vec<String>,
}

impl From<&PipelineOutput> for Summary {
    fn from(output: &PipelineOutput) -> Self {
        Self {
            profile_codes: output.profile_codes.clone(),
            descriptions: output.descriptions.clone(),
        }
    }
}

impl Summary {
    /// Render the summary: group numbers, profile codes, numbered descriptions.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let numbers: Vec<String> = (1..=self.profile_codes.len())
            .map(|i| i.to_string())
            .collect();
        writeln!(out, "\n\n\t  {}", numbers.join("\t")).unwrap();
        writeln!(out, "\t  {}", self.profile_codes.join("\t")).unwrap();

        for (i, description) in self.descriptions.iter().enumerate() {
            writeln!(out, "{}  {}", i + 1, description).unwrap();
        }

        out
    }
}

/// Boxed banner with the title centred in `width` columns.
pub fn render_banner(width: usize) -> String {
    let inner = width.max(TITLE.chars().count() + 4) - 2;
    let horizontal = "─".repeat(inner);
    format!(
        "╭{h}╮\n│{title:^inner$}│\n╰{h}╯\n",
        h = horizontal,
        title = TITLE,
        inner = inner
    )
}

/// Message shown once per skipped row, after the fault is logged.
pub fn fault_notice() -> String {
    format!(
        "An error occurred. Please check '{}' for details.",
        FAULT_LOG_FILE
    )
}

/// Message shown after the output file is written.
pub fn saved_message(file_name: &str) -> String {
    format!("\n\nFile '{}' has been saved successfully.\n", file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_summary() {
        let summary = Summary {
            profile_codes: vec!["PR70".to_string(), "PR90".to_string()],
            descriptions: vec!["Window A".to_string(), "Door B".to_string()],
        };
        assert_eq!(
            summary.render(),
            "\n\n\t  1\t2\n\t  PR70\tPR90\n1  Window A\n2  Door B\n"
        );
    }

    #[test]
    fn test_render_empty_summary() {
        assert_eq!(Summary::default().render(), "\n\n\t  \n\t  \n");
    }

    #[test]
    fn test_banner_width() {
        let banner = render_banner(40);
        let lines: Vec<&str> = banner.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(line.chars().count(), 40);
        }
        assert!(lines[1].contains(TITLE));

        // Never narrower than the title
        let narrow = render_banner(10);
        assert!(narrow.lines().nth(1).unwrap().contains(TITLE));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            fault_notice(),
            "An error occurred. Please check 'error_log.txt' for details."
        );
        assert_eq!(
            saved_message("batch.txt"),
            "\n\nFile 'batch.txt' has been saved successfully.\n"
        );
    }
}
