// Fri Oct 16 2026 - Alex

use colored::Colorize;

const MAX_CAUSES: usize = 10;

/// Prints top-level failures with their cause chain.
pub struct ErrorDisplay {
    show_cause_chain: bool,
    color_enabled: bool,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self {
            show_cause_chain: true,
            color_enabled: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    pub fn without_cause_chain(mut self) -> Self {
        self.show_cause_chain = false;
        self
    }

    pub fn format(&self, error: &anyhow::Error) -> String {
        let header = if self.color_enabled {
            "Error:".red().bold().to_string()
        } else {
            "Error:".to_string()
        };
        let mut output = format!("{} {}\n", header, error);

        if !self.show_cause_chain {
            return output;
        }

        let arrow = if self.color_enabled {
            "→".yellow().to_string()
        } else {
            "->".to_string()
        };

        for (depth, cause) in error.chain().skip(1).enumerate() {
            if depth == MAX_CAUSES {
                output.push_str("  ... (cause chain truncated)\n");
                break;
            }
            output.push_str(&format!("  {} Caused by: {}\n", arrow, cause));
        }

        output
    }

    pub fn print(&self, error: &anyhow::Error) {
        eprint!("{}", self.format(error));
    }
}

impl Default for ErrorDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cause_chain_is_listed() {
        let root = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = Err::<(), _>(root)
            .context("loading scan.yaml")
            .unwrap_err();

        let text = ErrorDisplay::new().without_colors().format(&error);
        assert_eq!(text, "Error: loading scan.yaml\n  -> Caused by: no such file\n");
    }

    #[test]
    fn test_chain_can_be_hidden() {
        let error = anyhow::anyhow!("top").context("outer");
        let text = ErrorDisplay::new().without_colors().without_cause_chain().format(&error);
        assert_eq!(text, "Error: outer\n");
    }
}
