// Fri Oct 16 2026 - Alex

use colored::*;

pub struct Banner {
    title: String,
    subtitle: Option<String>,
    version: Option<String>,
    use_color: bool,
    width: usize,
}

impl Banner {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            version: None,
            use_color: true,
            width: 60,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn render(&self) -> String {
        let inner = self.width.saturating_sub(4).max(self.title.chars().count());
        let rule = "─".repeat(inner + 2);
        let mut lines = vec![format!("┌{}┐", rule)];

        let title = format!("{:^width$}", self.title, width = inner);
        lines.push(if self.use_color {
            format!("│ {} │", title.cyan().bold())
        } else {
            format!("│ {} │", title)
        });

        if let Some(subtitle) = &self.subtitle {
            lines.push(format!("│ {:^width$} │", subtitle, width = inner));
        }

        if let Some(version) = &self.version {
            let text = format!("{:^width$}", format!("v{}", version), width = inner);
            lines.push(if self.use_color {
                format!("│ {} │", text.green())
            } else {
                format!("│ {} │", text)
            });
        }

        lines.push(format!("└{}┘", rule));
        lines.join("\n")
    }

    pub fn print(&self) {
        eprintln!("{}", self.render());
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new("Recon Orchestrator")
            .with_subtitle("Parallel reconnaissance runner")
            .with_version(env!("CARGO_PKG_VERSION"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_banner_lines_line_up() {
        let text = Banner::default().with_color(false).render();
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();

        assert_eq!(widths.len(), 5);
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert!(text.contains("Recon Orchestrator"));
    }
}
