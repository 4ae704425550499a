// Fri Oct 16 2026 - Alex

use colored::*;

use crate::modules::ModuleResult;
use crate::orchestration::ResultAggregate;
use crate::output::formatter::{counters_line, payload_blocks};
use crate::output::{Block, NO_MODULES_NOTICE};
use crate::utils::{format_duration, pluralize, single_line, truncate_string};

const CELL_WIDTH: usize = 48;

/// Human readable terminal view of an aggregate.
pub struct ConsoleRenderer {
    use_color: bool,
    max_items: Option<usize>,
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self {
            use_color: true,
            max_items: Some(10),
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// `None` prints every list item and table row.
    pub fn with_max_items(mut self, max: Option<usize>) -> Self {
        self.max_items = max;
        self
    }

    pub fn render(&self, aggregate: &ResultAggregate) -> String {
        let mut lines = Vec::new();

        lines.push(self.heading(&format!("Reconnaissance of {}", aggregate.target())));
        lines.push(format!(
            "  {}, {} failed, {}",
            pluralize(aggregate.len(), "module", "modules"),
            aggregate.failed_count(),
            format_duration(aggregate.duration())
        ));
        lines.push(String::new());

        if aggregate.is_empty() {
            lines.push(self.dim(&format!("{}.", NO_MODULES_NOTICE)));
            lines.push(String::new());
        }

        aggregate.for_each_module(|_, result| {
            lines.extend(self.render_module(result));
            lines.push(String::new());
        });

        lines.push(self.heading("Summary"));
        let summary = aggregate.summarize();
        let width = summary.iter().map(|m| m.metric.len()).max().unwrap_or(0);
        for metric in summary {
            lines.push(format!("  {:<width$}  {}", metric.metric, metric.value, width = width));
        }

        lines.join("\n")
    }

    pub fn print(&self, aggregate: &ResultAggregate) {
        println!("{}", self.render(aggregate));
    }

    fn render_module(&self, result: &ModuleResult) -> Vec<String> {
        let mut lines = Vec::new();

        let status = match result.error() {
            None => self.paint_ok(result.status_label()),
            Some(failure) => self.paint_err(&format!("{} ({})", result.status_label(), failure.kind)),
        };
        let name = if self.use_color {
            result.module.cyan().bold().to_string()
        } else {
            result.module.clone()
        };
        lines.push(format!("{} [{}]", name, status));

        if let Some(failure) = result.error() {
            lines.push(format!("  error: {}", single_line(&failure.message)));
            return lines;
        }

        if let Some(payload) = result.payload() {
            if let Some(counters) = counters_line(payload) {
                lines.push(self.dim(&format!("  {}", counters)));
            }
            for block in payload_blocks(payload) {
                lines.extend(self.render_block(&block));
            }
        }

        lines
    }

    fn render_block(&self, block: &Block) -> Vec<String> {
        match block {
            Block::Field { key, value } => {
                vec![format!("  {}: {}", key, truncate_string(&single_line(value), CELL_WIDTH * 2))]
            }
            Block::List { key, items } => {
                let mut lines = vec![format!("  {} ({}):", key, items.len())];
                let shown = self.shown(items.len());
                for item in &items[..shown] {
                    lines.push(format!("    - {}", item));
                }
                lines.extend(self.more_line(items.len(), shown));
                lines
            }
            Block::Table { key, columns, rows } => {
                let mut lines = vec![format!("  {} ({}):", key, rows.len())];
                lines.push(self.dim(&format!("    {}", columns.join(" | "))));
                let shown = self.shown(rows.len());
                for row in &rows[..shown] {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|cell| truncate_string(&single_line(cell), CELL_WIDTH))
                        .collect();
                    lines.push(format!("    {}", cells.join(" | ")));
                }
                lines.extend(self.more_line(rows.len(), shown));
                lines
            }
        }
    }

    fn shown(&self, total: usize) -> usize {
        self.max_items.map_or(total, |max| total.min(max))
    }

    fn more_line(&self, total: usize, shown: usize) -> Option<String> {
        (total > shown).then(|| self.dim(&format!("    ... and {} more", total - shown)))
    }

    fn heading(&self, text: &str) -> String {
        if self.use_color {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_ok(&self, text: &str) -> String {
        if self.use_color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_err(&self, text: &str) -> String {
        if self.use_color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::items_payload;
    use crate::modules::ModuleFailure;
    use crate::orchestration::AggregateBuilder;

    fn plain() -> ConsoleRenderer {
        ConsoleRenderer::new().with_color(false)
    }

    #[test]
    fn test_long_lists_are_truncated() {
        let hosts: Vec<String> = (0..15).map(|i| format!("h{}.example.com", i)).collect();
        let refs: Vec<&str> = hosts.iter().map(String::as_str).collect();

        let mut builder = AggregateBuilder::new("example.com");
        builder.record(ModuleResult::success("subdomains", items_payload("subdomains", &refs)));
        let text = plain().render(&builder.seal());

        assert!(text.contains("subdomains (15):"));
        assert!(text.contains("    - h9.example.com"));
        assert!(!text.contains("    - h10.example.com"));
        assert!(text.contains("... and 5 more"));
        assert!(text.contains("Subdomains Found"));
    }

    #[test]
    fn test_unlimited_prints_everything() {
        let mut builder = AggregateBuilder::new("example.com");
        builder.record(ModuleResult::success("web", items_payload("urls", &["a", "b", "c"])));
        let text = plain().with_max_items(None).render(&builder.seal());

        assert!(text.contains("    - c"));
        assert!(!text.contains("more"));
    }

    #[test]
    fn test_failures_show_kind_and_message() {
        let mut builder = AggregateBuilder::new("example.com");
        builder.record(ModuleResult::failure("ports", ModuleFailure::timeout("deadline of 5s exceeded\nwhile scanning")));
        let text = plain().render(&builder.seal());

        assert!(text.contains("ports [Failed (timeout)]"));
        assert!(text.contains("error: deadline of 5s exceeded while scanning"));
    }

    #[test]
    fn test_empty_aggregate_notice() {
        let text = plain().render(&AggregateBuilder::new("example.com").seal());
        assert!(text.contains(NO_MODULES_NOTICE));
        assert!(text.contains("Modules Executed"));
    }
}
