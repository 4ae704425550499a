// Fri Oct 16 2026 - Alex

use anyhow::Context;
use chrono::Utc;
use colored::Colorize;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::args::{Args, Command, ModulesArgs, RenderArgs, ScanArgs};
use crate::config::{OutputFormat, ScanConfig, ScanProfile};
use crate::events::LogSink;
use crate::modules::ModuleRegistry;
use crate::orchestration::{Orchestrator, ResultAggregate};
use crate::output::manager::subdomain_list;
use crate::output::{JsonSerializer, OutputManager, ReportSummary, StructuredReport};
use crate::ui::banner::Banner;
use crate::ui::display::ConsoleRenderer;
use crate::ui::progress::ProgressSink;
use crate::ui::{print_info, print_success, print_warning};
use crate::utils::{format_duration, pluralize, LoggingUtils, ProcessUtils};

const CONSOLE_ITEM_LIMIT: usize = 10;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Copy)]
struct Session {
    quiet: bool,
    color: bool,
    verbose: bool,
}

pub struct CommandHandler {
    registry: ModuleRegistry,
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            registry: ModuleRegistry::with_builtin(),
        }
    }

    pub fn with_registry(registry: ModuleRegistry) -> Self {
        Self { registry }
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        if args.no_color {
            colored::control::set_override(false);
        }

        let session = Session {
            quiet: args.quiet,
            color: !args.no_color,
            verbose: args.verbose > 0,
        };

        self.setup_logging(&args);

        if !session.quiet {
            Banner::default().with_color(session.color).print();
        }

        match args.command {
            Command::Scan(scan_args) => self.handle_scan(scan_args, session),
            Command::Modules(modules_args) => self.handle_modules(modules_args, session),
            Command::Render(render_args) => self.handle_render(render_args, session),
        }
    }

    fn setup_logging(&self, args: &Args) {
        let level = if args.quiet {
            LevelFilter::Error
        } else if args.verbose > 0 {
            LoggingUtils::level_from_str(&args.log_level)
                .max(LoggingUtils::level_from_verbosity(args.verbose.saturating_add(1)))
        } else {
            LoggingUtils::level_from_str(&args.log_level)
        };

        let use_color = !args.no_color && atty::is(atty::Stream::Stderr);
        LoggingUtils::init_logger(level, use_color);
    }

    fn handle_scan(&self, mut args: ScanArgs, session: Session) -> anyhow::Result<()> {
        if args.config.is_none() {
            args.config = ScanConfig::discover_in(".");
            if let Some(path) = &args.config {
                log::info!("using config file {}", path.display());
            }
        }
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut config = match &args.config {
            Some(path) => ScanConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ScanConfig::default(),
        };
        args.apply_to(&mut config);
        if session.verbose {
            config.verbose = true;
        }
        config.validate()?;

        for name in self.registry.unknown_selections(&config) {
            print_warning(&format!("Unknown module '{}' ignored", name));
        }

        let target = config.target.clone();
        let output_dir = config.output_dir.clone();
        let output_format = config.output_format;
        let verbose = config.verbose;

        if !session.quiet {
            print_info(&format!(
                "Scanning {} with the {} profile (deadline {})",
                target,
                config.profile,
                format_duration(config.timeout())
            ));
        }

        let show_progress = !args.no_progress && !session.quiet && atty::is(atty::Stream::Stderr);
        let progress = Arc::new(if show_progress {
            ProgressSink::new(Arc::new(LogSink))
        } else {
            ProgressSink::hidden(Arc::new(LogSink))
        });

        let orchestrator = Orchestrator::new(config, self.registry.clone()).with_sink(progress.clone());
        let aggregate = orchestrator.run(&target);
        progress.finish();
        let aggregate = aggregate?;

        match output_format {
            OutputFormat::Text => {
                let max_items = if verbose { None } else { Some(CONSOLE_ITEM_LIMIT) };
                ConsoleRenderer::new()
                    .with_color(session.color)
                    .with_max_items(max_items)
                    .print(&aggregate);
                if let Some(max) = max_items {
                    self.save_truncated_subdomains(&aggregate, &output_dir, max, session);
                }
            }
            OutputFormat::Json => println!("{}", JsonSerializer::new().render(&aggregate, Utc::now())?),
        }

        if args.no_reports {
            return Ok(());
        }

        let summary = OutputManager::new(&output_dir).write_all(&aggregate);
        self.report_summary(&summary, session);
        Ok(())
    }

    /// The console view cut the subdomain list short, so the full list goes to a text file.
    fn save_truncated_subdomains(
        &self,
        aggregate: &ResultAggregate,
        output_dir: &Path,
        max_items: usize,
        session: Session,
    ) -> Option<PathBuf> {
        let total = subdomain_list(aggregate).len();
        if total <= max_items {
            return None;
        }

        match OutputManager::new(output_dir).write_subdomain_list(aggregate) {
            Ok(Some(path)) => {
                if !session.quiet {
                    print_info(&format!("Showing {} of {} subdomains, full list: {}", max_items, total, path.display()));
                }
                Some(path)
            }
            Ok(None) => None,
            Err(e) => {
                print_warning(&format!("Subdomain list not saved: {}", e));
                None
            }
        }
    }

    fn handle_modules(&self, args: ModulesArgs, session: Session) -> anyhow::Result<()> {
        let profile = args.profile.unwrap_or_default();
        println!("{}", self.module_listing(profile, session.color));
        Ok(())
    }

    fn module_listing(&self, profile: ScanProfile, color: bool) -> String {
        let mut lines = Vec::new();

        let header = format!(
            "{}, {} profile deadline {}",
            pluralize(self.registry.len(), "registered module", "registered modules"),
            profile,
            format_duration(profile.default_timeout())
        );
        lines.push(if color { header.cyan().bold().to_string() } else { header });

        let width = self.registry.names().map(str::len).max().unwrap_or(0);
        for module in self.registry.iter() {
            let tool = match module.required_tool() {
                Some(tool) if ProcessUtils::is_available(tool) => format!("{} (found)", tool),
                Some(tool) if color => format!("{} {}", tool, "(missing)".red()),
                Some(tool) => format!("{} (missing)", tool),
                None => "built in".to_string(),
            };
            lines.push(format!(
                "  {:<width$}  {:<40}  {}",
                module.name(),
                module.description(),
                tool,
                width = width
            ));
        }

        lines.join("\n")
    }

    fn handle_render(&self, args: RenderArgs, session: Session) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let report = StructuredReport::load(&args.input)
            .with_context(|| format!("reading report {}", args.input.display()))?;
        let output_dir = render_output_dir(&args);

        if !session.quiet {
            print_info(&format!(
                "Rendering {} module result(s) for {}",
                report.modules.len(),
                report.target
            ));
        }

        let aggregate = report.into_aggregate();
        let summary = OutputManager::new(&output_dir).write_all(&aggregate);
        self.report_summary(&summary, session);

        if summary.written.is_empty() {
            anyhow::bail!("no report could be written under {}", output_dir.display());
        }
        Ok(())
    }

    fn report_summary(&self, summary: &ReportSummary, session: Session) {
        if !session.quiet {
            for written in &summary.written {
                print_success(&format!("{} report: {}", written.format, written.path.display()));
            }
        }
        for failed in &summary.failed {
            print_warning(&format!(
                "{} report not written to {}: {}",
                failed.format,
                failed.path.display(),
                failed.error
            ));
        }
    }
}

fn render_output_dir(args: &RenderArgs) -> PathBuf {
    args.output_dir.clone().unwrap_or_else(|| ScanConfig::default().output_dir)
}
