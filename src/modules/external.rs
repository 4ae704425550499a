// Tue Oct 13 2026 - Alex

use indexmap::IndexSet;
use serde_json::{Map, Value};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{ScanConfig, ScanProfile};
use crate::modules::{Module, ModuleContext, ModuleError, Payload};
use crate::utils::{format_duration, single_line, ProcessUtils};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Static description of a module that wraps one external command line tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub tool: &'static str,
    /// Document key the tool's output lines are stored under.
    pub items_key: &'static str,
    pub quick: &'static [&'static str],
    pub full: &'static [&'static str],
    pub stealth: &'static [&'static str],
}

impl ToolSpec {
    pub fn template(&self, profile: ScanProfile) -> &'static [&'static str] {
        match profile {
            ScanProfile::Quick => self.quick,
            ScanProfile::Full => self.full,
            ScanProfile::Stealth => self.stealth,
        }
    }
}

struct ToolOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
    elapsed: Duration,
}

/// Runs a tool against the target and records each non-empty stdout line as one item.
pub struct ExternalToolModule {
    spec: ToolSpec,
    poll_interval: Duration,
}

impl ExternalToolModule {
    pub fn new(spec: ToolSpec) -> Self {
        Self {
            spec,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    pub fn arguments(&self, target: &str, config: &ScanConfig) -> Vec<String> {
        let rate = config.rate_limit.to_string();
        self.spec
            .template(config.profile)
            .iter()
            .map(|arg| arg.replace("{target}", target).replace("{rate}", &rate))
            .collect()
    }

    /// Trimmed, non-empty, de-duplicated lines in first-seen order.
    pub fn collect_items(stdout: &str) -> Vec<String> {
        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    fn execute(&self, program: &Path, args: &[String], ctx: &ModuleContext) -> Result<ToolOutput, ModuleError> {
        let started = Instant::now();
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child.stdout.take().map(ProcessUtils::spawn_reader);
        let stderr = child.stderr.take().map(ProcessUtils::spawn_reader);

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }

            if ctx.should_stop() {
                let _ = child.kill();
                let _ = child.wait();
                ctx.warn(format!("{} stopped after {}", self.spec.tool, format_duration(started.elapsed())));
                return Err(ctx.check().err().unwrap_or(ModuleError::Cancelled));
            }

            let nap = self.poll_interval.min(ctx.remaining()).max(Duration::from_millis(1));
            thread::sleep(nap);
        };

        Ok(ToolOutput {
            status,
            stdout: ProcessUtils::join_reader(stdout),
            stderr: ProcessUtils::join_reader(stderr),
            elapsed: started.elapsed(),
        })
    }
}

impl Module for ExternalToolModule {
    fn name(&self) -> &str {
        self.spec.name
    }

    fn description(&self) -> &str {
        self.spec.description
    }

    fn required_tool(&self) -> Option<&str> {
        Some(self.spec.tool)
    }

    fn run(&self, ctx: &ModuleContext) -> Result<Payload, ModuleError> {
        ctx.check()?;

        let program = ProcessUtils::find_executable(self.spec.tool)
            .ok_or_else(|| ModuleError::ToolNotFound(self.spec.tool.to_string()))?;

        let args = self.arguments(ctx.target(), ctx.config());
        ctx.debug(format!("running {} {}", program.display(), args.join(" ")));

        let output = self.execute(&program, &args, ctx)?;

        if !output.status.success() {
            let detail = output
                .stderr
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(single_line)
                .unwrap_or_else(|| "no error output".to_string());

            return Err(ModuleError::ToolFailed {
                tool: self.spec.tool.to_string(),
                code: output.status.code().unwrap_or(-1),
                detail,
            });
        }

        let items = Self::collect_items(&output.stdout);
        ctx.info(format!(
            "{} returned {} {} in {}",
            self.spec.tool,
            items.len(),
            self.spec.items_key,
            format_duration(output.elapsed)
        ));

        let count = items.len();
        let mut document = Map::new();
        document.insert("tool".to_string(), Value::from(self.spec.tool));
        document.insert("profile".to_string(), Value::from(ctx.profile().as_str()));
        document.insert("arguments".to_string(), Value::from(args));
        document.insert(self.spec.items_key.to_string(), Value::from(items));

        Payload::new(Value::Object(document)).try_with_count("count", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Deadline;
    use crate::modules::testing::{context, context_with_deadline};

    const ECHO: ToolSpec = ToolSpec {
        name: "echo_hosts",
        description: "prints a few hosts",
        tool: "sh",
        items_key: "hosts",
        quick: &["-c", "printf 'a.{target}\\nb.{target}\\n\\n  a.{target}  \\n'"],
        full: &["-c", "echo full.{target}"],
        stealth: &["-c", "echo rate={rate}"],
    };

    const FAILING: ToolSpec = ToolSpec {
        name: "failing",
        description: "",
        tool: "sh",
        items_key: "items",
        quick: &["-c", "echo 'bad flag: -x' >&2; echo second >&2; exit 3"],
        full: &[],
        stealth: &[],
    };

    const SLOW: ToolSpec = ToolSpec {
        name: "slow",
        description: "",
        tool: "sh",
        items_key: "items",
        quick: &["-c", "sleep 5"],
        full: &[],
        stealth: &[],
    };

    const MISSING: ToolSpec = ToolSpec {
        name: "missing",
        description: "",
        tool: "definitely-not-a-real-tool-7f3a",
        items_key: "items",
        quick: &["{target}"],
        full: &[],
        stealth: &[],
    };

    #[test]
    fn test_arguments_substitute_placeholders() {
        let module = ExternalToolModule::new(ECHO);
        let config = ScanConfig::new("example.com")
            .with_profile(ScanProfile::Stealth)
            .with_rate_limit(4);
        assert_eq!(module.arguments("example.com", &config), vec!["-c", "echo rate=4"]);

        let config = config.with_profile(ScanProfile::Full);
        assert_eq!(module.arguments("example.com", &config), vec!["-c", "echo full.example.com"]);
    }

    #[test]
    fn test_collect_items_trims_and_dedups() {
        let items = ExternalToolModule::collect_items("b.x\n\n a.x \nb.x\r\nc.x");
        assert_eq!(items, vec!["b.x", "a.x", "c.x"]);
        assert!(ExternalToolModule::collect_items("\n \n").is_empty());
    }

    #[test]
    fn test_missing_tool_is_reported() {
        let module = ExternalToolModule::new(MISSING);
        let err = module.run(&context("example.com")).unwrap_err();
        assert!(matches!(err, ModuleError::ToolNotFound(_)));
        assert!(err.to_string().contains("tool not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_output_becomes_items() {
        let module = ExternalToolModule::new(ECHO);
        let payload = module.run(&context("example.com")).unwrap();

        assert_eq!(payload.count("count"), Some(2));
        assert_eq!(payload.document()["hosts"], serde_json::json!(["a.example.com", "b.example.com"]));
        assert_eq!(payload.document()["tool"], "sh");
        assert_eq!(payload.document()["profile"], "quick");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_tool_failure() {
        let module = ExternalToolModule::new(FAILING);
        match module.run(&context("example.com")) {
            Err(ModuleError::ToolFailed { tool, code, detail }) => {
                assert_eq!(tool, "sh");
                assert_eq!(code, 3);
                assert_eq!(detail, "bad flag: -x");
            }
            other => panic!("unexpected result: {:?}", other.map(|p| p.document)),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_deadline_kills_the_child() {
        let module = ExternalToolModule::new(SLOW).with_poll_interval(Duration::from_millis(10));
        let ctx = context_with_deadline("example.com", Deadline::after(Duration::from_millis(150)));

        let started = Instant::now();
        let err = module.run(&ctx).unwrap_err();

        assert!(matches!(err, ModuleError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
