// Fri Oct 16 2026 - Alex

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{OutputFormat, ScanConfig, ScanProfile};

#[derive(Parser, Debug)]
#[command(name = "recon-orchestrator")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Runs reconnaissance modules against a target in parallel and writes reports", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a target with the enabled modules
    Scan(ScanArgs),
    /// List registered modules
    Modules(ModulesArgs),
    /// Re-render reports from a saved JSON report
    Render(RenderArgs),
}

#[derive(Parser, Debug, Default)]
pub struct ScanArgs {
    #[arg(short, long)]
    pub target: Option<String>,

    #[arg(short, long)]
    pub profile: Option<ScanProfile>,

    /// Comma separated module names; all modules when omitted
    #[arg(short, long, value_delimiter = ',')]
    pub modules: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Console output: text or json
    #[arg(short = 'f', long)]
    pub format: Option<OutputFormat>,

    /// Run deadline in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long)]
    pub rate_limit: Option<u32>,

    /// JSON or YAML config file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub no_reports: bool,

    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Parser, Debug, Default)]
pub struct ModulesArgs {
    #[arg(short, long)]
    pub profile: Option<ScanProfile>,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory that receives reports/; defaults to `results`
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl ScanArgs {
    /// Copies every flag the user actually passed onto `config`.
    pub fn apply_to(&self, config: &mut ScanConfig) {
        if let Some(target) = &self.target {
            config.target = target.clone();
        }
        if let Some(profile) = self.profile {
            config.profile = profile;
        }
        if !self.modules.is_empty() {
            config.modules = self.modules.clone();
        }
        if !self.skip.is_empty() {
            config.skip_modules = self.skip.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(format) = self.format {
            config.output_format = format;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = Some(timeout);
        }
        if let Some(rate) = self.rate_limit {
            config.rate_limit = rate;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {:?}", config));
            }
        }
        if self.target.is_none() && self.config.is_none() {
            return Err("A target is required: pass --target or a config file that sets one".to_string());
        }
        Ok(())
    }
}

impl RenderArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!("Input report does not exist: {:?}", self.input));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_flags() {
        let args = Args::try_parse_from([
            "recon-orchestrator", "scan", "-t", "example.com", "-p", "full", "-m", "subdomains,ports",
            "-o", "out", "-f", "json", "--timeout", "60", "--rate-limit", "5", "--no-progress",
        ])
        .unwrap();

        let Command::Scan(scan) = args.command else {
            panic!("expected scan");
        };
        assert_eq!(scan.target.as_deref(), Some("example.com"));
        assert_eq!(scan.profile, Some(ScanProfile::Full));
        assert_eq!(scan.modules, vec!["subdomains", "ports"]);
        assert_eq!(scan.format, Some(OutputFormat::Json));
        assert_eq!(scan.timeout, Some(60));
        assert!(scan.no_progress);
        assert!(!scan.no_reports);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["recon-orchestrator", "modules", "-vv", "--no-color"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(args.no_color);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_bad_profile_is_rejected() {
        assert!(Args::try_parse_from(["recon-orchestrator", "scan", "-t", "x", "-p", "loud"]).is_err());
    }

    #[test]
    fn test_apply_overrides_only_given_flags() {
        let mut config = ScanConfig::new("from-file.example")
            .with_rate_limit(3)
            .with_modules(["web"]);

        let args = ScanArgs {
            profile: Some(ScanProfile::Stealth),
            timeout: Some(90),
            ..Default::default()
        };
        args.apply_to(&mut config);

        assert_eq!(config.target, "from-file.example");
        assert_eq!(config.profile, ScanProfile::Stealth);
        assert_eq!(config.timeout_seconds, Some(90));
        assert_eq!(config.rate_limit, 3);
        assert_eq!(config.modules, vec!["web"]);
    }

    #[test]
    fn test_scan_needs_target_or_config() {
        assert!(ScanArgs::default().validate().is_err());

        let args = ScanArgs { target: Some("example.com".into()), ..Default::default() };
        assert!(args.validate().is_ok());

        let args = ScanArgs { config: Some(PathBuf::from("/definitely/missing.yaml")), ..Default::default() };
        assert!(args.validate().is_err());
    }
}
