// Tue Oct 13 2026 - Alex

use std::sync::Arc;

use crate::modules::{DnsResolverModule, ExternalToolModule, Module, ToolSpec};

pub const SUBDOMAINS: ToolSpec = ToolSpec {
    name: "subdomains",
    description: "passive subdomain enumeration with subfinder",
    tool: "subfinder",
    items_key: "subdomains",
    quick: &["-silent", "-d", "{target}"],
    full: &["-silent", "-all", "-d", "{target}"],
    stealth: &["-silent", "-rl", "{rate}", "-d", "{target}"],
};

pub const PORTS: ToolSpec = ToolSpec {
    name: "ports",
    description: "open port discovery with naabu",
    tool: "naabu",
    items_key: "open_ports",
    quick: &["-silent", "-top-ports", "100", "-host", "{target}"],
    full: &["-silent", "-p", "-", "-host", "{target}"],
    stealth: &["-silent", "-top-ports", "100", "-rate", "{rate}", "-host", "{target}"],
};

pub const WEB: ToolSpec = ToolSpec {
    name: "web",
    description: "HTTP service probing with httpx",
    tool: "httpx",
    items_key: "urls",
    quick: &["-silent", "-u", "{target}"],
    full: &["-silent", "-title", "-status-code", "-tech-detect", "-u", "{target}"],
    stealth: &["-silent", "-rl", "{rate}", "-u", "{target}"],
};

pub const VULNERABILITIES: ToolSpec = ToolSpec {
    name: "vulnerabilities",
    description: "template based vulnerability scanning with nuclei",
    tool: "nuclei",
    items_key: "findings",
    quick: &["-silent", "-severity", "critical,high", "-u", "{target}"],
    full: &["-silent", "-u", "{target}"],
    stealth: &["-silent", "-rl", "{rate}", "-severity", "critical,high", "-u", "{target}"],
};

pub const OSINT: ToolSpec = ToolSpec {
    name: "osint",
    description: "historical URL collection with waybackurls",
    tool: "waybackurls",
    items_key: "wayback_urls",
    quick: &["-no-subs", "{target}"],
    full: &["{target}"],
    stealth: &["-no-subs", "{target}"],
};

/// The stock module set, in the order reports list them when registered.
pub fn builtin_modules() -> Vec<Arc<dyn Module>> {
    vec![
        Arc::new(ExternalToolModule::new(SUBDOMAINS)),
        Arc::new(DnsResolverModule::new()),
        Arc::new(ExternalToolModule::new(PORTS)),
        Arc::new(ExternalToolModule::new(WEB)),
        Arc::new(ExternalToolModule::new(VULNERABILITIES)),
        Arc::new(ExternalToolModule::new(OSINT)),
    ]
}
