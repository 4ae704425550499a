// Tue Oct 13 2026 - Alex

use serde::Serialize;
use std::collections::BTreeSet;
use std::net::{IpAddr, ToSocketAddrs};

use crate::modules::{Module, ModuleContext, ModuleError, ModulePayload, Payload};
use crate::utils::parse_ip_literal;

#[derive(Debug, Clone, Serialize)]
pub struct DnsPayload {
    pub host: String,
    pub addresses: Vec<String>,
    pub ipv4: usize,
    pub ipv6: usize,
}

impl DnsPayload {
    fn from_addresses(host: &str, addresses: BTreeSet<IpAddr>) -> Self {
        let ipv4 = addresses.iter().filter(|ip| ip.is_ipv4()).count();
        let ipv6 = addresses.len() - ipv4;

        Self {
            host: host.to_string(),
            addresses: addresses.iter().map(IpAddr::to_string).collect(),
            ipv4,
            ipv6,
        }
    }
}

impl ModulePayload for DnsPayload {
    fn counts(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("count", self.addresses.len() as u64),
            ("ipv4", self.ipv4 as u64),
            ("ipv6", self.ipv6 as u64),
        ]
    }
}

/// Resolves the target through the system resolver.
#[derive(Debug, Default)]
pub struct DnsResolverModule;

impl DnsResolverModule {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(host: &str) -> Result<BTreeSet<IpAddr>, ModuleError> {
        if let Some(ip) = parse_ip_literal(host) {
            return Ok(BTreeSet::from([ip]));
        }

        let addresses: BTreeSet<IpAddr> = (host, 0)
            .to_socket_addrs()
            .map_err(|e| ModuleError::Resolution(format!("{}: {}", host, e)))?
            .map(|addr| addr.ip())
            .collect();

        if addresses.is_empty() {
            return Err(ModuleError::Resolution(format!("{}: no addresses returned", host)));
        }

        Ok(addresses)
    }
}

impl Module for DnsResolverModule {
    fn name(&self) -> &str {
        "dns_resolver"
    }

    fn description(&self) -> &str {
        "resolves the target to its IPv4 and IPv6 addresses"
    }

    fn run(&self, ctx: &ModuleContext) -> Result<Payload, ModuleError> {
        ctx.check()?;

        let addresses = Self::resolve(ctx.target())?;
        let payload = DnsPayload::from_addresses(ctx.target(), addresses);
        ctx.info(format!("{} resolved to {} address(es)", payload.host, payload.addresses.len()));

        Payload::from_payload(&payload)
    }
}
