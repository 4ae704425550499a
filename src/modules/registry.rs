// Tue Oct 13 2026 - Alex

use indexmap::IndexMap;
use std::sync::Arc;

use crate::config::ScanConfig;
use crate::modules::{builtin, Module};

/// Ordered set of modules keyed by name. Registering a name twice replaces the earlier module in place.
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: IndexMap<String, Arc<dyn Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for module in builtin::builtin_modules() {
            registry.register_arc(module);
        }
        registry
    }

    pub fn register<M: Module + 'static>(&mut self, module: M) -> &mut Self {
        self.register_arc(Arc::new(module))
    }

    pub fn register_arc(&mut self, module: Arc<dyn Module>) -> &mut Self {
        let name = module.name().to_string();
        if self.modules.insert(name.clone(), module).is_some() {
            log::debug!("module {} re-registered, replacing previous entry", name);
        }
        self
    }

    pub fn with<M: Module + 'static>(mut self, module: M) -> Self {
        self.register(module);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.modules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Module>> + '_ {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules that `config` enables, in registration order.
    pub fn enabled(&self, config: &ScanConfig) -> Vec<Arc<dyn Module>> {
        self.modules
            .values()
            .filter(|m| m.is_enabled(config))
            .cloned()
            .collect()
    }

    /// Names in `config.modules` that no registered module answers to.
    pub fn unknown_selections<'a>(&self, config: &'a ScanConfig) -> Vec<&'a str> {
        config
            .modules
            .iter()
            .chain(config.skip_modules.iter())
            .map(String::as_str)
            .filter(|wanted| !self.names().any(|name| name.eq_ignore_ascii_case(wanted)))
            .collect()
    }
}
