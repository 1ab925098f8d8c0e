//! Shared runtime state for CLI interactions and command execution.

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::ConfigManager, core::LedgerStore, currency::CurrencyFormatter, storage::FileStore,
};

use super::{
    commands,
    core::CliError,
    registry::{CommandEntry, CommandRegistry},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub formatter: CurrencyFormatter,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Builds a context from the on-disk configuration and file store.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        let storage = FileStore::new(manager.data_dir())?;
        tracing::debug!(data_dir = %storage.root().display(), "opening ledger");
        let store = LedgerStore::open(Box::new(storage), config.storage_key.clone())?;
        Ok(Self::with_store(mode, store, config.formatter()))
    }

    pub fn with_store(mode: CliMode, store: LedgerStore, formatter: CurrencyFormatter) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            store,
            formatter,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("finledger ({})> ", self.store.ledger().len())
    }
}
