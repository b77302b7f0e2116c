//! Session state: the active config and how to rebuild it

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::autostart;
use crate::bar::presets::BarStyle;
use crate::config::{Config, ConfigBuilder, Options, Variant};
use crate::host::Host;
use crate::theme::Theme;

/// Where a config comes from. Re-read in full on every reload, so edits
/// to a theme file show up after the next reload.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Built-in theme name or path to a `.toml` theme
    pub theme: String,
    pub style: BarStyle,
    pub terminal: Option<String>,
    pub options: Options,
}

impl ConfigSource {
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            theme: variant.theme().name().to_string(),
            style: variant.style(),
            terminal: None,
            options: Options::default(),
        }
    }

    pub fn builder(&self) -> Result<ConfigBuilder> {
        let theme = Theme::resolve(&self.theme)
            .with_context(|| format!("failed to load theme '{}'", self.theme))?;

        let mut builder = ConfigBuilder::new(theme, self.style).options(self.options.clone());
        if let Some(terminal) = &self.terminal {
            builder = builder.terminal(terminal.clone());
        }
        Ok(builder)
    }

    pub fn build(&self) -> Result<Config> {
        Ok(self.builder()?.build()?)
    }
}

/// Running session
pub struct Session<H: Host> {
    source: ConfigSource,
    host: H,
    config: Arc<Config>,
    reloads: u32,
}

impl<H: Host> Session<H> {
    /// Build the config, hand it to the host, then kick off the autostart
    /// script (first startup only, never on reload).
    pub fn start(source: ConfigSource, mut host: H, autostart: Option<PathBuf>) -> Result<Self> {
        let config = source.build().context("failed to build config")?;
        host.apply(&config).context("host rejected config")?;

        if let Some(script) = autostart {
            autostart::launch(&script);
        }

        Ok(Self {
            source,
            host,
            config: Arc::new(config),
            reloads: 0,
        })
    }

    /// Rebuild everything from the source. On failure the running config
    /// stays active and the error is returned.
    pub fn reload(&mut self) -> Result<()> {
        info!("Reloading config ~");

        let config = match self.source.build() {
            Ok(config) => config,
            Err(e) => {
                warn!("Reload aborted, keeping current config: {:#}", e);
                return Err(e);
            }
        };

        self.host.apply(&config).context("host rejected config")?;
        self.config = Arc::new(config);
        self.reloads += 1;

        info!("Reload #{} done", self.reloads);
        Ok(())
    }

    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn reloads(&self) -> u32 {
        self.reloads
    }
}
