//! The window manager runtime that consumes a `Config`

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::bar::Segment;
use crate::config::Config;

/// Receives each freshly built config, at startup and after every reload.
/// The previous config is dropped once `apply` succeeds.
pub trait Host {
    fn apply(&mut self, config: &Config) -> Result<()>;
}

/// Host that only reports what it was given. Handy for `--check` and for
/// running outside a live session.
#[derive(Debug, Default)]
pub struct LogHost {
    pub applied: usize,
}

impl Host for LogHost {
    fn apply(&mut self, config: &Config) -> Result<()> {
        self.applied += 1;

        info!(
            "Applying config #{} (theme '{}')",
            self.applied, config.theme
        );

        for binding in config.keys.bindings() {
            debug!("  {:<22} {}", binding.chord(), binding.description);
        }

        let groups: Vec<_> = config.groups.iter().map(|g| g.name.as_str()).collect();
        info!("  groups: {}", groups.join(" "));

        let layouts: Vec<_> = config.layouts.iter().map(|l| l.name()).collect();
        info!("  layouts: {}", layouts.join(", "));
        info!("  float rules: {}", config.floating.rules.len());

        for (i, screen) in config.screens.iter().enumerate() {
            for bar in screen.bars() {
                let names: Vec<_> = bar.segments().iter().map(Segment::name).collect();
                info!(
                    "  screen {} {:?} bar ({}px, bg {}): {}",
                    i,
                    bar.edge(),
                    bar.size(),
                    bar.background(),
                    names.join(" ")
                );

                let mismatches = bar.separator_mismatches();
                if !mismatches.is_empty() {
                    warn!(
                        "  screen {} bar has {} separator color mismatch(es)",
                        i,
                        mismatches.len()
                    );
                }
            }
        }

        Ok(())
    }
}
