use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use calloop::signals::{Signal, Signals};
use calloop::{EventLoop, LoopSignal};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vibetile::{autostart, ConfigSource, LogHost, Session, Variant};

#[derive(Parser, Debug)]
#[command(name = "vibetile")]
#[command(about = "Build and serve a tiling window manager configuration", long_about = None)]
struct Args {
    /// Palette + bar style preset
    #[arg(long, value_enum, default_value_t = Variant::NordFlat)]
    variant: Variant,

    /// Built-in theme name or path to a .toml theme (overrides the preset's palette)
    #[arg(long)]
    theme: Option<String>,

    /// Terminal for mod+Return (default: $TERMINAL or first one found)
    #[arg(long)]
    terminal: Option<String>,

    /// Autostart script (default: ~/.config/vibetile/autostart.sh)
    #[arg(long)]
    autostart: Option<PathBuf>,

    /// Don't run the autostart script
    #[arg(long)]
    no_autostart: bool,

    /// Build the config once, report problems and exit
    #[arg(long)]
    check: bool,
}

/// Event loop data
struct State {
    session: Session<LogHost>,
    signal: LoopSignal,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut source = ConfigSource::from_variant(args.variant);
    if let Some(theme) = args.theme {
        source.theme = theme;
    }
    source.terminal = args.terminal;

    if args.check {
        return check(&source);
    }

    info!("vibetile starting up ~");

    // Block the signals before any thread exists, or the autostart reaper
    // inherits an unblocked mask and eats SIGINT.
    let signals = Signals::new(&[Signal::SIGHUP, Signal::SIGINT, Signal::SIGTERM])?;

    let mut event_loop: EventLoop<'static, State> = EventLoop::try_new()?;

    let script = if args.no_autostart {
        None
    } else {
        args.autostart.or_else(autostart::default_script)
    };
    let session = Session::start(source, LogHost::default(), script)?;

    event_loop
        .handle()
        .insert_source(signals, |event, _, state| match event.signal() {
            Signal::SIGHUP => {
                if let Err(e) = state.session.reload() {
                    error!("Reload failed: {:#}", e);
                }
            }
            other => {
                info!("Got {:?}, stopping", other);
                state.signal.stop();
            }
        })
        .map_err(|e| e.error)?;

    let mut state = State {
        session,
        signal: event_loop.get_signal(),
    };

    info!("vibetile ready - SIGHUP reloads ~");
    event_loop.run(None::<Duration>, &mut state, |_| {})?;

    info!(
        "vibetile shutting down after {} reload(s) ~",
        state.session.reloads()
    );
    Ok(())
}

/// Build once with no autostart and no loop
fn check(source: &ConfigSource) -> Result<()> {
    let config = source.build()?;

    let mut problems = 0;
    for (i, screen) in config.screens.iter().enumerate() {
        for bar in screen.bars() {
            for mismatch in bar.separator_mismatches() {
                warn!("screen {}: {}", i, mismatch);
                problems += 1;
            }
        }
    }

    info!(
        "Config OK: theme '{}', {} keys, {} separator mismatch(es)",
        config.theme,
        config.keys.len(),
        problems
    );
    Ok(())
}
