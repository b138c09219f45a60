//! globhook CLI
//!
//! Watch global keyboard and mouse events, inspect the input environment and
//! post synthetic input.

mod config;
mod output;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::{CliConfig, OutputFormat};
use globhook_core::{
    EventCategory, EventSimulator, GlobalHook, HookEvent, HookHandle, InputEnvironment,
    KeyCode, KeyboardHookEvent, MouseButton, MouseHookEvent, MouseWheelDirection,
    MouseWheelHookEvent, MouseWheelScrollType, NativeEngine,
};
use globhook_platform::RdevEngine;
use output::print_event;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "globhook")]
#[command(about = "Global keyboard and mouse hook tool", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Native engine to use
    #[arg(long, value_enum, default_value_t = EngineKind::Rdev)]
    engine: EngineKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    Rdev,
    /// Requires the `libuiohook` feature
    Uiohook,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the hook and print events until the stop key is pressed
    Listen {
        /// Output format (overrides the config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Category to print; repeat for several (overrides the config)
        #[arg(long = "category", value_parser = parse_category)]
        categories: Vec<EventCategory>,

        /// Print every category, including mouse moves
        #[arg(long, conflicts_with = "categories")]
        all: bool,

        /// Stop after this many seconds
        #[arg(long)]
        duration_secs: Option<u64>,
    },

    /// List attached screens
    Screens,

    /// Show system input settings
    Settings,

    /// Post synthetic input
    Simulate {
        #[command(subcommand)]
        action: SimulateAction,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum SimulateAction {
    /// Press and release a key (native key code, decimal or 0x-hex)
    Key {
        #[arg(value_parser = parse_key_code)]
        code: KeyCode,
    },
    /// Move the pointer
    Move {
        #[arg(allow_hyphen_values = true)]
        x: i16,
        #[arg(allow_hyphen_values = true)]
        y: i16,
    },
    /// Press and release a mouse button (1 = left, 2 = right, 3 = middle)
    Click {
        #[arg(default_value_t = 1)]
        button: u16,
    },
    /// Turn the wheel; positive scrolls down or right
    Scroll {
        #[arg(allow_hyphen_values = true)]
        rotation: i16,
        #[arg(long)]
        horizontal: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config
    Show,
    /// Write the default config
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path
    Path,
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "globhook=info,globhook_core=info,globhook_platform=info".into()),
        )
        .try_init();
}

fn parse_category(s: &str) -> Result<EventCategory, String> {
    s.parse()
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed
        .map(KeyCode)
        .map_err(|e| format!("invalid key code {s:?}: {e}"))
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(config::get_config_path);
    let cfg = config::load_config(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    debug!(path = %config_path.display(), "Config loaded");

    match cli.engine {
        EngineKind::Rdev => {
            let engine = RdevEngine::with_config(cfg.engine.clone())
                .context("invalid engine config")?;
            run(cli.command, &cfg, &config_path, engine)
        }
        #[cfg(feature = "libuiohook")]
        EngineKind::Uiohook => run(
            cli.command,
            &cfg,
            &config_path,
            globhook_platform::UioHookEngine::new(),
        ),
        #[cfg(not(feature = "libuiohook"))]
        EngineKind::Uiohook => bail!("this build does not include the libuiohook engine"),
    }
}

fn run<E: NativeEngine>(
    command: Commands,
    cfg: &CliConfig,
    config_path: &Path,
    engine: E,
) -> Result<()> {
    match command {
        Commands::Listen {
            format,
            categories,
            all,
            duration_secs,
        } => {
            let categories = if all {
                EventCategory::ALL.to_vec()
            } else if categories.is_empty() {
                cfg.categories.clone()
            } else {
                categories
            };
            listen(
                engine,
                cfg,
                format.unwrap_or(cfg.format),
                &categories,
                duration_secs.map(Duration::from_secs),
            )
        }
        Commands::Screens => {
            let screens = InputEnvironment::new(engine).screens();
            if screens.is_empty() {
                println!("no screens reported");
            }
            for s in screens {
                println!(
                    "#{} {}x{} at ({}, {})",
                    s.number, s.width, s.height, s.x, s.y
                );
            }
            Ok(())
        }
        Commands::Settings => {
            let settings = InputEnvironment::new(engine).settings();
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        Commands::Simulate { action } => simulate(EventSimulator::new(engine), action),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(cfg)?);
                Ok(())
            }
            ConfigAction::Init { force } => {
                config::init_config(config_path, force)?;
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
        },
    }
}

fn listen<E: NativeEngine>(
    engine: E,
    cfg: &CliConfig,
    format: OutputFormat,
    categories: &[EventCategory],
    duration: Option<Duration>,
) -> Result<()> {
    let hook = GlobalHook::with_options(engine, cfg.hook.clone());

    for &category in categories {
        subscribe_printer(&hook, category, format)?;
    }

    let stop_key = cfg.stop_key;
    let handle = hook.handle();
    hook.on_key_pressed(move |e: &KeyboardHookEvent| {
        if e.key_code == stop_key {
            info!(key = %stop_key, "Stop key pressed");
            dispose_quietly(&handle);
        }
    })?;

    if let Some(duration) = duration {
        let handle = hook.handle();
        thread::Builder::new()
            .name("globhook-timer".into())
            .spawn(move || {
                thread::sleep(duration);
                info!(?duration, "Listen duration elapsed");
                dispose_quietly(&handle);
            })
            .context("failed to spawn timer thread")?;
    }

    info!(?categories, stop_key = %stop_key, "Listening");
    let task = hook.start()?;
    task.wait().context("global hook stopped with an error")?;

    // Already disposed when the stop key or the timer ended the run.
    if !hook.is_disposed() {
        hook.dispose()?;
    }
    Ok(())
}

fn dispose_quietly(handle: &HookHandle) {
    if let Err(e) = handle.dispose() {
        tracing::warn!(error = %e, "Failed to stop the hook");
    }
}

fn subscribe_printer<E: NativeEngine>(
    hook: &GlobalHook<E>,
    category: EventCategory,
    format: OutputFormat,
) -> Result<()> {
    let hook_event = move |e: &HookEvent| print_event(format, category, e);
    let key_event = move |e: &KeyboardHookEvent| print_event(format, category, e);
    let mouse_event = move |e: &MouseHookEvent| print_event(format, category, e);
    let wheel_event = move |e: &MouseWheelHookEvent| print_event(format, category, e);

    match category {
        EventCategory::HookEnabled => hook.on_hook_enabled(hook_event)?,
        EventCategory::HookDisabled => hook.on_hook_disabled(hook_event)?,
        EventCategory::KeyTyped => hook.on_key_typed(key_event)?,
        EventCategory::KeyPressed => hook.on_key_pressed(key_event)?,
        EventCategory::KeyReleased => hook.on_key_released(key_event)?,
        EventCategory::MouseClicked => hook.on_mouse_clicked(mouse_event)?,
        EventCategory::MousePressed => hook.on_mouse_pressed(mouse_event)?,
        EventCategory::MouseReleased => hook.on_mouse_released(mouse_event)?,
        EventCategory::MouseMoved => hook.on_mouse_moved(mouse_event)?,
        EventCategory::MouseDragged => hook.on_mouse_dragged(mouse_event)?,
        EventCategory::MouseWheel => hook.on_mouse_wheel(wheel_event)?,
    };
    Ok(())
}

fn simulate<E: NativeEngine>(simulator: EventSimulator<E>, action: SimulateAction) -> Result<()> {
    match action {
        SimulateAction::Key { code } => simulator.key_tap(code)?,
        SimulateAction::Move { x, y } => simulator.mouse_move(x, y)?,
        SimulateAction::Click { button } => {
            let button = MouseButton::from_raw(button);
            if button == MouseButton::NoButton {
                bail!("button must be 1 or greater");
            }
            simulator.mouse_press(button)?;
            simulator.mouse_release(button)?;
        }
        SimulateAction::Scroll {
            rotation,
            horizontal,
        } => {
            let direction = if horizontal {
                MouseWheelDirection::Horizontal
            } else {
                MouseWheelDirection::Vertical
            };
            simulator.mouse_wheel(rotation, direction, MouseWheelScrollType::Unit)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use globhook_core::testing::ScriptedEngine;
    use globhook_core::{EventType, RawEvent, RawEventData};
    use std::sync::Arc;

    #[test]
    fn test_parse_key_code() {
        assert_eq!(parse_key_code("0x001E"), Ok(KeyCode::A));
        assert_eq!(parse_key_code("1"), Ok(KeyCode::ESCAPE));
        assert!(parse_key_code("escape").is_err());
    }

    #[test]
    fn test_cli_parses_listen_flags() {
        let cli = Cli::try_parse_from([
            "globhook",
            "listen",
            "--category",
            "key_pressed",
            "--category",
            "mouse_wheel",
            "--format",
            "json",
            "--duration-secs",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Listen {
                format,
                categories,
                duration_secs,
                ..
            } => {
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(
                    categories,
                    vec![EventCategory::KeyPressed, EventCategory::MouseWheel]
                );
                assert_eq!(duration_secs, Some(3));
            }
            _ => panic!("expected listen"),
        }
    }

    #[test]
    fn test_listen_stops_on_stop_key() {
        let engine = Arc::new(ScriptedEngine::new());
        let cfg = CliConfig::default();
        let stop = RawEvent::keyboard(
            EventType::KeyPressed,
            1,
            globhook_core::KeyboardData {
                key_code: cfg.stop_key,
                raw_code: 0,
                key_char: globhook_core::CHAR_UNDEFINED,
            },
        );
        // Queued before the run starts; dispatched once it does.
        engine.inject(stop);

        listen(
            engine.clone(),
            &cfg,
            OutputFormat::Text,
            &[EventCategory::KeyReleased],
            None,
        )
        .unwrap();
        assert_eq!(engine.run_calls(), 1);
        assert_eq!(engine.stop_calls(), 1);
    }

    #[test]
    fn test_simulate_click_posts_press_and_release() {
        let engine = Arc::new(ScriptedEngine::new());
        simulate(
            EventSimulator::new(engine.clone()),
            SimulateAction::Click { button: 2 },
        )
        .unwrap();

        let posted = engine.posted();
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[0].event_type, EventType::MousePressed);
        match posted[1].data {
            RawEventData::Mouse(data) => assert_eq!(data.button, MouseButton::Button2),
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
