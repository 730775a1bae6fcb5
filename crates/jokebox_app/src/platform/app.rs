use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use jokebox_core::Msg;
use jokebox_engine::EngineHandle;
use jokebox_logging::{jokebox_debug, jokebox_info};

use super::commands::{parse_command, Command};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui;

const PROMPT: &str = "jokebox> ";
const TICK: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = AppConfig::load(&cwd)?.with_env_overrides(|key| std::env::var(key).ok());
    logging::initialize(config.log_destination, config.log_level()?, &config.log_file);
    jokebox_info!(
        "starting against {} (max {} attempts per unique fetch)",
        config.api_base,
        config.max_unique_attempts
    );

    let engine = EngineHandle::new(config.fetch_settings(), config.max_unique_attempts)
        .with_context(|| format!("configuring joke source at {}", config.api_base))?;
    let runner = EffectRunner::new(engine);
    let input_rx = spawn_stdin_reader();
    let mut stdout = io::stdout();
    let mut last_frame: Vec<String> = Vec::new();

    writeln!(stdout, "Type `help` for commands.")?;
    runner.enqueue(runner.store().dispatch(Msg::AppStarted));

    loop {
        match input_rx.recv_timeout(TICK) {
            Ok(line) => {
                let view = runner.store().view();
                match parse_command(&line, &view) {
                    Ok(Some(Command::Dispatch(msg))) => {
                        jokebox_debug!("dispatch {:?}", msg);
                        runner.enqueue(runner.store().dispatch(msg));
                    }
                    Ok(Some(Command::ShowCategories)) => {
                        print_lines(&mut stdout, &ui::render::render_categories(&view))?;
                    }
                    Ok(Some(Command::ShowHelp)) => {
                        print_lines(&mut stdout, ui::pages::HELP_TEXT)?;
                    }
                    Ok(Some(Command::Quit)) => break,
                    Ok(None) => {}
                    Err(err) => writeln!(stdout, "{err}")?,
                }
                // Re-prompt even when nothing on screen changes.
                redraw(&mut stdout, &runner, &mut last_frame, true)?;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                runner.drain_events();
                redraw(&mut stdout, &runner, &mut last_frame, false)?;
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    jokebox_info!("shutting down");
    runner.shutdown();
    Ok(())
}

/// Prints the current page when it differs from the last one printed.
fn redraw(
    out: &mut impl Write,
    runner: &EffectRunner,
    last_frame: &mut Vec<String>,
    force: bool,
) -> io::Result<()> {
    let dirty = runner.store().consume_dirty();
    if !dirty && !force {
        return Ok(());
    }
    let frame = ui::render::render(&runner.store().view());
    if frame == *last_frame && !force {
        return Ok(());
    }
    writeln!(out)?;
    print_lines(out, &frame)?;
    write!(out, "{PROMPT}")?;
    out.flush()?;
    *last_frame = frame;
    Ok(())
}

fn print_lines<S: AsRef<str>>(out: &mut impl Write, lines: &[S]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
