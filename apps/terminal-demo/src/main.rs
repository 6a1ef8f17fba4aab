//! Terminal demo for the one-time code entry field.
//!
//! Usage:
//!   cargo run -p terminal-demo -- --length 6
//!   cargo run -p terminal-demo -- --no-flicker --keep-open
//!
//! The completed code is printed to stdout on exit. Logs go to stderr,
//! filtered by `RUST_LOG` (default `warn`).

mod events;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use codefield_core::{Duration, Instant, TimerQueue};
use codefield_graphics::{Dp, Size};
use codefield_ui::{
    CodeCompletionObserver, CodeEntryField, CodeFieldOptions, CompletionPolicy, HiddenTextInput,
};
use crossterm::event::{self, Event};
use events::{map_key, map_mouse, KeyAction};
use render::TerminalGuard;
use std::cell::RefCell;
use std::rc::Rc;

/// Upper bound on a poll when no timer is armed.
const IDLE_POLL: Duration = Duration::from_secs(1);

/// Top-left cell of the field.
const ORIGIN: (u16, u16) = (2, 2);

/// One-time code entry in the terminal.
#[derive(Parser, Debug)]
#[command(name = "codefield-demo")]
#[command(about = "Type a one-time code into boxed slots")]
struct Args {
    /// Number of boxes
    #[arg(short, long, default_value_t = 6)]
    length: usize,

    /// Keep the cursor segment solid instead of blinking
    #[arg(long)]
    no_flicker: bool,

    /// Width of each box, in cells
    #[arg(long, default_value_t = 5.0)]
    cell_width: f32,

    /// Gap between boxes, in cells
    #[arg(long, default_value_t = 2.0)]
    spacing: f32,

    /// Height of each box, in rows
    #[arg(long, default_value_t = 3.0)]
    box_height: f32,

    /// Rows between the boxes and the underline
    #[arg(long, default_value_t = 0.0)]
    underline_margin: f32,

    /// Report a code only when the field first fills up
    #[arg(long)]
    once: bool,

    /// Start over after each completed code instead of exiting
    #[arg(long)]
    keep_open: bool,
}

impl Args {
    fn options(&self) -> CodeFieldOptions {
        let policy = if self.once {
            CompletionPolicy::OncePerFill
        } else {
            CompletionPolicy::EveryFullSync
        };
        CodeFieldOptions::default()
            .with_character_limit(self.length)
            .with_spacing(Dp(self.spacing))
            .with_underline_height(Dp(1.0))
            .with_underline_margin(Dp(self.underline_margin))
            .with_flicker(!self.no_flicker)
            .with_completion_policy(policy)
    }

    fn field_size(&self) -> Size {
        let count = self.length as f32;
        Size::new(
            count * self.cell_width + (count - 1.0).max(0.0) * self.spacing,
            self.box_height + self.underline_margin + 1.0,
        )
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    match run(&args)? {
        Some(code) => println!("{code}"),
        None => eprintln!("no code entered"),
    }
    Ok(())
}

fn run(args: &Args) -> Result<Option<String>> {
    let input = Rc::new(HiddenTextInput::new());
    let timers = Rc::new(TimerQueue::new());
    let field = CodeEntryField::new(args.options(), input, timers.clone())
        .context("invalid field options")?;

    let completed = Rc::new(RefCell::new(Vec::<String>::new()));
    let observer: Rc<dyn CodeCompletionObserver> = Rc::new({
        let completed = completed.clone();
        move |code: &str| completed.borrow_mut().push(code.to_string())
    });
    field.configure(Some(&observer), !args.no_flicker);
    field.focus();
    let layout = field.layout(args.field_size(), 1.0);

    let _guard = TerminalGuard::enter().context("failed to set up terminal")?;
    let mut stdout = std::io::stdout();
    let mut last_code = None;

    loop {
        let status = if field.is_focused() {
            "Type the code. Backspace deletes, Esc leaves the field."
        } else {
            "Click the boxes to focus. Esc again quits."
        };
        render::draw(&mut stdout, &layout, &field.snapshot(), ORIGIN, status)?;

        let finished = completed.borrow_mut().drain(..).last();
        if let Some(code) = finished {
            if !args.keep_open {
                return Ok(Some(code));
            }
            log::info!("code entered, starting over");
            last_code = Some(code);
            field.configure(Some(&observer), !args.no_flicker);
            field.focus();
            continue;
        }

        let timeout = timers
            .next_deadline_instant()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(&key) {
                    KeyAction::Forward(key_event) => {
                        if !field.handle_key_event(&key_event) {
                            log::debug!("unhandled {key_event}");
                        }
                    }
                    KeyAction::Dismiss if field.is_focused() => field.blur(),
                    KeyAction::Dismiss | KeyAction::Quit => return Ok(last_code),
                    KeyAction::Ignore => {}
                },
                Event::Mouse(mouse) => {
                    if let Some(pointer) = map_mouse(&mouse, ORIGIN) {
                        field.handle_pointer_event(&pointer);
                    }
                }
                _ => {}
            }
        }
        timers.poll(Instant::now());
    }
}
