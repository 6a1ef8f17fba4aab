//! Draws a field snapshot with crossterm.
//!
//! One layout px is one terminal cell. Boxes are outlined with box-drawing
//! characters, underline segments are a row of heavy lines in the segment
//! colour.

use anyhow::Result;
use codefield_graphics::{Color, Rect};
use codefield_ui::{FieldLayout, FieldSnapshot};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::Write;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(
            std::io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            Hide
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = execute!(
            std::io::stdout(),
            Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        ) {
            log::warn!("failed to restore terminal screen: {err}");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            log::warn!("failed to leave raw mode: {err}");
        }
    }
}

pub fn to_terminal_color(color: Color) -> style::Color {
    let (r, g, b) = color.to_rgb_u8();
    style::Color::Rgb { r, g, b }
}

fn cell(value: f32, origin: u16) -> u16 {
    origin.saturating_add(value.max(0.0).round() as u16)
}

fn draw_box(out: &mut impl Write, rect: Rect, origin: (u16, u16), glyph: &str) -> Result<()> {
    let width = rect.width.round() as usize;
    let height = rect.height.round() as usize;
    if width < 2 || height < 2 {
        return Ok(());
    }
    let left = cell(rect.x, origin.0);
    let top = cell(rect.y, origin.1);
    let inner = "\u{2500}".repeat(width - 2);
    let blank = " ".repeat(width - 2);

    queue!(out, MoveTo(left, top), Print(format!("\u{250C}{inner}\u{2510}")))?;
    for row in 1..height - 1 {
        queue!(
            out,
            MoveTo(left, top + row as u16),
            Print(format!("\u{2502}{blank}\u{2502}"))
        )?;
    }
    queue!(
        out,
        MoveTo(left, top + height as u16 - 1),
        Print(format!("\u{2514}{inner}\u{2518}"))
    )?;

    if !glyph.is_empty() {
        let center = rect.center();
        queue!(
            out,
            MoveTo(cell(center.x - 0.5, origin.0), cell(center.y - 0.5, origin.1)),
            SetAttribute(Attribute::Bold),
            Print(glyph),
            SetAttribute(Attribute::Reset)
        )?;
    }
    Ok(())
}

fn draw_underline(out: &mut impl Write, rect: Rect, origin: (u16, u16), color: Color) -> Result<()> {
    let width = rect.width.round() as usize;
    let left = cell(rect.x, origin.0);
    let top = cell(rect.y, origin.1);
    for row in 0..(rect.height.round() as u16).max(1) {
        queue!(out, MoveTo(left, top + row))?;
        if color.is_transparent() {
            queue!(out, Print(" ".repeat(width)))?;
        } else {
            queue!(
                out,
                SetForegroundColor(to_terminal_color(color)),
                Print("\u{2501}".repeat(width)),
                ResetColor
            )?;
        }
    }
    Ok(())
}

pub fn draw(
    out: &mut impl Write,
    layout: &FieldLayout,
    snapshot: &FieldSnapshot,
    origin: (u16, u16),
    status: &str,
) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print("Enter the code"))?;

    for (index, rect) in layout.boxes.iter().enumerate() {
        let glyph = snapshot
            .slots
            .get(index)
            .map(|slot| slot.as_str())
            .unwrap_or("");
        draw_box(out, *rect, origin, glyph)?;
    }
    for (index, rect) in layout.underlines.iter().enumerate() {
        let color = snapshot
            .segment_colors
            .get(index)
            .copied()
            .unwrap_or(Color::TRANSPARENT);
        draw_underline(out, *rect, origin, color)?;
    }

    let status_row = cell(layout.size.height, origin.1).saturating_add(1);
    queue!(out, MoveTo(0, status_row), Print(status))?;
    out.flush()?;
    Ok(())
}
