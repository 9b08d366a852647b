use log::trace;
use opencv::highgui;

use crate::error::Result;

pub const POLL_INTERVAL_MS: i32 = 20;
const ESC: i32 = 27;

/// Slider definition; positions run from 0 to `max` inclusive.
#[derive(Debug, Clone, Copy)]
pub struct Trackbar {
    pub name: &'static str,
    pub max: i32,
    pub initial: i32,
}

impl Trackbar {
    pub const fn new(name: &'static str, max: i32, initial: i32) -> Self {
        Self { name, max, initial }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKey {
    Any,
    Escape,
}

impl ExitKey {
    pub fn matches(self, key: i32) -> bool {
        match self {
            ExitKey::Any => key >= 0,
            ExitKey::Escape => key >= 0 && (key & 0xff) == ESC,
        }
    }
}

/// Trackbars attached to one window.
///
/// Positions are polled from the GUI instead of being written by callbacks, so
/// the render closure always sees the values the sliders hold at call time.
pub struct Controls<'a> {
    window: &'a str,
    trackbars: Vec<Trackbar>,
}

impl<'a> Controls<'a> {
    pub fn new(window: &'a str) -> Self {
        Self {
            window,
            trackbars: Vec::new(),
        }
    }

    pub fn add(&mut self, trackbar: Trackbar) -> Result<()> {
        highgui::create_trackbar(trackbar.name, self.window, None, trackbar.max, None)?;
        highgui::set_trackbar_pos(trackbar.name, self.window, trackbar.initial)?;
        self.trackbars.push(trackbar);
        Ok(())
    }

    pub fn positions(&self) -> Result<Vec<i32>> {
        self.trackbars
            .iter()
            .map(|t| {
                let pos = highgui::get_trackbar_pos(t.name, self.window)?;
                Ok(pos.clamp(0, t.max))
            })
            .collect()
    }

    /// Renders once with the initial positions, then again whenever a slider
    /// moves, until the exit key is pressed.
    pub fn run<F>(&self, exit: ExitKey, mut render: F) -> Result<()>
    where
        F: FnMut(&[i32]) -> Result<()>,
    {
        let mut last: Option<Vec<i32>> = None;
        loop {
            let positions = self.positions()?;
            if last.as_ref() != Some(&positions) {
                trace!("{}: rendering with {:?}", self.window, positions);
                render(&positions)?;
                last = Some(positions);
            }

            let key = highgui::wait_key(POLL_INTERVAL_MS)?;
            if exit.matches(key) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_only_stops_on_esc() {
        assert!(ExitKey::Escape.matches(27));
        assert!(!ExitKey::Escape.matches('q' as i32));
        assert!(!ExitKey::Escape.matches(-1));
        // some backends report modifier bits above the low byte
        assert!(ExitKey::Escape.matches(0x10_0000 | 27));
    }

    #[test]
    fn any_key_ignores_timeouts() {
        assert!(ExitKey::Any.matches(0));
        assert!(ExitKey::Any.matches('q' as i32));
        assert!(!ExitKey::Any.matches(-1));
    }
}
