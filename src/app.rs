use crate::command::Command;
use crate::game::GameSession;
use crate::highscore::HighScoreStore;
use crate::util::get_display_area;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::collections::VecDeque;
use std::io;
use std::time::Instant;

#[derive(Debug)]
pub(crate) struct App<S, R = rand::rngs::ThreadRng> {
    session: GameSession<S, R>,
    /// Pending warnings, oldest first; only the first one is shown
    warnings: VecDeque<Warning>,
    quitting: bool,
}

impl<S: HighScoreStore, R: Rng> App<S, R> {
    pub(crate) fn new(session: GameSession<S, R>, warnings: Vec<Warning>) -> App<S, R> {
        App {
            session,
            warnings: warnings.into(),
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            self.session.draw(frame);
            if let Some(warning) = self.warnings.front() {
                frame.render_widget(warning, get_display_area(frame.area()));
            }
        })?;
        Ok(())
    }

    /// Wait for either the next tick or an input event, whichever comes
    /// first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        if self.warnings.is_empty() {
            if let Some(wait) = self.session.time_until_tick(Instant::now()) {
                if wait.is_zero() || !poll(wait)? {
                    self.session.on_timer(Instant::now());
                    if let Some(e) = self.session.take_save_error() {
                        self.warnings.push_back(Warning::from(e));
                    }
                    return Ok(());
                }
            }
        }
        self.handle_event(read()?);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            self.session.pause();
            return;
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        if let Some(warning) = self.warnings.front() {
            match warning.handle_command(cmd) {
                Some(WarningOutcome::Dismissed) => {
                    let _ = self.warnings.pop_front();
                }
                Some(WarningOutcome::Quit) => self.quitting = true,
                None => (),
            }
            return;
        }
        match cmd {
            Command::Quit => self.quitting = true,
            Command::Turn(direction) => self.session.request_direction(direction),
            Command::Pause => self.session.toggle_pause(),
            Command::Start | Command::Enter => self.session.start(),
        }
    }
}
