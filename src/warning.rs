use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up describing a non-fatal error and its causes
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn handle_command(&self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    fn from_error_messages(msgs: Vec<String>) -> Self {
        let mut msgs = msgs.into_iter();
        let Some(headline) = msgs.next() else {
            return Warning {
                lines: vec![String::from("Something went wrong.")],
            };
        };
        let causes = msgs.collect::<Vec<_>>();
        let mut lines = wrap(&headline, "", "");
        if let [cause] = causes.as_slice() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            lines.extend(wrap(cause, "    ", "    "));
        } else if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            for (i, cause) in causes.iter().enumerate() {
                lines.extend(wrap(cause, &format!("{i:>5}: "), "       "));
            }
        }
        Warning { lines }
    }
}

fn wrap(s: &str, initial_indent: &str, subsequent_indent: &str) -> Vec<String> {
    let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
        .break_words(true)
        .initial_indent(initial_indent)
        .subsequent_indent(subsequent_indent);
    textwrap::wrap(s, opts)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_error_messages(msgs)
    }
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("Failed to save high score to disk")]
    struct Outer(#[source] Middle);

    #[derive(Debug, Error)]
    #[error("failed to write high score file")]
    struct Middle(#[source] std::io::Error);

    #[test]
    fn from_error_chain() {
        let e = Outer(Middle(std::io::Error::other("disk full")));
        assert_eq!(
            Warning::from(e).lines,
            [
                "Failed to save high score to disk",
                "",
                "Caused by:",
                "    0: failed to write high score file",
                "    1: disk full",
            ]
        );
    }

    #[test]
    fn commands() {
        let warning = Warning::from_error_messages(vec![String::from("Oops")]);
        assert_eq!(
            warning.handle_command(Command::Enter),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            warning.handle_command(Command::Quit),
            Some(WarningOutcome::Quit)
        );
        assert_eq!(warning.handle_command(Command::Pause), None);
        assert_eq!(warning.handle_command(Command::Turn(Direction::Up)), None);
    }

    #[test]
    fn render_no_cause() {
        let warning = Warning::from_error_messages(vec![String::from("Log file is full")]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "              ┌──────────────────── WARNING ─────────────────────┐              ",
            "              │ Log file is full                                 │              ",
            "              │                                                  │              ",
            "              │                       [OK]                       │              ",
            "              └──────────────────────────────────────────────────┘              ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_one_cause() {
        let warning = Warning::from_error_messages(vec![
            String::from("Failed to read configuration file"),
            String::from("permission denied"),
        ]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "              ┌──────────────────── WARNING ─────────────────────┐              ",
            "              │ Failed to read configuration file                │              ",
            "              │                                                  │              ",
            "              │ Caused by:                                       │              ",
            "              │     permission denied                            │              ",
            "              │                                                  │              ",
            "              │                       [OK]                       │              ",
            "              └──────────────────────────────────────────────────┘              ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_two_causes() {
        let warning = Warning::from_error_messages(vec![
            String::from("Failed to save high score to disk"),
            String::from("failed to create parent directories"),
            String::from("not a directory"),
        ]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "              ┌──────────────────── WARNING ─────────────────────┐              ",
            "              │ Failed to save high score to disk                │              ",
            "              │                                                  │              ",
            "              │ Caused by:                                       │              ",
            "              │     0: failed to create parent directories       │              ",
            "              │     1: not a directory                           │              ",
            "              │                                                  │              ",
            "              │                       [OK]                       │              ",
            "              └──────────────────────────────────────────────────┘              ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_wrapped_one_cause() {
        let warning = Warning::from_error_messages(vec![
            String::from("Failed to parse configuration file; using the default settings instead"),
            String::from("invalid value: integer `30`, expected a grid size between 12 and 20"),
        ]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "              ┌──────────────────── WARNING ─────────────────────┐              ",
            "              │ Failed to parse configuration file; using the    │              ",
            "              │ default settings instead                         │              ",
            "              │                                                  │              ",
            "              │ Caused by:                                       │              ",
            "              │     invalid value: integer `30`, expected a grid │              ",
            "              │     size between 12 and 20                       │              ",
            "              │                                                  │              ",
            "              │                       [OK]                       │              ",
            "              └──────────────────────────────────────────────────┘              ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
