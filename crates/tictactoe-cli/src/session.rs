//! A single terminal game session.

use crate::config::{Config, OutputMode};
use crate::protocol::{Command, HistoryEntry, Reply};
use crate::render;
use std::io::{BufRead, Write};
use tictactoe_core::{BoardSize, GameEngine, GameError, GamePhase};
use tracing::{debug, info, warn};

/// Owns the engine and translates commands into replies.
pub struct Session {
    engine: GameEngine,
    output: OutputMode,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, GameError> {
        let engine = match config.initial_size {
            Some(size) => GameEngine::with_size(size.get())?,
            None => GameEngine::new(),
        };

        Ok(Self {
            engine,
            output: config.output,
        })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Handle one command. Rejected commands produce an `Error` reply and
    /// leave the game unchanged.
    pub fn handle(&mut self, command: &Command) -> Vec<Reply> {
        debug!("Handling {:?}", command);

        match command {
            Command::Show => return vec![self.state()],
            Command::History => return vec![self.history()],
            Command::Help => {
                return vec![Reply::Help {
                    text: render::HELP.to_string(),
                }]
            }
            Command::Quit => return vec![Reply::Goodbye],
            _ => {}
        }

        let Some(action) = command.action() else {
            return Vec::new();
        };

        match self.engine.apply_action(action) {
            Ok(events) => {
                let mut replies = vec![Reply::Events { events }];
                if self.engine.phase() == GamePhase::Selecting {
                    replies.push(Reply::Sizes {
                        offered: BoardSize::OFFERED.to_vec(),
                    });
                } else {
                    replies.push(self.state());
                }
                replies
            }
            Err(e) => {
                warn!("Rejected {:?}: {}", command, e);
                vec![Reply::Error {
                    message: e.to_string(),
                }]
            }
        }
    }

    /// Handle one raw input line in the session's input format
    pub fn handle_line(&mut self, line: &str) -> Vec<Reply> {
        let parsed = match self.output {
            OutputMode::Text => Command::parse_text(line),
            OutputMode::Json => Command::parse_json(line),
        };

        match parsed {
            Ok(command) => self.handle(&command),
            Err(e) => {
                warn!("Could not parse {:?}: {}", line, e);
                vec![Reply::Error {
                    message: e.to_string(),
                }]
            }
        }
    }

    /// Read commands until `quit` or end of input, writing replies as they
    /// are produced.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        info!("Session started ({} output)", self.output);
        self.write(&mut output, &[self.state()])?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let replies = self.handle_line(&line);
            self.write(&mut output, &replies)?;

            if replies.contains(&Reply::Goodbye) {
                break;
            }
        }

        info!("Session ended after {} moves", self.engine().history_len() - 1);
        Ok(())
    }

    fn write<W: Write>(&self, output: &mut W, replies: &[Reply]) -> anyhow::Result<()> {
        for reply in replies {
            match self.output {
                OutputMode::Text => {
                    let text = render::render_reply(reply);
                    if !text.is_empty() {
                        writeln!(output, "{}", text)?;
                    }
                }
                OutputMode::Json => {
                    serde_json::to_writer(&mut *output, reply)?;
                    writeln!(output)?;
                }
            }
        }
        output.flush()?;
        Ok(())
    }

    fn state(&self) -> Reply {
        Reply::State {
            view: self.engine.view(),
        }
    }

    fn history(&self) -> Reply {
        let cursor = self.engine.cursor();
        Reply::History {
            entries: (0..self.engine.history_len())
                .map(|n| HistoryEntry::new(n, n == cursor))
                .collect(),
        }
    }
}
