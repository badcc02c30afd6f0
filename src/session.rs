//! The line protocol a game server uses to drive the agent
//!
//! ```text
//! settings your_botid 1
//! settings field_columns 7
//! settings field_rows 6
//! update game round 1
//! update game field 0,0,0,0,0,0,0;...;0,0,0,2,0,0,0
//! action move 10000
//! ```
//!
//! Every `action move` is answered with `place_disc <column>`.

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, warn};

use std::io::{stderr, BufRead, Write};

use crate::board::Board;
use crate::strategy::Strategy;

pub struct Session {
    board: Board,
    strategy: Strategy,
    show_board: bool,
}

impl Session {
    pub fn new(strategy: Strategy, show_board: bool) -> Self {
        Self {
            board: Board::new(),
            strategy,
            show_board,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Answers every command read from `input` until it runs out
    ///
    /// Lines that cannot be handled are logged and skipped, only I/O failures end
    /// the session early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read from input")?;
            match self.handle_line(&line) {
                Ok(Some(column)) => {
                    writeln!(output, "place_disc {}", column)?;
                    output.flush()?;
                }
                Ok(None) => {}
                Err(err) => warn!("skipping '{}': {:#}", line.trim(), err),
            }
        }
        Ok(())
    }

    /// Applies one command, returning the column to play if it asked for a move
    pub fn handle_line(&mut self, line: &str) -> Result<Option<usize>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["settings", "your_botid", id] => {
                let id = id
                    .parse::<u8>()
                    .with_context(|| format!("could not parse '{}' as a player id", id))?;
                self.board.set_my_id(id)?;
            }
            ["settings", "field_columns", columns] => {
                let columns = parse_dimension(columns)?;
                self.resize(self.board.rows(), columns)?;
            }
            ["settings", "field_rows", rows] => {
                let rows = parse_dimension(rows)?;
                self.resize(rows, self.board.columns())?;
            }
            ["settings", key, ..] => debug!(key, "ignoring setting"),
            ["update", "game", "field", field] => self.board.update_from_field(field)?,
            ["update", ..] => debug!(line, "ignoring update"),
            ["action", "move", ..] => return self.choose_move().map(Some),
            _ => bail!("unknown command"),
        }
        Ok(None)
    }

    fn choose_move(&mut self) -> Result<usize> {
        if self.board.my_id().is_none() {
            bail!("asked for a move before the player id was assigned");
        }
        if self.show_board {
            self.board.display(&mut stderr())?;
        }
        self.strategy
            .next_move(&mut self.board)
            .ok_or_else(|| anyhow!("asked for a move but every column is full"))
    }

    fn resize(&mut self, rows: usize, columns: usize) -> Result<()> {
        if self.board.empty_cells() != self.board.rows() * self.board.columns() {
            bail!("the field can only be resized before any disc is played");
        }
        let mut board = Board::with_size(rows, columns);
        if let Some(id) = self.board.my_id() {
            board.set_my_id(id)?;
        }
        self.board = board;
        Ok(())
    }
}

fn parse_dimension(value: &str) -> Result<usize> {
    let size = value
        .parse::<usize>()
        .with_context(|| format!("could not parse '{}' as a field size", value))?;
    if size == 0 {
        bail!("a field needs at least one row and one column");
    }
    Ok(size)
}
