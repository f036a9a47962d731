use std::io::{self, Write};

use serde::Serialize;

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(json: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn emit<T: Serialize + ?Sized>(&self, text: &str, json_value: &T) -> AppResult<()> {
        let mut stdout = io::stdout().lock();
        match self.mode {
            OutputMode::Text => writeln!(stdout, "{text}")?,
            OutputMode::Json => {
                serde_json::to_writer_pretty(&mut stdout, json_value)?;
                writeln!(stdout)?;
            }
        }
        Ok(())
    }

    pub fn emit_list<T, F>(&self, items: &[T], empty: &str, render: F) -> AppResult<()>
    where
        T: Serialize,
        F: Fn(usize, &T) -> String,
    {
        if self.mode == OutputMode::Json {
            return self.emit("", items);
        }

        if items.is_empty() {
            return self.emit(empty, items);
        }

        let blocks: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(index, item)| render(index, item))
            .collect();
        self.emit(&blocks.join("\n"), items)
    }
}
