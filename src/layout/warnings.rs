//! This module contains everything related to markup warnings.
//!
//! Malformed bold markup never fails a build: the lexer falls back to literal
//! text. These warnings exist so that the surprise is at least announced.

use std::fmt;
use std::path::PathBuf;

use colored::*;

use crate::layout::utils::line_span;

/// The position of a warning in the tile text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// The line number of the position.
    pub line: u32,

    /// The column number of the position.
    pub column: usize,

    /// The offset from the beginning of the text.
    pub offset: usize,
}

/// The different types of warning that can occur while scanning markup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WarningType {
    /// A bold marker that is never closed.
    UnterminatedBold,

    /// A closing bold marker without a matching opening one.
    StrayClosingBold,

    /// A bold marker opened inside another bold span.
    NestedBold,
}

impl WarningType {
    /// Returns the title of the warning.
    pub fn title(self) -> &'static str {
        match self {
            WarningType::UnterminatedBold => "unterminated bold marker",
            WarningType::StrayClosingBold => "stray closing bold marker",
            WarningType::NestedBold => "bold marker inside a bold span",
        }
    }

    /// Returns the detail of the warning.
    pub fn detail(self) -> &'static str {
        match self {
            WarningType::UnterminatedBold => "bold starts here but never ends",
            WarningType::StrayClosingBold => "this closes nothing",
            WarningType::NestedBold => "bold spans don't nest",
        }
    }

    /// Returns a potential note.
    pub fn note(self) -> Option<&'static str> {
        match self {
            WarningType::UnterminatedBold => {
                Some("to use bold, close the span, e.g. '<b>this is bold</b>'")
            }
            WarningType::StrayClosingBold => None,
            WarningType::NestedBold => Some("the markers will be rendered as literal text"),
        }
    }
}

/// A warning that occured during the markup scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyWarning {
    /// The position of the warning.
    pub position: Position,

    /// The type of the warning.
    pub ty: WarningType,
}

/// A struct that contains many warnings that references a file.
#[derive(Debug)]
pub struct Warnings {
    /// The path to the corresponding file.
    pub path: PathBuf,

    /// The content that produced the warnings.
    pub content: String,

    /// The warnings produced.
    pub warnings: Vec<EmptyWarning>,
}

impl fmt::Display for Warnings {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for warning in &self.warnings {
            let (start, end) = line_span(&self.content, warning.position.offset);

            let line = warning.position.line;
            let column = warning.position.column;

            let number = format!("{} ", line);
            let gutter = " ".repeat(number.len() - 1);
            let margin = " ".repeat(column);

            writeln!(
                fmt,
                "{}{}",
                "warning: ".bold().yellow(),
                warning.ty.title().bold()
            )?;

            writeln!(
                fmt,
                "{}{} {}:{}:{}",
                gutter,
                "-->".bold().blue(),
                self.path.display(),
                line,
                column
            )?;

            writeln!(fmt, "{} {}", gutter, "|".blue().bold())?;
            writeln!(
                fmt,
                "{} {}",
                &format!("{}|", number).blue().bold(),
                &self.content[start..end]
            )?;
            writeln!(
                fmt,
                "{} {}{}{} {}",
                gutter,
                "|".blue().bold(),
                margin,
                "^".bold().yellow(),
                warning.ty.detail().bold().yellow()
            )?;
            writeln!(fmt, "{} {}", gutter, "|".blue().bold())?;

            if let Some(note) = warning.ty.note() {
                writeln!(
                    fmt,
                    "{} {} {}{}",
                    gutter,
                    "=".blue().bold(),
                    "note: ".bold(),
                    note
                )?;
            }
        }

        Ok(())
    }
}
