// Scopetab - A scoped symbol table for compiler front ends
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Command parsing for the driver.
//!
//! Each input line holds one command. Parsing validates the parameter
//! count so that the symbol table only ever sees well-formed requests.

use thiserror::Error;

use super::lexer::{words, Lexeme};
use crate::table::TypeDescriptor;

/// A single parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `I <name> <type...>`
    Insert {
        name: String,
        descriptor: TypeDescriptor,
    },
    /// `L <name>`
    Lookup { name: String },
    /// `D <name>`
    Delete { name: String },
    /// `P A`
    PrintAll,
    /// `P C`
    PrintCurrent,
    /// `S`
    EnterScope,
    /// `E`
    ExitScope,
    /// `Q`
    Quit,
}

/// Why a command line was rejected before reaching the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Wrong number of parameters for a known command.
    #[error("Number of parameters mismatch for the command {0}")]
    ParameterMismatch(char),

    /// Unknown command.
    #[error("Invalid command")]
    Invalid,

    /// `P` without `A` or `C`. The driver ignores these silently.
    #[error("unknown print target")]
    UnknownPrintTarget,
}

impl Command {
    /// Parse one non-empty command line.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let lexemes = words(line);
        let Some((head, rest)) = lexemes.split_first() else {
            return Err(CommandError::Invalid);
        };

        match head.text {
            "I" => {
                let [name, type_start, ..] = rest else {
                    return Err(CommandError::ParameterMismatch('I'));
                };
                // Everything after the name is the type, inner spacing included.
                let raw_type = line[type_start.span.start..].trim_end();
                Ok(Command::Insert {
                    name: name.text.to_string(),
                    descriptor: TypeDescriptor::parse(raw_type),
                })
            }
            // A bare `L` looks up the empty name.
            "L" => match rest {
                [] => Ok(Command::Lookup {
                    name: String::new(),
                }),
                _ => single_name('L', rest).map(|name| Command::Lookup { name }),
            },
            "D" => single_name('D', rest).map(|name| Command::Delete { name }),
            "P" => match rest.first().map(|target| target.text) {
                Some("A") => Ok(Command::PrintAll),
                Some("C") => Ok(Command::PrintCurrent),
                _ => Err(CommandError::UnknownPrintTarget),
            },
            "S" => Ok(Command::EnterScope),
            "E" => Ok(Command::ExitScope),
            "Q" => Ok(Command::Quit),
            _ => Err(CommandError::Invalid),
        }
    }

    /// The protocol letter of this command.
    pub fn keyword(&self) -> char {
        match self {
            Command::Insert { .. } => 'I',
            Command::Lookup { .. } => 'L',
            Command::Delete { .. } => 'D',
            Command::PrintAll | Command::PrintCurrent => 'P',
            Command::EnterScope => 'S',
            Command::ExitScope => 'E',
            Command::Quit => 'Q',
        }
    }
}

fn single_name(keyword: char, params: &[Lexeme<'_>]) -> Result<String, CommandError> {
    match params {
        [name] => Ok(name.text.to_string()),
        _ => Err(CommandError::ParameterMismatch(keyword)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_rest_of_line_as_type() {
        let command = Command::parse("I foo FUNCTION INT a b   ").unwrap();
        assert_eq!(
            command,
            Command::Insert {
                name: "foo".to_string(),
                descriptor: TypeDescriptor::parse("FUNCTION INT a b"),
            }
        );
        assert_eq!(command.keyword(), 'I');
    }

    #[test]
    fn test_insert_plain_type_with_spaces() {
        let command = Command::parse("I n unsigned   long").unwrap();
        assert_eq!(
            command,
            Command::Insert {
                name: "n".to_string(),
                descriptor: TypeDescriptor::plain("unsigned   long"),
            }
        );
    }

    #[test]
    fn test_insert_missing_type() {
        assert_eq!(
            Command::parse("I foo"),
            Err(CommandError::ParameterMismatch('I'))
        );
        assert_eq!(Command::parse("I"), Err(CommandError::ParameterMismatch('I')));
    }

    #[test]
    fn test_mismatch_message() {
        assert_eq!(
            CommandError::ParameterMismatch('L').to_string(),
            "Number of parameters mismatch for the command L"
        );
    }

    #[test]
    fn test_print_targets() {
        assert_eq!(Command::parse("P A"), Ok(Command::PrintAll));
        assert_eq!(Command::parse("P C"), Ok(Command::PrintCurrent));
        assert_eq!(Command::parse("P"), Err(CommandError::UnknownPrintTarget));
        assert_eq!(Command::parse("P X"), Err(CommandError::UnknownPrintTarget));
        assert_eq!(Command::parse("P A extra"), Ok(Command::PrintAll));
    }

    #[test]
    fn test_lookup_name_count() {
        assert_eq!(
            Command::parse("L"),
            Ok(Command::Lookup {
                name: String::new()
            })
        );
        assert_eq!(
            Command::parse("L a b"),
            Err(CommandError::ParameterMismatch('L'))
        );
        assert_eq!(Command::parse("D"), Err(CommandError::ParameterMismatch('D')));
    }

    #[test]
    fn test_whitespace_only_line_is_invalid() {
        assert_eq!(Command::parse("   "), Err(CommandError::Invalid));
    }

    #[test]
    fn test_scope_commands_ignore_trailing_words() {
        assert_eq!(Command::parse("S now"), Ok(Command::EnterScope));
        assert_eq!(Command::parse("E"), Ok(Command::ExitScope));
        assert_eq!(Command::parse("Q please"), Ok(Command::Quit));
    }
}
