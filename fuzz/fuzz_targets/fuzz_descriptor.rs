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

//! Fuzz target for type descriptor parsing.
//!
//! Generates structured inputs with `arbitrary` so the keyword paths
//! (`FUNCTION`, `STRUCT`, `UNION`) are hit often.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_descriptor

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scopetab::table::TypeDescriptor;

#[derive(Debug, Arbitrary)]
enum Head {
    Function,
    Struct,
    Union,
    Other(String),
}

#[derive(Debug, Arbitrary)]
struct Input {
    head: Head,
    words: Vec<String>,
    name: String,
}

fuzz_target!(|input: Input| {
    let head = match &input.head {
        Head::Function => "FUNCTION",
        Head::Struct => "STRUCT",
        Head::Union => "UNION",
        Head::Other(word) => word.as_str(),
    };
    let text = format!("{} {}", head, input.words.join(" "));

    let descriptor = TypeDescriptor::parse(&text);
    let rendered = descriptor.render(&input.name);
    assert!(rendered.starts_with('<'));

    // Re-parsing the canonical form must be stable
    let canonical = descriptor.to_string();
    assert_eq!(TypeDescriptor::parse(&canonical).to_string(), canonical);
});
