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

//! Fuzz target for the Scopetab command driver.
//!
//! This fuzzer feeds random scripts to the driver to find crashes or
//! panics anywhere between command parsing and trace rendering.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_driver
//!
//! Run for a specific duration:
//!   cargo +nightly fuzz run fuzz_driver -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(script) = std::str::from_utf8(data) {
        // Bad headers are errors, never panics
        let _ = scopetab::run(script);

        // Force a valid header so the command loop is always exercised
        let _ = scopetab::run(&format!("3\n{}", script));
    }
});
