// Copyright (C) 2025 The Weald Authors. This program is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License as published by the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

/// Split a command's argument string into words on whitespace. The grammar
/// has no quoting; a quote character is just part of a word.
pub fn parse_into_words(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}
