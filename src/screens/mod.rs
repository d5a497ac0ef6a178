/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Statequiz.
 *
 * Statequiz is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Statequiz is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Statequiz.  If not, see <http://www.gnu.org/licenses/>.
 */

pub(crate) mod input;
pub(crate) mod quiz;
pub(crate) mod results;
pub(crate) mod setup;

/// "State" -> "states". Catalog labels are plain English nouns.
pub(crate) fn plural(label: &str) -> String {
    format!("{}s", label.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::plural;

    #[test]
    fn plural_labels() {
        assert_eq!(plural("State"), "states");
        assert_eq!(plural("Capital"), "capitals");
    }
}
