// Copyright (c) 2022 Huawei Technologies Co.,Ltd. All rights reserved.
//
// sysMaster is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan
// PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//         http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY
// KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO
// NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//! Line oriented parser for unit text.
use crate::error::{DuplicateSectionSnafu, NoSectionSnafu, Result, SyntaxSnafu};
use nom::{
    bytes::complete::{is_not, take_while1},
    character::complete::{char, space0},
    combinator::{all_consuming, rest},
    sequence::{delimited, separated_pair, terminated},
    IResult,
};

/// One `[Name]` block with its entries in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    /// section name without brackets
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(key, value)` pairs, a key may repeat
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// the last value set for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed unit file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitFile {
    sections: Vec<Section>,
}

impl UnitFile {
    ///
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    ///
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }
}

fn section_header(i: &str) -> IResult<&str, &str> {
    all_consuming(terminated(
        delimited(char('['), is_not("[]"), char(']')),
        space0,
    ))(i)
}

fn key(i: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')(i)
}

fn entry(i: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(key, delimited(space0, char('='), space0), rest))(i)
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(';')
}

/// Join lines ending with a backslash, keeping the number of the first line.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        let (no, mut buf) = match pending.take() {
            Some(p) => p,
            None => {
                if line.is_empty() || is_comment(line) {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        if let Some(stripped) = line.strip_suffix('\\') {
            buf.push_str(stripped.trim_end());
            buf.push(' ');
            pending = Some((no, buf));
        } else {
            buf.push_str(line);
            lines.push((no, buf));
        }
    }

    if let Some((no, buf)) = pending {
        lines.push((no, buf.trim_end().to_string()));
    }
    lines
}

/// Parse unit text into sections.
pub fn parse(input: &str) -> Result<UnitFile> {
    let mut file = UnitFile::default();

    for (no, line) in logical_lines(input) {
        if let Ok((_, name)) = section_header(&line) {
            let name = name.trim();
            if file.section(name).is_some() {
                return DuplicateSectionSnafu { name }.fail();
            }
            file.sections.push(Section {
                name: name.to_string(),
                entries: Vec::new(),
            });
            continue;
        }

        let (k, v) = match entry(&line) {
            Ok((_, kv)) => kv,
            Err(_) => {
                return SyntaxSnafu {
                    line: no,
                    content: line.clone(),
                }
                .fail()
            }
        };

        match file.sections.last_mut() {
            Some(section) => section.entries.push((k.to_string(), v.trim().to_string())),
            None => return NoSectionSnafu { line: no, key: k }.fail(),
        }
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_sections() {
        let file = parse(
            "# comment\n\n[Unit]\nDescription = test unit\n; other comment\n[Service]\nType=oneshot\nExecStart=/bin/echo a \\\n   b\n",
        )
        .unwrap();
        assert_eq!(file.sections().len(), 2);
        assert_eq!(file.section("Unit").unwrap().get("Description"), Some("test unit"));
        let service = file.section("Service").unwrap();
        assert_eq!(service.get("Type"), Some("oneshot"));
        assert_eq!(service.get("ExecStart"), Some("/bin/echo a b"));
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let file = parse("[Service]\nType=simple\nType=oneshot\n").unwrap();
        let service = file.section("Service").unwrap();
        assert_eq!(service.get("Type"), Some("oneshot"));
        assert_eq!(service.entries().count(), 2);
    }

    #[test]
    fn test_empty_value() {
        let file = parse("[Service]\nExecStart=\n").unwrap();
        assert_eq!(file.section("Service").unwrap().get("ExecStart"), Some(""));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse("ExecStart=/bin/true\n"),
            Err(Error::NoSection {
                line: 1,
                key: "ExecStart".to_string()
            })
        );
        assert!(matches!(
            parse("[Service]\nthis is not an entry\n"),
            Err(Error::Syntax { line: 2, .. })
        ));
        assert!(matches!(
            parse("[Service]\n[Service]\n"),
            Err(Error::DuplicateSection { .. })
        ));
    }
}
