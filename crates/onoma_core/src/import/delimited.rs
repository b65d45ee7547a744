//! `;`-delimited name list parser.
//!
//! Line layout: `culture;component;gender;alphabetic[;ideographic[;phonetic]]`.
//! Extra trailing cells are ignored, so `PL;given;F;Agnieszka;;` is valid.
//! Blank lines and lines starting with `#` are skipped. A leading UTF-8 BOM
//! is dropped.

use crate::model::person_name::{NameParseError, PersonName};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIELD_SEPARATOR: char = ';';
const COMMENT_PREFIX: char = '#';
const BYTE_ORDER_MARK: char = '\u{feff}';
const REQUIRED_FIELDS: [&str; 4] = ["culture", "component", "gender", "alphabetic"];

/// Import-layer error carrying the offending line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Line has fewer than the four required cells.
    MissingField { line: usize, field: &'static str },
    /// Gender or component cell is not a known tag.
    InvalidValue { line: usize, source: NameParseError },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { line, field } => {
                write!(f, "line {line}: missing `{field}` field")
            }
            Self::InvalidValue { line, source } => write!(f, "line {line}: {source}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingField { .. } => None,
            Self::InvalidValue { source, .. } => Some(source),
        }
    }
}

/// Parses one record line. `line_number` is only used for error reporting.
pub fn parse_name_line(line: &str, line_number: usize) -> Result<PersonName, ImportError> {
    let cells = line
        .trim()
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .collect::<Vec<_>>();

    if let Some(field) = REQUIRED_FIELDS
        .get(cells.len()..)
        .and_then(|rest| rest.first().copied())
    {
        return Err(ImportError::MissingField {
            line: line_number,
            field,
        });
    }

    let invalid = |source: NameParseError| ImportError::InvalidValue {
        line: line_number,
        source,
    };
    let component = cells[1].parse().map_err(invalid)?;
    let gender = cells[2].parse().map_err(invalid)?;

    let mut name = PersonName::new(cells[0], component, gender, cells[3]);
    if let Some(ideographic) = cells.get(4) {
        name.ideographic = (*ideographic).to_string();
    }
    if let Some(phonetic) = cells.get(5) {
        name.phonetic = (*phonetic).to_string();
    }
    Ok(name)
}

/// Parses a whole file body, skipping blank and `#` comment lines.
pub fn parse_name_lines(text: &str) -> Result<Vec<PersonName>, ImportError> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with(COMMENT_PREFIX)
        })
        .map(|(index, line)| parse_name_line(line, index + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_name_line, parse_name_lines, ImportError};
    use crate::model::person_name::{Component, Gender, NameParseErrorKind};

    #[test]
    fn parses_line_with_trailing_empty_cells() {
        let name = parse_name_line("PL;given;F;Agnieszka;;", 1).unwrap();
        assert_eq!(name.culture, "PL");
        assert_eq!(name.component, Component::Given);
        assert_eq!(name.gender, Gender::Feminine);
        assert_eq!(name.alphabetic, "Agnieszka");
        assert!(name.ideographic.is_empty());
        assert!(name.phonetic.is_empty());
        assert_eq!(name.id, None);
    }

    #[test]
    fn parses_optional_spellings_and_tag_case() {
        let name = parse_name_line(" JA ; FAMILY ; u ; Yamada ; 山田 ; やまだ ", 3).unwrap();
        assert_eq!(name.culture, "JA");
        assert_eq!(name.component, Component::Family);
        assert_eq!(name.gender, Gender::Unisex);
        assert_eq!(name.ideographic, "山田");
        assert_eq!(name.phonetic, "やまだ");
    }

    #[test]
    fn short_line_reports_first_missing_field() {
        let err = parse_name_line("PL;given", 7).unwrap_err();
        assert_eq!(
            err,
            ImportError::MissingField {
                line: 7,
                field: "gender"
            }
        );
    }

    #[test]
    fn unknown_gender_reports_line_and_value() {
        let err = parse_name_line("PL;given;X;Agnieszka", 2).unwrap_err();
        match err {
            ImportError::InvalidValue { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(source.kind, NameParseErrorKind::Gender);
                assert_eq!(source.value, "X");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_lines_skips_blank_and_comment_lines() {
        let text = "# polish given names\nPL;given;F;Agnieszka;;\n\nPL;given;F;Jadwiga;;\n";
        let names = parse_name_lines(text).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[1].alphabetic, "Jadwiga");
    }

    #[test]
    fn parse_lines_drops_leading_byte_order_mark() {
        let text = "\u{feff}PL;given;F;Agnieszka;;\nPL;given;F;Jadwiga;;\n";
        let names = parse_name_lines(text).unwrap();
        assert_eq!(names[0].culture, "PL");
        assert_eq!(names[1].culture, "PL");

        let text = "\u{feff}# header\nDE;given;F;Agnes\n";
        let names = parse_name_lines(text).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].culture, "DE");
    }

    #[test]
    fn parse_lines_reports_original_line_number() {
        let text = "PL;given;F;Agnieszka\n\nPL;given;F\n";
        let err = parse_name_lines(text).unwrap_err();
        assert_eq!(
            err,
            ImportError::MissingField {
                line: 3,
                field: "alphabetic"
            }
        );
    }
}
