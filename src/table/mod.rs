use std::{
    fmt::{self, Display, Formatter},
    io::{self, BufRead},
};


/// Table label read when none is given on the command line.
pub const DEFAULT_TABLE: &str = "instrTBl";

const TERMINATOR: &str = ".db 0xff";
const DATA_DIRECTIVE: &str = ".db";
const MNEMONIC_PREFIX: &str = "I_";

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("Table \"{name}\" not found")]
    NotFound { name: String },

    #[error("Line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Line {line}: Invalid operand class field: \"{field}\"")]
    InvalidField { line: usize, field: String },

    #[error("Failed to read table: {0}")]
    Io(#[from] io::Error),
}

/// An operand-class column, decided when the row is parsed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArgField {
    /// The `0` placeholder: no operand in this slot.
    Empty,
    Class(char),
}

impl ArgField {
    #[inline]
    pub fn class(&self) -> Option<char> {
        match self {
            Self::Empty => None,
            Self::Class(c) => Some(*c),
        }
    }

    #[inline]
    pub fn is_class(&self, c: char) -> bool {
        *self == Self::Class(c)
    }

    /// Parses a quoted character (`'A'`) or an integer code (`0`, `0x0b`, `12`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        for quote in ['\'', '"'] {
            if let Some(inner) = s
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
            {
                let mut chars = inner.chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii() => Some(Self::Class(c)),
                    _ => None,
                };
            }
        }

        let radix = |prefix: &str| {
            s.strip_prefix(prefix)
                .or_else(|| s.strip_prefix(&prefix.to_ascii_uppercase()))
        };
        let value = if let Some(hex) = radix("0x") {
            u8::from_str_radix(hex, 16).ok()?
        } else if let Some(bin) = radix("0b") {
            u8::from_str_radix(bin, 2).ok()?
        } else {
            s.parse::<u8>().ok()?
        };
        match value {
            0 => Some(Self::Empty),
            1..=0x7f => Some(Self::Class(char::from(value))),
            _ => None,
        }
    }
}

impl Display for ArgField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "0"),
            Self::Class(c) if c.is_ascii_graphic() => write!(f, "'{c}'"),
            Self::Class(c) => write!(f, "0x{:02x}", *c as u32),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Row {
    line: usize,
    mnemonic: String,
    arg1: ArgField,
    arg2: ArgField,
}

impl Row {
    #[inline]
    pub fn new<S: Into<String>>(
        line: usize,
        mnemonic: S,
        arg1: ArgField,
        arg2: ArgField,
    ) -> Self {
        Self {
            line,
            mnemonic: mnemonic.into(),
            arg1,
            arg2,
        }
    }

    /// 1-based line in the source file.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Mnemonic with the `I_` prefix removed.
    #[inline]
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    #[inline]
    pub fn arg1(&self) -> ArgField {
        self.arg1
    }

    #[inline]
    pub fn arg2(&self) -> ArgField {
        self.arg2
    }

    fn from_fields(line: usize, fields: &[&str]) -> Result<Self, TableError> {
        if fields.len() < 3 {
            return Err(TableError::MalformedRow {
                line,
                reason: format!("Expected at least 3 fields, found {}", fields.len()),
            });
        }

        let mnemonic = match fields[0].strip_prefix(MNEMONIC_PREFIX) {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(TableError::MalformedRow {
                    line,
                    reason: format!(
                        "Expected a mnemonic starting with \"{MNEMONIC_PREFIX}\", found \"{}\"",
                        fields[0]
                    ),
                })
            }
        };

        let arg = |field: &str| {
            ArgField::parse(field).ok_or_else(|| TableError::InvalidField {
                line,
                field: field.to_string(),
            })
        };
        Ok(Self::new(line, mnemonic, arg(fields[1])?, arg(fields[2])?))
    }
}

/// Strips a trailing `;` comment and surrounding whitespace.
///
/// A `;` inside a quoted character literal does not start a comment.
pub fn clean_line(line: &str) -> &str {
    let mut quote = None;
    for (i, c) in line.char_indices() {
        match (quote, c) {
            (None, ';') => return line[..i].trim(),
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if q == c => quote = None,
            _ => {}
        }
    }
    line.trim()
}

/// Reads the rows of the `.db` table labelled `name` from `reader`.
///
/// Reading starts at the line `"<name>:"` and stops at `.db 0xff` or end of
/// input. Lines that are not `.db` declarations are skipped.
pub fn read_table<R: BufRead>(reader: R, name: &str) -> Result<Vec<Row>, TableError> {
    let label = format!("{name}:");
    let mut lines = reader.lines().enumerate();

    let mut found = false;
    for (index, line) in lines.by_ref() {
        if clean_line(&line?) == label {
            tracing::debug!(table = name, line = index + 1, "Found instruction table");
            found = true;
            break;
        }
    }
    if !found {
        return Err(TableError::NotFound {
            name: name.to_string(),
        });
    }

    let mut rows = Vec::new();
    for (index, line) in lines {
        let line = line?;
        let line = clean_line(&line);
        if line == TERMINATOR {
            break;
        }
        // index labels and other directives
        let body = match line.strip_prefix(DATA_DIRECTIVE) {
            Some(body) if body.starts_with(char::is_whitespace) => body,
            _ => continue,
        };
        let fields: Vec<&str> = body.split(',').map(str::trim).collect();
        rows.push(Row::from_fields(index + 1, &fields)?);
    }
    Ok(rows)
}
