//! Operand classes of the instruction table and their concrete operands.
//!
//! The lookup tables mirror the assembler's own `argspecTbl` and `argGrpTbl`
//! so both can be checked against each other line by line.

use crate::table::ArgField;

#[cfg(test)]
mod tests;

#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExpandError {
    #[error("Unknown operand class: 0x{0:02x}")]
    UnknownClass(u8),
}

/// Classes that stand for exactly one operand.
pub const ARGSPEC_TABLE: &[(char, &str)] = &[
    ('A', "A"),
    ('B', "B"),
    ('C', "C"),
    ('k', "(C)"),
    ('D', "D"),
    ('E', "E"),
    ('H', "H"),
    ('L', "L"),
    ('I', "I"),
    ('R', "R"),
    ('h', "HL"),
    ('l', "(HL)"),
    ('d', "DE"),
    ('e', "(DE)"),
    ('b', "BC"),
    ('c', "(BC)"),
    ('a', "AF"),
    ('f', "AF'"),
    ('X', "IX"),
    ('x', "(IX)"),
    ('Y', "IY"),
    ('y', "(IY)"),
    ('s', "SP"),
    ('p', "(SP)"),
    ('Z', "Z"),
    ('z', "NZ"),
    ('=', "NC"),
    ('+', "P"),
    ('-', "M"),
    ('1', "PO"),
    ('2', "PE"),
];

/// Classes that stand for every member of a group, in member order.
pub const ARGGROUP_TABLE: &[(char, &str)] = &[
    ('\x01', "bdha"),
    ('\x02', "ZzC="),
    ('\x03', "bdhs"),
    ('\x04', "bdXs"),
    ('\x05', "bdYs"),
    ('\x0a', "ZzC=+-12"),
    ('\x0b', "BCDEHLA"),
];

/// The bit number operand of `BIT`, `RES` and `SET`.
pub const BIT_INDEX_CLASS: char = '\x0c';
const BIT_INDEXES: [&str; 3] = ["0", "3", "7"];

pub const IMM8: char = 'n';
pub const IMM16: char = 'N';
pub const MEM8: char = 'm';
pub const MEM16: char = 'M';

pub const HL_INDIRECT: char = 'l';
pub const IX_INDIRECT: char = 'x';
pub const IY_INDIRECT: char = 'y';

const DISPLACEMENTS: [&str; 4] = ["+1", "-1", "+100", "-127"];

#[inline]
pub fn literal(class: char) -> Option<&'static str> {
    lookup(ARGSPEC_TABLE, class)
}

#[inline]
pub fn group(class: char) -> Option<&'static str> {
    lookup(ARGGROUP_TABLE, class)
}

fn lookup(table: &'static [(char, &'static str)], class: char) -> Option<&'static str> {
    table
        .iter()
        .find(|(c, _)| *c == class)
        .map(|(_, value)| *value)
}

#[inline]
fn unknown(class: char) -> ExpandError {
    ExpandError::UnknownClass(class as u8)
}

/// Expands an operand-class field into its concrete operands.
///
/// `ArgField::Empty` expands to nothing.
pub fn expand(field: ArgField) -> Result<Vec<String>, ExpandError> {
    match field.class() {
        None => Ok(Vec::new()),
        Some(class) => expand_class(class),
    }
}

pub fn expand_class(class: char) -> Result<Vec<String>, ExpandError> {
    match class {
        IMM8 | IMM16 | MEM8 | MEM16 => {
            let bits = if matches!(class, IMM16 | MEM16) { 16 } else { 8 };
            let memory = matches!(class, MEM8 | MEM16);
            Ok((0..bits)
                .map(|i| {
                    let n = 1u32 << i;
                    if memory {
                        format!("({n})")
                    } else {
                        n.to_string()
                    }
                })
                .collect())
        }

        IX_INDIRECT | IY_INDIRECT => {
            let base = literal(class).ok_or_else(|| unknown(class))?;
            let reg = if class == IX_INDIRECT { "IX" } else { "IY" };
            let mut result = Vec::with_capacity(1 + DISPLACEMENTS.len());
            result.push(base.to_string());
            result.extend(DISPLACEMENTS.iter().map(|d| format!("({reg}{d})")));
            Ok(result)
        }

        _ => {
            if let Some(value) = literal(class) {
                return Ok(vec![value.to_string()]);
            }
            if class == BIT_INDEX_CLASS {
                return Ok(BIT_INDEXES.iter().map(|s| s.to_string()).collect());
            }
            let members = group(class).ok_or_else(|| unknown(class))?;
            members
                .chars()
                .map(|c| literal(c).map(str::to_string).ok_or_else(|| unknown(c)))
                .collect()
        }
    }
}

/// Turns immediate operands into relative jump targets.
///
/// Every value but the last yields `$+value`; the same values then yield
/// `$-value`. The last immediate is never used as a displacement.
pub fn relative<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    let used = &args[..args.len().saturating_sub(1)];
    let forward = used.iter().map(|s| format!("$+{}", s.as_ref()));
    let backward = used.iter().map(|s| format!("$-{}", s.as_ref()));
    forward.chain(backward).collect()
}
