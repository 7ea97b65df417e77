use std::io::{self, Write};

use crate::{
    argspec::{self, ExpandError, HL_INDIRECT, IMM8, IX_INDIRECT, IY_INDIRECT},
    table::{ArgField, Row},
};


/// Mnemonics whose `(HL)` form also exists as `(IX+d)` and `(IY+d)`.
pub const IXY_MNEMONICS: &[&str] = &[
    "ADD", "AND", "BIT", "CP", "DEC", "INC", "OR", "RES", "RL", "RR", "SET", "SRL",
];

const RELATIVE_MNEMONICS: &[&str] = &["JR", "DJNZ"];
const IM_MODES: [u8; 3] = [0, 1, 2];

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("Line {line}: {mnemonic}: {source}")]
    Expand {
        mnemonic: String,
        line: usize,
        source: ExpandError,
    },

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Slot {
    First,
    Second,
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct GenerateSummary {
    pub rows: usize,
    pub lines: usize,
}

pub struct Generator {
    rows: Vec<Row>,
}

impl Generator {
    #[inline]
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All lines for one table row, in emission order.
    pub fn expand_row(row: &Row) -> Result<Vec<String>, GenerateError> {
        let mnemonic = row.mnemonic();
        let err = |source| GenerateError::Expand {
            mnemonic: mnemonic.to_string(),
            line: row.line(),
            source,
        };

        let args1 = operands(mnemonic, row.arg1(), Slot::First).map_err(err)?;
        if args1.is_empty() {
            return Ok(vec![mnemonic.to_string()]);
        }

        let args2 = operands(mnemonic, row.arg2(), Slot::Second).map_err(err)?;
        let mut lines = Vec::with_capacity(args1.len() * args2.len().max(1));
        for arg1 in &args1 {
            if args2.is_empty() {
                lines.push(format!("{mnemonic} {arg1}"));
            } else {
                for arg2 in &args2 {
                    lines.push(format!("{mnemonic} {arg1}, {arg2}"));
                }
            }
        }
        Ok(lines)
    }

    /// Writes every row's lines to `output`, one row at a time.
    pub fn write_all<W: Write>(&self, output: &mut W) -> Result<GenerateSummary, GenerateError> {
        let mut summary = GenerateSummary::default();
        for row in &self.rows {
            let lines = Self::expand_row(row)?;
            tracing::debug!(
                line = row.line(),
                mnemonic = row.mnemonic(),
                arg1 = %row.arg1(),
                arg2 = %row.arg2(),
                count = lines.len(),
                "Expanded row"
            );
            for line in &lines {
                writeln!(output, "{line}")?;
            }
            summary.rows += 1;
            summary.lines += lines.len();
        }
        Ok(summary)
    }
}

#[inline]
fn has_ixy_variant(mnemonic: &str) -> bool {
    IXY_MNEMONICS.contains(&mnemonic)
}

fn operands(mnemonic: &str, field: ArgField, slot: Slot) -> Result<Vec<String>, ExpandError> {
    let mut args = argspec::expand(field)?;

    if has_ixy_variant(mnemonic) && field.is_class(HL_INDIRECT) {
        args.extend(argspec::expand_class(IX_INDIRECT)?);
        args.extend(argspec::expand_class(IY_INDIRECT)?);
    }

    if RELATIVE_MNEMONICS.contains(&mnemonic) && field.is_class(IMM8) {
        args = argspec::relative(args.as_slice());
    }

    if slot == Slot::First {
        match mnemonic {
            // no displacement on an indexed jump
            "JP" if field.is_class(IX_INDIRECT) || field.is_class(IY_INDIRECT) => {
                args.truncate(1);
            }
            "IM" => args = IM_MODES.iter().map(u8::to_string).collect(),
            "RST" => args = (0..8u8).map(|i| (i * 8).to_string()).collect(),
            _ => {}
        }
    }

    Ok(args)
}
