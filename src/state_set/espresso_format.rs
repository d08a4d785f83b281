use crate::error::{BoolSimError, BoolSimResult};
use crate::state_set::native_format::{NativeStateSet, Ternary, TernaryVector};
use std::path::Path;

/// Number of leading lines of `espresso` output which precede the cubes
/// (`.i N`, `.o 1` and `.p K`).
pub const ESPRESSO_HEADER_LINES: usize = 3;

/// Number of trailing lines of `espresso` output which follow the cubes (`.e`).
pub const ESPRESSO_FOOTER_LINES: usize = 1;

/// Number of characters at the end of each cube line which encode the output value (` 1`).
const ESPRESSO_OUTPUT_SUFFIX: usize = 2;

/// Encode the state set as a single-output function for `espresso`: one input per node and
/// one cube (mapped to output `1`) per vector.
pub fn write_espresso_input(set: &NativeStateSet) -> String {
    let mut result = format!(".i {}\n.o 1\n", set.nodes.len());
    for vector in &set.vectors {
        result.push_str(&vector.to_espresso_cube());
        result.push_str(" 1\n");
    }
    result.push_str(".e\n");
    result
}

/// Extract the minimized cubes from the standard output of `espresso`.
///
/// This does not interpret the `espresso` directives. It assumes the output consists of
/// exactly [`ESPRESSO_HEADER_LINES`] header lines, then one line per cube, then exactly
/// [`ESPRESSO_FOOTER_LINES`] terminating line. From each cube line, the trailing two
/// characters (space and output value) are removed.
///
/// Output with fewer than `ESPRESSO_HEADER_LINES + ESPRESSO_FOOTER_LINES` lines, or with
/// cubes that do not have `arity` input symbols, is reported as
/// [`BoolSimError::Malformed`].
pub fn parse_espresso_output(
    path: &Path,
    text: &str,
    arity: usize,
) -> BoolSimResult<Vec<TernaryVector>> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < ESPRESSO_HEADER_LINES + ESPRESSO_FOOTER_LINES {
        return Err(BoolSimError::malformed(
            path,
            lines.len(),
            format!(
                "expected at least {} lines of espresso output",
                ESPRESSO_HEADER_LINES + ESPRESSO_FOOTER_LINES
            ),
        ));
    }

    let cubes = &lines[ESPRESSO_HEADER_LINES..lines.len() - ESPRESSO_FOOTER_LINES];
    let mut result = Vec::with_capacity(cubes.len());
    for (index, line) in cubes.iter().enumerate() {
        let line_number = ESPRESSO_HEADER_LINES + index + 1;
        let symbols: Vec<char> = line.chars().collect();
        if symbols.len() < ESPRESSO_OUTPUT_SUFFIX {
            return Err(BoolSimError::malformed(path, line_number, "cube is too short"));
        }
        let inputs: String = symbols[..symbols.len() - ESPRESSO_OUTPUT_SUFFIX]
            .iter()
            .collect();
        let vector = TernaryVector::parse_with(&inputs, Ternary::from_espresso).map_err(|c| {
            BoolSimError::malformed(path, line_number, format!("unexpected symbol `{c}`"))
        })?;
        if vector.len() != arity {
            return Err(BoolSimError::malformed(
                path,
                line_number,
                format!("cube has {} inputs, expected {}", vector.len(), arity),
            ));
        }
        result.push(vector);
    }
    Ok(result)
}
