//! Reading a text source line by line until it is exhausted.

use std::io::BufRead;

use crate::error::CommonError;

/// Reads every remaining line of `reader`, in order.
///
/// Line terminators (`\n` or `\r\n`) are stripped, and a terminator at the
/// very end does not produce a trailing empty line.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use pasdecote_common::read_all_lines;
///
/// let lines = read_all_lines(Cursor::new("alpha\r\nbeta\n\ngamma\n")).unwrap();
/// assert_eq!(lines, vec!["alpha", "beta", "", "gamma"]);
/// ```
///
/// # Errors
///
/// Returns [`CommonError::Read`] with the 1-based number of the line that
/// could not be read, including lines that are not valid UTF-8.
pub fn read_all_lines<R: BufRead>(reader: R) -> Result<Vec<String>, CommonError> {
    let lines = reader
        .lines()
        .enumerate()
        .map(|(index, line)| line.map_err(|source| CommonError::read(index + 1, source)))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(count = lines.len(), "Read all lines");
    Ok(lines)
}
