//! Reading listings and captions from arguments or stdin, and picking where
//! output goes.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

/// Read one entry per line. Line endings are stripped, nothing else is.
///
/// With `skip_blank`, lines that are empty after stripping are dropped.
pub fn read_lines<R: BufRead>(reader: R, skip_blank: bool) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if skip_blank && line.is_empty() {
            continue;
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Positional values, followed by stdin lines when `from_stdin` is set.
pub fn gather(mut values: Vec<String>, from_stdin: bool, skip_blank: bool) -> io::Result<Vec<String>> {
    if from_stdin {
        values.extend(read_lines(io::stdin().lock(), skip_blank)?);
    }
    Ok(values)
}

/// Buffered writer for a file, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_strips_line_endings_only() {
        let input = Cursor::new("dog.jpg\r\n my cat.png \n\nend");
        let lines = read_lines(input, true).unwrap();
        assert_eq!(lines, ["dog.jpg", " my cat.png ", "end"]);
    }

    #[test]
    fn test_read_lines_keeps_blank_when_asked() {
        let input = Cursor::new("a, b\n\nc\n");
        let lines = read_lines(input, false).unwrap();
        assert_eq!(lines, ["a, b", "", "c"]);
    }

    #[test]
    fn test_gather_without_stdin() {
        let values = gather(vec!["a.jpg".to_string()], false, true).unwrap();
        assert_eq!(values, ["a.jpg"]);
    }

    #[test]
    fn test_open_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        {
            let mut out = open_output(Some(&path)).unwrap();
            writeln!(out, "{{}}").unwrap();
            out.flush().unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }
}
