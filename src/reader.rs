use crate::error::{Error, Result};
use crate::format::Delimiter;
use std::io::{BufRead, Seek, SeekFrom};

/// Terminates every data section.
pub const SENTINEL: &str = "0";

/// Splits a line into data items.
///
/// Runs of blanks collapse when the delimiter is whitespace. Items are
/// trimmed, quote characters are removed from quoted items (which may
/// contain the delimiter) and a `/` outside quotes starts a comment that
/// runs to the end of the line.
pub fn split_fields(line: &str, delimiter: Delimiter) -> Vec<String> {
    tokenize(line, delimiter).0
}

/// Splits a line into data items and reports whether a quote was left
/// open at the end of the line.
fn tokenize(line: &str, delimiter: Delimiter) -> (Vec<String>, bool) {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quote: Option<char> = None;
    let mut started = false;

    for c in line.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            } else {
                field.push(c);
            }
            continue;
        }
        match (c, delimiter) {
            ('\'' | '"', _) => {
                quote = Some(c);
                started = true;
            }
            ('/', _) => break,
            (',', Delimiter::Comma) => {
                fields.push(field.trim().to_string());
                field.clear();
                started = false;
            }
            (c, Delimiter::Space) if c.is_whitespace() => {
                if started {
                    fields.push(field.trim().to_string());
                    field.clear();
                    started = false;
                }
            }
            (c, _) => {
                if !c.is_whitespace() {
                    started = true;
                }
                field.push(c);
            }
        }
    }

    match delimiter {
        Delimiter::Comma if started || !fields.is_empty() => fields.push(field.trim().to_string()),
        Delimiter::Space if started => fields.push(field.trim().to_string()),
        _ => {}
    }
    (fields, quote.is_some())
}

/// Removes a trailing `/` comment and surrounding whitespace.
pub fn strip_comment(field: &str) -> &str {
    field.split('/').next().unwrap_or("").trim()
}

/// Returns true if the fields terminate a data section.
pub fn is_sentinel(fields: &[String]) -> bool {
    fields
        .first()
        .map_or(false, |f| strip_comment(f) == SENTINEL)
}

/// Returns true for the record that ends all remaining raw data.
pub fn is_end_of_data(fields: &[String]) -> bool {
    fields
        .first()
        .map_or(false, |f| strip_comment(f).eq_ignore_ascii_case("Q"))
}

/// Data items of one input line.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// One-based line number.
    pub line: usize,
    pub fields: Vec<String>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the item at `col`, or `None` if it is absent or blank.
    pub fn text(&self, col: usize) -> Option<&str> {
        self.fields
            .get(col)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn require(&self, section: &'static str, col: usize) -> Result<&str> {
        self.text(col).ok_or(Error::MissingField {
            section,
            line: self.line,
            column: col,
        })
    }

    pub fn f64_at(&self, section: &'static str, col: usize) -> Result<f64> {
        let value = self.require(section, col)?;
        self.parse_f64(section, col, value)
    }

    /// Returns the number at `col`, or `default` if the item was omitted.
    pub fn f64_or(&self, section: &'static str, col: usize, default: f64) -> Result<f64> {
        match self.text(col) {
            Some(value) => self.parse_f64(section, col, value),
            None => Ok(default),
        }
    }

    /// Returns the non-negative integer at `col`.
    pub fn usize_at(&self, section: &'static str, col: usize) -> Result<usize> {
        let value = self.require(section, col)?;
        self.parse_usize(section, col, value)
    }

    /// Returns the non-negative integer at `col`, or `default` if the item
    /// was omitted.
    pub fn usize_or(&self, section: &'static str, col: usize, default: usize) -> Result<usize> {
        match self.text(col) {
            Some(value) => self.parse_usize(section, col, value),
            None => Ok(default),
        }
    }

    /// Status items are in service when nonzero.
    pub fn flag_or(&self, section: &'static str, col: usize, default: bool) -> Result<bool> {
        match self.text(col) {
            Some(value) => Ok(self.parse_f64(section, col, value)? != 0.0),
            None => Ok(default),
        }
    }

    fn parse_usize(&self, section: &'static str, col: usize, value: &str) -> Result<usize> {
        value.parse::<usize>().map_err(|_| Error::InvalidNumber {
            section,
            line: self.line,
            column: col,
            value: value.to_string(),
        })
    }

    fn parse_f64(&self, section: &'static str, col: usize, value: &str) -> Result<f64> {
        value.parse::<f64>().map_err(|_| Error::InvalidNumber {
            section,
            line: self.line,
            column: col,
            value: value.to_string(),
        })
    }
}

/// Forward-only reader over the lines of a raw data file that yields the
/// records of one section at a time.
pub struct SectionReader<R> {
    inner: R,
    delimiter: Delimiter,
    line: usize,
    end_of_data: bool,
    buf: Vec<u8>,
}

impl<R: BufRead + Seek> SectionReader<R> {
    pub fn new(inner: R, delimiter: Delimiter) -> Self {
        Self {
            inner,
            delimiter,
            line: 0,
            end_of_data: false,
            buf: Vec::new(),
        }
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: Delimiter) {
        self.delimiter = delimiter;
    }

    /// Number of the last line read.
    pub fn line(&self) -> usize {
        self.line
    }

    /// True once the `Q` record has been read.
    pub fn is_end_of_data(&self) -> bool {
        self.end_of_data
    }

    /// Resets the reader to the start of the input.
    pub fn rewind(&mut self) -> Result<()> {
        self.inner.seek(SeekFrom::Start(0))?;
        self.line = 0;
        self.end_of_data = false;
        Ok(())
    }

    /// Returns the next line without the line terminator.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let n = self.inner.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.line += 1;

        let text = String::from_utf8_lossy(&self.buf);
        Ok(Some(text.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Returns the data items of the next non-blank line.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        while let Some(text) = self.next_line()? {
            let (fields, open_quote) = tokenize(&text, self.delimiter);
            if open_quote {
                return Err(Error::UnterminatedQuote { line: self.line });
            }
            if !fields.is_empty() {
                return Ok(Some(Row {
                    line: self.line,
                    fields,
                }));
            }
        }
        Ok(None)
    }

    /// Returns the next record of `section`, or `None` once the section's
    /// terminating record (or the end of data record) has been read.
    pub fn section_row(&mut self, section: &'static str) -> Result<Option<Row>> {
        if self.end_of_data {
            return Ok(None);
        }
        match self.next_row()? {
            None => Err(Error::UnexpectedEof { section }),
            Some(row) if is_sentinel(&row.fields) => Ok(None),
            Some(row) if is_end_of_data(&row.fields) => {
                log::debug!("End of data record found in {} data.", section);
                self.end_of_data = true;
                Ok(None)
            }
            Some(row) => Ok(Some(row)),
        }
    }

    /// Consumes the records of a section that is not converted and returns
    /// how many were ignored.
    pub fn skip_section(&mut self, section: &'static str) -> Result<usize> {
        let mut c = 0;
        while self.section_row(section)?.is_some() {
            c += 1;
        }
        if c > 0 {
            log::debug!("{} {} data records ignored.", c, section);
        }
        Ok(c)
    }
}
