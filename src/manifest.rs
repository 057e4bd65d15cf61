//! Buildroot manifest parsing.
//!
//! A Buildroot build drops a `manifest.csv` next to its image artifacts: one
//! header line followed by one row per installed package, RFC-4180 quoting.
//! [`ManifestReader`] streams those rows lazily; restarting means reopening.
//!
//! The reader is deliberately fail-fast: the first row that cannot resolve
//! every required column aborts the whole run with the expected header and
//! the offending row in the error message. Buildroot writes the manifest
//! itself, so a malformed row means the wrong file was passed in, not a
//! recoverable data glitch.

use crate::error::{ManifestErrorKind, Result, SbomError};
use crate::model::{generic_purl, parse_declared, Component};
use std::fs;
use std::path::{Path, PathBuf};

/// Required manifest columns, in header order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "PACKAGE",
    "VERSION",
    "LICENSE",
    "LICENSE FILES",
    "SOURCE ARCHIVE",
    "SOURCE SITE",
    "DEPENDENCIES WITH LICENSES",
];

/// The expected header line, as shown in error messages.
pub const EXPECTED_HEADER: &str =
    "PACKAGE,VERSION,LICENSE,LICENSE FILES,SOURCE ARCHIVE,SOURCE SITE,DEPENDENCIES WITH LICENSES";

/// One manifest row with all seven columns resolved.
///
/// LICENSE FILES and DEPENDENCIES WITH LICENSES are carried for completeness
/// but do not feed the generated components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub package: String,
    pub version: String,
    pub license: String,
    pub license_files: String,
    pub source_archive: String,
    pub source_site: String,
    pub dependencies_with_licenses: String,
}

impl ManifestRow {
    /// Build the canonical component for this row.
    ///
    /// The package locator is the Buildroot-conventional generic purl with a
    /// `download_url` qualifier pointing at `<source site>/<source archive>`.
    /// An unparseable LICENSE field yields a component with no license, never
    /// an error.
    #[must_use]
    pub fn to_component(&self, cpe: Option<String>) -> Component {
        let download_url = format!("{}/{}", self.source_site, self.source_archive);
        Component {
            name: self.package.clone(),
            version: self.version.clone(),
            license: parse_declared(&self.license),
            purl: generic_purl(&self.package, &self.version, &download_url),
            cpe,
        }
    }
}

/// One raw record: parsed fields plus the original text for error messages.
struct RawRecord {
    fields: Vec<String>,
    raw: String,
}

/// Lazy row reader over a Buildroot manifest file.
///
/// Iterates `Result<ManifestRow>`; the first error fuses the iterator.
pub struct ManifestReader {
    path: PathBuf,
    text: String,
    pos: usize,
    line: usize,
    /// Position of each required column in the header, in REQUIRED_COLUMNS order.
    columns: [Option<usize>; 7],
    has_header: bool,
    done: bool,
}

impl ManifestReader {
    /// Open a manifest file and consume its header line.
    ///
    /// An empty file is not an error; it simply yields no rows.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut text = fs::read_to_string(&path)
            .map_err(|e| SbomError::manifest(&path, ManifestErrorKind::Io(e)))?;
        if let Some(stripped) = text.strip_prefix('\u{feff}') {
            text = stripped.to_string();
        }

        let mut reader = Self {
            path,
            text,
            pos: 0,
            line: 1,
            columns: [None; 7],
            has_header: false,
            done: false,
        };

        let header = reader
            .next_record()
            .map_err(|kind| SbomError::manifest(&reader.path, kind))?;
        if let Some(header) = header {
            for (slot, column) in reader.columns.iter_mut().zip(REQUIRED_COLUMNS) {
                *slot = header.fields.iter().position(|name| name == column);
            }
            reader.has_header = true;
        }

        Ok(reader)
    }

    /// Parse the next raw record, skipping blank lines.
    ///
    /// Quoting follows RFC 4180: fields wrapped in double quotes may contain
    /// separators and newlines, `""` is a literal quote. A lone `"` inside an
    /// unquoted field is kept as-is rather than rejected.
    fn next_record(&mut self) -> std::result::Result<Option<RawRecord>, ManifestErrorKind> {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let mut fields: Vec<String> = Vec::new();
            let mut field = String::new();
            let mut in_quotes = false;
            let mut quote_line = self.line;
            let mut chars = rest.char_indices().peekable();
            let consumed;
            let raw_end;

            loop {
                let Some((idx, c)) = chars.next() else {
                    if in_quotes {
                        return Err(ManifestErrorKind::UnterminatedQuote { line: quote_line });
                    }
                    consumed = rest.len();
                    raw_end = rest.len();
                    break;
                };

                if in_quotes {
                    match c {
                        '"' => {
                            if matches!(chars.peek(), Some((_, '"'))) {
                                chars.next();
                                field.push('"');
                            } else {
                                in_quotes = false;
                            }
                        }
                        '\n' => {
                            self.line += 1;
                            field.push('\n');
                        }
                        _ => field.push(c),
                    }
                } else {
                    match c {
                        '"' if field.is_empty() => {
                            in_quotes = true;
                            quote_line = self.line;
                        }
                        ',' => fields.push(std::mem::take(&mut field)),
                        '\r' if matches!(chars.peek(), Some((_, '\n'))) => {
                            chars.next();
                            self.line += 1;
                            raw_end = idx;
                            consumed = idx + 2;
                            break;
                        }
                        '\n' => {
                            self.line += 1;
                            raw_end = idx;
                            consumed = idx + 1;
                            break;
                        }
                        _ => field.push(c),
                    }
                }
            }

            fields.push(field);
            let raw = rest[..raw_end].to_string();
            self.pos += consumed;

            // A physically empty line is not a record.
            if fields.len() == 1 && fields[0].is_empty() {
                continue;
            }
            return Ok(Some(RawRecord { fields, raw }));
        }
        Ok(None)
    }

    /// Resolve a record against the header, requiring every column.
    fn row_from_record(
        &self,
        record: &RawRecord,
    ) -> std::result::Result<ManifestRow, ManifestErrorKind> {
        let mut values: [&str; 7] = [""; 7];
        for (value, slot) in values.iter_mut().zip(self.columns) {
            match slot.and_then(|i| record.fields.get(i)) {
                Some(resolved) => *value = resolved,
                None => {
                    return Err(ManifestErrorKind::MissingColumn {
                        expected: EXPECTED_HEADER.to_string(),
                        row: record.raw.clone(),
                    });
                }
            }
        }

        let [package, version, license, license_files, source_archive, source_site, dependencies_with_licenses] =
            values;
        Ok(ManifestRow {
            package: package.to_string(),
            version: version.to_string(),
            license: license.to_string(),
            license_files: license_files.to_string(),
            source_archive: source_archive.to_string(),
            source_site: source_site.to_string(),
            dependencies_with_licenses: dependencies_with_licenses.to_string(),
        })
    }
}

impl Iterator for ManifestReader {
    type Item = Result<ManifestRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.has_header {
            return None;
        }

        let record = match self.next_record() {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(kind) => {
                self.done = true;
                return Some(Err(SbomError::manifest(&self.path, kind)));
            }
        };

        match self.row_from_record(&record) {
            Ok(row) => Some(Ok(row)),
            Err(kind) => {
                self.done = true;
                Some(Err(SbomError::manifest(&self.path, kind)))
            }
        }
    }
}
