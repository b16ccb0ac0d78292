// src/tiny/parser.rs

//! Line parser for Tiny v2 files.
//!
//! The parser never stops at the first problem: each malformed line is
//! recorded as a [`Diagnostic`] and parsing resumes on the next line. Lines
//! nested under a rejected class or member are skipped silently so one bad
//! record produces one diagnostic.

use super::{
    ClassRecord, Diagnostic, MIN_NAMESPACES, MappingDocument, MemberRecord, OFFICIAL, Property,
};

/// Header property enabling backslash escapes in names
const ESCAPED_NAMES: &str = "escaped-names";

/// Class section that indented lines attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassScope {
    None,
    Open(usize),
    Skipped,
}

struct Parser {
    document: MappingDocument,
    diagnostics: Vec<Diagnostic>,
    arity: Option<usize>,
    escaped: bool,
    in_header: bool,
    class: ClassScope,
    nested_allowed: bool,
}

/// Parse Tiny v2 bytes into a document and its diagnostics
///
/// The document is returned even when diagnostics were produced; callers
/// must treat it as invalid in that case.
pub fn parse(bytes: &[u8]) -> (MappingDocument, Vec<Diagnostic>) {
    let mut parser = Parser::new();

    let content = trim_trailing_newlines(bytes);
    if content.is_empty() {
        parser.error(1, "missing tiny header");
        return parser.finish();
    }

    for (index, raw) in content.split(|&b| b == b'\n').enumerate() {
        let line_no = index + 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) => parser.line(line_no, line),
            Err(_) => parser.error(line_no, "line is not valid UTF-8"),
        }
    }

    parser.finish()
}

fn trim_trailing_newlines(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && matches!(bytes[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    &bytes[..end]
}

impl Parser {
    fn new() -> Self {
        Self {
            document: MappingDocument::default(),
            diagnostics: Vec::new(),
            arity: None,
            escaped: false,
            in_header: true,
            class: ClassScope::None,
            nested_allowed: false,
        }
    }

    fn finish(self) -> (MappingDocument, Vec<Diagnostic>) {
        (self.document, self.diagnostics)
    }

    fn error(&mut self, line: usize, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(line, message));
    }

    fn line(&mut self, line_no: usize, line: &str) {
        if line_no == 1 {
            self.header(line_no, line);
            return;
        }

        if line.is_empty() {
            self.error(line_no, "unexpected empty line");
            return;
        }

        let depth = line.bytes().take_while(|&b| b == b'\t').count();
        let fields: Vec<&str> = line[depth..].split('\t').collect();

        match depth {
            0 => {
                self.in_header = false;
                self.class_line(line_no, &fields);
            }
            1 if self.in_header => self.property(line_no, &fields),
            1 => self.member_line(line_no, &fields),
            _ => self.nested_line(line_no),
        }
    }

    fn header(&mut self, line_no: usize, line: &str) {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() < 3 || fields[0] != "tiny" {
            self.error(line_no, "missing tiny header");
            return;
        }
        if fields[1] != "2" {
            self.error(
                line_no,
                format!("unsupported tiny major version '{}'", fields[1]),
            );
            return;
        }
        if fields[2].parse::<u32>().is_err() {
            self.error(line_no, format!("invalid minor version '{}'", fields[2]));
            return;
        }

        let namespaces = &fields[3..];
        if namespaces.len() < MIN_NAMESPACES {
            self.error(
                line_no,
                format!(
                    "expected at least {} namespaces, found {}",
                    MIN_NAMESPACES,
                    namespaces.len()
                ),
            );
            return;
        }
        if namespaces.iter().any(|ns| ns.is_empty()) {
            self.error(line_no, "empty namespace name in header");
            return;
        }

        self.document.namespaces = namespaces.iter().map(|ns| ns.to_string()).collect();
        self.arity = Some(namespaces.len());
    }

    fn property(&mut self, line_no: usize, fields: &[&str]) {
        let key = fields[0];
        if key.is_empty() || fields.len() > 2 {
            self.error(line_no, "malformed header property");
            return;
        }
        if key == ESCAPED_NAMES {
            self.escaped = true;
        }
        self.document.properties.push(Property {
            key: key.to_string(),
            value: fields.get(1).map(|v| v.to_string()),
        });
    }

    fn class_line(&mut self, line_no: usize, fields: &[&str]) {
        self.nested_allowed = false;

        if fields[0] != "c" {
            self.error(line_no, format!("unknown section '{}'", fields[0]));
            self.class = ClassScope::Skipped;
            return;
        }

        self.class = match self.names(line_no, "class", &fields[1..]) {
            Some(names) => {
                self.document.classes.push(ClassRecord::new(names));
                ClassScope::Open(self.document.classes.len() - 1)
            }
            None => ClassScope::Skipped,
        };
    }

    fn member_line(&mut self, line_no: usize, fields: &[&str]) {
        let index = match self.class {
            ClassScope::Open(index) => index,
            ClassScope::Skipped => {
                self.nested_allowed = true;
                return;
            }
            ClassScope::None => {
                self.error(line_no, "member declared outside of a class");
                self.nested_allowed = true;
                return;
            }
        };

        let kind = match fields[0] {
            "m" => "method",
            "f" => "field",
            "c" => {
                // Class comment; nothing may nest under it
                self.nested_allowed = false;
                return;
            }
            other => {
                self.error(line_no, format!("unknown member type '{}'", other));
                self.nested_allowed = true;
                return;
            }
        };

        // Children of this member are accepted whether or not it parses
        self.nested_allowed = true;

        let descriptor = match fields.get(1) {
            Some(desc) if !desc.is_empty() => *desc,
            _ => {
                self.error(line_no, format!("{} is missing its descriptor", kind));
                return;
            }
        };

        let Some(names) = self.names(line_no, kind, &fields[2..]) else {
            return;
        };

        let member = MemberRecord::new(descriptor, names);
        let class = &mut self.document.classes[index];
        if kind == "method" {
            class.methods.push(member);
        } else {
            class.fields.push(member);
        }
    }

    fn nested_line(&mut self, line_no: usize) {
        match self.class {
            ClassScope::Skipped => {}
            ClassScope::None => self.error(line_no, "nested line outside of a class"),
            ClassScope::Open(_) if !self.nested_allowed => {
                self.error(line_no, "nested line without an enclosing member")
            }
            ClassScope::Open(_) => {}
        }
    }

    /// Validate and decode one record's name columns
    fn names(&mut self, line_no: usize, kind: &str, raw: &[&str]) -> Option<Vec<String>> {
        let expected = match self.arity {
            Some(arity) => arity,
            None => {
                // Header was rejected; the first record fixes the arity
                if raw.len() < MIN_NAMESPACES {
                    self.error(
                        line_no,
                        format!(
                            "expected at least {} {} names, found {}",
                            MIN_NAMESPACES,
                            kind,
                            raw.len()
                        ),
                    );
                    return None;
                }
                self.arity = Some(raw.len());
                raw.len()
            }
        };

        if raw.len() != expected {
            self.error(
                line_no,
                format!("expected {} {} names, found {}", expected, kind, raw.len()),
            );
            return None;
        }
        if raw[OFFICIAL].is_empty() {
            self.error(line_no, format!("{} has an empty source name", kind));
            return None;
        }

        let mut names = Vec::with_capacity(raw.len());
        for name in raw {
            if !self.escaped {
                names.push(name.to_string());
                continue;
            }
            match unescape(name) {
                Ok(decoded) => names.push(decoded),
                Err(message) => {
                    self.error(line_no, message);
                    return None;
                }
            }
        }
        Some(names)
    }
}

/// Decode `escaped-names` sequences
fn unescape(name: &str) -> Result<String, String> {
    if !name.contains('\\') {
        return Ok(name.to_string());
    }

    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some(other) => return Err(format!("unknown escape sequence '\\{}'", other)),
            None => return Err("dangling escape at end of name".to_string()),
        }
    }
    Ok(out)
}
