// src/tiny/mod.rs

//! Tiny v2 mapping files
//!
//! Tiny v2 is the tab-separated format shipped inside Yarn `mergedv2` jars.
//! A document starts with a header naming its namespaces, followed by class
//! sections with nested method and field entries:
//!
//! ```text
//! tiny	2	0	official	intermediary	named
//! c	a	net/minecraft/class_1	net/minecraft/entity/Entity
//! 	m	()V	a	method_1	tick
//! 	f	I	b	field_1	age
//! ```
//!
//! Every class and member carries one name per namespace. Parameters, locals
//! and comments are recognised but not kept in the model.

mod parser;

pub use parser::parse;

use crate::error::{Error, Result};
use std::fmt;

/// Column of the obfuscated (official) names
pub const OFFICIAL: usize = 0;
/// Column of the intermediary names
pub const INTERMEDIARY: usize = 1;
/// Column of the human-readable names
pub const NAMED: usize = 2;

/// Minimum number of namespaces a document must declare
pub const MIN_NAMESPACES: usize = 3;

/// A parsed mapping file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingDocument {
    /// Namespace labels from the header, in column order
    pub namespaces: Vec<String>,
    /// Header properties (`sorted`, `escaped-names`, ...)
    pub properties: Vec<Property>,
    /// Classes in file order
    pub classes: Vec<ClassRecord>,
}

/// A header property line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: Option<String>,
}

/// A class section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassRecord {
    /// One name per namespace
    pub names: Vec<String>,
    pub methods: Vec<MemberRecord>,
    pub fields: Vec<MemberRecord>,
}

/// A method or field entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberRecord {
    /// JVM descriptor in the first namespace
    pub descriptor: String,
    /// One name per namespace
    pub names: Vec<String>,
}

/// A malformed line found while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line
    pub line: usize,
    pub message: String,
}

impl MappingDocument {
    /// Number of name columns every record carries
    pub fn arity(&self) -> usize {
        self.namespaces.len()
    }

    /// Check whether a header property is set
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.iter().any(|p| p.key == key)
    }

    /// Total number of methods and fields across all classes
    pub fn member_count(&self) -> usize {
        self.classes
            .iter()
            .map(|c| c.methods.len() + c.fields.len())
            .sum()
    }
}

impl ClassRecord {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }
}

impl MemberRecord {
    pub fn new(descriptor: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            descriptor: descriptor.into(),
            names,
        }
    }
}

impl Diagnostic {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

/// Parse a mapping file, failing if any line is malformed
///
/// A document with diagnostics is discarded as a whole; the error message
/// lists every diagnostic on its own line.
pub fn parse_document(bytes: &[u8]) -> Result<MappingDocument> {
    let (document, diagnostics) = parse(bytes);
    if diagnostics.is_empty() {
        Ok(document)
    } else {
        Err(diagnostics_error(&diagnostics))
    }
}

/// Fold diagnostics into a single parse error
pub fn diagnostics_error(diagnostics: &[Diagnostic]) -> Error {
    let message = diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    Error::Parse(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_ok() {
        let input = b"tiny\t2\t0\tofficial\tintermediary\tnamed\nc\ta\tclass_1\tFoo\n";
        let doc = parse_document(input).unwrap();
        assert_eq!(doc.arity(), 3);
        assert_eq!(doc.classes.len(), 1);
        assert_eq!(doc.member_count(), 0);
    }

    #[test]
    fn test_diagnostics_error_lists_every_line() {
        let err = diagnostics_error(&[
            Diagnostic::new(3, "expected 3 class names, found 2"),
            Diagnostic::new(9, "unknown section 'x'"),
        ]);
        let message = err.to_string();
        assert!(message.contains("Line 3: expected 3 class names, found 2"));
        assert!(message.contains("Line 9: unknown section 'x'"));
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parse_document_rejects_partial() {
        let input = b"tiny\t2\t0\tofficial\tintermediary\tnamed\nc\ta\tclass_1\tFoo\nc\tb\n";
        let err = parse_document(input).unwrap_err();
        assert!(err.to_string().contains("Line 3"));
    }
}
