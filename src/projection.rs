// src/projection.rs

//! Two-column projection of a mapping document
//!
//! Each class becomes `<intermediary with dots> <simple named>`, each method
//! and field becomes `<intermediary> <named>`. The official column is never
//! read.

use crate::error::Result;
use crate::tiny::{INTERMEDIARY, MappingDocument, NAMED};
use std::io::Cursor;
use std::path::Path;

/// Projected renaming table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
    lines: usize,
}

impl OutputBuffer {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.text.into_bytes()
    }

    /// Number of emitted lines
    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    /// Byte reader over the buffer contents
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.as_bytes())
    }

    /// Write the buffer to a file, replacing any existing content
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.as_bytes())?;
        Ok(())
    }

    fn push_line(&mut self, primary: &str, secondary: &str) {
        if self.lines > 0 {
            self.text.push('\n');
        }
        self.text.push_str(primary);
        self.text.push(' ');
        self.text.push_str(secondary);
        self.lines += 1;
    }
}

/// Project a document into its two-column form
///
/// Classes appear in document order, each followed by its methods and then
/// its fields. A missing column projects as an empty string.
pub fn project(document: &MappingDocument) -> OutputBuffer {
    let mut output = OutputBuffer::default();

    for class in &document.classes {
        let intermediary = column(&class.names, INTERMEDIARY).replace('/', ".");
        output.push_line(&intermediary, simple_name(column(&class.names, NAMED)));

        for member in class.methods.iter().chain(class.fields.iter()) {
            output.push_line(column(&member.names, INTERMEDIARY), column(&member.names, NAMED));
        }
    }

    output
}

fn column(names: &[String], index: usize) -> &str {
    names.get(index).map(String::as_str).unwrap_or_default()
}

/// Portion of a binary class name after its last `/`
fn simple_name(name: &str) -> &str {
    match name.rfind('/') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiny::{ClassRecord, MemberRecord};
    use std::io::Read;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_document() -> MappingDocument {
        let mut entity = ClassRecord::new(names(&[
            "a",
            "net/minecraft/class_1297",
            "net/minecraft/entity/Entity",
        ]));
        entity
            .methods
            .push(MemberRecord::new("()V", names(&["a", "method_5773", "tick"])));
        entity
            .methods
            .push(MemberRecord::new("()Z", names(&["b", "method_5805", "isAlive"])));
        entity
            .fields
            .push(MemberRecord::new("I", names(&["c", "field_6012", "age"])));

        let world = ClassRecord::new(names(&["b", "net/minecraft/class_1937", "World"]));

        MappingDocument {
            namespaces: names(&["official", "intermediary", "named"]),
            properties: Vec::new(),
            classes: vec![entity, world],
        }
    }

    #[test]
    fn test_project_document_order() {
        let output = project(&sample_document());
        assert_eq!(
            output.as_str(),
            "net.minecraft.class_1297 Entity\n\
             method_5773 tick\n\
             method_5805 isAlive\n\
             field_6012 age\n\
             net.minecraft.class_1937 World"
        );
        assert_eq!(output.line_count(), 5);
    }

    #[test]
    fn test_class_projection_normalizes_names() {
        let document = MappingDocument {
            namespaces: names(&["official", "intermediary", "named"]),
            properties: Vec::new(),
            classes: vec![ClassRecord::new(names(&["q", "a/b/C", "x/y/Z"]))],
        };
        assert_eq!(project(&document).as_str(), "a.b.C Z");
    }

    #[test]
    fn test_member_projection_is_verbatim() {
        let mut class = ClassRecord::new(names(&["q", "C", "Z"]));
        class
            .methods
            .push(MemberRecord::new("()V", names(&["official", "m_1", "method_1"])));
        class
            .fields
            .push(MemberRecord::new("I", names(&["o", "a/b", "c/d"])));
        let document = MappingDocument {
            classes: vec![class],
            ..Default::default()
        };

        let output = project(&document);
        let lines: Vec<&str> = output.as_str().lines().collect();
        assert_eq!(lines, vec!["C Z", "m_1 method_1", "a/b c/d"]);
    }

    #[test]
    fn test_official_column_is_ignored() {
        let mut first = sample_document();
        let mut second = sample_document();
        first.classes[0].names[0] = "zzz".to_string();
        second.classes[0].methods[0].names[0] = "yyy".to_string();
        assert_eq!(project(&first), project(&second));
    }

    #[test]
    fn test_empty_document() {
        let output = project(&MappingDocument::default());
        assert!(output.is_empty());
        assert_eq!(output.as_bytes(), b"");
    }

    #[test]
    fn test_no_trailing_newline() {
        let output = project(&sample_document());
        assert!(!output.as_str().ends_with('\n'));
    }

    #[test]
    fn test_project_is_deterministic() {
        let document = sample_document();
        assert_eq!(project(&document).into_bytes(), project(&document).into_bytes());
    }

    #[test]
    fn test_reader_and_write_to() {
        let output = project(&sample_document());

        let mut read_back = String::new();
        output.reader().read_to_string(&mut read_back).unwrap();
        assert_eq!(read_back, output.as_str());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.21.4");
        output.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), output.as_str());
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("net/minecraft/World"), "World");
        assert_eq!(simple_name("World"), "World");
        assert_eq!(simple_name("trailing/"), "");
    }
}
