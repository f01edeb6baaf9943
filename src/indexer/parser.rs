//! Python function-definition extraction via tree-sitter.
//!
//! Extracts every `function_definition` node, nested ones included, keyed by
//! its bare name. Decorators sit outside the `function_definition` node, so
//! recorded spans start at the `def` line.

use anyhow::{anyhow, Context, Result};
use tree_sitter::{Node, Parser, TreeCursor};

/// A function definition found in one parsed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    /// 1-based line of the `def` keyword.
    pub start_line: usize,
    /// 1-based inclusive last line of the definition body.
    pub end_line: usize,
}

/// Wraps a tree-sitter parser configured for Python.
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .context("failed to load Python grammar")?;
        Ok(Self { parser })
    }

    /// Parse `source` and return every function definition in source order.
    ///
    /// A file with syntax errors is rejected wholesale so the index never
    /// carries spans from a tree the parser had to guess at.
    pub fn parse_functions(&mut self, source: &str) -> Result<Vec<FunctionDef>> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| anyhow!("parser returned no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(root).unwrap_or(1);
            return Err(anyhow!("syntax error at line {line}"));
        }

        let mut defs = Vec::new();
        let mut cursor = root.walk();
        collect_functions(&mut cursor, source.as_bytes(), &mut defs);

        // Tree-sitter visits parents before children, which already gives
        // source order for top-level defs; nested defs follow their parent.
        Ok(defs)
    }
}

fn collect_functions(cursor: &mut TreeCursor, source: &[u8], defs: &mut Vec<FunctionDef>) {
    let node = cursor.node();

    if node.kind() == "function_definition" {
        if let Some(name) = node_name(&node, source) {
            defs.push(FunctionDef {
                name,
                start_line: node.start_position().row + 1,
                end_line: node.end_position().row + 1,
            });
        }
    }

    if cursor.goto_first_child() {
        loop {
            collect_functions(cursor, source, defs);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

fn node_name(node: &Node, source: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .and_then(|n| n.utf8_text(source).ok())
        .map(|s| s.to_string())
}

/// Line of the first ERROR or MISSING node, for the diagnostic message.
fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(line) = first_error_line(child) {
                return Some(line);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<FunctionDef> {
        PythonParser::new().unwrap().parse_functions(source).unwrap()
    }

    #[test]
    fn test_simple_function_span() {
        let source = "x = 1\n\ndef helper():\n    return 1\n";
        let defs = parse(source);

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "helper");
        assert_eq!(defs[0].start_line, 3);
        assert_eq!(defs[0].end_line, 4);
    }

    #[test]
    fn test_decorators_excluded_from_span() {
        let source = "@cached\ndef helper():\n    return 1\n";
        let defs = parse(source);

        assert_eq!(defs.len(), 1);
        // Span starts at the `def` line, not the decorator.
        assert_eq!(defs[0].start_line, 2);
        assert_eq!(defs[0].end_line, 3);
    }

    #[test]
    fn test_nested_functions_indexed_by_bare_name() {
        let source = r#"
def outer():
    def inner():
        return 2
    return inner
"#;
        let defs = parse(source);
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();

        assert_eq!(names, vec!["outer", "inner"]);
    }

    #[test]
    fn test_methods_use_bare_name() {
        let source = r#"
class User:
    def greet(self):
        return "hi"
"#;
        let defs = parse(source);

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "greet");
    }

    #[test]
    fn test_async_function() {
        let source = "async def fetch():\n    await task()\n";
        let defs = parse(source);

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "fetch");
        assert_eq!(defs[0].start_line, 1);
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let source = "def broken(:\n    pass\n";
        let err = PythonParser::new()
            .unwrap()
            .parse_functions(source)
            .unwrap_err();

        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn test_multiple_definitions_in_source_order() {
        let source = "def a():\n    pass\n\ndef b():\n    pass\n";
        let defs = parse(source);

        assert_eq!(defs[0].name, "a");
        assert_eq!(defs[1].name, "b");
        assert!(defs[0].start_line < defs[1].start_line);
    }
}
