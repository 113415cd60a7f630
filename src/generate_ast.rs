//! Node-schema driven generator for AST declarations.
//!
//! Each schema line reads `"Variant : Type field, Type field, …"`. From a
//! list of them [`define_ast`] emits the Rust enum, the `Visitor<R>` trait
//! and the `accept` dispatch in the same shape as [`crate::expr`].
//!
//! Type mapping: the base type becomes a boxed child, `Token` becomes
//! `Token<'a>`, anything else is used verbatim.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{LoxError, Result};

/// The expression node family.
pub const EXPR_TYPES: &[&str] = &[
    "Binary   : Expr left, Token operator, Expr right",
    "Grouping : Expr expression",
    "Literal  : Literal value",
    "Unary    : Token operator, Expr right",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSchema {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Parse one `"Variant : Type field, …"` line.
pub fn parse_schema(line: &str) -> Result<NodeSchema> {
    let (name, field_list) = line
        .split_once(':')
        .ok_or_else(|| LoxError::schema(format!("missing ':' in {:?}", line)))?;

    let name: &str = name.trim();

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(LoxError::schema(format!("bad variant name in {:?}", line)));
    }

    let mut fields: Vec<Field> = Vec::new();

    for field in field_list.split(',') {
        let mut parts = field.split_whitespace();

        match (parts.next(), parts.next(), parts.next()) {
            (Some(ty), Some(field_name), None) => fields.push(Field {
                ty: ty.to_string(),
                name: field_name.to_string(),
            }),

            _ => {
                return Err(LoxError::schema(format!(
                    "field {:?} of {} is not `Type name`",
                    field.trim(),
                    name
                )));
            }
        }
    }

    debug!("Parsed schema for {} with {} fields", name, fields.len());

    Ok(NodeSchema {
        name: name.to_string(),
        fields,
    })
}

/// Generate the Rust declarations for `base_name` from its schema lines.
pub fn define_ast(base_name: &str, types: &[&str]) -> Result<String> {
    let nodes: Vec<NodeSchema> = types
        .iter()
        .map(|line| parse_schema(line))
        .collect::<Result<_>>()?;

    info!("Generating {} with {} variants", base_name, nodes.len());

    let mut out: String = String::new();

    write_ast_source(&mut out, base_name, &nodes)
        .map_err(|e| LoxError::schema(format!("formatting failed: {}", e)))?;

    Ok(out)
}

fn write_ast_source(out: &mut String, base: &str, nodes: &[NodeSchema]) -> std::fmt::Result {
    writeln!(out, "// Generated by generate_ast. Do not edit.")?;
    writeln!(out)?;
    writeln!(out, "use serde::Serialize;")?;
    writeln!(out)?;
    writeln!(out, "use crate::token::Token;")?;
    writeln!(out, "use crate::value::Literal;")?;
    writeln!(out)?;

    // enum
    writeln!(out, "#[derive(Debug, Clone, PartialEq, Serialize)]")?;
    writeln!(out, "#[serde(tag = \"kind\")]")?;
    writeln!(out, "pub enum {}<'a> {{", base)?;
    for node in nodes {
        writeln!(out, "    {} {{", node.name)?;
        for field in &node.fields {
            writeln!(out, "        {}: {},", field.name, owned_type(base, &field.ty))?;
        }
        writeln!(out, "    }},")?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    // visitor
    writeln!(out, "pub trait Visitor<R> {{")?;
    for node in nodes {
        let params: Vec<String> = node
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.name, borrowed_type(base, &f.ty)))
            .collect();

        writeln!(
            out,
            "    fn visit_{}(&mut self, {}) -> R;",
            snake_case(&node.name),
            params.join(", ")
        )?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    // dispatch
    writeln!(out, "impl<'a> {}<'a> {{", base)?;
    writeln!(
        out,
        "    pub fn accept<R, V: Visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {{"
    )?;
    writeln!(out, "        match self {{")?;
    for node in nodes {
        let names: Vec<&str> = node.fields.iter().map(|f| f.name.as_str()).collect();
        let names: String = names.join(", ");

        writeln!(
            out,
            "            {}::{} {{ {} }} => visitor.visit_{}({}),",
            base,
            node.name,
            names,
            snake_case(&node.name),
            names
        )?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")
}

fn owned_type(base: &str, ty: &str) -> String {
    match ty {
        t if t == base => format!("Box<{}<'a>>", base),
        "Token" => "Token<'a>".to_string(),
        other => other.to_string(),
    }
}

fn borrowed_type(base: &str, ty: &str) -> String {
    match ty {
        t if t == base => format!("&{}<'_>", base),
        "Token" => "&Token<'_>".to_string(),
        other => format!("&{}", other),
    }
}

/// `MyVariant` → `my_variant`.
fn snake_case(name: &str) -> String {
    let mut s: String = String::with_capacity(name.len() + 4);

    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                s.push('_');
            }
            s.push(c.to_ascii_lowercase());
        } else {
            s.push(c);
        }
    }

    s
}

/// Write the generated expression declarations to `<output_dir>/expr.rs`.
pub fn write_ast(output_dir: &Path) -> Result<PathBuf> {
    let source: String = define_ast("Expr", EXPR_TYPES)?;
    let path: PathBuf = output_dir.join("expr.rs");

    fs::write(&path, source)?;

    info!("Wrote AST declarations to {:?}", path);

    Ok(path)
}
