//! C# emitter: one `public partial class` per type, members as auto properties.
use std::collections::HashSet;

use super::{Emitter, SourceWriter};
use crate::error::GenError;
use crate::ir::{FloatWidth, IntWidth, Ty, TypeDef, TypeMetadata};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
    // contextual keywords that cannot name a type
    "var", "dynamic", "record",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpEmitter;

impl Emitter for CSharpEmitter {
    fn language(&self) -> &'static str {
        "C#"
    }

    fn extension(&self) -> &'static str {
        "cs"
    }

    fn render(&self, metadata: &TypeMetadata) -> Result<String, GenError> {
        if KEYWORDS.contains(&metadata.namespace.as_str()) {
            return Err(GenError::metadata(&metadata.namespace, None, "namespace is a C# keyword"));
        }
        let mut w = SourceWriter::new();
        w.line("using System;");
        if metadata.uses_lists() {
            w.line("using System.Collections.Generic;");
        }
        w.line(format!("namespace {}", metadata.namespace));
        w.open();
        for (i, t) in metadata.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            emit_class(&mut w, t, metadata)?;
        }
        w.close("}");
        Ok(w.into_string())
    }
}

fn emit_class(w: &mut SourceWriter, t: &TypeDef, metadata: &TypeMetadata) -> Result<(), GenError> {
    if KEYWORDS.contains(&t.name.as_str()) {
        return Err(GenError::metadata(&t.name, None, "type name is a C# keyword"));
    }
    if let Some(doc) = &t.doc {
        summary(w, doc);
    }
    w.line(format!("public partial class {}", t.name));
    w.open();

    // C# forbids a member named like its enclosing type
    let mut taken = HashSet::from([t.name.clone()]);
    for m in &t.members {
        let fail = |message: String| GenError::metadata(&t.name, Some(&m.name), message);
        let ty = csharp_type(&m.ty, metadata).map_err(fail)?;
        let property = pascal_case(&m.name);
        if !taken.insert(property.clone()) {
            return Err(fail(format!("property name `{property}` collides in C#")));
        }
        if let Some(doc) = &m.doc {
            summary(w, doc);
        }
        match default_value(&m.ty, &ty) {
            Some(init) => w.line(format!("public {ty} {property} {{ get; set; }} = {init};")),
            None => w.line(format!("public {ty} {property} {{ get; set; }}")),
        }
    }
    w.close("}");
    Ok(())
}

fn summary(w: &mut SourceWriter, doc: &str) {
    w.line("/// <summary>");
    w.doc_lines("/// ", doc);
    w.line("/// </summary>");
}

/// Map a semantic type to its C# spelling.
pub fn csharp_type(ty: &Ty, metadata: &TypeMetadata) -> Result<String, String> {
    Ok(match ty {
        Ty::Bool => "bool".to_string(),
        Ty::Int { width: IntWidth::W8, signed: true } => "sbyte".to_string(),
        Ty::Int { width: IntWidth::W8, signed: false } => "byte".to_string(),
        Ty::Int { width: IntWidth::W16, signed: true } => "short".to_string(),
        Ty::Int { width: IntWidth::W16, signed: false } => "ushort".to_string(),
        Ty::Int { width: IntWidth::W32, signed: true } => "int".to_string(),
        Ty::Int { width: IntWidth::W32, signed: false } => "uint".to_string(),
        Ty::Int { width: IntWidth::W64, signed: true } => "long".to_string(),
        Ty::Int { width: IntWidth::W64, signed: false } => "ulong".to_string(),
        Ty::Float(FloatWidth::F32) => "float".to_string(),
        Ty::Float(FloatWidth::F64) => "double".to_string(),
        Ty::String => "string".to_string(),
        Ty::Bytes => "byte[]".to_string(),
        Ty::List(item) => format!("List<{}>", csharp_type(item, metadata)?),
        Ty::Named(name) if metadata.declares(name) => name.clone(),
        Ty::Named(name) => return Err(format!("no C# mapping for `{name}`")),
    })
}

fn default_value(ty: &Ty, spelled: &str) -> Option<String> {
    match ty {
        Ty::String => Some("string.Empty".to_string()),
        Ty::Bytes => Some("Array.Empty<byte>()".to_string()),
        Ty::List(_) => Some(format!("new {spelled}()")),
        _ => None,
    }
}

/// `user_name` → `UserName`, `id` → `Id`.
pub fn pascal_case(name: &str) -> String {
    let out: String = name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    if out.is_empty() { name.to_string() } else { out }
}
