//! C++ header emitter for the `xx` object model.
//!
//! Every type becomes a `struct T : xx::MPObject` with value-initialized
//! scalars, `T_p`/`T_v` aliases, deleted copy operations and JSON-ish
//! `ToString`/`ToStringCore` bodies. A trailing `namespace xx` block marks
//! each `T_v` as memmove-safe.
use super::{Emitter, SourceWriter};
use crate::error::GenError;
use crate::ir::{FloatWidth, Member, Ty, TypeDef, TypeMetadata};

const BASE_TYPE: &str = "xx::MPObject";

const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
    // fixed-width typedefs the members are declared with
    "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
    // namespace of the object model
    "xx",
];

/// Names every generated struct already declares or inherits.
const GENERATED_MEMBERS: &[&str] = &["ThisType", "BaseType", "ToString", "ToStringCore", "tsFlags"];

fn is_reserved(name: &str) -> bool {
    KEYWORDS.contains(&name) || GENERATED_MEMBERS.contains(&name)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CppEmitter;

impl Emitter for CppEmitter {
    fn language(&self) -> &'static str {
        "C++"
    }

    fn extension(&self) -> &'static str {
        "h"
    }

    fn render(&self, metadata: &TypeMetadata) -> Result<String, GenError> {
        let mut cg = Codegen::new(metadata);
        cg.emit()?;
        Ok(cg.into_string())
    }
}

struct Codegen<'a> {
    metadata: &'a TypeMetadata,
    w: SourceWriter,
}

impl<'a> Codegen<'a> {
    fn new(metadata: &'a TypeMetadata) -> Self {
        Self {
            metadata,
            w: SourceWriter::new(),
        }
    }

    fn into_string(self) -> String {
        self.w.into_string()
    }

    fn emit(&mut self) -> Result<(), GenError> {
        let metadata = self.metadata;
        let ns = &metadata.namespace;
        if is_reserved(ns) {
            return Err(GenError::metadata(ns, None, "namespace is a reserved name in C++"));
        }
        self.w.line("#pragma once");
        self.w.line("#include <xx_bbuffer.h>");
        self.w.blank();
        self.w.line(format!("namespace {ns}"));
        self.w.open();

        for t in metadata.iter() {
            if is_reserved(&t.name) {
                return Err(GenError::metadata(&t.name, None, "type name is a reserved name in C++"));
            }
        }

        // forward declarations so members may point at any type in the module
        for t in metadata.iter() {
            self.w.line(format!("struct {};", t.name));
            self.w.line(format!("using {0}_p = xx::Ptr<{0}>;", t.name));
        }

        for t in metadata.iter() {
            self.w.blank();
            self.emit_struct(t)?;
        }
        for t in metadata.iter() {
            self.w.blank();
            self.emit_bodies(t);
        }
        self.w.close("}");

        self.w.line("namespace xx");
        self.w.open();
        for t in metadata.iter() {
            self.w.line("template<>");
            self.w.line(format!("struct MemmoveSupport<{ns}::{}_v>", t.name));
            self.w.open();
            self.w.line("static const bool value = true;");
            self.w.close("};");
        }
        self.w.close("}");
        Ok(())
    }

    fn emit_struct(&mut self, t: &TypeDef) -> Result<(), GenError> {
        let name = &t.name;
        if let Some(doc) = &t.doc {
            self.w.doc_lines("// ", doc);
        }
        self.w.line(format!("struct {name} : {BASE_TYPE}"));
        self.w.open();
        for m in &t.members {
            let decl = self.member_decl(t, m)?;
            if let Some(doc) = &m.doc {
                self.w.doc_lines("// ", doc);
            }
            self.w.line(decl);
        }
        if !t.members.is_empty() {
            self.w.blank();
        }
        self.w.line(format!("typedef {name} ThisType;"));
        self.w.line(format!("typedef {BASE_TYPE} BaseType;"));
        self.w.line(format!("{name}();"));
        self.w.line(format!("{name}({name} const&) = delete;"));
        self.w.line(format!("{name}& operator=({name} const&) = delete;"));
        self.w.line("virtual void ToString(xx::String &str) const override;");
        self.w.line("virtual void ToStringCore(xx::String &str) const override;");
        self.w.close("};");
        self.w.line(format!("using {name}_v = xx::Dock<{name}>;"));
        Ok(())
    }

    fn member_decl(&self, t: &TypeDef, m: &Member) -> Result<String, GenError> {
        if is_reserved(&m.name) || m.name == t.name {
            return Err(GenError::metadata(&t.name, Some(&m.name), "member name is reserved in C++"));
        }
        let ty = cpp_type(&m.ty, self.metadata)
            .map_err(|message| GenError::metadata(&t.name, Some(&m.name), message))?;
        Ok(match default_value(&m.ty) {
            Some(init) => format!("{ty} {} = {init};", m.name),
            None => format!("{ty} {};", m.name),
        })
    }

    fn emit_bodies(&mut self, t: &TypeDef) {
        let name = &t.name;
        self.w.line(format!("inline {name}::{name}()"));
        self.w.open();
        self.w.close("}");
        self.w.blank();

        self.w.line(format!("inline void {name}::ToString(xx::String &str) const"));
        self.w.open();
        self.w.line("if (tsFlags())");
        self.w.open();
        self.w.line(r#"str.Append("[ \"***** recursived *****\" ]");"#);
        self.w.line("return;");
        self.w.close("}");
        self.w.line("else tsFlags() = 1;");
        self.w.blank();
        self.w.line(format!(r#"str.Append("{{ \"type\" : \"{name}\"");"#));
        self.w.line("ToStringCore(str);");
        self.w.line(r#"str.Append(" }");"#);
        self.w.blank();
        self.w.line("tsFlags() = 0;");
        self.w.close("}");

        self.w.line(format!("inline void {name}::ToStringCore(xx::String &str) const"));
        self.w.open();
        self.w.line("this->BaseType::ToStringCore(str);");
        for m in &t.members {
            self.w.line(format!(r#"str.Append(", \"{0}\" : ", this->{0});"#, m.name));
        }
        self.w.close("}");
    }
}

/// Map a semantic type to its C++ spelling.
pub fn cpp_type(ty: &Ty, metadata: &TypeMetadata) -> Result<String, String> {
    Ok(match ty {
        Ty::Bool => "bool".to_string(),
        Ty::Int { width, signed: true } => format!("int{}_t", width.bits()),
        Ty::Int { width, signed: false } => format!("uint{}_t", width.bits()),
        Ty::Float(FloatWidth::F32) => "float".to_string(),
        Ty::Float(FloatWidth::F64) => "double".to_string(),
        Ty::String => "xx::String_p".to_string(),
        Ty::Bytes => "xx::BBuffer_p".to_string(),
        Ty::List(item) => format!("xx::List_p<{}>", cpp_type(item, metadata)?),
        Ty::Named(name) if metadata.declares(name) => format!("{name}_p"),
        Ty::Named(name) => return Err(format!("no C++ mapping for `{name}`")),
    })
}

fn default_value(ty: &Ty) -> Option<&'static str> {
    match ty {
        Ty::Bool => Some("false"),
        Ty::Int { .. } | Ty::Float(_) => Some("0"),
        _ => None,
    }
}
