use indexmap::IndexMap;
use indexmap::map::Entry;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::GenError;
use crate::ir::{FloatWidth, IntWidth, Member, Ty, TypeDef, TypeMetadata};
use crate::manifest::{Manifest, MemberDecl, TypeDecl};

static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

pub fn is_identifier(s: &str) -> bool {
    IDENT.is_match(s)
}

/// Lower a parsed manifest to typed metadata.
///
/// `fallback_namespace` is used when the manifest does not name one (the
/// module's target name). Identifiers are checked and duplicates rejected
/// here; whether a `Named` type resolves is left to each emitter.
pub fn lower_manifest(manifest: Manifest, fallback_namespace: &str) -> Result<TypeMetadata, GenError> {
    let namespace = manifest
        .namespace
        .unwrap_or_else(|| fallback_namespace.to_string());
    if !is_identifier(&namespace) {
        return Err(GenError::metadata(
            &namespace,
            None,
            "namespace is not a valid identifier",
        ));
    }

    let mut types = IndexMap::with_capacity(manifest.types.len());
    for decl in manifest.types {
        let def = lower_type(decl)?;
        match types.entry(def.name.clone()) {
            Entry::Occupied(_) => {
                return Err(GenError::metadata(&def.name, None, "duplicate type name"));
            }
            Entry::Vacant(slot) => {
                slot.insert(def);
            }
        }
    }

    Ok(TypeMetadata { namespace, types })
}

fn lower_type(decl: TypeDecl) -> Result<TypeDef, GenError> {
    if !is_identifier(&decl.name) {
        return Err(GenError::metadata(&decl.name, None, "type name is not a valid identifier"));
    }
    // a type named like a primitive could never be referenced from a member
    if parse_semantic_type(&decl.name).is_some_and(|ty| !matches!(ty, Ty::Named(_))) {
        return Err(GenError::metadata(&decl.name, None, "type name shadows a primitive type"));
    }
    let mut members: Vec<Member> = Vec::with_capacity(decl.members.len());
    for m in decl.members {
        let member = lower_member(&decl.name, m)?;
        if members.iter().any(|seen| seen.name == member.name) {
            return Err(GenError::metadata(&decl.name, Some(&member.name), "duplicate member name"));
        }
        members.push(member);
    }
    Ok(TypeDef {
        name: decl.name,
        doc: decl.doc,
        members,
    })
}

fn lower_member(type_name: &str, decl: MemberDecl) -> Result<Member, GenError> {
    if !is_identifier(&decl.name) {
        return Err(GenError::metadata(
            type_name,
            Some(&decl.name),
            "member name is not a valid identifier",
        ));
    }
    let ty = parse_semantic_type(&decl.ty).ok_or_else(|| {
        GenError::metadata(
            type_name,
            Some(&decl.name),
            format!("malformed type expression `{}`", decl.ty),
        )
    })?;
    Ok(Member {
        name: decl.name,
        ty,
        doc: decl.doc,
    })
}

/// Parse a semantic type expression: a primitive, `list<T>`, or a type name.
pub fn parse_semantic_type(src: &str) -> Option<Ty> {
    let src = src.trim();
    if let Some(inner) = src.strip_prefix("list<").and_then(|s| s.strip_suffix('>')) {
        return parse_semantic_type(inner).map(|item| Ty::List(Box::new(item)));
    }
    let ty = match src {
        "bool" => Ty::Bool,
        "int8" => Ty::Int { width: IntWidth::W8, signed: true },
        "int16" => Ty::Int { width: IntWidth::W16, signed: true },
        "int32" => Ty::Int { width: IntWidth::W32, signed: true },
        "int64" => Ty::Int { width: IntWidth::W64, signed: true },
        "uint8" => Ty::Int { width: IntWidth::W8, signed: false },
        "uint16" => Ty::Int { width: IntWidth::W16, signed: false },
        "uint32" => Ty::Int { width: IntWidth::W32, signed: false },
        "uint64" => Ty::Int { width: IntWidth::W64, signed: false },
        "float32" => Ty::Float(FloatWidth::F32),
        "float64" => Ty::Float(FloatWidth::F64),
        "string" => Ty::String,
        "bytes" => Ty::Bytes,
        name if is_identifier(name) => Ty::Named(name.to_string()),
        _ => return None,
    };
    Some(ty)
}
