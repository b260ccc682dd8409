// Strongly-typed IR for codegen. No manifest strings left to parse here.
use indexmap::IndexMap;

/// Semantic member type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Bool,
    Int { width: IntWidth, signed: bool },
    Float(FloatWidth),
    String,
    Bytes,
    List(Box<Ty>),
    /// reference to another type; emitters decide whether it resolves
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub fn bits(self) -> u8 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    F32,
    F64,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub ty: Ty,
    pub doc: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: String,
    pub doc: Option<String>,
    pub members: Vec<Member>, // declaration order
}

/// Exported types of one module, in declaration order.
#[derive(Debug, Clone)]
pub struct TypeMetadata {
    pub namespace: String,
    pub types: IndexMap<String, TypeDef>,
}

impl TypeMetadata {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn declares(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn uses_lists(&self) -> bool {
        self.iter()
            .flat_map(|t| &t.members)
            .any(|m| matches!(m.ty, Ty::List(_)))
    }
}
