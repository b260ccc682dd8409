//! On-disk module format: a JSON manifest of exported types.
//!
//! ```json
//! { "namespace": "DB",
//!   "types": [ { "name": "Account", "doc": "account table",
//!                "members": [ { "name": "id", "type": "int64" } ] } ] }
//! ```
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::GenError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// defaults to the module's target name
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDecl {
    pub name: String,
    /// semantic type expression, e.g. `int64`, `string`, `list<Item>`
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub doc: Option<String>,
}

pub fn load_manifest(path: &Path) -> Result<Manifest, GenError> {
    let bytes = std::fs::read(path).map_err(|source| GenError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    from_slice_with_path(&bytes).map_err(|message| GenError::InvalidModule {
        path: path.to_path_buf(),
        message,
    })
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    from_slice_with_path(src.as_bytes())
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}
