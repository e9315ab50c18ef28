//! Prefixed ULID identifiers, e.g. `tst_01hqxyz...` for a toast.
//!
//! ULIDs sort by creation time, so ids generated later compare greater.

use ulid::Ulid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    Toast,
}

impl IdPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::Toast => "tst",
        }
    }
}

pub struct Identifier;

impl Identifier {
    /// New identifier with `prefix`.
    pub fn generate(prefix: IdPrefix) -> String {
        format!("{}_{}", prefix.as_str(), Ulid::new().to_string().to_lowercase())
    }

    pub fn toast() -> String {
        Self::generate(IdPrefix::Toast)
    }

    /// ULID part of a generated id, if `id` carries `prefix`.
    pub fn ulid(id: &str, prefix: IdPrefix) -> Option<Ulid> {
        let rest = id.strip_prefix(prefix.as_str())?.strip_prefix('_')?;
        Ulid::from_string(rest).ok()
    }
}
