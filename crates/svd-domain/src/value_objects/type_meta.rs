//! Runtime type identity

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a Rust type together with its diagnostic name
///
/// Equality and hashing only consider the [`TypeId`]; the name is carried
/// along for error messages and logs.
#[derive(Clone, Copy)]
pub struct TypeMeta {
    id: TypeId,
    name: &'static str,
}

impl TypeMeta {
    /// Metadata for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The unique type identifier
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name as reported by the compiler
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped (`Vec<String>` instead of
    /// `alloc::vec::Vec<alloc::string::String>`)
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }

    /// Whether this metadata describes `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeMeta {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeMeta {}

impl Hash for TypeMeta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeMeta({})", self.name)
    }
}

impl fmt::Display for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// Strip module paths from every path segment of a type name
pub fn short_type_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment = String::new();

    for ch in name.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            flush_segment(&mut segment, &mut out);
            out.push(ch);
        }
    }
    flush_segment(&mut segment, &mut out);

    out
}

fn flush_segment(segment: &mut String, out: &mut String) {
    if let Some(last) = segment.rsplit("::").next() {
        out.push_str(last);
    }
    segment.clear();
}
