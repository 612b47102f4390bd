//! Call signatures
//!
//! A [`DelegateSignature`] is the shape a callable has to match: ordered
//! parameter types plus a return type. Signatures are derived from Rust types
//! through [`ParameterList`], which is implemented for tuples of up to eight
//! elements.

use std::fmt;

use super::type_meta::TypeMeta;

/// A parameter position together with its type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterBinding {
    /// Zero-based position in the parameter list
    pub position: usize,
    /// Declared parameter type
    pub ty: TypeMeta,
}

impl fmt::Display for ParameterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.position, self.ty)
    }
}

/// Tuple types usable as an argument list
pub trait ParameterList: 'static {
    /// Number of parameters
    const ARITY: usize;

    /// Parameter types in declaration order
    fn parameter_types() -> Vec<TypeMeta>;
}

macro_rules! impl_parameter_list {
    ($($ty:ident),*) => {
        impl<$($ty: 'static),*> ParameterList for ($($ty,)*) {
            const ARITY: usize = <[&str]>::len(&[$(stringify!($ty)),*]);

            fn parameter_types() -> Vec<TypeMeta> {
                vec![$(TypeMeta::of::<$ty>()),*]
            }
        }
    };
}

impl_parameter_list!();
impl_parameter_list!(A1);
impl_parameter_list!(A1, A2);
impl_parameter_list!(A1, A2, A3);
impl_parameter_list!(A1, A2, A3, A4);
impl_parameter_list!(A1, A2, A3, A4, A5);
impl_parameter_list!(A1, A2, A3, A4, A5, A6);
impl_parameter_list!(A1, A2, A3, A4, A5, A6, A7);
impl_parameter_list!(A1, A2, A3, A4, A5, A6, A7, A8);

/// Ordered parameter types plus a return type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelegateSignature {
    parameters: Vec<TypeMeta>,
    output: TypeMeta,
}

impl DelegateSignature {
    /// Build a signature from explicit parameter and return types
    pub fn new(parameters: Vec<TypeMeta>, output: TypeMeta) -> Self {
        Self { parameters, output }
    }

    /// Signature of a callable taking `A` (a tuple) and returning `R`
    pub fn of<A: ParameterList, R: 'static>() -> Self {
        Self::new(A::parameter_types(), TypeMeta::of::<R>())
    }

    /// Parameter types in order
    pub fn parameters(&self) -> &[TypeMeta] {
        &self.parameters
    }

    /// Return type
    pub fn output(&self) -> TypeMeta {
        self.output
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Position/type pairs for every parameter
    pub fn bindings(&self) -> Vec<ParameterBinding> {
        self.parameters
            .iter()
            .enumerate()
            .map(|(position, ty)| ParameterBinding { position, ty: *ty })
            .collect()
    }
}

impl fmt::Display for DelegateSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (i, ty) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        write!(f, ") -> {}", self.output)
    }
}
