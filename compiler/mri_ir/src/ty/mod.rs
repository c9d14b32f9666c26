//! Semantic type classification.
//!
//! Type tags arrive as raw C++ spellings (`const std::string&`,
//! `scoped_refptr<Bitmap>`, `std::vector<int32_t>`). They are classified once,
//! when descriptors are built, so the emitters only ever match on [`TypeKind`].
//!
//! Classification is prefix-based on the normalized spelling, first match wins:
//!
//! 1. `scoped_refptr<X>` - handle
//! 2. `std::vector<...>` - list of handles, strings or scalars
//! 3. `float`, `double` - float
//! 4. `bool` - boolean
//! 5. `std::string` - string
//! 6. anything else - integer

use std::fmt;

const HANDLE_TEMPLATE: &str = "scoped_refptr";
const LIST_TEMPLATE: &str = "std::vector";
const STRING_TYPE: &str = "std::string";

/// Spellings that land on the integer kind without being a fallback.
const INTEGER_SPELLINGS: &[&str] = &[
    "int", "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t",
    "uint64_t", "long", "short", "unsigned", "size_t",
];

/// The closed set of kinds a value can have at the language boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    String,
    Float,
    Boolean,
    Integer,
    /// Reference-counted native object of the named class.
    Handle(String),
    /// List of scalars, converted element-wise as integers. Holds the element
    /// spelling.
    ScalarList(String),
    StringList,
    /// List of reference-counted native objects of the named class.
    HandleList(String),
}

impl TypeKind {
    /// The referenced class for handle and handle-list kinds.
    pub fn handle_class(&self) -> Option<&str> {
        match self {
            Self::Handle(class) | Self::HandleList(class) => Some(class),
            _ => None,
        }
    }

    /// Whether values of this kind cross as an opaque runtime object that
    /// needs an explicit conversion after argument parsing.
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            Self::Handle(_) | Self::ScalarList(_) | Self::StringList | Self::HandleList(_)
        )
    }

    /// Whether the kind converts element-wise through a native vector.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::ScalarList(_) | Self::StringList | Self::HandleList(_)
        )
    }
}

/// A classified type tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Tag with `const` and reference qualifiers removed.
    spelling: String,
    kind: TypeKind,
    /// Set when the tag matched no rule and defaulted to integer.
    fallback: bool,
}

impl TypeRef {
    /// Classify a raw type tag.
    ///
    /// Never fails for unrecognized tags; those become [`TypeKind::Integer`]
    /// with [`TypeRef::is_fallback`] set. Fails only when a handle or list tag
    /// has no usable generic parameter.
    pub fn parse(tag: &str) -> Result<Self, TypeTagError> {
        let spelling = normalize(tag);

        if spelling.starts_with(HANDLE_TEMPLATE) {
            let class = handle_class(spelling)
                .ok_or_else(|| TypeTagError::MalformedHandle(tag.to_string()))?;
            return Ok(Self::new(spelling, TypeKind::Handle(class.to_string())));
        }

        if spelling.starts_with(LIST_TEMPLATE) {
            let element = generic_argument(spelling, LIST_TEMPLATE)
                .ok_or_else(|| TypeTagError::MalformedList(tag.to_string()))?;
            let kind = if element.starts_with(HANDLE_TEMPLATE) {
                let class = handle_class(element)
                    .ok_or_else(|| TypeTagError::MalformedHandle(tag.to_string()))?;
                TypeKind::HandleList(class.to_string())
            } else if element == STRING_TYPE {
                TypeKind::StringList
            } else if is_identifier(element) {
                TypeKind::ScalarList(element.to_string())
            } else {
                return Err(TypeTagError::MalformedList(tag.to_string()));
            };
            return Ok(Self::new(spelling, kind));
        }

        let kind = if spelling.starts_with("float") || spelling.starts_with("double") {
            TypeKind::Float
        } else if spelling.starts_with("bool") {
            TypeKind::Boolean
        } else if spelling.starts_with(STRING_TYPE) {
            TypeKind::String
        } else {
            return Ok(Self {
                spelling: spelling.to_string(),
                kind: TypeKind::Integer,
                fallback: !INTEGER_SPELLINGS.contains(&spelling),
            });
        };
        Ok(Self::new(spelling, kind))
    }

    fn new(spelling: &str, kind: TypeKind) -> Self {
        Self {
            spelling: spelling.to_string(),
            kind,
            fallback: false,
        }
    }

    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[inline]
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// Whether the tag was not recognized and defaulted to integer.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling)
    }
}

/// A method's return type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Void,
    Value(TypeRef),
}

impl ReturnType {
    /// Classify a return tag. `void` and the empty tag mean no value.
    pub fn parse(tag: &str) -> Result<Self, TypeTagError> {
        match normalize(tag) {
            "" | "void" => Ok(Self::Void),
            _ => TypeRef::parse(tag).map(Self::Value),
        }
    }

    pub fn value(&self) -> Option<&TypeRef> {
        match self {
            Self::Void => None,
            Self::Value(ty) => Some(ty),
        }
    }
}

/// A type tag whose generic parameter could not be extracted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeTagError {
    #[error("handle type `{0}` does not name a class")]
    MalformedHandle(String),
    #[error("list type `{0}` does not name an element type")]
    MalformedList(String),
}

/// Strip `const` and reference qualifiers.
fn normalize(tag: &str) -> &str {
    let tag = tag.trim();
    let tag = tag.strip_prefix("const ").unwrap_or(tag);
    tag.trim_end_matches(|c: char| c == '&' || c.is_whitespace())
        .trim_start()
}

/// Extract `X` from `scoped_refptr<X>`.
fn handle_class(spelling: &str) -> Option<&str> {
    generic_argument(spelling, HANDLE_TEMPLATE).filter(|class| is_identifier(class))
}

/// Extract the text between the angle brackets following `template`.
fn generic_argument<'a>(spelling: &'a str, template: &str) -> Option<&'a str> {
    let rest = spelling.strip_prefix(template)?.trim_start();
    let body = rest.strip_prefix('<')?;
    let mut depth = 0usize;
    for (idx, c) in body.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if depth == 0 => {
                let inner = body[..idx].trim();
                return (!inner.is_empty()).then_some(inner);
            }
            '>' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// C identifier check: non-empty, `[A-Za-z0-9_]`, not starting with a digit.
pub(crate) fn is_identifier(s: &str) -> bool {
    s.chars().next().is_some_and(|c| !c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
