// Scopetab - A scoped symbol table for compiler front ends
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Type descriptors attached to symbol table entries.
//!
//! On the command protocol a type is a flat string such as `INT`,
//! `FUNCTION INT a b` or `STRUCT int x float y`. It is parsed once into a
//! [`TypeDescriptor`] so that display formatting can match on the shape
//! instead of re-parsing text.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Leading keyword of a function descriptor.
pub const FUNCTION_KEYWORD: &str = "FUNCTION";

/// The kind of an aggregate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    /// `STRUCT`
    Struct,
    /// `UNION`
    Union,
}

impl AggregateKind {
    /// Recognize an aggregate keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "STRUCT" => Some(AggregateKind::Struct),
            "UNION" => Some(AggregateKind::Union),
            _ => None,
        }
    }

    /// The protocol keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            AggregateKind::Struct => "STRUCT",
            AggregateKind::Union => "UNION",
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single member of a struct or union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The member's type.
    pub field_type: String,
    /// The member's name.
    pub name: String,
}

impl Field {
    /// Create a new field.
    pub fn new(field_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            name: name.into(),
        }
    }
}

/// The type of a symbol, as declared on the command protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// A plain type name, kept verbatim (e.g. `INT`).
    Plain(String),
    /// A function with a return type and parameter types.
    Function {
        return_type: String,
        params: Vec<String>,
    },
    /// A struct or union with `(type, name)` members.
    Aggregate {
        kind: AggregateKind,
        fields: Vec<Field>,
    },
}

impl TypeDescriptor {
    /// Create a plain descriptor.
    pub fn plain(name: impl Into<String>) -> Self {
        TypeDescriptor::Plain(name.into())
    }

    /// Parse a protocol type string.
    ///
    /// The first word decides the shape. Malformed input never fails: a bare
    /// `FUNCTION` stays plain, and an aggregate drops a trailing member type
    /// that has no name.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let mut words = trimmed.split_whitespace();
        let Some(head) = words.next() else {
            return TypeDescriptor::Plain(String::new());
        };

        if head == FUNCTION_KEYWORD {
            if let Some(return_type) = words.next() {
                return TypeDescriptor::Function {
                    return_type: return_type.to_string(),
                    params: words.map(str::to_string).collect(),
                };
            }
        } else if let Some(kind) = AggregateKind::from_keyword(head) {
            let rest: Vec<&str> = words.collect();
            let fields = rest
                .chunks_exact(2)
                .map(|pair| Field::new(pair[0], pair[1]))
                .collect();
            return TypeDescriptor::Aggregate { kind, fields };
        }

        TypeDescriptor::Plain(trimmed.to_string())
    }

    /// Check if this is a function descriptor.
    pub fn is_function(&self) -> bool {
        matches!(self, TypeDescriptor::Function { .. })
    }

    /// Render the print form of a symbol named `name` with this type.
    ///
    /// ```
    /// use scopetab::table::TypeDescriptor;
    ///
    /// let ty = TypeDescriptor::parse("FUNCTION INT a b");
    /// assert_eq!(ty.render("f"), "<f,FUNCTION,INT<==(a b)>>");
    /// ```
    pub fn render(&self, name: &str) -> String {
        match self {
            TypeDescriptor::Plain(ty) => format!("<{},{}>", name, ty),
            TypeDescriptor::Function {
                return_type,
                params,
            } => format!(
                "<{},{},{}<==({})>>",
                name,
                FUNCTION_KEYWORD,
                return_type,
                params.join(" ")
            ),
            TypeDescriptor::Aggregate { kind, fields } => {
                let members = fields
                    .iter()
                    .map(|field| format!("({},{})", field.field_type, field.name))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("<{},{},{{{}}}>", name, kind, members)
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Plain(ty) => f.write_str(ty),
            TypeDescriptor::Function {
                return_type,
                params,
            } => {
                write!(f, "{} {}", FUNCTION_KEYWORD, return_type)?;
                for param in params {
                    write!(f, " {}", param)?;
                }
                Ok(())
            }
            TypeDescriptor::Aggregate { kind, fields } => {
                write!(f, "{}", kind)?;
                for field in fields {
                    write!(f, " {} {}", field.field_type, field.name)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TypeDescriptor::parse(s))
    }
}

impl From<&str> for TypeDescriptor {
    fn from(text: &str) -> Self {
        TypeDescriptor::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(TypeDescriptor::parse("INT"), TypeDescriptor::plain("INT"));
        assert_eq!(
            TypeDescriptor::parse("  unsigned long  "),
            TypeDescriptor::plain("unsigned long")
        );
    }

    #[test]
    fn test_parse_function() {
        assert_eq!(
            TypeDescriptor::parse("FUNCTION INT a b"),
            TypeDescriptor::Function {
                return_type: "INT".to_string(),
                params: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_function_without_params() {
        let ty = TypeDescriptor::parse("FUNCTION VOID");
        assert!(ty.is_function());
        assert_eq!(ty.render("g"), "<g,FUNCTION,VOID<==()>>");
    }

    #[test]
    fn test_bare_function_keyword_is_plain() {
        let ty = TypeDescriptor::parse("FUNCTION");
        assert_eq!(ty, TypeDescriptor::plain("FUNCTION"));
        assert_eq!(ty.render("f"), "<f,FUNCTION>");
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        assert_eq!(
            TypeDescriptor::parse("FUNCTIONAL x"),
            TypeDescriptor::plain("FUNCTIONAL x")
        );
        assert_eq!(
            TypeDescriptor::parse("STRUCTURE a b"),
            TypeDescriptor::plain("STRUCTURE a b")
        );
    }

    #[test]
    fn test_parse_struct() {
        let ty = TypeDescriptor::parse("STRUCT int x float y");
        assert_eq!(
            ty,
            TypeDescriptor::Aggregate {
                kind: AggregateKind::Struct,
                fields: vec![Field::new("int", "x"), Field::new("float", "y")],
            }
        );
        assert_eq!(ty.render("s"), "<s,STRUCT,{(int,x),(float,y)}>");
    }

    #[test]
    fn test_union_drops_dangling_member_type() {
        let ty = TypeDescriptor::parse("UNION int a char");
        assert_eq!(ty.render("u"), "<u,UNION,{(int,a)}>");
    }

    #[test]
    fn test_empty_aggregate() {
        assert_eq!(TypeDescriptor::parse("STRUCT").render("e"), "<e,STRUCT,{}>");
    }

    #[test]
    fn test_render_plain() {
        assert_eq!(TypeDescriptor::plain("INT").render("x"), "<x,INT>");
    }

    #[test]
    fn test_display_reencodes() {
        for text in ["INT", "FUNCTION INT a b", "STRUCT int x float y", "UNION char c"] {
            assert_eq!(TypeDescriptor::parse(text).to_string(), text);
        }
    }

    #[test]
    fn test_display_normalizes_spacing() {
        assert_eq!(
            TypeDescriptor::parse("FUNCTION  INT   a  b").to_string(),
            "FUNCTION INT a b"
        );
    }

    #[test]
    fn test_from_str() {
        let ty: TypeDescriptor = "FLOAT".parse().unwrap();
        assert_eq!(ty, TypeDescriptor::plain("FLOAT"));
    }
}
