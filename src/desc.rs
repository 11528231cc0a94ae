//! Static type descriptors.
//!
//! A [`TypeDesc`] describes the shape of an ASN.1 type: its tag, whether it
//! is a primitive, a SEQUENCE, a SEQUENCE OF, a CHOICE, or an explicitly
//! tagged wrapper around another type, and the descriptors of all fields.
//! Descriptors are plain immutable data meant to live in `static`s. They
//! drive the generic codec in [`engine`][crate::engine] which encodes and
//! decodes [`Value`][crate::engine::Value]s.
//!
//! Because temporaries in a `static` initializer aren’t promoted when
//! passed to an enum constructor, field lists need to live in a `static` of
//! their own:
//!
//! ```
//! use kder::desc::{self, FieldDesc, Kind, TypeDesc};
//! use kder::Tag;
//!
//! static POINT_FIELDS: [FieldDesc; 2] = [
//!     FieldDesc::new("x", &desc::INTEGER).explicit(0),
//!     FieldDesc::new("y", &desc::INTEGER).explicit(1).optional(),
//! ];
//!
//! static POINT: TypeDesc = TypeDesc::new(
//!     "Point", Kind::Sequence(Tag::SEQUENCE, &POINT_FIELDS)
//! );
//!
//! assert_eq!(POINT.tag(), Some(Tag::SEQUENCE));
//! ```

use crate::engine::Value;
use crate::string::StringKind;
use crate::tag::Tag;


//------------ TypeDesc ------------------------------------------------------

/// The description of an ASN.1 type.
#[derive(Clone, Copy, Debug)]
pub struct TypeDesc {
    /// The name of the type for diagnostics.
    name: &'static str,

    /// What the type looks like.
    kind: Kind,
}

impl TypeDesc {
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        TypeDesc { name, kind }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the tag of encoded values of the type.
    ///
    /// Untagged CHOICE types don’t have a tag of their own, so this returns
    /// `None` for them.
    pub fn tag(&self) -> Option<Tag> {
        match self.kind {
            Kind::Primitive(tag, _) => Some(tag),
            Kind::Sequence(tag, _) => Some(tag),
            Kind::SequenceOf(tag, _) => Some(tag),
            Kind::Explicit(tag, _) => Some(tag),
            Kind::Choice(_) => None,
        }
    }

    /// Returns whether a value with the given tag is of this type.
    ///
    /// For CHOICE types, this is true if any alternative matches.
    pub fn matches(&self, tag: Tag) -> bool {
        match self.kind {
            Kind::Choice(alternatives) => {
                alternatives.iter().any(|alt| alt.matches(tag))
            }
            _ => self.tag() == Some(tag)
        }
    }
}


//------------ Kind ----------------------------------------------------------

/// The shape of a type.
#[derive(Clone, Copy, Debug)]
pub enum Kind {
    /// A primitive value with the given tag.
    ///
    /// Using a tag other than the scalar’s natural one results in implicit
    /// tagging.
    Primitive(Tag, Scalar),

    /// A SEQUENCE with the given tag and fields in order.
    Sequence(Tag, &'static [FieldDesc]),

    /// A SEQUENCE OF with the given tag and element type.
    SequenceOf(Tag, &'static TypeDesc),

    /// An untagged CHOICE between the given alternatives.
    ///
    /// The alternatives must have distinct tags. The `optional` and
    /// `default` settings of the alternatives are ignored.
    Choice(&'static [FieldDesc]),

    /// A constructed value with the given tag wrapping the inner type.
    ///
    /// This is how `[APPLICATION n]` types are described.
    Explicit(Tag, &'static TypeDesc),
}


//------------ Scalar --------------------------------------------------------

/// The primitive types.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scalar {
    Boolean,

    /// An INTEGER restricted to the given inclusive range.
    Integer { min: i64, max: i64 },

    Null,
    OctetString,

    /// A restricted character string.
    String(StringKind),

    Oid,
    BitString,

    /// A GeneralizedTime in the Kerberos profile.
    GeneralizedTime,
}


//------------ FieldDesc -----------------------------------------------------

/// The description of a SEQUENCE field or CHOICE alternative.
#[derive(Clone, Copy, Debug)]
pub struct FieldDesc {
    /// The name of the field for diagnostics.
    name: &'static str,

    /// The explicit tag wrapped around the field’s value if any.
    tag: Option<Tag>,

    /// The type of the field.
    ty: &'static TypeDesc,

    /// Whether the field may be absent.
    optional: bool,

    /// The value used if the field is absent.
    default: Option<DefaultValue>,
}

impl FieldDesc {
    /// Creates a required, untagged field.
    pub const fn new(name: &'static str, ty: &'static TypeDesc) -> Self {
        FieldDesc { name, tag: None, ty, optional: false, default: None }
    }

    /// Adds an explicit context specific tag with the given number.
    pub const fn explicit(self, number: u32) -> Self {
        self.tagged(Tag::ctx(number))
    }

    /// Adds an explicit tag.
    pub const fn tagged(self, tag: Tag) -> Self {
        FieldDesc { tag: Some(tag), ..self }
    }

    /// Marks the field as optional.
    pub const fn optional(self) -> Self {
        FieldDesc { optional: true, ..self }
    }

    /// Marks the field as having a default value.
    ///
    /// Such fields are optional on the wire.
    pub const fn with_default(self, default: DefaultValue) -> Self {
        FieldDesc { optional: true, default: Some(default), ..self }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    pub fn ty(&self) -> &'static TypeDesc {
        self.ty
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn default(&self) -> Option<DefaultValue> {
        self.default
    }

    /// Returns whether a SEQUENCE value may leave the field’s slot empty.
    ///
    /// This is only true for optional fields without a default. A field
    /// with a default always holds a value, which is the default if the
    /// field is missing from the encoding.
    pub fn allows_none(&self) -> bool {
        self.optional && self.default.is_none()
    }

    /// Returns the tag the field’s encoding starts with.
    ///
    /// This is `None` for untagged CHOICE fields.
    pub fn expected_tag(&self) -> Option<Tag> {
        self.tag.or_else(|| self.ty.tag())
    }

    /// Returns whether a value with the given tag is this field.
    pub fn matches(&self, tag: Tag) -> bool {
        match self.tag {
            Some(own) => own == tag,
            None => self.ty.matches(tag),
        }
    }
}


//------------ DefaultValue --------------------------------------------------

/// The default value of a field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
}

impl DefaultValue {
    /// Returns whether `value` is equal to the default.
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (DefaultValue::Boolean(left), Value::Boolean(right)) => {
                left == *right
            }
            (DefaultValue::Integer(left), Value::Integer(right)) => {
                left == *right
            }
            _ => false
        }
    }

    /// Returns the default as a value.
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Boolean(value) => Value::Boolean(value),
            DefaultValue::Integer(value) => Value::Integer(value),
        }
    }
}


//------------ Built-in Types ------------------------------------------------

pub static BOOLEAN: TypeDesc = TypeDesc::new(
    "BOOLEAN", Kind::Primitive(Tag::BOOLEAN, Scalar::Boolean)
);

/// An INTEGER of the full `i64` range.
pub static INTEGER: TypeDesc = TypeDesc::new(
    "INTEGER",
    Kind::Primitive(
        Tag::INTEGER, Scalar::Integer { min: i64::MIN, max: i64::MAX }
    )
);

pub static NULL: TypeDesc = TypeDesc::new(
    "NULL", Kind::Primitive(Tag::NULL, Scalar::Null)
);

pub static OCTET_STRING: TypeDesc = TypeDesc::new(
    "OCTET STRING", Kind::Primitive(Tag::OCTET_STRING, Scalar::OctetString)
);

pub static OID: TypeDesc = TypeDesc::new(
    "OBJECT IDENTIFIER", Kind::Primitive(Tag::OID, Scalar::Oid)
);

pub static BIT_STRING: TypeDesc = TypeDesc::new(
    "BIT STRING", Kind::Primitive(Tag::BIT_STRING, Scalar::BitString)
);

pub static GENERAL_STRING: TypeDesc = TypeDesc::new(
    "GeneralString",
    Kind::Primitive(
        Tag::GENERAL_STRING, Scalar::String(StringKind::General)
    )
);

pub static PRINTABLE_STRING: TypeDesc = TypeDesc::new(
    "PrintableString",
    Kind::Primitive(
        Tag::PRINTABLE_STRING, Scalar::String(StringKind::Printable)
    )
);

pub static IA5_STRING: TypeDesc = TypeDesc::new(
    "IA5String",
    Kind::Primitive(Tag::IA5_STRING, Scalar::String(StringKind::Ia5))
);

pub static UTF8_STRING: TypeDesc = TypeDesc::new(
    "UTF8String",
    Kind::Primitive(Tag::UTF8_STRING, Scalar::String(StringKind::Utf8))
);

pub static GENERALIZED_TIME: TypeDesc = TypeDesc::new(
    "GeneralizedTime",
    Kind::Primitive(Tag::GENERALIZED_TIME, Scalar::GeneralizedTime)
);


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    static ALTERNATIVES: [FieldDesc; 2] = [
        FieldDesc::new("number", &INTEGER),
        FieldDesc::new("name", &GENERAL_STRING).explicit(3),
    ];

    static CHOICE: TypeDesc = TypeDesc::new(
        "Choice", Kind::Choice(&ALTERNATIVES)
    );

    #[test]
    fn tags_and_matching() {
        assert_eq!(INTEGER.tag(), Some(Tag::INTEGER));
        assert_eq!(CHOICE.tag(), None);
        assert!(CHOICE.matches(Tag::INTEGER));
        assert!(CHOICE.matches(Tag::ctx(3)));
        assert!(!CHOICE.matches(Tag::GENERAL_STRING));

        let field = FieldDesc::new("c", &CHOICE);
        assert_eq!(field.expected_tag(), None);
        assert!(field.matches(Tag::INTEGER));
        let field = field.explicit(1);
        assert_eq!(field.expected_tag(), Some(Tag::ctx(1)));
        assert!(!field.matches(Tag::INTEGER));
    }

    #[test]
    fn builders() {
        let field = FieldDesc::new("flag", &BOOLEAN);
        assert!(!field.is_optional());
        assert!(!field.allows_none());
        assert!(field.optional().allows_none());
        let field = field.with_default(DefaultValue::Boolean(false));
        assert!(field.is_optional());
        assert!(!field.allows_none());
        assert_eq!(field.default(), Some(DefaultValue::Boolean(false)));
        assert!(DefaultValue::Boolean(false).matches(&Value::Boolean(false)));
        assert!(!DefaultValue::Integer(0).matches(&Value::Boolean(false)));
        assert_eq!(DefaultValue::Integer(4).to_value(), Value::Integer(4));
    }
}
