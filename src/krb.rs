//! Kerberos V5 protocol types.
//!
//! This module provides the basic types of the Kerberos ASN.1 module from
//! RFC 4120 both as static type descriptors for use with the
//! [`engine`][crate::engine] and as Rust types implementing
//! [`Asn1Type`]. The Kerberos module uses explicit tagging throughout, so
//! all fields are wrapped in a constructed value with a context specific
//! tag.

use std::fmt;
use std::str::FromStr;
use crate::binding::{Asn1Type, copy_slice, take_sequence_of};
use crate::decode::{self, Constructed};
use crate::desc::{self, FieldDesc, Kind, Scalar, TypeDesc};
use crate::encode::{
    PrimitiveContent, SliceTarget, Values, iter, sequence
};
use crate::error::Error;
use crate::string::{BitString, GeneralString, OctetString, StringKind};
use crate::tag::Tag;
use crate::time::GeneralizedTime;


//============ Type Descriptors ==============================================

pub static INT32: TypeDesc = TypeDesc::new(
    "Int32",
    Kind::Primitive(
        Tag::INTEGER,
        Scalar::Integer { min: i32::MIN as i64, max: i32::MAX as i64 }
    )
);

pub static UINT32: TypeDesc = TypeDesc::new(
    "UInt32",
    Kind::Primitive(
        Tag::INTEGER, Scalar::Integer { min: 0, max: u32::MAX as i64 }
    )
);

pub static MICROSECONDS: TypeDesc = TypeDesc::new(
    "Microseconds",
    Kind::Primitive(
        Tag::INTEGER,
        Scalar::Integer { min: 0, max: Microseconds::MAX as i64 }
    )
);

pub static KERBEROS_STRING: TypeDesc = TypeDesc::new(
    "KerberosString",
    Kind::Primitive(
        Tag::GENERAL_STRING, Scalar::String(StringKind::General)
    )
);

pub static REALM: TypeDesc = TypeDesc::new(
    "Realm",
    Kind::Primitive(
        Tag::GENERAL_STRING, Scalar::String(StringKind::General)
    )
);

static KERBEROS_STRINGS: TypeDesc = TypeDesc::new(
    "SEQUENCE OF KerberosString",
    Kind::SequenceOf(Tag::SEQUENCE, &KERBEROS_STRING)
);

static PRINCIPAL_NAME_FIELDS: [FieldDesc; 2] = [
    FieldDesc::new("name-type", &INT32).explicit(0),
    FieldDesc::new("name-string", &KERBEROS_STRINGS).explicit(1),
];

pub static PRINCIPAL_NAME: TypeDesc = TypeDesc::new(
    "PrincipalName", Kind::Sequence(Tag::SEQUENCE, &PRINCIPAL_NAME_FIELDS)
);

pub static KERBEROS_TIME: TypeDesc = TypeDesc::new(
    "KerberosTime",
    Kind::Primitive(Tag::GENERALIZED_TIME, Scalar::GeneralizedTime)
);

static HOST_ADDRESS_FIELDS: [FieldDesc; 2] = [
    FieldDesc::new("addr-type", &INT32).explicit(0),
    FieldDesc::new("address", &desc::OCTET_STRING).explicit(1),
];

pub static HOST_ADDRESS: TypeDesc = TypeDesc::new(
    "HostAddress", Kind::Sequence(Tag::SEQUENCE, &HOST_ADDRESS_FIELDS)
);

pub static HOST_ADDRESSES: TypeDesc = TypeDesc::new(
    "HostAddresses", Kind::SequenceOf(Tag::SEQUENCE, &HOST_ADDRESS)
);

static ENCRYPTED_DATA_FIELDS: [FieldDesc; 3] = [
    FieldDesc::new("etype", &INT32).explicit(0),
    FieldDesc::new("kvno", &UINT32).explicit(1).optional(),
    FieldDesc::new("cipher", &desc::OCTET_STRING).explicit(2),
];

pub static ENCRYPTED_DATA: TypeDesc = TypeDesc::new(
    "EncryptedData", Kind::Sequence(Tag::SEQUENCE, &ENCRYPTED_DATA_FIELDS)
);

pub static KERBEROS_FLAGS: TypeDesc = TypeDesc::new(
    "KerberosFlags", Kind::Primitive(Tag::BIT_STRING, Scalar::BitString)
);

static CHECKSUM_FIELDS: [FieldDesc; 2] = [
    FieldDesc::new("cksumtype", &INT32).explicit(0),
    FieldDesc::new("checksum", &desc::OCTET_STRING).explicit(1),
];

pub static CHECKSUM: TypeDesc = TypeDesc::new(
    "Checksum", Kind::Sequence(Tag::SEQUENCE, &CHECKSUM_FIELDS)
);

static ENCRYPTION_KEY_FIELDS: [FieldDesc; 2] = [
    FieldDesc::new("keytype", &INT32).explicit(0),
    FieldDesc::new("keyvalue", &desc::OCTET_STRING).explicit(1),
];

pub static ENCRYPTION_KEY: TypeDesc = TypeDesc::new(
    "EncryptionKey", Kind::Sequence(Tag::SEQUENCE, &ENCRYPTION_KEY_FIELDS)
);

static TKT_VNO: TypeDesc = TypeDesc::new(
    "tkt-vno",
    Kind::Primitive(
        Tag::INTEGER,
        Scalar::Integer {
            min: Ticket::TKT_VNO as i64, max: Ticket::TKT_VNO as i64
        }
    )
);

static TICKET_FIELDS: [FieldDesc; 4] = [
    FieldDesc::new("tkt-vno", &TKT_VNO).explicit(0),
    FieldDesc::new("realm", &REALM).explicit(1),
    FieldDesc::new("sname", &PRINCIPAL_NAME).explicit(2),
    FieldDesc::new("enc-part", &ENCRYPTED_DATA).explicit(3),
];

static TICKET_SEQUENCE: TypeDesc = TypeDesc::new(
    "Ticket", Kind::Sequence(Tag::SEQUENCE, &TICKET_FIELDS)
);

pub static TICKET: TypeDesc = TypeDesc::new(
    "Ticket", Kind::Explicit(Tag::application(1), &TICKET_SEQUENCE)
);


//============ Rust Types ====================================================

/// Implements `Values` by forwarding to the type’s `encode_ref` method.
macro_rules! values_impl {
    ( $( $ty:ident ),* ) => {
        $(
            impl Values for $ty {
                fn encoded_len(&self) -> usize {
                    self.encode_ref().encoded_len()
                }

                fn write_encoded(
                    &self, target: &mut SliceTarget
                ) -> Result<usize, Error> {
                    self.encode_ref().write_encoded(target)
                }
            }
        )*
    }
}

values_impl!(
    Int32, UInt32, Microseconds, KerberosString, Realm, PrincipalName,
    KerberosTime, HostAddress, HostAddresses, EncryptedData,
    KerberosFlags, Checksum, EncryptionKey, Ticket
);


//------------ Int32 and UInt32 ----------------------------------------------

/// Implements a newtype over a built-in integer type.
macro_rules! int_type {
    (
        $(#[$attr:meta])*
        $name:ident($int:ident), $desc:ident, $to:ident
    ) => {
        $(#[$attr])*
        #[derive(
            Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd
        )]
        pub struct $name(pub $int);

        impl $name {
            pub fn encode_ref(&self) -> impl Values {
                self.0.encode()
            }
        }

        impl Asn1Type for $name {
            fn desc() -> &'static TypeDesc {
                &$desc
            }

            fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
                cons.take_primitive_if(Tag::INTEGER, |prim| {
                    prim.$to().map($name)
                })
            }

            fn copy(&self) -> Result<Self, Error> {
                Ok(*self)
            }
        }

        impl From<$int> for $name {
            fn from(value: $int) -> Self {
                $name(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    }
}

int_type!(
    /// A signed 32 bit integer.
    ///
    /// <pre>
    /// Int32           ::= INTEGER (-2147483648..2147483647)
    /// </pre>
    Int32(i32), INT32, to_i32
);

int_type!(
    /// An unsigned 32 bit integer.
    ///
    /// <pre>
    /// UInt32          ::= INTEGER (0..4294967295)
    /// </pre>
    UInt32(u32), UINT32, to_u32
);


//------------ Microseconds --------------------------------------------------

/// The microseconds part of a timestamp.
///
/// <pre>
/// Microseconds    ::= INTEGER (0..999999)
/// </pre>
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Microseconds(u32);

impl Microseconds {
    pub const MAX: u32 = 999_999;

    pub fn new(value: u32) -> Result<Self, Error> {
        if value > Self::MAX {
            xerr!(return Err(Error::invalid("microseconds out of range")))
        }
        Ok(Microseconds(value))
    }

    pub fn to_u32(self) -> u32 {
        self.0
    }

    pub fn encode_ref(&self) -> impl Values {
        self.0.encode()
    }
}

impl Asn1Type for Microseconds {
    fn desc() -> &'static TypeDesc {
        &MICROSECONDS
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_primitive_if(Tag::INTEGER, |prim| {
            let value = prim.to_u32()?;
            if value > Self::MAX {
                xerr!(return Err(prim.content_err(
                    "microseconds out of range"
                )))
            }
            Ok(Microseconds(value))
        })
    }

    fn copy(&self) -> Result<Self, Error> {
        Ok(*self)
    }
}


//------------ KerberosString ------------------------------------------------

/// A Kerberos string.
///
/// <pre>
/// KerberosString  ::= GeneralString (IA5String)
/// </pre>
///
/// The constraint to IA5String is not enforced since implementations are
/// known to send other octets. Only NUL is rejected.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct KerberosString(GeneralString);

impl KerberosString {
    pub fn new(inner: GeneralString) -> Self {
        KerberosString(inner)
    }

    pub fn as_general_string(&self) -> &GeneralString {
        &self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    pub fn encode_ref(&self) -> impl Values + '_ {
        (&self.0).encode()
    }
}

impl Asn1Type for KerberosString {
    fn desc() -> &'static TypeDesc {
        &KERBEROS_STRING
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        GeneralString::take_from(cons).map(KerberosString)
    }

    fn copy(&self) -> Result<Self, Error> {
        self.0.try_clone().map(KerberosString)
    }
}

impl FromStr for KerberosString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneralString::from_str(s).map(KerberosString)
    }
}

impl fmt::Display for KerberosString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}


//------------ Realm ---------------------------------------------------------

/// The name of a Kerberos realm.
///
/// <pre>
/// Realm           ::= KerberosString
/// </pre>
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Realm(KerberosString);

impl Realm {
    pub fn new(name: KerberosString) -> Self {
        Realm(name)
    }

    pub fn as_kerberos_string(&self) -> &KerberosString {
        &self.0
    }

    pub fn encode_ref(&self) -> impl Values + '_ {
        self.0.encode_ref()
    }
}

impl Asn1Type for Realm {
    fn desc() -> &'static TypeDesc {
        &REALM
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        KerberosString::take_from(cons).map(Realm)
    }

    fn copy(&self) -> Result<Self, Error> {
        self.0.copy().map(Realm)
    }
}

impl FromStr for Realm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KerberosString::from_str(s).map(Realm)
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}


//------------ PrincipalName -------------------------------------------------

/// The name of a Kerberos principal.
///
/// <pre>
/// PrincipalName   ::= SEQUENCE {
///         name-type       [0] Int32,
///         name-string     [1] SEQUENCE OF KerberosString
/// }
/// </pre>
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PrincipalName {
    pub name_type: Int32,
    pub name_string: Vec<KerberosString>,
}

impl PrincipalName {
    /// The name type of a plain user or host principal.
    pub const NT_PRINCIPAL: Int32 = Int32(1);

    /// The name type of a service and instance.
    pub const NT_SRV_INST: Int32 = Int32(2);

    /// Creates a principal name from its components.
    pub fn new(name_type: Int32, name_string: Vec<KerberosString>) -> Self {
        PrincipalName { name_type, name_string }
    }

    pub fn encode_ref(&self) -> impl Values + '_ {
        sequence((
            self.name_type.encode_ref().explicit(Tag::ctx(0)),
            sequence(
                iter(self.name_string.iter().map(KerberosString::encode_ref))
            ).explicit(Tag::ctx(1)),
        ))
    }
}

impl Asn1Type for PrincipalName {
    fn desc() -> &'static TypeDesc {
        &PRINCIPAL_NAME
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_sequence(|cons| {
            let name_type = cons.take_constructed_if(
                Tag::ctx(0), Int32::take_from
            )?;
            let name_string = cons.take_constructed_if(Tag::ctx(1), |cons| {
                take_sequence_of(cons, KerberosString::take_from)
            })?;
            Ok(PrincipalName { name_type, name_string })
        })
    }

    fn copy(&self) -> Result<Self, Error> {
        Ok(PrincipalName {
            name_type: self.name_type,
            name_string: copy_slice(&self.name_string)?,
        })
    }
}

impl fmt::Display for PrincipalName {
    /// Formats the name components separated by slashes.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for item in &self.name_string {
            if first {
                first = false;
            }
            else {
                f.write_str("/")?;
            }
            fmt::Display::fmt(item, f)?;
        }
        Ok(())
    }
}


//------------ KerberosTime --------------------------------------------------

/// A Kerberos timestamp.
///
/// <pre>
/// KerberosTime    ::= GeneralizedTime -- with no fractional seconds
/// </pre>
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct KerberosTime(pub GeneralizedTime);

impl KerberosTime {
    pub fn encode_ref(&self) -> impl Values {
        self.0.encode()
    }
}

impl Asn1Type for KerberosTime {
    fn desc() -> &'static TypeDesc {
        &KERBEROS_TIME
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        GeneralizedTime::take_from(cons).map(KerberosTime)
    }

    fn copy(&self) -> Result<Self, Error> {
        Ok(*self)
    }
}

impl fmt::Display for KerberosTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}


//------------ HostAddress ---------------------------------------------------

/// The address of a host.
///
/// <pre>
/// HostAddress     ::= SEQUENCE  {
///         addr-type       [0] Int32,
///         address         [1] OCTET STRING
/// }
/// </pre>
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct HostAddress {
    pub addr_type: Int32,
    pub address: OctetString,
}

impl HostAddress {
    /// The address type of an IPv4 address.
    pub const IPV4: Int32 = Int32(2);

    /// The address type of an IPv6 address.
    pub const IPV6: Int32 = Int32(24);

    pub fn encode_ref(&self) -> impl Values + '_ {
        sequence((
            self.addr_type.encode_ref().explicit(Tag::ctx(0)),
            (&self.address).encode().explicit(Tag::ctx(1)),
        ))
    }
}

impl Asn1Type for HostAddress {
    fn desc() -> &'static TypeDesc {
        &HOST_ADDRESS
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_sequence(|cons| {
            Ok(HostAddress {
                addr_type: cons.take_constructed_if(
                    Tag::ctx(0), Int32::take_from
                )?,
                address: cons.take_constructed_if(
                    Tag::ctx(1), OctetString::take_from
                )?,
            })
        })
    }

    fn copy(&self) -> Result<Self, Error> {
        Ok(HostAddress {
            addr_type: self.addr_type,
            address: self.address.try_clone()?,
        })
    }
}


//------------ HostAddresses -------------------------------------------------

/// A list of host addresses.
///
/// <pre>
/// HostAddresses   ::= SEQUENCE OF HostAddress
/// </pre>
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct HostAddresses(pub Vec<HostAddress>);

impl HostAddresses {
    pub fn encode_ref(&self) -> impl Values + '_ {
        sequence(iter(self.0.iter().map(HostAddress::encode_ref)))
    }
}

impl Asn1Type for HostAddresses {
    fn desc() -> &'static TypeDesc {
        &HOST_ADDRESSES
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        take_sequence_of(cons, HostAddress::take_from).map(HostAddresses)
    }

    fn copy(&self) -> Result<Self, Error> {
        copy_slice(&self.0).map(HostAddresses)
    }
}


//------------ EncryptedData -------------------------------------------------

/// Encrypted data.
///
/// <pre>
/// EncryptedData   ::= SEQUENCE {
///         etype   [0] Int32 -- EncryptionType --,
///         kvno    [1] UInt32 OPTIONAL,
///         cipher  [2] OCTET STRING -- ciphertext
/// }
/// </pre>
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EncryptedData {
    pub etype: Int32,
    pub kvno: Option<UInt32>,
    pub cipher: OctetString,
}

impl EncryptedData {
    pub fn encode_ref(&self) -> impl Values + '_ {
        sequence((
            self.etype.encode_ref().explicit(Tag::ctx(0)),
            self.kvno.as_ref().map(|kvno| {
                kvno.encode_ref().explicit(Tag::ctx(1))
            }),
            (&self.cipher).encode().explicit(Tag::ctx(2)),
        ))
    }
}

impl Asn1Type for EncryptedData {
    fn desc() -> &'static TypeDesc {
        &ENCRYPTED_DATA
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_sequence(|cons| {
            Ok(EncryptedData {
                etype: cons.take_constructed_if(
                    Tag::ctx(0), Int32::take_from
                )?,
                kvno: cons.take_opt_constructed_if(
                    Tag::ctx(1), UInt32::take_from
                )?,
                cipher: cons.take_constructed_if(
                    Tag::ctx(2), OctetString::take_from
                )?,
            })
        })
    }

    fn copy(&self) -> Result<Self, Error> {
        Ok(EncryptedData {
            etype: self.etype,
            kvno: self.kvno,
            cipher: self.cipher.try_clone()?,
        })
    }
}


//------------ KerberosFlags -------------------------------------------------

/// A set of flags.
///
/// <pre>
/// KerberosFlags   ::= BIT STRING (SIZE (32..MAX))
///                     -- minimum number of bits shall be sent,
///                     -- but no fewer than 32
/// </pre>
///
/// Flag number zero is the most significant bit of the first octet.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct KerberosFlags(BitString);

impl KerberosFlags {
    /// Creates flags from a bit string.
    pub fn new(bits: BitString) -> Self {
        KerberosFlags(bits)
    }

    /// Creates 32 flags from an integer with flag zero in the top bit.
    pub fn from_u32(flags: u32) -> Result<Self, Error> {
        let bits = decode::copy_bytes(&flags.to_be_bytes())?;
        BitString::new(0, bits).map(KerberosFlags)
    }

    /// Returns the first 32 flags as an integer.
    ///
    /// Missing flags are unset.
    pub fn to_u32(&self) -> u32 {
        (0..32).fold(0, |res, bit| {
            (res << 1) | u32::from(self.0.bit(bit))
        })
    }

    /// Returns whether the given flag is set.
    pub fn is_set(&self, flag: usize) -> bool {
        self.0.bit(flag)
    }

    pub fn as_bit_string(&self) -> &BitString {
        &self.0
    }

    pub fn encode_ref(&self) -> impl Values + '_ {
        (&self.0).encode()
    }
}

impl Asn1Type for KerberosFlags {
    fn desc() -> &'static TypeDesc {
        &KERBEROS_FLAGS
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        BitString::take_from(cons).map(KerberosFlags)
    }

    fn copy(&self) -> Result<Self, Error> {
        self.0.try_clone().map(KerberosFlags)
    }
}


//------------ Checksum ------------------------------------------------------

/// A checksum.
///
/// <pre>
/// Checksum        ::= SEQUENCE {
///         cksumtype       [0] Int32,
///         checksum        [1] OCTET STRING
/// }
/// </pre>
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Checksum {
    pub cksumtype: Int32,
    pub checksum: OctetString,
}

impl Checksum {
    pub fn encode_ref(&self) -> impl Values + '_ {
        sequence((
            self.cksumtype.encode_ref().explicit(Tag::ctx(0)),
            (&self.checksum).encode().explicit(Tag::ctx(1)),
        ))
    }
}

impl Asn1Type for Checksum {
    fn desc() -> &'static TypeDesc {
        &CHECKSUM
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_sequence(|cons| {
            Ok(Checksum {
                cksumtype: cons.take_constructed_if(
                    Tag::ctx(0), Int32::take_from
                )?,
                checksum: cons.take_constructed_if(
                    Tag::ctx(1), OctetString::take_from
                )?,
            })
        })
    }

    fn copy(&self) -> Result<Self, Error> {
        Ok(Checksum {
            cksumtype: self.cksumtype,
            checksum: self.checksum.try_clone()?,
        })
    }
}


//------------ EncryptionKey -------------------------------------------------

/// A key.
///
/// <pre>
/// EncryptionKey   ::= SEQUENCE {
///         keytype         [0] Int32 -- actually encryption type --,
///         keyvalue        [1] OCTET STRING
/// }
/// </pre>
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct EncryptionKey {
    pub keytype: Int32,
    pub keyvalue: OctetString,
}

impl EncryptionKey {
    pub fn encode_ref(&self) -> impl Values + '_ {
        sequence((
            self.keytype.encode_ref().explicit(Tag::ctx(0)),
            (&self.keyvalue).encode().explicit(Tag::ctx(1)),
        ))
    }
}

impl Asn1Type for EncryptionKey {
    fn desc() -> &'static TypeDesc {
        &ENCRYPTION_KEY
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_sequence(|cons| {
            Ok(EncryptionKey {
                keytype: cons.take_constructed_if(
                    Tag::ctx(0), Int32::take_from
                )?,
                keyvalue: cons.take_constructed_if(
                    Tag::ctx(1), OctetString::take_from
                )?,
            })
        })
    }

    fn copy(&self) -> Result<Self, Error> {
        Ok(EncryptionKey {
            keytype: self.keytype,
            keyvalue: self.keyvalue.try_clone()?,
        })
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("keytype", &self.keytype)
            .field(
                "keyvalue", &format_args!("<{} octets>", self.keyvalue.len())
            )
            .finish()
    }
}


//------------ Ticket --------------------------------------------------------

/// A ticket.
///
/// <pre>
/// Ticket          ::= [APPLICATION 1] SEQUENCE {
///         tkt-vno         [0] INTEGER (5),
///         realm           [1] Realm,
///         sname           [2] PrincipalName,
///         enc-part        [3] EncryptedData -- EncTicketPart
/// }
/// </pre>
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Ticket {
    pub realm: Realm,
    pub sname: PrincipalName,
    pub enc_part: EncryptedData,
}

impl Ticket {
    /// The only ticket version number.
    pub const TKT_VNO: i32 = 5;

    pub fn encode_ref(&self) -> impl Values + '_ {
        sequence((
            Self::TKT_VNO.encode().explicit(Tag::ctx(0)),
            self.realm.encode_ref().explicit(Tag::ctx(1)),
            self.sname.encode_ref().explicit(Tag::ctx(2)),
            self.enc_part.encode_ref().explicit(Tag::ctx(3)),
        )).explicit(Tag::application(1))
    }
}

impl Asn1Type for Ticket {
    fn desc() -> &'static TypeDesc {
        &TICKET
    }

    fn take_from(cons: &mut Constructed) -> Result<Self, Error> {
        cons.take_constructed_if(Tag::application(1), |cons| {
            cons.take_sequence(|cons| {
                cons.take_constructed_if(Tag::ctx(0), |cons| {
                    cons.take_primitive_if(Tag::INTEGER, |prim| {
                        if prim.to_i32()? != Self::TKT_VNO {
                            xerr!(return Err(prim.content_err(
                                "unsupported ticket version"
                            )))
                        }
                        Ok(())
                    })
                })?;
                Ok(Ticket {
                    realm: cons.take_constructed_if(
                        Tag::ctx(1), Realm::take_from
                    )?,
                    sname: cons.take_constructed_if(
                        Tag::ctx(2), PrincipalName::take_from
                    )?,
                    enc_part: cons.take_constructed_if(
                        Tag::ctx(3), EncryptedData::take_from
                    )?,
                })
            })
        })
    }

    fn copy(&self) -> Result<Self, Error> {
        Ok(Ticket {
            realm: self.realm.copy()?,
            sname: self.sname.copy()?,
            enc_part: self.enc_part.copy()?,
        })
    }
}


//============ Tests =========================================================
