#![no_main]

use libfuzzer_sys::fuzz_target;
use kder::krb::{
    Checksum, EncryptedData, EncryptionKey, HostAddresses, KerberosFlags,
    KerberosTime, PrincipalName, Ticket,
};
use kder::{Asn1Type, Mode};

/// Decodes `data` as `T` and checks that DER values re-encode identically.
fn check<T: Asn1Type>(data: &[u8]) {
    let (value, len) = match T::decode(data, Mode::Der) {
        Ok(res) => res,
        Err(_) => return,
    };
    let encoded = value.to_vec().unwrap();
    assert_eq!(encoded, &data[..len]);
    assert_eq!(value.length(), len);

    let copy = value.copy().unwrap();
    assert_eq!(copy.to_vec().unwrap(), encoded);

    let (generic, generic_len) = T::desc().decode(data, Mode::Der).unwrap();
    assert_eq!(generic_len, len);
    assert_eq!(T::desc().encode_to_vec(&generic).unwrap(), encoded);
}

/// Both paths have to agree on whether the data is acceptable.
fn agree<T: Asn1Type>(data: &[u8], mode: Mode) {
    assert_eq!(
        T::decode(data, mode).map(|x| x.1).ok(),
        T::desc().decode(data, mode).map(|x| x.1).ok(),
    );
}

fuzz_target!(|data: &[u8]| {
    check::<PrincipalName>(data);
    check::<KerberosTime>(data);
    check::<HostAddresses>(data);
    check::<EncryptedData>(data);
    check::<KerberosFlags>(data);
    check::<Checksum>(data);
    check::<EncryptionKey>(data);
    check::<Ticket>(data);

    agree::<Ticket>(data, Mode::Ber);
    agree::<PrincipalName>(data, Mode::Ber);
});
