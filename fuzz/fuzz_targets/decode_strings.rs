#![no_main]

use libfuzzer_sys::fuzz_target;
use kder::string::{
    BitString, GeneralString, Ia5String, OctetString, PrintableString,
    Utf8String,
};
use kder::Mode;

macro_rules! decode_strings {
    ( $data:expr, [ $( $mode:ident ),* ] ) => {{
        $(
            if let Ok((bits, _)) = Mode::$mode.decode(
                $data, BitString::take_from
            ) {
                assert!(bits.unused() < 8);
                assert!(bits.octet_len() > 0 || bits.unused() == 0);
                assert!(!bits.bit(bits.bit_len()));
            }

            let _ = Mode::$mode.decode($data, OctetString::take_from);
            let _ = Mode::$mode.decode($data, OctetString::take_opt_from);
            if let Ok((s, _)) = Mode::$mode.decode(
                $data, GeneralString::take_from
            ) {
                assert!(!s.as_slice().contains(&0));
            }
            if let Ok((s, _)) = Mode::$mode.decode(
                $data, Ia5String::take_from
            ) {
                assert!(s.as_slice().is_ascii());
            }
            let _ = Mode::$mode.decode($data, PrintableString::take_from);
            if let Ok((s, _)) = Mode::$mode.decode(
                $data, Utf8String::take_from
            ) {
                assert!(s.as_str().is_some());
            }
        )*
    }}
}

fuzz_target!(|data: &[u8]| {
    decode_strings!(data, [Ber, Der]);
});
