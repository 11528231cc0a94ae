#![no_main]

use libfuzzer_sys::fuzz_target;
use kder::encode::{PrimitiveContent, Values};
use kder::{Mode, Tag};

macro_rules! decode_builtin {
    ( $data:expr, $( $fn:ident ),* ) => {{
        $(
            for mode in [Mode::Ber, Mode::Der] {
                let res = mode.decode($data, |cons| {
                    cons.take_primitive_if(Tag::INTEGER, |prim| prim.$fn())
                });
                if let Ok((value, len)) = res {
                    let encoded = value.encode().to_vec().unwrap();
                    if mode == Mode::Der {
                        assert_eq!(encoded, &$data[..len]);
                    }
                    assert_eq!(value.encoded_len() + 2, encoded.len());
                }
            }
        )*
    }}
}

fuzz_target!(|data: &[u8]| {
    decode_builtin!(
        data, to_i8, to_u8, to_i16, to_u16, to_i32, to_u32, to_i64, to_u64
    );
});
