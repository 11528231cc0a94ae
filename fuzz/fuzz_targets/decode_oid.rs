#![no_main]

use std::str::FromStr;
use libfuzzer_sys::fuzz_target;
use kder::{Mode, Oid};

fuzz_target!(|data: &[u8]| {
    let take = Mode::Ber.decode(data, Oid::take_from);
    let opt = Mode::Ber.decode(data, Oid::take_opt_from);
    if let Ok((oid, _)) = take.as_ref() {
        assert_eq!(opt.as_ref().ok().and_then(|x| x.0.as_ref()), Some(oid));

        // Dotted notation survives a round trip.
        let dotted = oid.to_string();
        assert_eq!(&Oid::from_str(&dotted).unwrap(), oid);
    }
});
