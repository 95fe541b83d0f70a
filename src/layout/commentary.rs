//! `CommentaryRequestInfo`, the last commentary event requested by the host.

use super::{BYTE, DOUBLE};

pub const NAME_LEN: usize = 32;

field_offsets! {
    NAME: NAME_LEN,
    INPUT1: DOUBLE,
    INPUT2: DOUBLE,
    INPUT3: DOUBLE,
    SKIP_CHECKS: BYTE,
    PAD0: 3 * BYTE,
}

const _: () = assert!(SIZE == 60);
