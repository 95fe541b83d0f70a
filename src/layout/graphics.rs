//! `GraphicsInfoV2`, camera state pushed before each rendered frame.

use super::{FLOAT, LONG, POINTER, VECT3};

field_offsets! {
    CAM_POS: VECT3,
    CAM_ORI: 3 * VECT3,
    HWND: POINTER,
    AMBIENT_RED: FLOAT,
    AMBIENT_GREEN: FLOAT,
    AMBIENT_BLUE: FLOAT,
    ID: LONG,
    CAMERA_TYPE: LONG,
    EXPANSION: 128,
}

const _: () = assert!(SIZE == 200);
