mod frame;

pub use frame::{
    encode_render, encode_reset, encode_set_brightness, encode_set_led, CommandFrame, Opcode,
    FRAME_LEN,
};
