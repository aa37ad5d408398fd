use smart_leds::RGB8;

/// Raw 8-bit per-channel color, as carried by command messages.
pub type Rgb = RGB8;
