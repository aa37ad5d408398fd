/// Small free-running counter with an explicit wrap point.
///
/// Counts `0, 1, ..., modulus - 1, 0, ...`. The modulus is at most 256 so the
/// value always fits a `u8`; a modulus of 256 is the classic byte counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModCounter {
    value: u8,
    modulus: u16,
}

impl ModCounter {
    /// Largest supported modulus.
    pub const MAX_MODULUS: u16 = 256;

    /// Create a counter starting at `value`.
    ///
    /// `modulus` is clamped to `1..=256` and `value` is reduced into range.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(modulus: u16, value: u8) -> Self {
        let modulus = if modulus == 0 {
            1
        } else if modulus > Self::MAX_MODULUS {
            Self::MAX_MODULUS
        } else {
            modulus
        };
        Self {
            value: (value as u16 % modulus) as u8,
            modulus,
        }
    }

    /// Create a counter sitting just before its wrap point, so the next
    /// [`advance`](Self::advance) wraps.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn at_wrap(modulus: u16) -> Self {
        let counter = Self::new(modulus, 0);
        Self {
            value: (counter.modulus - 1) as u8,
            modulus: counter.modulus,
        }
    }

    /// Step once. Returns `true` exactly when the counter rolled over to 0.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn advance(&mut self) -> bool {
        let next = self.value as u16 + 1;
        if next >= self.modulus {
            self.value = 0;
            true
        } else {
            self.value = next as u8;
            false
        }
    }

    pub const fn reset(&mut self) {
        self.value = 0;
    }

    pub const fn value(self) -> u8 {
        self.value
    }

    pub const fn modulus(self) -> u16 {
        self.modulus
    }
}
