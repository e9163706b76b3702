/// Bit value of the run the codec expects next.
///
/// Never stored on the wire: both sides start at [`Polarity::FIRST`] and flip
/// after every field, including zero-length ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Polarity {
    Zero,
    One,
}

impl Polarity {
    pub const FIRST: Polarity = Polarity::Zero;

    #[inline(always)]
    pub fn flip(self) -> Self {
        match self {
            Polarity::Zero => Polarity::One,
            Polarity::One => Polarity::Zero,
        }
    }

    #[inline(always)]
    pub fn is_one(self) -> bool {
        self == Polarity::One
    }
}

impl From<bool> for Polarity {
    fn from(bit: bool) -> Self {
        if bit {
            Polarity::One
        } else {
            Polarity::Zero
        }
    }
}

impl From<Polarity> for bool {
    fn from(polarity: Polarity) -> Self {
        polarity.is_one()
    }
}

#[cfg(test)]
mod tests {
    use super::Polarity;

    #[test]
    fn test_first_run_is_zero() {
        assert_eq!(Polarity::FIRST, Polarity::Zero);
        assert!(!bool::from(Polarity::FIRST));
    }

    #[test]
    fn test_flip() {
        assert_eq!(Polarity::Zero.flip(), Polarity::One);
        assert_eq!(Polarity::One.flip(), Polarity::Zero);
        assert_eq!(Polarity::One.flip().flip(), Polarity::One);
    }

    #[test]
    fn test_escape_restores_polarity() {
        // [255, 0, 1]: the zero-length field hands the turn back to the zero run
        let mut expected = Polarity::FIRST;
        let mut seen = vec![];
        for _field in [255u16, 0, 1] {
            seen.push(expected);
            expected = expected.flip();
        }
        assert_eq!(seen, [Polarity::Zero, Polarity::One, Polarity::Zero]);
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(Polarity::from(true), Polarity::One);
        assert_eq!(Polarity::from(false), Polarity::Zero);
        assert!(bool::from(Polarity::One));
    }
}
