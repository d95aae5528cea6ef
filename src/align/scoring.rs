/// A log probability in natural-log units.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Nats(pub f32);

impl Nats {
    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn to_bits(self) -> Bits {
        Bits(self.0 / std::f32::consts::LN_2)
    }
}

impl std::fmt::Debug for Nats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nats({})", self.0)
    }
}

impl std::ops::Add for Nats {
    type Output = Nats;

    fn add(self, rhs: Self) -> Self::Output {
        Nats(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Nats {
    type Output = Nats;

    fn sub(self, rhs: Self) -> Self::Output {
        Nats(self.0 - rhs.0)
    }
}

impl std::ops::Add<Bits> for Nats {
    type Output = Nats;

    fn add(self, rhs: Bits) -> Self::Output {
        self + rhs.to_nats()
    }
}

impl std::ops::Sub<Bits> for Nats {
    type Output = Nats;

    fn sub(self, rhs: Bits) -> Self::Output {
        self - rhs.to_nats()
    }
}

/// A log probability in log2 units.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Bits(pub f32);

impl Bits {
    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn to_nats(self) -> Nats {
        Nats(self.0 * std::f32::consts::LN_2)
    }
}

impl std::fmt::Debug for Bits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bits({})", self.0)
    }
}

impl std::ops::Add for Bits {
    type Output = Bits;

    fn add(self, rhs: Self) -> Self::Output {
        Bits(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Bits {
    type Output = Bits;

    fn sub(self, rhs: Self) -> Self::Output {
        Bits(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_nats_ops() {
        let a = Nats(10.0);
        let b = Nats(10.0);
        assert_eq!((a + b).value(), 20.0);

        let a = Nats(20.0);
        let b = Nats(10.0);
        assert_eq!((a - b).value(), 10.0);
    }

    #[test]
    fn test_nats_bits_conversion() {
        let tolerance = 1e-6;
        let nats = Nats(10.0f32.ln());
        let bits = Bits(10.0f32.log2());

        assert!((nats.value() - bits.to_nats().value()).abs() < tolerance);
        assert!((bits.value() - nats.to_bits().value()).abs() < tolerance);
    }

    #[test]
    fn test_nats_bits_ops() {
        let a = Nats(10.0f32.ln());
        let b = Bits(10.0f32.log2());
        let c = a + b;
        let correct = a + a;
        assert!((c.value() - correct.value()).abs() < 1e-6);
    }
}
