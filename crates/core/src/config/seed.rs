use derive_more::Display;
use fnv::FnvHasher;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Base seed for a noise generator. Every layer derives its own seed from
/// this one, so changing it changes the whole height field.
///
/// When deserializing, this type supports a few options:
/// - If the value is an integer that fits into `u64`, use that value
/// - If it's a string that can be parsed into a `u64`, use the parsed value
/// - If it's any other string, keep the string (it gets hashed when used)
/// - If it's anything else (out of range number, float, array, etc.), error
///
/// Seeds are always serialized as a **string**. JSON and TOML can't hold
/// every 64-bit unsigned integer, and a stringified seed parses back into
/// the same number.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Seed {
    /// An integer seed, which can be used directly
    Int(u64),
    /// A textual string, which will be hashed into a u64 before use
    Text(String),
}

impl Seed {
    /// Convert the seed to a `u64`
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Int(seed) => *seed,
            Self::Text(text) => {
                let mut hasher = FnvHasher::default();
                text.hash(&mut hasher);
                hasher.finish()
            }
        }
    }

    /// Seed for the `index`th noise layer. Layers are seeded consecutively,
    /// starting at the base seed.
    pub fn layer_seed(&self, index: usize) -> u64 {
        self.to_u64().wrapping_add(index as u64)
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

// Numeric strings become int seeds, everything else stays text
impl From<&str> for Seed {
    fn from(seed_str: &str) -> Self {
        match seed_str.parse::<u64>() {
            Ok(seed) => Self::Int(seed),
            Err(_) => Self::Text(seed_str.into()),
        }
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        // Ints and strings are both accepted, so no type hint
        deserializer.deserialize_any(SeedVisitor)
    }
}

macro_rules! impl_visit_int {
    ($fname:ident, $type:ty) => {
        fn $fname<E>(self, value: $type) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .try_into()
                .map(Seed::Int)
                .map_err(|_| E::custom(format!("u64 out of range: {}", value)))
        }
    };
}

struct SeedVisitor;

impl<'de> Visitor<'de> for SeedVisitor {
    type Value = Seed;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a positive integer or string")
    }

    impl_visit_int!(visit_u8, u8);
    impl_visit_int!(visit_u16, u16);
    impl_visit_int!(visit_u32, u32);
    impl_visit_int!(visit_u64, u64);
    impl_visit_int!(visit_i8, i8);
    impl_visit_int!(visit_i16, i16);
    impl_visit_int!(visit_i32, i32);
    impl_visit_int!(visit_i64, i64);

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{
        assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, Token,
    };

    #[test]
    fn test_from_str() {
        assert_eq!(Seed::from("0"), Seed::Int(0));
        assert_eq!(Seed::from("8675309"), Seed::Int(8675309));
        assert_eq!(Seed::from("-1"), Seed::Text("-1".into()));
        assert_eq!(Seed::from("hexes"), Seed::Text("hexes".into()));
    }

    #[test]
    fn test_layer_seed() {
        assert_eq!(Seed::Int(0).layer_seed(0), 0);
        assert_eq!(Seed::Int(0).layer_seed(1), 1);
        assert_eq!(Seed::Int(40).layer_seed(2), 42);
        // Wraps instead of overflowing
        assert_eq!(Seed::Int(u64::MAX).layer_seed(1), 0);

        let text = Seed::Text("hexes".into());
        assert_eq!(text.layer_seed(0), text.to_u64());
        assert_eq!(text.layer_seed(3), text.to_u64().wrapping_add(3));
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Seed::Int(0).to_u64(), 0);
        assert_eq!(Seed::Int(8675309).to_u64(), 8675309);

        // Text seeds hash to fixed values, changing these changes every map
        assert_eq!(Seed::Text("-1".into()).to_u64(), 16020590405669718844);
        assert_eq!(Seed::Text("potato".into()).to_u64(), 6265489318014208823);
        assert_eq!(Seed::Text("hexes".into()).to_u64(), 10504897264828743919);
    }

    #[test]
    fn test_text_is_hashed_stably() {
        let a = Seed::Text("mountains".into());
        let b = Seed::from("mountains");
        assert_eq!(a.to_u64(), b.to_u64());
        assert_ne!(a.to_u64(), Seed::from("valleys").to_u64());
    }

    #[test]
    fn test_serialize() {
        assert_ser_tokens(&Seed::Int(0), &[Token::String("0")]);
        assert_ser_tokens(
            &Seed::Int(12506774975058000),
            &[Token::String("12506774975058000")],
        );
        assert_ser_tokens(
            &Seed::Text("hexes".into()),
            &[Token::String("hexes")],
        );
    }

    #[test]
    fn test_deserialize() {
        assert_de_tokens(&Seed::Int(7), &[Token::U64(7)]);
        assert_de_tokens(&Seed::Int(7), &[Token::String("7")]);
        assert_de_tokens(&Seed::Text("-1".into()), &[Token::String("-1")]);

        assert_de_tokens_error::<Seed>(
            &[Token::I32(-1)],
            "u64 out of range: -1",
        );
        assert_de_tokens_error::<Seed>(
            &[Token::Bool(false)],
            "invalid type: boolean `false`, \
            expected a positive integer or string",
        );
    }
}
