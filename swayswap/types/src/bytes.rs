use {
    crate::{StdError, StdResult},
    serde::{de, ser},
    std::{
        fmt::{self, Debug, Display},
        str::FromStr,
    },
};

/// A 32-byte value, used for wallet addresses, contract IDs, asset IDs,
/// salts, and hashes.
///
/// Encoded as a lowercase hex string with the `0x` prefix. When parsing, the
/// prefix is optional and either case is accepted.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct B256([u8; 32]);

impl B256 {
    pub const LENGTH: usize = 32;
    pub const ZERO: Self = Self([0; Self::LENGTH]);

    pub const fn from_array(array: [u8; Self::LENGTH]) -> Self {
        Self(array)
    }

    pub const fn into_array(self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Encode an integer as a big-endian, left-zero-padded 32-byte value.
    pub const fn from_u64(value: u64) -> Self {
        let mut bytes = [0; Self::LENGTH];
        let be = value.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[Self::LENGTH - 8 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; Self::LENGTH]
    }

    /// Generate a mock value for use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = index;
        Self(bytes)
    }
}

impl AsRef<[u8]> for B256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for B256 {
    fn from(array: [u8; 32]) -> Self {
        Self(array)
    }
}

impl From<B256> for [u8; 32] {
    fn from(b256: B256) -> Self {
        b256.0
    }
}

impl TryFrom<&[u8]> for B256 {
    type Error = StdError;

    fn try_from(slice: &[u8]) -> StdResult<Self> {
        slice
            .try_into()
            .map(Self)
            .map_err(|_| StdError::IncorrectLength {
                expect: Self::LENGTH,
                actual: slice.len(),
            })
    }
}

impl FromStr for B256 {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let hex_str = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        let bytes = hex::decode(hex_str).map_err(|err| StdError::invalid_hex(s, err))?;

        bytes.as_slice().try_into()
    }
}

impl Display for B256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for B256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "B256({self})")
    }
}

impl ser::Serialize for B256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for B256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(B256Visitor)
    }
}

struct B256Visitor;

impl de::Visitor<'_> for B256Visitor {
    type Value = B256;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a 32-byte hex string, optionally prefixed with `0x`")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        B256::from_str(v).map_err(E::custom)
    }
}

// ----------------------------------- tests -----------------------------------
