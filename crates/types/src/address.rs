use core::fmt;

pub const ADDRESS_LEN: usize = 20;

/// A 20-byte contract-style address.
///
/// Precompiled handlers live at small, well-known addresses (`0x...100e`)
/// so they can be reached through the same call path as deployed contracts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(C)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Builds the reserved address of a precompiled contract: all zero bytes
    /// except the trailing two, which carry `id` big-endian.
    pub const fn precompiled(id: u16) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        let id = id.to_be_bytes();
        bytes[ADDRESS_LEN - 2] = id[0];
        bytes[ADDRESS_LEN - 1] = id[1];
        Self(bytes)
    }

    /// Returns `None` unless `slice` is exactly 20 bytes long.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; ADDRESS_LEN] = slice.try_into().ok()?;
        Some(Address::new(bytes))
    }

    /// Parses 40 hex characters, with or without a `0x` prefix.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex).as_bytes();
        if hex.len() != ADDRESS_LEN * 2 {
            return None;
        }

        fn nibble(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        for (i, pair) in hex.chunks_exact(2).enumerate() {
            bytes[i] = (nibble(pair[0])? << 4) | nibble(pair[1])?;
        }
        Some(Address(bytes))
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
