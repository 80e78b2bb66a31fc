use {
    crate::B256,
    sha2::{Digest, Sha256},
};

/// Compute the SHA-256 digest of some bytes.
pub trait HashExt {
    fn hash256(&self) -> B256;
}

impl<T> HashExt for T
where
    T: AsRef<[u8]> + ?Sized,
{
    fn hash256(&self) -> B256 {
        B256::from_array(Sha256::digest(self.as_ref()).into())
    }
}

// ----------------------------------- tests -----------------------------------
