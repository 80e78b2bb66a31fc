use {
    anyhow::anyhow,
    k256::{
        ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey},
        elliptic_curve::sec1::ToEncodedPoint,
    },
    rand::{rngs::OsRng, CryptoRng, RngCore},
    swayswap_types::{Addr, HashExt, StdError, StdResult, TxId, Witness},
};

/// Represents a secret key that can sign transactions.
pub trait Secret: Sized {
    /// Generate a new random private key with the [`OsRng`](https://docs.rs/rand/latest/rand/rngs/struct.OsRng.html).
    fn new_random() -> Self {
        Self::from_rng(&mut OsRng)
    }

    /// Generate a new random private key with the given RNG.
    fn from_rng<R>(rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng;

    /// Recover a private key from raw bytes.
    fn from_bytes(bytes: [u8; 32]) -> anyhow::Result<Self>;

    /// Return the private key as a byte array.
    fn private_key(&self) -> [u8; 32];

    /// Return the address of the account controlled by this key.
    fn address(&self) -> Addr;

    /// Sign a transaction ID.
    fn sign_tx_id(&self, tx_id: TxId) -> StdResult<Witness>;

    /// Recover a private key from a hex string, with or without the `0x`
    /// prefix, as found in the `WALLET_SECRET` environment variable.
    fn from_hex(hex_str: &str) -> anyhow::Result<Self> {
        let trimmed = hex_str.trim();
        let bytes = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            anyhow!(
                "incorrect private key length! expecting: 32, got: {}",
                bytes.len()
            )
        })?;

        Self::from_bytes(bytes)
    }
}

// --------------------------------- Secp256k1 ---------------------------------

/// An Secp256k1 private key.
pub struct Secp256k1 {
    inner: SigningKey,
}

impl Secret for Secp256k1 {
    fn from_rng<R>(rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng,
    {
        Self {
            inner: SigningKey::random(rng),
        }
    }

    fn from_bytes(bytes: [u8; 32]) -> anyhow::Result<Self> {
        Ok(Self {
            inner: SigningKey::from_bytes(&bytes.into())?,
        })
    }

    fn private_key(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    fn address(&self) -> Addr {
        derive_address(self.inner.verifying_key())
    }

    fn sign_tx_id(&self, tx_id: TxId) -> StdResult<Witness> {
        let (signature, recovery_id) = self
            .inner
            .sign_prehash_recoverable(tx_id.as_ref())
            .map_err(|err| StdError::Signing(err.to_string()))?;

        Ok(Witness {
            signature: signature.to_bytes().to_vec(),
            recovery_id: recovery_id.to_byte(),
        })
    }
}

/// Derive an account address from its public key, as the SHA-256 hash of the
/// uncompressed public key without its one-byte tag.
pub fn derive_address(verifying_key: &VerifyingKey) -> Addr {
    let point = verifying_key.as_affine().to_encoded_point(false);
    point.as_bytes()[1..].hash256()
}

/// Recover the address that signed the given transaction ID.
pub fn recover_address(tx_id: TxId, witness: &Witness) -> anyhow::Result<Addr> {
    let signature = Signature::from_slice(&witness.signature)?;
    let recovery_id = RecoveryId::from_byte(witness.recovery_id)
        .ok_or_else(|| anyhow!("invalid recovery id: {}", witness.recovery_id))?;
    let verifying_key = VerifyingKey::recover_from_prehash(tx_id.as_ref(), &signature, recovery_id)?;

    Ok(derive_address(&verifying_key))
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    // Demo purpose only. Do not use for production!
    const PRIVATE_KEY: [u8; 32] =
        hex!("8a8b0ab692eb223f6a2927ad56e63c2ae22a8bc9a5bdfeb1d8127819ddcce177");

    #[test]
    fn parsing_secret_from_hex() {
        let with_prefix = Secp256k1::from_hex(&format!("0x{}", hex::encode(PRIVATE_KEY))).unwrap();
        let without_prefix = Secp256k1::from_hex(&hex::encode(PRIVATE_KEY)).unwrap();

        assert_eq!(with_prefix.private_key(), PRIVATE_KEY);
        assert_eq!(with_prefix.address(), without_prefix.address());
    }

    #[test]
    fn address_is_hash_of_untagged_public_key() {
        let secret = Secp256k1::from_bytes(PRIVATE_KEY).unwrap();
        let signing_key = SigningKey::from_bytes(&PRIVATE_KEY.into()).unwrap();
        let point = signing_key.verifying_key().to_encoded_point(false);

        assert_eq!(point.as_bytes().len(), 65);
        assert_eq!(secret.address(), point.as_bytes()[1..].to_vec().hash256());
        assert_eq!(derive_address(signing_key.verifying_key()), secret.address());
    }

    #[test]
    fn parsing_secret_with_wrong_length_fails() {
        assert!(Secp256k1::from_hex("0x1234").is_err());
    }

    #[test]
    fn signatures_recover_to_signer() {
        let secret = Secp256k1::from_bytes(PRIVATE_KEY).unwrap();
        let tx_id = b"some transaction".hash256();

        let witness = secret.sign_tx_id(tx_id).unwrap();

        assert_eq!(recover_address(tx_id, &witness).unwrap(), secret.address());
        assert_ne!(
            recover_address(b"another transaction".hash256(), &witness).unwrap(),
            secret.address()
        );
    }
}
