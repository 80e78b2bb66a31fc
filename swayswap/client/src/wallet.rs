use {
    crate::{Secp256k1, Secret},
    swayswap_types::{Addr, Signer, StdResult, Tx, UnsignedTx},
};

/// An account that signs every transaction the deployment tooling submits.
///
/// The private key is held in memory for the lifetime of the wallet.
pub struct Wallet {
    secret: Secp256k1,
    address: Addr,
}

impl Wallet {
    pub fn new(secret: Secp256k1) -> Self {
        let address = secret.address();
        Self { secret, address }
    }

    pub fn from_hex(secret: &str) -> anyhow::Result<Self> {
        Secp256k1::from_hex(secret).map(Self::new)
    }

    pub fn new_random() -> Self {
        Self::new(Secp256k1::new_random())
    }
}

impl Signer for Wallet {
    fn address(&self) -> Addr {
        self.address
    }

    fn sign_transaction(&self, unsigned_tx: UnsignedTx) -> StdResult<Tx> {
        let witness = self.secret.sign_tx_id(unsigned_tx.id()?)?;

        Ok(Tx {
            unsigned: unsigned_tx,
            witness,
        })
    }
}
