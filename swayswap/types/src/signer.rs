use crate::{Addr, StdResult, Tx, TxBody, TxParams, UnsignedTx};

/// Represents an account that can sign transactions.
pub trait Signer {
    /// Return the account's address.
    fn address(&self) -> Addr;

    /// Sign the given transaction.
    fn sign_transaction(&self, unsigned_tx: UnsignedTx) -> StdResult<Tx>;

    /// Build a transaction sent from this account, then sign it.
    fn sign_body(&self, body: TxBody, params: TxParams) -> StdResult<Tx> {
        self.sign_transaction(UnsignedTx {
            sender: self.address(),
            body,
            params,
        })
    }
}
