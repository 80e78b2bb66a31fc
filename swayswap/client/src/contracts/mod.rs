/// Define a typed handle for one of the SwaySwap contracts, as a thin wrapper
/// over [`ContractHandle`] that dereferences to it.
macro_rules! contract_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<'a, C> {
            inner: $crate::ContractHandle<'a, C>,
        }

        impl<'a, C> $name<'a, C>
        where
            C: $crate::ChainClient,
        {
            pub fn new(
                id: swayswap_types::ContractId,
                client: &'a C,
                wallet: &'a $crate::Wallet,
            ) -> Self {
                Self {
                    inner: $crate::ContractHandle::new(id, client, wallet),
                }
            }
        }

        impl<C> Clone for $name<'_, C> {
            fn clone(&self) -> Self {
                Self {
                    inner: self.inner.clone(),
                }
            }
        }

        impl<'a, C> std::ops::Deref for $name<'a, C> {
            type Target = $crate::ContractHandle<'a, C>;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }
    };
}

mod exchange;
mod handle;
mod registry;
mod router;
mod token;

pub use {exchange::*, handle::*, registry::*, router::*, token::*};
