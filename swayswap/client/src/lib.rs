mod contracts;
mod http;
mod secret;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod wallet;

pub use {contracts::*, http::*, secret::*, wallet::*};

use swayswap_types::{BroadcastClient, QueryClient};

/// A node client that can both query state and submit transactions.
///
/// Contract handles are generic over this trait, so that the same code runs
/// against a real node through [`HttpClient`], or an in-memory chain in tests.
pub trait ChainClient:
    QueryClient<Error = anyhow::Error> + BroadcastClient<Error = anyhow::Error> + Send + Sync
{
}

impl<C> ChainClient for C where
    C: QueryClient<Error = anyhow::Error> + BroadcastClient<Error = anyhow::Error> + Send + Sync
{
}
