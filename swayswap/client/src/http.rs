use {
    anyhow::{bail, Context},
    async_trait::async_trait,
    reqwest::Url,
    serde::{de::DeserializeOwned, Serialize},
    swayswap_types::{BroadcastClient, Query, QueryClient, QueryResponse, Tx, TxOutcome},
};

/// A client talking to a node's JSON API over HTTP.
///
/// - `POST {endpoint}/query` takes a [`Query`] and returns a [`QueryResponse`];
/// - `POST {endpoint}/submit_and_await` takes a signed [`Tx`] and returns its
///   [`TxOutcome`] once the transaction is included in a block.
pub struct HttpClient {
    inner: reqwest::Client,
    endpoint: Url,
}

impl HttpClient {
    pub fn new(endpoint: &str) -> anyhow::Result<Self> {
        // Make sure the endpoint ends with a slash, so that joining a path
        // appends to it instead of replacing its last segment.
        let endpoint = if endpoint.ends_with('/') {
            Url::parse(endpoint)
        } else {
            Url::parse(&format!("{endpoint}/"))
        }
        .with_context(|| format!("invalid provider URL `{endpoint}`"))?;

        Ok(Self {
            inner: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn perform<B, R>(&self, path: &str, body: &B) -> anyhow::Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint.join(path)?;
        let response = self.inner.post(url.clone()).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("node returned {status} for {url}: {text}");
        }

        response
            .json()
            .await
            .with_context(|| format!("failed to decode response from {url}"))
    }
}

#[async_trait]
impl QueryClient for HttpClient {
    type Error = anyhow::Error;

    async fn query_chain(&self, query: Query) -> Result<QueryResponse, Self::Error> {
        let response = self.perform("query", &query).await?;
        tracing::debug!(?query, ?response, "Queried node");
        Ok(response)
    }
}

#[async_trait]
impl BroadcastClient for HttpClient {
    type Error = anyhow::Error;

    async fn submit_and_await(&self, tx: Tx) -> Result<TxOutcome, Self::Error> {
        let outcome: TxOutcome = self.perform("submit_and_await", &tx).await?;
        tracing::debug!(tx_id = %outcome.tx_id, status = ?outcome.status, "Transaction included");
        Ok(outcome)
    }
}

// ----------------------------------- tests -----------------------------------
