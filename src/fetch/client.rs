use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam over the HTTP transport so the orchestrator and tests can swap the
/// real client for a stub.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
