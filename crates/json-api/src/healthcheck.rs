//! Jaggery JSON API Healthcheck Handler

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;

/// Healthcheck payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Healthcheck handler
///
/// Reports service health in the same envelope every other endpoint
/// uses.
#[salvo::handler]
pub(crate) async fn handler(res: &mut Response) {
    res.render(Json(Envelope::success(HealthResponse {
        status: "ok".to_string(),
    })));
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck() -> TestResult {
        let router = Router::new().push(Router::with_path("healthcheck").get(handler));

        let body: Envelope<HealthResponse> = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await
            .take_json()
            .await?;

        assert!(body.success);
        assert_eq!(body.data.map(|d| d.status).as_deref(), Some("ok"));

        Ok(())
    }
}
