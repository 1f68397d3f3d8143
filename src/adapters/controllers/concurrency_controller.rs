use std::{sync::Arc, time::Instant};

use axum::{extract::State, Json};
use futures::future::join_all;
use tracing::info;

use crate::{
    adapters::dto::concurrency_dto::TimingResponse, application::error::ApplicationError,
    domain::config::global::GlobalConfig,
};

pub struct ConcurrencyController;

impl ConcurrencyController {
    /// All waits are awaited together, so the total is roughly one delay.
    /// GET /async
    pub async fn concurrent_waits(
        State(global_config): State<Arc<GlobalConfig>>,
    ) -> Json<TimingResponse> {
        let tasks = global_config.demo_tasks;
        let delay = global_config.demo_task_delay();

        let start = Instant::now();
        join_all((0..tasks).map(|_| tokio::time::sleep(delay))).await;
        let elapsed = start.elapsed();

        info!("{} concurrent waits took {:?}", tasks, elapsed);
        Json(TimingResponse::new("async", tasks, elapsed))
    }

    /// Blocking sleeps run one after another on the blocking pool, so the
    /// total is the sum of all delays. The async workers stay free meanwhile.
    /// GET /sync
    pub async fn sequential_waits(
        State(global_config): State<Arc<GlobalConfig>>,
    ) -> Result<Json<TimingResponse>, ApplicationError> {
        let tasks = global_config.demo_tasks;
        let delay = global_config.demo_task_delay();

        let elapsed = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            for _ in 0..tasks {
                std::thread::sleep(delay);
            }
            start.elapsed()
        })
        .await
        .map_err(|e| ApplicationError::InternalError(format!("Blocking task failed: {}", e)))?;

        info!("{} sequential waits took {:?}", tasks, elapsed);
        Ok(Json(TimingResponse::new("sync", tasks, elapsed)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::test_utils::create_test_app;

    // Test config: 3 tasks of 100ms each.
    #[tokio::test]
    async fn async_waits_overlap() {
        let (server, _dir) = create_test_app().await;

        let body: Value = server.get("/async").await.json();
        assert_eq!(body["mode"], "async");
        assert_eq!(body["tasks"], 3);
        let elapsed = body["elapsedMs"].as_u64().unwrap();
        assert!(elapsed >= 100);
        assert!(elapsed < 300, "concurrent waits took {}ms", elapsed);
    }

    #[tokio::test]
    async fn sync_waits_add_up() {
        let (server, _dir) = create_test_app().await;

        let body: Value = server.get("/sync").await.json();
        assert_eq!(body["mode"], "sync");
        assert!(body["elapsedMs"].as_u64().unwrap() >= 300);
        assert!(body["elapsed"].as_str().unwrap().ends_with('s'));
    }
}
