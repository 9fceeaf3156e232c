//! Integration tests for the crawl engine
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full task cycle end-to-end: BFS ordering, budgets, same-host expansion,
//! per-page failure handling, and the bounded retry loop.

use crawl_on_demand::config::CrawlerConfig;
use crawl_on_demand::crawler::{Orchestrator, TaskRunner};
use crawl_on_demand::state::{CrawlTask, TaskStatus, TaskTracker};
use crawl_on_demand::storage::{SqliteTaskStore, StorageError, StorageResult, TaskStore};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Crawler configuration tuned for fast tests
fn test_config() -> CrawlerConfig {
    CrawlerConfig {
        default_depth: 1,
        default_max_pages: 10,
        fetch_timeout_secs: 5,
        request_delay_ms: 10,
        retry_attempts: 3,
        retry_delay_secs: 0,
    }
}

fn new_tracker() -> TaskTracker<SqliteTaskStore> {
    TaskTracker::new(SqliteTaskStore::new_in_memory().expect("in-memory store"))
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn page_with_links(title: &str, hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">Link to {}</a>"#, href, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, links
    )
}

#[tokio::test]
async fn test_bfs_visits_level_by_level() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    // Level 0: A links to B and C. Level 1: B links to D. Level 2: D links
    // to E, which is beyond the depth budget and must never be fetched.
    mount_page(&server, "/", page_with_links("A", &["/b", "/c"])).await;
    mount_page(&server, "/b", page_with_links("B", &["/d"])).await;
    mount_page(&server, "/c", page_with_links("C", &[])).await;
    mount_page(&server, "/d", page_with_links("D", &["/e"])).await;

    Mock::given(method("GET"))
        .and(path("/e"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config();
    let mut tracker = new_tracker();
    let task = CrawlTask::new(&seed, 3, 10);
    tracker.create(&task).expect("create task");

    let orchestrator = Orchestrator::new(&config);
    let report = orchestrator
        .run(&mut tracker, &task)
        .await
        .expect("crawl should complete");

    let expected = vec![
        seed.clone(),
        format!("{}/b", server.uri()),
        format!("{}/c", server.uri()),
        format!("{}/d", server.uri()),
    ];
    assert_eq!(report.crawled_urls, expected);
    assert_eq!(report.total_pages, 4);
    assert_eq!(report.depth_reached, 3);

    let titles: Vec<&str> = report.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C", "D"]);

    let loaded = tracker.get(&task.id).expect("task row");
    assert_eq!(loaded.status, TaskStatus::Completed);
    assert_eq!(loaded.progress, 100);
}

#[tokio::test]
async fn test_external_link_recorded_but_never_fetched() {
    let server = MockServer::start().await;
    let external = MockServer::start().await;
    let seed = format!("{}/", server.uri());
    let external_url = format!("{}/away", external.uri());

    mount_page(
        &server,
        "/",
        page_with_links("Home", &["/inside", external_url.as_str()]),
    )
    .await;
    mount_page(&server, "/inside", page_with_links("Inside", &[])).await;

    // The external host must receive no traffic at all
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&external)
        .await;

    let config = test_config();
    let mut tracker = new_tracker();
    let task = CrawlTask::new(&seed, 2, 10);
    tracker.create(&task).expect("create task");

    let orchestrator = Orchestrator::new(&config);
    let report = orchestrator
        .run(&mut tracker, &task)
        .await
        .expect("crawl should complete");

    assert_eq!(report.total_pages, 2);

    let home = &report.pages[0];
    let external_link = home
        .links
        .iter()
        .find(|l| l.url == external_url)
        .expect("external link recorded on the page");
    assert!(!external_link.internal);

    let internal_link = home
        .links
        .iter()
        .find(|l| l.url.ends_with("/inside"))
        .expect("internal link recorded on the page");
    assert!(internal_link.internal);
}

#[tokio::test]
async fn test_page_budget_stops_the_crawl() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(
        &server,
        "/",
        page_with_links("Hub", &["/p1", "/p2", "/p3", "/p4", "/p5"]),
    )
    .await;
    for route in ["/p1", "/p2", "/p3", "/p4", "/p5"] {
        mount_page(&server, route, page_with_links(route, &[])).await;
    }

    let config = test_config();
    let mut tracker = new_tracker();
    let task = CrawlTask::new(&seed, 2, 2);
    tracker.create(&task).expect("create task");

    let orchestrator = Orchestrator::new(&config);
    let report = orchestrator
        .run(&mut tracker, &task)
        .await
        .expect("crawl should complete");

    assert_eq!(report.total_pages, 2);
    assert_eq!(report.crawled_urls.len(), 2);
    assert_eq!(report.crawled_urls[0], seed);

    let loaded = tracker.get(&task.id).expect("task row");
    assert_eq!(loaded.status, TaskStatus::Completed);
    assert_eq!(loaded.progress, 100);
}

#[tokio::test]
async fn test_page_failure_becomes_error_record() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(&server, "/", page_with_links("Home", &["/broken"])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config();
    let mut tracker = new_tracker();
    let task = CrawlTask::new(&seed, 2, 10);
    tracker.create(&task).expect("create task");

    let orchestrator = Orchestrator::new(&config);
    let report = orchestrator
        .run(&mut tracker, &task)
        .await
        .expect("a page failure must not fail the task");

    assert_eq!(report.total_pages, 2);

    let broken = &report.pages[1];
    assert!(broken.is_error());
    assert_eq!(broken.status_code, Some(500));
    assert_eq!(broken.error.as_deref(), Some("HTTP status 500"));
    assert!(broken.links.is_empty());

    let loaded = tracker.get(&task.id).expect("task row");
    assert_eq!(loaded.status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_seed_timeout_completes_with_error_record() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = CrawlerConfig {
        fetch_timeout_secs: 1,
        ..test_config()
    };
    let mut tracker = new_tracker();
    let task = CrawlTask::new(&seed, 1, 10);
    tracker.create(&task).expect("create task");

    let orchestrator = Orchestrator::new(&config);
    let report = orchestrator
        .run(&mut tracker, &task)
        .await
        .expect("timeout is a page failure, not a task failure");

    assert_eq!(report.total_pages, 1);
    assert!(report.pages[0].is_error());
    assert_eq!(report.pages[0].error.as_deref(), Some("Request timeout"));
    assert_eq!(report.pages[0].status_code, None);

    let loaded = tracker.get(&task.id).expect("task row");
    assert_eq!(loaded.status, TaskStatus::Completed);
}

/// Store wrapper whose `complete_task` always fails, forcing the runner
/// through its whole retry budget
struct FailingStore {
    inner: SqliteTaskStore,
}

impl TaskStore for FailingStore {
    fn insert_task(&mut self, task: &CrawlTask) -> StorageResult<()> {
        self.inner.insert_task(task)
    }

    fn get_task(&self, task_id: &str) -> StorageResult<CrawlTask> {
        self.inner.get_task(task_id)
    }

    fn update_status(&mut self, task_id: &str, status: TaskStatus) -> StorageResult<()> {
        self.inner.update_status(task_id, status)
    }

    fn update_progress(
        &mut self,
        task_id: &str,
        progress: u8,
        message: &str,
    ) -> StorageResult<()> {
        self.inner.update_progress(task_id, progress, message)
    }

    fn complete_task(&mut self, _task_id: &str, _result_json: &str) -> StorageResult<()> {
        Err(StorageError::Database("simulated write failure".to_string()))
    }

    fn fail_task(&mut self, task_id: &str, error: &str) -> StorageResult<()> {
        self.inner.fail_task(task_id, error)
    }

    fn list_tasks(
        &self,
        status: Option<TaskStatus>,
        limit: u32,
        offset: u32,
    ) -> StorageResult<Vec<CrawlTask>> {
        self.inner.list_tasks(status, limit, offset)
    }

    fn delete_task(&mut self, task_id: &str) -> StorageResult<()> {
        self.inner.delete_task(task_id)
    }

    fn count_tasks_by_status(&self, status: TaskStatus) -> StorageResult<u64> {
        self.inner.count_tasks_by_status(status)
    }

    fn count_total_tasks(&self) -> StorageResult<u64> {
        self.inner.count_total_tasks()
    }
}

#[tokio::test]
async fn test_retry_budget_bounds_attempts() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    // One fetch per attempt; exactly 4 attempts (1 + 3 retries)
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page_with_links("Solo", &[]))
                .insert_header("content-type", "text/html"),
        )
        .expect(4)
        .mount(&server)
        .await;

    let config = CrawlerConfig {
        request_delay_ms: 0,
        ..test_config()
    };
    let store = FailingStore {
        inner: SqliteTaskStore::new_in_memory().expect("in-memory store"),
    };
    let mut tracker = TaskTracker::new(store);

    let task = CrawlTask::new(&seed, 1, 10);
    tracker.create(&task).expect("create task");

    let runner = TaskRunner::new(&config);
    let result = runner.execute(&mut tracker, &task).await;
    assert!(result.is_err());

    let loaded = tracker.get(&task.id).expect("task row");
    assert_eq!(loaded.status, TaskStatus::Failed);
    assert!(loaded
        .error
        .as_deref()
        .is_some_and(|e| e.contains("simulated write failure")));
}
