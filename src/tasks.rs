//! Async task management for non-blocking API operations.
//!
//! The UI never awaits a request inline. State code queues an [`ApiRequest`];
//! the main loop hands it to [`TaskSpawner::spawn`], which runs it on a tokio
//! task and sends exactly one [`ApiMessage`] back through the channel. The
//! main loop polls the channel with `try_recv()` and feeds each message to
//! the store.
//!
//! Requests are not serialized per file and cannot be cancelled. Completion
//! order is whatever the network gives us.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{AmbarClient, ContentHighlight, SearchResult, Source};

/// A request the state layer wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Run a search.
    Search {
        /// The full query string.
        query: String,
        /// Result page to fetch.
        page: u32,
        /// Hits per page.
        size: u32,
        /// Source ids to limit the search to. Empty means every source.
        sources: Vec<String>,
    },
    /// Load the content highlight of one hit.
    LoadHighlight {
        /// The hit.
        file_id: String,
        /// The query to highlight.
        query: String,
    },
    /// Tag a file.
    AddTag {
        /// The hit.
        file_id: String,
        /// Tag name.
        tag: String,
    },
    /// Untag a file.
    RemoveTag {
        /// The hit.
        file_id: String,
        /// Tag name.
        tag: String,
    },
    /// Hide a file.
    HideFile {
        /// The hit.
        file_id: String,
    },
    /// Unhide a file.
    ShowFile {
        /// The hit.
        file_id: String,
    },
    /// Fetch the tag catalog.
    FetchTags,
    /// Fetch the crawler sources.
    FetchSources,
}

/// Messages sent from background tasks to the main event loop.
///
/// One variant per request kind, carrying enough of the request to apply the
/// result to the right record.
#[derive(Debug)]
pub enum ApiMessage {
    /// Search finished.
    SearchCompleted {
        query: String,
        page: u32,
        result: Result<SearchResult, String>,
    },

    /// Highlight fetch finished.
    HighlightLoaded {
        file_id: String,
        result: Result<ContentHighlight, String>,
    },

    /// Tag add finished; success carries the canonical tag list.
    TagAdded {
        file_id: String,
        tag: String,
        result: Result<Vec<String>, String>,
    },

    /// Tag removal finished; success carries the canonical tag list.
    TagRemoved {
        file_id: String,
        tag: String,
        result: Result<Vec<String>, String>,
    },

    /// Hide finished.
    FileHidden {
        file_id: String,
        result: Result<(), String>,
    },

    /// Unhide finished.
    FileShown {
        file_id: String,
        result: Result<(), String>,
    },

    /// Tag catalog loaded.
    TagsFetched(Result<Vec<String>, String>),

    /// Sources loaded.
    SourcesFetched(Result<Vec<Source>, String>),
}

/// Spawns background tasks for async operations.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Run `request` on a new task. Must be called inside a tokio runtime.
    pub fn spawn(&self, client: &AmbarClient, request: ApiRequest) {
        debug!(?request, "Spawning request task");
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let message = execute(&client, request).await;
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(message);
        });
    }
}

/// Perform one request and wrap its outcome.
async fn execute(client: &AmbarClient, request: ApiRequest) -> ApiMessage {
    match request {
        ApiRequest::Search {
            query,
            page,
            size,
            sources,
        } => {
            let result = client
                .search(&query, &sources, page, size)
                .await
                .map_err(|e| e.to_string());
            ApiMessage::SearchCompleted {
                query,
                page,
                result,
            }
        }
        ApiRequest::LoadHighlight { file_id, query } => {
            let result = client
                .load_highlight(&file_id, &query)
                .await
                .map_err(|e| e.to_string());
            ApiMessage::HighlightLoaded { file_id, result }
        }
        ApiRequest::AddTag { file_id, tag } => {
            let result = client.add_tag(&file_id, &tag).await.map_err(|e| e.to_string());
            ApiMessage::TagAdded {
                file_id,
                tag,
                result,
            }
        }
        ApiRequest::RemoveTag { file_id, tag } => {
            let result = client
                .remove_tag(&file_id, &tag)
                .await
                .map_err(|e| e.to_string());
            ApiMessage::TagRemoved {
                file_id,
                tag,
                result,
            }
        }
        ApiRequest::HideFile { file_id } => {
            let result = client.hide_file(&file_id).await.map_err(|e| e.to_string());
            ApiMessage::FileHidden { file_id, result }
        }
        ApiRequest::ShowFile { file_id } => {
            let result = client.unhide_file(&file_id).await.map_err(|e| e.to_string());
            ApiMessage::FileShown { file_id, result }
        }
        ApiRequest::FetchTags => {
            ApiMessage::TagsFetched(client.get_tags().await.map_err(|e| e.to_string()))
        }
        ApiRequest::FetchSources => {
            ApiMessage::SourcesFetched(client.get_sources().await.map_err(|e| e.to_string()))
        }
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Auth;

    #[test]
    fn test_spawned_task_reports_failure() {
        tokio_test::block_on(async {
            let (mut rx, spawner) = create_task_channel();
            // Nothing listens on port 9 (discard); the request must fail fast.
            let client = AmbarClient::with_auth("http://127.0.0.1:9", Auth::anonymous()).unwrap();

            spawner.spawn(
                &client,
                ApiRequest::HideFile {
                    file_id: "abc".to_string(),
                },
            );

            match rx.recv().await {
                Some(ApiMessage::FileHidden { file_id, result }) => {
                    assert_eq!(file_id, "abc");
                    assert!(result.is_err());
                }
                other => panic!("unexpected message: {:?}", other),
            }
        });
    }

    #[test]
    fn test_channel_delivers_in_send_order() {
        let (mut rx, spawner) = create_task_channel();
        spawner
            .tx
            .send(ApiMessage::TagsFetched(Ok(vec!["a".to_string()])))
            .unwrap();
        spawner
            .tx
            .send(ApiMessage::TagsFetched(Err("boom".to_string())))
            .unwrap();

        assert!(matches!(rx.try_recv(), Ok(ApiMessage::TagsFetched(Ok(_)))));
        assert!(matches!(rx.try_recv(), Ok(ApiMessage::TagsFetched(Err(_)))));
        assert!(rx.try_recv().is_err());
    }
}
