//! The caption pipeline actor.
//!
//! A single task owns the record set. Callers talk to it through
//! [`CaptionPipeline`], which sends commands over a bounded channel and reads
//! published snapshots from a watch channel. Each filename listing starts a
//! new pass in its own task; only the most recently started pass may publish
//! its records, results of older passes are dropped when they arrive.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::pass::{run_pass, PassOutput};
use super::snapshot::PipelineSnapshot;
use crate::config::Config;
use crate::error::PipelineError;
use crate::fetch::{CaptionLoader, CaptionSource};
use crate::tagging::{TagAggregator, TokenCounter};
use crate::types::LoadState;

#[derive(Debug)]
enum Command {
    SetFiles { generation: u64, files: Vec<String> },
    SetDelimiter(String),
    SetActive(Option<usize>),
    MarkViewed(usize),
    SetWorkingFolder(String),
    Shutdown,
}

struct PassDone {
    generation: u64,
    output: PassOutput,
}

/// Handle to a running caption pipeline.
pub struct CaptionPipeline {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Arc<PipelineSnapshot>>,
    issued: AtomicU64,
    task: JoinHandle<()>,
}

impl CaptionPipeline {
    /// Start the pipeline actor. Must be called from within a tokio runtime.
    ///
    /// The first snapshot is `Idle` with no records.
    pub fn spawn(config: &Config, source: Arc<dyn CaptionSource>) -> Self {
        let (commands, receiver) = mpsc::channel(config.pipeline.buffer_size);

        let initial = PipelineSnapshot {
            working_folder: config.general.working_folder.clone(),
            ..PipelineSnapshot::default()
        };
        let (publisher, snapshots) = watch::channel(Arc::new(initial.clone()));

        let actor = PipelineActor {
            loader: CaptionLoader::new(source, config.fetch_timeout()),
            aggregator: TagAggregator::new(config.tagging.delimiter.clone()),
            tokens: TokenCounter::new(),
            current: initial,
            started: 0,
            publisher,
        };
        let task = tokio::spawn(actor.run(receiver));

        Self {
            commands,
            snapshots,
            issued: AtomicU64::new(0),
            task,
        }
    }

    async fn send(&self, command: Command) -> Result<(), PipelineError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PipelineError::Closed)
    }

    /// Replace the filename listing and start a new pass.
    ///
    /// Returns the generation number of the pass.
    pub async fn set_files(&self, files: Vec<String>) -> Result<u64, PipelineError> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.send(Command::SetFiles { generation, files }).await?;
        Ok(generation)
    }

    /// Change the tag delimiter; tag statistics are recomputed right away.
    pub async fn set_delimiter(&self, delimiter: impl Into<String>) -> Result<(), PipelineError> {
        self.send(Command::SetDelimiter(delimiter.into())).await
    }

    /// Select a record by index, or clear the selection.
    ///
    /// Out-of-range indices clear the selection.
    pub async fn set_active(&self, index: Option<usize>) -> Result<(), PipelineError> {
        self.send(Command::SetActive(index)).await
    }

    /// Flag a record of the current set as viewed.
    pub async fn mark_viewed(&self, index: usize) -> Result<(), PipelineError> {
        self.send(Command::MarkViewed(index)).await
    }

    pub async fn set_working_folder(&self, folder: impl Into<String>) -> Result<(), PipelineError> {
        self.send(Command::SetWorkingFolder(folder.into())).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<PipelineSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<PipelineSnapshot>> {
        self.snapshots.clone()
    }

    /// Wait until the pass with `generation`, or a later one, is ready.
    pub async fn wait_for(&self, generation: u64) -> Result<Arc<PipelineSnapshot>, PipelineError> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx
            .wait_for(|s| s.is_ready() && s.generation >= generation)
            .await
            .map_err(|_| PipelineError::Closed)?;
        Ok(snapshot.clone())
    }

    /// Wait until the last pass started through this handle is ready.
    pub async fn wait_ready(&self) -> Result<Arc<PipelineSnapshot>, PipelineError> {
        self.wait_for(self.issued.load(Ordering::SeqCst)).await
    }

    /// Stop the actor. Passes still in flight finish but are discarded.
    pub async fn shutdown(self) {
        let _ = self.commands.send(Command::Shutdown).await;
        if let Err(e) = self.task.await {
            tracing::error!("Caption pipeline task failed: {e}");
        }
    }
}

struct PipelineActor {
    loader: CaptionLoader,
    aggregator: TagAggregator,
    tokens: TokenCounter,
    current: PipelineSnapshot,
    started: u64,
    publisher: watch::Sender<Arc<PipelineSnapshot>>,
}

impl PipelineActor {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<PassDone>();

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    None | Some(Command::Shutdown) => break,
                    Some(Command::SetFiles { generation, files }) => {
                        self.start_pass(generation, files, done_tx.clone());
                    }
                    Some(command) => self.apply(command),
                },
                Some(done) = done_rx.recv() => self.finish_pass(done),
            }
        }

        tracing::debug!("Caption pipeline stopped");
    }

    fn start_pass(&mut self, generation: u64, files: Vec<String>, done: mpsc::UnboundedSender<PassDone>) {
        if generation <= self.started {
            tracing::debug!("Ignoring listing for pass {generation}, pass {} already started", self.started);
            return;
        }
        self.started = generation;
        tracing::debug!("Starting pass {generation} over {} files", files.len());

        self.current.state = LoadState::Loading;
        self.publish();

        let loader = self.loader.clone();
        tokio::spawn(async move {
            let output = run_pass(&files, &loader).await;
            // Receiver only goes away on shutdown
            let _ = done.send(PassDone { generation, output });
        });
    }

    fn finish_pass(&mut self, done: PassDone) {
        if done.generation != self.started {
            tracing::debug!(
                "Discarding pass {}, superseded by pass {}",
                done.generation,
                self.started
            );
            return;
        }

        let PassOutput { records, summary } = done.output;
        tracing::info!(
            "Pass {} ready: {} images, {} captions loaded, {} empty",
            done.generation,
            records.len(),
            summary.fetched,
            summary.failed
        );

        self.current.tags = self.aggregator.aggregate(&records);
        self.current.token_counts = self.tokens.count_all(records.iter().map(|r| r.caption.as_str()));
        if self.current.active.is_some_and(|i| i >= records.len()) {
            self.current.active = None;
        }
        self.current.records = records;
        self.current.summary = summary;
        self.current.generation = done.generation;
        self.current.state = LoadState::Ready;
        self.publish();
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SetDelimiter(delimiter) => {
                self.aggregator = TagAggregator::new(delimiter);
                self.current.tags = self.aggregator.aggregate(&self.current.records);
            }
            Command::SetActive(index) => {
                self.current.active = index.filter(|&i| i < self.current.records.len());
            }
            Command::MarkViewed(index) => match self.current.records.get_mut(index) {
                Some(record) => record.viewed = true,
                None => {
                    tracing::debug!("Ignoring viewed mark for missing record {index}");
                    return;
                }
            },
            Command::SetWorkingFolder(folder) => self.current.working_folder = folder,
            Command::SetFiles { .. } | Command::Shutdown => return,
        }
        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(Arc::new(self.current.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, FetchResult};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Serves captions from a map, optionally sleeping per file first.
    #[derive(Default)]
    struct ScriptedSource {
        captions: HashMap<String, String>,
        delays: HashMap<String, Duration>,
    }

    impl ScriptedSource {
        fn caption(mut self, file: &str, text: &str) -> Self {
            self.captions.insert(file.to_string(), text.to_string());
            self
        }

        fn delay(mut self, file: &str, delay: Duration) -> Self {
            self.delays.insert(file.to_string(), delay);
            self
        }
    }

    #[async_trait]
    impl CaptionSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn read_text(&self, file: &str) -> FetchResult<String> {
            if let Some(delay) = self.delays.get(file) {
                tokio::time::sleep(*delay).await;
            }
            self.captions
                .get(file)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    file: file.to_string(),
                    status: 404,
                })
        }
    }

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn spawn(source: ScriptedSource) -> CaptionPipeline {
        CaptionPipeline::spawn(&Config::default(), Arc::new(source))
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let pipeline = spawn(ScriptedSource::default());
        let snapshot = pipeline.snapshot();

        assert_eq!(snapshot.state, LoadState::Idle);
        assert!(snapshot.records.is_empty());
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn test_pass_reaches_ready_with_tags() {
        let source = ScriptedSource::default()
            .caption("dog.txt", "dog, grass")
            .caption("cat.txt", "cat, grass");
        let pipeline = spawn(source);

        pipeline
            .set_files(files(&["dog.jpg", "dog.txt", "cat.png", "cat.txt"]))
            .await
            .unwrap();
        let snapshot = pipeline.wait_ready().await.unwrap();

        assert_eq!(snapshot.state, LoadState::Ready);
        assert_eq!(snapshot.generation, 1);
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.tags.frequencies.get("grass"), 2);
        assert_eq!(snapshot.tags.sorted[0], "grass");
        assert_eq!(snapshot.token_counts.len(), 2);
        assert_eq!(snapshot.tokens(0), Some(TokenCounter::new().count("dog, grass")));
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn test_goes_through_loading() {
        let source = ScriptedSource::default()
            .caption("a.txt", "a")
            .delay("a.txt", Duration::from_millis(100));
        let pipeline = spawn(source);
        let mut rx = pipeline.subscribe();

        pipeline.set_files(files(&["a.jpg", "a.txt"])).await.unwrap();
        let loading = rx.wait_for(|s| s.state == LoadState::Loading).await.unwrap().clone();
        assert!(loading.records.is_empty());

        let ready = pipeline.wait_ready().await.unwrap();
        assert_eq!(ready.records[0].caption, "a");
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn test_failing_source_still_reaches_ready() {
        let pipeline = spawn(ScriptedSource::default());

        pipeline
            .set_files(files(&["a.jpg", "a.txt", "b.png"]))
            .await
            .unwrap();
        let snapshot = pipeline.wait_ready().await.unwrap();

        assert_eq!(snapshot.records.len(), 2);
        assert!(snapshot.records.iter().all(|r| r.caption.is_empty()));
        assert_eq!(snapshot.summary.failed, 2);
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn test_latest_started_pass_wins() {
        // First listing is slow, second is fast; the first must never land.
        let source = ScriptedSource::default()
            .caption("slow.txt", "old")
            .delay("slow.txt", Duration::from_millis(300))
            .caption("fast.txt", "new");
        let pipeline = spawn(source);

        let first = pipeline.set_files(files(&["slow.jpg", "slow.txt"])).await.unwrap();
        let second = pipeline.set_files(files(&["fast.jpg", "fast.txt"])).await.unwrap();
        assert!(second > first);

        let snapshot = pipeline.wait_ready().await.unwrap();
        assert_eq!(snapshot.generation, second);
        assert_eq!(snapshot.records[0].caption, "new");

        // Let the stale pass finish and make sure it is dropped
        tokio::time::sleep(Duration::from_millis(400)).await;
        let snapshot = pipeline.snapshot();
        assert_eq!(snapshot.generation, second);
        assert_eq!(snapshot.records[0].image, "fast.jpg");
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn test_stays_loading_until_latest_pass_finishes() {
        let source = ScriptedSource::default()
            .caption("a.txt", "a")
            .caption("b.txt", "b")
            .delay("b.txt", Duration::from_millis(200));
        let pipeline = spawn(source);

        pipeline.set_files(files(&["a.jpg", "a.txt"])).await.unwrap();
        pipeline.set_files(files(&["b.jpg", "b.txt"])).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(pipeline.snapshot().state, LoadState::Loading);

        let snapshot = pipeline.wait_ready().await.unwrap();
        assert_eq!(snapshot.records[0].caption, "b");
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn test_delimiter_change_recomputes_tags() {
        let source = ScriptedSource::default().caption("a.txt", "x; y, z");
        let pipeline = spawn(source);
        let mut rx = pipeline.subscribe();

        pipeline.set_files(files(&["a.jpg", "a.txt"])).await.unwrap();
        let snapshot = pipeline.wait_ready().await.unwrap();
        assert_eq!(snapshot.tags.frequencies.get("x; y"), 1);

        pipeline.set_delimiter(";").await.unwrap();
        let snapshot = rx
            .wait_for(|s| s.tags.frequencies.get("x") == 1)
            .await
            .unwrap()
            .clone();
        assert_eq!(snapshot.tags.frequencies.get("y, z"), 1);
        // Records are untouched by a delimiter change
        assert_eq!(snapshot.generation, 1);
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn test_active_and_viewed() {
        let source = ScriptedSource::default().caption("a.txt", "a");
        let pipeline = spawn(source);
        let mut rx = pipeline.subscribe();

        pipeline.set_files(files(&["a.jpg", "a.txt", "b.png"])).await.unwrap();
        pipeline.wait_ready().await.unwrap();

        pipeline.set_active(Some(1)).await.unwrap();
        pipeline.mark_viewed(1).await.unwrap();
        let snapshot = rx.wait_for(|s| s.records[1].viewed).await.unwrap().clone();
        assert_eq!(snapshot.active_record().unwrap().image, "b.png");
        assert!(!snapshot.records[0].viewed);

        pipeline.set_active(Some(7)).await.unwrap();
        let snapshot = rx.wait_for(|s| s.active.is_none()).await.unwrap().clone();
        assert!(snapshot.active_record().is_none());

        // A new pass rebuilds records, so earlier viewed marks are gone
        pipeline.set_files(files(&["a.jpg", "a.txt", "b.png"])).await.unwrap();
        let snapshot = pipeline.wait_ready().await.unwrap();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.records.len(), 2);
        assert!(snapshot.records.iter().all(|r| !r.viewed));
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn test_working_folder_is_carried() {
        let mut config = Config::default();
        config.general.working_folder = "/data/set-a".to_string();
        let pipeline = CaptionPipeline::spawn(&config, Arc::new(ScriptedSource::default()));
        assert_eq!(pipeline.snapshot().working_folder, "/data/set-a");

        let mut rx = pipeline.subscribe();
        pipeline.set_working_folder("/data/set-b").await.unwrap();
        rx.wait_for(|s| s.working_folder == "/data/set-b").await.unwrap();
        pipeline.shutdown().await;
    }

    #[tokio::test]
    async fn test_commands_fail_after_shutdown() {
        let pipeline = spawn(ScriptedSource::default());
        let commands = pipeline.commands.clone();
        pipeline.shutdown().await;

        assert!(commands.send(Command::SetActive(None)).await.is_err());
    }
}
