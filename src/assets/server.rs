use flume::{Receiver, Sender, TryRecvError};

use crate::assets::document::ModelDocument;
use crate::assets::io::AssetSource;
use crate::errors::{Result, ViewerError};

#[cfg(not(target_arch = "wasm32"))]
use std::sync::OnceLock;
#[cfg(not(target_arch = "wasm32"))]
use tokio::runtime::Runtime;

#[cfg(not(target_arch = "wasm32"))]
const READ_CHUNK_SIZE: usize = 64 * 1024;

#[cfg(not(target_arch = "wasm32"))]
fn get_asset_runtime() -> Option<&'static Runtime> {
    static RUNTIME: OnceLock<Option<Runtime>> = OnceLock::new();
    RUNTIME
        .get_or_init(|| match Runtime::new() {
            Ok(rt) => Some(rt),
            Err(e) => {
                log::error!("Failed to create asset loader runtime: {e}");
                None
            }
        })
        .as_ref()
}

/// Bytes received so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: u64,
    /// Unknown until the size is reported.
    pub total: Option<u64>,
}

impl LoadProgress {
    /// Percentage in `[0, 100]`, or `None` while the total is unknown.
    #[must_use]
    pub fn percent(&self) -> Option<f32> {
        match self.total {
            Some(0) => Some(100.0),
            Some(total) => Some((self.loaded as f64 / total as f64 * 100.0).min(100.0) as f32),
            None => None,
        }
    }

    /// Status line shown while the model loads, e.g. `LOADING 42/100`.
    #[must_use]
    pub fn status_text(&self) -> String {
        match self.percent() {
            Some(pct) => format!("LOADING {pct:.0}/100"),
            None => "LOADING".to_string(),
        }
    }
}

/// Messages from a background model load.
#[derive(Debug)]
pub enum LoadEvent {
    Progress(LoadProgress),
    Loaded(ModelDocument),
    Failed(ViewerError),
}

/// Handle to a model load in flight.
///
/// Poll it from the frame loop; it never blocks. After `Loaded` or `Failed`
/// has been returned once, `poll` yields nothing more.
pub struct PendingModel {
    source: AssetSource,
    rx: Receiver<LoadEvent>,
    finished: bool,
}

impl PendingModel {
    #[must_use]
    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Next pending event, if any.
    pub fn poll(&mut self) -> Option<LoadEvent> {
        if self.finished {
            return None;
        }
        match self.rx.try_recv() {
            Ok(event) => {
                if matches!(event, LoadEvent::Loaded(_) | LoadEvent::Failed(_)) {
                    self.finished = true;
                }
                Some(event)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                Some(LoadEvent::Failed(ViewerError::LoaderDisconnected(self.source.to_string())))
            }
        }
    }

    /// Blocks until the load settles, discarding progress events.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait(self) -> Result<ModelDocument> {
        loop {
            match self.rx.recv() {
                Ok(LoadEvent::Progress(_)) => {}
                Ok(LoadEvent::Loaded(doc)) => return Ok(doc),
                Ok(LoadEvent::Failed(err)) => return Err(err),
                Err(_) => return Err(ViewerError::LoaderDisconnected(self.source.to_string())),
            }
        }
    }
}

/// Resolves asset names against a root and starts loads.
#[derive(Debug, Clone, Default)]
pub struct AssetServer {
    root: String,
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory or URL prefix that asset names are resolved against.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn resolve(&self, name: &str) -> Result<AssetSource> {
        AssetSource::join(&self.root, name)
    }

    /// Starts loading a model in the background and returns immediately.
    pub fn load_model(&self, name: &str) -> Result<PendingModel> {
        let source = self.resolve(name)?;
        Ok(self.load_model_from(source))
    }

    pub fn load_model_from(&self, source: AssetSource) -> PendingModel {
        let (tx, rx) = flume::unbounded();
        log::info!("Loading model {source}");
        spawn_read(source.clone(), tx);
        PendingModel {
            source,
            rx,
            finished: false,
        }
    }
}

fn finish(source: &AssetSource, bytes: Result<Vec<u8>>, tx: &Sender<LoadEvent>) {
    let event = match bytes.and_then(|b| ModelDocument::from_gltf_slice(&b, source.filename())) {
        Ok(doc) => {
            log::info!("Loaded {} ({} nodes)", source.filename(), doc.node_count());
            LoadEvent::Loaded(doc)
        }
        Err(err) => {
            log::error!("Failed to load {source}: {err}");
            LoadEvent::Failed(err)
        }
    };
    // The receiver may be gone if the viewer was dropped mid-load.
    let _ = tx.send(event);
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_read(source: AssetSource, tx: Sender<LoadEvent>) {
    match source {
        AssetSource::Path(_) => {
            let Some(runtime) = get_asset_runtime() else {
                let _ = tx.send(LoadEvent::Failed(ViewerError::LoaderDisconnected(source.to_string())));
                return;
            };
            runtime.spawn(async move {
                let bytes = read_file_with_progress(&source, &tx).await;
                finish(&source, bytes, &tx);
            });
        }
        AssetSource::Url(_) => spawn_fetch(source, tx),
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn_read(source: AssetSource, tx: Sender<LoadEvent>) {
    spawn_fetch(source, tx);
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_file_with_progress(source: &AssetSource, tx: &Sender<LoadEvent>) -> Result<Vec<u8>> {
    use tokio::io::AsyncReadExt;

    let AssetSource::Path(path) = source else {
        return Err(ViewerError::AssetNotFound(source.to_string()));
    };

    let mut file = tokio::fs::File::open(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ViewerError::AssetNotFound(path.display().to_string())
        } else {
            ViewerError::IoError(e)
        }
    })?;
    let total = file.metadata().await?.len();

    let _ = tx.send(LoadEvent::Progress(LoadProgress {
        loaded: 0,
        total: Some(total),
    }));

    let mut data = Vec::with_capacity(usize::try_from(total).unwrap_or_default());
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];
    loop {
        let n = file.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..n]);
        let _ = tx.send(LoadEvent::Progress(LoadProgress {
            loaded: data.len() as u64,
            total: Some(total),
        }));
    }

    Ok(data)
}

#[cfg(feature = "http")]
fn spawn_fetch(source: AssetSource, tx: Sender<LoadEvent>) {
    let url = source.to_string();
    ehttp::fetch(ehttp::Request::get(url), move |result| {
        let bytes = match result {
            Ok(response) if response.ok => {
                let len = response.bytes.len() as u64;
                let _ = tx.send(LoadEvent::Progress(LoadProgress {
                    loaded: len,
                    total: Some(len),
                }));
                Ok(response.bytes)
            }
            Ok(response) => Err(ViewerError::HttpResponseError {
                status: response.status,
            }),
            Err(message) => Err(ViewerError::HttpError(message)),
        };
        finish(&source, bytes, &tx);
    });
}

#[cfg(not(feature = "http"))]
fn spawn_fetch(source: AssetSource, tx: Sender<LoadEvent>) {
    let _ = tx.send(LoadEvent::Failed(ViewerError::FeatureNotEnabled(format!(
        "cannot fetch {source} without the `http` feature"
    ))));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_reports_whole_percent() {
        let progress = LoadProgress {
            loaded: 512,
            total: Some(2048),
        };
        assert_eq!(progress.percent(), Some(25.0));
        assert_eq!(progress.status_text(), "LOADING 25/100");
        assert_eq!(LoadProgress::default().status_text(), "LOADING");
    }
}
