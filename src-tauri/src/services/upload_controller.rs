use crate::config::Settings;
use crate::error::DetectError;
use crate::models::detect_types::{DetectionResponse, SelectedFile};
use crate::models::view_types::{ProgressUpdate, ViewSnapshot, ViewState};
use crate::services::detect_client::DetectApi;
use crate::services::progress::ProgressAnimation;
use crate::services::result_renderer::ResultRenderer;
use crate::services::view::View;
use futures::future::{AbortHandle, Abortable};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const NO_FILE_MESSAGE: &str = "Please select a file first!";
pub const DETECT_FAILED_MESSAGE: &str = "Error detecting.";

/// Client-side state of the page. Reset only by a reload.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub state: ViewState,
    pub selected: Option<SelectedFile>,
    pub progress: u8,
    /// Bumped by `cancel`; a detection only paints while it still matches.
    pub generation: u64,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            state: ViewState::Upload,
            selected: None,
            progress: 0,
            generation: 0,
        }
    }
}

struct DetectionTask {
    abort: AbortHandle,
    handle: JoinHandle<()>,
}

/// Drives the Upload → Loading → Result flow against a `View`.
///
/// Cloning is cheap and every clone shares the same view model.
pub struct UploadController<V: View, C: DetectApi> {
    view: Arc<V>,
    client: Arc<C>,
    animation: ProgressAnimation,
    reveal_delay: Duration,
    renderer: ResultRenderer,
    model: Arc<Mutex<ViewModel>>,
    task: Arc<Mutex<Option<DetectionTask>>>,
}

impl<V: View, C: DetectApi> Clone for UploadController<V, C> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            client: self.client.clone(),
            animation: self.animation,
            reveal_delay: self.reveal_delay,
            renderer: self.renderer.clone(),
            model: self.model.clone(),
            task: self.task.clone(),
        }
    }
}

impl<V: View, C: DetectApi> UploadController<V, C> {
    pub fn new(view: Arc<V>, client: Arc<C>, settings: &Settings) -> Result<Self, DetectError> {
        Ok(Self {
            view,
            client,
            animation: ProgressAnimation::new(settings.tick(), settings.progress_ceiling),
            reveal_delay: settings.reveal_delay(),
            renderer: ResultRenderer::new(settings.uploads_url()?),
            model: Arc::new(Mutex::new(ViewModel::default())),
            task: Arc::new(Mutex::new(None)),
        })
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let model = self.model();
        ViewSnapshot {
            state: model.state,
            file_name: model.selected.as_ref().map(|f| f.name.clone()),
            progress: model.progress,
        }
    }

    /// Keeps the first file of a selection. Returns its name, or `None` when
    /// the selection was empty and nothing changed.
    pub fn select_files(&self, files: Vec<SelectedFile>) -> Option<String> {
        let file = files.into_iter().next()?;
        let name = file.name.clone();
        self.model().selected = Some(file);

        tracing::debug!("Selected {}", name);
        self.view.set_file_label(&name);
        self.view.set_detect_ready(true);
        Some(name)
    }

    /// Validates the selection, switches to the loading view and spawns the
    /// animation-then-upload task.
    pub fn start_detection(&self) -> Result<(), DetectError> {
        let mut task = self.task_slot();
        if task.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            tracing::warn!("Detection already running, ignoring start");
            return Err(DetectError::Busy);
        }

        let file = {
            let mut model = self.model();
            let Some(file) = model.selected.clone() else {
                drop(model);
                self.view.alert(NO_FILE_MESSAGE);
                return Err(DetectError::NoFileSelected);
            };
            model.state = ViewState::Loading;
            model.progress = 0;
            file
        };

        self.view.show_section(ViewState::Loading);

        let (abort, registration) = AbortHandle::new_pair();
        let this = self.clone();
        let handle = tokio::spawn(async move {
            let run = Abortable::new(this.run_detection(file), registration);
            if run.await.is_err() {
                tracing::info!("Detection aborted");
            }
        });

        *task = Some(DetectionTask { abort, handle });
        Ok(())
    }

    /// The body of one detection: cosmetic progress up to the ceiling, then
    /// the upload, then either the result or a reload. Stops painting once
    /// the detection has been cancelled.
    pub async fn run_detection(&self, file: SelectedFile) -> Result<DetectionResponse, DetectError> {
        let generation = self.model().generation;

        self.animation
            .run(|width| {
                self.paint_if_current(generation, |model| {
                    model.progress = width;
                    self.view.set_progress(ProgressUpdate {
                        percent: width,
                        caption: Some(format!("Analyzing... {}%", width)),
                    });
                });
            })
            .await;

        match self.client.detect(&file).await {
            Ok(response) => {
                let current = self.paint_if_current(generation, |model| {
                    model.progress = 100;
                    self.view.set_progress(ProgressUpdate {
                        percent: 100,
                        caption: None,
                    });
                });
                if !current {
                    return Err(DetectError::Cancelled);
                }

                tokio::time::sleep(self.reveal_delay).await;

                let current = self.paint_if_current(generation, |model| {
                    model.state = ViewState::Result;
                    self.renderer.render(self.view.as_ref(), &response);
                });
                if !current {
                    return Err(DetectError::Cancelled);
                }
                tracing::info!(
                    "{}: ai={} organic={:?}",
                    response.result.label,
                    response.result.ai_probability,
                    response.result.organic_probability
                );
                Ok(response)
            }
            Err(e) => {
                if self.model().generation != generation {
                    return Err(DetectError::Cancelled);
                }
                tracing::error!("Detection of {} failed: {}", file.name, e);
                self.view.alert(DETECT_FAILED_MESSAGE);
                self.paint_if_current(generation, |model| {
                    *model = ViewModel {
                        generation,
                        ..ViewModel::default()
                    };
                    self.view.reload();
                });
                Err(e)
            }
        }
    }

    /// Waits for the current detection task, if any.
    pub async fn wait(&self) {
        let handle = self.task_slot().take().map(|t| t.handle);
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!("Detection task failed: {}", e);
            }
        }
    }

    /// Aborts an in-flight detection (timer and request together) and goes
    /// back to the upload view, keeping the selection. Returns whether a
    /// running task was aborted.
    pub fn cancel(&self) -> bool {
        let Some(task) = self.task_slot().take() else {
            return false;
        };
        if task.handle.is_finished() {
            return false;
        }
        task.abort.abort();

        {
            let mut model = self.model();
            model.generation += 1;
            model.state = ViewState::Upload;
            model.progress = 0;
            self.view.set_progress(ProgressUpdate {
                percent: 0,
                caption: None,
            });
            self.view.show_section(ViewState::Upload);
        }
        tracing::info!("Detection cancelled");
        true
    }

    /// Runs `paint` under the model lock unless the detection that captured
    /// `generation` has since been cancelled. `cancel` paints under the same
    /// lock, so a stale detection can never paint over it.
    fn paint_if_current(&self, generation: u64, paint: impl FnOnce(&mut ViewModel)) -> bool {
        let mut model = self.model();
        if model.generation != generation {
            tracing::debug!("Dropping update from cancelled detection");
            return false;
        }
        paint(&mut model);
        true
    }

    // A poisoned lock only means a view callback panicked; the model is
    // still consistent.
    fn model(&self) -> MutexGuard<'_, ViewModel> {
        self.model.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn task_slot(&self) -> MutexGuard<'_, Option<DetectionTask>> {
        self.task.lock().unwrap_or_else(|e| e.into_inner())
    }
}
