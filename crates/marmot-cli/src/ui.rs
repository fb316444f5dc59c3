use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use marmotpath::engine::progress::{Progress, ProgressCallback};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tracing::trace;

#[derive(Debug)]
pub enum UiEvent {
    Progress(Progress),
    Log(String),
}

/// The planning phase currently on screen and what it has reported so far.
struct PhaseView {
    name: &'static str,
    bar: ProgressBar,
    started: Instant,
    qubo_size: Option<(usize, usize)>,
    best_energy: Option<f64>,
}

impl PhaseView {
    fn detail(&self) -> Option<String> {
        match (self.qubo_size, self.best_energy) {
            (_, Some(best)) => Some(format!("best energy {:.4}", best)),
            (Some((variables, terms)), None) => {
                Some(format!("{} variables, {} terms", variables, terms))
            }
            (None, None) => None,
        }
    }

    fn completion_line(&self, elapsed: Duration) -> String {
        match self.detail() {
            Some(detail) => format!(
                "✓ {}: {} ({:.2}s)",
                self.name,
                detail,
                elapsed.as_secs_f64()
            ),
            None => format!("✓ {} ({:.2}s)", self.name, elapsed.as_secs_f64()),
        }
    }
}

/// Renders engine progress on stderr and interleaves routed log lines above it.
pub struct UiManager {
    multi: MultiProgress,
    phase: Option<PhaseView>,
    events: mpsc::Receiver<UiEvent>,
    shutdown: watch::Receiver<bool>,
}

impl UiManager {
    pub fn new() -> (Self, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (event_sender, events) = mpsc::channel(1024);
        let (shutdown_sender, shutdown) = watch::channel(false);
        let multi = MultiProgress::with_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        let manager = Self {
            multi,
            phase: None,
            events,
            shutdown,
        };
        (manager, event_sender, shutdown_sender)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(event) = self.events.recv() => self.handle_event(event),
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
        if let Some(view) = self.phase.take() {
            view.bar.finish_and_clear();
        }
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Log(line) => {
                self.multi.println(line).ok();
            }
            UiEvent::Progress(progress) => self.handle_progress(progress),
        }
    }

    fn handle_progress(&mut self, progress: Progress) {
        match progress {
            Progress::PhaseStart { name } => {
                if let Some(previous) = self.phase.take() {
                    previous.bar.finish_and_clear();
                }
                let bar = self.multi.add(ProgressBar::new_spinner());
                bar.set_style(spinner_style());
                bar.set_prefix(name);
                bar.enable_steady_tick(Duration::from_millis(100));
                self.phase = Some(PhaseView {
                    name,
                    bar,
                    started: Instant::now(),
                    qubo_size: None,
                    best_energy: None,
                });
            }
            Progress::PhaseFinish => {
                if let Some(view) = self.phase.take() {
                    view.bar.finish_and_clear();
                    let line = view.completion_line(view.started.elapsed());
                    self.multi.println(line).ok();
                }
            }
            Progress::QuboEncoded { variables, terms } => {
                if let Some(view) = self.phase.as_mut() {
                    view.qubo_size = Some((variables, terms));
                    view.bar.set_message(view.detail().unwrap_or_default());
                }
            }
            Progress::TaskStart { total } => {
                if let Some(view) = self.phase.as_ref() {
                    view.bar.disable_steady_tick();
                    view.bar.set_style(reads_style());
                    view.bar.set_length(total);
                    view.bar.set_position(0);
                }
            }
            Progress::ReadCompleted { energy } => {
                if let Some(view) = self.phase.as_mut() {
                    let best = view.best_energy.map_or(energy, |best| best.min(energy));
                    view.best_energy = Some(best);
                    view.bar.inc(1);
                    view.bar.set_message(view.detail().unwrap_or_default());
                }
            }
            Progress::TaskFinish => {
                if let Some(view) = self.phase.as_ref() {
                    view.bar.finish();
                }
            }
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {prefix:.bold} {msg:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn reads_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:.bold:<10} [{bar:32.cyan/blue}] {pos}/{len} reads  {msg:.dim}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ")
}

/// Forwards engine progress to the UI task without ever blocking a sampling
/// thread. Events that do not fit in the channel are dropped.
pub fn progress_callback(sender: mpsc::Sender<UiEvent>) -> ProgressCallback<'static> {
    Box::new(move |progress: Progress| {
        if let Err(err) = sender.try_send(UiEvent::Progress(progress)) {
            trace!("Dropped progress event: {}", err);
        }
    })
}
