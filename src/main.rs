use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use recite::{
    reset_recordings_dir, AudioFrame, CaptureOutcome, ChannelSource, Config, ExportBuilder,
    RecordingController, SessionStore, TranscriptState, Transcriber, Transcription,
    TranscriptionDispatcher,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "recite")]
#[command(about = "Record an ordered list of prompts read aloud")]
struct Args {
    /// File with one prompt per line
    prompts: PathBuf,

    /// Config file (TOML); RECITE_* environment variables override it
    #[arg(short, long, default_value = "config/recite")]
    config: String,

    /// Directory of pre-captured takes, one `<position>.wav` per prompt.
    /// Each take is replayed through the capture pipeline and the session
    /// is exported at the end.
    #[arg(short, long)]
    takes_dir: Option<PathBuf>,

    /// External speech-to-text command, run with the WAV path as its only
    /// argument; its stdout becomes the transcript
    #[arg(long)]
    transcriber: Option<String>,
}

/// Speech-to-text via an external command
struct CommandTranscriber {
    program: String,
}

#[async_trait]
impl Transcriber for CommandTranscriber {
    async fn transcribe(&self, path: &Path) -> Result<Transcription> {
        let output = tokio::process::Command::new(&self.program)
            .arg(path)
            .output()
            .await
            .with_context(|| format!("Failed to run transcriber: {}", self.program))?;

        anyhow::ensure!(
            output.status.success(),
            "Transcriber exited with {}",
            output.status
        );

        Ok(Transcription {
            text: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            language: None,
            confidence: None,
            segments: Vec::new(),
        })
    }
}

/// Replay a WAV file through the capture pipeline as if it had streamed in
/// from the live transport, in 100ms batches.
fn spawn_wav_feed(path: &Path) -> Result<mpsc::Receiver<AudioFrame>> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open take: {}", path.display()))?;
    let spec = reader.spec();
    let samples: Vec<i16> = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read take: {}", path.display()))?;

    let (tx, rx) = mpsc::channel(64);

    tokio::spawn(async move {
        let frame_len = (spec.sample_rate as usize / 10).max(1) * spec.channels as usize;
        for chunk in samples.chunks(frame_len) {
            let frame = AudioFrame {
                data: chunk.iter().flat_map(|s| s.to_le_bytes()).collect(),
                sample_rate: spec.sample_rate,
                channels: spec.channels,
                bits_per_sample: 16,
            };
            if tx.send(frame).await.is_err() {
                break;
            }
        }
        // Dropping the sender ends the stream
    });

    Ok(rx)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Recordings directory: {}", cfg.recordings_dir.display());
    info!("Archive file: {}", cfg.archive_name);

    let raw = fs::read_to_string(&args.prompts)
        .with_context(|| format!("Failed to read prompts file: {}", args.prompts.display()))?;
    let texts: Vec<String> = raw
        .lines()
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    anyhow::ensure!(!texts.is_empty(), "Prompts file contains no prompts");

    // Each run is a fresh session: previous takes are wiped
    reset_recordings_dir(&cfg.recordings_dir)?;

    let store = SessionStore::new(texts).into_shared();
    let total = store.lock().await.len();
    info!("Session ready: {total} prompts");

    let Some(takes_dir) = args.takes_dir else {
        info!("No takes directory given; waiting for a live capture front end");
        return Ok(());
    };

    let controller = RecordingController::new(
        cfg.recordings_dir.clone(),
        Duration::from_millis(cfg.poll_timeout_ms),
    );
    let dispatcher = args.transcriber.as_ref().map(|program| {
        TranscriptionDispatcher::new(
            Arc::new(CommandTranscriber {
                program: program.clone(),
            }),
            Arc::clone(&store),
        )
    });
    let mut transcript_tasks = Vec::new();

    for position in 0..total {
        let prompt = {
            let store = store.lock().await;
            store.current_prompt().context("Cursor out of range")?.clone()
        };

        let take = takes_dir.join(format!("{position}.wav"));
        if take.exists() {
            let mut source = ChannelSource::new(spawn_wav_feed(&take)?);
            match controller.run(&mut source, &store, &prompt).await {
                Ok(CaptureOutcome::Recorded(recording)) => {
                    if let Some(dispatcher) = &dispatcher {
                        transcript_tasks.push(dispatcher.dispatch(&recording));
                    }
                }
                Ok(CaptureOutcome::NoAudio) => {
                    info!("Take for prompt {} held no audio", prompt.position);
                }
                Err(e) => warn!("Capture failed for prompt {}: {e}", prompt.position),
            }
        } else {
            info!("No take for prompt {}; leaving it unrecorded", prompt.position);
        }

        store.lock().await.advance(1);
    }

    for task in transcript_tasks {
        if let Err(e) = task.await {
            error!("Transcription task panicked: {e}");
        }
    }

    let store = store.lock().await;
    for recording in store.recordings() {
        match &recording.transcript {
            TranscriptState::Ready(result) => info!(
                "Prompt {}: {:?} -> {:?}",
                recording.position, recording.text, result.text
            ),
            TranscriptState::Pending => {
                info!("Prompt {}: transcript still processing", recording.position);
            }
            TranscriptState::Failed => {
                info!("Prompt {}: transcription failed", recording.position);
            }
        }
    }

    let summary = ExportBuilder::new(&cfg).build(&store)?;
    info!(
        "Bundle ready: {} recordings, {} unrecorded, {}",
        summary.recordings,
        summary.unrecorded,
        summary.archive_path.display()
    );

    Ok(())
}
