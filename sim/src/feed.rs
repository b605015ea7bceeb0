//! Consumers of the match feed: a JSON-lines renderer and a frame recorder.
//!
//! Both implement [`FrameSink`] and are driven by [`pump`], which drains the
//! game loop's broadcast channel until the match finishes.

use crate::protocol::FeedMsg;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

pub trait FrameSink {
    fn on_message(&mut self, msg: &FeedMsg) -> io::Result<()>;

    /// Called once after the last message.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes every feed message as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn on_message(&mut self, msg: &FeedMsg) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, msg)?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Streams every message to a JSON-lines file as it arrives.
pub struct FrameRecorder {
    path: PathBuf,
    sink: JsonLinesSink<BufWriter<File>>,
    messages: usize,
    frames: usize,
}

impl FrameRecorder {
    /// Create (or truncate) the recording file.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = File::create(&path)?;
        Ok(Self {
            path,
            sink: JsonLinesSink::new(BufWriter::new(file)),
            messages: 0,
            frames: 0,
        })
    }

    pub fn message_count(&self) -> usize {
        self.messages
    }

    /// Number of frame snapshots recorded so far
    pub fn frame_count(&self) -> usize {
        self.frames
    }
}

impl FrameSink for FrameRecorder {
    fn on_message(&mut self, msg: &FeedMsg) -> io::Result<()> {
        self.sink.on_message(msg)?;
        self.messages += 1;
        if matches!(msg, FeedMsg::Frame(_)) {
            self.frames += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.sink.finish()?;
        tracing::info!(
            "Recorded {} messages ({} frames) to {}",
            self.messages,
            self.frames,
            self.path.display()
        );
        Ok(())
    }
}

/// Forward feed messages to every sink until the match finishes or the
/// channel closes, then finish each sink.
///
/// A lagging receiver skips the messages it missed; frames are never replayed.
pub async fn pump(
    mut rx: broadcast::Receiver<FeedMsg>,
    sinks: &mut [Box<dyn FrameSink + Send>],
) -> io::Result<()> {
    loop {
        match rx.recv().await {
            Ok(msg) => {
                for sink in sinks.iter_mut() {
                    sink.on_message(&msg)?;
                }
                if matches!(msg, FeedMsg::Finished(_)) {
                    break;
                }
            }
            Err(RecvError::Lagged(n)) => {
                tracing::warn!("Feed consumer lagged, skipped {} messages", n);
            }
            Err(RecvError::Closed) => break,
        }
    }

    for sink in sinks.iter_mut() {
        sink.finish()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ScoreWire, SummaryMsg};

    fn finished(frames: u64) -> FeedMsg {
        FeedMsg::Finished(SummaryMsg {
            frames,
            score: ScoreWire { home: 2, away: 1 },
        })
    }

    #[test]
    fn json_lines_sink_writes_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.on_message(&finished(10)).unwrap();
        sink.on_message(&finished(11)).unwrap();
        sink.finish().unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "finished");
        assert_eq!(first["frames"], 10);
        assert_eq!(first["score"]["home"], 2);
    }

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("football-{}-{}.jsonl", tag, std::process::id()))
    }

    #[test]
    fn recorder_saves_to_disk() {
        let path = temp_path("rec");
        let mut recorder = FrameRecorder::create(&path).unwrap();
        recorder.on_message(&finished(5)).unwrap();
        assert_eq!(recorder.message_count(), 1);
        assert_eq!(recorder.frame_count(), 0);
        recorder.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let msg: FeedMsg = serde_json::from_str(text.trim()).unwrap();
        assert!(matches!(msg, FeedMsg::Finished(SummaryMsg { frames: 5, .. })));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn recorder_writes_through_before_finish() {
        let path = temp_path("stream");
        let mut recorder = FrameRecorder::create(&path).unwrap();
        for frame in 0..500 {
            recorder.on_message(&finished(frame)).unwrap();
        }
        // Only the write buffer is held back, not the whole match
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.matches('\n').count() >= 100);

        recorder.finish().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 500);
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn pump_stops_at_finished() {
        let (tx, rx) = broadcast::channel(16);
        tx.send(finished(1)).unwrap();
        tx.send(finished(2)).unwrap();

        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        struct Count(Arc<AtomicUsize>);
        impl FrameSink for Count {
            fn on_message(&mut self, _msg: &FeedMsg) -> io::Result<()> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let seen = Arc::new(AtomicUsize::new(0));
        let mut sinks: Vec<Box<dyn FrameSink + Send>> = vec![Box::new(Count(seen.clone()))];
        pump(rx, &mut sinks).await.unwrap();
        // The first message already finished the feed
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pump_ends_when_sender_drops() {
        let (tx, rx) = broadcast::channel::<FeedMsg>(4);
        drop(tx);
        let mut sinks: Vec<Box<dyn FrameSink + Send>> = Vec::new();
        pump(rx, &mut sinks).await.unwrap();
    }
}
