use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use crate::catalog::{Catalog, Track};

use super::sink::{create_sink_at, probe_duration};
use super::types::{AudioCmd, AudioEvent, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    catalog: Catalog,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    events: Sender<AudioEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        // Track currently loaded (or whose load was last attempted).
        let mut current: Option<Track> = None;
        let mut sink: Option<Sink> = None;
        let mut paused = true;
        let mut volume: f32 = 0.5;

        // Spawn a ticker thread to update playback_info.elapsed periodically.
        let info_for_ticker = playback_info.clone();
        thread::spawn(move || loop {
            thread::sleep(Duration::from_millis(500));
            let mut info = info_for_ticker.lock().unwrap();
            if info.playing {
                info.elapsed += Duration::from_millis(500);
            }
        });

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(1.0 - t);
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load(id) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        paused = true;

                        let Some(track) = catalog.get(id).cloned() else {
                            continue;
                        };

                        match create_sink_at(&stream, &track, Duration::ZERO) {
                            Ok((new_sink, total)) => {
                                new_sink.set_volume(volume);
                                // Prefer the decoder's duration, fall back to the tags.
                                let duration = total.or_else(|| probe_duration(&track.source));
                                if let Some(duration) = duration {
                                    let _ = events.send(AudioEvent::DurationKnown {
                                        track: id,
                                        duration,
                                    });
                                }
                                sink = Some(new_sink);
                            }
                            Err(_) => {
                                let _ = events.send(AudioEvent::LoadFailed { track: id });
                            }
                        }

                        current = Some(track);
                        if let Ok(mut info) = playback_info.lock() {
                            info.track = Some(id);
                            info.elapsed = Duration::ZERO;
                            info.playing = false;
                        }
                    }

                    AudioCmd::Play => {
                        // No sink (nothing loaded, or the load failed): ignore.
                        if let Some(ref s) = sink {
                            s.play();
                            paused = false;
                            if let Ok(mut info) = playback_info.lock() {
                                info.playing = true;
                            }
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            s.pause();
                            paused = true;
                            if let Ok(mut info) = playback_info.lock() {
                                info.playing = false;
                            }
                        }
                    }

                    AudioCmd::SeekTo(pos) => {
                        // Scrubbing: rebuild the sink and skip into the file.
                        // This uses `Source::skip_duration` (works for common formats).
                        let Some(ref track) = current else {
                            continue;
                        };
                        if let Some(s) = sink.take() {
                            s.stop();
                        }

                        match create_sink_at(&stream, track, pos) {
                            Ok((new_sink, _)) => {
                                new_sink.set_volume(volume);
                                if !paused {
                                    new_sink.play();
                                }
                                sink = Some(new_sink);
                                if let Ok(mut info) = playback_info.lock() {
                                    info.elapsed = pos;
                                }
                            }
                            Err(_) => {
                                paused = true;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                                let _ = events.send(AudioEvent::LoadFailed { track: track.id });
                            }
                        }
                    }

                    AudioCmd::SetVolume(v) => {
                        volume = v.clamp(0.0, 1.0);
                        if let Some(ref s) = sink {
                            s.set_volume(volume);
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            // Fade out gently before stopping.
                            fade_out_sink(s, fade_out_ms);
                            s.stop();
                        }
                        // Update shared state so UI/MPRIS don't keep showing Playing.
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic end-of-track check. The state machine decides
                    // what plays next; this thread only reports the end.
                    let drained = sink.as_ref().is_some_and(|s| !paused && s.empty());
                    if drained {
                        sink = None;
                        paused = true;
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        if let Some(ref track) = current {
                            let _ = events.send(AudioEvent::Ended { track: track.id });
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
