use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::catalog::{Catalog, TrackId};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, PlaybackHandle, PlaybackInfo, Transport};

/// Front-end of the audio thread: owns the command channel, the shared
/// playback info and the notification receiver.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    events: Receiver<AudioEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(catalog: Catalog) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<AudioEvent>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(catalog, rx, playback_info.clone(), event_tx);

        Self {
            tx,
            playback: playback_info,
            events: event_rx,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    /// Clonable command handle implementing `Transport` for the state machine.
    pub fn transport(&self) -> AudioHandle {
        AudioHandle {
            tx: self.tx.clone(),
        }
    }

    /// Drain one pending backend notification, if any.
    pub fn try_recv_event(&self) -> Option<AudioEvent> {
        self.events.try_recv().ok()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

/// Cheap clonable handle that forwards transport commands to the audio thread.
#[derive(Clone)]
pub struct AudioHandle {
    tx: Sender<AudioCmd>,
}

impl Transport for AudioHandle {
    fn load(&self, track: TrackId) {
        let _ = self.tx.send(AudioCmd::Load(track));
    }

    fn play(&self) {
        let _ = self.tx.send(AudioCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(AudioCmd::Pause);
    }

    fn seek_to(&self, position: Duration) {
        let _ = self.tx.send(AudioCmd::SeekTo(position));
    }

    fn set_volume(&self, volume: f32) {
        let _ = self.tx.send(AudioCmd::SetVolume(volume));
    }
}
