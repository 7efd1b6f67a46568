use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use yaniv::Event;

/// Writes the events of each game to a numbered JSON file.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    players: Vec<String>,
    events: Vec<RecordedEvent>,
}

#[derive(Serialize)]
struct RecordedEvent {
    round: u32,
    #[serde(flatten)]
    event: Event,
}

#[derive(Serialize)]
struct GameRecording<'a> {
    players: &'a [String],
    events: &'a [RecordedEvent],
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            players: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn start_game(&mut self, players: &[&str]) {
        self.players = players.iter().map(|name| String::from(*name)).collect();
        self.events.clear();
    }

    pub fn store_event(&mut self, round: u32, event: Event) {
        self.events.push(RecordedEvent { round, event });
    }

    pub fn write_game_recording(&mut self) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(filepath)?);
        let recording = GameRecording {
            players: &self.players,
            events: &self.events,
        };
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writeln!(writer)?;
        writer.flush()?;
        self.events.clear();
        self.num += 1;
        Ok(())
    }
}
