use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use pizza_delivery::{Cell, Team};
use serde::{Deserialize, Serialize};

/// Writes one JSON file per game into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    steps: Vec<Step>,
}

/// One question of a game, and the move that followed a correct answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub team: Team,
    pub question_index: usize,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target: Option<Cell>,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub new_obstacle: Option<Cell>,
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub steps: Vec<Step>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            steps: Vec::new(),
        })
    }

    pub fn store_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Writes out the steps stored since the last call.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        let recording = GameRecording {
            steps: std::mem::take(&mut self.steps),
        };
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}
