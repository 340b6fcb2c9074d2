//! # Profiler — Per-Process Timing History
//!
//! The game loop registers one [`Process`] per running script, keyed
//! `"<script>-on-<object>"`, and records how long each `update` call took.
//! Each process keeps a bounded history of samples; the oldest sample drops
//! off when the history is full.
//!
//! [`Profiler::snapshot`] produces a serializable summary for tooling. With
//! `serde_json` it becomes a single JSON document:
//!
//! ```text
//! {"frame_count":120,"processes":[{"name":"Mover-on-player",
//!   "samples":100,"last_us":12.0,"average_us":10.4,"max_us":31.0}]}
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;

/// Default number of samples kept per process.
pub const DEFAULT_HISTORY: usize = 100;

/// A named series of timing samples, in microseconds.
#[derive(Debug, Clone)]
pub struct Process {
    name: String,
    samples: VecDeque<f64>,
}

impl Process {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            samples: VecDeque::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn last_us(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn average_us(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn max_us(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }
}

/// Timing registry for the running play session.
#[derive(Debug, Clone)]
pub struct Profiler {
    history: usize,
    processes: Vec<Process>,
    frame_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfilerSnapshot {
    pub frame_count: u64,
    pub processes: Vec<ProcessSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessSnapshot {
    pub name: String,
    pub samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_us: Option<f64>,
    pub average_us: f64,
    pub max_us: f64,
}

impl Profiler {
    /// A profiler keeping up to `history` samples per process (at least one).
    pub fn new(history: usize) -> Self {
        Self {
            history: history.max(1),
            processes: Vec::new(),
            frame_count: 0,
        }
    }

    pub fn history(&self) -> usize {
        self.history
    }

    /// Register a process. Returns `false` if the name is already taken.
    pub fn add_process(&mut self, name: &str) -> bool {
        if self.process(name).is_some() {
            log::debug!("Profiler process '{name}' already registered");
            return false;
        }
        self.processes.push(Process::new(name));
        true
    }

    /// Returns `false` if no process had that name.
    pub fn remove_process(&mut self, name: &str) -> bool {
        let before = self.processes.len();
        self.processes.retain(|p| p.name != name);
        self.processes.len() != before
    }

    /// Record one timing sample. Samples for unknown processes are dropped
    /// and `false` is returned.
    pub fn add_sample(&mut self, name: &str, elapsed: Duration) -> bool {
        let history = self.history;
        let Some(process) = self.processes.iter_mut().find(|p| p.name == name) else {
            return false;
        };
        if process.samples.len() == history {
            process.samples.pop_front();
        }
        process.samples.push_back(elapsed.as_nanos() as f64 / 1000.0);
        true
    }

    pub fn record_frame(&mut self) {
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }

    /// Processes in registration order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn clear(&mut self) {
        self.processes.clear();
        self.frame_count = 0;
    }

    pub fn snapshot(&self) -> ProfilerSnapshot {
        ProfilerSnapshot {
            frame_count: self.frame_count,
            processes: self
                .processes
                .iter()
                .map(|p| ProcessSnapshot {
                    name: p.name.clone(),
                    samples: p.sample_count(),
                    last_us: p.last_us(),
                    average_us: p.average_us(),
                    max_us: p.max_us(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}
