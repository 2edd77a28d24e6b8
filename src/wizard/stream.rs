// ABOUTME: Stream-of-thought step state machine
// Time-boxed free-association capture with tagged optimistic entries and a
// serialized append queue

use crate::models::WantsDraft;
use std::collections::VecDeque;

/// Lifecycle of the stream stage on this client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    NotStarted,
    Active,
    Finished,
}

/// Persistence status of one locally displayed entry.
///
/// Entries are shown immediately on submit (optimistic) and tagged instead of
/// silently kept: a failed append stays visible with a retry affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone)]
pub struct StreamEntry {
    pub id: u64,
    pub text: String,
    pub status: EntryStatus,
}

/// What a one-second tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    Idle,
    Running(u32),
    Expired,
}

/// Strict one-per-second countdown. Expiry fires exactly once; later ticks
/// are inert.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    remaining: u32,
    running: bool,
    expiry_fired: bool,
}

impl CountdownTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            running: false,
            expiry_fired: false,
        }
    }

    pub fn start(&mut self) {
        if self.remaining > 0 {
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one second. Returns `Expired` exactly once, on the tick that
    /// reaches zero.
    pub fn tick_second(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            if self.expiry_fired {
                TimerTick::Idle
            } else {
                self.expiry_fired = true;
                TimerTick::Expired
            }
        } else {
            TimerTick::Running(self.remaining)
        }
    }

    /// `m:ss` display format
    pub fn format(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[derive(Debug)]
pub struct StreamState {
    pub phase: StreamPhase,
    pub timer: CountdownTimer,
    pub input: String,
    pub entries: Vec<StreamEntry>,
    next_entry_id: u64,
    /// Entry ids waiting to be appended, in submission order. At most one
    /// append request is on the wire at a time so server-side concatenation
    /// order matches what the user typed.
    queue: VecDeque<u64>,
    pub starting: bool,
    pub finishing: bool,
    finish_requested: bool,
}

impl StreamState {
    pub fn new() -> Self {
        Self {
            phase: StreamPhase::NotStarted,
            timer: CountdownTimer::new(600),
            input: String::new(),
            entries: Vec::new(),
            next_entry_id: 1,
            queue: VecDeque::new(),
            starting: false,
            finishing: false,
            finish_requested: false,
        }
    }

    /// Rebuild from a loaded draft. A stage that was started but never
    /// finished resumes directly into Active with the stored timer budget
    /// (the backend does not track elapsed time).
    pub fn from_draft(draft: &WantsDraft) -> Self {
        let mut state = Self::new();
        state.timer = CountdownTimer::new(draft.stream_timer_seconds);

        let mut next_id = 1u64;
        state.entries = draft
            .stream_lines()
            .into_iter()
            .map(|text| {
                let entry = StreamEntry {
                    id: next_id,
                    text,
                    status: EntryStatus::Confirmed,
                };
                next_id += 1;
                entry
            })
            .collect();
        state.next_entry_id = next_id;

        if draft.stream_completed_at.is_some() {
            state.phase = StreamPhase::Finished;
        } else if draft.stream_in_progress() {
            state.phase = StreamPhase::Active;
            state.timer.start();
        }
        state
    }

    /// The start endpoint confirmed; the timer budget is server-authoritative.
    pub fn started(&mut self, timer_seconds: u32) {
        self.starting = false;
        self.phase = StreamPhase::Active;
        self.timer = CountdownTimer::new(timer_seconds);
        self.timer.start();
    }

    pub fn start_failed(&mut self) {
        self.starting = false;
    }

    /// Take the current input as a new optimistic entry and queue it for
    /// appending. Blank input is ignored.
    pub fn submit_line(&mut self) -> Option<u64> {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.phase != StreamPhase::Active {
            return None;
        }
        self.input.clear();

        let id = self.next_entry_id;
        self.next_entry_id += 1;
        self.entries.push(StreamEntry {
            id,
            text,
            status: EntryStatus::Pending,
        });
        self.queue.push_back(id);
        Some(id)
    }

    /// Next queued entry to send, in submission order
    pub fn next_queued(&mut self) -> Option<(u64, String)> {
        let id = self.queue.pop_front()?;
        let text = self
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.text.clone())?;
        Some((id, text))
    }

    pub fn has_queued(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn append_confirmed(&mut self, id: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.status = EntryStatus::Confirmed;
        }
    }

    pub fn append_failed(&mut self, id: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.status = EntryStatus::Failed;
        }
    }

    /// Re-queue the oldest failed entry, if any. Returns its id.
    pub fn retry_failed(&mut self) -> Option<u64> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.status == EntryStatus::Failed)?;
        entry.status = EntryStatus::Pending;
        let id = entry.id;
        self.queue.push_back(id);
        Some(id)
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status == EntryStatus::Failed)
            .count()
    }

    /// Advance the countdown by one second. Expiry requests the finish path,
    /// once.
    pub fn tick_second(&mut self) -> TimerTick {
        if self.phase != StreamPhase::Active {
            return TimerTick::Idle;
        }
        self.timer.tick_second()
    }

    /// Claim the finish action (explicit key or timer expiry). True means a
    /// finish request should be issued; repeated triggers are inert.
    pub fn request_finish(&mut self) -> bool {
        if self.phase != StreamPhase::Active || self.finishing || self.finish_requested {
            return false;
        }
        self.finish_requested = true;
        self.finishing = true;
        true
    }

    pub fn finish_confirmed(&mut self) {
        self.finishing = false;
        self.phase = StreamPhase::Finished;
        self.timer.stop();
    }

    pub fn finish_failed(&mut self) {
        // Re-enable the finish control so the user can retry
        self.finishing = false;
        self.finish_requested = false;
    }

    /// Carry over entries a previous state never got confirmed. Called when
    /// a refresh rebuilds the stream from the server draft, so locally
    /// submitted lines are not dropped: each one is re-queued and sent again
    /// by the append pump.
    pub fn adopt_unconfirmed(&mut self, previous: &StreamState) {
        for entry in previous
            .entries
            .iter()
            .filter(|entry| entry.status != EntryStatus::Confirmed)
        {
            let id = self.next_entry_id;
            self.next_entry_id += 1;
            self.entries.push(StreamEntry {
                id,
                text: entry.text.clone(),
                status: EntryStatus::Pending,
            });
            self.queue.push_back(id);
        }
    }

    /// The append response said the server closed the stage on its own
    /// criteria.
    pub fn server_completed(&mut self) {
        self.phase = StreamPhase::Finished;
        self.timer.stop();
        self.queue.clear();
    }
}

impl Default for StreamState {
    fn default() -> Self {
        Self::new()
    }
}
