//! [apps/vanity-miner/src/coordinator.rs]
//!
//! The manager side: spawns workers, polls the shared counter array
//! once a second, tracks a moving-average throughput, computes match
//! probability and ETA, and renders a single in-place status line.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use vanity_core_pattern::table::PatternTable;

use crate::engine::{HitRecord, WorkerEngine, STEP};

const MOVING_WINDOW_LEN: usize = 8;
const HIT_CHANNEL_CAPACITY: usize = 64;

/// Cumulative match-probability milestones the status line reports ETA
/// against, walked in order as each is passed.
const ETA_TARGETS: [f64; 5] = [0.50, 0.75, 0.80, 0.90, 0.95];

pub struct Coordinator {
    pattern_table: Arc<PatternTable>,
    difficulty: f64,
    thread_count: usize,
    max_count: u64,
    keep_going: bool,
    quiet: bool,
}

pub struct Hit {
    pub private_key: [u8; 32],
    pub hash160: [u8; 20],
}

impl Coordinator {
    pub fn new(
        pattern_table: Arc<PatternTable>,
        difficulty: f64,
        thread_count: usize,
        max_count: u64,
        keep_going: bool,
        quiet: bool,
    ) -> Self {
        Self { pattern_table, difficulty, thread_count, max_count, keep_going, quiet }
    }

    /// Spawns `thread_count` workers and drives the status/termination
    /// loop until `max_count` verified hits have been produced (unless
    /// `keep_going`) or `stop_flag` is raised externally. Calls
    /// `on_hit` for every hit that survives re-derivation, in order.
    pub fn run(
        &self,
        stop_flag: Arc<AtomicBool>,
        mut on_hit: impl FnMut(Hit),
    ) -> Result<(), crate::errors::MinerError> {
        let counters: Vec<Arc<AtomicU64>> =
            (0..self.thread_count).map(|_| Arc::new(AtomicU64::new(0))).collect();
        let (hit_sender, hit_receiver) = sync_channel::<HitRecord>(HIT_CHANNEL_CAPACITY);

        let available_cpu_ids = core_affinity::get_core_ids().unwrap_or_default();
        let mut handles = Vec::with_capacity(self.thread_count);

        for worker_index in 0..self.thread_count {
            let pattern_table = Arc::clone(&self.pattern_table);
            let stop_flag = Arc::clone(&stop_flag);
            let counter = Arc::clone(&counters[worker_index]);
            let hit_sender = hit_sender.clone();
            let cpu_ids = available_cpu_ids.clone();

            let handle = thread::Builder::new()
                .name(format!("vanity-worker-{worker_index}"))
                .spawn(move || {
                    if !cpu_ids.is_empty() {
                        let target = cpu_ids[worker_index % cpu_ids.len()];
                        if !core_affinity::set_for_current(target) {
                            warn!(worker = worker_index, "CPU affinity pinning failed, continuing unpinned");
                        }
                    }
                    let engine = WorkerEngine::new(worker_index, pattern_table, stop_flag, counter, hit_sender);
                    engine.run();
                })
                .map_err(|_| crate::errors::MinerError::ThreadSpawnFailure)?;
            handles.push(handle);
        }
        drop(hit_sender);

        let mut total_hits: u64 = 0;
        let mut window: VecDeque<u64> = VecDeque::with_capacity(MOVING_WINDOW_LEN);
        let mut last_total: u64 = 0;
        let status = if self.quiet { None } else { Some(self.build_progress_bar()) };
        let mut last_tick = Instant::now();

        loop {
            if self.quiet {
                match hit_receiver.recv() {
                    Ok(record) => {
                        if self.handle_record(record, &mut on_hit) {
                            total_hits += 1;
                        }
                    }
                    Err(_) => break,
                }
            } else {
                match hit_receiver.recv_timeout(Duration::from_secs(1)) {
                    Ok(record) => {
                        if self.handle_record(record, &mut on_hit) {
                            total_hits += 1;
                        }
                    }
                    Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
                    Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }

            if last_tick.elapsed() >= Duration::from_secs(1) {
                last_tick = Instant::now();
                let current_total: u64 = counters.iter().map(|c| c.load(Ordering::Relaxed)).sum();
                let delta = current_total.saturating_sub(last_total);
                last_total = current_total;
                if window.len() == MOVING_WINDOW_LEN {
                    window.pop_front();
                }
                window.push_back(delta);

                if let Some(bar) = &status {
                    bar.set_message(self.format_status_line(current_total, total_hits, &window));
                }
            }

            if !self.keep_going && total_hits >= self.max_count {
                break;
            }
        }

        stop_flag.store(true, Ordering::SeqCst);
        if let Some(bar) = &status {
            bar.finish_and_clear();
        }
        for handle in handles {
            let _ = handle.join();
        }
        info!(total_hits, "search terminated");
        Ok(())
    }

    fn handle_record(&self, record: HitRecord, on_hit: &mut impl FnMut(Hit)) -> bool {
        let mut private_key = [0u8; 32];
        private_key.copy_from_slice(&record[..32]);
        let mut hash160 = [0u8; 20];
        hash160.copy_from_slice(&record[32..]);

        match crate::result::verify_hit(&private_key, &hash160) {
            Some(verified_hash) => {
                on_hit(Hit { private_key, hash160: verified_hash });
                true
            }
            None => {
                warn!("discarding hit record that failed re-verification");
                false
            }
        }
    }

    fn build_progress_bar(&self) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        bar
    }

    fn format_status_line(&self, total: u64, hits: u64, window: &VecDeque<u64>) -> String {
        let avg_rate = if window.is_empty() {
            0.0
        } else {
            window.iter().sum::<u64>() as f64 / window.len() as f64
        };
        let probability = 1.0 - (-(total as f64) / self.difficulty).exp();

        let eta_description = match ETA_TARGETS.iter().find(|&&target| probability < target) {
            Some(&target) if avg_rate > 0.0 => {
                let eta_seconds = eta_seconds_for_target(self.difficulty, total, avg_rate, target);
                format!("ETA({:.0}%) {}", target * 100.0, format_duration(eta_seconds))
            }
            Some(&target) => format!("ETA({:.0}%) n/a", target * 100.0),
            None => "ETA n/a".to_string(),
        };

        format!(
            "keys/s: {avg_rate:.0} | total: {total} | hits: {hits} | P(hit): {:.4} | {eta_description}",
            probability
        )
    }

    /// Exposed for the `-v` verbose startup dump; not used in the
    /// steady-state status line.
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn step_size() -> usize {
        STEP
    }
}

/// ETA (seconds) to reach cumulative match probability `target` given
/// the current `count` of attempts and an average throughput
/// `avg_rate` keys/sec, assuming attempts remain Poisson-distributed
/// with rate `1/difficulty`.
fn eta_seconds_for_target(difficulty: f64, count: u64, avg_rate: f64, target: f64) -> f64 {
    let target_count = -difficulty * (1.0 - target).ln();
    ((target_count - count as f64) / avg_rate).max(0.0)
}

fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "n/a".to_string();
    }
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eta_is_zero_once_target_count_already_reached() {
        let eta = eta_seconds_for_target(1000.0, 10_000, 100.0, 0.50);
        assert_eq!(eta, 0.0);
    }

    #[test]
    fn eta_shrinks_as_throughput_rises() {
        let slow = eta_seconds_for_target(1_000_000.0, 0, 100.0, 0.50);
        let fast = eta_seconds_for_target(1_000_000.0, 0, 1_000.0, 0.50);
        assert!(fast < slow);
    }

    #[test]
    fn duration_formats_as_hh_mm_ss() {
        assert_eq!(format_duration(3661.0), "01:01:01");
    }

    #[test]
    fn eta_target_advances_past_exceeded_milestones() {
        // count == difficulty puts probability at 1 - e^-1 ≈ 0.632, so 50%
        // is already behind us and the next milestone is 75%.
        let difficulty = 1000.0;
        let count = 1000u64;
        let probability = 1.0 - (-(count as f64) / difficulty).exp();
        let next_target = ETA_TARGETS.iter().find(|&&t| probability < t).copied();
        assert_eq!(next_target, Some(0.75));
    }

    #[test]
    fn eta_has_no_next_target_past_the_last_milestone() {
        let difficulty = 1000.0;
        let count = 5000u64; // probability ≈ 0.9933, past the last 95% milestone
        let probability = 1.0 - (-(count as f64) / difficulty).exp();
        let next_target = ETA_TARGETS.iter().find(|&&t| probability < t).copied();
        assert_eq!(next_target, None);
    }
}
