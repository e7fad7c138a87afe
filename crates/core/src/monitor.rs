use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::warn;

use crate::error::Result;
use crate::model::{UsageSample, VolumeUsage};
use crate::volume::volume_usage;

/// How often the cancel flag is re-checked while waiting out an interval.
const CANCEL_POLL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Time between capacity samples.
    pub interval: Duration,
    /// A sample with `percent_used` strictly above this flags
    /// `threshold_exceeded`.
    pub threshold_percent: f64,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            threshold_percent: 90.0,
        }
    }
}

/// Poll volume capacity until `cancel` is set.
///
/// Each tick queries `probe` and hands the resulting [`UsageSample`] to
/// `on_sample`; what a sample means (render, log, alert) is the caller's
/// concern. A failing probe logs a warning and skips that tick without
/// stopping the loop. The flag is checked before every tick and during the
/// inter-tick wait, so cancellation latency is bounded by one interval and
/// no sample is emitted after the flag is observed. Returns once stopped;
/// each run is independent and keeps no state.
pub fn run_monitor<P, F>(
    mut probe: P,
    options: &MonitorOptions,
    cancel: &AtomicBool,
    mut on_sample: F,
) where
    P: FnMut() -> Result<VolumeUsage>,
    F: FnMut(UsageSample),
{
    while !cancel.load(Ordering::Relaxed) {
        match probe() {
            Ok(usage) => on_sample(UsageSample {
                percent_used: usage.percent_used,
                threshold_exceeded: usage.percent_used > options.threshold_percent,
            }),
            Err(err) => warn!("capacity probe failed, tick skipped: {err}"),
        }

        let mut waited = Duration::ZERO;
        while waited < options.interval {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let slice = CANCEL_POLL.min(options.interval - waited);
            std::thread::sleep(slice);
            waited += slice;
        }
    }
}

/// [`run_monitor`] backed by the live capacity of the volume at `mount`.
pub fn run_volume_monitor<F>(
    mount: &str,
    options: &MonitorOptions,
    cancel: &AtomicBool,
    on_sample: F,
) where
    F: FnMut(UsageSample),
{
    run_monitor(|| volume_usage(mount), options, cancel, on_sample);
}
