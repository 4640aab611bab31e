//! slotwatch-monitor — the check loop.
//!
//! # Architecture
//!
//! ```text
//! CheckLoop::run()
//!   └── per tick
//!       ├── Browser::fetch_observation() → Observation   (cancellable)
//!       ├── PageRules::classify() → Outcome
//!       ├── NotifyThrottle (consecutive successes, suppression episode)
//!       ├── NotificationSink::notify() / call_endpoint()
//!       └── sleep(interval) or shutdown
//! ```
//!
//! Checks are strictly sequential. The throttle is owned by the loop and
//! only touched between await points, so cancellation never leaves it half
//! updated.

pub mod check_loop;

pub use check_loop::{CheckLoop, LoopState, TickReport};
