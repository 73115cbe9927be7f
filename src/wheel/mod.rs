//! Wheel spin engine core
//!
//! All selection logic lives here. This module must stay pure and host-agnostic:
//! - Virtual clock only (the host advances time)
//! - Injected randomness only
//! - No rendering, audio or platform dependencies

pub mod option;
pub mod palette;
pub mod resolve;
pub mod sector;
pub mod state;
pub mod tick;
pub mod timer;

pub use option::WheelOption;
pub use palette::{PALETTE, SectorColor};
pub use resolve::{resolve, resolve_index};
pub use sector::{Sector, WheelGeometry, build_sectors, label_limit, truncate_label};
pub use state::{SpinEvent, SpinPhase, SpinSession};
pub use tick::{SpinSource, advance, request_spin};
pub use timer::{Timer, TimerKind, Timers};
