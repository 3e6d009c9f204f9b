//! Glue between the host game runtime and the FLIR camera.
//!
//! The host owns the frame loop. It registers per-frame tasks through a
//! [`FrameScheduler`], forwards chat commands to [`FlirSession::execute`],
//! and calls [`FlirSession::run_frame`] once per frame. Everything the
//! plugin needs from the game (raycasts, camera natives, HUD channel,
//! marker drawing) goes through [`HostBridge`].

pub mod bridge;
pub mod camera;
pub mod command;
pub mod hud;
pub mod input;
pub mod scheduler;
pub mod session;

pub use bridge::{CameraHandle, HostBridge};
pub use camera::{FlirCamera, Timecycle};
pub use command::{Command, CommandOutcome, TargetFix};
pub use hud::HudMessage;
pub use input::{FrameInput, ScrollInput};
pub use scheduler::{FrameHandle, FrameScheduler, FrameTask, SchedulerError, TaskRegistry};
pub use session::{FlirSession, SessionSettings};
