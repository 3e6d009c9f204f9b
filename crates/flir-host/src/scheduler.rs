//! Per-frame task registration.
//!
//! The host calls registered tasks once per frame in [`FrameTask`] order,
//! so input-driven pose changes always land before that frame's raycast.

use rustc_hash::FxHashMap;

/// Work the camera needs done every frame.
///
/// Declaration order is execution order within a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameTask {
    /// Zoom scroll input.
    Controls,
    /// Look axis input.
    Rotation,
    /// Zoom easing.
    Zoom,
    /// Hide host HUD elements while viewing through the camera.
    Overlay,
    /// Ground sampling and telemetry refresh.
    Telemetry,
    /// Draw the tracked ground point.
    Marker,
}

impl FrameTask {
    /// Whether this task changes the camera pose.
    pub fn updates_pose(self) -> bool {
        matches!(self, FrameTask::Controls | FrameTask::Rotation | FrameTask::Zoom)
    }
}

/// Handle returned by [`FrameScheduler::register_per_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Errors raised while (un)registering per-frame tasks.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// The task already has a live registration.
    #[error("frame task {0:?} is already registered")]
    AlreadyRegistered(FrameTask),
    /// The handle is unknown or was already unregistered.
    #[error("unknown frame handle {0:?}")]
    UnknownHandle(FrameHandle),
    /// The host refuses further registrations.
    #[error("scheduler full ({0} tasks)")]
    CapacityExceeded(usize),
}

/// Capability to run tasks every frame.
pub trait FrameScheduler {
    /// Start running `task` every frame.
    fn register_per_frame(&mut self, task: FrameTask) -> Result<FrameHandle, SchedulerError>;

    /// Stop running the task behind `handle`.
    fn unregister(&mut self, handle: FrameHandle) -> Result<(), SchedulerError>;

    /// Registered tasks in execution order.
    fn active_tasks(&self) -> Vec<FrameTask>;
}

/// In-process [`FrameScheduler`] backed by a handle map.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: FxHashMap<FrameHandle, FrameTask>,
    next_id: u32,
    capacity: Option<usize>,
}

impl TaskRegistry {
    /// Create an unbounded registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that rejects registrations past `capacity`.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl FrameScheduler for TaskRegistry {
    fn register_per_frame(&mut self, task: FrameTask) -> Result<FrameHandle, SchedulerError> {
        if self.tasks.values().any(|t| *t == task) {
            return Err(SchedulerError::AlreadyRegistered(task));
        }
        if let Some(capacity) = self.capacity
            && self.tasks.len() >= capacity
        {
            return Err(SchedulerError::CapacityExceeded(capacity));
        }
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.tasks.insert(handle, task);
        Ok(handle)
    }

    fn unregister(&mut self, handle: FrameHandle) -> Result<(), SchedulerError> {
        self.tasks
            .remove(&handle)
            .map(|_| ())
            .ok_or(SchedulerError::UnknownHandle(handle))
    }

    fn active_tasks(&self) -> Vec<FrameTask> {
        let mut tasks: Vec<FrameTask> = self.tasks.values().copied().collect();
        tasks.sort();
        tasks
    }
}
