//! Upload widget state machine.
//!
//! The widget's state lives in a single tagged value with explicit
//! transition handling, instead of scattered flags. Drag-enter/leave is
//! reference-counted because a container with nested children fires an
//! enter/leave pair every time the pointer crosses a child boundary.

use pydrop_core::models::FileResponse;
use pydrop_core::validation::validate_source_file;

/// Current widget state. `Idle` is the initial state and every outcome is
/// user-resettable back to it.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    Dragging,
    Uploading { progress: u8 },
    Success { file: FileResponse },
    Error { message: String },
}

impl UploadState {
    pub fn is_idle(&self) -> bool {
        matches!(self, UploadState::Idle)
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading { .. })
    }

    pub fn progress(&self) -> Option<u8> {
        match self {
            UploadState::Uploading { progress } => Some(*progress),
            _ => None,
        }
    }
}

/// Events the widget reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    DragEnter,
    DragLeave,
    /// File dropped onto the widget; carries name and size for local
    /// validation.
    Drop { file_name: String, size_bytes: u64 },
    /// File chosen through the picker.
    Select { file_name: String, size_bytes: u64 },
    /// Transfer progress, 0-100.
    Progress(u8),
    Completed(FileResponse),
    Failed { message: String },
    /// Explicit "try again" / "upload another file".
    Reset,
}

/// Drives [`UploadState`] transitions from [`UploadEvent`]s.
///
/// Transitions the machine does not define (e.g. `Progress` while idle,
/// stray `DragLeave`) are ignored rather than panicking; late transfer
/// events after a `Reset` simply have no effect.
#[derive(Debug, Clone)]
pub struct UploadStateMachine {
    state: UploadState,
    drag_depth: u32,
}

impl Default for UploadStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadStateMachine {
    pub fn new() -> Self {
        Self {
            state: UploadState::Idle,
            drag_depth: 0,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Apply one event and return the resulting state.
    pub fn apply(&mut self, event: UploadEvent) -> &UploadState {
        match event {
            UploadEvent::DragEnter => {
                self.drag_depth += 1;
                // Only the first enter changes state, and never while a
                // transfer is in flight.
                if self.drag_depth == 1 && self.state.is_idle() {
                    self.state = UploadState::Dragging;
                }
            }
            UploadEvent::DragLeave => {
                self.drag_depth = self.drag_depth.saturating_sub(1);
                if self.drag_depth == 0 && self.state == UploadState::Dragging {
                    self.state = UploadState::Idle;
                }
            }
            UploadEvent::Drop {
                file_name,
                size_bytes,
            } => {
                self.drag_depth = 0;
                self.begin_upload(&file_name, size_bytes);
            }
            UploadEvent::Select {
                file_name,
                size_bytes,
            } => {
                self.begin_upload(&file_name, size_bytes);
            }
            UploadEvent::Progress(percent) => {
                if let UploadState::Uploading { progress } = &self.state {
                    // Progress never moves backwards.
                    let next = percent.min(100).max(*progress);
                    self.state = UploadState::Uploading { progress: next };
                }
            }
            UploadEvent::Completed(file) => {
                if self.state.is_uploading() {
                    self.state = UploadState::Success { file };
                }
            }
            UploadEvent::Failed { message } => {
                if self.state.is_uploading() {
                    self.state = UploadState::Error { message };
                }
            }
            UploadEvent::Reset => {
                self.drag_depth = 0;
                self.state = UploadState::Idle;
            }
        }
        &self.state
    }

    /// Local validation first; a transfer only starts for a file that
    /// passes. Rejections go straight to `Error` with no network call.
    fn begin_upload(&mut self, file_name: &str, size_bytes: u64) {
        if self.state.is_uploading() {
            return;
        }
        match validate_source_file(file_name, size_bytes) {
            Ok(()) => {
                self.state = UploadState::Uploading { progress: 0 };
            }
            Err(err) => {
                self.state = UploadState::Error {
                    message: err.to_string(),
                };
            }
        }
    }
}
