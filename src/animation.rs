//! Host-driven animation through a list of offsets.
//!
//! [`OffsetAnimator`] walks the offsets in order, interpolating from one to
//! the next over a fixed number of frames and then holding for a pause. The
//! host calls [`OffsetAnimator::tick`] once per frame with the elapsed time
//! and applies the returned pose however it renders things. After the last
//! offset the animator wraps around to the first.

use std::time::Duration;

use nalgebra::UnitQuaternion;
use tracing::{trace, warn};

use crate::{
    error::{Error, Result},
    models::Pose,
    settings::AnimationSettings,
};

/// Interpolate two poses by their translation, rotation and scale parts.
///
/// Rotation uses normalised linear interpolation along the shorter arc.
pub fn interpolate(from: &Pose, to: &Pose, t: f64) -> Pose {
    let position = from.position().lerp(&to.position(), t);
    let scale = from.lossy_scale().lerp(&to.lossy_scale(), t);

    let a = from.rotation();
    let mut b = to.rotation();
    if a.coords.dot(&b.coords) < 0.0 {
        b = UnitQuaternion::new_unchecked(-b.into_inner());
    }
    Pose::from_trs(position, a.nlerp(&b, t), scale)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Next frame to emit, in `0..=frames`.
    Interpolating { frame: u32 },
    /// Holding on the target offset.
    Pausing { remaining: Duration },
}

/// State machine `{current_index, next_index, progress}` over a non-empty
/// offset list.
#[derive(Debug, Clone)]
pub struct OffsetAnimator {
    offsets: Vec<Pose>,
    settings: AnimationSettings,
    current: usize,
    phase: Phase,
    completed_legs: usize,
}

impl OffsetAnimator {
    pub fn new(offsets: Vec<Pose>, settings: AnimationSettings) -> Result<Self> {
        if offsets.is_empty() {
            warn!("no offsets to animate");
            return Err(Error::NothingToAnimate);
        }
        Ok(Self {
            offsets,
            settings,
            current: 0,
            phase: Phase::Interpolating { frame: 0 },
            completed_legs: 0,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.offsets.len()
    }

    /// Number of pauses that ran out, i.e. how often the animator moved on.
    pub fn completed_legs(&self) -> usize {
        self.completed_legs
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn offsets(&self) -> &[Pose] {
        &self.offsets
    }

    /// Interpolation parameter of the next frame, `1.0` while pausing.
    pub fn progress(&self) -> f64 {
        match self.phase {
            Phase::Interpolating { frame } => self.frame_progress(frame),
            Phase::Pausing { .. } => 1.0,
        }
    }

    fn frame_progress(&self, frame: u32) -> f64 {
        if self.settings.frames == 0 {
            1.0
        } else {
            f64::from(frame.min(self.settings.frames)) / f64::from(self.settings.frames)
        }
    }

    fn sample(&self, t: f64) -> Pose {
        interpolate(
            &self.offsets[self.current],
            &self.offsets[self.next_index()],
            t,
        )
    }

    /// Advance by one host frame that took `dt`, returning the pose to show.
    pub fn tick(&mut self, dt: Duration) -> Pose {
        let frame = match self.phase {
            Phase::Interpolating { frame } => frame,
            Phase::Pausing { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if !remaining.is_zero() {
                    self.phase = Phase::Pausing { remaining };
                    return self.sample(1.0);
                }
                self.current = self.next_index();
                self.completed_legs += 1;
                trace!(current = self.current, "pause elapsed");
                0
            }
        };

        let pose = self.sample(self.frame_progress(frame));
        self.phase = if frame >= self.settings.frames {
            Phase::Pausing {
                remaining: self.settings.pause,
            }
        } else {
            Phase::Interpolating { frame: frame + 1 }
        };
        pose
    }
}
