use tracing::debug;

use super::{CaptureSource, CaptureStep, RenderCapturer, SessionState};

impl<S: CaptureSource> RenderCapturer<S> {
    /// Start the multi-tick preparation protocol and run its first step.
    ///
    /// Only valid while [`SessionState::Idle`]; beginning again before
    /// [`end_capture`](Self::end_capture) is a caller error, asserted in
    /// debug builds. Drive [`step`](Self::step) once per tick until it
    /// reports [`CaptureStep::Ready`]; only then may the render target be
    /// read. The sequence may be abandoned between steps without any
    /// signal; [`end_capture`](Self::end_capture) is the cleanup path
    /// from every state.
    pub fn begin_capture(&mut self, device: &mut S::Device) -> Result<CaptureStep, S::Error> {
        debug_assert!(
            self.state == SessionState::Idle,
            "begin_capture is not restartable; call end_capture first"
        );

        let target = self
            .source
            .update_render_target(device, self.target.take())?;
        self.target = Some(target);
        self.state = SessionState::Preparing;

        self.step(device)
    }

    /// Advance the preparation protocol by one step.
    ///
    /// [`CaptureStep::Ready`] is sticky once reached. Stepping a capturer
    /// that never began is a caller error and reports
    /// [`CaptureStep::Pending`].
    pub fn step(&mut self, device: &mut S::Device) -> Result<CaptureStep, S::Error> {
        match self.state {
            SessionState::Idle => Ok(CaptureStep::Pending),

            SessionState::Preparing => {
                let Some(target) = self.target.as_ref() else {
                    return Ok(CaptureStep::Pending);
                };

                let step = self.source.begin_step(device, target)?;
                if step == CaptureStep::Ready {
                    debug!("Render target {:?} is ready", target.id());
                    self.state = SessionState::Ready;
                }

                Ok(step)
            }

            SessionState::Ready => Ok(CaptureStep::Ready),
        }
    }
}
