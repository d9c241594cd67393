//! Optional feedback display.
//!
//! Rendering is outside the core: the loop hands each frame's outcome to a
//! [`Renderer`] and only asks it whether the user wants to quit.

use crate::{
    action::ActionClass,
    config::DisplayConfig,
    mode::Mode,
    observation::{Handedness, Landmark},
    pipeline::FrameOutcome,
    pose::FingerState,
    Result,
};
#[cfg(not(feature = "preview"))]
use log::warn;

/// Whether the loop should keep going after this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderControl {
    Continue,
    Quit,
}

/// What a renderer gets to see of one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub frame_index: u64,
    /// Frame size in pixels
    pub frame_size: (u32, u32),
    /// Landmark pixels of the tracked hand, empty when there is none
    pub landmarks: &'a [Landmark],
    /// Pipeline outcome, `None` when there was no usable hand
    pub outcome: Option<&'a FrameOutcome>,
}

impl FrameView<'_> {
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        self.outcome.map(|o| o.mode)
    }

    #[must_use]
    pub fn handedness(&self) -> Option<Handedness> {
        self.outcome.map(|o| o.handedness)
    }

    #[must_use]
    pub fn fingers(&self) -> Option<FingerState> {
        self.outcome.map(|o| o.pose.fingers)
    }

    #[must_use]
    pub fn pinch_percent(&self) -> Option<f64> {
        self.outcome.and_then(|o| o.classification.volume_percent())
    }

    #[must_use]
    pub fn emitted(&self) -> Option<ActionClass> {
        self.outcome.and_then(|o| o.emitted)
    }

    /// Banner text, e.g. `MODE: MEDIA (Left)`
    #[must_use]
    pub fn banner(&self) -> Option<String> {
        self.outcome.map(|o| format!("MODE: {} ({})", o.mode, o.handedness))
    }
}

/// A sink for per-frame feedback
pub trait Renderer {
    /// Show one frame
    ///
    /// # Errors
    ///
    /// Returns `Error::Render` if drawing failed; the loop logs it and carries on
    fn render(&mut self, view: &FrameView<'_>) -> Result<RenderControl>;
}

/// Headless renderer that never asks to quit
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &FrameView<'_>) -> Result<RenderControl> {
        Ok(RenderControl::Continue)
    }
}

/// Create the renderer asked for by the display configuration
///
/// # Errors
///
/// Returns `Error::Render` if the preview window cannot be opened
pub fn create_renderer(config: &DisplayConfig) -> Result<Box<dyn Renderer>> {
    if !config.gui {
        return Ok(Box::new(NullRenderer));
    }

    #[cfg(feature = "preview")]
    {
        Ok(Box::new(PreviewWindow::new(&config.window_title)?))
    }

    #[cfg(not(feature = "preview"))]
    {
        warn!("Built without the `preview` feature; running headless");
        Ok(Box::new(NullRenderer))
    }
}

#[cfg(feature = "preview")]
pub use preview::PreviewWindow;

#[cfg(feature = "preview")]
mod preview {
    use super::{FrameView, RenderControl, Renderer};
    use crate::{constants::landmarks::CONNECTIONS, mode::Mode, utils::f64_to_i32, Error, Result};
    use log::info;
    use opencv::{
        core::{Mat, Point, Rect, Scalar, CV_8UC3},
        highgui::{self, WINDOW_NORMAL},
        imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
        prelude::*,
    };

    const KEY_ESC: i32 = 27;

    fn to_px(v: u32) -> Result<i32> {
        i32::try_from(v).map_err(|_| Error::Render(format!("Frame dimension {v} too large")))
    }

    fn green() -> Scalar {
        Scalar::new(0.0, 255.0, 0.0, 0.0)
    }

    fn magenta() -> Scalar {
        Scalar::new(255.0, 0.0, 255.0, 0.0)
    }

    /// OpenCV highgui window drawing the tracked hand and current mode
    pub struct PreviewWindow {
        title: String,
    }

    impl PreviewWindow {
        /// Open the preview window
        ///
        /// # Errors
        ///
        /// Returns `Error::Render` if the window cannot be created
        pub fn new(title: &str) -> Result<Self> {
            highgui::named_window(title, WINDOW_NORMAL)?;
            info!("Preview window opened: {}", title);
            Ok(Self {
                title: title.to_string(),
            })
        }

        fn draw(&self, canvas: &mut Mat, view: &FrameView<'_>) -> Result<()> {
            let point = |id: usize| -> Result<Option<Point>> {
                match view.landmarks.get(id) {
                    Some(lm) => Ok(Some(Point::new(f64_to_i32(lm.x)?, f64_to_i32(lm.y)?))),
                    None => Ok(None),
                }
            };

            for &(a, b) in &CONNECTIONS {
                if let (Some(pa), Some(pb)) = (point(a)?, point(b)?) {
                    imgproc::line(canvas, pa, pb, Scalar::new(200.0, 200.0, 200.0, 0.0), 2, LINE_8, 0)?;
                }
            }
            for id in 0..view.landmarks.len() {
                if let Some(p) = point(id)? {
                    imgproc::circle(canvas, p, 4, Scalar::new(0.0, 0.0, 255.0, 0.0), -1, LINE_8, 0)?;
                }
            }

            if view.mode() == Some(Mode::Volume) {
                use crate::constants::landmarks::{INDEX_FINGER_TIP, THUMB_TIP};
                if let (Some(thumb), Some(index)) = (point(THUMB_TIP)?, point(INDEX_FINGER_TIP)?) {
                    imgproc::line(canvas, thumb, index, magenta(), 3, LINE_8, 0)?;
                }
                if let Some(percent) = view.pinch_percent() {
                    self.draw_volume_bar(canvas, percent)?;
                }
            }

            if let Some(banner) = view.banner() {
                imgproc::put_text(
                    canvas,
                    &banner,
                    Point::new(10, 30),
                    FONT_HERSHEY_SIMPLEX,
                    0.8,
                    green(),
                    2,
                    LINE_8,
                    false,
                )?;
            }
            if let Some(action) = view.emitted() {
                imgproc::put_text(
                    canvas,
                    &format!("Action: {}", action.label()),
                    Point::new(10, 60),
                    FONT_HERSHEY_SIMPLEX,
                    0.7,
                    magenta(),
                    2,
                    LINE_8,
                    false,
                )?;
            }
            Ok(())
        }

        fn draw_volume_bar(&self, canvas: &mut Mat, percent: f64) -> Result<()> {
            let (left, top, width, height) = (50, 150, 35, 250);
            imgproc::rectangle(canvas, Rect::new(left, top, width, height), green(), 2, LINE_8, 0)?;

            let filled = f64_to_i32(f64::from(height) * percent / 100.0)?;
            imgproc::rectangle(
                canvas,
                Rect::new(left, top + height - filled, width, filled),
                green(),
                -1,
                LINE_8,
                0,
            )?;
            imgproc::put_text(
                canvas,
                &format!("{percent:.0}%"),
                Point::new(left - 10, top + height + 40),
                FONT_HERSHEY_SIMPLEX,
                0.8,
                green(),
                2,
                LINE_8,
                false,
            )?;
            Ok(())
        }
    }

    impl Renderer for PreviewWindow {
        fn render(&mut self, view: &FrameView<'_>) -> Result<RenderControl> {
            let (w, h) = view.frame_size;
            let mut canvas = Mat::zeros(to_px(h)?, to_px(w)?, CV_8UC3)?.to_mat()?;

            self.draw(&mut canvas, view)?;
            highgui::imshow(&self.title, &canvas)?;

            let key = highgui::wait_key(1)?;
            if key == KEY_ESC || key == i32::from(b'q') {
                info!("Exit requested by user");
                return Ok(RenderControl::Quit);
            }
            Ok(RenderControl::Continue)
        }
    }

    impl Drop for PreviewWindow {
        fn drop(&mut self) {
            let _ = highgui::destroy_window(&self.title);
        }
    }
}
