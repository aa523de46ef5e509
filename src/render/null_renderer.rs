use crate::error::GridResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content and keeps the last composited frame, so
/// tests can inspect paint order without rasterizing anything.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GridResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.layers.iter().map(|layer| layer.lines.len()).sum();
        self.last_circle_count = frame.layers.iter().map(|layer| layer.circles.len()).sum();
        self.last_text_count = frame.layers.iter().map(|layer| layer.texts.len()).sum();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
