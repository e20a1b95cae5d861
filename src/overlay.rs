/// Overlay composition
///
/// Selects the frame's annotations: goal-rectangle outlines and ball markers
/// are drawn directly into the pixel buffer; text is emitted as a `Label`
/// plan for the display layer to rasterize with its own drawing primitives.
/// Stateless; a pure function of the frame, blobs, event and scores.
use image::{Rgba, RgbaImage};

use crate::config::Config;
use crate::detection::FrameEvent;
use crate::geometry::{Point, Rect};
use crate::state::Side;
use crate::vision::Blob;

/// An RGBA draw color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const GREEN: Color = Color([0, 255, 0, 255]);
    pub const RED: Color = Color([255, 0, 0, 255]);
    pub const YELLOW: Color = Color([255, 255, 0, 255]);
    pub const CYAN: Color = Color([0, 255, 255, 255]);

    pub fn rgba(&self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

/// A text annotation for the display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Point,
    pub color: Color,
    pub scale: f32,
}

pub struct OverlayComposer {
    goal_rects: Vec<Rect>,
    frame_height: u32,
}

impl OverlayComposer {
    pub fn new(goal_rects: Vec<Rect>, frame_height: u32) -> Self {
        Self {
            goal_rects,
            frame_height,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.goal_areas.iter().map(|a| a.rect).collect(),
            config.frame_height,
        )
    }

    /// Draw the geometric marks in place: every goal rectangle outline, and
    /// a filled marker per qualifying blob.
    pub fn draw_marks(&self, frame: &mut RgbaImage, blobs: &[Blob]) {
        for rect in &self.goal_rects {
            draw_rect_outline(frame, *rect, Color::GREEN, 2);
        }
        for blob in blobs {
            draw_filled_circle(frame, blob.centroid, 10, Color::RED);
        }
    }

    /// Select the frame's text annotations.
    pub fn labels(&self, blobs: &[Blob], event: FrameEvent, scores: (u32, u32)) -> Vec<Label> {
        let h = self.frame_height as i32;
        let mut labels = Vec::with_capacity(blobs.len() + 3);

        labels.push(Label {
            text: format!("Player1: {} | Player2: {}", scores.0, scores.1),
            position: Point::new(20, 40),
            color: Color::YELLOW,
            scale: 1.0,
        });

        for blob in blobs {
            labels.push(Label {
                text: "BALL".to_string(),
                position: Point::new(blob.centroid.x + 10, blob.centroid.y),
                color: Color::RED,
                scale: 0.7,
            });
        }

        match event {
            FrameEvent::Goal(side) => labels.push(Label {
                text: scored_banner(side).to_string(),
                position: Point::new(50, h - 50),
                color: Color::GREEN,
                scale: 1.0,
            }),
            FrameEvent::Handball => labels.push(Label {
                text: "HAND BALL!".to_string(),
                position: Point::new(50, h - 50),
                color: Color::RED,
                scale: 1.0,
            }),
            FrameEvent::Waiting => {}
        }

        labels.push(Label {
            text: event.banner().to_string(),
            position: Point::new(20, h - 20),
            color: Color::CYAN,
            scale: 1.2,
        });

        labels
    }
}

fn scored_banner(side: Side) -> &'static str {
    match side {
        Side::Team1 => "PLAYER 1 SCORED!",
        Side::Team2 => "PLAYER 2 SCORED!",
    }
}

/// Draw a rectangle outline of the given thickness, clipped to the frame.
pub fn draw_rect_outline(frame: &mut RgbaImage, rect: Rect, color: Color, thickness: u32) {
    let px = color.rgba();
    let (w, h) = frame.dimensions();
    let x1 = rect.right().min(w);
    let y1 = rect.bottom().min(h);
    if rect.x >= w || rect.y >= h || rect.width == 0 || rect.height == 0 {
        return;
    }

    for t in 0..thickness {
        let top = rect.y + t;
        let bot = y1.saturating_sub(1 + t);
        for x in rect.x..x1 {
            if top < y1 {
                frame.put_pixel(x, top, px);
            }
            if bot > top {
                frame.put_pixel(x, bot, px);
            }
        }

        let left = rect.x + t;
        let right = x1.saturating_sub(1 + t);
        for y in rect.y..y1 {
            if left < x1 {
                frame.put_pixel(left, y, px);
            }
            if right > left {
                frame.put_pixel(right, y, px);
            }
        }
    }
}

/// Draw a filled circle, clipped to the frame.
pub fn draw_filled_circle(frame: &mut RgbaImage, center: Point, radius: i32, color: Color) {
    let px = color.rgba();
    let (w, h) = (frame.width() as i32, frame.height() as i32);
    let r2 = radius * radius;

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let x = center.x + dx;
            let y = center.y + dy;
            if x >= 0 && x < w && y >= 0 && y < h {
                frame.put_pixel(x as u32, y as u32, px);
            }
        }
    }
}
