/// Blob extraction
///
/// Connected-component labeling over the binary ball mask. Components are
/// emitted in scan order of their first pixel, which is the order the event
/// decider consumes.
use image::GrayImage;

use crate::geometry::{Point, Rect};

/// A connected region of mask pixels.
///
/// The centroid is the integer midpoint of the bounding box, not the pixel
/// mass center.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub centroid: Point,
    pub area: f32,
    pub bbox: Rect,
}

/// Extract 4-connected components from a binary mask.
///
/// Pixels above 127 are foreground. Uses an iterative flood fill, so mask
/// size is bounded only by memory, not stack depth.
pub fn extract_blobs(mask: &GrayImage) -> Vec<Blob> {
    let (width, height) = mask.dimensions();
    let w = width as usize;
    let h = height as usize;
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let data = mask.as_raw();
    let mut visited = vec![false; w * h];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut blobs = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if visited[idx] || data[idx] <= 127 {
                continue;
            }

            visited[idx] = true;
            stack.push((x, y));

            let mut count: u32 = 0;
            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);

            while let Some((cx, cy)) = stack.pop() {
                count += 1;
                min_x = min_x.min(cx);
                min_y = min_y.min(cy);
                max_x = max_x.max(cx);
                max_y = max_y.max(cy);

                let mut visit = |nx: usize, ny: usize, stack: &mut Vec<(usize, usize)>| {
                    let nidx = ny * w + nx;
                    if !visited[nidx] && data[nidx] > 127 {
                        visited[nidx] = true;
                        stack.push((nx, ny));
                    }
                };

                if cx > 0 {
                    visit(cx - 1, cy, &mut stack);
                }
                if cx + 1 < w {
                    visit(cx + 1, cy, &mut stack);
                }
                if cy > 0 {
                    visit(cx, cy - 1, &mut stack);
                }
                if cy + 1 < h {
                    visit(cx, cy + 1, &mut stack);
                }
            }

            let bbox = Rect::new(
                min_x as u32,
                min_y as u32,
                (max_x - min_x + 1) as u32,
                (max_y - min_y + 1) as u32,
            );
            blobs.push(Blob {
                centroid: bbox.center(),
                area: count as f32,
                bbox,
            });
        }
    }

    blobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn mask_with_rect(w: u32, h: u32, x: u32, y: u32, rw: u32, rh: u32) -> GrayImage {
        let mut mask = GrayImage::new(w, h);
        for py in y..y + rh {
            for px in x..x + rw {
                mask.put_pixel(px, py, Luma([255]));
            }
        }
        mask
    }

    #[test]
    fn test_single_rect_blob() {
        let mask = mask_with_rect(640, 480, 288, 140, 25, 20);
        let blobs = extract_blobs(&mask);

        assert_eq!(blobs.len(), 1);
        let blob = &blobs[0];
        assert_eq!(blob.area, 500.0);
        assert_eq!(blob.bbox, Rect::new(288, 140, 25, 20));
        assert_eq!(blob.centroid, Point::new(300, 150));
    }

    #[test]
    fn test_two_separate_blobs_scan_order() {
        let mut mask = mask_with_rect(100, 100, 60, 10, 10, 10);
        for py in 50..60 {
            for px in 5..15 {
                mask.put_pixel(px, py, Luma([255]));
            }
        }

        let blobs = extract_blobs(&mask);
        assert_eq!(blobs.len(), 2);

        // First-seen pixel decides the order: the upper blob comes first even
        // though it sits further right
        assert_eq!(blobs[0].bbox, Rect::new(60, 10, 10, 10));
        assert_eq!(blobs[1].bbox, Rect::new(5, 50, 10, 10));
    }

    #[test]
    fn test_diagonal_pixels_are_separate() {
        let mut mask = GrayImage::new(10, 10);
        mask.put_pixel(2, 2, Luma([255]));
        mask.put_pixel(3, 3, Luma([255]));

        // 4-connectivity: diagonal neighbors do not merge
        let blobs = extract_blobs(&mask);
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].area, 1.0);
    }

    #[test]
    fn test_l_shape_is_one_blob() {
        let mut mask = GrayImage::new(10, 10);
        for y in 1..6 {
            mask.put_pixel(1, y, Luma([255]));
        }
        for x in 1..6 {
            mask.put_pixel(x, 5, Luma([255]));
        }

        let blobs = extract_blobs(&mask);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 9.0);
        assert_eq!(blobs[0].bbox, Rect::new(1, 1, 5, 5));
    }

    #[test]
    fn test_empty_mask() {
        let mask = GrayImage::new(64, 64);
        assert!(extract_blobs(&mask).is_empty());

        let mask = GrayImage::new(0, 0);
        assert!(extract_blobs(&mask).is_empty());
    }
}
