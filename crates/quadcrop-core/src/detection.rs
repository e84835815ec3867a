//! Normalizing document-detector output into a single quadrilateral.
//!
//! A detector reports either one document outline (`Quad`) or a set of
//! candidate boxes (`BoxSet`), typically text blocks. Box sets are fused by
//! hulling all their corner points and fitting the minimum-area rectangle
//! around them.
//!
//! The raw JSON shapes differ (`{topLeft, ...}` object vs. array of
//! `{cornerPoints}`), so the variant is chosen once during deserialization.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::geometry::{find_min_bounding_rect, Point2D, Quad};

/// One candidate box reported by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedBox {
    pub corner_points: Vec<Point2D>,
}

/// Raw detector output, in source image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetectionResult {
    /// Exactly one document outline.
    Quad(Quad),
    /// Candidate boxes to be fused into one outline.
    BoxSet(Vec<DetectedBox>),
}

impl DetectionResult {
    /// Collapse the result into one role-labelled quadrilateral.
    ///
    /// # Errors
    ///
    /// - [`CropError::NoPointsDetected`] if a box set holds no points
    /// - [`CropError::DegenerateHull`] if its points are identical or collinear
    pub fn normalize(&self) -> Result<Quad, CropError> {
        match self {
            DetectionResult::Quad(quad) => Ok(*quad),
            DetectionResult::BoxSet(boxes) => {
                let points: Vec<Point2D> = boxes
                    .iter()
                    .flat_map(|b| b.corner_points.iter().copied())
                    .collect();
                if points.is_empty() {
                    return Err(CropError::NoPointsDetected);
                }

                let rect = find_min_bounding_rect(&points)?;
                debug!(
                    "Fused {} boxes ({} points) into {:.1}x{:.1} rect at {:.3} rad",
                    boxes.len(),
                    points.len(),
                    rect.width(),
                    rect.height(),
                    rect.rotation.angle()
                );
                Ok(Quad::from_unordered(rect.corners))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn approx(a: Point2D, b: Point2D) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_quad_passes_through() {
        let quad = Quad {
            top_left: p(1.0, 2.0),
            top_right: p(3.0, 4.0),
            bottom_left: p(5.0, 6.0),
            bottom_right: p(7.0, 8.0),
        };
        assert_eq!(DetectionResult::Quad(quad).normalize().unwrap(), quad);
    }

    #[test]
    fn test_empty_box_set() {
        let result = DetectionResult::BoxSet(vec![]);
        assert!(matches!(result.normalize(), Err(CropError::NoPointsDetected)));

        let empty_boxes = DetectionResult::BoxSet(vec![DetectedBox {
            corner_points: vec![],
        }]);
        assert!(matches!(
            empty_boxes.normalize(),
            Err(CropError::NoPointsDetected)
        ));
    }

    #[test]
    fn test_box_set_fused_to_bounding_rect() {
        // Two text lines on an upright page.
        let result = DetectionResult::BoxSet(vec![
            DetectedBox {
                corner_points: vec![p(10.0, 10.0), p(90.0, 10.0), p(90.0, 20.0), p(10.0, 20.0)],
            },
            DetectedBox {
                corner_points: vec![p(10.0, 40.0), p(60.0, 40.0), p(60.0, 50.0), p(10.0, 50.0)],
            },
        ]);

        let quad = result.normalize().unwrap();
        assert!(approx(quad.top_left, p(10.0, 10.0)));
        assert!(approx(quad.top_right, p(90.0, 10.0)));
        assert!(approx(quad.bottom_left, p(10.0, 50.0)));
        assert!(approx(quad.bottom_right, p(90.0, 50.0)));
    }

    #[test]
    fn test_degenerate_box_set() {
        let result = DetectionResult::BoxSet(vec![DetectedBox {
            corner_points: vec![p(5.0, 5.0); 4],
        }]);
        assert!(matches!(
            result.normalize(),
            Err(CropError::DegenerateHull { distinct: 1 })
        ));
    }

    #[test]
    fn test_deserialize_quad_shape() {
        let json = r#"{
            "topLeft": {"x": 1, "y": 2},
            "topRight": {"x": 3, "y": 4},
            "bottomLeft": {"x": 5, "y": 6},
            "bottomRight": {"x": 7, "y": 8}
        }"#;
        let result: DetectionResult = serde_json::from_str(json).unwrap();
        match result {
            DetectionResult::Quad(q) => assert_eq!(q.bottom_right, p(7.0, 8.0)),
            other => panic!("expected Quad, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_box_set_shape() {
        let json = r#"[
            {"cornerPoints": [{"x": 0, "y": 0}, {"x": 4, "y": 0}, {"x": 4, "y": 2}, {"x": 0, "y": 2}]}
        ]"#;
        let result: DetectionResult = serde_json::from_str(json).unwrap();
        match result {
            DetectionResult::BoxSet(boxes) => {
                assert_eq!(boxes.len(), 1);
                assert_eq!(boxes[0].corner_points[2], p(4.0, 2.0));
            }
            other => panic!("expected BoxSet, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_empty_array_is_box_set() {
        let result: DetectionResult = serde_json::from_str("[]").unwrap();
        assert_eq!(result, DetectionResult::BoxSet(vec![]));
    }
}
