//! FAST+ stroke screening over detected landmarks.
//!
//! Capture and landmark detection happen elsewhere; this module only looks at one frame's
//! normalised landmark coordinates and flags two asymmetries:
//! - facial droop: mouth corners (face mesh 61 and 291) differ vertically by more than 0.03
//! - arm drift: wrists (pose 15 and 16) differ vertically by more than 0.25
//!
//! A face or pose that is too short to contain the required indices counts as not detected.

use crate::constants::{
    ARM_DRIFT_THRESHOLD, FACIAL_ASYMMETRY_THRESHOLD, MOUTH_CORNER_LANDMARKS,
    SCREENING_DISCLAIMER, STROKE_WARNING_BANNER, WRIST_LANDMARKS,
};
use crate::{CareError, CareResult};
use serde::{Deserialize, Serialize};

/// A normalised landmark position (`0.0..=1.0` across the image for `x` and `y`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Landmarks detected in a single video frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandmarkFrame {
    /// One landmark list per detected face mesh.
    #[serde(default)]
    pub faces: Vec<Vec<Landmark>>,
    /// Body pose landmarks, if a body was detected.
    #[serde(default)]
    pub pose: Option<Vec<Landmark>>,
}

impl LandmarkFrame {
    /// Parse a frame from JSON text.
    ///
    /// Uses `serde_path_to_error` so a malformed frame reports where it went wrong
    /// (for example `faces[0][61].y`).
    ///
    /// # Errors
    ///
    /// Returns `CareError::FrameParse` with the failing path and the underlying message.
    pub fn from_json(text: &str) -> CareResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            let path = err.path().to_string();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            CareError::FrameParse {
                path,
                message: err.into_inner().to_string(),
            }
        })
    }
}

/// One asymmetry found in a frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Mouth corners out of level on the face at `face_index`.
    FacialDroop { face_index: usize, offset: f64 },
    /// Wrists out of level.
    ArmDrift { offset: f64 },
}

impl Finding {
    pub fn describe(&self) -> String {
        match self {
            Finding::FacialDroop { face_index, offset } => {
                format!("facial asymmetry on face {face_index} (mouth corner offset {offset:.3})")
            }
            Finding::ArmDrift { offset } => {
                format!("arm drift (wrist offset {offset:.3})")
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningVerdict {
    pub alert: bool,
    pub findings: Vec<Finding>,
}

impl ScreeningVerdict {
    /// Banner to overlay on the frame, present only when the alert is raised.
    pub fn banner(&self) -> Option<&'static str> {
        self.alert.then_some(STROKE_WARNING_BANNER)
    }

    /// Disclaimer that accompanies every screening result.
    pub fn disclaimer(&self) -> &'static str {
        SCREENING_DISCLAIMER
    }
}

/// Screens one frame for facial droop and arm drift.
///
/// Every detected face is checked; the pose, when present, is checked once. The alert is
/// raised if any finding is recorded. Offsets must be strictly greater than the thresholds.
pub fn screen_frame(frame: &LandmarkFrame) -> ScreeningVerdict {
    let mut findings = Vec::new();

    for (face_index, face) in frame.faces.iter().enumerate() {
        if let Some(offset) = vertical_offset(face, MOUTH_CORNER_LANDMARKS) {
            if offset > FACIAL_ASYMMETRY_THRESHOLD {
                findings.push(Finding::FacialDroop { face_index, offset });
            }
        }
    }

    if let Some(pose) = &frame.pose {
        if let Some(offset) = vertical_offset(pose, WRIST_LANDMARKS) {
            if offset > ARM_DRIFT_THRESHOLD {
                findings.push(Finding::ArmDrift { offset });
            }
        }
    }

    if !findings.is_empty() {
        tracing::warn!(findings = findings.len(), "stroke screening alert raised");
    }

    ScreeningVerdict {
        alert: !findings.is_empty(),
        findings,
    }
}

fn vertical_offset(landmarks: &[Landmark], (left, right): (usize, usize)) -> Option<f64> {
    let left = landmarks.get(left)?;
    let right = landmarks.get(right)?;
    Some((left.y - right.y).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: usize) -> Vec<Landmark> {
        let point = Landmark {
            x: 0.5,
            y: 0.5,
            z: 0.0,
        };
        vec![point; n]
    }

    fn face_with_mouth(left_y: f64, right_y: f64) -> Vec<Landmark> {
        let mut face = level(468);
        face[61].y = left_y;
        face[291].y = right_y;
        face
    }

    fn pose_with_wrists(left_y: f64, right_y: f64) -> Vec<Landmark> {
        let mut pose = level(33);
        pose[15].y = left_y;
        pose[16].y = right_y;
        pose
    }

    #[test]
    fn empty_frame_is_clear() {
        let verdict = screen_frame(&LandmarkFrame::default());
        assert!(!verdict.alert);
        assert!(verdict.banner().is_none());
    }

    #[test]
    fn flags_facial_droop() {
        let frame = LandmarkFrame {
            faces: vec![face_with_mouth(0.60, 0.64)],
            pose: None,
        };
        let verdict = screen_frame(&frame);
        assert!(verdict.alert);
        assert!(matches!(
            verdict.findings[0],
            Finding::FacialDroop { face_index: 0, .. }
        ));
        assert_eq!(verdict.banner(), Some("STROKE WARNING (CANH BAO DOT QUY)"));
    }

    #[test]
    fn small_mouth_offset_is_clear() {
        let frame = LandmarkFrame {
            faces: vec![face_with_mouth(0.60, 0.62)],
            pose: None,
        };
        assert!(!screen_frame(&frame).alert);
    }

    #[test]
    fn flags_arm_drift() {
        let frame = LandmarkFrame {
            faces: vec![],
            pose: Some(pose_with_wrists(0.3, 0.6)),
        };
        let verdict = screen_frame(&frame);
        assert!(verdict.alert);
        assert!(matches!(verdict.findings[0], Finding::ArmDrift { .. }));
    }

    #[test]
    fn wrists_within_threshold_are_clear() {
        let frame = LandmarkFrame {
            faces: vec![],
            pose: Some(pose_with_wrists(0.40, 0.60)),
        };
        assert!(!screen_frame(&frame).alert);
    }

    #[test]
    fn mouth_offset_must_exceed_threshold() {
        let at = LandmarkFrame {
            faces: vec![face_with_mouth(0.0, 0.03)],
            pose: None,
        };
        assert!(!screen_frame(&at).alert);

        let above = LandmarkFrame {
            faces: vec![face_with_mouth(0.0, 0.031)],
            pose: None,
        };
        assert!(screen_frame(&above).alert);
    }

    #[test]
    fn wrist_offset_must_exceed_threshold() {
        let at = LandmarkFrame {
            faces: vec![],
            pose: Some(pose_with_wrists(0.0, 0.25)),
        };
        assert!(!screen_frame(&at).alert);

        let above = LandmarkFrame {
            faces: vec![],
            pose: Some(pose_with_wrists(0.0, 0.251)),
        };
        assert!(screen_frame(&above).alert);
    }

    #[test]
    fn every_face_is_checked() {
        let frame = LandmarkFrame {
            faces: vec![face_with_mouth(0.5, 0.5), face_with_mouth(0.5, 0.6)],
            pose: Some(pose_with_wrists(0.1, 0.9)),
        };
        let verdict = screen_frame(&frame);
        assert_eq!(verdict.findings.len(), 2);
        assert!(matches!(
            verdict.findings[0],
            Finding::FacialDroop { face_index: 1, .. }
        ));
    }

    #[test]
    fn short_landmark_lists_count_as_undetected() {
        let frame = LandmarkFrame {
            faces: vec![level(10)],
            pose: Some(level(5)),
        };
        assert!(!screen_frame(&frame).alert);
    }

    #[test]
    fn parse_reports_failing_path() {
        let input = r#"{"faces":[[{"x":0.1,"y":"high"}]]}"#;
        match LandmarkFrame::from_json(input) {
            Err(CareError::FrameParse { path, .. }) => assert_eq!(path, "faces[0][0].y"),
            other => panic!("expected FrameParse, got {other:?}"),
        }
    }

    #[test]
    fn parse_accepts_pose_only_frame() {
        let frame = LandmarkFrame::from_json(r#"{"pose":[{"x":0.1,"y":0.2}]}"#).unwrap();
        assert!(frame.faces.is_empty());
        assert_eq!(frame.pose.unwrap()[0].z, 0.0);
    }
}
