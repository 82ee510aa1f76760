//! Constants used throughout the DiaBP core crate.
//!
//! Advisory strings are bilingual (English with the Vietnamese rendering in parentheses) and
//! must stay byte-for-byte stable: callers display them verbatim and tests compare them.

// ---------------------------------------------------------------------------
// Scoring thresholds
// ---------------------------------------------------------------------------

/// HbA1c (%) at or above which the high tier applies.
pub const HBA1C_HIGH: f64 = 8.0;
/// HbA1c (%) at or above which the elevated tier applies.
pub const HBA1C_ELEVATED: f64 = 6.5;
pub const HBA1C_HIGH_POINTS: u32 = 40;
pub const HBA1C_ELEVATED_POINTS: u32 = 25;

/// Glucose (mg/dL) at or above which the glucose points are added.
pub const GLUCOSE_HIGH: i32 = 180;
pub const GLUCOSE_HIGH_POINTS: u32 = 30;

/// Systolic tiers, highest first. The first tier whose threshold is met wins.
pub const SYSTOLIC_TIERS: [(i32, u32); 3] = [(180, 60), (160, 40), (140, 25)];

/// Systolic pressure (mmHg) that marks a hypertensive crisis.
pub const SYSTOLIC_CRISIS: i32 = 180;

// ---------------------------------------------------------------------------
// Advisory bundles
// ---------------------------------------------------------------------------

pub const DIABETES_MEDICATIONS: [&str; 3] = [
    "Metformin 500mg twice daily (2 lần/ngày)",
    "Vitamin B12 supplementation (Bổ sung B12)",
    "Annual retina & kidney screening (Tầm soát mắt & thận hàng năm)",
];

pub const DIABETES_ADVICE: [&str; 2] = [
    "Low carb diet (Chế độ ăn giảm tinh bột)",
    "Exercise 30 min/day (Tập 30 phút mỗi ngày)",
];

pub const HYPERTENSION_MEDICATIONS: [&str; 2] = [
    "Amlodipine 5mg daily (1 lần/ngày)",
    "Monitor potassium & creatinine (Theo dõi Kali & Creatinine)",
];

pub const HYPERTENSION_ADVICE: [&str; 2] = [
    "Low salt diet (Chế độ ăn giảm muối)",
    "Home BP monitoring (Theo dõi HA tại nhà)",
];

pub const HYPERTENSIVE_CRISIS_ADVICE: &str = "Hypertensive crisis – Emergency (Cơn THA – Cấp cứu)";

// ---------------------------------------------------------------------------
// Dashboard labels
// ---------------------------------------------------------------------------

pub const DIABETES_RISK_LABEL: &str = "Diabetes Risk (%) (Nguy cơ ĐTĐ)";
pub const HYPERTENSION_RISK_LABEL: &str = "Hypertension Risk (%) (Nguy cơ THA)";

// ---------------------------------------------------------------------------
// Input collector domains and defaults
// ---------------------------------------------------------------------------

pub const AGE_RANGE: (u32, u32) = (1, 100);
pub const DEFAULT_AGE: u32 = 55;
pub const SYSTOLIC_RANGE: (i32, i32) = (80, 220);
pub const DEFAULT_SYSTOLIC: i32 = 150;
pub const DIASTOLIC_RANGE: (i32, i32) = (40, 150);
pub const DEFAULT_DIASTOLIC: i32 = 90;
pub const GLUCOSE_RANGE: (i32, i32) = (50, 400);
pub const DEFAULT_GLUCOSE: i32 = 180;
pub const HBA1C_RANGE: (f64, f64) = (4.0, 15.0);
pub const DEFAULT_HBA1C: f64 = 8.0;
pub const BMI_RANGE: (f64, f64) = (15.0, 40.0);
pub const DEFAULT_BMI: f64 = 27.0;

// ---------------------------------------------------------------------------
// Chat sessions
// ---------------------------------------------------------------------------

/// Live sessions kept by the registry; creating one more evicts the least recently used.
pub const MAX_CHAT_SESSIONS: usize = 1_000;
/// Turns kept per transcript. Older exchanges are dropped first.
pub const MAX_TRANSCRIPT_TURNS: usize = 100;
/// Longest chat message accepted by the session registry, in characters.
pub const MAX_CHAT_MESSAGE_CHARS: usize = 2_000;

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Default length of the synthetic analytics window.
pub const DEFAULT_ANALYTICS_DAYS: usize = 28;
/// Upper bound on a requested analytics window.
pub const MAX_ANALYTICS_DAYS: usize = 366;
pub const BLOOD_PRESSURE_MEAN: f64 = 140.0;
pub const BLOOD_PRESSURE_SD: f64 = 10.0;
pub const GLUCOSE_MEAN: f64 = 150.0;
pub const GLUCOSE_SD: f64 = 20.0;

// ---------------------------------------------------------------------------
// Stroke screening
// ---------------------------------------------------------------------------

/// Face mesh indices of the left and right mouth corners.
pub const MOUTH_CORNER_LANDMARKS: (usize, usize) = (61, 291);
/// Pose indices of the left and right wrists.
pub const WRIST_LANDMARKS: (usize, usize) = (15, 16);
/// Vertical mouth-corner offset (normalised) above which the face is flagged.
pub const FACIAL_ASYMMETRY_THRESHOLD: f64 = 0.03;
/// Vertical wrist offset (normalised) above which the arms are flagged.
pub const ARM_DRIFT_THRESHOLD: f64 = 0.25;

pub const STROKE_WARNING_BANNER: &str = "STROKE WARNING (CANH BAO DOT QUY)";
pub const SCREENING_DISCLAIMER: &str =
    "FAST+ Screening – Not a diagnosis (Chỉ tầm soát không thay thế chẩn đoán)";

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

pub const REPORT_FILE_NAME: &str = "DiaBP_Report.pdf";
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";
