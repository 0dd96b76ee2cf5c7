//! Prediction form state and the derived BMI field.
//!
//! Field values are kept as raw text exactly as typed. Numeric coercion only
//! happens once, when a [`PredictionRequest`] is assembled for submission.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroize;

use super::prediction::PredictionRequest;

/// The twelve inputs of the prediction form.
///
/// Discriminants index into [`FormState`] storage and follow the wire order
/// of the backend feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Gender = 0,
    Height,
    Weight,
    ApHi,
    ApLo,
    Cholesterol,
    Gluc,
    Smoke,
    Alco,
    Active,
    AgeYears,
    Bmi,
}

/// Kind of input control backing a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free numeric entry with advisory bounds and granularity.
    Number { min: f64, max: f64, step: f64 },
    /// One of a fixed set of `(value, label)` options.
    Select(&'static [(&'static str, &'static str)]),
    /// Computed by the form, never edited directly.
    Derived,
}

const GENDER_OPTIONS: &[(&str, &str)] = &[("1", "Female"), ("2", "Male")];
const LEVEL_OPTIONS: &[(&str, &str)] = &[
    ("1", "Normal"),
    ("2", "Above Normal"),
    ("3", "Well Above Normal"),
];
const YES_NO_OPTIONS: &[(&str, &str)] = &[("0", "No"), ("1", "Yes")];

impl FormField {
    /// All fields in wire order.
    pub const ALL: [FormField; 12] = [
        Self::Gender,
        Self::Height,
        Self::Weight,
        Self::ApHi,
        Self::ApLo,
        Self::Cholesterol,
        Self::Gluc,
        Self::Smoke,
        Self::Alco,
        Self::Active,
        Self::AgeYears,
        Self::Bmi,
    ];

    /// Fields in the order the form presents them.
    pub const DISPLAY_ORDER: [FormField; 12] = [
        Self::Gender,
        Self::AgeYears,
        Self::Height,
        Self::Weight,
        Self::ApHi,
        Self::ApLo,
        Self::Bmi,
        Self::Cholesterol,
        Self::Gluc,
        Self::Smoke,
        Self::Alco,
        Self::Active,
    ];

    /// JSON key used by the backend.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::ApHi => "ap_hi",
            Self::ApLo => "ap_lo",
            Self::Cholesterol => "cholesterol",
            Self::Gluc => "gluc",
            Self::Smoke => "smoke",
            Self::Alco => "alco",
            Self::Active => "active",
            Self::AgeYears => "age_years",
            Self::Bmi => "BMI",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::Height => "Height (cm)",
            Self::Weight => "Weight (kg)",
            Self::ApHi => "Systolic BP (mmHg)",
            Self::ApLo => "Diastolic BP (mmHg)",
            Self::Cholesterol => "Cholesterol Level",
            Self::Gluc => "Glucose Level",
            Self::Smoke => "Smoking",
            Self::Alco => "Alcohol Consumption",
            Self::Active => "Physical Activity",
            Self::AgeYears => "Age (years)",
            Self::Bmi => "BMI (auto-calculated)",
        }
    }

    /// Placeholder shown while the field is empty.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::Height => "e.g., 168",
            Self::Weight => "e.g., 70",
            Self::ApHi => "e.g., 120",
            Self::ApLo => "e.g., 80",
            Self::AgeYears => "e.g., 50",
            Self::Bmi => "Auto",
            _ => "",
        }
    }

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Gender => FieldKind::Select(GENDER_OPTIONS),
            Self::Cholesterol | Self::Gluc => FieldKind::Select(LEVEL_OPTIONS),
            Self::Smoke | Self::Alco | Self::Active => FieldKind::Select(YES_NO_OPTIONS),
            Self::Height => FieldKind::Number { min: 100.0, max: 250.0, step: 1.0 },
            Self::Weight => FieldKind::Number { min: 30.0, max: 200.0, step: 0.1 },
            Self::ApHi => FieldKind::Number { min: 80.0, max: 200.0, step: 1.0 },
            Self::ApLo => FieldKind::Number { min: 40.0, max: 140.0, step: 1.0 },
            Self::AgeYears => FieldKind::Number { min: 30.0, max: 80.0, step: 1.0 },
            Self::Bmi => FieldKind::Derived,
        }
    }

    #[must_use]
    pub fn is_editable(self) -> bool {
        !matches!(self.kind(), FieldKind::Derived)
    }

    fn initial_value(self) -> &'static str {
        match self {
            Self::Gender => "2",
            Self::Cholesterol | Self::Gluc => "1",
            Self::Smoke | Self::Alco => "0",
            Self::Active => "1",
            _ => "",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error for field names outside the known twelve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Errors raised while coercing the form into a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{}: please enter a valid number", .field.label())]
    InvalidNumber { field: FormField, value: String },
}

impl FormError {
    #[must_use]
    pub fn field(&self) -> FormField {
        match self {
            Self::InvalidNumber { field, .. } => *field,
        }
    }
}

/// Advisory problem with a field, reported before submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldIssue {
    Missing(FormField),
    NotANumber(FormField),
    OutOfRange { field: FormField, min: f64, max: f64 },
    /// Value is not `min` plus a whole number of steps.
    StepMismatch { field: FormField, step: f64 },
}

impl FieldIssue {
    #[must_use]
    pub fn field(&self) -> FormField {
        match self {
            Self::Missing(field) | Self::NotANumber(field) => *field,
            Self::OutOfRange { field, .. } | Self::StepMismatch { field, .. } => *field,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{}: please fill out this field", field.label()),
            Self::NotANumber(field) => write!(f, "{}: please enter a number", field.label()),
            Self::OutOfRange { field, min, max } => write!(
                f,
                "{}: value must be between {} and {}",
                field.label(),
                min,
                max
            ),
            Self::StepMismatch { field, step } => {
                write!(f, "{}: value must be a multiple of {}", field.label(), step)
            }
        }
    }
}

/// Raw text of every form field.
///
/// `Debug` intentionally prints which fields are filled, never their values.
#[derive(Clone)]
pub struct FormState {
    values: [String; 12],
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: FormField::ALL.map(|field| field.initial_value().to_string()),
        }
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled: Vec<&str> = FormField::ALL
            .into_iter()
            .filter(|field| !self.get(*field).is_empty())
            .map(FormField::wire_name)
            .collect();
        f.debug_struct("FormState").field("filled", &filled).finish()
    }
}

impl Drop for FormState {
    fn drop(&mut self) {
        for value in self.values.iter_mut() {
            value.zeroize();
        }
    }
}

impl FormState {
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        &self.values[field as usize]
    }

    /// Set a field and, for height or weight, re-derive BMI.
    ///
    /// BMI is only replaced when both inputs parse to positive numbers;
    /// otherwise it keeps its previous value.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.values[field as usize] = value.into();

        if matches!(field, FormField::Height | FormField::Weight) {
            if let Some(bmi) = compute_bmi(self.get(FormField::Height), self.get(FormField::Weight)) {
                self.values[FormField::Bmi as usize] = bmi;
            }
        }
    }

    /// Wipe every buffer and restore the initial selections.
    pub fn reset(&mut self) {
        for (value, field) in self.values.iter_mut().zip(FormField::ALL) {
            value.zeroize();
            value.push_str(field.initial_value());
        }
    }

    /// Fill the form with a typical low-risk example patient.
    pub fn load_sample(&mut self) {
        let sample = [
            (FormField::Gender, "2"),
            (FormField::AgeYears, "50"),
            (FormField::Height, "168"),
            (FormField::Weight, "62"),
            (FormField::ApHi, "110"),
            (FormField::ApLo, "80"),
            (FormField::Cholesterol, "1"),
            (FormField::Gluc, "1"),
            (FormField::Smoke, "0"),
            (FormField::Alco, "0"),
            (FormField::Active, "1"),
        ];
        for (field, value) in sample {
            self.update_field(field, value);
        }
    }

    /// Problems a browser would flag before letting the form submit.
    ///
    /// Purely advisory: [`FormState::to_request`] does not consult it.
    #[must_use]
    pub fn advisory_issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        for field in FormField::DISPLAY_ORDER {
            let FieldKind::Number { min, max, step } = field.kind() else {
                continue;
            };
            let raw = self.get(field).trim();
            if raw.is_empty() {
                issues.push(FieldIssue::Missing(field));
                continue;
            }
            match raw.parse::<f64>() {
                Ok(value) if !(min..=max).contains(&value) => {
                    issues.push(FieldIssue::OutOfRange { field, min, max });
                }
                Ok(value) if !on_step(value, min, step) => {
                    issues.push(FieldIssue::StepMismatch { field, step });
                }
                Ok(_) => {}
                Err(_) => issues.push(FieldIssue::NotANumber(field)),
            }
        }
        issues
    }

    /// Coerce every field to its wire type.
    ///
    /// # Errors
    /// Returns [`FormError::InvalidNumber`] for the first field without a
    /// numeric prefix.
    pub fn to_request(&self) -> Result<PredictionRequest, FormError> {
        Ok(PredictionRequest {
            gender: self.int(FormField::Gender)?,
            height: self.int(FormField::Height)?,
            weight: self.float(FormField::Weight)?,
            ap_hi: self.int(FormField::ApHi)?,
            ap_lo: self.int(FormField::ApLo)?,
            cholesterol: self.int(FormField::Cholesterol)?,
            gluc: self.int(FormField::Gluc)?,
            smoke: self.int(FormField::Smoke)?,
            alco: self.int(FormField::Alco)?,
            active: self.int(FormField::Active)?,
            age_years: self.int(FormField::AgeYears)?,
            bmi: self.float(FormField::Bmi)?,
        })
    }

    fn int(&self, field: FormField) -> Result<i32, FormError> {
        parse_leading_int(self.get(field)).ok_or_else(|| self.invalid(field))
    }

    fn float(&self, field: FormField) -> Result<f64, FormError> {
        parse_leading_float(self.get(field)).ok_or_else(|| self.invalid(field))
    }

    fn invalid(&self, field: FormField) -> FormError {
        FormError::InvalidNumber {
            field,
            value: self.get(field).to_string(),
        }
    }
}

/// Whether `value` sits on the grid `min + k * step`.
fn on_step(value: f64, min: f64, step: f64) -> bool {
    let steps = (value - min) / step;
    (steps - steps.round()).abs() < 1e-7
}

/// Body mass index from height in centimeters and weight in kilograms.
///
/// Returns the value formatted with two decimals, or `None` when either
/// input has no numeric prefix or is not strictly positive.
#[must_use]
pub fn compute_bmi(height_cm: &str, weight_kg: &str) -> Option<String> {
    let height = parse_leading_float(height_cm)?;
    let weight = parse_leading_float(weight_kg)?;
    if height <= 0.0 || weight <= 0.0 {
        return None;
    }

    let bmi = weight / (height / 100.0).powi(2);
    bmi.is_finite().then(|| format_two_decimals(bmi))
}

/// Two-decimal rendering that resolves exact midpoints upward, so
/// `25.125` reads as `"25.13"` rather than the round-half-even `"25.12"`.
fn format_two_decimals(value: f64) -> String {
    let doubled = (value * 200.0).round();
    // Exact midpoint iff value * 200 is an odd integer; the fused
    // multiply-add keeps the remainder unrounded.
    if doubled % 2.0 == 1.0 && value.mul_add(200.0, -doubled) == 0.0 {
        return format!("{:.2}", (doubled + 1.0) / 200.0);
    }
    format!("{value:.2}")
}

/// Length of the numeric prefix of `s`: optional sign, digits, and for
/// floats an optional fraction and exponent.
fn numeric_prefix_len(s: &str, allow_fraction: bool) -> Option<usize> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if allow_fraction && bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - end - 1;
        if mantissa_digits > 0 || frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if allow_fraction && matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    Some(end)
}

/// Integer parse that ignores trailing garbage (`"168.5"` reads as 168).
#[must_use]
pub fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let len = numeric_prefix_len(s, false)?;
    s[..len].parse().ok()
}

/// Float parse that ignores trailing garbage (`"70kg"` reads as 70.0).
#[must_use]
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let len = numeric_prefix_len(s, true)?;
    s[..len].parse().ok()
}
