//! Line-oriented prompts that collect the form fields.

use clinic_core::{compute_bmi, FormFields, Gender, VisitType};
use std::io::{self, BufRead, Write};

const DEFAULT_AGE: u32 = 1;
const MAX_AGE: u32 = 120;
const DEFAULT_WEIGHT_KG: f64 = 10.0;
const DEFAULT_HEIGHT_CM: f64 = 50.0;
const DEFAULT_WAIST_CM: f64 = 10.0;
const DEFAULT_SUGAR_MMOL: f64 = 2.0;

/// Prompt reader over any buffered input
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Walk through every field. Returns `None` when the entry is abandoned.
    pub fn collect_fields(&mut self) -> io::Result<Option<FormFields>> {
        writeln!(self.output, "── Patient Details ──")?;

        let age = match self.ask(&format!("Age [{}]: ", DEFAULT_AGE))? {
            Some(answer) if answer.is_empty() => Some(DEFAULT_AGE),
            Some(answer) => answer.parse::<u32>().ok(),
            None => return Ok(None),
        };
        if matches!(age, Some(a) if a > MAX_AGE) {
            writeln!(self.output, "Age must be between 1 and {}.", MAX_AGE)?;
            return Ok(None);
        }

        let gender = self.ask_choice::<Gender>("Gender (M/F) [M]: ")?;
        let weight_kg = self.ask_number(&format!("Weight (kg) [{:.1}]: ", DEFAULT_WEIGHT_KG), DEFAULT_WEIGHT_KG)?;
        let height_cm = self.ask_number(&format!("Height (cm) [{:.1}]: ", DEFAULT_HEIGHT_CM), DEFAULT_HEIGHT_CM)?;
        writeln!(self.output, "BMI: {}", bmi_preview(weight_kg, height_cm))?;

        let waist_cm = self.ask_number(&format!("Waist Circ (cm) [{:.1}]: ", DEFAULT_WAIST_CM), DEFAULT_WAIST_CM)?;

        writeln!(self.output, "Visit types:")?;
        for (i, visit) in VisitType::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, visit)?;
        }
        let visit_type = self.ask_choice::<VisitType>("Visit Type [New Visit]: ")?;

        writeln!(self.output, "── Clinical Metrics ──")?;
        let bp = self.ask("BP (mmHg), e.g. 140/90: ")?.unwrap_or_default();
        let blood_sugar = self.ask_number(
            &format!("Blood Sugar (mmol/L) [{:.1}]: ", DEFAULT_SUGAR_MMOL),
            DEFAULT_SUGAR_MMOL,
        )?;
        let treatment_code = self.ask("Treatment Code, e.g. abe: ")?.unwrap_or_default();

        writeln!(self.output, "── Diagnosis Status ──")?;
        let has_htn = self.ask_flag("Hypertension (HTN)? [y/N]: ")?;
        let has_diabetes = self.ask_flag("Diabetes (DM)? [y/N]: ")?;
        let has_both = self.ask_flag("Both DM + HTN? [y/N]: ")?;

        Ok(Some(FormFields {
            age,
            gender,
            weight_kg,
            height_cm,
            waist_cm,
            bp,
            blood_sugar,
            has_htn,
            has_diabetes,
            has_both,
            treatment_code,
            visit_type,
        }))
    }

    // Blank takes the default; anything unparsable is treated as absent.
    fn ask_number(&mut self, label: &str, default: f64) -> io::Result<Option<f64>> {
        Ok(match self.ask(label)? {
            Some(answer) if !answer.is_empty() => parse_number(&answer),
            _ => Some(default),
        })
    }

    fn ask_choice<T>(&mut self, label: &str) -> io::Result<T>
    where
        T: std::str::FromStr<Err = String> + Default,
    {
        loop {
            match self.ask(label)? {
                None => return Ok(T::default()),
                Some(answer) if answer.is_empty() => return Ok(T::default()),
                Some(answer) => match answer.parse::<T>() {
                    Ok(value) => return Ok(value),
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
            }
        }
    }

    fn ask_flag(&mut self, label: &str) -> io::Result<bool> {
        Ok(matches!(
            self.ask(label)?.as_deref().map(str::to_lowercase).as_deref(),
            Some("y" | "yes")
        ))
    }
}

fn parse_number(answer: &str) -> Option<f64> {
    answer.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// BMI text as the form displays it
pub(crate) fn bmi_preview(weight_kg: Option<f64>, height_cm: Option<f64>) -> String {
    match (weight_kg, height_cm) {
        (Some(w), Some(h)) => compute_bmi(w, h).map_or_else(|| "—".to_string(), |b| b.to_string()),
        _ => "—".to_string(),
    }
}
