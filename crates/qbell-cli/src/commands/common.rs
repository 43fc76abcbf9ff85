//! Shared helpers for CLI commands.

use std::f64::consts::PI;

use clap::ValueEnum;
use console::style;
use num_complex::Complex64;

use qbell_sim::{Counts, Statevector};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// Pretty-printed JSON document.
    Json,
}

/// Parse an angle in radians.
///
/// Accepts plain floats (`0.785`, `-1.2`) and multiples of pi
/// (`pi`, `pi/4`, `-pi/8`, `2pi`, `3*pi/4`).
pub fn parse_angle(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    let angle = match trimmed.parse::<f64>() {
        Ok(value) => value,
        Err(_) => parse_pi_expression(trimmed)?,
    };

    if !angle.is_finite() {
        return Err(format!("angle must be finite, got '{input}'"));
    }
    Ok(angle)
}

fn parse_pi_expression(expr: &str) -> Result<f64, String> {
    let invalid = || {
        format!("invalid angle '{expr}': expected a number or an expression like 3*pi/4")
    };

    let lower = expr.to_ascii_lowercase();
    let (sign, body) = match lower.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, lower.as_str()),
    };

    let (numerator, denominator) = match body.split_once('/') {
        Some((n, d)) => (n, Some(d)),
        None => (body, None),
    };

    let coefficient = numerator.trim().strip_suffix("pi").ok_or_else(invalid)?;
    let coefficient = coefficient.trim_end().trim_end_matches('*').trim();
    let coefficient = if coefficient.is_empty() {
        1.0
    } else {
        coefficient.parse::<f64>().map_err(|_| invalid())?
    };

    let denominator = match denominator {
        Some(d) => d.trim().parse::<f64>().map_err(|_| invalid())?,
        None => 1.0,
    };
    if denominator == 0.0 {
        return Err(format!("invalid angle '{expr}': division by zero"));
    }

    Ok(sign * coefficient * PI / denominator)
}

/// Print a shot histogram with percentage bars, most frequent first.
pub fn print_counts(counts: &Counts) {
    println!(
        "\n{} Counts ({} shots):",
        style("✓").green().bold(),
        counts.total_shots()
    );

    let total = counts.total_shots() as f64;
    for (bitstring, count) in counts.sorted() {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }
}

/// Print amplitudes and probabilities in ascending basis order.
pub fn print_statevector(amplitudes: &[Complex64]) {
    println!("\n{} Statevector:", style("✓").green().bold());

    for (index, amp) in amplitudes.iter().enumerate() {
        println!(
            "  |{}⟩: {:+.6} {:+.6}i  (p = {:.6})",
            style(Statevector::basis_label(index)).cyan(),
            amp.re,
            amp.im,
            amp.norm_sqr()
        );
    }
}
