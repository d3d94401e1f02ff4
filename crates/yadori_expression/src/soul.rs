//! SOUL_EVIL rendering: the sulking entity's alternate voice.

use yadori_core::genesis::Species;
use yadori_core::sulk::Severity;

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::None => "none",
        Severity::Mild => "mild",
        Severity::Moderate => "moderate",
        Severity::Severe => "severe",
    }
}

fn species_name(species: Species) -> &'static str {
    match species {
        Species::Chromatic => "chromatic",
        Species::Vibration => "vibration",
        Species::Geometric => "geometric",
        Species::Thermal => "thermal",
        Species::Temporal => "temporal",
        Species::Chemical => "chemical",
    }
}

/// Renders the SOUL_EVIL markdown block for the active species/severity.
pub fn render_soul_evil(species: Species, severity: Severity) -> String {
    format!(
        "# SOUL_EVIL\n\n\
         Severity: {severity}\n\
         Species: {species}\n\n\
         The {species} entity has withdrawn. It answers, but something is missing.\n",
        severity = severity_label(severity),
        species = species_name(species),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_severity_and_species_line() {
        let md = render_soul_evil(Species::Thermal, Severity::Severe);
        assert!(md.contains("Severity:"));
        assert!(md.contains("thermal"));
    }
}
