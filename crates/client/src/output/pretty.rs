//! Pretty output formatting.

use biodash_core::api::{
    ApiInfo, CalculationResult, CalculationsPage, GlobalStatistics, PeoplePage, PersonStatistics,
};
use biodash_core::biorhythm::{BiorhythmPoint, Cycle, DenseSeries, Person};

fn rule() -> String {
    "-".repeat(40)
}

fn flags_label(point: &BiorhythmPoint) -> String {
    let critical: Vec<&str> = Cycle::ALL
        .iter()
        .filter(|c| point.is_critical(**c))
        .map(|c| c.label())
        .collect();
    if critical.is_empty() {
        String::new()
    } else {
        format!("  critical: {}", critical.join(", "))
    }
}

pub fn format_api_info(info: &ApiInfo) -> String {
    format!(
        "{} v{}\n  Calculations available: {}",
        info.api_name,
        info.version,
        if info.pybiorythm_available { "yes" } else { "no" }
    )
}

/// Format a person for display.
pub fn format_person(person: &Person) -> String {
    let mut output = format!(
        "{}\n  ID: {}\n  Born: {}",
        person.name, person.id, person.birthdate
    );
    if let Some(email) = &person.email {
        output.push_str(&format!("\n  Email: {}", email));
    }
    if let Some(count) = person.biorhythm_data_count {
        output.push_str(&format!("\n  Data points: {}", count));
    }
    output
}

/// Format a page of people for display.
pub fn format_people(page: &PeoplePage) -> String {
    if page.results.is_empty() {
        return "No people found.".to_string();
    }
    let mut output = format!("PEOPLE ({} of {})\n", page.results.len(), page.count);
    output.push_str(&rule());
    for person in &page.results {
        output.push_str(&format!("\n{}", format_person(person)));
        output.push('\n');
    }
    output
}

pub fn format_person_statistics(stats: &PersonStatistics) -> String {
    let s = &stats.statistics;
    let mut output = String::new();
    if let Some(person) = &stats.person {
        output.push_str(&format!("{} (ID: {})\n", person.name, person.id));
    }
    output.push_str(&format!("  Data points: {}\n", s.total_data_points));
    if let Some(days) = s.date_range.days_covered {
        output.push_str(&format!("  Days covered: {}\n", days));
    }
    output.push_str(&format!(
        "  Averages: physical {:+.3}, emotional {:+.3}, intellectual {:+.3}\n",
        s.cycle_averages.physical, s.cycle_averages.emotional, s.cycle_averages.intellectual
    ));
    output.push_str(&format!(
        "  Critical days: {} ({:.1}%) physical {}, emotional {}, intellectual {}",
        s.critical_days.total,
        s.critical_days.percentage,
        s.critical_days.breakdown.physical,
        s.critical_days.breakdown.emotional,
        s.critical_days.breakdown.intellectual
    ));
    output
}

/// Format sparse samples, one line per date.
pub fn format_points(points: &[BiorhythmPoint]) -> String {
    if points.is_empty() {
        return "No data points.".to_string();
    }
    let mut output = format!("POINTS ({})\n", points.len());
    output.push_str(&rule());
    for p in points {
        output.push_str(&format!(
            "\n{}  day {:>6}  P {:+.3}  E {:+.3}  I {:+.3}{}",
            p.date,
            p.days_alive,
            p.physical,
            p.emotional,
            p.intellectual,
            flags_label(p)
        ));
    }
    output
}

/// Format a reconstructed series; synthesized days are marked with `~`.
pub fn format_dense(series: &DenseSeries) -> String {
    let mut output = format!(
        "DENSE SERIES ({} days, anchor {} @ {})\n",
        series.len(),
        series.anchor_date,
        series.anchor_days_alive
    );
    output.push_str(&rule());
    for p in &series.points {
        let marker = if p.is_sampled() { ' ' } else { '~' };
        output.push_str(&format!(
            "\n{}{} day {:>6}  P {:+.3}  E {:+.3}  I {:+.3}",
            marker, p.date, p.days_alive, p.physical, p.emotional, p.intellectual
        ));
    }
    output
}

pub fn format_calculation_result(result: &CalculationResult) -> String {
    let mut output = format!("Calculation created: {} data points", result.data_points_created);
    if let Some(id) = result.calculation.id {
        output.push_str(&format!("\n  ID: {}", id));
    }
    if let (Some(start), Some(end)) = (result.calculation.start_date, result.calculation.end_date)
    {
        output.push_str(&format!("\n  Range: {} to {}", start, end));
    }
    output
}

pub fn format_calculations(page: &CalculationsPage) -> String {
    if page.results.is_empty() {
        return "No calculations found.".to_string();
    }
    let mut output = format!("CALCULATIONS ({})\n", page.results.len());
    output.push_str(&rule());
    for calc in &page.results {
        let id = calc.id.map(|i| i.to_string()).unwrap_or_else(|| "?".to_string());
        let person = calc
            .person
            .map(|i| i.to_string())
            .unwrap_or_else(|| "?".to_string());
        output.push_str(&format!("\n#{} person {}", id, person));
        if let (Some(start), Some(end)) = (calc.start_date, calc.end_date) {
            output.push_str(&format!("  {} to {}", start, end));
        }
    }
    output
}

pub fn format_global_statistics(stats: &GlobalStatistics) -> String {
    format!(
        "People: {}\nCalculations: {}\nData points: {}\nCritical days: {}",
        stats.total_people,
        stats.total_calculations,
        stats.total_data_points,
        stats.total_critical_days
    )
}
