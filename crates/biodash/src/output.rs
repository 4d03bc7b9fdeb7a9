//! Human-readable rendering of the dashboard view models.

use biodash_client::output::pretty;
use biodash_core::biorhythm::Cycle;

use crate::dashboard::{HomeOverview, PersonDashboard};

fn rule() -> String {
    "=".repeat(48)
}

pub fn format_home(home: &HomeOverview) -> String {
    let Some(info) = &home.api_info else {
        return "Unable to connect to the biorhythm API. Please check the server is running."
            .to_string();
    };

    let mut output = format!("{}\n{}\n", pretty::format_api_info(info), rule());
    if let Some(stats) = &home.global_stats {
        output.push_str(&pretty::format_global_statistics(stats));
        output.push('\n');
    }
    if home.people.is_empty() {
        output.push_str("\nNo people yet.");
    }
    for person in &home.people {
        output.push_str(&format!(
            "\n[{}] {} (born {})",
            person.id, person.name, person.birthdate
        ));
    }
    output
}

pub fn format_person_dashboard(page: &PersonDashboard) -> String {
    let mut output = pretty::format_person(&page.person);
    output.push_str(&format!(
        "\n  Window: {} to {} ({} points)\n{}",
        page.range.start,
        page.range.end,
        page.points.len(),
        rule()
    ));

    if !page.has_data() {
        output.push_str("\nNo biorhythm data in this window.");
        return output;
    }

    if let Some(phases) = &page.phases {
        output.push_str(&format!("\nPhases on {}:", phases.date));
        for cycle in Cycle::ALL {
            output.push_str(&format!("\n  {:<12} {:>6.1}°", cycle.label(), phases.get(cycle)));
        }
    }

    if let Some(critical) = &page.critical_days {
        output.push_str(&format!(
            "\nCritical days: {} ({:.1}%)",
            critical.total, critical.percentage
        ));
        for cycle in Cycle::ALL {
            output.push_str(&format!("\n  {:<12} {}", cycle.label(), critical.count(cycle)));
        }
    }

    if !page.correlation_pairs.is_empty() {
        output.push_str("\nCorrelation:");
        for pair in &page.correlation_pairs {
            output.push_str(&format!(
                "\n  {} / {}: {:+.3} ({})",
                pair.a.label(),
                pair.b.label(),
                pair.coefficient,
                pair.strength
            ));
        }
    }

    if let Some(dense) = &page.dense {
        output.push('\n');
        output.push_str(&pretty::format_dense(dense));
    }

    output
}
