use coop_compensation::compensation::{Axis, IndicatorCatalog, SettlementReport, Tier};

pub(crate) fn render_text(report: &SettlementReport) {
    println!("Compensation settlement ({})", report.strategy.label());
    if let Some(as_of) = report.as_of {
        println!("Expenses active on {as_of}");
    }
    println!(
        "- {} patients | point value {:.2} | prerequisites {}",
        report.total_patients,
        report.point_value,
        if report.score.prerequisites_satisfied {
            "met"
        } else {
            "NOT met, no points awarded"
        }
    );
    println!(
        "- {:.0} points | {} gross",
        report.score.total_points,
        currency(report.score.total_amount)
    );
    for axis in Axis::ordered() {
        println!(
            "  - {}: {:.0} points",
            axis.label(),
            report.score.axis_points(axis)
        );
    }
    for tier in Tier::ordered() {
        println!(
            "  - {}: {:.0} points",
            tier.label(),
            report.score.tier_points(tier)
        );
    }

    println!(
        "\nExpenses: {} per year ({} per month)",
        currency(report.expense_exposure),
        currency(report.monthly_expenses)
    );
    for (category, total) in &report.expenses_by_category {
        println!("  - {}: {}", category.label(), currency(*total));
    }

    println!("\nMembers:");
    for row in &report.stakeholders {
        println!(
            "  - {} ({}, {:.0}%): gross {} | expenses {} | net {}",
            if row.name.is_empty() {
                row.stakeholder_id.0.as_str()
            } else {
                row.name.as_str()
            },
            row.profession,
            row.presence * 100.0,
            currency(row.gross),
            currency(row.expenses),
            currency(row.net)
        );
    }
    println!("\nGlobal net: {}", currency(report.global_net()));
}

pub(crate) fn render_catalog(catalog: &IndicatorCatalog) {
    for axis in Axis::ordered() {
        println!("{}", axis.label());
        for indicator in catalog.for_axis(axis) {
            println!(
                "  - {} {}{} [{}]: {} fixed + {} variable, max level {}",
                indicator.id,
                indicator.name,
                if indicator.prerequisite {
                    " (prerequisite)"
                } else {
                    ""
                },
                indicator.tier.label(),
                indicator.fixed_points,
                indicator.variable_points,
                indicator.max_level
            );
        }
    }
}

fn currency(amount: f64) -> String {
    format!("{amount:.2} €")
}
