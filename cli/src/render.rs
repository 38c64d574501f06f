//! Terminal rendering

use crossterm::{
    cursor,
    terminal::{self, ClearType},
    ExecutableCommand,
};
use owo_colors::OwoColorize;
use sait_economics::Runway;
use sait_feed::DataSource;
use sait_governance::{GrantStatus, GrantTier};
use std::io::{self, Write};

use crate::report::Report;

pub fn clear_screen() {
    let mut stdout = io::stdout();
    let _ = stdout.execute(terminal::Clear(ClearType::All));
    let _ = stdout.execute(cursor::MoveTo(0, 0));
    let _ = stdout.flush();
}

pub fn billions(value: f64) -> String {
    format!("${:.2}B", value / 1e9)
}

pub fn millions(value: f64) -> String {
    format!("{:.2}M", value / 1e6)
}

pub fn runway(runway: &Runway) -> String {
    match runway {
        Runway::Periods(months) => format!("{:.1} mo", months),
        Runway::Unbounded => "unbounded".to_string(),
    }
}

fn status_label(status: GrantStatus) -> &'static str {
    match status {
        GrantStatus::Completed => "completed",
        GrantStatus::Receiving => "receiving",
        GrantStatus::Applying => "applying",
    }
}

fn section(title: &str) {
    let bar = "─".repeat(60usize.saturating_sub(title.len()));
    println!("{}", format!("┌─ {} {}┐", title, bar).blue());
}

fn section_end() {
    println!("{}", format!("└{}┘", "─".repeat(63)).blue());
    println!();
}

fn render_header(report: &Report) {
    println!(
        "{}",
        "╔══════════════════════════════════════════════════════════════╗"
            .cyan()
            .bold()
    );
    println!(
        "{}",
        "║         SAIT GOVERNANCE DASHBOARD                            ║"
            .cyan()
            .bold()
    );
    println!(
        "{}",
        "╚══════════════════════════════════════════════════════════════╝"
            .cyan()
            .bold()
    );

    let source = match report.snapshot.source {
        DataSource::OnChain => "Live Data (on-chain)".green().to_string(),
        DataSource::Baseline => "Baseline Data".yellow().to_string(),
    };
    println!("  {}: {}", "Data Source".bright_black(), source);
    if let Some(updated) = report.snapshot.updated_at {
        println!(
            "  {}: {}",
            "Last Updated".bright_black(),
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    println!();
}

fn render_metrics(report: &Report) {
    let state = report.state();
    let m = &report.metrics;

    section("Ecosystem Metrics");
    println!(
        "│ {:<24} {} (premium {:.1}%)",
        "Token Price:".bright_black(),
        format!("${:.2}", state.token_price).green().bold(),
        m.premium_pct()
    );
    println!(
        "│ {:<24} {}",
        "Market Cap:".bright_black(),
        billions(m.market_cap).bold()
    );
    println!(
        "│ {:<24} {} ({:.1}% of total)",
        "Circulating Supply:".bright_black(),
        millions(state.circulating_supply),
        m.circulating_percent * 100.0
    );
    println!(
        "│ {:<24} {} ({} reserve tokens)",
        "Treasury Value:".bright_black(),
        billions(m.treasury_value).bold(),
        millions(state.reserve_token_balance)
    );
    section_end();

    section("Buyback Analytics");
    println!(
        "│ {:<24} {:.2}%",
        "Monthly Rate:".bright_black(),
        state.monthly_buyback_rate * 100.0
    );
    println!(
        "│ {:<24} {} tokens / ${}",
        "Monthly Volume:".bright_black(),
        millions(m.monthly_buyback_volume),
        millions(m.monthly_buyback_value)
    );
    println!(
        "│ {:<24} {}",
        "Reserve Runway:".bright_black(),
        runway(&m.buyback_runway).magenta().bold()
    );
    println!(
        "│ {:<24} {}",
        "Annual Net Circulation:".bright_black(),
        millions(m.projected_annual_net_circulation)
    );
    section_end();

    section("Allocation");
    for slice in &report.allocation {
        println!(
            "│ {:<24} {:>10} {:>6.1}%",
            format!("{}:", slice.name).bright_black(),
            millions(slice.tokens),
            slice.share * 100.0
        );
    }
    section_end();
}

fn render_projection(report: &Report) {
    section("Forward Projection");
    println!(
        "│ {:<8} {:>10} {:>12} {:>12} {:>12} {:>12}",
        "Month", "Price", "Market Cap", "Reserves", "Treasury", "Runway"
    );
    for row in &report.milestones {
        println!(
            "│ {:<8} {:>10} {:>12} {:>12} {:>12} {:>12}",
            format!("M{}", row.period),
            format!("${:.2}", row.price),
            billions(row.market_cap),
            millions(row.reserve_balance),
            billions(row.treasury_value),
            runway(&row.runway)
        );
    }
    if report.projection.has_clamped() {
        println!(
            "│ {}",
            format!(
                "⚠️  circulation clamped to zero in {} period(s)",
                report.projection.warnings.len()
            )
            .yellow()
        );
    }
    section_end();
}

fn render_grants(report: &Report) {
    let audit = &report.audit;

    section("Grant Governance Audit");
    println!(
        "│ {:<10} {:>5} {:>5} {:>5} {:>6} {:>6} {:>6} {:>10} {:>7}",
        "Quarter", "Done", "Recv", "Appl", "T1", "T2", "T3", "Committed", "Part."
    );
    for q in &audit.rollups {
        println!(
            "│ {:<10} {:>5} {:>5} {:>5} {:>6} {:>6} {:>6} {:>10} {:>6.1}%",
            q.period,
            q.completed,
            q.receiving,
            q.applying,
            q.tier(GrantTier::One).count,
            q.tier(GrantTier::Two).count,
            q.tier(GrantTier::Three).count,
            format!("${}", millions(q.total_committed)),
            q.mean_participation
        );
    }
    println!("│");
    println!(
        "│ {:<28} ${}",
        "Total Committed:".bright_black(),
        millions(audit.summary.total_committed)
    );
    println!(
        "│ {:<28} {}",
        "Total Grants:".bright_black(),
        audit.summary.total_grants
    );
    println!(
        "│ {:<28} {:.1}% (vote-weighted {:.1}%)",
        "Avg Participation:".bright_black(),
        audit.summary.mean_participation,
        audit.summary.vote_weighted_participation
    );
    if let Some(current) = audit.current_quarter() {
        println!(
            "│ {:<28} {} receiving, {} applying",
            format!("{}:", current.period).bright_black(),
            current.receiving,
            current.applying
        );
    }
    section_end();

    section("Grants");
    for grant in &report.grants {
        println!(
            "│ {:<11} {:<8} T{} {:<38} {:>8} {:<10} {:>5.1}%",
            grant.id,
            grant.period,
            grant.tier.number(),
            grant.title,
            format!("${}", millions(grant.value)),
            status_label(grant.status),
            grant.voter_participation_pct
        );
    }
    section_end();
}

fn render_footer(live: bool) {
    println!(
        "{}",
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black()
    );
    if live {
        println!("  {} to exit", "Press Ctrl+C".bright_black());
    }
    println!(
        "  {}",
        "For informational purposes only. Not financial advice.".bright_black()
    );
}

pub fn render(report: &Report, live: bool) {
    render_header(report);
    render_metrics(report);
    render_projection(report);
    render_grants(report);
    render_footer(live);
}
