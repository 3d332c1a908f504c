use std::path::Path;

use anyhow::{Context, Result};

use crate::dashboard::{DashboardView, GlobalTeamRow, TeamView};
use crate::policy::{ProductSort, ProductSortKey};
use crate::product::ProductRollup;

/// Rounded percentage label.
fn pct(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

fn cell(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.replace('|', "\\|")
    }
}

/// Render the consolidated Build-only table.
pub fn render_global_md(rows: &[GlobalTeamRow]) -> String {
    let mut out = String::new();
    out.push_str("## Consolidated view (Build only)\n\n");
    out.push_str("Run epics are continuous flow and are excluded from mid-PI completion.\n\n");
    out.push_str("| Team | Epics | Done | In progress | Not started | Scoping | Alert | Badge |\n");
    out.push_str("|---|---|---|---|---|---|---|---|\n");
    for r in rows {
        let m = &r.metrics;
        out.push_str(&format!(
            "| {} | {} (+{} run) | {} ({}) | {} ({}) | {} ({}) | {} | {} | {} |\n",
            cell(&r.team),
            m.total_epics,
            r.run_count,
            m.termine,
            pct(m.pct_epics_terminees),
            m.en_cours,
            pct(m.pct_epics_en_cours),
            m.non_demarrees,
            pct(m.pct_non_demarrees),
            m.a_cadrer,
            r.alert,
            r.badge,
        ));
    }
    out
}

/// Render one team's header, metrics and epic rows.
pub fn render_team_md(view: &TeamView) -> String {
    let m = &view.metrics;
    let mut out = String::new();
    out.push_str(&format!("## {} [{}]\n\n", view.team, view.badge));
    out.push_str(&format!(
        "Showing: {} (build {} | run {} | all {})\n\n",
        view.filter, view.counts.build, view.counts.run, view.counts.all
    ));
    out.push_str(&format!(
        "- Done: {}/{} ({})\n",
        m.termine,
        m.total_epics,
        pct(m.pct_epics_terminees)
    ));
    out.push_str(&format!(
        "- In progress: {} ({})\n",
        m.en_cours,
        pct(m.pct_epics_en_cours)
    ));
    out.push_str(&format!(
        "- Not started: {} ({})\n",
        m.non_demarrees,
        pct(m.pct_non_demarrees)
    ));
    out.push_str(&format!("- Scoping: {}\n", m.a_cadrer));
    out.push_str(&format!("- To do: {}\n", m.a_faire));
    out.push_str(&format!("- Alert for this view: {}\n\n", view.alert));

    if view.epics.is_empty() {
        out.push_str("_No epics for this view._\n");
        return out;
    }

    out.push_str("| Epic | Title | Status | Progress | Product | Attention |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    for a in &view.epics {
        let e = &a.epic;
        let title = match &a.type_badge {
            Some(badge) => format!("{} `{}`", cell(&e.title), badge.label),
            None => cell(&e.title),
        };
        let progress = if e.tickets_total > 0 {
            format!(
                "{}/{} tickets ({}%, {:?})",
                e.tickets_done, e.tickets_total, a.completion_pct, a.bar_color
            )
            .to_lowercase()
        } else {
            "-".to_string()
        };
        let attention = if a.attention.alert {
            format!("{:?}: {}", a.attention.color, a.attention.reason).to_lowercase()
        } else {
            "-".to_string()
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            cell(&e.epic_key),
            title,
            cell(&e.status),
            progress,
            cell(&e.product_components),
            attention,
        ));
    }
    out
}

/// Render the product table with the active column marked.
pub fn render_products_md(products: &[ProductRollup], sort: ProductSort) -> String {
    let header = |key: ProductSortKey, label: &str| {
        if sort.key == key {
            format!("{} {}", label, sort.direction.indicator())
        } else {
            label.to_string()
        }
    };

    let mut out = String::new();
    out.push_str("## Products (cross-team)\n\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
        header(ProductSortKey::ProductName, "Product"),
        header(ProductSortKey::Teams, "Teams"),
        header(ProductSortKey::EpicCount, "Epics"),
        header(ProductSortKey::TerminatedCount, "Done"),
        header(ProductSortKey::InProgressCount, "In progress"),
        header(ProductSortKey::DoneTickets, "Tickets done"),
        header(ProductSortKey::Completion, "Completion"),
        header(ProductSortKey::Alert, "Alert"),
    ));
    out.push_str("|---|---|---|---|---|---|---|---|\n");
    for p in products {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {}/{} | {}% | {} |\n",
            cell(&p.product),
            cell(&p.teams_text()),
            p.total,
            p.termine,
            p.en_cours,
            p.done_tickets,
            p.total_tickets,
            p.pct,
            p.alert,
        ));
    }
    out
}

/// Render the whole dashboard as one markdown document.
pub fn render_dashboard_md(view: &DashboardView) -> String {
    let x = &view.extraction;
    let mut out = String::new();
    out.push_str("# Epic Dashboard\n\n");
    out.push_str(&format!(
        "{} epics loaded for {} teams, {} malformed rows dropped. Extracted {}.\n\n",
        x.epics,
        x.teams,
        x.dropped_rows,
        x.generated_at.format("%Y-%m-%d"),
    ));
    out.push_str(&render_global_md(&view.global));
    out.push('\n');
    out.push_str(&render_products_md(&view.products, view.product_sort));
    for team in &view.teams {
        out.push('\n');
        out.push_str(&render_team_md(team));
    }
    out
}

/// Write the dashboard view as pretty JSON.
pub fn write_dashboard_json(path: &Path, view: &DashboardView) -> Result<()> {
    let content = serde_json::to_string_pretty(view).context("serialize dashboard view")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Write the dashboard as markdown.
pub fn write_dashboard_md(path: &Path, view: &DashboardView) -> Result<()> {
    let md = render_dashboard_md(view);
    std::fs::write(path, md).with_context(|| format!("write {:?}", path))?;
    Ok(())
}
