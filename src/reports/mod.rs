use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use groundforge::distance::{DirectivityParams, DistanceSet};
use groundforge::models::Imt;
use groundforge::surface::RuptureDescriptor;

/// One (model, IMT) line of the evaluation audit; errors stay in the table
/// instead of aborting it.
pub struct EvalRow {
    pub model: &'static str,
    pub imt: String,
    pub outcome: Result<EvalCells, String>,
}

pub struct EvalCells {
    pub median: f64,
    pub ln_mean: f64,
    pub sigma: f64,
    pub exceed: Option<f64>,
}

pub fn print_rupture_summary(rupture: &RuptureDescriptor) {
    let s = &rupture.surface;
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new("Mag").add_attribute(Attribute::Bold),
        Cell::new("Rake"),
        Cell::new("Dip"),
        Cell::new("Length km"),
        Cell::new("Width km"),
        Cell::new("Top km"),
        Cell::new("Grid"),
    ]);
    table.add_row(vec![
        Cell::new(format!("{:.2}", rupture.mag)).fg(Color::Cyan),
        Cell::new(format!("{:.0}", rupture.ave_rake)),
        Cell::new(format!("{:.0}", s.ave_dip)),
        Cell::new(format!("{:.1}", s.surface_length())),
        Cell::new(format!("{:.1}", s.surface_width())),
        Cell::new(format!("{:.1}", s.top_depth())),
        Cell::new(format!("{}x{}", s.rows, s.cols)),
    ]);

    for i in 0..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}

pub fn print_distance_report(d: &DistanceSet, directivity: Option<&DirectivityParams>) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("rRup"),
        Cell::new(format!("{:.3} km", d.r_rup)).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("rJB"),
        Cell::new(format!("{:.3} km", d.r_jb)),
    ]);
    table.add_row(vec![
        Cell::new("rSeis"),
        Cell::new(format!("{:.3} km", d.r_seis)),
    ]);
    table.add_row(vec![
        Cell::new("rX (signed)"),
        Cell::new(format!("{:+.3} km", d.r_x)),
    ]);
    table.add_row(vec![
        Cell::new("(rRup-rJB)/rRup"),
        Cell::new(format!("{:.4}", d.rup_minus_jb_over_rup)),
    ]);
    table.add_row(vec![
        Cell::new("(rRup∓rX)/rRup"),
        Cell::new(format!("{:.4}", d.rup_minus_x_over_rup)),
    ]);
    table.add_row(vec![
        Cell::new("Hanging wall"),
        if d.hanging_wall {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            Cell::new("no").fg(Color::Green)
        },
    ]);
    table.add_row(vec![
        Cell::new("HW taper"),
        Cell::new(format!("{:.3}", d.hanging_wall_taper)),
    ]);

    if let Some(dir) = directivity {
        table.add_row(vec![
            Cell::new("Directivity X"),
            Cell::new(format!("{:.4}", dir.x)),
        ]);
        table.add_row(vec![
            Cell::new("Directivity theta"),
            Cell::new(format!("{:.2} deg", dir.theta_deg)),
        ]);
    }

    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("\n{}", table);
}

pub fn print_evaluation_report(rows: &[EvalRow], iml: Option<f64>) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("Model").add_attribute(Attribute::Bold),
        Cell::new("IMT").add_attribute(Attribute::Bold),
        Cell::new("Median").fg(Color::Cyan),
        Cell::new("ln Mean"),
        Cell::new("Sigma"),
    ];
    if let Some(iml) = iml {
        header.push(Cell::new(format!("P(> {iml})")));
    }
    table.add_row(header);

    for i in 2..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in rows {
        match &row.outcome {
            Ok(c) => {
                let mut cells = vec![
                    Cell::new(row.model).add_attribute(Attribute::Bold),
                    Cell::new(&row.imt),
                    Cell::new(format!("{:.4}", c.median)).fg(Color::Cyan),
                    Cell::new(format!("{:+.4}", c.ln_mean)),
                    Cell::new(format!("{:.4}", c.sigma)),
                ];
                if iml.is_some() {
                    cells.push(match c.exceed {
                        Some(p) => Cell::new(format!("{p:.4}")),
                        None => Cell::new("-"),
                    });
                }
                table.add_row(cells);
            }
            Err(msg) => {
                let mut cells = vec![
                    Cell::new(row.model).add_attribute(Attribute::Bold),
                    Cell::new(&row.imt),
                    Cell::new(msg).fg(Color::Red),
                    Cell::new("-"),
                    Cell::new("-"),
                ];
                if iml.is_some() {
                    cells.push(Cell::new("-"));
                }
                table.add_row(cells);
            }
        }
    }
    println!("\n{}", table);
}

pub fn print_curve_report(levels_ln: &[f64], probs: &[f64]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new("IML").add_attribute(Attribute::Bold),
        Cell::new("P(exceed)").add_attribute(Attribute::Bold),
    ]);
    for (lvl, p) in levels_ln.iter().zip(probs) {
        table.add_row(vec![
            Cell::new(format!("{:.5}", lvl.exp())),
            Cell::new(format!("{p:.4e}")),
        ]);
    }

    for i in 0..=1 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}

pub fn print_sample_report(imt: Imt, sorted: &[f64]) {
    let n = sorted.len();
    let pick = |p: f64| sorted[((p / 100.0) * (n - 1) as f64).round() as usize];
    let mean = sorted.iter().sum::<f64>() / n as f64;

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new("Statistic").add_attribute(Attribute::Bold),
        Cell::new(format!("{imt}")).add_attribute(Attribute::Bold),
    ]);
    for (label, value) in [
        ("min", sorted[0]),
        ("5%", pick(5.0)),
        ("16%", pick(16.0)),
        ("50%", pick(50.0)),
        ("84%", pick(84.0)),
        ("95%", pick(95.0)),
        ("max", sorted[n - 1]),
        ("mean", mean),
    ] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{value:.5}")).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("\n{}", table);
}
